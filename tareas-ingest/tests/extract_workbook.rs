use calamine::{Data, Range};
use tareas_core::TaskStatus;
use tareas_ingest::{ExtractError, SheetGrid, extract_workbook};

fn sheet(name: &str, cells: &[(u32, u32, &str)]) -> SheetGrid {
    let max_r = cells.iter().map(|c| c.0).max().unwrap_or(0);
    let max_c = cells.iter().map(|c| c.1).max().unwrap_or(0);
    let mut range: Range<Data> = Range::new((0, 0), (max_r, max_c));
    for (r, c, v) in cells {
        range.set_value((*r, *c), Data::String((*v).to_string()));
    }
    SheetGrid::new(name, range)
}

#[test]
fn concatenates_sheets_in_workbook_order() {
    let s1 = sheet(
        "Materiales",
        &[
            (0, 0, "Nombre"),
            (0, 1, "Cantidad"),
            (1, 0, "Tornillos"),
            (1, 1, "40"),
            (2, 0, "Tuercas"),
            (2, 1, "12"),
            (3, 0, "Arandelas"),
        ],
    );
    // Only a header: zero valid rows, but not fatal on its own.
    let s2 = sheet("Vacia", &[(0, 0, "Nombre")]);
    let s3 = sheet("Extras", &[(0, 0, "Nombre"), (1, 0, "Cinta"), (2, 0, "Lija")]);

    let tasks = extract_workbook(&[s1, s2, s3]).unwrap();

    assert_eq!(tasks.len(), 5);
    let names: Vec<_> = tasks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Tornillos", "Tuercas", "Arandelas", "Cinta", "Lija"]);

    let sheets: Vec<_> = tasks.iter().map(|t| t.sheet.as_str()).collect();
    assert_eq!(
        sheets,
        vec!["Materiales", "Materiales", "Materiales", "Extras", "Extras"]
    );

    assert!(tasks.iter().all(|t| t.status == TaskStatus::Pendiente));
    assert!(tasks.iter().all(|t| t.id.is_none()));

    // Provenance of the first task: name cell A2, 1-based row 2.
    assert_eq!(tasks[0].row, 2);
    assert_eq!(tasks[0].cell_ref, "A2");
    assert_eq!(tasks[0].quantity.as_deref(), Some("40"));
    // Extras has no quantity column at all.
    assert_eq!(tasks[3].quantity, None);
}

#[test]
fn workbook_with_no_usable_rows_is_a_fatal_error() {
    let s1 = sheet("Hoja1", &[(0, 0, "Nombre")]);
    let s2 = sheet("Hoja2", &[(0, 0, "nombre del item")]);

    let err = extract_workbook(&[s1, s2]).unwrap_err();
    assert!(matches!(err, ExtractError::EmptyExtraction));
}

#[test]
fn headerless_sheet_uses_leftmost_column() {
    let s = sheet(
        "SinCabecera",
        &[(0, 1, "Material"), (1, 0, "Cemento"), (2, 0, "Arena")],
    );
    let tasks = extract_workbook(&[s]).unwrap();
    // "Material" does not contain "nombre", so column 0 is the fallback and
    // row 1 has no name cell there.
    let names: Vec<_> = tasks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Cemento", "Arena"]);
    assert_eq!(tasks[0].cell_ref, "A2");
}
