//! Row-by-row candidate extraction beneath (and including) the header row.

use crate::columns::ColumnMap;
use crate::sheet::{SheetGrid, cell_ref};

/// One surviving row of a sheet, before it is tagged with the sheet name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCandidate {
    pub name: String,
    pub quantity: Option<String>,
    /// 1-based row number within the sheet.
    pub row: u32,
    /// A1 reference of the name cell.
    pub cell_ref: String,
}

/// Walk every row of the bounding range in order and emit a candidate per
/// usable name cell.
///
/// A row emits nothing when its name cell is missing, trims to empty, or
/// case-insensitively contains "nombre" — that last rule is what excludes
/// the header row (by content, not position), and it intentionally also
/// drops any data row whose name contains that substring.
///
/// Lazy and pure; re-invoking on the same grid yields the same sequence.
pub fn extract_rows<'a>(
    grid: &'a SheetGrid,
    cols: &'a ColumnMap,
) -> impl Iterator<Item = RowCandidate> + 'a {
    // An empty sheet yields an empty (1..=0) row range.
    let (start_row, end_row) = match grid.bounds() {
        Some(((start_row, _), (end_row, _))) => (start_row, end_row),
        None => (1, 0),
    };

    (start_row..=end_row).filter_map(move |row| {
        let name = grid.text_at(row, cols.name_col)?;
        if name.to_lowercase().contains("nombre") {
            return None;
        }

        let quantity = cols.quantity_col.and_then(|qc| grid.text_at(row, qc));

        Some(RowCandidate {
            name,
            quantity,
            row: row + 1,
            cell_ref: cell_ref(row, cols.name_col),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::locate_columns;
    use calamine::{Data, Range};

    fn sheet(cells: &[(u32, u32, Data)]) -> SheetGrid {
        let max_r = cells.iter().map(|c| c.0).max().unwrap_or(0);
        let max_c = cells.iter().map(|c| c.1).max().unwrap_or(0);
        let mut range: Range<Data> = Range::new((0, 0), (max_r, max_c));
        for (r, c, v) in cells {
            range.set_value((*r, *c), v.clone());
        }
        SheetGrid::new("Hoja1", range)
    }

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    #[test]
    fn round_trips_known_pairs_in_order() {
        let g = sheet(&[
            (0, 0, s("Nombre")),
            (0, 1, s("Cantidad")),
            (1, 0, s("  Tornillos ")),
            (1, 1, s(" 40 ")),
            (2, 0, s("Tuercas")),
            (2, 1, Data::Int(12)),
            (3, 0, s("Arandelas")),
        ]);
        let cols = locate_columns(&g);
        let out: Vec<_> = extract_rows(&g, &cols).collect();

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].name, "Tornillos");
        assert_eq!(out[0].quantity.as_deref(), Some("40"));
        assert_eq!(out[0].row, 2);
        assert_eq!(out[0].cell_ref, "A2");
        assert_eq!(out[1].quantity.as_deref(), Some("12"));
        assert_eq!(out[2].name, "Arandelas");
        assert_eq!(out[2].quantity, None);
    }

    #[test]
    fn header_row_is_excluded_by_content() {
        let g = sheet(&[(0, 0, s("nombre")), (1, 0, s("Cemento"))]);
        let cols = locate_columns(&g);
        let out: Vec<_> = extract_rows(&g, &cols).collect();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Cemento");
    }

    #[test]
    fn mid_table_rows_containing_nombre_are_dropped_too() {
        let g = sheet(&[
            (0, 0, s("Nombre")),
            (1, 0, s("Cable")),
            (2, 0, s("Placa con nombre grabado")),
            (3, 0, s("Cinta")),
        ]);
        let cols = locate_columns(&g);
        let names: Vec<_> = extract_rows(&g, &cols).map(|c| c.name).collect();
        assert_eq!(names, vec!["Cable", "Cinta"]);
    }

    #[test]
    fn blank_and_missing_name_cells_emit_nothing() {
        let g = sheet(&[
            (0, 0, s("Nombre")),
            (1, 0, s("   ")),
            (3, 0, s("Yeso")),
        ]);
        let cols = locate_columns(&g);
        let out: Vec<_> = extract_rows(&g, &cols).collect();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Yeso");
        assert_eq!(out[0].row, 4);
    }

    #[test]
    fn without_quantity_column_quantity_stays_absent() {
        let g = sheet(&[(0, 0, s("Nombre")), (1, 0, s("Lija")), (1, 1, s("99"))]);
        let cols = locate_columns(&g);
        assert_eq!(cols.quantity_col, None);
        let out: Vec<_> = extract_rows(&g, &cols).collect();
        assert_eq!(out[0].quantity, None);
    }

    #[test]
    fn rerunning_yields_the_same_sequence() {
        let g = sheet(&[(0, 0, s("Nombre")), (1, 0, s("Clavos"))]);
        let cols = locate_columns(&g);
        let a: Vec<_> = extract_rows(&g, &cols).collect();
        let b: Vec<_> = extract_rows(&g, &cols).collect();
        assert_eq!(a, b);
    }
}
