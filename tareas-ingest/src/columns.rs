//! Header-based column location.

use crate::sheet::SheetGrid;

/// Resolved column indices for one sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    /// Column holding task names. Always resolved (falls back to the
    /// leftmost column of the bounding range).
    pub name_col: u32,
    /// Column holding quantities. No fallback: `None` means quantity
    /// extraction is skipped for the whole sheet.
    pub quantity_col: Option<u32>,
}

/// Scan the bounding range row-major for header cells containing "nombre"
/// (task names) and "cantidad" (quantities), case-insensitively.
///
/// The scan stops after the first row that yields a name match; within each
/// row every cell is still visited, so a quantity header on that same row is
/// picked up. First match wins for both columns. Pure and deterministic.
pub fn locate_columns(grid: &SheetGrid) -> ColumnMap {
    let Some(((start_row, start_col), (end_row, end_col))) = grid.bounds() else {
        return ColumnMap {
            name_col: 0,
            quantity_col: None,
        };
    };

    let mut name_col = None;
    let mut quantity_col = None;

    let mut row = start_row;
    while row <= end_row && name_col.is_none() {
        for col in start_col..=end_col {
            let Some(text) = grid.text_at(row, col) else {
                continue;
            };
            let text = text.to_lowercase();
            if name_col.is_none() && text.contains("nombre") {
                name_col = Some(col);
            }
            if quantity_col.is_none() && text.contains("cantidad") {
                quantity_col = Some(col);
            }
        }
        row += 1;
    }

    ColumnMap {
        name_col: name_col.unwrap_or(start_col),
        quantity_col,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Range};

    fn grid(cells: &[(u32, u32, &str)]) -> SheetGrid {
        let max_r = cells.iter().map(|c| c.0).max().unwrap_or(0);
        let max_c = cells.iter().map(|c| c.1).max().unwrap_or(0);
        let mut range: Range<Data> = Range::new((0, 0), (max_r, max_c));
        for (r, c, v) in cells {
            range.set_value((*r, *c), Data::String((*v).to_string()));
        }
        SheetGrid::new("Hoja1", range)
    }

    #[test]
    fn finds_first_name_header_row_major() {
        let g = grid(&[
            (0, 0, "Item"),
            (0, 2, "NOMBRE del material"),
            (1, 1, "nombre"),
        ]);
        let cols = locate_columns(&g);
        assert_eq!(cols.name_col, 2);
    }

    #[test]
    fn quantity_found_independently_on_same_row() {
        let g = grid(&[(0, 1, "Nombre"), (0, 3, "Cantidad")]);
        let cols = locate_columns(&g);
        assert_eq!(cols.name_col, 1);
        assert_eq!(cols.quantity_col, Some(3));
    }

    #[test]
    fn missing_name_header_falls_back_to_leftmost_column() {
        let g = grid(&[(0, 1, "Material"), (1, 1, "Tornillos")]);
        let cols = locate_columns(&g);
        assert_eq!(cols.name_col, 0);
        assert_eq!(cols.quantity_col, None);
    }

    #[test]
    fn quantity_header_below_name_row_is_not_seen() {
        // Scan stops after the row where the name header matched.
        let g = grid(&[(0, 0, "nombre"), (2, 1, "cantidad")]);
        let cols = locate_columns(&g);
        assert_eq!(cols.name_col, 0);
        assert_eq!(cols.quantity_col, None);
    }

    #[test]
    fn empty_grid_defaults_to_column_zero() {
        let g = SheetGrid::new("Vacia", Range::empty());
        let cols = locate_columns(&g);
        assert_eq!(cols.name_col, 0);
        assert_eq!(cols.quantity_col, None);
    }
}
