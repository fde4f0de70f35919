//! Whole-workbook aggregation: sheets in, one ordered task list out.

use std::path::Path;

use tareas_core::Task;

use crate::columns::locate_columns;
use crate::error::ExtractError;
use crate::rows::extract_rows;
use crate::sheet::{SheetGrid, read_workbook};

/// Run the locator and extractor over every sheet and concatenate the
/// results — sheet order first, row order within each sheet. Each task is
/// tagged with its sheet name and starts pending, unsaved.
///
/// A workbook where every sheet yields zero rows is a fatal
/// [`ExtractError::EmptyExtraction`]; individual empty sheets are fine.
pub fn extract_workbook(sheets: &[SheetGrid]) -> Result<Vec<Task>, ExtractError> {
    let mut tasks = Vec::new();

    for grid in sheets {
        let cols = locate_columns(grid);
        for cand in extract_rows(grid, &cols) {
            let mut task = Task::extracted(cand.name, grid.name.clone(), cand.row, cand.cell_ref);
            task.quantity = cand.quantity;
            tasks.push(task);
        }
    }

    if tasks.is_empty() {
        return Err(ExtractError::EmptyExtraction);
    }
    Ok(tasks)
}

/// Convenience: load a workbook file and extract its tasks in one call.
pub fn import_workbook(path: impl AsRef<Path>) -> Result<Vec<Task>, ExtractError> {
    let sheets = read_workbook(path)?;
    extract_workbook(&sheets)
}
