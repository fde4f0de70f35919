//! tareas-ingest: workbook loading and the task extraction heuristic.
//!
//! Pipeline: `read_workbook` (one grid per sheet) → `locate_columns` per
//! sheet → `extract_rows` per sheet → `extract_workbook` (ordered tasks
//! across sheets). Extraction is pure and synchronous; the only I/O is the
//! initial file read.

pub mod columns;
pub mod error;
pub mod rows;
pub mod sheet;
pub mod workbook;

pub use columns::{ColumnMap, locate_columns};
pub use error::ExtractError;
pub use rows::{RowCandidate, extract_rows};
pub use sheet::{SheetGrid, cell_ref, cell_text, read_workbook};
pub use workbook::{extract_workbook, import_workbook};
