use std::path::PathBuf;
use thiserror::Error;

/// Extraction failures. None of these are recovered locally; the caller who
/// initiated the import decides what to surface.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not open workbook {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("could not read sheet `{name}`")]
    Sheet {
        name: String,
        #[source]
        source: calamine::Error,
    },

    /// Fatal to the whole import: zero rows survived across every sheet.
    #[error("no usable task rows found in the workbook")]
    EmptyExtraction,
}
