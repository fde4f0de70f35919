use thiserror::Error;

/// Failures talking to the task store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store is unreachable (transport-level failure). Retryable and
    /// user-actionable, unlike data errors.
    #[error("could not reach the task store")]
    Connectivity(#[source] reqwest::Error),

    /// The store is reachable but rejected the request.
    #[error("store rejected the request (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The file row was created but its tasks could not be inserted; the
    /// file row has been deleted again so nothing partial survives.
    #[error("saving tasks failed; rolled back file {file_id}")]
    PartialFailure {
        file_id: String,
        #[source]
        source: Box<StoreError>,
    },

    #[error("{what} not found")]
    NotFound { what: String },

    #[error("could not decode store response")]
    Decode(#[source] reqwest::Error),

    /// Missing or malformed store credentials.
    #[error("store is not configured: {0}")]
    Config(String),
}

impl StoreError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Connectivity(_))
    }

    /// True when the fix is (re)running the guided setup rather than
    /// changing any data.
    pub fn needs_setup(&self) -> bool {
        matches!(self, StoreError::Connectivity(_) | StoreError::Config(_))
    }
}
