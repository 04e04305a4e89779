use thiserror::Error;

/// Everything that can go wrong between reading a track and writing a retimed one.
#[derive(Error, Debug)]
pub enum RetimeError {
    #[error("Track I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV track: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Solver parameters the search cannot run with.
    #[error("Invalid solver parameters: {0}")]
    Config(String),

    /// Track contents that load but make no sense (backwards or missing events).
    #[error("Invalid track: {0}")]
    Validation(String),

    #[error("Unsupported track format: {0}")]
    UnsupportedFormat(String),
}

pub type RtResult<T> = Result<T, RetimeError>;
