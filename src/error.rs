use thiserror::Error;

/// All possible errors in the pipeline
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Manifest error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File `{path}` has no header row")]
    EmptyHeader { path: String },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TaskError>;
