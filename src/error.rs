use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipReviewError {
    #[error("pip execution failed: {0}")]
    PipExecution(String),

    #[error("invalid filter pattern: {0}")]
    FilterPattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("interrupted")]
    Interrupted,
}

pub type Result<T> = std::result::Result<T, PipReviewError>;
