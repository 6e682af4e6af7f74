use isle_core::IsleError;

/// Loader and writer failures.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    World(#[from] IsleError),
}

pub type IoResult<T> = Result<T, IoError>;
