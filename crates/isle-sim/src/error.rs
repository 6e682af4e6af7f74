use isle_core::IsleError;
use isle_event::EventError;

/// Scheduler-level failures.
#[derive(thiserror::Error, Debug)]
pub enum SimError {
    #[error("invalid simulation setup: {0}")]
    Setup(String),

    #[error(transparent)]
    Core(#[from] IsleError),

    #[error(transparent)]
    Event(#[from] EventError),
}

pub type SimResult<T> = Result<T, SimError>;
