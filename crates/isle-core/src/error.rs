//! Workspace error type.
//!
//! Sub-crates may define their own error enums and convert them into
//! `IsleError` via `From` impls, or keep them separate and wrap `IsleError`
//! as one variant.  Both patterns are acceptable; prefer whichever keeps
//! error sites clean.

use thiserror::Error;

use crate::{AgentId, HouseId};

/// The top-level error type for `isle-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum IsleError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("house {0} not found")]
    HouseNotFound(HouseId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `isle-*` crates.
pub type IsleResult<T> = Result<T, IsleError>;
