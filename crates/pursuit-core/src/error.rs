//! Framework error type.
//!
//! Sub-crates define their own error enums and either wrap `CoreError` as one
//! variant (`pursuit-sim`) or keep them separate (`pursuit-senses`).

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `pursuit-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for all `pursuit-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
