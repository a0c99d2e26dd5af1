//! Agent-storage error type.

use thiserror::Error;

use pursuit_core::AgentId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AgentError {
    #[error("agent {0} is already in the store")]
    DuplicateId(AgentId),

    #[error("agent {0} not found")]
    NotFound(AgentId),
}

pub type AgentResult<T> = Result<T, AgentError>;
