use pursuit_agent::AgentError;
use pursuit_core::CoreError;
use pursuit_senses::SensesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("noise bus: {0}")]
    Senses(#[from] SensesError),

    #[error("agent store: {0}")]
    Agent(#[from] AgentError),

    #[error("player state is not finite: position {0}")]
    InvalidPlayer(String),
}

pub type SimResult<T> = Result<T, SimError>;
