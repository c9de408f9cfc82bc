//! Error types for simulation runs.

use thiserror::Error;

/// Errors raised while unpacking a configuration or integrating a model.
///
/// These never cross the dispatcher: every driver turns them into an error
/// [`SimulationResult`](crate::result::SimulationResult).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Integration produced a non-finite state at t = {t}")]
    NonFinite { t: f64 },

    #[error("State dimension mismatch. Expected {expected}, got {actual}.")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Failed to decode configuration: {0}")]
    Decode(String),

    #[error("Simulation type '{0}' is not implemented")]
    UnknownModel(String),
}

impl SimError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SimError::InvalidConfig(message.into())
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Decode(e.to_string())
    }
}

pub type SimResult<T> = Result<T, SimError>;
