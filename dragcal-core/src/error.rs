//! Error types for the dragcal ecosystem.

use thiserror::Error;

/// Errors that can occur in dragcal operations.
///
/// Store and registry mutations never fail. Errors only come from the
/// boundary (narrowing callback payloads), from rejected modal transitions,
/// and from loading configuration.
#[derive(Error, Debug)]
pub enum DragCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Duplicate template id: {0}")]
    DuplicateTemplate(String),

    #[error("Invalid identifier '{0}': expected an integer")]
    InvalidIdentifier(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DragCalError {
    fn from(err: serde_json::Error) -> Self {
        DragCalError::Serialization(err.to_string())
    }
}

/// Result type alias for dragcal operations.
pub type DragCalResult<T> = Result<T, DragCalError>;
