//! Error types for the mascot engine

use thiserror::Error;

/// Errors that can occur while loading or replaying recorded sessions.
///
/// The behavioral core itself never fails: all live inputs are well-formed
/// browser-style events and closed enums. Errors only arise at the host-facing
/// boundary (session JSON, CLI input).
#[derive(Debug, Error)]
pub enum MascotError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid interaction session: {0}")]
    InvalidSession(String),

    #[error("Event timestamps out of order at index {index}")]
    OutOfOrderEvent { index: usize },
}
