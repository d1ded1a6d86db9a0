//! Error types for calrest.

use thiserror::Error;

/// Errors that can occur in calrest operations.
///
/// There is no "not found" variant: store lookups return `None` for absence.
#[derive(Error, Debug)]
pub enum CalrestError {
    #[error("{kind} record has no identity")]
    MissingIdentity { kind: &'static str },

    #[error("{kind} identity '{id}' is already in use")]
    IdentityCollision { kind: &'static str, id: String },

    #[error("Seed error: {0}")]
    Seed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for calrest operations.
pub type CalrestResult<T> = Result<T, CalrestError>;
