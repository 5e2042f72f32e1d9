//! Error types for tutorlane-core.

use thiserror::Error;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tutorlane-core.
///
/// Expected business-rule failures (conflicts, unavailable slots, missing
/// payment methods) are reported as structured result values, not as this
/// type. `Error` covers the few genuinely failable operations: talking to
/// the external explanation store and loading configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// External explanation-store error.
    #[error("explanation store error: {0}")]
    Store(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
