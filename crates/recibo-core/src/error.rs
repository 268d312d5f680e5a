//! Error types for the recibo-core library.
//!
//! Field extraction never fails; these errors only surface while building an
//! engine from configuration or while reading and writing configuration.

use thiserror::Error;

/// Main error type for the recibo library.
#[derive(Error, Debug)]
pub enum ReciboError {
    /// Bank profile definition error.
    #[error("profile error: {0}")]
    Profile(#[from] ProfileError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while compiling bank profile definitions.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// The profile has an empty bank code.
    #[error("bank profile has an empty code")]
    EmptyCode,

    /// The profile code collides with the generic fallback.
    #[error("bank code {0:?} is reserved for the generic profile")]
    ReservedCode(String),

    /// The profile declares no detection keywords.
    #[error("bank profile {0} has no detection keywords")]
    NoKeywords(String),

    /// Two custom definitions share a code.
    #[error("bank profile {0} is defined more than once")]
    Duplicate(String),

    /// A label fragment is not a valid regular expression.
    #[error("invalid {field} label {pattern:?} in profile {bank}: {source}")]
    InvalidPattern {
        bank: String,
        field: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type for the recibo library.
pub type Result<T> = std::result::Result<T, ReciboError>;
