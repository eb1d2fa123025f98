//! Error types for Karst.

use thiserror::Error;

/// Top-level error type for Karst operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration errors
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration validation and persistence errors.
///
/// Tuning values are rejected rather than silently adjusted, so a bad
/// config file surfaces at load time instead of as odd in-game behavior.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// A value that must not be negative was negative
    #[error("{field} must not be negative (got {value})")]
    Negative {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value
        value: f32,
    },

    /// A value was NaN or infinite
    #[error("{field} must be finite (got {value})")]
    NotFinite {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value
        value: f32,
    },

    /// A value fell outside its allowed range
    #[error("{field} must be within [{min}, {max}] (got {value})")]
    OutOfRange {
        /// Name of the offending field
        field: &'static str,
        /// Lower bound (inclusive)
        min: f32,
        /// Upper bound (inclusive)
        max: f32,
        /// The rejected value
        value: f32,
    },

    /// Config file could not be parsed
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// Config could not be serialized for saving
    #[error("failed to serialize config: {0}")]
    Serialize(String),
}

/// Result type alias for Karst operations.
pub type CoreResult<T> = Result<T, CoreError>;
