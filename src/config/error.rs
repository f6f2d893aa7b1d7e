//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("{name} must be a non-negative integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} must be a boolean (true/false/1/0), got '{value}'")]
    InvalidBool { name: &'static str, value: String },

    /// A setting that must carry a value was set to an empty string.
    #[error("{name} cannot be empty")]
    EmptyValue { name: &'static str },

    #[error("{name} must be at least 1")]
    MustBePositive { name: &'static str },

    /// Category depth does not fit the configured column list.
    #[error("category depth {depth} must be between 1 and the number of category columns ({columns})")]
    DepthOutOfRange { depth: usize, columns: usize },
}
