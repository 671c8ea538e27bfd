//! Core error types for roster discovery.
//!
//! The central error type is shared by every crate in the workspace so that
//! lower-level failures can be carried upward without losing their origin.

use thiserror::Error;

/// Central error type for roster operations.
#[derive(Error, Debug)]
pub enum RosterError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Browser automation errors (launch, navigation, scripting)
    #[error("browser error: {0}")]
    Browser(String),

    /// Validation errors (invalid request input)
    #[error("validation error: {0}")]
    Validation(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `RosterError`.
pub type Result<T> = std::result::Result<T, RosterError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RosterError::Validation("sport must not be empty".to_string());
        assert_eq!(err.to_string(), "validation error: sport must not be empty");

        let err = ConfigError::InvalidValue {
            field: "browser.navigation_timeout_secs".to_string(),
            reason: "must be greater than zero".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value for browser.navigation_timeout_secs: must be greater than zero"
        );
    }

    #[test]
    fn test_error_from_config() {
        let config_err = ConfigError::NoConfigDir;
        let roster_err: RosterError = config_err.into();
        assert!(matches!(roster_err, RosterError::Config(_)));
    }
}
