//! Error types for the enrichment pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while registering or running plugins.
#[derive(Error, Debug)]
pub enum Error {
    // Plugin lifecycle errors
    #[error("Plugin construction failed for {key}: {message}")]
    PluginConstructionFailed { key: String, message: String },

    #[error("Plugin {key} failed: {message}")]
    PluginExecutionFailed { key: String, message: String },

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // Logging errors
    #[error("Logging initialization failed: {0}")]
    Logging(String),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a construction failure for the plugin registered under `key`.
    pub fn construction_failed(key: &str, message: impl Into<String>) -> Self {
        Error::PluginConstructionFailed {
            key: key.to_string(),
            message: message.into(),
        }
    }

    /// Create an execution failure for the plugin registered under `key`.
    pub fn execution_failed(key: &str, message: impl Into<String>) -> Self {
        Error::PluginExecutionFailed {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::construction_failed("counter", "boom");
        assert_eq!(
            err.to_string(),
            "Plugin construction failed for counter: boom"
        );

        let err = Error::execution_failed("version", "bad version");
        assert_eq!(err.to_string(), "Plugin version failed: bad version");
    }

    #[test]
    fn test_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::SerializationError(_)));
    }
}
