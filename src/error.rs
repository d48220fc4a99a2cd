//! Error types for TitleKit
//!
//! Parameter parsing and registry construction are fail-soft and never surface
//! these errors; they are reserved for manifest loading and the CLI surface.
//! Uses `thiserror` for `Display` and `Error` implementations.

use thiserror::Error;

/// The primary error type for TitleKit operations.
#[derive(Error, Debug)]
pub enum TitleKitError {
    /// Configuration-related errors (bad parameter block, unknown plugin, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The plugin manifest could not be interpreted.
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// A plugin, command or category was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The host failed to run a command's script payload.
    #[error("Script error: {0}")]
    Script(String),

    /// Standard I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for TitleKit operations.
pub type Result<T> = std::result::Result<T, TitleKitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TitleKitError::Config("missing Commands parameter".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: missing Commands parameter"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TitleKitError = io_err.into();
        assert!(matches!(err, TitleKitError::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: TitleKitError = json_err.into();
        assert!(matches!(err, TitleKitError::Json(_)));
        assert!(err.to_string().starts_with("JSON error:"));
    }

    #[test]
    fn test_not_found_display() {
        let err = TitleKitError::NotFound("plugin 'Credits'".to_string());
        assert_eq!(err.to_string(), "Not found: plugin 'Credits'");
    }
}
