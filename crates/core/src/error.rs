//! Error types for cvbridge-core

use thiserror::Error;

/// Result type alias for cvbridge-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting or dispatching a call
#[derive(Debug, Error)]
pub enum Error {
    /// External value does not match the shape a converter expects
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Argument list rejected before conversion (count or kind mismatch)
    #[error("{0}")]
    TypeError(String),

    /// The wrapped native library reported a failure
    #[error("{0}")]
    NativeLibrary(String),

    /// Anything outside the taxonomy above, including a captured panic
    #[error("{0}")]
    Unknown(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl Error {
    /// Prefix an `InvalidArgument` message with the location that failed.
    ///
    /// Other variants pass through untouched.
    pub fn within(self, location: impl std::fmt::Display) -> Self {
        match self {
            Error::InvalidArgument(msg) => Error::InvalidArgument(format!("{}: {}", location, msg)),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidArgument("expected Rect object, got number".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid argument: expected Rect object, got number"
        );

        let err = Error::NativeLibrary("unsupported depth".to_string());
        assert_eq!(err.to_string(), "unsupported depth");
    }

    #[test]
    fn test_within_only_touches_invalid_argument() {
        let err = Error::InvalidArgument("missing field 'x'".to_string()).within("points[2]");
        assert_eq!(err.to_string(), "Invalid argument: points[2]: missing field 'x'");

        let err = Error::TypeError("expected a string".to_string()).within("points[2]");
        assert!(matches!(err, Error::TypeError(ref m) if m == "expected a string"));
    }
}
