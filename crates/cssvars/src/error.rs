//! Error types for variable binding and manifest import.

use std::time::Duration;

use cssvars_shade::ShadeError;
use thiserror::Error;

/// Error raised when a variable cannot be bound.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariableError {
    /// The color bound to a tag is not a marker followed by six hex digits.
    #[error("invalid color '{color}' for '{tag}': {source}")]
    InvalidColor {
        tag: String,
        color: String,
        #[source]
        source: ShadeError,
    },

    /// A manifest descriptor carries neither a color nor a value.
    #[error("descriptor for '{tag}' has neither a color nor a value")]
    EmptyDescriptor { tag: String },

    /// The requested shade count exceeds [`MAX_SHADE_COUNT`](crate::MAX_SHADE_COUNT).
    #[error("shade count {count} for '{tag}' exceeds the maximum of {max}")]
    TooManyShades { tag: String, count: u32, max: u32 },
}

/// Error raised while importing a variable manifest.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Transport-level failure (DNS, connection, TLS, body read).
    #[error("request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// The document is not a JSON object of strings or an array of descriptors.
    #[error("invalid manifest: {0}")]
    Parse(#[from] serde_json::Error),

    /// A descriptor in the manifest could not be bound.
    #[error(transparent)]
    Variable(#[from] VariableError),

    /// No style root could be bound when the document arrived.
    #[error("style root unavailable")]
    RootUnavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_color_display() {
        let err = VariableError::InvalidColor {
            tag: "--brand".into(),
            color: "#12".into(),
            source: ShadeError::WrongLength { len: 2 },
        };
        let msg = err.to_string();
        assert!(msg.contains("--brand"));
        assert!(msg.contains("#12"));
        assert!(msg.contains("found 2"));
    }

    #[test]
    fn test_variable_error_is_transparent_in_import() {
        let err: ImportError = VariableError::EmptyDescriptor {
            tag: "--gap".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "descriptor for '--gap' has neither a color nor a value"
        );
    }

    #[test]
    fn test_too_many_shades_display() {
        let err = VariableError::TooManyShades {
            tag: "--brand".into(),
            count: 4294967295,
            max: 64,
        };
        assert_eq!(
            err.to_string(),
            "shade count 4294967295 for '--brand' exceeds the maximum of 64"
        );
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ImportError = json_err.into();
        assert!(matches!(err, ImportError::Parse(_)));
    }
}
