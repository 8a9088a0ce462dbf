//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// A single validation problem found while resolving configuration.
///
/// Problems are collected across the whole schema and surfaced together;
/// resolution never stops at the first failure. The `Display` form is one
/// line naming the offending key and the violated rule. Values are never
/// echoed back, so secret material cannot leak into diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required key has no value and no applicable default.
    #[error("{key}: required key is not set")]
    MissingRequiredKey {
        /// Name of the missing key.
        key: &'static str,
    },

    /// A value is present but fails type coercion or the key's rule.
    #[error("{key}: {rule}")]
    InvalidKeyFormat {
        /// Name of the offending key.
        key: &'static str,
        /// Description of the violated rule.
        rule: String,
    },

    /// None of the keys in an at-least-one-of group is set.
    #[error("at least one of [{}] must be set", .keys.join(", "))]
    MissingRequiredGroup {
        /// Member keys of the group.
        keys: Vec<&'static str>,
    },
}

/// Errors that can occur while loading or consuming configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An override file exists but could not be read (permissions, encoding).
    ///
    /// Unlike a missing optional file, which is silently skipped, this aborts
    /// loading immediately: it indicates a broken deployment.
    #[error("failed to read environment file {path}: {source}")]
    FileRead {
        /// Path to the unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Resolution failed; carries every collected validation error.
    #[error("configuration validation failed with {} error(s)", .errors.len())]
    Validation {
        /// All collected validation errors, in schema declaration order.
        errors: Vec<ValidationError>,
    },

    /// A key was requested that the schema never declared.
    ///
    /// This is a defect in the calling code, not a runtime condition; the
    /// typed accessors on [`ResolvedConfig`](crate::ResolvedConfig) panic
    /// with this message rather than returning it.
    #[error("unknown configuration key: {key}")]
    UnknownKey {
        /// The undeclared key name.
        key: String,
    },
}

impl ConfigError {
    /// Create a new file read error.
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Wrap a collected validation error list.
    pub fn validation(errors: Vec<ValidationError>) -> Self {
        Self::Validation { errors }
    }

    /// Create a new unknown key error.
    pub fn unknown_key(key: impl Into<String>) -> Self {
        Self::UnknownKey { key: key.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_key_display() {
        let err = ValidationError::MissingRequiredKey {
            key: "PINECONE_API_KEY",
        };
        assert_eq!(err.to_string(), "PINECONE_API_KEY: required key is not set");
    }

    #[test]
    fn test_invalid_key_format_display() {
        let err = ValidationError::InvalidKeyFormat {
            key: "REDIS_PORT",
            rule: "expected an integer".to_string(),
        };
        assert_eq!(err.to_string(), "REDIS_PORT: expected an integer");
    }

    #[test]
    fn test_missing_required_group_display() {
        let err = ValidationError::MissingRequiredGroup {
            keys: vec!["OPENAI_API_KEY", "ANTHROPIC_API_KEY"],
        };
        assert_eq!(
            err.to_string(),
            "at least one of [OPENAI_API_KEY, ANTHROPIC_API_KEY] must be set"
        );
    }

    #[test]
    fn test_file_read_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ConfigError::file_read("/etc/alexandria/.env", io);
        assert!(err.to_string().contains("/etc/alexandria/.env"));
    }

    #[test]
    fn test_validation_error_counts() {
        let err = ConfigError::validation(vec![
            ValidationError::MissingRequiredKey { key: "SECRET_KEY" },
            ValidationError::InvalidKeyFormat {
                key: "MAX_WORKERS",
                rule: "expected an integer".to_string(),
            },
        ]);
        assert!(err.to_string().contains("2 error(s)"));
    }

    #[test]
    fn test_unknown_key_error() {
        let err = ConfigError::unknown_key("REDIS_HOTS");
        assert_eq!(err.to_string(), "unknown configuration key: REDIS_HOTS");
    }
}
