//! Core error types for the lingua-rs engine.
//!
//! This module provides the [`LinguaError`] enum covering locale parsing
//! errors, argument validation errors, configuration errors, and load-time
//! errors. Validation failures are fatal to the call that raised them and
//! propagate synchronously; there is no retry machinery anywhere in the
//! engine.
//!
//! Note that an unregistered localization key is *not* an error: resolution
//! degrades to the literal key path (see `lingua-rs-l10n`), so a missing
//! translation is visible in rendered output instead of surfacing here.

use thiserror::Error;

/// The primary error type for the lingua-rs engine.
#[derive(Error, Debug)]
pub enum LinguaError {
    /// A locale identifier could not be parsed or validated.
    ///
    /// Raised for an empty language code, an empty country code string, or
    /// input that is neither a well-formed locale string nor a structured
    /// locale value.
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    /// A required argument was missing or malformed (empty key path, empty
    /// value, non-object bulk payload, and similar).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A locale definition source could not be listed or read.
    #[error("Failed to load locale definitions from '{path}': {reason}")]
    LoadError {
        /// The file or directory that failed.
        path: String,
        /// Why it failed.
        reason: String,
    },

    /// An error occurred while serializing or deserializing localization
    /// data.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience type alias for `Result<T, LinguaError>`.
pub type LinguaResult<T> = Result<T, LinguaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_locale_display() {
        let err = LinguaError::InvalidLocale("language is required".into());
        assert_eq!(err.to_string(), "Invalid locale: language is required");
    }

    #[test]
    fn test_load_error_display() {
        let err = LinguaError::LoadError {
            path: "locale/xx.json".into(),
            reason: "unexpected end of file".into(),
        };
        assert!(err.to_string().contains("locale/xx.json"));
        assert!(err.to_string().contains("unexpected end of file"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing dir");
        let err: LinguaError = io_err.into();
        assert!(err.to_string().contains("missing dir"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: LinguaError = json_err.into();
        assert!(matches!(err, LinguaError::Serialization(_)));
    }
}
