//! Settings loading from configuration files.
//!
//! Provides functions to load [`Settings`] from TOML or JSON files and to
//! apply environment variable overrides.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `LINGUA_DEFAULT_LOCALE` | `default_locale` |
//! | `LINGUA_LOCALE_DIR` | `locale_dir` |
//! | `LINGUA_LOCALE_EXTENSION` | `locale_extension` |
//! | `LINGUA_DOCUMENT_ROOT` | `document_root` |
//! | `LINGUA_DEBUG` | `debug` |
//! | `LINGUA_LOG_LEVEL` | `log_level` |

use std::path::Path;

use crate::error::LinguaError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Fields not present in the TOML keep their default values.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, LinguaError> {
    // Deserialize into a serde_json::Value first and merge over the
    // defaults, so partial files are accepted.
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| LinguaError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    let merged = merge_json(default_json()?, toml_to_json(toml_value));
    serde_json::from_value(merged).map_err(|e| {
        LinguaError::ConfigurationError(format!("Failed to deserialize settings from TOML: {e}"))
    })
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, LinguaError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        LinguaError::ConfigurationError(format!(
            "Failed to read TOML file '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable
/// overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, LinguaError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> Result<Settings, LinguaError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| LinguaError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    let merged = merge_json(default_json()?, json_value);
    serde_json::from_value(merged).map_err(|e| {
        LinguaError::ConfigurationError(format!("Failed to deserialize settings from JSON: {e}"))
    })
}

/// Loads settings from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, LinguaError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        LinguaError::ConfigurationError(format!(
            "Failed to read JSON file '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    from_json_str(&content)
}

/// Applies `LINGUA_*` environment variable overrides to the settings.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(value) = std::env::var("LINGUA_DEFAULT_LOCALE") {
        settings.default_locale = value;
    }
    if let Ok(value) = std::env::var("LINGUA_LOCALE_DIR") {
        settings.locale_dir = value.into();
    }
    if let Ok(value) = std::env::var("LINGUA_LOCALE_EXTENSION") {
        settings.locale_extension = value;
    }
    if let Ok(value) = std::env::var("LINGUA_DOCUMENT_ROOT") {
        settings.document_root = value.into();
    }
    if let Ok(value) = std::env::var("LINGUA_DEBUG") {
        settings.debug = matches!(value.to_lowercase().as_str(), "1" | "true" | "yes");
    }
    if let Ok(value) = std::env::var("LINGUA_LOG_LEVEL") {
        settings.log_level = value;
    }
}

fn default_json() -> Result<serde_json::Value, LinguaError> {
    serde_json::to_value(Settings::default()).map_err(|e| {
        LinguaError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })
}

/// Converts a `toml::Value` into the equivalent `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(items) => {
            serde_json::Value::Array(items.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

/// Merges `overlay` into `base`, with `overlay` winning on conflicts.
///
/// Objects are merged recursively; any other value in the overlay replaces
/// the base value wholesale.
fn merge_json(base: serde_json::Value, overlay: serde_json::Value) -> serde_json::Value {
    match (base, overlay) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => merge_json(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_from_toml_str_partial() {
        let settings = from_toml_str(r#"default_locale = "de-DE""#).unwrap();
        assert_eq!(settings.default_locale, "de-DE");
        // Unspecified fields keep their defaults.
        assert_eq!(settings.locale_extension, ".json");
        assert!(settings.debug);
    }

    #[test]
    fn test_from_toml_str_full() {
        let toml = r#"
            default_locale = "fr-FR"
            locale_dir = "lang"
            locale_extension = ".locale.json"
            document_root = "/srv/site"
            debug = false
            log_level = "warn"
        "#;
        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.default_locale, "fr-FR");
        assert_eq!(settings.locale_dir, PathBuf::from("lang"));
        assert_eq!(settings.locale_extension, ".locale.json");
        assert_eq!(settings.document_root, PathBuf::from("/srv/site"));
        assert!(!settings.debug);
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_from_toml_str_invalid() {
        assert!(from_toml_str("not [valid toml").is_err());
    }

    #[test]
    fn test_from_json_str_partial() {
        let settings = from_json_str(r#"{"log_level": "debug"}"#).unwrap();
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.default_locale, "en-US");
    }

    #[test]
    fn test_from_json_str_invalid() {
        assert!(from_json_str("{").is_err());
    }

    #[test]
    fn test_merge_json_nested() {
        let base = serde_json::json!({"a": {"x": 1, "y": 2}, "b": 3});
        let overlay = serde_json::json!({"a": {"y": 9}});
        let merged = merge_json(base, overlay);
        assert_eq!(merged, serde_json::json!({"a": {"x": 1, "y": 9}, "b": 3}));
    }

    #[test]
    fn test_missing_file() {
        assert!(from_toml_file("/nonexistent/settings.toml").is_err());
        assert!(from_json_file("/nonexistent/settings.json").is_err());
    }
}
