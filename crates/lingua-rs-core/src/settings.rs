//! Settings for the lingua-rs engine.
//!
//! This module provides the [`Settings`] struct holding all engine
//! configuration, and [`LazySettings`], a globally-accessible,
//! lazily-initialized instance. The engine reads configuration, never writes
//! it; everything here is fixed at startup.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// The complete set of engine settings.
///
/// # Examples
///
/// ```
/// use lingua_rs_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.default_locale, "en-US");
/// assert_eq!(settings.locale_extension, ".json");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Localization ─────────────────────────────────────────────────

    /// The default locale in `language-COUNTRY` form. Resolution falls back
    /// to this locale when a key has no value for the requested one.
    pub default_locale: String,
    /// Directory holding locale definition files, relative to
    /// [`document_root`](Self::document_root).
    pub locale_dir: PathBuf,
    /// File extension of locale definition files.
    pub locale_extension: String,

    // ── Paths ────────────────────────────────────────────────────────

    /// The document root under which `locale_dir` lives. Only the startup
    /// loader uses this.
    pub document_root: PathBuf,

    // ── Diagnostics ──────────────────────────────────────────────────

    /// Whether debug mode is enabled (pretty log output).
    pub debug: bool,
    /// The log level (e.g. "info", "debug", "warn").
    pub log_level: String,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_locale: "en-US".to_string(),
            locale_dir: PathBuf::from("locale"),
            locale_extension: ".json".to_string(),
            document_root: PathBuf::from("."),
            debug: true,
            log_level: "info".to_string(),
            extra: HashMap::new(),
        }
    }
}

impl Settings {
    /// Returns the absolute directory the startup loader should scan.
    pub fn locale_path(&self) -> PathBuf {
        self.document_root.join(&self.locale_dir)
    }
}

/// A lazily-initialized, globally-accessible settings container.
///
/// Call [`configure`](LazySettings::configure) once at startup, then use
/// [`get`](LazySettings::get) to access the settings anywhere.
///
/// # Panics
///
/// [`get`](LazySettings::get) panics if settings have not been configured.
/// [`configure`](LazySettings::configure) panics if called more than once.
pub struct LazySettings {
    inner: OnceLock<Settings>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySettings {
    /// Creates a new, unconfigured `LazySettings`.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Configures the global settings. Must be called exactly once.
    ///
    /// # Panics
    ///
    /// Panics if settings have already been configured.
    pub fn configure(&self, settings: Settings) {
        self.inner
            .set(settings)
            .expect("Settings have already been configured");
    }

    /// Returns a reference to the configured settings.
    ///
    /// # Panics
    ///
    /// Panics if settings have not been configured.
    pub fn get(&self) -> &Settings {
        self.inner
            .get()
            .expect("Settings have not been configured. Call SETTINGS.configure() first.")
    }

    /// Returns `true` if settings have been configured.
    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }
}

/// The global settings instance.
///
/// Call `SETTINGS.configure(settings)` once at application startup, then
/// access settings via `SETTINGS.get()` anywhere in the engine.
pub static SETTINGS: LazySettings = LazySettings::new();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert_eq!(s.default_locale, "en-US");
        assert_eq!(s.locale_dir, PathBuf::from("locale"));
        assert_eq!(s.locale_extension, ".json");
        assert_eq!(s.document_root, PathBuf::from("."));
        assert!(s.debug);
        assert_eq!(s.log_level, "info");
        assert!(s.extra.is_empty());
    }

    #[test]
    fn test_locale_path_joins_document_root() {
        let mut s = Settings::default();
        s.document_root = PathBuf::from("/srv/site");
        s.locale_dir = PathBuf::from("lang");
        assert_eq!(s.locale_path(), PathBuf::from("/srv/site/lang"));
    }

    #[test]
    fn test_lazy_settings_configure_and_get() {
        let lazy = LazySettings::new();
        assert!(!lazy.is_configured());

        let mut settings = Settings::default();
        settings.default_locale = "fr-FR".to_string();

        lazy.configure(settings);
        assert!(lazy.is_configured());
        assert_eq!(lazy.get().default_locale, "fr-FR");
    }

    #[test]
    #[should_panic(expected = "already been configured")]
    fn test_lazy_settings_double_configure_panics() {
        let lazy = LazySettings::new();
        lazy.configure(Settings::default());
        lazy.configure(Settings::default());
    }

    #[test]
    #[should_panic(expected = "not been configured")]
    fn test_lazy_settings_get_before_configure_panics() {
        let lazy = LazySettings::new();
        let _ = lazy.get();
    }
}
