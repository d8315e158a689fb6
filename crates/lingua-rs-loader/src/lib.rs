//! # lingua-rs-loader
//!
//! The one-time startup bulk-load: reads locale definition files, maps each
//! file name onto a locale via the codec, and registers the parsed contents
//! with a [`LocalizationService`]. Completion marks the service ready; the
//! host must not serve resolution requests before that signal.
//!
//! A file that fails to parse or load is logged and skipped, never fatal:
//! one broken plugin bundle must not take down the whole site's
//! translations.
//!
//! ## Definition file format
//!
//! One JSON object per locale, named after the locale
//! (e.g. `locale/en-US.json`):
//!
//! ```json
//! {
//!   "site": { "title": "My Site" },
//!   "greeting": "Hello {name}"
//! }
//! ```

mod source;

pub use source::{DefinitionSource, DirectorySource};

use tracing::{info, warn};

use lingua_rs_core::error::LinguaResult;
use lingua_rs_core::locale::Locale;
use lingua_rs_core::settings::Settings;
use lingua_rs_l10n::LocalizationService;

/// The outcome of a startup load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Locales whose definition file loaded completely.
    pub loaded: Vec<Locale>,
    /// Skipped files as `(file name, reason)` pairs.
    pub skipped: Vec<(String, String)>,
}

impl LoadReport {
    /// `true` if every listed definition file loaded completely.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Loads every definition file from `source` into `service` and marks the
/// service ready.
///
/// Each file name is mapped to a locale by stripping `extension` from its
/// final path segment. Files that fail to read, parse, or register are
/// recorded in the report and skipped.
///
/// # Errors
///
/// Returns an error only when the source itself cannot be listed; per-file
/// failures never abort the load.
pub async fn load_definitions(
    service: &LocalizationService,
    source: &dyn DefinitionSource,
    extension: &str,
) -> LinguaResult<LoadReport> {
    let mut report = LoadReport::default();

    for name in source.list().await? {
        match load_one(service, source, &name, extension).await {
            Ok(locale) => report.loaded.push(locale),
            Err(reason) => {
                warn!(file = %name, %reason, "skipping locale definition file");
                report.skipped.push((name, reason));
            }
        }
    }

    service.mark_ready();
    info!(
        loaded = report.loaded.len(),
        skipped = report.skipped.len(),
        "locale definitions loaded"
    );
    Ok(report)
}

/// Convenience wrapper: loads from the directory configured in `settings`.
///
/// # Errors
///
/// Returns an error if the configured locale directory cannot be listed.
pub async fn load_from_settings(
    service: &LocalizationService,
    settings: &Settings,
) -> LinguaResult<LoadReport> {
    let source = DirectorySource::new(settings.locale_path(), &settings.locale_extension);
    load_definitions(service, &source, &settings.locale_extension).await
}

async fn load_one(
    service: &LocalizationService,
    source: &dyn DefinitionSource,
    name: &str,
    extension: &str,
) -> Result<Locale, String> {
    let locale = Locale::from_path(name, extension).map_err(|e| e.to_string())?;
    let content = source.read(name).await.map_err(|e| e.to_string())?;
    let nested: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| format!("invalid JSON: {e}"))?;

    let all_ok = service
        .register_bulk(&locale, &nested, None)
        .map_err(|e| e.to_string())?;
    if all_ok {
        Ok(locale)
    } else {
        Err("definition contained invalid entries".to_string())
    }
}
