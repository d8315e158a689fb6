//! The localization service: process-wide storage, the supported-locale
//! index, and the bulk registration API.
//!
//! A [`LocalizationService`] is an explicit service object rather than
//! ambient global state: construct one at startup (usually via
//! [`from_settings`](LocalizationService::from_settings)), hand it to
//! consumers, and drop it at teardown. Tests get isolation by constructing
//! fresh instances.
//!
//! The tree and the supported index live behind a single `RwLock`.
//! Registration and unregistration take the write lock; resolution and
//! negotiation only read. Every operation is synchronous and runs to
//! completion, so there is no atomicity concern across await points.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard};

use serde_json::Value;
use tracing::{debug, warn};

use lingua_rs_core::error::LinguaResult;
use lingua_rs_core::locale::Locale;
use lingua_rs_core::settings::Settings;

use crate::context::{LocalizationContext, ResolveOptions};
use crate::negotiate::{best_match, parse_accept_language};
use crate::store::LocaleStore;

/// The lock-guarded portion of the service: the tree plus the derived
/// supported-locale index.
#[derive(Debug, Default)]
pub(crate) struct ServiceState {
    store: LocaleStore,
    /// Canonical locale string → locale, for `is_supported` lookups.
    supported: HashMap<String, Locale>,
    /// The ordered negotiation list, rebuilt on every index mutation.
    negotiable: Vec<Locale>,
}

impl ServiceState {
    pub(crate) fn store(&self) -> &LocaleStore {
        &self.store
    }

    fn add_supported(&mut self, locale: &Locale) {
        let canonical = locale.to_string();
        if !self.supported.contains_key(&canonical) {
            self.supported.insert(canonical, locale.clone());
            self.rebuild_negotiable();
        }
    }

    fn remove_supported(&mut self, locale: &Locale) {
        if self.supported.remove(&locale.to_string()).is_some() {
            self.rebuild_negotiable();
        }
    }

    fn rebuild_negotiable(&mut self) {
        self.negotiable
            .retain(|locale| self.supported.contains_key(&locale.to_string()));
        for locale in self.supported.values() {
            if !self.negotiable.contains(locale) {
                self.negotiable.push(locale.clone());
            }
        }
    }
}

/// The localization engine façade.
///
/// # Examples
///
/// ```
/// use lingua_rs_core::locale::Locale;
/// use lingua_rs_l10n::{LocalizationService, ResolveOptions};
///
/// let service = LocalizationService::new(Locale::parse("en-US").unwrap());
/// service
///     .register_bulk(
///         &Locale::parse("en").unwrap(),
///         &serde_json::json!({ "site": { "title": "My Site" } }),
///         None,
///     )
///     .unwrap();
///
/// let ctx = service.context(Locale::parse("en").unwrap(), None);
/// assert_eq!(ctx.resolve(&service, "site.title", &ResolveOptions::new()), "My Site");
/// ```
#[derive(Debug)]
pub struct LocalizationService {
    default_locale: Locale,
    ready: AtomicBool,
    state: RwLock<ServiceState>,
}

impl LocalizationService {
    /// Creates an empty service with the given default locale.
    pub fn new(default_locale: Locale) -> Self {
        Self {
            default_locale,
            ready: AtomicBool::new(false),
            state: RwLock::new(ServiceState::default()),
        }
    }

    /// Creates an empty service configured from [`Settings`].
    ///
    /// # Errors
    ///
    /// Returns [`LinguaError::InvalidLocale`](lingua_rs_core::LinguaError::InvalidLocale)
    /// if `settings.default_locale` does not parse.
    pub fn from_settings(settings: &Settings) -> LinguaResult<Self> {
        Ok(Self::new(Locale::parse(&settings.default_locale)?))
    }

    /// The globally configured default locale.
    pub const fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    pub(crate) fn state(&self) -> RwLockReadGuard<'_, ServiceState> {
        self.state.read().expect("localization state lock poisoned")
    }

    // ── Registration ─────────────────────────────────────────────────

    /// Bulk-loads a nested localization object for a locale.
    ///
    /// On full success the locale joins the supported index (if it was not
    /// already there) and the negotiation list is rebuilt. A partial
    /// success still loads the good entries but leaves the index alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload root is not an object or holds no
    /// values; an empty payload never marks a locale supported.
    pub fn register_bulk(
        &self,
        locale: &Locale,
        localizations: &Value,
        plugin: Option<&str>,
    ) -> LinguaResult<bool> {
        let mut state = self.state.write().expect("localization state lock poisoned");
        let all_ok = state.store.bulk_load(locale, localizations, plugin)?;
        if all_ok {
            state.add_supported(locale);
        } else {
            warn!(locale = %locale, "bulk registration had failures; locale not marked supported");
        }
        debug!(locale = %locale, plugin = ?plugin, ok = all_ok, "registered localization bundle");
        Ok(all_ok)
    }

    /// Registers a single key/value pair and marks the locale supported.
    ///
    /// # Errors
    ///
    /// Returns an error if the key path or value is empty.
    pub fn register_value(
        &self,
        locale: &Locale,
        key_path: &str,
        value: &str,
        plugin: Option<&str>,
    ) -> LinguaResult<()> {
        let mut state = self.state.write().expect("localization state lock poisoned");
        state.store.upsert(locale, key_path, value, plugin)?;
        state.add_supported(locale);
        Ok(())
    }

    /// Removes every value registered at the locale's tier, drops the
    /// locale from the supported index, and rebuilds the negotiation list.
    ///
    /// The index removal happens regardless of per-key outcomes. Returns
    /// `true` iff at least one value was actually removed.
    pub fn unregister_locale(&self, locale: &Locale, plugin: Option<&str>) -> bool {
        let mut state = self.state.write().expect("localization state lock poisoned");
        let mut removed_any = false;
        for key_path in state.store.key_paths() {
            if state.store.remove(locale, &key_path, plugin) {
                removed_any = true;
            }
        }
        state.remove_supported(locale);
        debug!(locale = %locale, plugin = ?plugin, removed = removed_any, "unregistered locale");
        removed_any
    }

    /// Removes a single value. When that removal leaves the locale with no
    /// values at all, the locale also leaves the supported index.
    pub fn unregister_value(
        &self,
        locale: &Locale,
        key_path: &str,
        plugin: Option<&str>,
    ) -> bool {
        let mut state = self.state.write().expect("localization state lock poisoned");
        let removed = state.store.remove(locale, key_path, plugin);
        if removed && !state.store.has_values_for(locale) {
            state.remove_supported(locale);
        }
        removed
    }

    // ── Supported locales ────────────────────────────────────────────

    /// Returns `true` if the locale has successfully registered values.
    pub fn is_supported(&self, locale: &Locale) -> bool {
        self.state().supported.contains_key(&locale.to_string())
    }

    /// The supported locales in negotiation order.
    pub fn supported_locales(&self) -> Vec<Locale> {
        self.state().negotiable.clone()
    }

    // ── Negotiation ──────────────────────────────────────────────────

    /// Picks the best supported locale for an `Accept-Language` header.
    ///
    /// Matches against `supported_override` when given, otherwise against
    /// the service's own supported list. With no header, or no match, the
    /// default locale is returned.
    pub fn best_locale(
        &self,
        accept_language: Option<&str>,
        supported_override: Option<&[Locale]>,
    ) -> Locale {
        let Some(header) = accept_language else {
            return self.default_locale.clone();
        };
        let preferences = parse_accept_language(header);
        let matched = match supported_override {
            Some(supported) => best_match(&preferences, supported),
            None => best_match(&preferences, &self.state().negotiable),
        };
        matched.unwrap_or_else(|| self.default_locale.clone())
    }

    // ── Contexts ─────────────────────────────────────────────────────

    /// Creates a per-request resolution context for an explicit locale.
    pub fn context(&self, locale: Locale, plugin: Option<String>) -> LocalizationContext {
        LocalizationContext::new(locale, plugin)
    }

    /// Creates a per-request context for the locale negotiated from an
    /// `Accept-Language` header.
    pub fn context_for_request(&self, accept_language: Option<&str>) -> LocalizationContext {
        self.context(self.best_locale(accept_language, None), None)
    }

    // ── Export ───────────────────────────────────────────────────────

    /// Produces a nested object mirroring the original registration shape,
    /// with every registered key path resolved for the given locale.
    ///
    /// Used to ship a full translation bundle to a client in one call. The
    /// resolver's display-safe guarantee applies per key, so every
    /// registered path appears in the output.
    pub fn export_package(&self, locale: &Locale, options: &ResolveOptions) -> Value {
        let mut key_paths = self.state().store.key_paths();
        key_paths.sort();

        let ctx = self.context(locale.clone(), options.plugin.clone());
        let mut root = serde_json::Map::new();
        for key_path in key_paths {
            let resolved = ctx.resolve(self, &key_path, options);
            insert_nested(&mut root, &key_path, resolved);
        }
        Value::Object(root)
    }

    // ── Readiness ────────────────────────────────────────────────────

    /// Signals that the startup bulk-load has completed.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once the startup bulk-load has completed. Hosts gate
    /// request handling on this signal.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}

/// Inserts `value` at the dotted `key_path` position inside `root`,
/// creating intermediate objects as needed.
///
/// A path that crosses an existing string leaf is skipped: flattened paths
/// are independent, so such a conflict means the source registered both
/// `"a"` and `"a.b"`.
fn insert_nested(root: &mut serde_json::Map<String, Value>, key_path: &str, value: String) {
    let mut parts = key_path.split('.').peekable();
    let mut current = root;
    while let Some(part) = parts.next() {
        if parts.peek().is_none() {
            if let Some(Value::Object(_)) = current.get(part) {
                warn!(key = %key_path, "export skipping leaf that collides with a nested object");
                return;
            }
            current.insert(part.to_string(), Value::String(value));
            return;
        }
        let entry = current
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
        match entry {
            Value::Object(map) => current = map,
            _ => {
                warn!(key = %key_path, "export skipping key nested under a string leaf");
                return;
            }
        }
    }
}
