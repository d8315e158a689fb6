//! Per-request localization context and the resolution engine.
//!
//! A [`LocalizationContext`] binds a resolved locale, an optional active
//! plugin, and a private lookup cache. One is created per request (via
//! [`LocalizationService::context`](crate::service::LocalizationService::context))
//! and discarded with it; the cache is never shared between contexts and is
//! invalidated only by dropping the context.
//!
//! Resolution walks the fallback tiers in order and short-circuits on the
//! first hit:
//!
//! 1. country tier of the context locale (hinted plugin → other plugins →
//!    default slot),
//! 2. language tier of the context locale (same slot order),
//! 3. both tiers again for the service's default locale, when it differs,
//! 4. the caller's default value,
//! 5. the literal key path.
//!
//! The last step guarantees display-safe text: a missing translation shows
//! up as the key in rendered output instead of a blank.

use std::cell::RefCell;
use std::collections::HashMap;

use lingua_rs_core::interpolate::interpolate;
use lingua_rs_core::locale::Locale;

use crate::service::LocalizationService;
use crate::store::LocalizedValue;

/// Per-call resolution options.
///
/// # Examples
///
/// ```
/// use lingua_rs_l10n::ResolveOptions;
///
/// let options = ResolveOptions::new()
///     .with_plugin("blog")
///     .with_param("name", "World")
///     .with_default_value("(missing)");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Plugin hint for this call; overrides the context's active plugin.
    pub plugin: Option<String>,
    /// Values substituted into `{name}` placeholders.
    pub params: HashMap<String, String>,
    /// Returned when the key resolves to nothing at all.
    pub default_value: Option<String>,
    /// Substituted for placeholders whose parameter is absent or empty.
    pub default_param: Option<String>,
}

impl ResolveOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the plugin hint for this call.
    #[must_use]
    pub fn with_plugin(mut self, plugin: impl Into<String>) -> Self {
        self.plugin = Some(plugin.into());
        self
    }

    /// Adds one interpolation parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Replaces the interpolation parameters wholesale.
    #[must_use]
    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    /// Sets the value returned when the key resolves to nothing.
    #[must_use]
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Sets the fallback for absent or empty parameters.
    #[must_use]
    pub fn with_default_param(mut self, value: impl Into<String>) -> Self {
        self.default_param = Some(value.into());
        self
    }
}

/// A per-request localization instance: locale, active plugin, and a
/// private pre-interpolation cache.
///
/// The cache stores [`LocalizedValue`]s, not rendered strings, so repeated
/// lookups of the same key re-apply interpolation with each call's own
/// parameters while skipping the tree walk.
#[derive(Debug)]
pub struct LocalizationContext {
    locale: Locale,
    plugin: Option<String>,
    cache: RefCell<HashMap<String, LocalizedValue>>,
}

impl LocalizationContext {
    /// Creates a context for the given locale and optional active plugin.
    pub fn new(locale: Locale, plugin: Option<String>) -> Self {
        Self {
            locale,
            plugin,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// The locale this context resolves against.
    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The active plugin hint, if any.
    pub fn plugin(&self) -> Option<&str> {
        self.plugin.as_deref()
    }

    /// Resolves one key path to display-safe text.
    ///
    /// See the module docs for the tier order. Never returns empty text:
    /// when nothing matches and no default value is supplied, the key path
    /// itself is returned.
    pub fn resolve(
        &self,
        service: &LocalizationService,
        key_path: &str,
        options: &ResolveOptions,
    ) -> String {
        let not_found = || {
            options
                .default_value
                .clone()
                .unwrap_or_else(|| key_path.to_string())
        };

        let state = service.state();
        if !state.store().contains_key(key_path) {
            return not_found();
        }

        if let Some(cached) = self.cache.borrow().get(key_path) {
            return self.render(cached, options);
        }

        let plugin = options.plugin.as_deref().or(self.plugin.as_deref());
        let mut found = state.store().find(key_path, &self.locale, plugin);
        if found.is_none() && self.locale != *service.default_locale() {
            found = state.store().find(key_path, service.default_locale(), plugin);
        }

        match found {
            Some(value) => {
                let value = value.clone();
                drop(state);
                let rendered = self.render(&value, options);
                self.cache.borrow_mut().insert(key_path.to_string(), value);
                rendered
            }
            None => not_found(),
        }
    }

    fn render(&self, value: &LocalizedValue, options: &ResolveOptions) -> String {
        if value.is_parameterized() {
            interpolate(value.raw(), &options.params, options.default_param.as_deref())
        } else {
            value.raw().to_string()
        }
    }

    /// The number of distinct keys this context has resolved and cached.
    pub fn cached_keys(&self) -> usize {
        self.cache.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::LocalizationService;
    use serde_json::json;

    fn locale(s: &str) -> Locale {
        Locale::parse(s).unwrap()
    }

    fn service_with_fixtures() -> LocalizationService {
        let service = LocalizationService::new(locale("en-US"));
        service
            .register_bulk(
                &locale("en"),
                &json!({
                    "site": { "title": "My Site" },
                    "greeting": "Hello {name}"
                }),
                None,
            )
            .unwrap();
        service
            .register_bulk(&locale("en-US"), &json!({ "site": { "title": "My US Site" } }), None)
            .unwrap();
        service
            .register_bulk(&locale("fr"), &json!({ "site": { "title": "Mon Site" } }), None)
            .unwrap();
        service
    }

    #[test]
    fn test_resolve_country_beats_language() {
        let service = service_with_fixtures();
        let ctx = service.context(locale("en-US"), None);
        assert_eq!(
            ctx.resolve(&service, "site.title", &ResolveOptions::new()),
            "My US Site"
        );
    }

    #[test]
    fn test_resolve_language_tier_when_country_missing() {
        let service = service_with_fixtures();
        let ctx = service.context(locale("en-GB"), None);
        assert_eq!(
            ctx.resolve(&service, "site.title", &ResolveOptions::new()),
            "My Site"
        );
    }

    #[test]
    fn test_resolve_falls_back_to_default_locale() {
        let service = service_with_fixtures();
        // German has nothing; the default locale (en-US) supplies the value.
        let ctx = service.context(locale("de-DE"), None);
        assert_eq!(
            ctx.resolve(&service, "site.title", &ResolveOptions::new()),
            "My US Site"
        );
    }

    #[test]
    fn test_resolve_unregistered_key_echoes_key() {
        let service = service_with_fixtures();
        let ctx = service.context(locale("en"), None);
        assert_eq!(
            ctx.resolve(&service, "missing.key", &ResolveOptions::new()),
            "missing.key"
        );
    }

    #[test]
    fn test_resolve_unregistered_key_uses_default_value() {
        let service = service_with_fixtures();
        let ctx = service.context(locale("en"), None);
        let options = ResolveOptions::new().with_default_value("n/a");
        assert_eq!(ctx.resolve(&service, "missing.key", &options), "n/a");
    }

    #[test]
    fn test_resolve_interpolates_parameters() {
        let service = service_with_fixtures();
        let ctx = service.context(locale("en"), None);
        let options = ResolveOptions::new().with_param("name", "World");
        assert_eq!(ctx.resolve(&service, "greeting", &options), "Hello World");
    }

    #[test]
    fn test_cache_reinterpolates_with_fresh_params() {
        let service = service_with_fixtures();
        let ctx = service.context(locale("en"), None);

        let first = ResolveOptions::new().with_param("name", "Alice");
        assert_eq!(ctx.resolve(&service, "greeting", &first), "Hello Alice");
        assert_eq!(ctx.cached_keys(), 1);

        // The cached value is the template, not the rendered string.
        let second = ResolveOptions::new().with_param("name", "Bob");
        assert_eq!(ctx.resolve(&service, "greeting", &second), "Hello Bob");
        assert_eq!(ctx.cached_keys(), 1);
    }

    #[test]
    fn test_options_builder() {
        let options = ResolveOptions::new()
            .with_plugin("blog")
            .with_param("a", "1")
            .with_default_value("dv")
            .with_default_param("dp");
        assert_eq!(options.plugin.as_deref(), Some("blog"));
        assert_eq!(options.params.get("a").map(String::as_str), Some("1"));
        assert_eq!(options.default_value.as_deref(), Some("dv"));
        assert_eq!(options.default_param.as_deref(), Some("dp"));
    }
}
