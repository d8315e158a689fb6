//! The locale tree store.
//!
//! Localized strings live in a small in-memory tree: dotted key path →
//! language → optional country, with one default value and any number of
//! per-plugin override values at each level. The nodes are proper tagged
//! types ([`KeyBlock`], [`LanguageBlock`], [`Slots`]) rather than a
//! string-keyed map with reserved marker prefixes, so structural fields can
//! never collide with locale markers.
//!
//! The store itself is not synchronized;
//! [`LocalizationService`](crate::service::LocalizationService) owns it
//! behind a lock.

use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use lingua_rs_core::error::{LinguaError, LinguaResult};
use lingua_rs_core::interpolate::contains_parameters;
use lingua_rs_core::locale::Locale;

/// A single translated string plus its precomputed parameterization flag.
///
/// The flag is computed once at insertion so resolution can skip the
/// interpolation scan for plain strings. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedValue {
    raw: String,
    parameterized: bool,
}

impl LocalizedValue {
    /// Wraps a raw template, scanning it once for `{...}` placeholders.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parameterized = contains_parameters(&raw);
        Self { raw, parameterized }
    }

    /// The raw, uninterpolated template.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// `true` if the template contains at least one `{...}` placeholder.
    pub const fn is_parameterized(&self) -> bool {
        self.parameterized
    }
}

/// The value slots at one locale tier: an optional default value and any
/// number of plugin overrides.
///
/// Plugin entries keep registration order, which is the order the resolver
/// consults them in when the hinted plugin has no value.
#[derive(Debug, Clone, Default)]
pub(crate) struct Slots {
    default: Option<LocalizedValue>,
    plugins: Vec<(String, LocalizedValue)>,
}

impl Slots {
    fn is_empty(&self) -> bool {
        self.default.is_none() && self.plugins.is_empty()
    }

    fn set_default(&mut self, value: LocalizedValue) {
        self.default = Some(value);
    }

    fn set_plugin(&mut self, plugin: &str, value: LocalizedValue) {
        match self.plugins.iter_mut().find(|(name, _)| name == plugin) {
            Some((_, slot)) => *slot = value,
            None => self.plugins.push((plugin.to_string(), value)),
        }
    }

    fn remove_default(&mut self) -> bool {
        self.default.take().is_some()
    }

    fn remove_plugin(&mut self, plugin: &str) -> bool {
        let before = self.plugins.len();
        self.plugins.retain(|(name, _)| name != plugin);
        self.plugins.len() != before
    }

    /// The tier fallback: the hinted plugin's slot first, then the other
    /// plugin slots in registration order, then the default slot.
    fn find(&self, plugin: Option<&str>) -> Option<&LocalizedValue> {
        if let Some(hint) = plugin {
            if let Some((_, value)) = self.plugins.iter().find(|(name, _)| name == hint) {
                return Some(value);
            }
        }
        self.plugins
            .iter()
            .find(|(name, _)| plugin != Some(name.as_str()))
            .map(|(_, value)| value)
            .or(self.default.as_ref())
    }
}

/// The per-language subtree of one key: language-level slots plus
/// country-specific slot blocks. Countries do not nest further.
#[derive(Debug, Clone, Default)]
pub(crate) struct LanguageBlock {
    slots: Slots,
    countries: HashMap<String, Slots>,
}

impl LanguageBlock {
    fn is_empty(&self) -> bool {
        self.slots.is_empty() && self.countries.is_empty()
    }
}

/// The per-key subtree: one [`LanguageBlock`] per language marker.
#[derive(Debug, Clone, Default)]
pub(crate) struct KeyBlock {
    languages: HashMap<String, LanguageBlock>,
}

/// The in-memory localization tree: dotted key path → [`KeyBlock`].
#[derive(Debug, Clone, Default)]
pub struct LocaleStore {
    keys: HashMap<String, KeyBlock>,
}

impl LocaleStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites one value.
    ///
    /// Writes into the named plugin's slot when `plugin` is given, otherwise
    /// into the default slot, at the country level when the locale carries a
    /// country and at the language level otherwise. Intermediate nodes are
    /// created as needed.
    ///
    /// # Errors
    ///
    /// Returns [`LinguaError::InvalidArgument`] if the key path, the value,
    /// or a given plugin name is empty.
    pub fn upsert(
        &mut self,
        locale: &Locale,
        key_path: &str,
        raw_value: &str,
        plugin: Option<&str>,
    ) -> LinguaResult<()> {
        if key_path.trim().is_empty() {
            return Err(LinguaError::InvalidArgument(
                "key path is required".to_string(),
            ));
        }
        if raw_value.is_empty() {
            return Err(LinguaError::InvalidArgument(format!(
                "value for key '{key_path}' is required"
            )));
        }
        if plugin.is_some_and(|name| name.trim().is_empty()) {
            return Err(LinguaError::InvalidArgument(
                "plugin name must be non-empty when given".to_string(),
            ));
        }

        let language_block = self
            .keys
            .entry(key_path.to_string())
            .or_default()
            .languages
            .entry(locale.language().to_string())
            .or_default();
        let slots = match locale.country_code() {
            Some(country) => language_block.countries.entry(country.to_string()).or_default(),
            None => &mut language_block.slots,
        };

        let value = LocalizedValue::new(raw_value);
        match plugin {
            Some(name) => slots.set_plugin(name, value),
            None => slots.set_default(value),
        }
        Ok(())
    }

    /// Removes one value, returning whether anything was actually removed.
    ///
    /// Walks to the block matching the locale's specificity (country level
    /// iff the locale carries a country). With a plugin, only that plugin's
    /// slot is removed; the default slot is never touched on a plugin's
    /// behalf. Without a plugin, the default slot is removed. Returns
    /// `false` when any intermediate node is absent.
    ///
    /// Emptied blocks are pruned, so a fully-unregistered key path
    /// disappears from the store.
    pub fn remove(&mut self, locale: &Locale, key_path: &str, plugin: Option<&str>) -> bool {
        let Some(key_block) = self.keys.get_mut(key_path) else {
            return false;
        };
        let Some(language_block) = key_block.languages.get_mut(locale.language()) else {
            return false;
        };

        let removed = match locale.country_code() {
            Some(country) => {
                let Some(slots) = language_block.countries.get_mut(country) else {
                    return false;
                };
                let removed = match plugin {
                    Some(name) => slots.remove_plugin(name),
                    None => slots.remove_default(),
                };
                if slots.is_empty() {
                    language_block.countries.remove(country);
                }
                removed
            }
            None => match plugin {
                Some(name) => language_block.slots.remove_plugin(name),
                None => language_block.slots.remove_default(),
            },
        };

        if language_block.is_empty() {
            key_block.languages.remove(locale.language());
        }
        if key_block.languages.is_empty() {
            self.keys.remove(key_path);
        }
        removed
    }

    /// Flattens a nested localization object into dotted key paths and
    /// upserts every string leaf.
    ///
    /// Intermediate objects are traversed, never stored as keys of their
    /// own. Leaves that are neither objects nor strings are logged and
    /// counted as failures; the rest of the payload still loads. Returns
    /// `Ok(true)` iff every leaf succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`LinguaError::InvalidArgument`] if the payload root is not
    /// an object, or if the object contains no leaves at all. A locale must
    /// not appear registered on the strength of an empty payload.
    pub fn bulk_load(
        &mut self,
        locale: &Locale,
        nested: &Value,
        plugin: Option<&str>,
    ) -> LinguaResult<bool> {
        let Some(root) = nested.as_object() else {
            return Err(LinguaError::InvalidArgument(
                "localization payload must be an object".to_string(),
            ));
        };

        let mut all_ok = true;
        let mut leaves = 0usize;
        let mut queue: Vec<(String, &serde_json::Map<String, Value>)> =
            vec![(String::new(), root)];

        while let Some((prefix, object)) = queue.pop() {
            for (name, value) in object {
                let path = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}.{name}")
                };
                match value {
                    Value::String(raw) => {
                        leaves += 1;
                        if let Err(err) = self.upsert(locale, &path, raw, plugin) {
                            warn!(locale = %locale, key = %path, error = %err, "skipping localization entry");
                            all_ok = false;
                        }
                    }
                    Value::Object(child) => queue.push((path, child)),
                    other => {
                        leaves += 1;
                        warn!(
                            locale = %locale,
                            key = %path,
                            "localization value must be a string or object, got {other}"
                        );
                        all_ok = false;
                    }
                }
            }
        }
        if leaves == 0 {
            return Err(LinguaError::InvalidArgument(
                "localization payload contains no values".to_string(),
            ));
        }
        Ok(all_ok)
    }

    /// One tier walk for a single locale: country slots first when the
    /// locale carries a country, then language-level slots, applying the
    /// plugin fallback of [`Slots::find`] at each tier.
    pub fn find(
        &self,
        key_path: &str,
        locale: &Locale,
        plugin: Option<&str>,
    ) -> Option<&LocalizedValue> {
        let language_block = self.keys.get(key_path)?.languages.get(locale.language())?;
        if let Some(country) = locale.country_code() {
            if let Some(value) = language_block
                .countries
                .get(country)
                .and_then(|slots| slots.find(plugin))
            {
                return Some(value);
            }
        }
        language_block.slots.find(plugin)
    }

    /// Returns `true` if the key path has at least one value registered, in
    /// any locale.
    pub fn contains_key(&self, key_path: &str) -> bool {
        self.keys.contains_key(key_path)
    }

    /// Returns `true` if at least one key path has a value at exactly the
    /// given locale's tier (country tier when a country is set, language
    /// tier otherwise).
    pub fn has_values_for(&self, locale: &Locale) -> bool {
        self.keys.values().any(|key_block| {
            key_block
                .languages
                .get(locale.language())
                .is_some_and(|language_block| match locale.country_code() {
                    Some(country) => language_block
                        .countries
                        .get(country)
                        .is_some_and(|slots| !slots.is_empty()),
                    None => !language_block.slots.is_empty(),
                })
        })
    }

    /// All registered dotted key paths, in no particular order.
    pub fn key_paths(&self) -> Vec<String> {
        self.keys.keys().cloned().collect()
    }

    /// The number of registered key paths.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// `true` if no key paths are registered.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
