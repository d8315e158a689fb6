//! Locale identifier codec.
//!
//! A [`Locale`] is a lowercase language code plus an optional uppercase
//! country code. The canonical string form is `language` or
//! `language-COUNTRY` (e.g. `en`, `en-US`). Both halves are normalized at
//! construction, so two locales denote the same supported entry exactly when
//! their canonical [`Display`](std::fmt::Display) forms are byte-equal.
//!
//! The codec also derives a locale from a definition file path
//! ([`Locale::from_path`]), which is how the startup loader maps file names
//! like `locale/en-US.json` onto locales.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LinguaError, LinguaResult};

/// The separator between the language and country halves of a locale string.
const SEPARATOR: char = '-';

/// A normalized locale identifier: a language plus an optional country.
///
/// # Examples
///
/// ```
/// use lingua_rs_core::locale::Locale;
///
/// let locale = Locale::parse("EN-us").unwrap();
/// assert_eq!(locale.language(), "en");
/// assert_eq!(locale.country_code(), Some("US"));
/// assert_eq!(locale.to_string(), "en-US");
///
/// // Equality is on the normalized form.
/// assert_eq!(locale, Locale::parse("en-US").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale {
    language: String,
    country_code: Option<String>,
}

impl Locale {
    /// Creates a locale from structured parts, normalizing case.
    ///
    /// # Errors
    ///
    /// Returns [`LinguaError::InvalidLocale`] if `language` is empty or
    /// `country_code` is `Some` but empty.
    pub fn new(language: &str, country_code: Option<&str>) -> LinguaResult<Self> {
        let language = language.trim();
        if language.is_empty() {
            return Err(LinguaError::InvalidLocale(
                "language code is required".to_string(),
            ));
        }
        let country_code = match country_code {
            Some(country) => {
                let country = country.trim();
                if country.is_empty() {
                    return Err(LinguaError::InvalidLocale(
                        "country code must be a non-empty string when given".to_string(),
                    ));
                }
                Some(country.to_uppercase())
            }
            None => None,
        };
        Ok(Self {
            language: language.to_lowercase(),
            country_code,
        })
    }

    /// Parses a locale string such as `"en"`, `"en-us"`, or `"EN-US"`.
    ///
    /// Everything up to the first `-` is the language; the remainder, when
    /// non-empty, is the country code.
    ///
    /// # Errors
    ///
    /// Returns [`LinguaError::InvalidLocale`] if the language half is empty.
    pub fn parse(input: &str) -> LinguaResult<Self> {
        let input = input.trim();
        match input.split_once(SEPARATOR) {
            Some((language, country)) => Self::new(language, Some(country)),
            None => Self::new(input, None),
        }
    }

    /// Derives a locale from a definition file path.
    ///
    /// Takes the final path segment (splitting on both `/` and `\`), strips
    /// `extension` if the segment ends with it, and parses the remainder.
    ///
    /// # Examples
    ///
    /// ```
    /// use lingua_rs_core::locale::Locale;
    ///
    /// let locale = Locale::from_path("/srv/site/locale/en-US.json", ".json").unwrap();
    /// assert_eq!(locale.to_string(), "en-US");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`LinguaError::InvalidLocale`] if nothing parseable remains
    /// after stripping the directory part and extension.
    pub fn from_path(path: &str, extension: &str) -> LinguaResult<Self> {
        let segment = path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(path);
        let stem = if !extension.is_empty() && segment.ends_with(extension) {
            &segment[..segment.len() - extension.len()]
        } else {
            segment
        };
        Self::parse(stem)
    }

    /// Returns the lowercase language code.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the uppercase country code, if one is present.
    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    /// Returns `true` if both locales share the same language, ignoring the
    /// country halves.
    pub fn same_language(&self, other: &Self) -> bool {
        self.language == other.language
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.country_code {
            Some(country) => write!(f, "{}{SEPARATOR}{country}", self.language),
            None => write!(f, "{}", self.language),
        }
    }
}

impl FromStr for Locale {
    type Err = LinguaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Formats structured locale parts into the canonical string form.
///
/// # Examples
///
/// ```
/// use lingua_rs_core::locale::format_locale;
///
/// assert_eq!(format_locale("en", Some("us")).unwrap(), "en-US");
/// assert_eq!(format_locale("fr", None).unwrap(), "fr");
/// ```
///
/// # Errors
///
/// Returns [`LinguaError::InvalidLocale`] if `language` is empty or
/// `country_code` is `Some` but empty.
pub fn format_locale(language: &str, country_code: Option<&str>) -> LinguaResult<String> {
    Ok(Locale::new(language, country_code)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language_only() {
        let locale = Locale::parse("en").unwrap();
        assert_eq!(locale.language(), "en");
        assert_eq!(locale.country_code(), None);
        assert_eq!(locale.to_string(), "en");
    }

    #[test]
    fn test_parse_normalizes_case() {
        let locale = Locale::parse("EN-us").unwrap();
        assert_eq!(locale.language(), "en");
        assert_eq!(locale.country_code(), Some("US"));
        assert_eq!(locale.to_string(), "en-US");
    }

    #[test]
    fn test_parse_empty_fails() {
        assert!(Locale::parse("").is_err());
        assert!(Locale::parse("   ").is_err());
    }

    #[test]
    fn test_parse_empty_country_fails() {
        assert!(Locale::parse("en-").is_err());
    }

    #[test]
    fn test_new_validates_country() {
        assert!(Locale::new("en", Some("")).is_err());
        assert!(Locale::new("", Some("US")).is_err());
        assert!(Locale::new("en", Some("us")).is_ok());
    }

    #[test]
    fn test_equality_after_normalization() {
        let a = Locale::parse("pt-BR").unwrap();
        let b = Locale::parse("PT-br").unwrap();
        assert_eq!(a, b);

        let c = Locale::parse("pt-PT").unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_same_language() {
        let fr_fr = Locale::parse("fr-FR").unwrap();
        let fr_ca = Locale::parse("fr-CA").unwrap();
        let en = Locale::parse("en").unwrap();
        assert!(fr_fr.same_language(&fr_ca));
        assert!(!fr_fr.same_language(&en));
    }

    #[test]
    fn test_from_path_forward_slashes() {
        let locale = Locale::from_path("/path/to/en-US.json", ".json").unwrap();
        assert_eq!(locale.language(), "en");
        assert_eq!(locale.country_code(), Some("US"));
    }

    #[test]
    fn test_from_path_backslashes() {
        let locale = Locale::from_path("C:\\site\\locale\\de-DE.json", ".json").unwrap();
        assert_eq!(locale.to_string(), "de-DE");
    }

    #[test]
    fn test_from_path_bare_filename() {
        let locale = Locale::from_path("fr.json", ".json").unwrap();
        assert_eq!(locale.to_string(), "fr");
    }

    #[test]
    fn test_from_path_without_extension() {
        let locale = Locale::from_path("locale/es-MX", ".json").unwrap();
        assert_eq!(locale.to_string(), "es-MX");
    }

    #[test]
    fn test_from_path_extension_only_fails() {
        assert!(Locale::from_path("locale/.json", ".json").is_err());
    }

    #[test]
    fn test_format_locale() {
        assert_eq!(format_locale("en", Some("us")).unwrap(), "en-US");
        assert_eq!(format_locale("EN", None).unwrap(), "en");
        assert!(format_locale("", None).is_err());
        assert!(format_locale("en", Some("")).is_err());
    }

    #[test]
    fn test_from_str() {
        let locale: Locale = "ja-JP".parse().unwrap();
        assert_eq!(locale.to_string(), "ja-JP");
    }
}
