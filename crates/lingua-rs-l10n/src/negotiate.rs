//! Accept-Language negotiation.
//!
//! Parses a client's `Accept-Language` header into a ranked preference list
//! and matches it against the registered supported locales, preferring an
//! exact `language-COUNTRY` match and falling back to any supported locale
//! sharing the language.

use lingua_rs_core::locale::Locale;

/// Parses an `Accept-Language` header into preference tags, best first.
///
/// Quality values (`;q=`) are honored with a default of `1.0`; entries with
/// `q=0` and `*` wildcards are dropped. Ties keep header order.
///
/// # Examples
///
/// ```
/// use lingua_rs_l10n::negotiate::parse_accept_language;
///
/// let prefs = parse_accept_language("fr-CA,fr;q=0.9,en;q=0.8");
/// assert_eq!(prefs, vec!["fr-CA", "fr", "en"]);
/// ```
pub fn parse_accept_language(header: &str) -> Vec<String> {
    let mut candidates: Vec<(f32, String)> = Vec::new();

    for part in header.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (tag, quality) = match part.split_once(';') {
            Some((tag, params)) => {
                let quality = params
                    .trim()
                    .strip_prefix("q=")
                    .and_then(|q| q.trim().parse::<f32>().ok())
                    .unwrap_or(1.0);
                (tag.trim(), quality)
            }
            None => (part, 1.0),
        };
        if tag.is_empty() || tag == "*" || quality <= 0.0 {
            continue;
        }
        candidates.push((quality, tag.to_string()));
    }

    // sort_by is stable, so equal weights keep header order.
    candidates.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    candidates.into_iter().map(|(_, tag)| tag).collect()
}

/// Picks the best supported locale for a ranked preference list.
///
/// For each preference in order: an exact canonical match wins, otherwise
/// the first supported locale with the same language. Preferences that do
/// not parse as locales are skipped.
///
/// # Examples
///
/// ```
/// use lingua_rs_core::locale::Locale;
/// use lingua_rs_l10n::negotiate::{best_match, parse_accept_language};
///
/// let supported = vec![
///     Locale::parse("en-US").unwrap(),
///     Locale::parse("fr-FR").unwrap(),
/// ];
/// let prefs = parse_accept_language("fr-CA,fr;q=0.9,en;q=0.8");
/// let best = best_match(&prefs, &supported).unwrap();
/// assert_eq!(best.to_string(), "fr-FR");
/// ```
pub fn best_match(preferences: &[String], supported: &[Locale]) -> Option<Locale> {
    for preference in preferences {
        let Ok(wanted) = Locale::parse(preference) else {
            continue;
        };
        if let Some(exact) = supported.iter().find(|candidate| **candidate == wanted) {
            return Some(exact.clone());
        }
        if let Some(language) = supported
            .iter()
            .find(|candidate| candidate.same_language(&wanted))
        {
            return Some(language.clone());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locales(tags: &[&str]) -> Vec<Locale> {
        tags.iter().map(|tag| Locale::parse(tag).unwrap()).collect()
    }

    #[test]
    fn test_parse_orders_by_quality() {
        let prefs = parse_accept_language("en;q=0.8,fr-CA,fr;q=0.9");
        assert_eq!(prefs, vec!["fr-CA", "fr", "en"]);
    }

    #[test]
    fn test_parse_defaults_quality_to_one() {
        let prefs = parse_accept_language("de, en");
        assert_eq!(prefs, vec!["de", "en"]);
    }

    #[test]
    fn test_parse_drops_wildcard_and_zero_quality() {
        let prefs = parse_accept_language("*, en;q=0, fr;q=0.5");
        assert_eq!(prefs, vec!["fr"]);
    }

    #[test]
    fn test_parse_handles_malformed_quality() {
        let prefs = parse_accept_language("en;q=abc,fr;q=0.5");
        // Unparseable quality falls back to 1.0.
        assert_eq!(prefs, vec!["en", "fr"]);
    }

    #[test]
    fn test_parse_empty_header() {
        assert!(parse_accept_language("").is_empty());
        assert!(parse_accept_language(" , ,").is_empty());
    }

    #[test]
    fn test_best_match_exact_wins() {
        let supported = locales(&["en-US", "en-GB"]);
        let prefs = vec!["en-GB".to_string()];
        assert_eq!(best_match(&prefs, &supported).unwrap().to_string(), "en-GB");
    }

    #[test]
    fn test_best_match_language_fallback() {
        let supported = locales(&["en-US", "fr-FR"]);
        let prefs = parse_accept_language("fr-CA,fr;q=0.9,en;q=0.8");
        assert_eq!(best_match(&prefs, &supported).unwrap().to_string(), "fr-FR");
    }

    #[test]
    fn test_best_match_respects_rank_order() {
        let supported = locales(&["en-US", "fr-FR"]);
        let prefs = parse_accept_language("es,en;q=0.5");
        assert_eq!(best_match(&prefs, &supported).unwrap().to_string(), "en-US");
    }

    #[test]
    fn test_best_match_none_when_nothing_fits() {
        let supported = locales(&["en-US"]);
        let prefs = parse_accept_language("ja,ko;q=0.9");
        assert!(best_match(&prefs, &supported).is_none());
    }

    #[test]
    fn test_best_match_case_insensitive() {
        let supported = locales(&["pt-BR"]);
        let prefs = vec!["PT-br".to_string()];
        assert_eq!(best_match(&prefs, &supported).unwrap().to_string(), "pt-BR");
    }
}
