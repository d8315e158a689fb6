//! Parameter interpolation for localized templates.
//!
//! Localized strings may carry `{name}` placeholders that are substituted at
//! resolution time. Substitution is a single left-to-right scan over the
//! template characters; no regex engine is involved, so the cost is O(n)
//! with no backtracking.
//!
//! ## Scan rules
//!
//! - An unescaped `{` opens a capture; everything up to the first `}` is the
//!   parameter name. A further `{` inside an open capture is literal content
//!   of the name (there is no nesting).
//! - `%{` escapes the brace: a literal `{` is emitted and the `%` is
//!   consumed. A `%` not followed by `{` is ordinary text.
//! - On close, the substitution is the supplied parameter value when present
//!   and non-empty, else the caller's default, else the bare parameter name.
//!   The braces are dropped in every case.
//! - A capture still open at end of input is emitted literally, opening
//!   brace included, so malformed templates stay visible in output.

use std::collections::HashMap;

/// Returns `true` if the template contains at least one complete `{...}`
/// placeholder under the scan rules.
///
/// # Examples
///
/// ```
/// use lingua_rs_core::interpolate::contains_parameters;
///
/// assert!(contains_parameters("Hello {name}"));
/// assert!(!contains_parameters("plain text"));
/// assert!(!contains_parameters("50%{ discount")); // escaped brace
/// ```
pub fn contains_parameters(template: &str) -> bool {
    let mut chars = template.chars().peekable();
    let mut open = false;
    while let Some(ch) = chars.next() {
        match ch {
            '%' if !open && chars.peek() == Some(&'{') => {
                chars.next();
            }
            '{' if !open => open = true,
            '}' if open => return true,
            _ => {}
        }
    }
    false
}

/// Substitutes `{name}` placeholders in `template` with values from
/// `params`.
///
/// A parameter that is absent or empty falls back to `default_param` when
/// one is given, otherwise to the parameter's own name. Use `%{` for a
/// literal opening brace.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use lingua_rs_core::interpolate::interpolate;
///
/// let mut params = HashMap::new();
/// params.insert("name".to_string(), "World".to_string());
/// assert_eq!(interpolate("Hello {name}", &params, None), "Hello World");
/// assert_eq!(interpolate("Hello {other}", &params, None), "Hello other");
/// assert_eq!(interpolate("Hello {other}", &params, Some("?")), "Hello ?");
/// ```
pub fn interpolate(
    template: &str,
    params: &HashMap<String, String>,
    default_param: Option<&str>,
) -> String {
    let mut output = String::with_capacity(template.len());
    let mut capture: Option<String> = None;
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        match capture.take() {
            None => match ch {
                '%' if chars.peek() == Some(&'{') => {
                    chars.next();
                    output.push('{');
                }
                '{' => capture = Some(String::new()),
                _ => output.push(ch),
            },
            Some(mut name) => {
                if ch == '}' {
                    match params.get(name.as_str()).map(String::as_str) {
                        Some(value) if !value.is_empty() => output.push_str(value),
                        _ => output.push_str(default_param.unwrap_or(name.as_str())),
                    }
                } else {
                    name.push(ch);
                    capture = Some(name);
                }
            }
        }
    }

    // Unterminated capture: emit it literally rather than dropping it.
    if let Some(name) = capture {
        output.push('{');
        output.push_str(&name);
    }

    output
}
