//! # lingua-rs-core
//!
//! Foundation types for the lingua-rs localization engine. This crate has no
//! knowledge of the locale tree or the resolution algorithm; it provides the
//! pieces everything else builds on.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result alias
//! - [`locale`] - Locale identifier codec (`language-COUNTRY`)
//! - [`interpolate`] - Single-pass `{name}` parameter substitution
//! - [`settings`] - Engine settings and global configuration
//! - [`settings_loader`] - Settings loading from TOML/JSON with env overrides
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod interpolate;
pub mod locale;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{LinguaError, LinguaResult};
pub use locale::{format_locale, Locale};
pub use settings::{Settings, SETTINGS};
