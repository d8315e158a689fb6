//! # lingua-rs-l10n
//!
//! The localization engine: an in-memory locale tree with tiered
//! resolution, accept-language negotiation, and a service façade that keeps
//! the supported-locale index in lockstep with tree mutations.
//!
//! ## Modules
//!
//! - [`store`] - The locale tree: key path → language → country, with
//!   default and per-plugin value slots
//! - [`context`] - Per-request resolution contexts and [`ResolveOptions`]
//! - [`negotiate`] - `Accept-Language` parsing and best-match selection
//! - [`service`] - [`LocalizationService`], the registration/lookup façade
//!
//! ## Resolution order
//!
//! For a context locale of `fr-CA` with an active plugin, a key is looked
//! up as: `fr`+`CA` plugin slot → other `fr`+`CA` plugin slots → `fr`+`CA`
//! default → the same three at the `fr` language tier → all six again for
//! the configured default locale → the caller's default value → the key
//! path itself. The first hit wins and is cached on the context.

pub mod context;
pub mod negotiate;
pub mod service;
pub mod store;

// Re-export the most commonly used types at the crate root.
pub use context::{LocalizationContext, ResolveOptions};
pub use service::LocalizationService;
pub use store::{LocaleStore, LocalizedValue};
