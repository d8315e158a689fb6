//! # lingua-rs
//!
//! A locale-resolution and string-localization engine. Given a client's
//! accept-language signal and a dotted key, it selects the best-matching
//! translated, parameter-substituted string, with tiered fallback across
//! plugin overrides, country variants, language defaults, and a configured
//! default locale.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient
//! access; depend on the individual crates for finer-grained control.
//!
//! ## Quick start
//!
//! ```
//! use lingua_rs::core::locale::Locale;
//! use lingua_rs::l10n::{LocalizationService, ResolveOptions};
//!
//! let service = LocalizationService::new(Locale::parse("en-US").unwrap());
//! service
//!     .register_bulk(
//!         &Locale::parse("en").unwrap(),
//!         &lingua_rs::serde_json::json!({ "greeting": "Hello {name}" }),
//!         None,
//!     )
//!     .unwrap();
//!
//! let ctx = service.context_for_request(Some("en-GB,en;q=0.9"));
//! let options = ResolveOptions::new().with_param("name", "World");
//! assert_eq!(ctx.resolve(&service, "greeting", &options), "Hello World");
//! ```

/// Foundation types: errors, settings, logging, locale codec, interpolation.
pub use lingua_rs_core as core;

/// The engine: locale tree, resolution, negotiation, service façade.
pub use lingua_rs_l10n as l10n;

/// Startup bulk-load from locale definition files.
#[cfg(feature = "loader")]
pub use lingua_rs_loader as loader;

// Third-party re-exports so downstream crates can use the same versions
// without declaring them.
pub use serde;
pub use serde_json;
pub use tracing;
