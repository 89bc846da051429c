//! Field Feedback Core
//!
//! Turns a form field's constraint-validation state into presentational CSS
//! classes (`valid`, `invalid`, `valueMissing`) so the surrounding markup can
//! reveal the matching message span.
//!
//! The crate is host-agnostic: the browser binding lives in
//! `field-feedback-wasm`, and the `memory` feature provides an in-memory
//! document for tests and non-browser embedders.
//!
//! # Example
//!
//! ```
//! use field_feedback_core::memory::{FieldSpec, MemoryDocument};
//! use field_feedback_core::{install_validation, FeedbackConfig, FieldEvent};
//!
//! let doc = MemoryDocument::new();
//! let email = doc.add_field(FieldSpec::input("email").class("form-field__input").required());
//!
//! let installation = install_validation(&doc, &FeedbackConfig::default()).unwrap();
//! assert_eq!(installation.len(), 3);
//!
//! doc.dispatch(&email, FieldEvent::Blur);
//! assert!(email.has("invalid"));
//! ```

pub mod classes;
pub mod config;
pub mod error;
pub mod handler;
pub mod host;
pub mod installer;
pub mod markup;
pub mod policy;
pub mod validity;

#[cfg(feature = "memory")]
pub mod memory;

pub use classes::{apply_feedback, ClassList, FeedbackClasses};
pub use config::FeedbackConfig;
pub use error::{FeedbackError, Result};
pub use handler::handle_field;
pub use host::{FieldCallback, FieldElement, FieldEvent, FieldHost};
pub use installer::{install_validation, Installation};
pub use markup::{render_field, FieldMarkup, FEEDBACK_CSS};
pub use policy::{classify, FeedbackState, ValidationPolicy};
pub use validity::{FieldSnapshot, ValidityState};

/// Selector matched by the installer unless configured otherwise
pub const DEFAULT_SELECTOR: &str = ".form-field__input";
