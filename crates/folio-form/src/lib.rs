#![forbid(unsafe_code)]

//! Form state and validation for Folio.
//!
//! A [`FormEngine`] holds a fixed set of named fields, each with a value, an
//! error message, a touched flag, a required flag and an optional validator.
//! Field state lives in [`folio_reactive::Observable`] cells so UI code can
//! subscribe to changes.
//!
//! # Role in Folio
//! `folio-form` is the reusable piece of the portfolio front end: contact and
//! editing forms are built on it, and submission goes through
//! [`FormEngine::submit`] to whatever backend the app talks to.
//!
//! # Example
//!
//! ```rust
//! use folio_form::{FieldValue, FormEngine, validators};
//!
//! let form = FormEngine::new([("email", ""), ("website", "")]);
//! form.set_required("email", true);
//! form.set_validator("email", validators::email);
//! form.set_validator("website", validators::url);
//!
//! let email = form.field_binding("email");
//! email.on_change("a@b.com");
//! form.set_value("website", "https://example.com");
//!
//! assert!(form.validate_form());
//! assert_eq!(form.values().get("email"), Some(&FieldValue::from("a@b.com")));
//! ```

pub mod binding;
pub mod config;
pub mod engine;
pub mod submit;
pub mod validators;
pub mod value;

pub use binding::FieldBinding;
pub use config::{ConfigError, FormConfig};
pub use engine::{FieldState, FormEngine, ValidateFn};
pub use submit::{FieldError, SubmitError};
pub use value::{FieldValue, FormValues};
