#![forbid(unsafe_code)]

//! Folio public facade crate.
//!
//! This crate provides the stable surface area for the portfolio front end's
//! form handling. It re-exports the form engine and the reactive primitives it
//! is built on, and offers a lightweight prelude for day-to-day usage.

use std::fmt;

// --- Form re-exports -------------------------------------------------------

pub use folio_form::validators;
pub use folio_form::{
    ConfigError, FieldBinding, FieldError, FieldState, FieldValue, FormConfig, FormEngine,
    FormValues, SubmitError, ValidateFn,
};

// --- Reactive re-exports ---------------------------------------------------

#[cfg(feature = "reactive")]
pub use folio_reactive::{BatchScope, Observable, Subscription};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Folio apps.
#[derive(Debug)]
pub enum Error {
    /// Form configuration could not be loaded.
    Config(ConfigError),
    /// A form submission failed.
    Submit(SubmitError),
    /// A payload could not be encoded.
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Submit(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "payload encoding failed: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Submit(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<SubmitError> for Error {
    fn from(err: SubmitError) -> Self {
        Self::Submit(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Standard result type for Folio APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, FieldBinding, FieldValue, FormConfig, FormEngine, FormValues, Result, SubmitError,
        validators,
    };

    #[cfg(feature = "reactive")]
    pub use crate::{BatchScope, Observable, Subscription};
}
