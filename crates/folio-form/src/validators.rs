#![forbid(unsafe_code)]

//! Bundled stateless validators.
//!
//! Every validator maps a [`FieldValue`] to `None` when valid or `Some(message)`
//! when invalid, so they plug straight into
//! [`FormEngine::set_validator`](crate::FormEngine::set_validator).
//! Numeric values are checked against their text rendering.
//!
//! # Example
//!
//! ```rust
//! use folio_form::{FieldValue, validators};
//!
//! assert_eq!(validators::email(&FieldValue::from("a@b.co")), None);
//! assert_eq!(
//!     validators::min_length(5)(&FieldValue::from("abc")).as_deref(),
//!     Some("Minimum length is 5 characters"),
//! );
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::value::FieldValue;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Message returned by [`email`].
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
/// Message returned by [`phone`].
pub const PHONE_MESSAGE: &str = "Please enter a valid phone number";
/// Message returned by [`url`].
pub const URL_MESSAGE: &str = "Please enter a valid URL";

/// A boxed validator, as accepted by [`compose`].
pub type BoxedValidator = Box<dyn Fn(&FieldValue) -> Option<String>>;

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"))
}

/// Optional `+`, a nonzero leading digit, then up to 15 more ASCII digits.
fn phone_regex() -> &'static Regex {
    PHONE_REGEX.get_or_init(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("phone regex"))
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// Checks for `local@domain.tld`, where no part contains whitespace or `@`.
///
/// This is a shape check, not RFC 5322 validation.
#[must_use]
pub fn email(value: &FieldValue) -> Option<String> {
    if email_regex().is_match(&value.to_text()) {
        None
    } else {
        Some(EMAIL_MESSAGE.to_string())
    }
}

/// Checks for a phone number after stripping `-`, whitespace, `(` and `)`.
#[must_use]
pub fn phone(value: &FieldValue) -> Option<String> {
    let digits: String = value
        .to_text()
        .chars()
        .filter(|c| !matches!(c, '-' | '(' | ')') && !c.is_whitespace())
        .collect();
    if phone_regex().is_match(&digits) {
        None
    } else {
        Some(PHONE_MESSAGE.to_string())
    }
}

/// Checks that the value parses as an absolute URL.
///
/// Parse failures are reported as the validation message, never propagated.
#[must_use]
pub fn url(value: &FieldValue) -> Option<String> {
    match ::url::Url::parse(&value.to_text()) {
        Ok(_) => None,
        Err(e) => {
            tracing::trace!(error = %e, "url validation failed");
            Some(URL_MESSAGE.to_string())
        }
    }
}

/// Fails when the value has fewer than `min` characters.
///
/// Numbers are measured by their text rendering, so `min_length(3)` rejects
/// `FieldValue::Number(42.0)`. A plain length check on a number would never
/// fail; this one does.
pub fn min_length(min: usize) -> impl Fn(&FieldValue) -> Option<String> + Clone + 'static {
    move |value| {
        if value.to_text().chars().count() < min {
            Some(format!("Minimum length is {min} characters"))
        } else {
            None
        }
    }
}

/// Fails when the value has more than `max` characters.
pub fn max_length(max: usize) -> impl Fn(&FieldValue) -> Option<String> + Clone + 'static {
    move |value| {
        if value.to_text().chars().count() > max {
            Some(format!("Maximum length is {max} characters"))
        } else {
            None
        }
    }
}

/// Runs `validators` in order and returns the first non-empty message.
pub fn compose(validators: Vec<BoxedValidator>) -> impl Fn(&FieldValue) -> Option<String> + 'static {
    move |value| {
        validators
            .iter()
            .filter_map(|v| v(value))
            .find(|msg| !msg.is_empty())
    }
}
