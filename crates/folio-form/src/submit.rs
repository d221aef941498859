#![forbid(unsafe_code)]

//! Submission contract between a form and whatever stores its values.
//!
//! The engine validates, hands a [`FormValues`] snapshot to a sink, and maps
//! per-field rejections from the sink back onto field errors.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `SubmitError::Invalid` | Local validation failed | Sink not called, field errors populated |
//! | `SubmitError::Rejected` | Sink rejected specific fields | Messages applied via `set_error` |
//! | `SubmitError::Backend` | Sink failed for another reason | Returned as is, fields untouched |

use std::fmt;

use crate::engine::FormEngine;
use crate::value::FormValues;

/// A rejection of one field reported by a submission sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur while submitting a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Local validation failed for the listed fields.
    Invalid { fields: Vec<String> },
    /// The sink rejected individual fields.
    Rejected(Vec<FieldError>),
    /// The sink failed for a reason not tied to a field.
    Backend(String),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid { fields } => {
                write!(f, "form has invalid fields: {}", fields.join(", "))
            }
            Self::Rejected(errors) => {
                write!(f, "submission rejected: ")?;
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}: {}", e.field, e.message)?;
                }
                Ok(())
            }
            Self::Backend(msg) => write!(f, "submission failed: {msg}"),
        }
    }
}

impl std::error::Error for SubmitError {}

impl FormEngine {
    /// Validate the form and pass its values to `sink`.
    ///
    /// Returns the submitted values on success. Per-field rejections from the
    /// sink are written onto the matching fields before the error is returned.
    pub fn submit<F>(&self, sink: F) -> Result<FormValues, SubmitError>
    where
        F: FnOnce(&FormValues) -> Result<(), SubmitError>,
    {
        if !self.validate_form() {
            let fields: Vec<String> = self.errors().into_iter().map(|(name, _)| name).collect();
            tracing::debug!(invalid = fields.len(), "submission blocked by validation");
            return Err(SubmitError::Invalid { fields });
        }

        let values = self.values();
        match sink(&values) {
            Ok(()) => {
                tracing::debug!(fields = values.len(), "form submitted");
                Ok(values)
            }
            Err(SubmitError::Rejected(errors)) => {
                for e in &errors {
                    if self.contains(&e.field) {
                        self.set_error(&e.field, e.message.clone());
                    } else {
                        tracing::warn!(field = %e.field, "rejection for unknown field ignored");
                    }
                }
                Err(SubmitError::Rejected(errors))
            }
            Err(err) => {
                tracing::debug!(error = %err, "submission failed");
                Err(err)
            }
        }
    }
}
