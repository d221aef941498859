#![forbid(unsafe_code)]

//! Live bindings between a UI control and one form field.

use crate::engine::FormEngine;
use crate::value::FieldValue;

/// Read/write view of a single field for a UI control.
///
/// Reads are live: they reflect the engine's current state, not the state at
/// the time the binding was created. A binding for an unknown field is
/// neutral: it reads as an empty, optional, error-free field and ignores input.
#[derive(Debug, Clone)]
pub struct FieldBinding {
    name: String,
    engine: Option<FormEngine>,
}

impl FieldBinding {
    pub(crate) fn bound(engine: FormEngine, name: &str) -> Self {
        Self {
            name: name.to_string(),
            engine: Some(engine),
        }
    }

    pub(crate) fn neutral(name: &str) -> Self {
        Self {
            name: name.to_string(),
            engine: None,
        }
    }

    /// The field name this binding was requested for.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `false` for a neutral binding.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.engine.is_some()
    }

    /// Value to display.
    #[must_use]
    pub fn value(&self) -> FieldValue {
        self.engine
            .as_ref()
            .and_then(|e| e.value(&self.name))
            .unwrap_or_default()
    }

    /// Error text to display (empty when valid).
    #[must_use]
    pub fn error(&self) -> String {
        self.engine
            .as_ref()
            .and_then(|e| e.error(&self.name))
            .unwrap_or_default()
    }

    /// Whether to show a required indicator.
    #[must_use]
    pub fn required(&self) -> bool {
        self.engine
            .as_ref()
            .is_some_and(|e| e.is_required(&self.name))
    }

    /// Change handler: sets the value, which also validates the field.
    pub fn on_change(&self, value: impl Into<FieldValue>) {
        if let Some(engine) = &self.engine {
            engine.set_value(&self.name, value);
        }
    }

    /// Blur handler: validates the field.
    pub fn on_blur(&self) -> bool {
        self.engine
            .as_ref()
            .is_none_or(|e| e.validate_field(&self.name))
    }
}
