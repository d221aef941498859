#![forbid(unsafe_code)]

//! The form engine: per-field value, error, touched, required and validator
//! state for a fixed set of named fields.
//!
//! # Design Invariants
//!
//! 1. **Fixed key set**: fields are declared at construction; operations on
//!    unknown names are no-ops and reads return an empty result.
//! 2. **Errors are data**: validation failures are strings stored on the
//!    field (empty = valid). Nothing here panics or returns `Err` for them.
//! 3. **Consistent notifications**: each mutating operation runs inside a
//!    [`BatchScope`], so observers run after the whole operation has applied.
//! 4. **Single thread**: the engine is an `Rc` handle and is not `Send`.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use folio_reactive::{BatchScope, Observable, Subscription};

use crate::binding::FieldBinding;
use crate::config::FormConfig;
use crate::value::{FieldValue, FormValues};

/// A stored field validator. Returns `Some(message)` when the value is invalid.
pub type ValidateFn = Rc<dyn Fn(&FieldValue) -> Option<String>>;

// ---------------------------------------------------------------------------
// FieldState – snapshot of one field
// ---------------------------------------------------------------------------

/// A point-in-time copy of a field's state.
#[derive(Clone)]
pub struct FieldState {
    pub value: FieldValue,
    /// Empty when the field is valid.
    pub error: String,
    pub touched: bool,
    pub required: bool,
    pub validator: Option<ValidateFn>,
}

impl fmt::Debug for FieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldState")
            .field("value", &self.value)
            .field("error", &self.error)
            .field("touched", &self.touched)
            .field("required", &self.required)
            .field("validator", &self.validator.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Field – live storage
// ---------------------------------------------------------------------------

struct Field {
    name: String,
    default: FieldValue,
    value: Observable<FieldValue>,
    error: Observable<String>,
    touched: Observable<bool>,
    required: Cell<bool>,
    validator: RefCell<Option<ValidateFn>>,
}

impl Field {
    fn new(name: String, default: FieldValue) -> Self {
        Self {
            name,
            value: Observable::new(default.clone()),
            default,
            error: Observable::new(String::new()),
            touched: Observable::new(false),
            required: Cell::new(false),
            validator: RefCell::new(None),
        }
    }

    fn snapshot(&self) -> FieldState {
        FieldState {
            value: self.value.get(),
            error: self.error.get(),
            touched: self.touched.get(),
            required: self.required.get(),
            validator: self.validator.borrow().clone(),
        }
    }
}

struct FormInner {
    fields: Vec<Field>,
    config: FormConfig,
}

// ---------------------------------------------------------------------------
// FormEngine
// ---------------------------------------------------------------------------

/// Form state for a fixed set of named fields.
///
/// `FormEngine` is a cheap handle: clones share the same fields.
///
/// # Example
///
/// ```rust
/// use folio_form::{FormEngine, validators};
///
/// let form = FormEngine::new([("email", "")]);
/// form.set_required("email", true);
/// form.set_validator("email", validators::email);
///
/// form.set_value("email", "bad");
/// assert_eq!(form.error("email").as_deref(), Some("Please enter a valid email address"));
///
/// form.set_value("email", "a@b.com");
/// assert!(!form.has_errors());
/// ```
#[derive(Clone)]
pub struct FormEngine {
    inner: Rc<FormInner>,
}

impl FormEngine {
    /// Create a form from `(name, default)` pairs with the default config.
    ///
    /// Declaration order is preserved. A repeated name keeps its first
    /// position and takes the last default.
    pub fn new<I, K, V>(initial: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        Self::with_config(initial, FormConfig::default())
    }

    /// Create a form with an explicit config.
    pub fn with_config<I, K, V>(initial: I, config: FormConfig) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let mut pairs: Vec<(String, FieldValue)> = Vec::new();
        for (name, value) in initial {
            let name = name.into();
            let value = value.into();
            match pairs.iter_mut().find(|(n, _)| *n == name) {
                Some(slot) => slot.1 = value,
                None => pairs.push((name, value)),
            }
        }

        let fields = pairs
            .into_iter()
            .map(|(name, value)| Field::new(name, value))
            .collect();
        Self {
            inner: Rc::new(FormInner { fields, config }),
        }
    }

    /// The active config.
    #[must_use]
    pub fn config(&self) -> &FormConfig {
        &self.inner.config
    }

    fn field_ref(&self, name: &str) -> Option<&Field> {
        self.inner.fields.iter().find(|f| f.name == name)
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Set a field's value, mark it touched, and revalidate it.
    pub fn set_value(&self, name: &str, value: impl Into<FieldValue>) {
        let Some(field) = self.field_ref(name) else {
            return;
        };
        let _batch = BatchScope::new();
        field.value.set(value.into());
        field.touched.set(true);
        self.run_validation(field);
    }

    /// Overwrite a field's error without running its validator.
    ///
    /// Used to surface errors from outside the form, such as a backend.
    pub fn set_error(&self, name: &str, error: impl Into<String>) {
        let Some(field) = self.field_ref(name) else {
            return;
        };
        let error = error.into();
        tracing::debug!(field = name, error = %error, "field error set externally");
        field.error.set(error);
    }

    /// Install a validator, replacing any previous one.
    pub fn set_validator<F>(&self, name: &str, validator: F)
    where
        F: Fn(&FieldValue) -> Option<String> + 'static,
    {
        if let Some(field) = self.field_ref(name) {
            *field.validator.borrow_mut() = Some(Rc::new(validator));
        }
    }

    /// Remove a field's validator.
    pub fn clear_validator(&self, name: &str) {
        if let Some(field) = self.field_ref(name) {
            field.validator.borrow_mut().take();
        }
    }

    /// Mark a field as required (or not).
    pub fn set_required(&self, name: &str, required: bool) {
        if let Some(field) = self.field_ref(name) {
            field.required.set(required);
        }
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Validate one field, updating its error. Unknown names are valid.
    pub fn validate_field(&self, name: &str) -> bool {
        let Some(field) = self.field_ref(name) else {
            return true;
        };
        let _batch = BatchScope::new();
        self.run_validation(field)
    }

    /// Validate every field in declaration order.
    ///
    /// Does not stop at the first failure, so all errors are populated together.
    pub fn validate_form(&self) -> bool {
        let _batch = BatchScope::new();
        self.inner
            .fields
            .iter()
            .fold(true, |all_valid, field| self.run_validation(field) && all_valid)
    }

    fn run_validation(&self, field: &Field) -> bool {
        let failure = self.check(field);
        let valid = failure.is_none();
        field.error.set(failure.unwrap_or_default());
        valid
    }

    /// Required check first, then the validator. `None` means valid.
    fn check(&self, field: &Field) -> Option<String> {
        if field.required.get() && field.value.with(|v| self.is_missing(v)) {
            tracing::trace!(field = %field.name, "required field is empty");
            return Some(self.inner.config.format_required(&field.name));
        }

        // Cloned out so the validator runs without a borrow held.
        let validator = field.validator.borrow().clone()?;
        let message = validator(&field.value.get()).filter(|msg| !msg.is_empty())?;
        tracing::trace!(field = %field.name, error = %message, "validator rejected value");
        Some(message)
    }

    fn is_missing(&self, value: &FieldValue) -> bool {
        let config = &self.inner.config;
        match value {
            FieldValue::Text(s) if config.trim_required => s.trim().is_empty(),
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Number(n) => n.is_nan() || (config.numeric_zero_is_empty && *n == 0.0),
        }
    }

    /// Restore every field's default value and clear errors and touched state.
    ///
    /// Required flags and validators are kept.
    pub fn reset(&self) {
        let _batch = BatchScope::new();
        for field in &self.inner.fields {
            field.value.set(field.default.clone());
            field.error.set(String::new());
            field.touched.set(false);
        }
        tracing::debug!(fields = self.inner.fields.len(), "form reset");
    }

    // -------------------------------------------------------------------------
    // Derived views
    // -------------------------------------------------------------------------

    /// Snapshot of current values, keyed like the initial values.
    #[must_use]
    pub fn values(&self) -> FormValues {
        FormValues::from_pairs(
            self.inner
                .fields
                .iter()
                .map(|f| (f.name.clone(), f.value.get()))
                .collect(),
        )
    }

    /// Returns `true` if any field currently carries an error.
    ///
    /// Reads state only; does not validate.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.inner
            .fields
            .iter()
            .any(|f| f.error.with(|e| !e.is_empty()))
    }

    /// `(name, message)` for every field with an error, in declaration order.
    #[must_use]
    pub fn errors(&self) -> Vec<(String, String)> {
        self.inner
            .fields
            .iter()
            .filter_map(|f| {
                let error = f.error.get();
                (!error.is_empty()).then(|| (f.name.clone(), error))
            })
            .collect()
    }

    /// A live binding for wiring a UI control to `name`.
    ///
    /// Unknown names yield a neutral binding.
    #[must_use]
    pub fn field_binding(&self, name: &str) -> FieldBinding {
        if self.contains(name) {
            FieldBinding::bound(self.clone(), name)
        } else {
            FieldBinding::neutral(name)
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Current value of a field.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<FieldValue> {
        self.field_ref(name).map(|f| f.value.get())
    }

    /// Current error of a field (empty when valid).
    #[must_use]
    pub fn error(&self, name: &str) -> Option<String> {
        self.field_ref(name).map(|f| f.error.get())
    }

    /// Whether a field has been set since construction or the last reset.
    #[must_use]
    pub fn is_touched(&self, name: &str) -> bool {
        self.field_ref(name).is_some_and(|f| f.touched.get())
    }

    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.field_ref(name).is_some_and(|f| f.required.get())
    }

    #[must_use]
    pub fn has_validator(&self, name: &str) -> bool {
        self.field_ref(name)
            .is_some_and(|f| f.validator.borrow().is_some())
    }

    /// Snapshot of one field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<FieldState> {
        self.field_ref(name).map(Field::snapshot)
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.inner.fields.iter().map(|f| f.name.as_str())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.field_ref(name).is_some()
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.fields.is_empty()
    }

    // -------------------------------------------------------------------------
    // Touched / Dirty State Tracking
    // -------------------------------------------------------------------------

    /// Whether a field's value differs from its construction default.
    #[must_use]
    pub fn is_dirty(&self, name: &str) -> bool {
        self.field_ref(name)
            .is_some_and(|f| f.value.with(|v| *v != f.default))
    }

    /// Names of dirty fields.
    #[must_use]
    pub fn dirty_fields(&self) -> Vec<&str> {
        self.inner
            .fields
            .iter()
            .filter(|f| f.value.with(|v| *v != f.default))
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Names of touched fields.
    #[must_use]
    pub fn touched_fields(&self) -> Vec<&str> {
        self.inner
            .fields
            .iter()
            .filter(|f| f.touched.get())
            .map(|f| f.name.as_str())
            .collect()
    }

    #[must_use]
    pub fn any_touched(&self) -> bool {
        self.inner.fields.iter().any(|f| f.touched.get())
    }

    /// No field touched and no field dirty.
    #[must_use]
    pub fn is_pristine(&self) -> bool {
        !self.any_touched() && self.dirty_fields().is_empty()
    }

    // -------------------------------------------------------------------------
    // Observation
    // -------------------------------------------------------------------------

    /// Observe value changes of a field. `None` for unknown names.
    pub fn observe_value(
        &self,
        name: &str,
        callback: impl Fn(&FieldValue) + 'static,
    ) -> Option<Subscription> {
        self.field_ref(name).map(|f| f.value.subscribe(callback))
    }

    /// Observe error changes of a field. `None` for unknown names.
    pub fn observe_error(
        &self,
        name: &str,
        callback: impl Fn(&String) + 'static,
    ) -> Option<Subscription> {
        self.field_ref(name).map(|f| f.error.subscribe(callback))
    }

    /// Observe touched changes of a field. `None` for unknown names.
    pub fn observe_touched(
        &self,
        name: &str,
        callback: impl Fn(&bool) + 'static,
    ) -> Option<Subscription> {
        self.field_ref(name).map(|f| f.touched.subscribe(callback))
    }
}

impl fmt::Debug for FormEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for field in &self.inner.fields {
            map.entry(&field.name, &field.snapshot());
        }
        map.finish()
    }
}
