//! Property-based invariant tests for `FormEngine`.
//!
//! 1. Construction yields untouched, error-free fields holding their defaults.
//! 2. `set_value` on a known field always marks it touched and refreshes its error.
//! 3. Mutators on unknown names never change any existing field.
//! 4. `validate_field` is idempotent.
//! 5. `validate_form` agrees with per-field validation and evaluates every field.
//! 6. `reset` restores defaults and keeps required flags and validators.

use folio_form::{FieldValue, FormEngine, validators};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn value_strategy() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        "[ a-z@.]{0,12}".prop_map(FieldValue::from),
        (-3i32..4).prop_map(FieldValue::from),
    ]
}

fn fields_strategy() -> impl Strategy<Value = Vec<(String, FieldValue)>> {
    prop::collection::vec(value_strategy(), 1..6).prop_map(|values| {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| (format!("field{i}"), v))
            .collect()
    })
}

/// Build a form where every other field is required and every third one
/// carries a length validator.
fn configured_form(fields: &[(String, FieldValue)]) -> FormEngine {
    let form = FormEngine::new(fields.iter().cloned());
    for (i, (name, _)) in fields.iter().enumerate() {
        if i % 2 == 0 {
            form.set_required(name, true);
        }
        if i % 3 == 0 {
            form.set_validator(name, validators::min_length(3));
        }
    }
    form
}

fn snapshot(form: &FormEngine) -> Vec<(Option<FieldValue>, Option<String>, bool, bool, bool)> {
    let names: Vec<String> = form.field_names().map(str::to_string).collect();
    names
        .iter()
        .map(|n| {
            (
                form.value(n),
                form.error(n),
                form.is_touched(n),
                form.is_required(n),
                form.has_validator(n),
            )
        })
        .collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Construction
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn construction_is_clean(fields in fields_strategy()) {
        let form = FormEngine::new(fields.iter().cloned());
        prop_assert_eq!(form.len(), fields.len());
        for (name, default) in &fields {
            let value = form.value(name);
            prop_assert_eq!(value.as_ref(), Some(default));
            let error = form.error(name);
            prop_assert_eq!(error.as_deref(), Some(""));
            prop_assert!(!form.is_touched(name));
        }
        prop_assert!(form.is_pristine());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. set_value touches and validates
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn set_value_touches_and_validates(fields in fields_strategy(), value in value_strategy()) {
        let form = configured_form(&fields);
        let probe = configured_form(&fields);
        let name = fields[0].0.clone();

        form.set_value(&name, value.clone());

        prop_assert!(form.is_touched(&name));
        prop_assert_eq!(form.value(&name), Some(value.clone()));

        // A fresh form holding the same value must report the same error.
        probe.set_value(&name, value);
        probe.validate_field(&name);
        prop_assert_eq!(form.error(&name), probe.error(&name));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Unknown names are inert
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn unknown_names_are_inert(fields in fields_strategy(), value in value_strategy()) {
        let form = configured_form(&fields);
        let before = snapshot(&form);

        form.set_value("unknown", value);
        form.set_error("unknown", "boom");
        form.set_validator("unknown", validators::email);
        form.set_required("unknown", true);
        prop_assert!(form.validate_field("unknown"));

        prop_assert_eq!(snapshot(&form), before);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. validate_field is idempotent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn validate_field_idempotent(fields in fields_strategy()) {
        let form = configured_form(&fields);
        for (name, _) in &fields {
            let first = (form.validate_field(name), form.error(name));
            let second = (form.validate_field(name), form.error(name));
            prop_assert_eq!(first, second);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. validate_form agrees with validate_field
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn validate_form_agrees_with_fields(fields in fields_strategy()) {
        let form = configured_form(&fields);
        let expected: Vec<bool> = {
            let probe = configured_form(&fields);
            fields.iter().map(|(n, _)| probe.validate_field(n)).collect()
        };

        let all_valid = form.validate_form();
        prop_assert_eq!(all_valid, expected.iter().all(|v| *v));

        // Every failing field has its error populated, not just the first.
        for ((name, _), valid) in fields.iter().zip(&expected) {
            let error = form.error(name).unwrap_or_default();
            prop_assert_eq!(error.is_empty(), *valid);
        }
        prop_assert_eq!(form.has_errors(), !all_valid);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. reset restores defaults
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reset_restores_defaults(
        fields in fields_strategy(),
        edits in prop::collection::vec(value_strategy(), 0..6),
    ) {
        let form = configured_form(&fields);
        for (i, value) in edits.into_iter().enumerate() {
            let name = &fields[i % fields.len()].0;
            form.set_value(name, value);
        }
        form.validate_form();
        form.set_error(&fields[0].0, "server error");

        form.reset();

        for (i, (name, default)) in fields.iter().enumerate() {
            let value = form.value(name);
            prop_assert_eq!(value.as_ref(), Some(default));
            let error = form.error(name);
            prop_assert_eq!(error.as_deref(), Some(""));
            prop_assert!(!form.is_touched(name));
            prop_assert_eq!(form.is_required(name), i % 2 == 0);
            prop_assert_eq!(form.has_validator(name), i % 3 == 0);
        }
        prop_assert!(!form.has_errors());
    }
}
