//! End-to-end form scenarios: a contact form driven through bindings,
//! validated, submitted, rejected by a backend, and reset.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use folio_form::{FieldError, FieldValue, FormConfig, FormEngine, SubmitError, validators};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[test]
fn email_field_lifecycle() {
    let form = FormEngine::new([("email", "")]);
    form.set_required("email", true);
    form.set_validator("email", validators::email);

    form.set_value("email", "bad");
    assert!(form.is_touched("email"));
    assert_eq!(
        form.error("email").as_deref(),
        Some("Please enter a valid email address")
    );

    form.set_value("email", "a@b.com");
    assert_eq!(form.error("email").as_deref(), Some(""));

    let values = form.values();
    assert_eq!(values.len(), 1);
    assert_eq!(values.get("email"), Some(&FieldValue::from("a@b.com")));
    assert_eq!(values.to_json().unwrap(), r#"{"email":"a@b.com"}"#);
}

#[test]
fn required_field_with_empty_default() {
    let form = FormEngine::new([("subject", "")]);
    form.set_required("subject", true);
    assert!(!form.validate_field("subject"));
    assert_eq!(form.error("subject").as_deref(), Some("subject is required"));
}

#[test]
fn contact_form_submission_flow() {
    let form = FormEngine::new([
        ("name", FieldValue::from("")),
        ("email", FieldValue::from("")),
        ("phone", FieldValue::from("")),
        ("website", FieldValue::from("")),
        ("message", FieldValue::from("")),
    ]);
    for name in ["name", "email", "message"] {
        form.set_required(name, true);
    }
    form.set_validator("email", validators::email);
    form.set_validator("phone", validators::phone);
    form.set_validator("website", validators::url);
    form.set_validator("message", validators::min_length(10));

    // Submitting untouched: every required field reports at once.
    let err = form.submit(|_| Ok(())).unwrap_err();
    assert_eq!(
        err,
        SubmitError::Invalid {
            fields: vec![
                "name".into(),
                "email".into(),
                "phone".into(),
                "website".into(),
                "message".into(),
            ]
        }
    );

    // Phone and website are optional but their validators still reject "".
    let bindings: Vec<_> = ["name", "email", "phone", "website", "message"]
        .into_iter()
        .map(|n| form.field_binding(n))
        .collect();
    bindings[0].on_change("Ada Lovelace");
    bindings[1].on_change("ada@example.org");
    bindings[2].on_change("+44 (20) 7946-0958");
    bindings[3].on_change("https://ada.dev");
    bindings[4].on_change("short");
    assert_eq!(bindings[4].error(), "Minimum length is 10 characters");
    bindings[4].on_change("Hello there, let's build an engine.");

    assert!(form.validate_form());
    assert!(!form.has_errors());

    let submitted = Rc::new(RefCell::new(None));
    let submitted_in = Rc::clone(&submitted);
    let values = form
        .submit(move |values| {
            *submitted_in.borrow_mut() = Some(values.to_json().unwrap());
            Ok(())
        })
        .unwrap();
    assert_eq!(values.get("name"), Some(&FieldValue::from("Ada Lovelace")));
    assert!(submitted.borrow().as_ref().unwrap().starts_with(r#"{"name":"Ada Lovelace""#));

    // Server-side rejection lands on the field.
    let err = form
        .submit(|_| Err(SubmitError::Rejected(vec![FieldError::new("email", "Already subscribed")])))
        .unwrap_err();
    assert!(matches!(err, SubmitError::Rejected(_)));
    assert_eq!(bindings[1].error(), "Already subscribed");

    // Editing the field clears the server error through normal validation.
    bindings[1].on_change("ada+2@example.org");
    assert_eq!(bindings[1].error(), "");

    form.reset();
    assert!(form.is_pristine());
    assert!(form.is_required("name"));
    assert!(form.has_validator("message"));
    assert_eq!(bindings[0].value(), FieldValue::from(""));
}

#[test]
fn numeric_fields_with_config() {
    let config = FormConfig::from_json(r#"{"numeric_zero_is_empty": false}"#).unwrap();
    let form = FormEngine::with_config([("years", 0), ("projects", 3)], config);
    form.set_required("years", true);
    form.set_validator("projects", |v: &FieldValue| match v.as_number() {
        Some(n) if n >= 1.0 => None,
        _ => Some("At least one project".to_string()),
    });

    assert!(form.validate_form());
    form.set_value("projects", 0);
    assert_eq!(form.error("projects").as_deref(), Some("At least one project"));
    assert_eq!(form.values().to_json().unwrap(), r#"{"years":0,"projects":0}"#);
}

#[test]
fn submitted_payload_sends_whole_numbers_as_integers() {
    let form = FormEngine::new([("years", FieldValue::from(3)), ("rate", FieldValue::from(1.5))]);
    let sent = RefCell::new(String::new());
    form.submit(|values| {
        *sent.borrow_mut() = values.to_json().map_err(|e| SubmitError::Backend(e.to_string()))?;
        Ok(())
    })
    .unwrap();
    assert_eq!(*sent.borrow(), r#"{"years":3,"rate":1.5}"#);
}

struct CountWarnings(Arc<AtomicUsize>);

impl<S: tracing::Subscriber> Layer<S> for CountWarnings {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == tracing::Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[test]
fn rejection_for_unknown_field_is_logged() {
    let warnings = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(CountWarnings(Arc::clone(&warnings)));

    tracing::subscriber::with_default(subscriber, || {
        let form = FormEngine::new([("email", "a@b.com")]);
        let _ = form.submit(|_| {
            Err(SubmitError::Rejected(vec![
                FieldError::new("email", "nope"),
                FieldError::new("captcha", "expired"),
            ]))
        });
        assert_eq!(form.error("email").as_deref(), Some("nope"));
    });

    assert_eq!(warnings.load(Ordering::SeqCst), 1);
}
