//! Integration tests for the listener installer and handler
//!
//! Everything runs against the in-memory document, driving fields the way
//! a browser would: typing fires `input`, leaving fires `blur`, and
//! `checkValidity()` fires `invalid`.

use field_feedback_core::memory::{FieldSpec, MemoryDocument, MemoryField};
use field_feedback_core::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

const INPUT_CLASS: &str = "form-field__input";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn state_classes(field: &MemoryField) -> Vec<String> {
    field
        .classes()
        .into_iter()
        .filter(|c| c != INPUT_CLASS)
        .collect()
}

fn install(doc: &MemoryDocument, policy: ValidationPolicy) -> Installation<memory::MemoryListener> {
    let config = FeedbackConfig::default().with_policy(policy);
    install_validation(doc, &config).unwrap()
}

#[test]
fn test_three_listeners_per_matching_field() {
    init_tracing();
    let doc = MemoryDocument::new();
    let name = doc.add_field(FieldSpec::input("name").class(INPUT_CLASS));
    let email = doc.add_field(FieldSpec::input("email").class(INPUT_CLASS));
    let other = doc.add_field(FieldSpec::input("search").class("search-box"));

    let installation = install(&doc, ValidationPolicy::default());

    assert_eq!(installation.len(), 6);
    assert_eq!(installation.fields(), 2);
    for field in [&name, &email] {
        assert_eq!(
            doc.listeners_on(field),
            vec![FieldEvent::Input, FieldEvent::Blur, FieldEvent::Invalid]
        );
    }
    assert!(doc.listeners_on(&other).is_empty());
}

#[test]
fn test_no_matching_fields() {
    init_tracing();
    let doc = MemoryDocument::new();
    doc.add_field(FieldSpec::input("search").class("search-box"));

    let installation = install(&doc, ValidationPolicy::default());

    assert!(installation.is_empty());
    assert_eq!(installation.fields(), 0);
    assert_eq!(doc.listener_count(), 0);
}

#[test]
fn test_missing_reference_is_skipped() {
    init_tracing();
    let doc = MemoryDocument::new();
    doc.add_missing();
    let field = doc.add_field(FieldSpec::input("name").class(INPUT_CLASS).required());

    let installation = install(&doc, ValidationPolicy::default());

    assert_eq!(installation.skipped(), 1);
    assert_eq!(installation.fields(), 1);
    assert_eq!(installation.len(), 3);
    assert_eq!(doc.diagnostics().len(), 1);

    doc.dispatch(&field, FieldEvent::Blur);
    assert!(field.has("invalid"));
}

#[test]
fn test_dispose_removes_listeners() {
    init_tracing();
    let doc = MemoryDocument::new();
    let field = doc.add_field(FieldSpec::input("name").class(INPUT_CLASS).required());

    let installation = install(&doc, ValidationPolicy::default());
    assert_eq!(doc.listener_count(), 3);

    installation.dispose();
    assert_eq!(doc.listener_count(), 0);

    assert_eq!(doc.dispatch(&field, FieldEvent::Blur), 0);
    assert!(state_classes(&field).is_empty());
}

#[test]
fn test_invalid_selector_is_an_error() {
    let doc = MemoryDocument::new();
    let config = FeedbackConfig::default().with_selector("form > input");
    let err = install_validation(&doc, &config).unwrap_err();
    assert!(matches!(err, FeedbackError::Selector { .. }));
}

#[test]
fn test_invalid_config_is_an_error() {
    let doc = MemoryDocument::new();
    let config = FeedbackConfig::default().with_events([]);
    let err = install_validation(&doc, &config).unwrap_err();
    assert!(matches!(err, FeedbackError::Config(_)));
}

#[test]
fn test_failed_registration_rolls_back() {
    init_tracing();
    let doc = MemoryDocument::new();
    let first = doc.add_field(FieldSpec::input("a").class(INPUT_CLASS).required());
    let second = doc.add_field(FieldSpec::input("b").class(INPUT_CLASS).required());
    doc.fail_listen_after(4);

    let err = install_validation(&doc, &FeedbackConfig::default()).unwrap_err();

    assert!(matches!(err, FeedbackError::Listener { ref event, .. } if event == "blur"));
    assert_eq!(doc.listener_count(), 0);
    for field in [&first, &second] {
        assert_eq!(doc.dispatch(field, FieldEvent::Blur), 0);
        assert!(state_classes(field).is_empty());
    }
}

#[test]
fn test_class_list_failure_is_contained() {
    init_tracing();
    let doc = MemoryDocument::new();
    let field = doc.add_field(FieldSpec::input("name").class(INPUT_CLASS).required());
    let _installation = install(&doc, ValidationPolicy::default());

    field.reject_class_updates(true);
    assert_eq!(doc.dispatch(&field, FieldEvent::Blur), 1);
    assert!(state_classes(&field).is_empty());

    field.reject_class_updates(false);
    doc.dispatch(&field, FieldEvent::Blur);
    assert_eq!(state_classes(&field), vec!["invalid"]);
}

#[test]
fn test_configured_events_only() {
    let doc = MemoryDocument::new();
    let field = doc.add_field(FieldSpec::input("name").class(INPUT_CLASS).required());
    let config = FeedbackConfig::default().with_events([FieldEvent::Blur]);

    let _installation = install_validation(&doc, &config).unwrap();

    assert_eq!(doc.type_value(&field, ""), 0);
    assert!(state_classes(&field).is_empty());
    assert_eq!(doc.dispatch(&field, FieldEvent::Blur), 1);
    assert!(field.has("invalid"));
}

#[rstest]
#[case::lenient(ValidationPolicy::lenient(), vec![])]
#[case::strict(ValidationPolicy::strict(), vec!["valid"])]
fn test_optional_empty_field(#[case] policy: ValidationPolicy, #[case] expected: Vec<&str>) {
    let doc = MemoryDocument::new();
    let field = doc.add_field(FieldSpec::input("nickname").class(INPUT_CLASS));
    let _installation = install(&doc, policy);

    doc.dispatch(&field, FieldEvent::Blur);

    assert_eq!(state_classes(&field), expected);
}

#[rstest]
#[case::lenient(ValidationPolicy::lenient(), "invalid")]
#[case::strict(ValidationPolicy::strict(), "valueMissing")]
fn test_required_empty_field(#[case] policy: ValidationPolicy, #[case] expected: &str) {
    let doc = MemoryDocument::new();
    let field = doc.add_field(FieldSpec::input("name").class(INPUT_CLASS).required());
    let _installation = install(&doc, policy);

    doc.dispatch(&field, FieldEvent::Blur);

    assert_eq!(state_classes(&field), vec![expected]);
}

#[rstest]
#[case::lenient(ValidationPolicy::lenient())]
#[case::strict(ValidationPolicy::strict())]
fn test_pattern_mismatch_then_fixed(#[case] policy: ValidationPolicy) {
    let doc = MemoryDocument::new();
    let field = doc.add_field(
        FieldSpec::input("zip")
            .class(INPUT_CLASS)
            .required()
            .pattern("[0-9]{5}"),
    );
    let _installation = install(&doc, policy);

    doc.type_value(&field, "12a45");
    assert_eq!(state_classes(&field), vec!["invalid"]);

    doc.type_value(&field, "12345");
    assert_eq!(state_classes(&field), vec!["valid"]);
    assert!(!field.has("invalid"));
    assert!(!field.has("valueMissing"));
}

#[test]
fn test_check_validity_fires_invalid() {
    let doc = MemoryDocument::new();
    let field = doc.add_field(
        FieldSpec::input("email")
            .class(INPUT_CLASS)
            .input_type("email")
            .value("not-an-email"),
    );
    let _installation = install(&doc, ValidationPolicy::strict());

    assert!(!doc.check_validity(&field));
    assert_eq!(state_classes(&field), vec!["invalid"]);

    field.set_value("user@example.com");
    assert!(doc.check_validity(&field));
    // a passing check fires nothing, so the stale class stays until the next event
    assert_eq!(state_classes(&field), vec!["invalid"]);
    doc.dispatch(&field, FieldEvent::Blur);
    assert_eq!(state_classes(&field), vec!["valid"]);
}

#[test]
fn test_handler_is_idempotent() {
    let doc = MemoryDocument::new();
    let field = doc.add_field(FieldSpec::input("name").class(INPUT_CLASS).required());
    let _installation = install(&doc, ValidationPolicy::strict());

    doc.dispatch(&field, FieldEvent::Blur);
    let first = field.classes();
    doc.dispatch(&field, FieldEvent::Blur);

    assert_eq!(field.classes(), first);
    assert_eq!(state_classes(&field), vec!["valueMissing"]);
}

#[test]
fn test_at_most_one_state_class() {
    let doc = MemoryDocument::new();
    let field = doc.add_field(
        FieldSpec::input("code")
            .class(INPUT_CLASS)
            .required()
            .min_length(3)
            .max_length(5),
    );
    let _installation = install(&doc, ValidationPolicy::strict());
    let classes = FeedbackClasses::default();

    for value in ["", "ab", "abc", "abcdef", "", "abcd"] {
        doc.type_value(&field, value);
        let present = classes.iter().filter(|c| field.has(c)).count();
        assert_eq!(present, 1, "value {:?}", value);
    }
}

#[test]
fn test_custom_class_names() {
    let doc = MemoryDocument::new();
    let field = doc.add_field(FieldSpec::input("name").class(INPUT_CLASS).required());
    let config = FeedbackConfig::default()
        .with_policy(ValidationPolicy::strict())
        .with_classes(FeedbackClasses {
            valid: "is-valid".into(),
            invalid: "is-invalid".into(),
            value_missing: "is-missing".into(),
        });
    let _installation = install_validation(&doc, &config).unwrap();

    doc.dispatch(&field, FieldEvent::Blur);
    assert_eq!(state_classes(&field), vec!["is-missing"]);

    doc.type_value(&field, "Ada");
    assert_eq!(state_classes(&field), vec!["is-valid"]);
}

#[test]
fn test_fields_are_independent() {
    let doc = MemoryDocument::new();
    let a = doc.add_field(FieldSpec::input("a").class(INPUT_CLASS).required());
    let b = doc.add_field(FieldSpec::input("b").class(INPUT_CLASS).required());
    let _installation = install(&doc, ValidationPolicy::default());

    doc.type_value(&a, "filled");

    assert_eq!(state_classes(&a), vec!["valid"]);
    assert!(state_classes(&b).is_empty());
}

#[test]
fn test_config_from_json_drives_installer() {
    let doc = MemoryDocument::new();
    let field = doc.add_field(FieldSpec::textarea("bio").class("bio").required());
    let config = FeedbackConfig::from_json(
        r#"{"selector": "textarea.bio", "policy": {"markValueMissing": true}}"#,
    )
    .unwrap();
    let installation = install_validation(&doc, &config).unwrap();
    assert_eq!(installation.len(), 3);

    doc.dispatch(&field, FieldEvent::Invalid);
    assert_eq!(field.classes(), vec!["bio", "valueMissing"]);
}
