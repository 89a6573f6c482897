//! Synchronous field and form checks.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use formcheck_validator::{
    CheckError, FieldConfig, FieldDescriptor, FieldResult, FormCheck, Outcome, Validator, Verdict,
};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::support::init_tracing;

/// Validator with a `count` rule that records how often it ran and fails.
fn counting_validator() -> (Validator, Arc<AtomicUsize>) {
    let mut validator = Validator::default();
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    validator.add_rule_fn("count", move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
        Ok(Outcome::fail("counted"))
    });
    (validator, calls)
}

#[test]
fn first_failure_short_circuits() {
    init_tracing();
    let (validator, calls) = counting_validator();
    let field = FieldDescriptor::new("nick", "a")
        .with_rule("minlength", 3usize)
        .with_rule("count", true);

    let verdict = validator.check_field(&field).unwrap().ready().unwrap();
    assert_eq!(verdict.message(), "please enter at least 3 characters");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn rules_run_in_declared_order() {
    let (validator, _) = counting_validator();
    let field = FieldDescriptor::new("nick", "a")
        .with_rule("count", true)
        .with_rule("minlength", 3usize);

    let verdict = validator.check_field(&field).unwrap().ready().unwrap();
    assert_eq!(verdict.message(), "counted");
}

#[test]
fn empty_value_only_runs_required() {
    let (validator, calls) = counting_validator();
    let field = FieldDescriptor::new("nick", "  ")
        .with_rule("count", true)
        .with_rule("emailType", true);

    let verdict = validator.check_field(&field).unwrap().ready().unwrap();
    assert!(verdict.is_valid());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn unknown_rule_is_an_error() {
    let validator = Validator::default();
    let field = FieldDescriptor::new("zip", "12345").with_rule("zipType", true);
    let err = validator.check_field(&field).unwrap_err();
    assert_eq!(err.to_string(), "unknown validation rule `zipType`");
    assert!(err.is_configuration());
}

#[test]
fn unknown_rule_is_skipped_for_empty_values() {
    let validator = Validator::default();
    let field = FieldDescriptor::new("zip", "").with_rule("zipType", true);
    assert!(validator.check_field(&field).unwrap().ready().unwrap().is_valid());
}

#[test]
fn bad_length_parameter_is_an_error() {
    let validator = Validator::default();
    let field = FieldDescriptor::new("nick", "abc").with_rule("minlength", "three");
    let err = validator.check_field(&field).unwrap_err();
    assert!(matches!(err, CheckError::InvalidParameter { ref rule, .. } if rule == "minlength"));
}

#[test]
fn repeated_checks_agree() {
    let validator = Validator::default();
    let field = FieldConfig::new()
        .required()
        .type_hint("email")
        .into_descriptor("email", "ada@example");

    let first = validator.check_field(&field).unwrap().ready().unwrap();
    let stored = validator.results().get("email");
    let second = validator.check_field(&field).unwrap().ready().unwrap();
    assert_eq!(first, second);
    assert_eq!(validator.results().get("email"), stored);
}

#[test]
fn verdict_is_recorded() {
    let validator = Validator::default();
    let field = FieldConfig::new().required().into_descriptor("name", "");
    assert!(!validator.check_field(&field).unwrap().is_pending());
    assert_eq!(
        validator.results().get("name"),
        Some(FieldResult {
            valid: Some(false),
            message: "please fill in this field".into(),
        })
    );

    let field = FieldDescriptor {
        value: json!("Ada"),
        ..field
    };
    assert!(!validator.check_field(&field).unwrap().is_pending());
    assert_eq!(
        validator.results().get("name"),
        Some(FieldResult {
            valid: Some(true),
            message: String::new(),
        })
    );
}

#[test]
fn forced_field_is_checked_while_hidden() {
    let validator = Validator::default();
    let field = FieldConfig::new()
        .required()
        .force_check()
        .into_descriptor("terms", false)
        .with_relevant(false);

    let verdict = validator.check_field(&field).unwrap().ready().unwrap();
    assert!(!verdict.is_valid());
}

#[test]
fn silent_failure_has_no_message() {
    let mut validator = Validator::default();
    validator.add_rule_fn("never", |_| Ok(Verdict::silent_fail().into()));
    let field = FieldDescriptor::new("x", "y").with_rule("never", true);

    let verdict = validator.check_field(&field).unwrap().ready().unwrap();
    assert!(!verdict.is_valid());
    assert_eq!(validator.results().get("x").unwrap().message, "");
}

#[test]
fn custom_rule_sees_parameter() {
    let mut validator = Validator::default();
    validator.add_rule_fn("equals", |call| {
        let expected = call.param().value().unwrap_or_default();
        Ok(Verdict::check(call.text() == expected, || format!("must equal {expected}")).into())
    });
    let field = FieldDescriptor::new("confirm", "secret").with_rule("equals", "secrets");

    let verdict = validator.check_field(&field).unwrap().ready().unwrap();
    assert_eq!(verdict.message(), "must equal secrets");
}

// ============================================================================
// FORMS
// ============================================================================

fn required(id: &str, value: &str) -> FieldDescriptor {
    FieldConfig::new().required().into_descriptor(id, value)
}

#[test]
fn all_valid_form() {
    let validator = Validator::default();
    let check = validator
        .check_form(&[required("a", "x"), required("b", "y")])
        .unwrap();
    assert_eq!(check.is_valid(), Some(true));
    assert_eq!(validator.results().form_valid(), Some(true));
}

#[test]
fn empty_form_is_valid() {
    let validator = Validator::default();
    assert!(matches!(validator.check_form(&[]).unwrap(), FormCheck::Valid));
}

#[test]
fn hidden_fields_do_not_block_the_form() {
    let validator = Validator::default();
    let fields = [required("a", "x"), required("b", "").with_relevant(false)];
    assert_eq!(validator.check_form(&fields).unwrap().is_valid(), Some(true));
}

#[test]
fn form_error_aborts_check() {
    let validator = Validator::default();
    let fields = [
        required("a", ""),
        FieldDescriptor::new("b", "x").with_rule("nope", true),
    ];
    let err = validator.check_form(&fields).unwrap_err();
    assert!(matches!(err, CheckError::UnknownRule { ref name } if name == "nope"));
    // Fields ahead of the faulty one were already recorded.
    assert_eq!(validator.results().get("a").unwrap().valid, Some(false));
    assert_eq!(validator.results().get("b"), None);
}

#[tokio::test]
async fn invalid_form_resolves_false() {
    let validator = Validator::default();
    let check = validator
        .check_form(&[required("a", ""), required("b", "y")])
        .unwrap();
    assert_eq!(check.first_invalid(), Some("a"));
    assert!(!check.resolve().await.unwrap());
}
