//! Binding declared inputs and reacting to value changes.

use formcheck_validator::{
    FieldResult, Form, InputDecl, Outcome, RuleRegistry, Validator, ValidatorConfig, Verdict,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn signup(validator: &Validator) -> Form {
    validator.bind([
        InputDecl::input("name", "text")
            .with_attribute("required", "")
            .with_attribute("maxlength", "20"),
        InputDecl::input("email", "email").with_attribute("required", ""),
        InputDecl::input("mobile", "text").with_attribute("data-type", "phone"),
        InputDecl::input("plan", "radio")
            .with_attribute("required", "")
            .with_attribute("value", "free"),
        InputDecl::input("plan", "radio")
            .with_attribute("required", "")
            .with_attribute("value", "pro"),
        InputDecl::input("age", "number")
            .with_attribute("min", "18")
            .with_attribute("max", "120"),
    ])
}

#[test]
fn bound_form_starts_unchecked() {
    let validator = Validator::default();
    let form = signup(&validator);

    assert_eq!(
        form.ids().collect::<Vec<_>>(),
        ["name", "email", "mobile", "plan", "age"]
    );
    assert_eq!(validator.results().len(), 5);
    assert_eq!(validator.results().get("plan"), Some(FieldResult::default()));
    assert_eq!(validator.results().form_valid(), None);
}

#[test]
fn change_checks_the_field() {
    let validator = Validator::default();
    let mut form = signup(&validator);

    let check = validator
        .on_change(&mut form, "mobile", "1234")
        .unwrap()
        .unwrap();
    assert_eq!(check.ready().unwrap().message(), "invalid phone format");
    assert_eq!(validator.results().get("mobile").unwrap().valid, Some(false));

    let cleared = validator.on_change(&mut form, "mobile", "").unwrap().unwrap();
    assert!(cleared.ready().unwrap().is_valid());
    assert_eq!(validator.results().get("mobile").unwrap().valid, Some(true));
}

#[test]
fn numeric_bounds_come_from_attributes() {
    let validator = Validator::default();
    let mut form = signup(&validator);

    let check = validator.on_change(&mut form, "age", json!(12)).unwrap().unwrap();
    assert_eq!(check.ready().unwrap().message(), "minimum value is 18");
}

#[test]
fn unselected_radio_group_asks_for_a_choice() {
    let validator = Validator::default();
    let mut form = signup(&validator);

    let check = validator.on_change(&mut form, "plan", json!(null)).unwrap().unwrap();
    assert_eq!(check.ready().unwrap().message(), "please select");
}

#[tokio::test]
async fn complete_form_is_valid() {
    let validator = Validator::default();
    let mut form = signup(&validator);
    form.set_value("name", "Ada");
    form.set_value("email", "ada@example.com");
    form.set_value("plan", "pro");
    form.set_value("age", 36);

    let check = validator.check_form(form.fields()).unwrap();
    assert_eq!(check.is_valid(), Some(true));
    assert!(check.await.unwrap());
    assert_eq!(validator.results().form_valid(), Some(true));
}

#[test]
fn hidden_section_is_skipped() {
    let validator = Validator::default();
    let mut form = signup(&validator);
    form.set_value("name", "Ada");
    form.set_value("plan", "free");
    form.set_relevant("email", false);

    let check = validator.check_form(form.fields()).unwrap();
    assert_eq!(check.is_valid(), Some(true));
    assert_eq!(validator.results().get("email").unwrap().valid, None);
}

#[test]
fn forced_attribute_checks_hidden_field() {
    let validator = Validator::default();
    let mut form = validator.bind([InputDecl::input("terms", "checkbox")
        .with_attribute("required", "")
        .with_attribute("force-valid", "")]);
    form.set_relevant("terms", false);

    let check = validator.check_form(form.fields()).unwrap();
    assert_eq!(check.first_invalid(), Some("terms"));
}

#[test]
fn registered_rules_bind_from_attributes() {
    let mut registry = RuleRegistry::with_builtins();
    registry.register_fn("zipType", |call| {
        let ok = call.text().len() == 5 && call.text().bytes().all(|b| b.is_ascii_digit());
        Ok(Verdict::check(ok, || "invalid zip code".into()).into())
    });
    registry.register_fn("notIn", |call| {
        let banned = call.param().value().unwrap_or_default();
        let ok = !banned.split(',').any(|word| word == call.text());
        Ok(if ok { Outcome::pass() } else { Outcome::fail("reserved") })
    });
    let validator = Validator::with_registry(registry, ValidatorConfig::default());
    let mut form = validator.bind([
        InputDecl::input("zip", "text").with_attribute("data-type", "zip"),
        InputDecl::input("login", "text").with_attribute("notIn", "admin,root"),
    ]);

    let zip = validator.on_change(&mut form, "zip", "1234").unwrap().unwrap();
    assert_eq!(zip.ready().unwrap().message(), "invalid zip code");
    let login = validator.on_change(&mut form, "login", "root").unwrap().unwrap();
    assert_eq!(login.ready().unwrap().message(), "reserved");
}

#[test]
fn shared_store_collects_several_validators() {
    let first = Validator::default();
    let second = Validator::default().with_store(first.results().clone());
    first.bind([InputDecl::input("a", "text")]);
    second.bind([InputDecl::input("b", "text")]);

    assert_eq!(
        first.results().snapshot().into_keys().collect::<Vec<_>>(),
        ["a", "b"]
    );
}

#[test]
fn config_from_json_drives_namespace() {
    let config = ValidatorConfig::from_json_str(r#"{ "namespace": "signup" }"#).unwrap();
    let validator = Validator::new(config);
    let mut events = validator.results().subscribe();
    let mut form = validator.bind([InputDecl::input("name", "text")]);

    assert!(validator.on_change(&mut form, "name", "Ada").unwrap().is_some());
    assert_eq!(events.try_recv().unwrap().namespace, "signup");
}
