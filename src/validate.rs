use indexmap::IndexMap;
use serde_json::Value;

use crate::state::{FieldValue, FormState};

/// A single validation rule.
///
/// Receives the field's current value and the whole form state, so rules
/// can look across fields. `None` passes; `Some(message)` fails with
/// that message.
pub type FieldValidator = Box<dyn Fn(&FieldValue, &FormState) -> Option<String> + Send + Sync>;

/// Validation rules keyed by field name.
///
/// Order is preserved twice over: fields run in the order they first
/// received a rule, and a field's rules run in the order they were
/// added, the first failure winning.
#[derive(Default)]
pub struct FieldValidators {
    rules: IndexMap<String, Vec<FieldValidator>>,
}

impl FieldValidators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<V>(&mut self, field: impl Into<String>, validator: V)
    where
        V: Fn(&FieldValue, &FormState) -> Option<String> + Send + Sync + 'static,
    {
        self.rules
            .entry(field.into())
            .or_default()
            .push(Box::new(validator));
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Fields with at least one rule, in the order they first got one.
    pub fn fields(&self) -> impl Iterator<Item = &String> {
        self.rules.keys()
    }

    /// Run one field's rules against a value; first failure wins.
    pub fn run(&self, field: &str, value: &FieldValue, form: &FormState) -> Option<String> {
        self.rules
            .get(field)?
            .iter()
            .find_map(|rule| rule(value, form))
    }
}

/// Stock rule: fails when the value is `Null` or the empty string.
///
/// `false` and `0` count as present; only a missing answer fails.
pub fn required(
    display_name: &str,
) -> impl Fn(&FieldValue, &FormState) -> Option<String> + Send + Sync + 'static {
    let message = format!("{display_name} is required");
    move |value: &FieldValue, _: &FormState| match value {
        Value::Null => Some(message.clone()),
        Value::String(s) if s.is_empty() => Some(message.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_rejects_null_and_empty_string() {
        let rule = required("Name");
        let form = FormState::default();

        assert_eq!(rule(&Value::Null, &form).as_deref(), Some("Name is required"));
        assert_eq!(rule(&json!(""), &form).as_deref(), Some("Name is required"));
        assert_eq!(rule(&json!("John"), &form), None);
        assert_eq!(rule(&json!(false), &form), None);
        assert_eq!(rule(&json!(0), &form), None);
    }

    #[test]
    fn first_failing_rule_wins() {
        let mut validators = FieldValidators::new();
        validators.add("age", |value: &FieldValue, _: &FormState| {
            value.is_null().then(|| "missing".to_string())
        });
        validators.add("age", |value: &FieldValue, _: &FormState| {
            (!value.is_number()).then(|| "not a number".to_string())
        });

        let form = FormState::default();
        assert_eq!(validators.run("age", &Value::Null, &form).as_deref(), Some("missing"));
        assert_eq!(
            validators.run("age", &json!("nan"), &form).as_deref(),
            Some("not a number")
        );
        assert_eq!(validators.run("age", &json!(30), &form), None);
    }

    #[test]
    fn fields_without_rules_always_pass() {
        let validators = FieldValidators::new();
        assert!(validators.is_empty());
        assert_eq!(
            validators.run("anything", &json!("x"), &FormState::default()),
            None
        );
    }
}
