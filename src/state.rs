use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::reducer::StoreState;

/// Value held by a form field.
///
/// Controls produce whatever JSON value fits them: strings from text
/// inputs, booleans from checkboxes, anything from custom controls.
/// `Value::Null` is the unset value.
pub type FieldValue = Value;

/// JavaScript-style truthiness over field values.
///
/// `Null`, `false`, `""` and `0` are falsy; everything else is truthy.
pub fn is_truthy(value: &FieldValue) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Tracked state of a single registered field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldState {
    /// Current value as last reduced from a `ChangeField`.
    pub value: FieldValue,
    /// Whether the bound element currently has focus.
    pub focus: bool,
    /// Set on the first blur; only a field reset clears it.
    pub touched: bool,
    /// Validation error, if any.
    pub error: Option<String>,
    /// Number of attached bindings sharing this field name.
    pub count: u32,
}

impl FieldState {
    /// True when the field carries a non-empty validation error.
    pub fn has_error(&self) -> bool {
        self.error.as_deref().is_some_and(|msg| !msg.is_empty())
    }
}

/// State of one tracked form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormState {
    pub name: String,
    /// Registered fields in registration order.
    pub fields: IndexMap<String, FieldState>,
    /// Last `SetInitialValues` payload, stored verbatim. `None` until
    /// initial values have been provided at least once.
    pub initial_values: Option<IndexMap<String, FieldValue>>,
    /// True when any field carries an error.
    pub invalid: bool,
}

impl FormState {
    pub fn field(&self, name: &str) -> Option<&FieldState> {
        self.fields.get(name)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}

/// Root of the state tree: every tracked form, keyed by form name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RootFormsState {
    forms: IndexMap<String, FormState>,
}

impl RootFormsState {
    pub fn form(&self, name: &str) -> Option<&FormState> {
        self.forms.get(name)
    }

    pub fn forms(&self) -> &IndexMap<String, FormState> {
        &self.forms
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub(crate) fn insert(&mut self, state: FormState) {
        self.forms.insert(state.name.clone(), state);
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<FormState> {
        self.forms.shift_remove(name)
    }
}

impl StoreState for RootFormsState {}
