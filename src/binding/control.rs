use serde_json::Value;

use super::element::InputElement;
use crate::state::{is_truthy, FieldValue};

/// How a control reads user edits and renders store values.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    /// Free-form control: the element's value is the field value.
    Text,
    /// Two-state control reporting through the checked flag.
    Checkbox,
    /// One of a group sharing a field name; carries the value this
    /// element stands for.
    Radio { own_value: FieldValue },
}

impl ControlKind {
    /// Candidate field value for an edit event, if the event produces one.
    ///
    /// An unchecked radio produces nothing: the sibling that became
    /// checked reports for the group.
    pub fn read(&self, element: &dyn InputElement) -> Option<FieldValue> {
        match self {
            Self::Text => Some(element.value()),
            Self::Checkbox => Some(Value::Bool(element.checked())),
            Self::Radio { own_value } => element.checked().then(|| own_value.clone()),
        }
    }

    /// Render a store value into the element.
    pub fn write(&self, element: &mut dyn InputElement, value: &FieldValue) {
        match self {
            Self::Text => {
                // An unset value renders as an empty box, not as "null".
                if value.is_null() {
                    element.set_value(&Value::String(String::new()));
                } else {
                    element.set_value(value);
                }
            }
            Self::Checkbox => element.set_checked(is_truthy(value)),
            Self::Radio { own_value } => element.set_checked(value == own_value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Widget {
        value: FieldValue,
        checked: bool,
    }

    impl Widget {
        fn new() -> Self {
            Self {
                value: Value::Null,
                checked: false,
            }
        }
    }

    impl InputElement for Widget {
        fn value(&self) -> FieldValue {
            self.value.clone()
        }
        fn set_value(&mut self, value: &FieldValue) {
            self.value = value.clone();
        }
        fn checked(&self) -> bool {
            self.checked
        }
        fn set_checked(&mut self, checked: bool) {
            self.checked = checked;
        }
    }

    #[test]
    fn text_renders_null_as_empty_string() {
        let mut widget = Widget::new();
        ControlKind::Text.write(&mut widget, &Value::Null);
        assert_eq!(widget.value, json!(""));

        ControlKind::Text.write(&mut widget, &json!("hello"));
        assert_eq!(widget.value, json!("hello"));
    }

    #[test]
    fn checkbox_reads_and_writes_checked() {
        let mut widget = Widget::new();
        widget.checked = true;
        assert_eq!(ControlKind::Checkbox.read(&widget), Some(json!(true)));

        ControlKind::Checkbox.write(&mut widget, &json!(false));
        assert!(!widget.checked);
        ControlKind::Checkbox.write(&mut widget, &json!("yes"));
        assert!(widget.checked);
    }

    #[test]
    fn radio_reports_only_when_checked() {
        let kind = ControlKind::Radio {
            own_value: json!("red"),
        };
        let mut widget = Widget::new();
        assert_eq!(kind.read(&widget), None);

        widget.checked = true;
        assert_eq!(kind.read(&widget), Some(json!("red")));

        kind.write(&mut widget, &json!("blue"));
        assert!(!widget.checked);
        kind.write(&mut widget, &json!("red"));
        assert!(widget.checked);
    }
}
