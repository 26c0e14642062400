use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::reducer::StoreAction;
use crate::state::FieldValue;

/// Every mutation of form state, as one closed set.
///
/// Serializes to the `{"type": "...", "payload": {...}}` wire shape, with
/// the variant name in SCREAMING_SNAKE_CASE as the type tag. Anything a
/// host cannot express through these variants is by definition not a
/// form-state mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormAction {
    /// Start tracking a form under an empty field map.
    InitForm { form: String },
    /// Reset every field to its initial value and clear errors.
    ResetForm { form: String },
    /// Stop tracking a form entirely.
    DestroyForm { form: String },
    /// An element gained focus.
    FocusField { form: String, field: String },
    /// An element lost focus; marks the field touched.
    BlurField { form: String, field: String },
    /// A binding attached to the field; increments its count.
    RegisterField { form: String, field: String },
    /// A binding detached from the field; decrements its count.
    UnregisterField { form: String, field: String },
    /// The user edited the field to a new value.
    ChangeField {
        form: String,
        field: String,
        value: FieldValue,
    },
    /// Restore one field to the given value, clearing focus/touched/error.
    /// Minted by the form reducer while reducing `ResetForm`, one per field.
    ResetField {
        form: String,
        field: String,
        value: FieldValue,
    },
    /// Replace the error of every registered field from this map.
    UpdateFieldErrors {
        form: String,
        errors: IndexMap<String, String>,
    },
    /// Seed registered fields with values and remember the full payload.
    SetInitialValues {
        form: String,
        values: IndexMap<String, FieldValue>,
    },
}

impl FormAction {
    /// Wire tag of this action.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InitForm { .. } => "INIT_FORM",
            Self::ResetForm { .. } => "RESET_FORM",
            Self::DestroyForm { .. } => "DESTROY_FORM",
            Self::FocusField { .. } => "FOCUS_FIELD",
            Self::BlurField { .. } => "BLUR_FIELD",
            Self::RegisterField { .. } => "REGISTER_FIELD",
            Self::UnregisterField { .. } => "UNREGISTER_FIELD",
            Self::ChangeField { .. } => "CHANGE_FIELD",
            Self::ResetField { .. } => "RESET_FIELD",
            Self::UpdateFieldErrors { .. } => "UPDATE_FIELD_ERRORS",
            Self::SetInitialValues { .. } => "SET_INITIAL_VALUES",
        }
    }

    /// Name of the form this action targets.
    pub fn form_name(&self) -> &str {
        match self {
            Self::InitForm { form }
            | Self::ResetForm { form }
            | Self::DestroyForm { form }
            | Self::FocusField { form, .. }
            | Self::BlurField { form, .. }
            | Self::RegisterField { form, .. }
            | Self::UnregisterField { form, .. }
            | Self::ChangeField { form, .. }
            | Self::ResetField { form, .. }
            | Self::UpdateFieldErrors { form, .. }
            | Self::SetInitialValues { form, .. } => form,
        }
    }

    /// Field this action targets, for field-scoped actions.
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Self::FocusField { field, .. }
            | Self::BlurField { field, .. }
            | Self::RegisterField { field, .. }
            | Self::UnregisterField { field, .. }
            | Self::ChangeField { field, .. }
            | Self::ResetField { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl fmt::Display for FormAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

impl StoreAction for FormAction {}

/// Action creators bound to one form name.
///
/// Bindings and host code mint their dispatches through this so the form
/// name is spelled exactly once. Cheap to clone.
#[derive(Debug, Clone)]
pub struct FormActions {
    form: String,
}

impl FormActions {
    pub fn new(form: impl Into<String>) -> Self {
        Self { form: form.into() }
    }

    pub fn form_name(&self) -> &str {
        &self.form
    }

    pub fn init(&self) -> FormAction {
        FormAction::InitForm {
            form: self.form.clone(),
        }
    }

    pub fn reset(&self) -> FormAction {
        FormAction::ResetForm {
            form: self.form.clone(),
        }
    }

    pub fn destroy(&self) -> FormAction {
        FormAction::DestroyForm {
            form: self.form.clone(),
        }
    }

    pub fn focus(&self, field: impl Into<String>) -> FormAction {
        FormAction::FocusField {
            form: self.form.clone(),
            field: field.into(),
        }
    }

    pub fn blur(&self, field: impl Into<String>) -> FormAction {
        FormAction::BlurField {
            form: self.form.clone(),
            field: field.into(),
        }
    }

    pub fn register(&self, field: impl Into<String>) -> FormAction {
        FormAction::RegisterField {
            form: self.form.clone(),
            field: field.into(),
        }
    }

    pub fn unregister(&self, field: impl Into<String>) -> FormAction {
        FormAction::UnregisterField {
            form: self.form.clone(),
            field: field.into(),
        }
    }

    pub fn change(&self, field: impl Into<String>, value: FieldValue) -> FormAction {
        FormAction::ChangeField {
            form: self.form.clone(),
            field: field.into(),
            value,
        }
    }

    pub fn update_errors(&self, errors: IndexMap<String, String>) -> FormAction {
        FormAction::UpdateFieldErrors {
            form: self.form.clone(),
            errors,
        }
    }

    pub fn set_initial_values(&self, values: IndexMap<String, FieldValue>) -> FormAction {
        FormAction::SetInitialValues {
            form: self.form.clone(),
            values,
        }
    }
}
