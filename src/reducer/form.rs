use indexmap::IndexMap;
use tracing::warn;

use super::field::reduce_field;
use crate::action::FormAction;
use crate::state::{FieldValue, FormState};

/// Reduce one form's slice of the tree.
///
/// `InitForm` is the only action that applies without existing state.
/// Field-scoped actions route through [`reduce_field`]; the entry is
/// deleted here once its registration count reaches zero.
pub fn reduce_form(state: Option<&FormState>, action: &FormAction) -> FormState {
    let Some(current) = state else {
        if let FormAction::InitForm { form } = action {
            return FormState {
                name: form.clone(),
                ..FormState::default()
            };
        }
        warn!(
            form = %action.form_name(),
            action = %action,
            "action for a form that has not been initialized"
        );
        return FormState {
            name: action.form_name().to_string(),
            ..FormState::default()
        };
    };

    match action {
        FormAction::InitForm { form } => FormState {
            name: form.clone(),
            ..FormState::default()
        },

        FormAction::ResetForm { .. } => {
            let mut fields = IndexMap::with_capacity(current.fields.len());
            for (name, field) in &current.fields {
                let seed = current
                    .initial_values
                    .as_ref()
                    .and_then(|values| values.get(name))
                    .cloned()
                    .unwrap_or(FieldValue::Null);
                let reset = FormAction::ResetField {
                    form: current.name.clone(),
                    field: name.clone(),
                    value: seed,
                };
                if let Some(next) = reduce_field(Some(field), &reset) {
                    fields.insert(name.clone(), next);
                }
            }
            FormState {
                name: current.name.clone(),
                fields,
                initial_values: current.initial_values.clone(),
                invalid: false,
            }
        }

        FormAction::SetInitialValues { form, values } => {
            let mut next = current.clone();
            for (name, value) in values {
                // Controls may attach after initial values arrive; their
                // bindings pick the value up at attach time instead.
                if !next.fields.contains_key(name) {
                    continue;
                }
                let change = FormAction::ChangeField {
                    form: form.clone(),
                    field: name.clone(),
                    value: value.clone(),
                };
                if let Some(updated) = reduce_field(next.fields.get(name), &change) {
                    next.fields.insert(name.clone(), updated);
                }
            }
            // Stored verbatim, skipped keys included.
            next.initial_values = Some(values.clone());
            next
        }

        FormAction::UpdateFieldErrors { errors, .. } => {
            let mut next = current.clone();
            for (name, field) in next.fields.iter_mut() {
                field.error = errors.get(name).cloned();
            }
            next.invalid = next.fields.values().any(|field| field.has_error());
            next
        }

        FormAction::UnregisterField { field, .. } => {
            let mut next = current.clone();
            let count = next.fields.get(field).map(|f| f.count);
            match count {
                Some(count) if count <= 1 => {
                    next.fields.shift_remove(field);
                }
                _ => {
                    if let Some(updated) = reduce_field(next.fields.get(field), action) {
                        next.fields.insert(field.clone(), updated);
                    }
                }
            }
            next
        }

        FormAction::FocusField { field, .. }
        | FormAction::BlurField { field, .. }
        | FormAction::RegisterField { field, .. }
        | FormAction::ChangeField { field, .. } => {
            let mut next = current.clone();
            if let Some(updated) = reduce_field(next.fields.get(field), action) {
                next.fields.insert(field.clone(), updated);
            }
            next
        }

        // `ResetField` only has meaning inside the `ResetForm` expansion
        // above; removal of the whole form happens in the root reducer.
        FormAction::ResetField { .. } | FormAction::DestroyForm { .. } => current.clone(),
    }
}
