//! Read-only queries over the state tree.

use indexmap::IndexMap;

use crate::error::FormStateError;
use crate::state::{FieldState, FieldValue, FormState, RootFormsState};

fn lookup<'a>(state: &'a RootFormsState, form: &str) -> Result<&'a FormState, FormStateError> {
    state.form(form).ok_or_else(|| FormStateError::FormNotFound {
        form: form.to_string(),
    })
}

/// Current value of every registered field, in registration order.
pub fn form_values(
    state: &RootFormsState,
    form: &str,
) -> Result<IndexMap<String, FieldValue>, FormStateError> {
    let form = lookup(state, form)?;
    Ok(form
        .fields
        .iter()
        .map(|(name, field)| (name.clone(), field.value.clone()))
        .collect())
}

/// Fields currently carrying an error, in registration order.
pub fn field_errors(
    state: &RootFormsState,
    form: &str,
) -> Result<IndexMap<String, String>, FormStateError> {
    let form = lookup(state, form)?;
    Ok(form
        .fields
        .iter()
        .filter_map(|(name, field)| {
            field
                .error
                .as_ref()
                .filter(|error| !error.is_empty())
                .map(|error| (name.clone(), error.clone()))
        })
        .collect())
}

/// One field's full state, for hosts rendering touched/error flags.
pub fn field_state<'a>(
    state: &'a RootFormsState,
    form: &str,
    field: &str,
) -> Result<&'a FieldState, FormStateError> {
    let form_state = lookup(state, form)?;
    form_state
        .field(field)
        .ok_or_else(|| FormStateError::FieldNotRegistered {
            form: form.to_string(),
            field: field.to_string(),
        })
}

/// Whether every field still holds its initial value.
///
/// A form that never received initial values is not pristine.
pub fn is_form_pristine(state: &RootFormsState, form: &str) -> Result<bool, FormStateError> {
    let form = lookup(state, form)?;
    let Some(initial) = &form.initial_values else {
        return Ok(false);
    };
    Ok(form.fields.iter().all(|(name, field)| match initial.get(name) {
        Some(seed) => field.value == *seed,
        None => field.value.is_null(),
    }))
}
