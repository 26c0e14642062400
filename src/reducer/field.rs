use tracing::warn;

use crate::action::FormAction;
use crate::state::FieldState;

/// Reduce one field's slice of the tree.
///
/// `None` means the field is not registered. `RegisterField` is the only
/// action that may create the entry; anything else against `None` is a
/// host bug, logged and ignored. Deleting the entry once the count drops
/// to zero is the form reducer's job.
pub fn reduce_field(state: Option<&FieldState>, action: &FormAction) -> Option<FieldState> {
    let Some(current) = state else {
        if matches!(action, FormAction::RegisterField { .. }) {
            return Some(FieldState {
                count: 1,
                ..FieldState::default()
            });
        }
        warn!(
            form = %action.form_name(),
            field = action.field_name().unwrap_or(""),
            action = %action,
            "tried to modify a field that has not been registered"
        );
        return None;
    };

    let next = match action {
        FormAction::RegisterField { .. } => FieldState {
            count: current.count + 1,
            ..current.clone()
        },
        FormAction::UnregisterField { .. } => FieldState {
            count: current.count.saturating_sub(1),
            ..current.clone()
        },
        FormAction::FocusField { .. } => FieldState {
            focus: true,
            ..current.clone()
        },
        FormAction::BlurField { .. } => FieldState {
            focus: false,
            touched: true,
            ..current.clone()
        },
        FormAction::ChangeField { value, .. } => FieldState {
            value: value.clone(),
            ..current.clone()
        },
        FormAction::ResetField { value, .. } => FieldState {
            value: value.clone(),
            count: current.count,
            ..FieldState::default()
        },
        _ => current.clone(),
    };
    Some(next)
}
