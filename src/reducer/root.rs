use tracing::warn;

use super::form::reduce_form;
use super::Reducer;
use crate::action::FormAction;
use crate::state::RootFormsState;

/// Routes every action to the form it names.
///
/// `InitForm` creates the entry, `DestroyForm` removes it; everything
/// else requires the form to be tracked already and is otherwise a
/// warned no-op, so no action sequence can panic or invent state.
pub struct RootReducer;

impl Reducer for RootReducer {
    type State = RootFormsState;
    type Action = FormAction;

    fn reduce(mut state: Self::State, action: Self::Action) -> Self::State {
        match &action {
            FormAction::DestroyForm { form } => {
                if state.remove(form).is_none() {
                    warn!(form = %form, "destroy for a form that is not tracked");
                }
            }
            _ => {
                let tracked = state.form(action.form_name()).is_some();
                if !tracked && !matches!(action, FormAction::InitForm { .. }) {
                    warn!(
                        form = %action.form_name(),
                        action = %action,
                        "action for a form that is not tracked"
                    );
                    return state;
                }
                let next = reduce_form(state.form(action.form_name()), &action);
                state.insert(next);
            }
        }
        state
    }
}
