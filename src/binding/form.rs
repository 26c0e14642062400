use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use tracing::debug;

use super::control::ControlKind;
use super::element::SharedElement;
use super::field::FieldBinding;
use crate::action::{FormAction, FormActions};
use crate::error::FormStateError;
use crate::selectors;
use crate::state::{FieldValue, FormState, RootFormsState};
use crate::store::{FormStore, Subscription};
use crate::validate::FieldValidators;

/// Declarative description of a form: its name, controls, initial
/// values and validators. Built by the host, consumed by
/// [`FormBinding::mount`].
pub struct FormConfig {
    name: String,
    controls: Vec<(String, ControlKind, SharedElement)>,
    initial_values: Option<IndexMap<String, FieldValue>>,
    validators: FieldValidators,
}

impl FormConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            controls: Vec::new(),
            initial_values: None,
            validators: FieldValidators::new(),
        }
    }

    /// Declare a control; attachment order is declaration order.
    pub fn control(
        mut self,
        field: impl Into<String>,
        kind: ControlKind,
        element: SharedElement,
    ) -> Self {
        self.controls.push((field.into(), kind, element));
        self
    }

    /// Seed one field's initial value.
    pub fn initial_value(mut self, field: impl Into<String>, value: FieldValue) -> Self {
        self.initial_values
            .get_or_insert_with(IndexMap::new)
            .insert(field.into(), value);
        self
    }

    /// Append a validation rule; per-field order is registration order.
    pub fn validator<V>(mut self, field: impl Into<String>, validator: V) -> Self
    where
        V: Fn(&FieldValue, &FormState) -> Option<String> + Send + Sync + 'static,
    {
        self.validators.add(field, validator);
        self
    }
}

/// Connects a whole form to the store.
///
/// Mounting dispatches the canonical sequence: `InitForm`, one
/// `RegisterField` per control in declaration order, then
/// `SetInitialValues` when initial values were configured. After the
/// mount sequence has reduced, the validator pass re-runs after every
/// value-changing action and dispatches `UpdateFieldErrors` only when
/// some field's error actually changed.
pub struct FormBinding {
    store: FormStore,
    actions: FormActions,
    fields: Vec<FieldBinding>,
    feed: Option<Subscription>,
    unmounted: bool,
}

impl FormBinding {
    pub fn mount(store: &FormStore, config: FormConfig) -> Self {
        let FormConfig {
            name,
            controls,
            initial_values,
            validators,
        } = config;
        let actions = FormActions::new(name);
        let validators = Arc::new(validators);

        // With no initial values there is no `SetInitialValues` to hang
        // the first validator pass on; it runs once the last declared
        // control has registered instead.
        let pending_registers = match (&initial_values, controls.len()) {
            (None, len) if len > 0 && !validators.is_empty() => {
                Arc::new(Mutex::new(Some(len)))
            }
            _ => Arc::new(Mutex::new(None)),
        };

        let feed = store.subscribe_actions({
            let store = store.clone();
            let actions = actions.clone();
            let validators = Arc::clone(&validators);
            let pending = Arc::clone(&pending_registers);
            move |action: &FormAction, state: &RootFormsState| {
                if action.form_name() != actions.form_name() {
                    return;
                }
                match action {
                    FormAction::RegisterField { .. } => {
                        let mut pending = pending.lock();
                        let Some(left) = pending.as_mut() else {
                            return;
                        };
                        *left -= 1;
                        if *left == 0 {
                            *pending = None;
                            drop(pending);
                            run_validator_pass(&store, &actions, &validators, state);
                        }
                    }
                    FormAction::InitForm { .. }
                    | FormAction::ResetForm { .. }
                    | FormAction::ChangeField { .. }
                    | FormAction::SetInitialValues { .. } => {
                        run_validator_pass(&store, &actions, &validators, state);
                    }
                    _ => {}
                }
            }
        });

        debug!(form = %actions.form_name(), controls = controls.len(), "mounting form");
        store.dispatch(actions.init());

        let mut fields = Vec::with_capacity(controls.len());
        for (field, kind, element) in controls {
            let initial = initial_values.as_ref().and_then(|values| values.get(&field));
            fields.push(FieldBinding::attach(
                store.clone(),
                actions.clone(),
                field,
                kind,
                element,
                initial,
            ));
        }

        if let Some(values) = initial_values {
            store.dispatch(actions.set_initial_values(values));
        }

        Self {
            store: store.clone(),
            actions,
            fields,
            feed: Some(feed),
            unmounted: false,
        }
    }

    pub fn actions(&self) -> &FormActions {
        &self.actions
    }

    /// Attached bindings, in declaration order.
    pub fn field_bindings(&self) -> &[FieldBinding] {
        &self.fields
    }

    /// First binding attached under the given field name.
    pub fn field_binding(&self, field: &str) -> Option<&FieldBinding> {
        self.fields.iter().find(|binding| binding.field_name() == field)
    }

    /// Collate the form's current values. Dispatches nothing.
    pub fn submit(&self) -> Result<IndexMap<String, FieldValue>, FormStateError> {
        selectors::form_values(&self.store.state(), self.actions.form_name())
    }

    /// Restore every field to its initial value.
    pub fn reset(&self) {
        self.store.dispatch(self.actions.reset());
    }

    /// Detach every control, then stop tracking the form. Idempotent;
    /// `Drop` calls it.
    pub fn unmount(&mut self) {
        if self.unmounted {
            return;
        }
        self.unmounted = true;
        self.feed = None;
        for field in &mut self.fields {
            field.detach();
        }
        self.store.dispatch(self.actions.destroy());
    }
}

impl Drop for FormBinding {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Recompute errors for the fields that have validators and dispatch
/// `UpdateFieldErrors` if any of them changed. Rules run in the order
/// they were added; the first failure wins. Fields without validators
/// never trigger the dispatch.
fn run_validator_pass(
    store: &FormStore,
    actions: &FormActions,
    validators: &FieldValidators,
    state: &RootFormsState,
) {
    if validators.is_empty() {
        return;
    }
    let Some(form) = state.form(actions.form_name()) else {
        return;
    };

    let mut errors = IndexMap::new();
    let mut changed = false;
    for name in validators.fields() {
        let Some(field) = form.field(name) else {
            continue;
        };
        let computed = validators.run(name, &field.value, form);
        if computed != field.error {
            changed = true;
        }
        if let Some(message) = computed {
            errors.insert(name.clone(), message);
        }
    }
    if changed {
        store.dispatch(actions.update_errors(errors));
    }
}
