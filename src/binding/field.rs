use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use super::control::ControlKind;
use super::element::SharedElement;
use crate::action::FormActions;
use crate::state::{FieldValue, RootFormsState};
use crate::store::{FormStore, Subscription};

/// Connects one input element to one field of one form.
///
/// Element events flow in through the `notify_*` methods; store updates
/// flow out to the element through a store subscription. Both directions
/// carry an equality guard against the last known value, so an edit
/// echoing back from the store never re-renders, and a render never
/// re-dispatches.
pub struct FieldBinding {
    store: FormStore,
    actions: FormActions,
    field: String,
    kind: ControlKind,
    element: SharedElement,
    last_value: Arc<Mutex<FieldValue>>,
    subscription: Option<Subscription>,
    detached: bool,
}

impl FieldBinding {
    /// Register the field and start mirroring store values into the
    /// element.
    ///
    /// A configured initial value renders immediately, before the store
    /// confirms it through `SetInitialValues`; the confirmation then
    /// hits the equality guard and writes nothing. Attaching to a field
    /// that already holds a value renders that value instead.
    pub fn attach(
        store: FormStore,
        actions: FormActions,
        field: impl Into<String>,
        kind: ControlKind,
        element: SharedElement,
        initial: Option<&FieldValue>,
    ) -> Self {
        let field = field.into();
        store.dispatch(actions.register(&field));

        // While the seed window is open, the optimistic render below is
        // ahead of the store: unset store values must not wipe it. The
        // window closes on the first non-null value the store reports.
        let mut last = FieldValue::Null;
        let mut seed_window = false;
        if let Some(value) = initial {
            last = value.clone();
            seed_window = true;
            kind.write(element.lock().as_mut(), value);
        }
        let live = store
            .state()
            .form(actions.form_name())
            .and_then(|form| form.field(&field))
            .map(|state| state.value.clone())
            .filter(|value| !value.is_null());
        if let Some(value) = live {
            last = value.clone();
            seed_window = false;
            kind.write(element.lock().as_mut(), &value);
        }
        let last_value = Arc::new(Mutex::new(last));
        let seed_window = Arc::new(Mutex::new(seed_window));

        let subscription = store.subscribe({
            let form = actions.form_name().to_string();
            let field = field.clone();
            let kind = kind.clone();
            let element = Arc::clone(&element);
            let last_value = Arc::clone(&last_value);
            let seed_window = Arc::clone(&seed_window);
            move |state: &RootFormsState| {
                let Some(value) = state
                    .form(&form)
                    .and_then(|form| form.field(&field))
                    .map(|field| field.value.clone())
                else {
                    return;
                };
                {
                    let mut seed_window = seed_window.lock();
                    if *seed_window {
                        if value.is_null() {
                            return;
                        }
                        *seed_window = false;
                    }
                }
                {
                    let mut last = last_value.lock();
                    if *last == value {
                        return;
                    }
                    *last = value.clone();
                }
                trace!(form = %form, field = %field, "rendering store value");
                kind.write(element.lock().as_mut(), &value);
            }
        });

        Self {
            store,
            actions,
            field,
            kind,
            element,
            last_value,
            subscription: Some(subscription),
            detached: false,
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field
    }

    pub fn element(&self) -> SharedElement {
        Arc::clone(&self.element)
    }

    /// Host hook for the element's edit event.
    ///
    /// Dispatches `ChangeField` only when the element shows something
    /// other than the last known store value.
    pub fn notify_input(&self) {
        let Some(candidate) = self.kind.read(self.element.lock().as_ref()) else {
            return;
        };
        {
            let mut last = self.last_value.lock();
            if *last == candidate {
                return;
            }
            *last = candidate.clone();
        }
        self.store.dispatch(self.actions.change(&self.field, candidate));
    }

    /// Host hook for the element gaining focus.
    pub fn notify_focus(&self) {
        self.store.dispatch(self.actions.focus(&self.field));
    }

    /// Host hook for the element losing focus.
    pub fn notify_blur(&self) {
        self.store.dispatch(self.actions.blur(&self.field));
    }

    /// Unregister from the store. Idempotent; `Drop` calls it.
    pub fn detach(&mut self) {
        if self.detached {
            return;
        }
        self.detached = true;
        self.subscription = None;
        self.store.dispatch(self.actions.unregister(&self.field));
    }
}

impl Drop for FieldBinding {
    fn drop(&mut self) {
        self.detach();
    }
}
