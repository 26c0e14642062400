//! Shared test fakes and builders.

#![allow(dead_code)]

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;

use formstate::binding::{InputElement, SharedElement};
use formstate::{FieldValue, FormStore, Subscription};

// -- Fake input elements ------------------------------------------------------

/// One write a binding pushed into an element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementWrite {
    Value(FieldValue),
    Checked(bool),
}

struct FakeState {
    value: FieldValue,
    checked: bool,
}

/// In-memory input element recording every write it receives.
pub struct FakeInput {
    state: Arc<Mutex<FakeState>>,
    writes: Arc<Mutex<Vec<ElementWrite>>>,
}

impl InputElement for FakeInput {
    fn value(&self) -> FieldValue {
        self.state.lock().value.clone()
    }

    fn set_value(&mut self, value: &FieldValue) {
        self.state.lock().value = value.clone();
        self.writes.lock().push(ElementWrite::Value(value.clone()));
    }

    fn checked(&self) -> bool {
        self.state.lock().checked
    }

    fn set_checked(&mut self, checked: bool) {
        self.state.lock().checked = checked;
        self.writes.lock().push(ElementWrite::Checked(checked));
    }
}

/// Test-side handle to a [`FakeInput`]: simulates user edits without
/// recording them as binding writes, and inspects what the binding
/// rendered.
pub struct FakeHandle {
    state: Arc<Mutex<FakeState>>,
    writes: Arc<Mutex<Vec<ElementWrite>>>,
}

impl FakeHandle {
    /// Simulate the user editing the element's value.
    pub fn user_value(&self, value: FieldValue) {
        self.state.lock().value = value;
    }

    /// Simulate the user toggling the element's checked state.
    pub fn user_checked(&self, checked: bool) {
        self.state.lock().checked = checked;
    }

    pub fn value(&self) -> FieldValue {
        self.state.lock().value.clone()
    }

    pub fn checked(&self) -> bool {
        self.state.lock().checked
    }

    pub fn writes(&self) -> Vec<ElementWrite> {
        self.writes.lock().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().len()
    }

    pub fn last_write(&self) -> Option<ElementWrite> {
        self.writes.lock().last().cloned()
    }
}

/// Build a fake element plus its test handle.
pub fn fake_input() -> (SharedElement, FakeHandle) {
    let state = Arc::new(Mutex::new(FakeState {
        value: FieldValue::Null,
        checked: false,
    }));
    let writes = Arc::new(Mutex::new(Vec::new()));
    let element: SharedElement = Arc::new(Mutex::new(Box::new(FakeInput {
        state: Arc::clone(&state),
        writes: Arc::clone(&writes),
    })));
    (element, FakeHandle { state, writes })
}

/// Route reducer warnings through the test writer; opt in per test when
/// a run needs the log output (`RUST_LOG=formstate=trace`).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// -- Store helpers ------------------------------------------------------------

pub type ActionLog = Arc<Mutex<Vec<String>>>;

/// Record the wire tag of every action the store reduces. Keep the
/// returned subscription alive for as long as the recording should run.
pub fn record_actions(store: &FormStore) -> (Subscription, ActionLog) {
    let log: ActionLog = Arc::new(Mutex::new(Vec::new()));
    let sub = store.subscribe_actions({
        let log = Arc::clone(&log);
        move |action, _| log.lock().push(action.kind().to_string())
    });
    (sub, log)
}

pub fn field_value(store: &FormStore, form: &str, field: &str) -> FieldValue {
    store
        .state()
        .form(form)
        .and_then(|f| f.field(field))
        .map(|f| f.value.clone())
        .unwrap_or(FieldValue::Null)
}

pub fn field_error(store: &FormStore, form: &str, field: &str) -> Option<String> {
    store
        .state()
        .form(form)
        .and_then(|f| f.field(field))
        .and_then(|f| f.error.clone())
}

pub fn field_count(store: &FormStore, form: &str, field: &str) -> u32 {
    store
        .state()
        .form(form)
        .and_then(|f| f.field(field))
        .map(|f| f.count)
        .unwrap_or(0)
}

pub fn is_invalid(store: &FormStore, form: &str) -> bool {
    store.state().form(form).map(|f| f.invalid).unwrap_or(false)
}

// -- Map builders -------------------------------------------------------------

pub fn value_map(pairs: &[(&str, FieldValue)]) -> IndexMap<String, FieldValue> {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

pub fn error_map(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
    pairs
        .iter()
        .map(|(name, message)| (name.to_string(), message.to_string()))
        .collect()
}
