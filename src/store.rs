use std::collections::VecDeque;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::action::FormAction;
use crate::reducer::{Reducer, RootReducer};
use crate::state::RootFormsState;

type StateObserver = Arc<dyn Fn(&RootFormsState) + Send + Sync>;
type ActionObserver = Arc<dyn Fn(&FormAction, &RootFormsState) + Send + Sync>;

/// Startup gate: hosts whose mount phase must not reduce synchronously
/// create the store buffering, then open it once mounting is done. The
/// buffered actions flush in dispatch order.
#[derive(Debug)]
enum DispatchGate {
    Buffering { queue: Vec<FormAction> },
    Open,
}

struct Inner {
    state: RootFormsState,
    gate: DispatchGate,
    queue: VecDeque<FormAction>,
    draining: bool,
    state_observers: Vec<(u64, StateObserver)>,
    action_observers: Vec<(u64, ActionObserver)>,
    next_observer_id: u64,
}

/// One fully reduced action, ready to announce outside the lock.
struct Round {
    action: FormAction,
    changed: bool,
    state: RootFormsState,
    state_observers: Vec<StateObserver>,
    action_observers: Vec<ActionObserver>,
}

/// Shared handle to the form store.
///
/// Dispatch is serialized: one action reduces at a time, in order.
/// Observers run with no lock held, so they may dispatch again; those
/// re-entrant actions queue behind the one in flight and are drained by
/// the outermost `dispatch` call rather than nesting.
#[derive(Clone)]
pub struct FormStore {
    inner: Arc<Mutex<Inner>>,
}

impl FormStore {
    /// Store that reduces every dispatch immediately.
    pub fn new() -> Self {
        Self::with_gate(DispatchGate::Open)
    }

    /// Store that buffers every dispatch until [`FormStore::open`].
    pub fn deferred() -> Self {
        Self::with_gate(DispatchGate::Buffering { queue: Vec::new() })
    }

    fn with_gate(gate: DispatchGate) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: RootFormsState::default(),
                gate,
                queue: VecDeque::new(),
                draining: false,
                state_observers: Vec::new(),
                action_observers: Vec::new(),
                next_observer_id: 0,
            })),
        }
    }

    /// True while dispatches are buffered instead of reduced.
    pub fn is_buffering(&self) -> bool {
        matches!(self.inner.lock().gate, DispatchGate::Buffering { .. })
    }

    /// Open the gate, flushing buffered actions in dispatch order.
    ///
    /// Buffered actions reduce strictly before anything dispatched after
    /// this returns. Opening an open store is a no-op.
    pub fn open(&self) {
        let buffered = {
            let mut inner = self.inner.lock();
            match std::mem::replace(&mut inner.gate, DispatchGate::Open) {
                DispatchGate::Buffering { queue } => queue,
                DispatchGate::Open => return,
            }
        };
        if !buffered.is_empty() {
            debug!(buffered = buffered.len(), "dispatch gate opened, flushing");
        }
        for action in buffered {
            self.dispatch(action);
        }
    }

    /// Reduce an action and notify observers.
    ///
    /// State observers fire only when the reduction actually changed the
    /// tree; action observers fire for every reduced action.
    pub fn dispatch(&self, action: FormAction) {
        {
            let mut inner = self.inner.lock();
            if let DispatchGate::Buffering { queue } = &mut inner.gate {
                trace!(action = %action, "buffered until the gate opens");
                queue.push(action);
                return;
            }
            inner.queue.push_back(action);
            if inner.draining {
                // The outermost dispatch call picks this up.
                return;
            }
            inner.draining = true;
        }
        self.drain();
    }

    fn drain(&self) {
        while let Some(round) = self.reduce_next() {
            if round.changed {
                for observer in &round.state_observers {
                    observer(&round.state);
                }
            }
            for observer in &round.action_observers {
                observer(&round.action, &round.state);
            }
        }
    }

    fn reduce_next(&self) -> Option<Round> {
        let mut inner = self.inner.lock();
        let Some(action) = inner.queue.pop_front() else {
            inner.draining = false;
            return None;
        };
        trace!(action = %action, form = %action.form_name(), "dispatch");

        let previous = std::mem::take(&mut inner.state);
        let next = RootReducer::reduce(previous.clone(), action.clone());
        let changed = next != previous;
        inner.state = next;

        Some(Round {
            action,
            changed,
            state: inner.state.clone(),
            state_observers: inner
                .state_observers
                .iter()
                .map(|(_, observer)| Arc::clone(observer))
                .collect(),
            action_observers: inner
                .action_observers
                .iter()
                .map(|(_, observer)| Arc::clone(observer))
                .collect(),
        })
    }

    /// Snapshot of the current tree.
    pub fn state(&self) -> RootFormsState {
        self.inner.lock().state.clone()
    }

    /// Observe state changes. The observer fires after any reduction
    /// that changed the tree, with the new tree.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&RootFormsState) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        let id = inner.next_observer_id;
        inner.next_observer_id += 1;
        inner.state_observers.push((id, Arc::new(observer)));
        Subscription {
            inner: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Observe the action feed. The observer fires after every reduced
    /// action, with the action and the tree it produced.
    pub fn subscribe_actions<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&FormAction, &RootFormsState) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        let id = inner.next_observer_id;
        inner.next_observer_id += 1;
        inner.action_observers.push((id, Arc::new(observer)));
        Subscription {
            inner: Arc::downgrade(&self.inner),
            id,
        }
    }
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer registration guard; dropping it detaches the observer.
///
/// Holds only a weak handle, so a leaked subscription never keeps the
/// store alive.
pub struct Subscription {
    inner: Weak<Mutex<Inner>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            let mut inner = inner.lock();
            let id = self.id;
            inner.state_observers.retain(|(observer_id, _)| *observer_id != id);
            inner.action_observers.retain(|(observer_id, _)| *observer_id != id);
        }
    }
}
