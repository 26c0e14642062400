//! Form state under unidirectional data flow.
//!
//! All form state lives in one store as plain data. Every mutation is a
//! [`FormAction`] reduced by pure functions; bindings translate element
//! events into actions and store changes into element writes, guarded so
//! nothing echoes back around the loop.
//!
//! ```text
//!   ┌─────────┐  notify_*   ┌──────────────┐  dispatch   ┌───────────┐
//!   │ element │ ──────────► │ FieldBinding │ ──────────► │ FormStore │
//!   └─────────┘             └──────────────┘             └───────────┘
//!        ▲                         │                           │
//!        │                         │ render (on change)        │ reduce
//!        └─────────────────────────┘                           ▼
//!                                                       ┌─────────────┐
//!                                                       │ RootReducer │
//!                                                       └─────────────┘
//! ```
//!
//! The store is synchronous and host-agnostic: no event loop, no
//! rendering, no executor. Hosts that must not reduce during their own
//! mount phase create the store with [`FormStore::deferred`] and call
//! [`FormStore::open`] once mounting is done.

pub mod action;
pub mod binding;
pub mod error;
pub mod reducer;
pub mod selectors;
pub mod state;
pub mod store;
pub mod validate;

pub use action::{FormAction, FormActions};
pub use error::FormStateError;
pub use state::{FieldState, FieldValue, FormState, RootFormsState};
pub use store::{FormStore, Subscription};
