//! Pure reducers over the form-state tree.
//!
//! Reduction nests the way the state nests: the root reducer routes an
//! action to the form it names, the form reducer routes field-scoped
//! actions into the field it names. Every layer is a pure function over
//! plain data; the store owns all side effects.

mod field;
mod form;
mod root;

pub use field::reduce_field;
pub use form::reduce_form;
pub use root::RootReducer;

/// Marker for state a store can hold.
///
/// `PartialEq` is load-bearing: the store compares the tree before and
/// after each reduction to decide whether state observers fire.
pub trait StoreState: Clone + PartialEq + Default + Send + 'static {}

/// Marker for actions a store can dispatch.
pub trait StoreAction: Send + 'static {}

/// Pure state transition: `(State, Action) -> State`.
///
/// Implementations must be deterministic: equal inputs produce equal
/// outputs. Actions that do not apply to the current state are logged
/// and leave the state unchanged; a reducer never fails and never
/// touches anything outside its arguments.
pub trait Reducer {
    type State: StoreState;
    type Action: StoreAction;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State;
}
