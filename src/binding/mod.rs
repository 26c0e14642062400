//! Bindings between host input elements and the store.
//!
//! A [`FieldBinding`] ties one element to one field; a [`FormBinding`]
//! mounts a whole form from a [`FormConfig`] and owns its field
//! bindings plus the validator pass.

mod control;
mod element;
mod field;
mod form;

pub use control::ControlKind;
pub use element::{InputElement, SharedElement};
pub use field::FieldBinding;
pub use form::{FormBinding, FormConfig};
