use std::sync::Arc;

use parking_lot::Mutex;

use crate::state::FieldValue;

/// Host-side input widget the engine can read and write.
///
/// The engine never renders. It reads what the element currently shows
/// and pushes store values back through these four methods; the control
/// kind decides which pair applies. Hosts keep their own handle to the
/// element and forward its events to the field binding.
pub trait InputElement: Send {
    /// Value the element currently shows.
    fn value(&self) -> FieldValue;

    fn set_value(&mut self, value: &FieldValue);

    /// Checked state, for checkbox and radio controls.
    fn checked(&self) -> bool;

    fn set_checked(&mut self, checked: bool);
}

/// Element handle shared between the host and a field binding.
pub type SharedElement = Arc<Mutex<Box<dyn InputElement>>>;
