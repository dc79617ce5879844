//! The seam between the controller and the host environment.
//!
//! The browser implementation lives in [`crate::dom`]; tests use an
//! in-memory fake. A `Platform` measures rendered boxes and attaches the
//! document-level pointer listeners that exist only while a session is open.

#[cfg(test)]
#[path = "platform_test.rs"]
mod platform_test;

use std::fmt;

use crate::element::ElementId;
use crate::error::ListenerError;
use crate::geometry::GeometrySnapshot;

/// Host environment the controller runs against.
pub trait Platform {
    /// Measure the element's rendered box right now, if it is rendered.
    fn measure(&self, id: ElementId) -> Option<GeometrySnapshot>;

    /// Whether the element's node is still attached to the document.
    fn is_mounted(&self, id: ElementId) -> bool;

    /// Attach document-level pointer-move / pointer-up listeners.
    ///
    /// The listeners stay registered until the returned registration is
    /// released or dropped.
    fn attach_listeners(&mut self) -> Result<ListenerRegistration, ListenerError>;
}

/// Ownership of a set of attached listeners.
///
/// Releasing runs the detach closure exactly once, whether through
/// [`ListenerRegistration::release`] or on drop.
pub struct ListenerRegistration {
    detach: Option<Box<dyn FnOnce()>>,
}

impl ListenerRegistration {
    pub fn new(detach: impl FnOnce() + 'static) -> Self {
        Self { detach: Some(Box::new(detach)) }
    }

    /// Detach now.
    pub fn release(mut self) {
        self.detach_now();
    }

    /// Whether the listeners are still attached.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.detach.is_some()
    }

    fn detach_now(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for ListenerRegistration {
    fn drop(&mut self) {
        self.detach_now();
    }
}

impl fmt::Debug for ListenerRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistration").field("active", &self.is_active()).finish()
    }
}
