//! Edit mode and the single active element.
//!
//! Two flat state machines: edit mode on/off for the whole canvas, and
//! `Unselected ⇄ Selected` per element with at most one selected. Resize
//! handles are available on every element while editing; the move
//! affordance only on the selected one.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::element::ElementId;

/// Which element is active, and whether the canvas is in edit mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionModel {
    editing: bool,
    active: Option<ElementId>,
}

impl SelectionModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn edit mode on or off. Leaving edit mode drops the selection,
    /// returning the element that was deselected.
    pub fn set_editing(&mut self, editing: bool) -> Option<ElementId> {
        self.editing = editing;
        if editing { None } else { self.active.take() }
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Make `id` the active element, returning the one it replaced.
    ///
    /// Ignored outside edit mode (returns `None` and changes nothing).
    pub fn select(&mut self, id: ElementId) -> Option<ElementId> {
        if !self.editing {
            return None;
        }
        self.active.replace(id).filter(|prev| *prev != id)
    }

    /// Clear the selection, returning what was selected.
    pub fn deselect(&mut self) -> Option<ElementId> {
        self.active.take()
    }

    /// Forget `id` if it is selected (element removed).
    pub fn forget(&mut self, id: ElementId) -> bool {
        if self.active == Some(id) {
            self.active = None;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn active(&self) -> Option<ElementId> {
        self.active
    }

    #[must_use]
    pub fn is_selected(&self, id: ElementId) -> bool {
        self.active == Some(id)
    }

    /// Resize handles: any element, as long as the canvas is editing.
    #[must_use]
    pub fn can_resize(&self, _id: ElementId) -> bool {
        self.editing
    }

    /// Move affordance: only the selected element.
    #[must_use]
    pub fn can_move(&self, id: ElementId) -> bool {
        self.editing && self.is_selected(id)
    }
}
