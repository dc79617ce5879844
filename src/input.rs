//! Input model: pointer samples, buttons, keys, and lock-modifier tracking.
//!
//! These are the raw facts the platform forwards from native events. The
//! controller interprets them; nothing here knows about sessions.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::DEFAULT_LOCK_MODIFIER;
use crate::geometry::Point;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Button {
    /// Left mouse button, pen contact, or touch.
    #[default]
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// A keyboard key as reported by the browser (e.g. `"Shift"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// One pointer event as delivered by the platform.
///
/// `position` is `None` when the event carried no usable coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    pub position: Option<Point>,
    pub button: Button,
}

impl PointerEvent {
    /// Primary-button event at client coordinates `(x, y)`.
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self { position: Some(Point::new(x, y)), button: Button::Primary }
    }

    /// Event without coordinates.
    #[must_use]
    pub fn missing() -> Self {
        Self { position: None, button: Button::Primary }
    }

    #[must_use]
    pub fn with_button(mut self, button: Button) -> Self {
        self.button = button;
        self
    }

    /// The position, if present and finite.
    #[must_use]
    pub fn sample(&self) -> Option<Point> {
        self.position.filter(|p| p.is_finite())
    }
}

/// Tracks whether the aspect-lock modifier is currently held.
///
/// Fed by global key-down / key-up for the whole lifetime of the
/// controller, so a session sees modifier changes on its next update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierTracker {
    key: String,
    pressed: bool,
}

impl Default for ModifierTracker {
    fn default() -> Self {
        Self::new(DEFAULT_LOCK_MODIFIER)
    }
}

impl ModifierTracker {
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self { key: key.to_owned(), pressed: false }
    }

    /// Returns true if `key` is the tracked modifier.
    pub fn key_down(&mut self, key: &Key) -> bool {
        let hit = key.0 == self.key;
        if hit {
            self.pressed = true;
        }
        hit
    }

    /// Returns true if `key` is the tracked modifier.
    pub fn key_up(&mut self, key: &Key) -> bool {
        let hit = key.0 == self.key;
        if hit {
            self.pressed = false;
        }
        hit
    }

    /// Focus left the page; key-up may never arrive.
    pub fn reset(&mut self) {
        self.pressed = false;
    }

    #[must_use]
    pub fn pressed(&self) -> bool {
        self.pressed
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}
