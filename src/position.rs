//! Pure move geometry.

use crate::geometry::{Delta, Position};

/// New translation offset after dragging by `delta` from `start`.
///
/// Canvas bounds are the host's concern; nothing is clamped here.
#[must_use]
pub fn translate(start: Position, delta: Delta) -> Position {
    Position { x: start.x + delta.dx, y: start.y + delta.dy }
}
