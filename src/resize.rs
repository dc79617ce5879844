//! Pure resize geometry: handle + snapshot + pointer delta → new dimensions.
//!
//! `compute` always starts from the snapshot taken at session start, never
//! from the previous frame's output, so it can run on every pointer-move
//! without drift. Aspect locking follows `lock_by_default XOR modifier`,
//! and only when the element has a known ratio.
//!
//! Clamping happens last and per axis. Near a bound, a locked resize can
//! therefore end at a size whose ratio differs from the locked one.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use serde::{Deserialize, Serialize};

use crate::constraint::Constraints;
use crate::geometry::{Delta, Dimensions, GeometrySnapshot};
use crate::handle::Handle;

/// Aspect-ratio policy in effect for one `compute` call.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectPolicy {
    /// Width / height to preserve, if the content has one.
    pub ratio: Option<f64>,
    /// Whether the ratio is locked when the modifier is not held.
    pub lock_by_default: bool,
    /// Live state of the lock modifier key.
    pub modifier_pressed: bool,
}

impl AspectPolicy {
    #[must_use]
    pub fn new(ratio: Option<f64>, lock_by_default: bool, modifier_pressed: bool) -> Self {
        Self { ratio, lock_by_default, modifier_pressed }
    }

    /// Whether the lock is active, ignoring whether a ratio exists.
    #[must_use]
    pub fn lock_requested(&self) -> bool {
        self.lock_by_default ^ self.modifier_pressed
    }

    /// The ratio to enforce, or `None` when resizing freely.
    #[must_use]
    pub fn effective_ratio(&self) -> Option<f64> {
        if !self.lock_requested() {
            return None;
        }
        self.ratio.filter(|r| r.is_finite() && *r > 0.0)
    }
}

/// Compute the new size for a drag of `handle` by `delta` from `snapshot`.
#[must_use]
pub fn compute(
    handle: Handle,
    snapshot: &GeometrySnapshot,
    delta: Delta,
    constraints: &Constraints,
    aspect: AspectPolicy,
) -> Dimensions {
    let dw = handle.horizontal().apply(delta.dx);
    let dh = handle.vertical().apply(delta.dy);

    let raw = match aspect.effective_ratio() {
        None => Dimensions::new(snapshot.width + dw, snapshot.height + dh),
        Some(ratio) if handle.is_corner() => {
            // Grow along whichever axis moved further in the handle's outward direction.
            let width = snapshot.width + dw.max(dh);
            Dimensions::new(width, width / ratio)
        }
        Some(ratio) if matches!(handle, Handle::E | Handle::W) => {
            let width = snapshot.width + dw;
            Dimensions::new(width, width / ratio)
        }
        Some(ratio) => {
            let height = snapshot.height + dh;
            Dimensions::new(height * ratio, height)
        }
    };

    constraints.clamp(raw)
}

/// Dimension readout shown beside an element while it is being resized.
#[must_use]
pub fn format_readout(d: Dimensions) -> String {
    format!("{} × {}px", d.width.round(), d.height.round())
}
