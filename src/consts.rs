//! Shared numeric and string constants for the manipulator crate.

// ── Constraints ─────────────────────────────────────────────────

/// Default minimum width in CSS pixels.
pub const DEFAULT_MIN_WIDTH: f64 = 50.0;

/// Default minimum height in CSS pixels.
pub const DEFAULT_MIN_HEIGHT: f64 = 30.0;

/// Default maximum width in CSS pixels.
pub const DEFAULT_MAX_WIDTH: f64 = 2000.0;

/// Default maximum height in CSS pixels.
pub const DEFAULT_MAX_HEIGHT: f64 = 2000.0;

// ── Lengths ─────────────────────────────────────────────────────

/// Root font size used to resolve `rem` and `em` lengths.
pub const ROOT_FONT_SIZE_PX: f64 = 16.0;

// ── Input ───────────────────────────────────────────────────────

/// Key name that inverts the aspect-lock default while held.
pub const DEFAULT_LOCK_MODIFIER: &str = "Shift";

// ── Cursors ─────────────────────────────────────────────────────

pub const CURSOR_NS_RESIZE: &str = "ns-resize";
pub const CURSOR_EW_RESIZE: &str = "ew-resize";
pub const CURSOR_NESW_RESIZE: &str = "nesw-resize";
pub const CURSOR_NWSE_RESIZE: &str = "nwse-resize";

/// Body cursor while a move session targets the element.
pub const CURSOR_GRABBING: &str = "grabbing";

/// Body cursor of the selected element (move affordance).
pub const CURSOR_GRAB: &str = "grab";

/// Body cursor of an unselected element in edit mode.
pub const CURSOR_POINTER: &str = "pointer";
