//! Error types surfaced by the manipulator.
//!
//! Constraint violations during a drag are never errors (values are clamped);
//! these types cover caller contract violations and bad host input.

use crate::element::ElementId;

/// Reason a session could not be opened.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BeginError {
    /// Another session already holds the global slot. The open session is left untouched.
    #[error("session already open for element {open}; rejected begin for {requested}")]
    SessionOpen { open: ElementId, requested: ElementId },
    /// The element is not in the registry.
    #[error("unknown element {0}")]
    UnknownElement(ElementId),
    /// The element has no rendered box to measure.
    #[error("element {0} has no rendered box")]
    Unmeasured(ElementId),
    /// The platform failed to attach document listeners.
    #[error("failed to attach listeners: {0}")]
    Listeners(#[from] ListenerError),
}

impl BeginError {
    /// Whether this is the mutual-exclusion rejection.
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::SessionOpen { .. })
    }
}

/// Failure reported by a platform while attaching listeners.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ListenerError(pub String);

/// Invalid min/max bounds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConstraintError {
    /// A bound is negative or not a finite number.
    #[error("{axis} bound must be a finite, non-negative number (got {value})")]
    InvalidBound { axis: &'static str, value: f64 },
    /// Minimum exceeds maximum on an axis.
    #[error("{axis} minimum {min} exceeds maximum {max}")]
    Inverted { axis: &'static str, min: f64, max: f64 },
}

/// A CSS length string that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid length: {0:?}")]
pub struct LengthError(pub String);

/// Controller configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON document was malformed, had the wrong shape, or carried
    /// inconsistent constraints.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
