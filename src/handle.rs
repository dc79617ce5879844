//! The eight resize handles on an element's bounding box.

#[cfg(test)]
#[path = "handle_test.rs"]
mod handle_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{CURSOR_EW_RESIZE, CURSOR_NESW_RESIZE, CURSOR_NS_RESIZE, CURSOR_NWSE_RESIZE};

/// Anchor position for a resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

/// Direction a handle drags an axis: shrink, untouched, or grow with positive delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    /// Project a signed pointer delta onto this direction.
    #[must_use]
    pub fn apply(self, delta: f64) -> f64 {
        match self {
            Self::Negative => -delta,
            Self::Zero => 0.0,
            Self::Positive => delta,
        }
    }
}

impl Handle {
    /// All handles, in render order.
    pub const ALL: [Handle; 8] = [
        Handle::N,
        Handle::S,
        Handle::E,
        Handle::W,
        Handle::Ne,
        Handle::Nw,
        Handle::Se,
        Handle::Sw,
    ];

    /// Whether this is a corner (two-axis) handle.
    #[must_use]
    pub fn is_corner(self) -> bool {
        matches!(self, Self::Ne | Self::Nw | Self::Se | Self::Sw)
    }

    /// How a horizontal pointer delta changes the width.
    #[must_use]
    pub fn horizontal(self) -> Sign {
        match self {
            Self::E | Self::Ne | Self::Se => Sign::Positive,
            Self::W | Self::Nw | Self::Sw => Sign::Negative,
            Self::N | Self::S => Sign::Zero,
        }
    }

    /// How a vertical pointer delta changes the height.
    #[must_use]
    pub fn vertical(self) -> Sign {
        match self {
            Self::S | Self::Se | Self::Sw => Sign::Positive,
            Self::N | Self::Ne | Self::Nw => Sign::Negative,
            Self::E | Self::W => Sign::Zero,
        }
    }

    /// CSS cursor token hosts use when rendering this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => CURSOR_NS_RESIZE,
            Self::E | Self::W => CURSOR_EW_RESIZE,
            Self::Ne | Self::Sw => CURSOR_NESW_RESIZE,
            Self::Nw | Self::Se => CURSOR_NWSE_RESIZE,
        }
    }

    /// Lowercase compass name (`"n"`, `"se"`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::Ne => "ne",
            Self::E => "e",
            Self::Se => "se",
            Self::S => "s",
            Self::Sw => "sw",
            Self::W => "w",
            Self::Nw => "nw",
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized handle name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resize handle: {0:?}")]
pub struct UnknownHandle(pub String);

impl FromStr for Handle {
    type Err = UnknownHandle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|h| h.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownHandle(s.to_owned()))
    }
}
