//! Size bounds and the clamping policy applied to every computed size.

#[cfg(test)]
#[path = "constraint_test.rs"]
mod constraint_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH, DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH};
use crate::error::ConstraintError;
use crate::geometry::Dimensions;

/// Clamp `value` into `[min, max]`; inverted bounds yield `min`.
#[must_use]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Per-axis size bounds. Always `0 <= min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawConstraints", rename_all = "camelCase")]
pub struct Constraints {
    min_width: f64,
    min_height: f64,
    max_width: f64,
    max_height: f64,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }
}

impl Constraints {
    /// Build validated bounds.
    pub fn new(min_width: f64, min_height: f64, max_width: f64, max_height: f64) -> Result<Self, ConstraintError> {
        check_axis("width", min_width, max_width)?;
        check_axis("height", min_height, max_height)?;
        Ok(Self { min_width, min_height, max_width, max_height })
    }

    /// Same bounds on both axes.
    pub fn uniform(min: f64, max: f64) -> Result<Self, ConstraintError> {
        Self::new(min, min, max, max)
    }

    #[must_use]
    pub fn min_width(&self) -> f64 {
        self.min_width
    }

    #[must_use]
    pub fn min_height(&self) -> f64 {
        self.min_height
    }

    #[must_use]
    pub fn max_width(&self) -> f64 {
        self.max_width
    }

    #[must_use]
    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    /// Clamp each axis independently. An aspect ratio applied before this
    /// call is not re-established afterwards.
    #[must_use]
    pub fn clamp(&self, d: Dimensions) -> Dimensions {
        Dimensions {
            width: clamp(d.width, self.min_width, self.max_width),
            height: clamp(d.height, self.min_height, self.max_height),
        }
    }

    /// Whether `d` already lies within bounds on both axes.
    #[must_use]
    pub fn contains(&self, d: Dimensions) -> bool {
        (self.min_width..=self.max_width).contains(&d.width) && (self.min_height..=self.max_height).contains(&d.height)
    }
}

fn check_axis(axis: &'static str, min: f64, max: f64) -> Result<(), ConstraintError> {
    for value in [min, max] {
        if !value.is_finite() || value < 0.0 {
            return Err(ConstraintError::InvalidBound { axis, value });
        }
    }
    if min > max {
        return Err(ConstraintError::Inverted { axis, min, max });
    }
    Ok(())
}

/// Unvalidated wire form; missing bounds take the defaults.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConstraints {
    #[serde(default = "default_min_width")]
    min_width: f64,
    #[serde(default = "default_min_height")]
    min_height: f64,
    #[serde(default = "default_max_width")]
    max_width: f64,
    #[serde(default = "default_max_height")]
    max_height: f64,
}

fn default_min_width() -> f64 {
    DEFAULT_MIN_WIDTH
}

fn default_min_height() -> f64 {
    DEFAULT_MIN_HEIGHT
}

fn default_max_width() -> f64 {
    DEFAULT_MAX_WIDTH
}

fn default_max_height() -> f64 {
    DEFAULT_MAX_HEIGHT
}

impl TryFrom<RawConstraints> for Constraints {
    type Error = ConstraintError;

    fn try_from(raw: RawConstraints) -> Result<Self, Self::Error> {
        Self::new(raw.min_width, raw.min_height, raw.max_width, raw.max_height)
    }
}
