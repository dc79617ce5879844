//! Geometry value types: points, deltas, boxes, and committed lengths.
//!
//! Everything here is plain data. `GeometrySnapshot` is what the platform
//! measures from the live DOM at session start; `Dimensions` and `Position`
//! are what the pure engines produce; `Length` / `SizeSpec` describe the
//! committed size of an element, which may still be `auto`.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::ROOT_FONT_SIZE_PX;
use crate::error::LengthError;

/// A pointer position in client (CSS pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite numbers.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Signed offset from `origin` to this point.
    #[must_use]
    pub fn delta_from(self, origin: Point) -> Delta {
        Delta { dx: self.x - origin.x, dy: self.y - origin.y }
    }
}

/// Pointer movement since pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Delta {
    pub dx: f64,
    pub dy: f64,
}

impl Delta {
    #[must_use]
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// A concrete width and height in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width divided by height, or `None` for a degenerate box.
    #[must_use]
    pub fn aspect_ratio(self) -> Option<f64> {
        let ratio = self.width / self.height;
        (ratio.is_finite() && ratio > 0.0).then_some(ratio)
    }
}

/// Translation offset of an element from its laid-out position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An element's rendered box, measured at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeometrySnapshot {
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
}

impl GeometrySnapshot {
    #[must_use]
    pub fn new(width: f64, height: f64, x: f64, y: f64) -> Self {
        Self { width, height, x, y }
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

/// Size of the browser viewport, used to resolve `vw` / `vh` lengths.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// A committed length along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "LengthRepr", into = "LengthRepr")]
pub enum Length {
    /// Sized by layout; no explicit value committed yet.
    #[default]
    Auto,
    /// An explicit length in CSS pixels.
    Px(f64),
}

impl Length {
    /// Resolve a CSS length string that does not depend on the viewport.
    ///
    /// Accepts `auto`, `px`, `rem`, `em`, `%` and bare numbers. Percentages
    /// keep their numeric value as pixels, matching how the page builder has
    /// always read them back.
    pub fn parse(raw: &str) -> Result<Self, LengthError> {
        Self::resolve(raw, None)
    }

    /// Like [`Length::parse`], additionally resolving `vw` / `vh` against `viewport`.
    pub fn parse_in(raw: &str, viewport: Viewport) -> Result<Self, LengthError> {
        Self::resolve(raw, Some(viewport))
    }

    fn resolve(raw: &str, viewport: Option<Viewport>) -> Result<Self, LengthError> {
        let s = raw.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }

        let number = |text: &str| -> Result<f64, LengthError> {
            match text.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(LengthError(raw.to_owned())),
            }
        };

        let px = if let Some(v) = s.strip_suffix("px") {
            number(v)?
        } else if let Some(v) = s.strip_suffix("rem") {
            number(v)? * ROOT_FONT_SIZE_PX
        } else if let Some(v) = s.strip_suffix("em") {
            number(v)? * ROOT_FONT_SIZE_PX
        } else if let Some(v) = s.strip_suffix('%') {
            number(v)?
        } else if let Some(v) = s.strip_suffix("vh") {
            let vp = viewport.ok_or_else(|| LengthError(raw.to_owned()))?;
            number(v)? / 100.0 * vp.height
        } else if let Some(v) = s.strip_suffix("vw") {
            let vp = viewport.ok_or_else(|| LengthError(raw.to_owned()))?;
            number(v)? / 100.0 * vp.width
        } else {
            number(s)?
        };
        Ok(Self::Px(px))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Px(v) => write!(f, "{}px", v.round()),
        }
    }
}

/// Wire form of [`Length`]: a number of pixels or a CSS string.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum LengthRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<LengthRepr> for Length {
    type Error = LengthError;

    fn try_from(repr: LengthRepr) -> Result<Self, Self::Error> {
        match repr {
            LengthRepr::Number(v) if v.is_finite() => Ok(Self::Px(v)),
            LengthRepr::Number(v) => Err(LengthError(v.to_string())),
            LengthRepr::Text(s) => Self::parse(&s),
        }
    }
}

impl From<Length> for LengthRepr {
    fn from(length: Length) -> Self {
        match length {
            Length::Auto => Self::Text("auto".into()),
            Length::Px(v) => Self::Number(v),
        }
    }
}

/// Committed width and height of an element; either axis may be `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SizeSpec {
    pub width: Length,
    pub height: Length,
}

impl SizeSpec {
    #[must_use]
    pub fn auto() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn px(width: f64, height: f64) -> Self {
        Self { width: Length::Px(width), height: Length::Px(height) }
    }
}

impl From<Dimensions> for SizeSpec {
    fn from(d: Dimensions) -> Self {
        Self::px(d.width, d.height)
    }
}
