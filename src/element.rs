//! Element model: layout elements on the canvas and the in-memory registry.
//!
//! This module defines what the manipulator knows about each element on the
//! page-builder canvas (`Element`, `ElementKind`), a sparse-update type for
//! host-driven edits (`PartialElement`), and the store that owns them
//! (`ElementStore`).
//!
//! Committed size and position live here. While a session is open the
//! controller computes previews separately; only commits are written back.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constraint::Constraints;
use crate::geometry::{Dimensions, Length, Position, SizeSpec};

/// Unique identifier for a canvas element.
pub type ElementId = Uuid;

/// Semantic role of an element. Informational only; geometry ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Image,
    Title,
    Subtitle,
    Description,
    Text,
    Cta,
    Video,
    #[default]
    Container,
}

impl ElementKind {
    /// Label shown under the selected element.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Title => "Title",
            Self::Subtitle => "Subtitle",
            Self::Description => "Description",
            Self::Text => "Text",
            Self::Cta => "Cta",
            Self::Video => "Video",
            Self::Container => "Container",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A manipulable element as registered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Stable identifier.
    pub id: ElementId,
    /// Semantic role.
    #[serde(default)]
    pub kind: ElementKind,
    /// Committed size; either axis may be `auto`.
    #[serde(default)]
    pub size: SizeSpec,
    /// Committed translation offset.
    #[serde(default)]
    pub position: Position,
    /// Size bounds applied to every resize; the controller default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Constraints>,
    /// Whether the aspect ratio is locked when the modifier is not held.
    #[serde(default)]
    pub lock_aspect_ratio: bool,
    /// Width / height of the intrinsic content. Set once.
    #[serde(default)]
    natural_aspect_ratio: Option<f64>,
}

impl Element {
    /// A free-form element with default constraints and `auto` size.
    #[must_use]
    pub fn new(id: ElementId, kind: ElementKind) -> Self {
        Self {
            id,
            kind,
            size: SizeSpec::auto(),
            position: Position::default(),
            constraints: None,
            lock_aspect_ratio: false,
            natural_aspect_ratio: None,
        }
    }

    #[must_use]
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    /// An image-like element whose intrinsic ratio is already known.
    #[must_use]
    pub fn with_natural_ratio(mut self, ratio: f64) -> Self {
        self.natural_aspect_ratio = valid_ratio(ratio);
        self
    }

    #[must_use]
    pub fn natural_aspect_ratio(&self) -> Option<f64> {
        self.natural_aspect_ratio
    }

    /// Record the intrinsic content size (e.g. when an image finishes loading).
    ///
    /// The ratio is only set if none is known yet. Committed axes that are
    /// still `auto` are filled in from the natural size. Returns whether
    /// anything changed.
    pub fn settle_natural_size(&mut self, natural: Dimensions) -> bool {
        if self.natural_aspect_ratio.is_some() {
            return false;
        }
        let Some(ratio) = natural.aspect_ratio() else {
            return false;
        };
        self.natural_aspect_ratio = Some(ratio);

        self.size = match (self.size.width, self.size.height) {
            (Length::Auto, Length::Auto) => SizeSpec::px(natural.width, natural.height),
            (Length::Px(w), Length::Auto) => SizeSpec::px(w, w / ratio),
            (Length::Auto, Length::Px(h)) => SizeSpec::px(h * ratio, h),
            (Length::Px(_), Length::Px(_)) => self.size,
        };
        true
    }

    /// Forget the intrinsic ratio because the underlying content was replaced.
    pub fn content_changed(&mut self, natural: Option<Dimensions>) {
        self.natural_aspect_ratio = natural.and_then(Dimensions::aspect_ratio);
    }
}

fn valid_ratio(ratio: f64) -> Option<f64> {
    (ratio.is_finite() && ratio > 0.0).then_some(ratio)
}

/// Sparse update for an element. Only present fields are applied.
///
/// The natural aspect ratio is deliberately absent; see
/// [`Element::content_changed`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ElementKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Constraints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_aspect_ratio: Option<bool>,
}

impl PartialElement {
    /// Update carrying a committed resize.
    #[must_use]
    pub fn resized(d: Dimensions) -> Self {
        Self { width: Some(Length::Px(d.width)), height: Some(Length::Px(d.height)), ..Default::default() }
    }

    /// Update carrying a committed move.
    #[must_use]
    pub fn moved(p: Position) -> Self {
        Self { position: Some(p), ..Default::default() }
    }
}

/// In-memory registry of canvas elements.
#[derive(Debug, Default)]
pub struct ElementStore {
    elements: HashMap<ElementId, Element>,
}

impl ElementStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an element.
    pub fn insert(&mut self, element: Element) {
        self.elements.insert(element.id, element);
    }

    /// Remove an element, returning it if it was present.
    pub fn remove(&mut self, id: &ElementId) -> Option<Element> {
        self.elements.remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.elements.contains_key(id)
    }

    /// Apply a partial update. Returns false if the element doesn't exist.
    pub fn apply_partial(&mut self, id: &ElementId, partial: &PartialElement) -> bool {
        let Some(el) = self.elements.get_mut(id) else {
            return false;
        };
        if let Some(kind) = partial.kind {
            el.kind = kind;
        }
        if let Some(w) = partial.width {
            el.size.width = w;
        }
        if let Some(h) = partial.height {
            el.size.height = h;
        }
        if let Some(p) = partial.position {
            el.position = p;
        }
        if let Some(c) = partial.constraints {
            el.constraints = Some(c);
        }
        if let Some(lock) = partial.lock_aspect_ratio {
            el.lock_aspect_ratio = lock;
        }
        true
    }

    /// Replace all elements with a full snapshot.
    pub fn load_snapshot(&mut self, elements: Vec<Element>) {
        self.elements.clear();
        for el in elements {
            self.elements.insert(el.id, el);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
