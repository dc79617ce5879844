//! Interaction sessions and the single global session slot.
//!
//! A session is the record of one resize or move, from pointer-down to
//! pointer-up. It owns the listener registration for its duration, so
//! dropping the session (for any reason) detaches the document listeners.
//! At most one session exists at a time: [`SessionSlot::try_open`] checks
//! and fills the slot in a single call and rejects a second request.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constraint::Constraints;
use crate::element::ElementId;
use crate::error::BeginError;
use crate::geometry::{Dimensions, GeometrySnapshot, Point, Position};
use crate::handle::Handle;
use crate::platform::ListenerRegistration;
use crate::position::translate;
use crate::resize::{compute, AspectPolicy};

/// What a session does. Only resize sessions carry a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "handle", rename_all = "lowercase")]
pub enum SessionKind {
    Resize(Handle),
    Move,
}

impl SessionKind {
    #[must_use]
    pub fn handle(self) -> Option<Handle> {
        match self {
            Self::Resize(h) => Some(h),
            Self::Move => None,
        }
    }

    #[must_use]
    pub fn is_resize(self) -> bool {
        matches!(self, Self::Resize(_))
    }
}

/// Monotonic identifier of a session within one controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Returned by a successful begin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionHandle {
    pub id: SessionId,
    pub target: ElementId,
    pub kind: SessionKind,
}

/// A live (non-authoritative) value derived during a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Preview {
    Resize(Dimensions),
    Move(Position),
}

/// Everything needed to open a session.
#[derive(Debug)]
pub struct SessionStart {
    pub kind: SessionKind,
    pub target: ElementId,
    /// Box measured from the live DOM, not the committed size.
    pub snapshot: GeometrySnapshot,
    pub pointer_origin: Point,
    /// Committed translation at pointer-down (move sessions start here).
    pub start_position: Position,
    pub constraints: Constraints,
    /// Ratio and default lock; the modifier is sampled per update.
    pub aspect: AspectPolicy,
    pub listeners: ListenerRegistration,
}

/// An in-progress resize or move.
#[derive(Debug)]
pub struct InteractionSession {
    id: SessionId,
    kind: SessionKind,
    target: ElementId,
    snapshot: GeometrySnapshot,
    pointer_origin: Point,
    start_position: Position,
    constraints: Constraints,
    aspect: AspectPolicy,
    last_preview: Preview,
    listeners: ListenerRegistration,
}

impl InteractionSession {
    fn open(id: SessionId, start: SessionStart) -> Self {
        let initial = preview_for(
            start.kind,
            &start.snapshot,
            start.pointer_origin,
            start.pointer_origin,
            start.start_position,
            &start.constraints,
            start.aspect,
        );
        Self {
            id,
            kind: start.kind,
            target: start.target,
            snapshot: start.snapshot,
            pointer_origin: start.pointer_origin,
            start_position: start.start_position,
            constraints: start.constraints,
            aspect: start.aspect,
            last_preview: initial,
            listeners: start.listeners,
        }
    }

    /// Recompute the preview for `pointer` with the current modifier state,
    /// remembering it as the last known value.
    pub fn update(&mut self, pointer: Point, modifier_pressed: bool) -> Preview {
        self.aspect.modifier_pressed = modifier_pressed;
        self.last_preview = preview_for(
            self.kind,
            &self.snapshot,
            self.pointer_origin,
            pointer,
            self.start_position,
            &self.constraints,
            self.aspect,
        );
        self.last_preview
    }

    /// Close the session, detaching its listeners, and return the final value.
    pub fn close(self) -> Preview {
        let Self { last_preview, listeners, .. } = self;
        listeners.release();
        last_preview
    }

    #[must_use]
    pub fn handle(&self) -> SessionHandle {
        SessionHandle { id: self.id, target: self.target, kind: self.kind }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    #[must_use]
    pub fn target(&self) -> ElementId {
        self.target
    }

    #[must_use]
    pub fn snapshot(&self) -> &GeometrySnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn pointer_origin(&self) -> Point {
        self.pointer_origin
    }

    /// Modifier state seen by the most recent update.
    #[must_use]
    pub fn modifier(&self) -> bool {
        self.aspect.modifier_pressed
    }

    #[must_use]
    pub fn last_preview(&self) -> Preview {
        self.last_preview
    }

    #[must_use]
    pub fn listeners_active(&self) -> bool {
        self.listeners.is_active()
    }
}

fn preview_for(
    kind: SessionKind,
    snapshot: &GeometrySnapshot,
    origin: Point,
    pointer: Point,
    start_position: Position,
    constraints: &Constraints,
    aspect: AspectPolicy,
) -> Preview {
    let delta = pointer.delta_from(origin);
    match kind {
        SessionKind::Resize(handle) => Preview::Resize(compute(handle, snapshot, delta, constraints, aspect)),
        SessionKind::Move => Preview::Move(translate(start_position, delta)),
    }
}

/// The process-wide slot holding at most one session.
#[derive(Debug, Default)]
pub struct SessionSlot {
    current: Option<InteractionSession>,
    issued: u64,
}

impl SessionSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session for `requested` unless one is already open.
    ///
    /// `build` runs only when the slot is free; if it fails the slot stays
    /// empty. A rejection leaves the open session untouched.
    pub fn try_open<F>(&mut self, requested: ElementId, build: F) -> Result<SessionHandle, BeginError>
    where
        F: FnOnce() -> Result<SessionStart, BeginError>,
    {
        if let Some(open) = &self.current {
            return Err(BeginError::SessionOpen { open: open.target, requested });
        }
        let start = build()?;
        self.issued += 1;
        let session = InteractionSession::open(SessionId(self.issued), start);
        let handle = session.handle();
        self.current = Some(session);
        Ok(handle)
    }

    /// Remove the open session from the slot.
    pub fn take(&mut self) -> Option<InteractionSession> {
        self.current.take()
    }

    #[must_use]
    pub fn current(&self) -> Option<&InteractionSession> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut InteractionSession> {
        self.current.as_mut()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Whether the open session targets `id`.
    #[must_use]
    pub fn targets(&self, id: ElementId) -> bool {
        self.current.as_ref().is_some_and(|s| s.target == id)
    }
}
