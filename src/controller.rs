use tracing::{debug, info, trace, warn};

use crate::config::ControllerConfig;
use crate::consts::{CURSOR_GRAB, CURSOR_GRABBING, CURSOR_POINTER};
use crate::element::{Element, ElementId, ElementStore, PartialElement};
use crate::error::BeginError;
use crate::geometry::{Dimensions, Point, Position, SizeSpec};
use crate::handle::Handle;
use crate::input::{Button, Key, ModifierTracker, PointerEvent};
use crate::platform::Platform;
use crate::resize::{format_readout, AspectPolicy};
use crate::selection::SelectionModel;
use crate::session::{InteractionSession, Preview, SessionHandle, SessionKind, SessionSlot, SessionStart};

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    /// Live, non-authoritative value to render while a session is open.
    Preview { id: ElementId, preview: Preview },
    /// Final size of a resize session (`onResizeCommit`).
    ResizeCommitted { id: ElementId, dimensions: Dimensions },
    /// Final offset of a move session (`onMoveCommit`).
    MoveCommitted { id: ElementId, position: Position },
    /// Body click selected an element (`onSelect`).
    Selected { id: ElementId },
    /// The previously selected element lost the selection.
    Deselected { id: ElementId },
    /// Document cursor override for the session; `None` restores the default.
    SetCursor { cursor: Option<&'static str> },
    /// Ask the platform for an animation frame to flush a throttled preview.
    RequestFrame,
    RenderNeeded,
}

/// The authoritative result of a session, delivered once at its end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Commit {
    Resize { id: ElementId, dimensions: Dimensions },
    Move { id: ElementId, position: Position },
}

impl Commit {
    fn from_preview(id: ElementId, preview: Preview) -> Self {
        match preview {
            Preview::Resize(dimensions) => Self::Resize { id, dimensions },
            Preview::Move(position) => Self::Move { id, position },
        }
    }

    #[must_use]
    pub fn id(&self) -> ElementId {
        match self {
            Self::Resize { id, .. } | Self::Move { id, .. } => *id,
        }
    }

    /// The committed value as a sparse element update.
    #[must_use]
    pub fn partial(&self) -> PartialElement {
        match self {
            Self::Resize { dimensions, .. } => PartialElement::resized(*dimensions),
            Self::Move { position, .. } => PartialElement::moved(*position),
        }
    }

    fn into_action(self) -> Action {
        match self {
            Self::Resize { id, dimensions } => Action::ResizeCommitted { id, dimensions },
            Self::Move { id, position } => Action::MoveCommitted { id, position },
        }
    }
}

/// Outcome of feeding one pointer-move to the open session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreviewResult {
    /// No session is open.
    Idle,
    /// The event had no usable coordinates; the session is unchanged.
    Skipped,
    Updated(Preview),
}

/// Everything the renderer needs to draw one element.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementView {
    pub editing: bool,
    pub selected: bool,
    /// Resize handles are shown on every element while editing.
    pub handles_visible: bool,
    /// Handle being dragged, if this element is being resized.
    pub active_handle: Option<Handle>,
    /// Whether pointer-down on the body starts a move.
    pub movable: bool,
    /// Body cursor; `None` outside edit mode.
    pub body_cursor: Option<&'static str>,
    /// Type label, only for the selected element.
    pub label: Option<&'static str>,
    /// Live size (preview while resizing, committed otherwise).
    pub size: SizeSpec,
    /// Live offset (preview while moving, committed otherwise).
    pub position: Position,
    /// `"W × Hpx"` while this element is being resized.
    pub readout: Option<String>,
    /// Usage hint for ratio-aware elements while editing and idle.
    pub hint: Option<String>,
}

/// Drives resize/move sessions from native pointer and keyboard events.
///
/// Owns the element registry, selection, lock-modifier state and the single
/// session slot. All platform effects (measuring boxes, attaching listeners)
/// go through `P`, so this type is fully testable without a browser.
pub struct Controller<P: Platform> {
    platform: P,
    config: ControllerConfig,
    elements: ElementStore,
    selection: SelectionModel,
    slot: SessionSlot,
    modifier: ModifierTracker,
    pending_move: Option<PointerEvent>,
    frame_requested: bool,
}

impl<P: Platform> Controller<P> {
    pub fn new(platform: P, config: ControllerConfig) -> Self {
        let modifier = ModifierTracker::new(&config.lock_modifier);
        Self {
            platform,
            config,
            elements: ElementStore::new(),
            selection: SelectionModel::new(),
            slot: SessionSlot::new(),
            modifier,
            pending_move: None,
            frame_requested: false,
        }
    }

    // --- Registry ---

    /// Register (or replace) an element.
    pub fn add_element(&mut self, element: Element) {
        self.elements.insert(element);
    }

    /// Replace every element. A session whose target disappears is closed.
    pub fn load_snapshot(&mut self, elements: Vec<Element>) -> Vec<Action> {
        self.elements.load_snapshot(elements);
        let mut actions = Vec::new();
        if let Some(active) = self.selection.active() {
            if !self.elements.contains(&active) {
                self.selection.forget(active);
                actions.push(Action::Deselected { id: active });
            }
        }
        if let Some(commit) = self.reap_orphan() {
            actions.extend(commit_actions(commit));
        }
        actions
    }

    /// Remove an element. An open session targeting it is force-closed
    /// with its last preview, so no session outlives its element.
    pub fn remove_element(&mut self, id: ElementId) -> Vec<Action> {
        self.elements.remove(&id);
        let mut actions = Vec::new();
        if self.selection.forget(id) {
            actions.push(Action::Deselected { id });
        }
        if let Some(commit) = self.reap_orphan() {
            actions.extend(commit_actions(commit));
        } else {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Apply a host-side edit to committed state.
    pub fn apply_update(&mut self, id: ElementId, fields: &PartialElement) -> bool {
        self.elements.apply_partial(&id, fields)
    }

    /// Content finished loading with the given intrinsic size.
    pub fn settle_natural_size(&mut self, id: ElementId, natural: Dimensions) -> bool {
        self.elements.get_mut(&id).is_some_and(|el| el.settle_natural_size(natural))
    }

    /// The element's content was replaced.
    pub fn content_changed(&mut self, id: ElementId, natural: Option<Dimensions>) -> bool {
        let Some(el) = self.elements.get_mut(&id) else {
            return false;
        };
        el.content_changed(natural);
        true
    }

    // --- Selection ---

    pub fn set_edit_mode(&mut self, editing: bool) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(prev) = self.selection.set_editing(editing) {
            actions.push(Action::Deselected { id: prev });
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Click on an element's body.
    pub fn on_body_click(&mut self, id: ElementId) -> Vec<Action> {
        if !self.selection.is_editing() || !self.elements.contains(&id) {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if let Some(prev) = self.selection.select(id) {
            actions.push(Action::Deselected { id: prev });
        }
        actions.push(Action::Selected { id });
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Pointer-down on the canvas outside every element.
    pub fn on_background_click(&mut self) -> Vec<Action> {
        match self.selection.deselect() {
            Some(prev) => vec![Action::Deselected { id: prev }, Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    // --- Keyboard ---

    pub fn on_key_down(&mut self, key: &Key) {
        if self.modifier.key_down(key) {
            trace!(key = %key.0, "lock modifier down");
        }
    }

    pub fn on_key_up(&mut self, key: &Key) {
        if self.modifier.key_up(key) {
            trace!(key = %key.0, "lock modifier up");
        }
    }

    /// Window lost focus.
    pub fn on_blur(&mut self) {
        self.modifier.reset();
    }

    // --- Session lifecycle ---

    /// Open a session on `id`, measuring its live box and recording `origin`.
    ///
    /// Rejected with [`BeginError::SessionOpen`] while another session is open;
    /// the open session is not touched. The locked ratio is the element's
    /// natural ratio, or the measured box's ratio when it has none.
    pub fn begin(&mut self, kind: SessionKind, id: ElementId, origin: Point) -> Result<SessionHandle, BeginError> {
        let modifier_pressed = self.modifier.pressed();
        let Self { platform, config, elements, slot, .. } = self;

        let result = slot.try_open(id, || {
            let el = elements.get(&id).ok_or(BeginError::UnknownElement(id))?;
            let snapshot = platform.measure(id).ok_or(BeginError::Unmeasured(id))?;
            let listeners = platform.attach_listeners()?;
            Ok(SessionStart {
                kind,
                target: id,
                snapshot,
                pointer_origin: origin,
                start_position: el.position,
                constraints: el.constraints.unwrap_or(config.default_constraints),
                aspect: AspectPolicy::new(
                    el.natural_aspect_ratio().or_else(|| snapshot.dimensions().aspect_ratio()),
                    el.lock_aspect_ratio,
                    modifier_pressed,
                ),
                listeners,
            })
        });

        match &result {
            Ok(handle) => info!(session = %handle.id, element = %id, ?kind, "session opened"),
            Err(err @ BeginError::SessionOpen { .. }) => warn!(%err, "concurrent session request rejected"),
            Err(err) => debug!(%err, element = %id, "session not opened"),
        }
        result
    }

    /// Feed a pointer-move to the open session and return the live preview.
    /// Committed state is not touched.
    pub fn update(&mut self, event: &PointerEvent) -> PreviewResult {
        let modifier_pressed = self.modifier.pressed();
        let Some(session) = self.slot.current_mut() else {
            return PreviewResult::Idle;
        };
        let Some(pointer) = event.sample() else {
            debug!(session = %session.id(), "pointer sample without coordinates; skipped");
            return PreviewResult::Skipped;
        };
        let preview = session.update(pointer, modifier_pressed);
        trace!(session = %session.id(), ?preview, "preview");
        PreviewResult::Updated(preview)
    }

    /// Close the open session with the pointer-up sample, release its
    /// listeners, and commit the final value.
    pub fn end(&mut self, event: &PointerEvent) -> Option<Commit> {
        self.flush_pending();
        if self.update(event) == PreviewResult::Idle {
            return None;
        }
        let session = self.slot.take()?;
        Some(self.close(session))
    }

    /// Apply a move still waiting for its animation frame.
    fn flush_pending(&mut self) {
        if let Some(pending) = self.pending_move.take() {
            self.update(&pending);
        }
    }

    fn close(&mut self, session: InteractionSession) -> Commit {
        let sid = session.id();
        let id = session.target();
        let commit = Commit::from_preview(id, session.close());
        self.elements.apply_partial(&id, &commit.partial());
        info!(session = %sid, element = %id, ?commit, "session closed");
        commit
    }

    /// Force-close the session if its element is gone from the registry or the document.
    fn reap_orphan(&mut self) -> Option<Commit> {
        let target = self.slot.current()?.target();
        if self.elements.contains(&target) && self.platform.is_mounted(target) {
            return None;
        }
        warn!(element = %target, "session target removed; closing with last preview");
        self.flush_pending();
        let session = self.slot.take()?;
        Some(self.close(session))
    }

    // --- Native events ---

    /// Pointer-down on one of an element's resize handles.
    pub fn on_handle_pointer_down(&mut self, id: ElementId, handle: Handle, event: PointerEvent) -> Vec<Action> {
        if event.button != Button::Primary || !self.selection.can_resize(id) {
            return Vec::new();
        }
        self.open_from_event(SessionKind::Resize(handle), id, event, handle.cursor())
    }

    /// Pointer-down on an element's body; moves only the selected element.
    pub fn on_body_pointer_down(&mut self, id: ElementId, event: PointerEvent) -> Vec<Action> {
        if event.button != Button::Primary || !self.selection.can_move(id) {
            return Vec::new();
        }
        self.open_from_event(SessionKind::Move, id, event, CURSOR_GRABBING)
    }

    fn open_from_event(&mut self, kind: SessionKind, id: ElementId, event: PointerEvent, cursor: &'static str) -> Vec<Action> {
        let Some(origin) = event.sample() else {
            debug!(element = %id, "pointer-down without coordinates ignored");
            return Vec::new();
        };
        match self.begin(kind, id, origin) {
            Ok(_) => vec![Action::SetCursor { cursor: Some(cursor) }, Action::RenderNeeded],
            Err(_) => Vec::new(),
        }
    }

    /// Document-level pointer-move.
    pub fn on_pointer_move(&mut self, event: PointerEvent) -> Vec<Action> {
        if let Some(commit) = self.reap_orphan() {
            return commit_actions(commit);
        }
        if !self.slot.is_open() {
            return Vec::new();
        }
        if self.config.throttle_previews {
            self.pending_move = Some(event);
            if self.frame_requested {
                return Vec::new();
            }
            self.frame_requested = true;
            return vec![Action::RequestFrame];
        }
        self.preview_actions(&event)
    }

    /// Animation frame requested via [`Action::RequestFrame`] fired.
    pub fn on_animation_frame(&mut self) -> Vec<Action> {
        self.frame_requested = false;
        if let Some(commit) = self.reap_orphan() {
            return commit_actions(commit);
        }
        match self.pending_move.take() {
            Some(event) => self.preview_actions(&event),
            None => Vec::new(),
        }
    }

    /// Document-level pointer-up. Always closes an open session.
    pub fn on_pointer_up(&mut self, event: PointerEvent) -> Vec<Action> {
        if let Some(commit) = self.reap_orphan() {
            return commit_actions(commit);
        }
        match self.end(&event) {
            Some(commit) => commit_actions(commit),
            None => Vec::new(),
        }
    }

    fn preview_actions(&mut self, event: &PointerEvent) -> Vec<Action> {
        let Some(id) = self.slot.current().map(InteractionSession::target) else {
            return Vec::new();
        };
        match self.update(event) {
            PreviewResult::Updated(preview) => vec![Action::Preview { id, preview }, Action::RenderNeeded],
            PreviewResult::Idle | PreviewResult::Skipped => Vec::new(),
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn session(&self) -> Option<&InteractionSession> {
        self.slot.current()
    }

    #[must_use]
    pub fn is_session_open(&self) -> bool {
        self.slot.is_open()
    }

    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    #[must_use]
    pub fn elements(&self) -> &ElementStore {
        &self.elements
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    #[must_use]
    pub fn modifier_pressed(&self) -> bool {
        self.modifier.pressed()
    }

    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    #[must_use]
    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Dimension readout, only while a resize session is open.
    #[must_use]
    pub fn readout(&self) -> Option<String> {
        match self.slot.current()?.last_preview() {
            Preview::Resize(d) => Some(format_readout(d)),
            Preview::Move(_) => None,
        }
    }

    /// Render state for one element.
    #[must_use]
    pub fn view(&self, id: ElementId) -> Option<ElementView> {
        let el = self.elements.get(&id)?;
        let editing = self.selection.is_editing();
        let selected = self.selection.is_selected(id);
        let session = self.slot.current().filter(|s| s.target() == id);

        let mut size = el.size;
        let mut position = el.position;
        let mut readout = None;
        let mut moving = false;
        match session.map(InteractionSession::last_preview) {
            Some(Preview::Resize(d)) => {
                size = d.into();
                readout = Some(format_readout(d));
            }
            Some(Preview::Move(p)) => {
                position = p;
                moving = true;
            }
            None => {}
        }

        let body_cursor = editing.then_some(if moving {
            CURSOR_GRABBING
        } else if selected {
            CURSOR_GRAB
        } else {
            CURSOR_POINTER
        });

        let hint = (editing && session.is_none() && el.natural_aspect_ratio().is_some()).then(|| {
            let action = if el.lock_aspect_ratio { "free resize" } else { "lock ratio" };
            format!("Drag handles to resize • Hold {} to {action}", self.modifier.key())
        });

        Some(ElementView {
            editing,
            selected,
            handles_visible: self.selection.can_resize(id),
            active_handle: session.and_then(|s| s.kind().handle()),
            movable: self.selection.can_move(id),
            body_cursor,
            label: selected.then(|| el.kind.label()),
            size,
            position,
            readout,
            hint,
        })
    }
}

fn commit_actions(commit: Commit) -> Vec<Action> {
    vec![commit.into_action(), Action::SetCursor { cursor: None }, Action::RenderNeeded]
}
