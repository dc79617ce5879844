//! Browser bridge: the web-sys [`Platform`] and the `Manipulator` wasm export.
//!
//! The host page renders elements and their handles and forwards pointer-downs
//! and clicks on them here. Document `pointermove`/`pointerup`/`pointercancel`
//! listeners are attached only while a session is open; window key and blur
//! listeners live as long as the `Manipulator`. Results go back through host
//! callbacks.

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use js_sys::Function;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, EventTarget, HtmlElement, KeyboardEvent, MouseEvent, Window};

use crate::config::ControllerConfig;
use crate::controller::{Action, Controller};
use crate::element::{Element, ElementId, PartialElement};
use crate::error::ListenerError;
use crate::geometry::{Dimensions, GeometrySnapshot, Length, Point, Viewport};
use crate::handle::Handle;
use crate::input::{Button, Key, PointerEvent};
use crate::platform::{ListenerRegistration, Platform};

// =============================================================================
// Platform
// =============================================================================

/// Role of a document event while a session is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEvent {
    Move,
    End,
}

/// Document events listened to for the duration of a session.
const SESSION_EVENTS: [(&str, SessionEvent); 3] = [
    ("pointermove", SessionEvent::Move),
    ("pointerup", SessionEvent::End),
    ("pointercancel", SessionEvent::End),
];

/// JS functions backing the per-session document listeners.
struct DocumentHandlers {
    on_move: Function,
    on_up: Function,
}

impl DocumentHandlers {
    fn handler(&self, event: SessionEvent) -> &Function {
        match event {
            SessionEvent::Move => &self.on_move,
            SessionEvent::End => &self.on_up,
        }
    }
}

/// [`Platform`] over live DOM nodes.
pub struct DomPlatform {
    document: Document,
    nodes: HashMap<ElementId, HtmlElement>,
    handlers: Option<DocumentHandlers>,
}

impl DomPlatform {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document, nodes: HashMap::new(), handlers: None }
    }

    /// Associate an element id with its rendered node.
    pub fn register(&mut self, id: ElementId, node: HtmlElement) {
        self.nodes.insert(id, node);
    }

    pub fn unregister(&mut self, id: ElementId) -> Option<HtmlElement> {
        self.nodes.remove(&id)
    }

    fn install(&mut self, handlers: DocumentHandlers) {
        self.handlers = Some(handlers);
    }
}

impl Platform for DomPlatform {
    fn measure(&self, id: ElementId) -> Option<GeometrySnapshot> {
        let rect = self.nodes.get(&id)?.get_bounding_client_rect();
        Some(GeometrySnapshot::new(rect.width(), rect.height(), rect.x(), rect.y()))
    }

    fn is_mounted(&self, id: ElementId) -> bool {
        self.nodes.get(&id).is_some_and(|node| node.is_connected())
    }

    fn attach_listeners(&mut self) -> Result<ListenerRegistration, ListenerError> {
        let handlers = self
            .handlers
            .as_ref()
            .ok_or_else(|| ListenerError("document handlers not installed".into()))?;
        let target: EventTarget = self.document.clone().into();

        let mut attached: Vec<(&'static str, Function)> = Vec::with_capacity(SESSION_EVENTS.len());
        for (kind, event) in SESSION_EVENTS {
            let callback = handlers.handler(event).clone();
            if let Err(err) = target.add_event_listener_with_callback(kind, &callback) {
                for (kind, callback) in &attached {
                    remove_listener(&target, kind, callback);
                }
                return Err(listener_error(err));
            }
            attached.push((kind, callback));
        }

        Ok(ListenerRegistration::new(move || {
            for (kind, callback) in &attached {
                remove_listener(&target, kind, callback);
            }
        }))
    }
}

fn listener_error(err: JsValue) -> ListenerError {
    ListenerError(format!("{err:?}"))
}

fn remove_listener(target: &EventTarget, kind: &str, callback: &Function) {
    if let Err(err) = target.remove_event_listener_with_callback(kind, callback) {
        warn!(kind, ?err, "failed to remove listener");
    }
}

// =============================================================================
// Shared state
// =============================================================================

/// Host callbacks. Unset callbacks are skipped.
#[derive(Default)]
struct Callbacks {
    resize_commit: Option<Function>,
    move_commit: Option<Function>,
    select: Option<Function>,
    deselect: Option<Function>,
    preview: Option<Function>,
    render: Option<Function>,
}

/// Id of the animation frame requested and not yet fired.
#[derive(Debug, Default)]
struct PendingFrame(Cell<Option<i32>>);

impl PendingFrame {
    fn scheduled(&self, id: i32) {
        self.0.set(Some(id));
    }

    fn fired(&self) {
        self.0.set(None);
    }

    fn take(&self) -> Option<i32> {
        self.0.take()
    }
}

struct Shared {
    controller: RefCell<Controller<DomPlatform>>,
    callbacks: RefCell<Callbacks>,
    window: Window,
    document: Document,
    frame: RefCell<Option<Function>>,
    pending_frame: PendingFrame,
}

impl Shared {
    /// Run `f` against the controller, then hand the resulting actions to the
    /// host. The controller borrow ends before any host callback runs.
    fn run<F>(&self, f: F)
    where
        F: FnOnce(&mut Controller<DomPlatform>) -> Vec<Action>,
    {
        let actions = match self.controller.try_borrow_mut() {
            Ok(mut controller) => f(&mut controller),
            Err(_) => {
                warn!("re-entrant controller access ignored");
                return;
            }
        };
        self.dispatch(actions);
    }

    fn read<T>(&self, f: impl FnOnce(&Controller<DomPlatform>) -> T) -> Option<T> {
        match self.controller.try_borrow() {
            Ok(controller) => Some(f(&controller)),
            Err(_) => {
                warn!("controller busy; query skipped");
                None
            }
        }
    }

    fn callback(&self, pick: impl FnOnce(&Callbacks) -> Option<Function>) -> Option<Function> {
        match self.callbacks.try_borrow() {
            Ok(callbacks) => pick(&callbacks),
            Err(_) => None,
        }
    }

    fn dispatch(&self, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::Preview { id, preview } => {
                    let Some(f) = self.callback(|c| c.preview.clone()) else {
                        continue;
                    };
                    match serde_json::to_string(&preview) {
                        Ok(json) => report("onPreview", f.call2(&JsValue::NULL, &id_value(id), &JsValue::from_str(&json))),
                        Err(err) => warn!(%err, "failed to encode preview"),
                    }
                }
                Action::ResizeCommitted { id, dimensions } => {
                    if let Some(f) = self.callback(|c| c.resize_commit.clone()) {
                        let (w, h) = (JsValue::from_f64(dimensions.width), JsValue::from_f64(dimensions.height));
                        report("onResizeCommit", f.call3(&JsValue::NULL, &id_value(id), &w, &h));
                    }
                }
                Action::MoveCommitted { id, position } => {
                    if let Some(f) = self.callback(|c| c.move_commit.clone()) {
                        let (x, y) = (JsValue::from_f64(position.x), JsValue::from_f64(position.y));
                        report("onMoveCommit", f.call3(&JsValue::NULL, &id_value(id), &x, &y));
                    }
                }
                Action::Selected { id } => {
                    if let Some(f) = self.callback(|c| c.select.clone()) {
                        report("onSelect", f.call1(&JsValue::NULL, &id_value(id)));
                    }
                }
                Action::Deselected { id } => {
                    if let Some(f) = self.callback(|c| c.deselect.clone()) {
                        report("onDeselect", f.call1(&JsValue::NULL, &id_value(id)));
                    }
                }
                Action::SetCursor { cursor } => self.set_cursor(cursor),
                Action::RequestFrame => self.request_frame(),
                Action::RenderNeeded => {
                    if let Some(f) = self.callback(|c| c.render.clone()) {
                        report("onRender", f.call0(&JsValue::NULL));
                    }
                }
            }
        }
    }

    fn set_cursor(&self, cursor: Option<&'static str>) {
        let Some(body) = self.document.body() else {
            return;
        };
        let style = body.style();
        let result = match cursor {
            Some(cursor) => style.set_property("cursor", cursor),
            None => style.remove_property("cursor").map(|_| ()),
        };
        if let Err(err) = result {
            debug!(?err, "failed to set document cursor");
        }
    }

    fn request_frame(&self) {
        let frame = match self.frame.try_borrow() {
            Ok(frame) => frame.clone(),
            Err(_) => None,
        };
        let Some(frame) = frame else {
            return;
        };
        match self.window.request_animation_frame(&frame) {
            Ok(id) => self.pending_frame.scheduled(id),
            Err(err) => {
                warn!(?err, "requestAnimationFrame failed; flushing preview now");
                self.run(Controller::on_animation_frame);
            }
        }
    }

    fn viewport(&self) -> Viewport {
        let read = |value: Result<JsValue, JsValue>| match value {
            Ok(v) => v.as_f64().unwrap_or(0.0),
            Err(_) => 0.0,
        };
        Viewport { width: read(self.window.inner_width()), height: read(self.window.inner_height()) }
    }
}

fn id_value(id: ElementId) -> JsValue {
    JsValue::from_str(&id.to_string())
}

fn report(callback: &'static str, result: Result<JsValue, JsValue>) {
    if let Err(err) = result {
        warn!(callback, ?err, "host callback threw");
    }
}

fn to_js(err: impl fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_id(raw: &str) -> Result<ElementId, JsValue> {
    ElementId::parse_str(raw).map_err(to_js)
}

fn pointer_sample(x: f64, y: f64, button: i16) -> PointerEvent {
    PointerEvent { position: Some(Point::new(x, y)), button: Button::from_dom(button) }
}

fn mouse_sample(event: &MouseEvent) -> PointerEvent {
    pointer_sample(f64::from(event.client_x()), f64::from(event.client_y()), event.button())
}

// =============================================================================
// Listeners
// =============================================================================

type PointerFn = fn(&mut Controller<DomPlatform>, PointerEvent) -> Vec<Action>;
type KeyFn = fn(&mut Controller<DomPlatform>, &Key);

/// Closures handed to the browser. They hold only a weak reference, so
/// dropping the `Manipulator` drops the controller (and any open session).
struct Closures {
    on_move: Closure<dyn FnMut(MouseEvent)>,
    on_up: Closure<dyn FnMut(MouseEvent)>,
    on_key_down: Closure<dyn FnMut(KeyboardEvent)>,
    on_key_up: Closure<dyn FnMut(KeyboardEvent)>,
    on_blur: Closure<dyn FnMut()>,
    on_frame: Closure<dyn FnMut(f64)>,
}

impl Closures {
    fn new(shared: &Rc<Shared>) -> Self {
        let weak = Rc::downgrade(shared);
        let on_blur = {
            let weak = Weak::clone(&weak);
            Closure::wrap(Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.run(|c| {
                        c.on_blur();
                        Vec::new()
                    });
                }
            }) as Box<dyn FnMut()>)
        };
        let on_frame = {
            let weak = Weak::clone(&weak);
            Closure::wrap(Box::new(move |_ts: f64| {
                if let Some(shared) = weak.upgrade() {
                    shared.pending_frame.fired();
                    shared.run(Controller::on_animation_frame);
                }
            }) as Box<dyn FnMut(f64)>)
        };
        Self {
            on_move: pointer_closure(&weak, Controller::on_pointer_move),
            on_up: pointer_closure(&weak, Controller::on_pointer_up),
            on_key_down: key_closure(&weak, Controller::on_key_down),
            on_key_up: key_closure(&weak, Controller::on_key_up),
            on_blur,
            on_frame,
        }
    }

    fn window_listeners(&self) -> [(&'static str, &Function); 3] {
        [
            ("keydown", self.on_key_down.as_ref().unchecked_ref()),
            ("keyup", self.on_key_up.as_ref().unchecked_ref()),
            ("blur", self.on_blur.as_ref().unchecked_ref()),
        ]
    }
}

fn pointer_closure(weak: &Weak<Shared>, handler: PointerFn) -> Closure<dyn FnMut(MouseEvent)> {
    let weak = Weak::clone(weak);
    Closure::wrap(Box::new(move |event: MouseEvent| {
        if let Some(shared) = weak.upgrade() {
            let sample = mouse_sample(&event);
            shared.run(|c| handler(c, sample));
        }
    }) as Box<dyn FnMut(MouseEvent)>)
}

fn key_closure(weak: &Weak<Shared>, handler: KeyFn) -> Closure<dyn FnMut(KeyboardEvent)> {
    let weak = Weak::clone(weak);
    Closure::wrap(Box::new(move |event: KeyboardEvent| {
        if let Some(shared) = weak.upgrade() {
            let key = Key(event.key());
            shared.run(|c| {
                handler(c, &key);
                Vec::new()
            });
        }
    }) as Box<dyn FnMut(KeyboardEvent)>)
}

// =============================================================================
// Manipulator
// =============================================================================

/// Resize/move controller for a page-builder canvas, driven from JS.
#[wasm_bindgen]
pub struct Manipulator {
    shared: Rc<Shared>,
    closures: Closures,
}

#[wasm_bindgen]
impl Manipulator {
    /// Create a manipulator bound to the current window. `config` is an
    /// optional JSON object (see `ControllerConfig`).
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<Manipulator, JsValue> {
        let config = match config.as_deref() {
            Some(raw) => ControllerConfig::from_json(raw).map_err(to_js)?,
            None => ControllerConfig::default(),
        };
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

        let shared = Rc::new(Shared {
            controller: RefCell::new(Controller::new(DomPlatform::new(document.clone()), config)),
            callbacks: RefCell::default(),
            window,
            document,
            frame: RefCell::new(None),
            pending_frame: PendingFrame::default(),
        });
        let closures = Closures::new(&shared);

        shared.controller.borrow_mut().platform_mut().install(DocumentHandlers {
            on_move: closures.on_move.as_ref().unchecked_ref::<Function>().clone(),
            on_up: closures.on_up.as_ref().unchecked_ref::<Function>().clone(),
        });
        *shared.frame.borrow_mut() = Some(closures.on_frame.as_ref().unchecked_ref::<Function>().clone());

        let target: &EventTarget = shared.window.as_ref();
        for (kind, callback) in closures.window_listeners() {
            target.add_event_listener_with_callback(kind, callback)?;
        }

        debug!("manipulator attached to window");
        Ok(Self { shared, closures })
    }

    // =========================================================================
    // Callbacks
    // =========================================================================

    /// `(id, width, height)` once per resize session.
    #[wasm_bindgen(js_name = onResizeCommit)]
    pub fn on_resize_commit(&self, callback: Option<Function>) {
        self.set_callback(|c| c.resize_commit = callback);
    }

    /// `(id, x, y)` once per move session.
    #[wasm_bindgen(js_name = onMoveCommit)]
    pub fn on_move_commit(&self, callback: Option<Function>) {
        self.set_callback(|c| c.move_commit = callback);
    }

    /// `(id)` when a body click selects an element.
    #[wasm_bindgen(js_name = onSelect)]
    pub fn on_select(&self, callback: Option<Function>) {
        self.set_callback(|c| c.select = callback);
    }

    /// `(id)` when an element loses the selection.
    #[wasm_bindgen(js_name = onDeselect)]
    pub fn on_deselect(&self, callback: Option<Function>) {
        self.set_callback(|c| c.deselect = callback);
    }

    /// `(id, previewJson)` for every live preview.
    #[wasm_bindgen(js_name = onPreview)]
    pub fn on_preview(&self, callback: Option<Function>) {
        self.set_callback(|c| c.preview = callback);
    }

    /// `()` whenever views may have changed.
    #[wasm_bindgen(js_name = onRender)]
    pub fn on_render(&self, callback: Option<Function>) {
        self.set_callback(|c| c.render = callback);
    }

    // =========================================================================
    // Elements
    // =========================================================================

    /// Register an element (JSON, see `Element`) with its rendered node.
    #[wasm_bindgen(js_name = registerElement)]
    pub fn register_element(&self, node: HtmlElement, element: &str) -> Result<(), JsValue> {
        let element: Element = serde_json::from_str(element).map_err(to_js)?;
        let id = element.id;
        self.shared.run(|c| {
            c.platform_mut().register(id, node);
            c.add_element(element);
            vec![Action::RenderNeeded]
        });
        Ok(())
    }

    #[wasm_bindgen(js_name = unregisterElement)]
    pub fn unregister_element(&self, id: &str) -> Result<(), JsValue> {
        let id = parse_id(id)?;
        self.shared.run(|c| {
            c.platform_mut().unregister(id);
            c.remove_element(id)
        });
        Ok(())
    }

    /// Apply a sparse update (JSON, see `PartialElement`) to committed state.
    #[wasm_bindgen(js_name = applyUpdate)]
    pub fn apply_update(&self, id: &str, fields: &str) -> Result<bool, JsValue> {
        let id = parse_id(id)?;
        let fields: PartialElement = serde_json::from_str(fields).map_err(to_js)?;
        Ok(self.apply(id, &fields))
    }

    /// Set the committed size from CSS length strings, resolving `vw`/`vh`
    /// against the current window.
    #[wasm_bindgen(js_name = setSize)]
    pub fn set_size(&self, id: &str, width: &str, height: &str) -> Result<bool, JsValue> {
        let id = parse_id(id)?;
        let viewport = self.shared.viewport();
        let fields = PartialElement {
            width: Some(Length::parse_in(width, viewport).map_err(to_js)?),
            height: Some(Length::parse_in(height, viewport).map_err(to_js)?),
            ..PartialElement::default()
        };
        Ok(self.apply(id, &fields))
    }

    /// The element's content finished loading with this intrinsic size.
    #[wasm_bindgen(js_name = naturalSizeSettled)]
    pub fn natural_size_settled(&self, id: &str, width: f64, height: f64) -> Result<bool, JsValue> {
        let id = parse_id(id)?;
        let mut changed = false;
        self.shared.run(|c| {
            changed = c.settle_natural_size(id, Dimensions::new(width, height));
            if changed { vec![Action::RenderNeeded] } else { Vec::new() }
        });
        Ok(changed)
    }

    /// The element's content was replaced; pass the new intrinsic size if known.
    #[wasm_bindgen(js_name = contentChanged)]
    pub fn content_changed(&self, id: &str, width: Option<f64>, height: Option<f64>) -> Result<(), JsValue> {
        let id = parse_id(id)?;
        let natural = width.zip(height).map(|(w, h)| Dimensions::new(w, h));
        self.shared.run(|c| {
            c.content_changed(id, natural);
            vec![Action::RenderNeeded]
        });
        Ok(())
    }

    // =========================================================================
    // Input
    // =========================================================================

    #[wasm_bindgen(js_name = setEditMode)]
    pub fn set_edit_mode(&self, editing: bool) {
        self.shared.run(|c| c.set_edit_mode(editing));
    }

    /// Pointer-down on a resize handle (`"n"`, `"se"`, ...).
    #[wasm_bindgen(js_name = handlePointerDown)]
    pub fn handle_pointer_down(&self, id: &str, handle: &str, x: f64, y: f64, button: i16) -> Result<(), JsValue> {
        let id = parse_id(id)?;
        let handle = Handle::from_str(handle).map_err(to_js)?;
        self.shared.run(|c| c.on_handle_pointer_down(id, handle, pointer_sample(x, y, button)));
        Ok(())
    }

    /// Pointer-down on an element's body.
    #[wasm_bindgen(js_name = bodyPointerDown)]
    pub fn body_pointer_down(&self, id: &str, x: f64, y: f64, button: i16) -> Result<(), JsValue> {
        let id = parse_id(id)?;
        self.shared.run(|c| c.on_body_pointer_down(id, pointer_sample(x, y, button)));
        Ok(())
    }

    #[wasm_bindgen(js_name = bodyClick)]
    pub fn body_click(&self, id: &str) -> Result<(), JsValue> {
        let id = parse_id(id)?;
        self.shared.run(|c| c.on_body_click(id));
        Ok(())
    }

    #[wasm_bindgen(js_name = backgroundClick)]
    pub fn background_click(&self) {
        self.shared.run(Controller::on_background_click);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Render state for one element as JSON (see `ElementView`).
    #[wasm_bindgen(js_name = viewJson)]
    pub fn view_json(&self, id: &str) -> Result<Option<String>, JsValue> {
        let id = parse_id(id)?;
        let Some(view) = self.shared.read(|c| c.view(id)).flatten() else {
            return Ok(None);
        };
        serde_json::to_string(&view).map(Some).map_err(to_js)
    }

    /// `"W × Hpx"` while a resize is in progress.
    #[wasm_bindgen]
    pub fn readout(&self) -> Option<String> {
        self.shared.read(Controller::readout).flatten()
    }

    #[wasm_bindgen(js_name = isSessionOpen)]
    pub fn is_session_open(&self) -> bool {
        self.shared.read(Controller::is_session_open).unwrap_or(false)
    }

    #[wasm_bindgen(js_name = modifierPressed)]
    pub fn modifier_pressed(&self) -> bool {
        self.shared.read(Controller::modifier_pressed).unwrap_or(false)
    }
}

impl Manipulator {
    fn set_callback(&self, set: impl FnOnce(&mut Callbacks)) {
        match self.shared.callbacks.try_borrow_mut() {
            Ok(mut callbacks) => set(&mut callbacks),
            Err(_) => warn!("callbacks busy; registration skipped"),
        }
    }

    fn apply(&self, id: ElementId, fields: &PartialElement) -> bool {
        let mut applied = false;
        self.shared.run(|c| {
            applied = c.apply_update(id, fields);
            if applied { vec![Action::RenderNeeded] } else { Vec::new() }
        });
        applied
    }
}

impl Drop for Manipulator {
    fn drop(&mut self) {
        if let Some(id) = self.shared.pending_frame.take() {
            if let Err(err) = self.shared.window.cancel_animation_frame(id) {
                warn!(?err, "failed to cancel animation frame");
            }
        }
        let target: &EventTarget = self.shared.window.as_ref();
        for (kind, callback) in self.closures.window_listeners() {
            remove_listener(target, kind, callback);
        }
    }
}

/// Route `tracing` output and panics to the browser console.
#[cfg(feature = "console")]
#[wasm_bindgen(js_name = initConsoleLogging)]
pub fn init_console_logging() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).map_err(to_js)
}
