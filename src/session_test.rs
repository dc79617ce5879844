#![allow(clippy::float_cmp)]

use std::cell::Cell;
use std::rc::Rc;

use uuid::Uuid;

use super::*;

// =============================================================
// Helpers
// =============================================================

fn start(kind: SessionKind, target: ElementId, live: &Rc<Cell<u32>>) -> SessionStart {
    live.set(live.get() + 1);
    let live = Rc::clone(live);
    SessionStart {
        kind,
        target,
        snapshot: GeometrySnapshot::new(200.0, 100.0, 10.0, 10.0),
        pointer_origin: Point::new(500.0, 400.0),
        start_position: Position::new(20.0, 30.0),
        constraints: Constraints::uniform(50.0, 2000.0).unwrap(),
        aspect: AspectPolicy::new(Some(2.0), false, false),
        listeners: ListenerRegistration::new(move || live.set(live.get() - 1)),
    }
}

// =============================================================
// SessionKind
// =============================================================

#[test]
fn kind_handle_only_for_resize() {
    assert_eq!(SessionKind::Resize(Handle::Se).handle(), Some(Handle::Se));
    assert_eq!(SessionKind::Move.handle(), None);
    assert!(SessionKind::Resize(Handle::N).is_resize());
    assert!(!SessionKind::Move.is_resize());
}

#[test]
fn kind_serializes_mode_and_handle() {
    let json = serde_json::to_value(SessionKind::Resize(Handle::Nw)).unwrap();
    assert_eq!(json, serde_json::json!({ "mode": "resize", "handle": "nw" }));
    let json = serde_json::to_value(SessionKind::Move).unwrap();
    assert_eq!(json, serde_json::json!({ "mode": "move" }));
}

#[test]
fn preview_serializes_with_mode_tag() {
    let json = serde_json::to_value(Preview::Resize(Dimensions::new(1.0, 2.0))).unwrap();
    assert_eq!(json, serde_json::json!({ "mode": "resize", "width": 1.0, "height": 2.0 }));
}

// =============================================================
// SessionSlot: mutual exclusion
// =============================================================

#[test]
fn slot_starts_empty() {
    let slot = SessionSlot::new();
    assert!(!slot.is_open());
    assert!(slot.current().is_none());
}

#[test]
fn open_fills_slot_and_issues_ids() {
    let live = Rc::new(Cell::new(0));
    let mut slot = SessionSlot::new();
    let id = Uuid::new_v4();
    let handle = slot.try_open(id, || Ok(start(SessionKind::Move, id, &live))).unwrap();
    assert_eq!(handle.id, SessionId(1));
    assert_eq!(handle.target, id);
    assert!(slot.targets(id));
    assert_eq!(live.get(), 1);

    slot.take().unwrap().close();
    let handle = slot.try_open(id, || Ok(start(SessionKind::Move, id, &live))).unwrap();
    assert_eq!(handle.id, SessionId(2));
}

#[test]
fn second_open_is_rejected_without_touching_first() {
    let live = Rc::new(Cell::new(0));
    let mut slot = SessionSlot::new();
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    slot.try_open(first, || Ok(start(SessionKind::Resize(Handle::Se), first, &live))).unwrap();

    let mut built = false;
    let err = slot
        .try_open(second, || {
            built = true;
            Ok(start(SessionKind::Move, second, &live))
        })
        .unwrap_err();

    assert!(!built);
    assert_eq!(err, BeginError::SessionOpen { open: first, requested: second });
    assert!(err.is_rejected());
    let s = slot.current().unwrap();
    assert_eq!(s.target(), first);
    assert_eq!(s.pointer_origin(), Point::new(500.0, 400.0));
    assert_eq!(*s.snapshot(), GeometrySnapshot::new(200.0, 100.0, 10.0, 10.0));
    assert_eq!(live.get(), 1);
}

#[test]
fn failed_build_leaves_slot_empty() {
    let mut slot = SessionSlot::new();
    let id = Uuid::new_v4();
    let err = slot.try_open(id, || Err(BeginError::Unmeasured(id))).unwrap_err();
    assert_eq!(err, BeginError::Unmeasured(id));
    assert!(!slot.is_open());
}

// =============================================================
// InteractionSession
// =============================================================

#[test]
fn initial_preview_is_start_state() {
    let live = Rc::new(Cell::new(0));
    let mut slot = SessionSlot::new();
    let id = Uuid::new_v4();
    slot.try_open(id, || Ok(start(SessionKind::Resize(Handle::E), id, &live))).unwrap();
    assert_eq!(slot.current().unwrap().last_preview(), Preview::Resize(Dimensions::new(200.0, 100.0)));
}

#[test]
fn resize_update_recomputes_from_snapshot() {
    let live = Rc::new(Cell::new(0));
    let mut slot = SessionSlot::new();
    let id = Uuid::new_v4();
    slot.try_open(id, || Ok(start(SessionKind::Resize(Handle::E), id, &live))).unwrap();
    let s = slot.current_mut().unwrap();

    assert_eq!(s.update(Point::new(530.0, 400.0), false), Preview::Resize(Dimensions::new(230.0, 100.0)));
    assert_eq!(s.update(Point::new(510.0, 400.0), false), Preview::Resize(Dimensions::new(210.0, 100.0)));
    assert_eq!(s.last_preview(), Preview::Resize(Dimensions::new(210.0, 100.0)));
}

#[test]
fn modifier_change_applies_on_next_update() {
    let live = Rc::new(Cell::new(0));
    let mut slot = SessionSlot::new();
    let id = Uuid::new_v4();
    slot.try_open(id, || Ok(start(SessionKind::Resize(Handle::E), id, &live))).unwrap();
    let s = slot.current_mut().unwrap();

    let free = s.update(Point::new(540.0, 400.0), false);
    assert_eq!(free, Preview::Resize(Dimensions::new(240.0, 100.0)));
    let locked = s.update(Point::new(540.0, 400.0), true);
    assert_eq!(locked, Preview::Resize(Dimensions::new(240.0, 120.0)));
    assert!(s.modifier());
}

#[test]
fn move_update_translates_start_position() {
    let live = Rc::new(Cell::new(0));
    let mut slot = SessionSlot::new();
    let id = Uuid::new_v4();
    slot.try_open(id, || Ok(start(SessionKind::Move, id, &live))).unwrap();
    let s = slot.current_mut().unwrap();
    assert_eq!(s.update(Point::new(450.0, 425.0), false), Preview::Move(Position::new(-30.0, 55.0)));
}

#[test]
fn close_releases_listeners_and_returns_last_preview() {
    let live = Rc::new(Cell::new(0));
    let mut slot = SessionSlot::new();
    let id = Uuid::new_v4();
    slot.try_open(id, || Ok(start(SessionKind::Move, id, &live))).unwrap();
    slot.current_mut().unwrap().update(Point::new(510.0, 410.0), false);
    assert!(slot.current().unwrap().listeners_active());

    let last = slot.take().unwrap().close();
    assert_eq!(last, Preview::Move(Position::new(30.0, 40.0)));
    assert_eq!(live.get(), 0);
    assert!(!slot.is_open());
}

#[test]
fn dropping_session_releases_listeners() {
    let live = Rc::new(Cell::new(0));
    let mut slot = SessionSlot::new();
    let id = Uuid::new_v4();
    slot.try_open(id, || Ok(start(SessionKind::Move, id, &live))).unwrap();
    drop(slot);
    assert_eq!(live.get(), 0);
}

#[test]
fn session_id_display() {
    assert_eq!(SessionId(7).to_string(), "#7");
}
