use super::*;

// =============================================================
// Button
// =============================================================

#[test]
fn button_default_is_primary() {
    assert_eq!(Button::default(), Button::Primary);
}

#[test]
fn button_from_dom_codes() {
    assert_eq!(Button::from_dom(0), Button::Primary);
    assert_eq!(Button::from_dom(1), Button::Middle);
    assert_eq!(Button::from_dom(2), Button::Secondary);
    assert_eq!(Button::from_dom(4), Button::Primary);
}

// =============================================================
// PointerEvent
// =============================================================

#[test]
fn pointer_at_has_sample() {
    let ev = PointerEvent::at(3.0, 4.0);
    assert_eq!(ev.sample(), Some(Point::new(3.0, 4.0)));
    assert_eq!(ev.button, Button::Primary);
}

#[test]
fn pointer_missing_has_no_sample() {
    assert_eq!(PointerEvent::missing().sample(), None);
}

#[test]
fn pointer_with_nan_has_no_sample() {
    assert_eq!(PointerEvent::at(f64::NAN, 4.0).sample(), None);
    assert_eq!(PointerEvent::at(1.0, f64::NEG_INFINITY).sample(), None);
}

#[test]
fn pointer_with_button() {
    let ev = PointerEvent::at(0.0, 0.0).with_button(Button::Secondary);
    assert_eq!(ev.button, Button::Secondary);
}

// =============================================================
// ModifierTracker
// =============================================================

#[test]
fn tracker_defaults_to_shift_released() {
    let t = ModifierTracker::default();
    assert_eq!(t.key(), "Shift");
    assert!(!t.pressed());
}

#[test]
fn tracker_follows_key_down_and_up() {
    let mut t = ModifierTracker::default();
    assert!(t.key_down(&Key("Shift".into())));
    assert!(t.pressed());
    assert!(t.key_up(&Key("Shift".into())));
    assert!(!t.pressed());
}

#[test]
fn tracker_ignores_other_keys() {
    let mut t = ModifierTracker::default();
    assert!(!t.key_down(&Key("Alt".into())));
    assert!(!t.pressed());
    t.key_down(&Key("Shift".into()));
    assert!(!t.key_up(&Key("a".into())));
    assert!(t.pressed());
}

#[test]
fn tracker_reset_releases() {
    let mut t = ModifierTracker::new("Alt");
    t.key_down(&Key("Alt".into()));
    t.reset();
    assert!(!t.pressed());
}
