#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// clamp
// =============================================================

#[test]
fn clamp_inside_range_is_identity() {
    assert_eq!(clamp(75.0, 50.0, 100.0), 75.0);
}

#[test]
fn clamp_with_inverted_bounds_yields_min() {
    assert_eq!(clamp(75.0, 100.0, 50.0), 100.0);
}

#[test]
fn clamp_below_min_and_above_max() {
    assert_eq!(clamp(10.0, 50.0, 100.0), 50.0);
    assert_eq!(clamp(500.0, 50.0, 100.0), 100.0);
}

#[test]
fn clamp_handles_infinities() {
    assert_eq!(clamp(f64::INFINITY, 50.0, 100.0), 100.0);
    assert_eq!(clamp(f64::NEG_INFINITY, 50.0, 100.0), 50.0);
}

// =============================================================
// Constraints
// =============================================================

#[test]
fn default_constraints() {
    let c = Constraints::default();
    assert_eq!(c.min_width(), 50.0);
    assert_eq!(c.min_height(), 30.0);
    assert_eq!(c.max_width(), 2000.0);
    assert_eq!(c.max_height(), 2000.0);
}

#[test]
fn new_rejects_inverted_bounds() {
    let err = Constraints::new(300.0, 10.0, 200.0, 100.0).unwrap_err();
    assert_eq!(err, ConstraintError::Inverted { axis: "width", min: 300.0, max: 200.0 });
}

#[test]
fn new_rejects_negative_and_nan_bounds() {
    assert!(matches!(
        Constraints::new(-1.0, 0.0, 10.0, 10.0),
        Err(ConstraintError::InvalidBound { axis: "width", .. })
    ));
    assert!(matches!(
        Constraints::new(0.0, f64::NAN, 10.0, 10.0),
        Err(ConstraintError::InvalidBound { axis: "height", .. })
    ));
}

#[test]
fn equal_min_and_max_is_allowed() {
    let c = Constraints::uniform(100.0, 100.0).unwrap();
    assert_eq!(c.clamp(Dimensions::new(5.0, 500.0)), Dimensions::new(100.0, 100.0));
}

#[test]
fn clamp_is_per_axis() {
    let c = Constraints::new(50.0, 20.0, 120.0, 1000.0).unwrap();
    let out = c.clamp(Dimensions::new(160.0, 80.0));
    assert_eq!(out, Dimensions::new(120.0, 80.0));
}

#[test]
fn contains_checks_both_axes() {
    let c = Constraints::uniform(50.0, 2000.0).unwrap();
    assert!(c.contains(Dimensions::new(50.0, 2000.0)));
    assert!(!c.contains(Dimensions::new(49.0, 100.0)));
    assert!(!c.contains(Dimensions::new(100.0, 2001.0)));
}

// =============================================================
// serde
// =============================================================

#[test]
fn deserialize_fills_missing_bounds_with_defaults() {
    let c: Constraints = serde_json::from_str(r#"{"maxWidth": 640}"#).unwrap();
    assert_eq!(c.max_width(), 640.0);
    assert_eq!(c.min_width(), 50.0);
    assert_eq!(c.max_height(), 2000.0);
}

#[test]
fn deserialize_validates_bounds() {
    let parsed: Result<Constraints, _> = serde_json::from_str(r#"{"minWidth": 900, "maxWidth": 100}"#);
    assert!(parsed.is_err());
}

#[test]
fn serialize_uses_camel_case() {
    let json = serde_json::to_value(Constraints::default()).unwrap();
    assert_eq!(json["minWidth"], 50.0);
    assert_eq!(json["maxHeight"], 2000.0);
}
