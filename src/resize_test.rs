#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Helpers
// =============================================================

fn snap(width: f64, height: f64) -> GeometrySnapshot {
    GeometrySnapshot::new(width, height, 0.0, 0.0)
}

fn bounds(min: f64, max: f64) -> Constraints {
    Constraints::uniform(min, max).unwrap()
}

fn free() -> AspectPolicy {
    AspectPolicy::new(None, false, false)
}

fn locked(ratio: f64) -> AspectPolicy {
    AspectPolicy::new(Some(ratio), true, false)
}

fn approx(a: Dimensions, b: Dimensions) -> bool {
    (a.width - b.width).abs() < 1e-9 && (a.height - b.height).abs() < 1e-9
}

// =============================================================
// AspectPolicy
// =============================================================

#[test]
fn lock_is_default_xor_modifier() {
    assert!(!AspectPolicy::new(Some(2.0), false, false).lock_requested());
    assert!(AspectPolicy::new(Some(2.0), true, false).lock_requested());
    assert!(AspectPolicy::new(Some(2.0), false, true).lock_requested());
    assert!(!AspectPolicy::new(Some(2.0), true, true).lock_requested());
}

#[test]
fn no_ratio_never_locks() {
    assert_eq!(AspectPolicy::new(None, true, false).effective_ratio(), None);
    assert_eq!(AspectPolicy::new(None, false, true).effective_ratio(), None);
}

#[test]
fn degenerate_ratio_never_locks() {
    assert_eq!(AspectPolicy::new(Some(0.0), true, false).effective_ratio(), None);
    assert_eq!(AspectPolicy::new(Some(f64::NAN), true, false).effective_ratio(), None);
}

// =============================================================
// Scenarios
// =============================================================

#[test]
fn scenario_free_corner_resize() {
    let out = compute(Handle::Se, &snap(200.0, 100.0), Delta::new(50.0, 30.0), &bounds(50.0, 2000.0), free());
    assert_eq!(out, Dimensions::new(250.0, 130.0));
}

#[test]
fn scenario_locked_se_uses_dominant_delta() {
    let out = compute(Handle::Se, &snap(200.0, 100.0), Delta::new(60.0, 10.0), &bounds(50.0, 2000.0), locked(2.0));
    assert_eq!(out, Dimensions::new(260.0, 130.0));
}

#[test]
fn scenario_locked_nw_uses_dominant_delta() {
    let out = compute(Handle::Nw, &snap(200.0, 100.0), Delta::new(-30.0, -10.0), &bounds(50.0, 2000.0), locked(2.0));
    assert_eq!(out, Dimensions::new(230.0, 115.0));
}

#[test]
fn scenario_clamp_breaks_locked_ratio() {
    // Unclamped 160×80 at 2:1; width clamps to 120 while height stays 80.
    let c = Constraints::new(50.0, 30.0, 120.0, 2000.0).unwrap();
    let out = compute(Handle::Se, &snap(100.0, 50.0), Delta::new(60.0, 60.0), &c, locked(2.0));
    assert_eq!(out, Dimensions::new(120.0, 80.0));
    assert_eq!(out.width / out.height, 1.5);
}

#[test]
fn clamp_after_ratio_with_smaller_drag() {
    let c = Constraints::new(50.0, 30.0, 120.0, 2000.0).unwrap();
    let out = compute(Handle::Se, &snap(100.0, 50.0), Delta::new(40.0, 40.0), &c, locked(2.0));
    assert_eq!(out, Dimensions::new(120.0, 70.0));
}

// =============================================================
// Single-axis handles
// =============================================================

#[test]
fn free_edges_touch_only_their_axis() {
    let s = snap(200.0, 100.0);
    let c = bounds(10.0, 2000.0);
    let d = Delta::new(25.0, 15.0);
    assert_eq!(compute(Handle::E, &s, d, &c, free()), Dimensions::new(225.0, 100.0));
    assert_eq!(compute(Handle::W, &s, d, &c, free()), Dimensions::new(175.0, 100.0));
    assert_eq!(compute(Handle::S, &s, d, &c, free()), Dimensions::new(200.0, 115.0));
    assert_eq!(compute(Handle::N, &s, d, &c, free()), Dimensions::new(200.0, 85.0));
}

#[test]
fn locked_horizontal_edge_derives_height() {
    let out = compute(Handle::E, &snap(200.0, 100.0), Delta::new(40.0, 999.0), &bounds(10.0, 2000.0), locked(2.0));
    assert_eq!(out, Dimensions::new(240.0, 120.0));
}

#[test]
fn locked_vertical_edge_derives_width() {
    let out = compute(Handle::N, &snap(200.0, 100.0), Delta::new(999.0, -20.0), &bounds(10.0, 2000.0), locked(2.0));
    assert_eq!(out, Dimensions::new(240.0, 120.0));
}

// =============================================================
// Corner handles
// =============================================================

#[test]
fn free_corners_use_handle_signs() {
    let s = snap(200.0, 100.0);
    let c = bounds(10.0, 2000.0);
    let d = Delta::new(10.0, 20.0);
    assert_eq!(compute(Handle::Se, &s, d, &c, free()), Dimensions::new(210.0, 120.0));
    assert_eq!(compute(Handle::Sw, &s, d, &c, free()), Dimensions::new(190.0, 120.0));
    assert_eq!(compute(Handle::Ne, &s, d, &c, free()), Dimensions::new(210.0, 80.0));
    assert_eq!(compute(Handle::Nw, &s, d, &c, free()), Dimensions::new(190.0, 80.0));
}

#[test]
fn locked_sw_prefers_leftward_motion() {
    // max(-dx, dy) = max(30, 5)
    let out = compute(Handle::Sw, &snap(200.0, 100.0), Delta::new(-30.0, 5.0), &bounds(10.0, 2000.0), locked(2.0));
    assert_eq!(out, Dimensions::new(230.0, 115.0));
}

#[test]
fn locked_ne_prefers_upward_motion() {
    // max(dx, -dy) = max(-5, 40)
    let out = compute(Handle::Ne, &snap(200.0, 100.0), Delta::new(-5.0, -40.0), &bounds(10.0, 2000.0), locked(2.0));
    assert_eq!(out, Dimensions::new(240.0, 120.0));
}

#[test]
fn locked_corner_shrinks_when_both_axes_move_inward() {
    // max(-20, -10) = -10
    let out = compute(Handle::Se, &snap(200.0, 100.0), Delta::new(-20.0, -10.0), &bounds(10.0, 2000.0), locked(2.0));
    assert_eq!(out, Dimensions::new(190.0, 95.0));
}

// =============================================================
// Properties
// =============================================================

#[test]
fn zero_delta_is_identity_for_every_handle() {
    let s = snap(300.0, 150.0);
    let c = bounds(50.0, 2000.0);
    for h in Handle::ALL {
        for policy in [free(), locked(2.0), AspectPolicy::new(Some(2.0), false, true)] {
            let out = compute(h, &s, Delta::default(), &c, policy);
            assert!(approx(out, s.dimensions()), "{h} {policy:?} -> {out:?}");
        }
    }
}

#[test]
fn huge_deltas_stay_within_bounds() {
    let s = snap(300.0, 150.0);
    let c = Constraints::new(40.0, 30.0, 900.0, 700.0).unwrap();
    let deltas = [
        Delta::new(1e9, 1e9),
        Delta::new(-1e9, -1e9),
        Delta::new(1e9, -1e9),
        Delta::new(-1e9, 1e9),
        Delta::new(0.0, 1e12),
    ];
    for h in Handle::ALL {
        for d in deltas {
            for policy in [free(), locked(2.0), locked(0.25)] {
                let out = compute(h, &s, d, &c, policy);
                assert!(c.contains(out), "{h} {d:?} {policy:?} -> {out:?}");
            }
        }
    }
}

#[test]
fn modifier_inverts_default_lock() {
    let s = snap(200.0, 100.0);
    let c = bounds(10.0, 2000.0);
    let d = Delta::new(37.0, -12.0);
    for h in Handle::ALL {
        let held = compute(h, &s, d, &c, AspectPolicy::new(Some(2.0), true, true));
        let plain = compute(h, &s, d, &c, AspectPolicy::new(Some(2.0), false, false));
        assert_eq!(held, plain, "{h}");
    }
}

#[test]
fn compute_is_deterministic() {
    let s = snap(200.0, 100.0);
    let c = bounds(10.0, 2000.0);
    let a = compute(Handle::Sw, &s, Delta::new(-13.5, 7.25), &c, locked(1.5));
    let b = compute(Handle::Sw, &s, Delta::new(-13.5, 7.25), &c, locked(1.5));
    assert_eq!(a, b);
}

// =============================================================
// Readout
// =============================================================

#[test]
fn readout_rounds_both_axes() {
    assert_eq!(format_readout(Dimensions::new(249.6, 130.2)), "250 × 130px");
}
