#![allow(clippy::float_cmp)]

use super::*;
use crate::input::TouchId;
use crate::item::ItemKind;

// =============================================================
// Helpers
// =============================================================

const BIG: Size = Size { width: 1000.0, height: 1000.0 };

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn rotation() -> RotationConfig {
    RotationConfig::default()
}

fn session_for(item: &Item, anchor: Point, touch: Point) -> ResizeRotateSession {
    let rect = item.rect;
    ResizeRotateSession {
        target: item.id,
        anchor: TouchId(1),
        anchor_ratio: Point::new((anchor.x - rect.x) / rect.width, (anchor.y - rect.y) / rect.height),
        initial_size: rect.size(),
        initial_cumulative_rotation: item.cumulative_rotation,
        initial_anchor_distance: anchor.distance(touch).max(1.0),
        initial_angle: anchor.angle_to(touch),
    }
}

// =============================================================
// compute_scale
// =============================================================

#[test]
fn scale_is_distance_ratio() {
    let s = compute_scale(200.0, 100.0, Size::new(100.0, 100.0), BIG, &ScaleLimits::default());
    assert_eq!(s, 2.0);
}

#[test]
fn scale_clamps_to_limits() {
    let limits = ScaleLimits::default();
    assert_eq!(compute_scale(1000.0, 100.0, Size::new(10.0, 10.0), BIG, &limits), 3.0);
    assert_eq!(compute_scale(1.0, 100.0, Size::new(10.0, 10.0), BIG, &limits), 0.3);
}

#[test]
fn scale_upper_bound_fits_viewport() {
    let s = compute_scale(300.0, 100.0, Size::new(200.0, 100.0), Size::new(400.0, 1000.0), &ScaleLimits::default());
    assert_eq!(s, 2.0);
}

#[test]
fn scale_never_drops_below_min_for_huge_items() {
    let s = compute_scale(50.0, 100.0, Size::new(5000.0, 100.0), Size::new(400.0, 1000.0), &ScaleLimits::default());
    assert_eq!(s, 0.3);
}

#[test]
fn scale_nan_distance_holds_size() {
    let s = compute_scale(f64::NAN, 100.0, Size::new(10.0, 10.0), BIG, &ScaleLimits::default());
    assert_eq!(s, 1.0);
}

// =============================================================
// snap_rotation_deg
// =============================================================

#[test]
fn snap_keeps_turn_count() {
    assert_eq!(snap_rotation_deg(452.0, 5.0), Some(450.0));
    assert_eq!(snap_rotation_deg(-88.0, 5.0), Some(-90.0));
    assert_eq!(snap_rotation_deg(722.0, 5.0), Some(720.0));
}

#[test]
fn snap_near_full_turn_picks_nearest_target() {
    assert_eq!(snap_rotation_deg(358.0, 5.0), Some(360.0));
    assert_eq!(snap_rotation_deg(362.0, 5.0), Some(360.0));
    assert_eq!(snap_rotation_deg(3.0, 5.0), Some(0.0));
}

#[test]
fn snap_boundary_is_inclusive() {
    assert_eq!(snap_rotation_deg(95.0, 5.0), Some(90.0));
    assert_eq!(snap_rotation_deg(95.5, 5.0), None);
}

#[test]
fn no_snap_far_from_quarter_turns() {
    assert_eq!(snap_rotation_deg(45.0, 5.0), None);
    assert_eq!(snap_rotation_deg(-200.0, 5.0), None);
}

#[test]
fn snap_rejects_non_finite() {
    assert_eq!(snap_rotation_deg(f64::NAN, 5.0), None);
}

// =============================================================
// resolve_rotation
// =============================================================

#[test]
fn small_delta_is_ignored() {
    let initial = 0.4;
    assert_eq!(resolve_rotation(initial, 9.0_f64.to_radians(), &rotation()), initial);
    assert_eq!(resolve_rotation(initial, -9.0_f64.to_radians(), &rotation()), initial);
}

#[test]
fn large_delta_applies() {
    let r = resolve_rotation(0.0, 30.0_f64.to_radians(), &rotation());
    assert!(approx(r, 30.0_f64.to_radians()));
}

#[test]
fn delta_snaps_to_quarter_turn() {
    let r = resolve_rotation(0.0, 87.0_f64.to_radians(), &rotation());
    assert!(approx(r.to_degrees(), 90.0));
}

#[test]
fn cumulative_turns_survive_snap() {
    let r = resolve_rotation(400.0_f64.to_radians(), 52.0_f64.to_radians(), &rotation());
    assert!(approx(r.to_degrees(), 450.0));
}

// =============================================================
// anchored_origin
// =============================================================

#[test]
fn anchored_origin_keeps_ratio_point_under_anchor() {
    let origin = anchored_origin(Point::new(300.0, 300.0), Point::new(0.25, 0.5), Size::new(200.0, 100.0));
    assert_eq!(origin, Point::new(250.0, 250.0));
}

// =============================================================
// resize_rotate
// =============================================================

#[test]
fn doubling_distance_doubles_size_around_anchor() {
    let mut item = Item::new(ItemKind::Shape, Rect::new(200.0, 200.0, 100.0, 100.0));
    let anchor = Point::new(300.0, 300.0);
    let session = session_for(&item, anchor, Point::new(300.0, 400.0));

    resize_rotate(&mut item, &session, anchor, Point::new(300.0, 500.0), BIG, &EngineConfig::default());

    assert_eq!(item.rect, Rect::new(100.0, 100.0, 200.0, 200.0));
    assert_eq!(item.cumulative_rotation, 0.0);
}

#[test]
fn quarter_turn_rotates_and_wraps_display() {
    let mut item = Item::new(ItemKind::Shape, Rect::new(200.0, 200.0, 100.0, 100.0));
    let anchor = Point::new(250.0, 250.0);
    let session = session_for(&item, anchor, Point::new(350.0, 250.0));

    // Swing the touch clockwise on screen by 90 degrees (y grows downward).
    resize_rotate(&mut item, &session, anchor, Point::new(250.0, 350.0), BIG, &EngineConfig::default());

    assert!(approx(item.cumulative_rotation.to_degrees(), 90.0));
    assert!(approx(item.display_rotation, item.cumulative_rotation));
    assert!(approx(item.rect.width, 100.0));
}

#[test]
fn negative_rotation_displays_wrapped() {
    let mut item = Item::new(ItemKind::Shape, Rect::new(200.0, 200.0, 100.0, 100.0));
    let anchor = Point::new(250.0, 250.0);
    let session = session_for(&item, anchor, Point::new(350.0, 250.0));

    resize_rotate(&mut item, &session, anchor, Point::new(250.0, 150.0), BIG, &EngineConfig::default());

    assert!(approx(item.cumulative_rotation.to_degrees(), -90.0));
    assert!(approx(item.display_rotation.to_degrees(), 270.0));
}

#[test]
fn resize_stays_inside_viewport() {
    let view = Size::new(300.0, 300.0);
    let mut item = Item::new(ItemKind::Shape, Rect::new(0.0, 0.0, 100.0, 100.0));
    let anchor = Point::new(10.0, 10.0);
    let session = session_for(&item, anchor, Point::new(60.0, 10.0));

    resize_rotate(&mut item, &session, anchor, Point::new(260.0, 10.0), view, &EngineConfig::default());

    assert!(item.rect.is_within(view, 1e-9));
    assert!(approx(item.rect.width, 300.0));
}

#[test]
fn text_item_keeps_minimum_when_shrunk() {
    let mut item = Item::new(ItemKind::Text { text: String::new() }, Rect::new(100.0, 100.0, 80.0, 60.0));
    let anchor = Point::new(100.0, 100.0);
    let session = session_for(&item, anchor, Point::new(200.0, 100.0));

    resize_rotate(&mut item, &session, anchor, Point::new(110.0, 100.0), BIG, &EngineConfig::default());

    assert_eq!(item.rect.width, 60.0);
    assert_eq!(item.rect.height, 40.0);
}
