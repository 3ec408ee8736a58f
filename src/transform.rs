//! Two-finger resize and rotate around a fixed anchor.
//!
//! The drag touch is the anchor. The second touch's distance from it drives
//! the scale and its bearing drives the rotation. The point of the item that
//! sat under the anchor when the gesture started (`anchor_ratio`) stays under
//! the anchor as the item grows, shrinks and turns.
//!
//! Rotation has two stages:
//!
//! - **Hysteresis.** Until the bearing has changed by more than the
//!   activation angle the item keeps the rotation it started with.
//! - **Quarter-turn snap.** Past that, a rotation within the snap threshold
//!   of a multiple of 90° lands exactly on it. The snap keeps the turn count
//!   of the unbounded cumulative rotation, so 452° snaps to 450°, not 90°.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use tracing::trace;

use crate::config::{EngineConfig, RotationConfig, ScaleLimits};
use crate::consts::ROTATION_SNAP_ANGLES_DEG;
use crate::geometry::{Point, Rect, Size, normalize_degrees_360, normalize_signed_radians};
use crate::item::Item;
use crate::session::ResizeRotateSession;

/// Scale factor for the current anchor distance.
///
/// The ratio to `initial_distance` is clamped into `limits`. The upper limit
/// is further lowered so `initial_size` scaled by it still fits `bounds`, but
/// never below `limits.min`.
#[must_use]
pub fn compute_scale(
    current_distance: f64,
    initial_distance: f64,
    initial_size: Size,
    bounds: Size,
    limits: &ScaleLimits,
) -> f64 {
    let fit = fit_scale(initial_size, bounds);
    let upper = limits.max.min(fit).max(limits.min);
    let ratio = current_distance / initial_distance;
    if ratio.is_nan() {
        return 1.0_f64.max(limits.min).min(upper);
    }
    ratio.max(limits.min).min(upper)
}

fn fit_scale(size: Size, bounds: Size) -> f64 {
    let horizontal = if size.width > 0.0 { bounds.width / size.width } else { f64::INFINITY };
    let vertical = if size.height > 0.0 { bounds.height / size.height } else { f64::INFINITY };
    horizontal.min(vertical)
}

/// New cumulative rotation (radians) for a bearing change of `raw_delta`.
///
/// `raw_delta` is expected in `(-π, π]`.
#[must_use]
pub fn resolve_rotation(initial_cumulative: f64, raw_delta: f64, config: &RotationConfig) -> f64 {
    if raw_delta.abs().to_degrees() <= config.activation_deg {
        return initial_cumulative;
    }
    let candidate = initial_cumulative + raw_delta;
    match snap_rotation_deg(candidate.to_degrees(), config.snap_threshold_deg) {
        Some(snapped) => snapped.to_radians(),
        None => candidate,
    }
}

/// Snap a rotation in degrees onto the nearest quarter turn, keeping its turn count.
///
/// Returns `None` when no quarter turn is within `threshold_deg`.
#[must_use]
pub fn snap_rotation_deg(candidate_deg: f64, threshold_deg: f64) -> Option<f64> {
    if !candidate_deg.is_finite() {
        return None;
    }
    let adjusted = normalize_degrees_360(candidate_deg);
    let target = ROTATION_SNAP_ANGLES_DEG
        .iter()
        .copied()
        .min_by(|a, b| (adjusted - a).abs().total_cmp(&(adjusted - b).abs()))?;
    if (adjusted - target).abs() > threshold_deg {
        return None;
    }
    Some((candidate_deg / 360.0).floor() * 360.0 + target)
}

/// Origin that keeps the point at `ratio` of a `size` rect under `anchor`.
#[must_use]
pub fn anchored_origin(anchor: Point, ratio: Point, size: Size) -> Point {
    Point::new(anchor.x - ratio.x * size.width, anchor.y - ratio.y * size.height)
}

/// Apply one resize/rotate step to `item`.
///
/// `anchor` is the anchor touch's latest location and `touch` the moving
/// finger. Grid snapping is left to the caller.
pub fn resize_rotate(
    item: &mut Item,
    session: &ResizeRotateSession,
    anchor: Point,
    touch: Point,
    bounds: Size,
    config: &EngineConfig,
) {
    let scale = compute_scale(
        anchor.distance(touch),
        session.initial_anchor_distance,
        session.initial_size,
        bounds,
        &config.scale,
    );
    let size = session.initial_size.scaled(scale);
    let origin = anchored_origin(anchor, session.anchor_ratio, size);
    let proposed = Rect::from_origin_size(origin, size).clamped_to(bounds);
    item.rect = item.intercept_rect(proposed).confined_to(bounds);

    let raw_delta = normalize_signed_radians(anchor.angle_to(touch) - session.initial_angle);
    item.set_rotation(resolve_rotation(session.initial_cumulative_rotation, raw_delta, &config.rotation));

    trace!(
        item = %item.id,
        scale,
        width = item.rect.width,
        height = item.rect.height,
        rotation = item.cumulative_rotation,
        "item resized"
    );
}
