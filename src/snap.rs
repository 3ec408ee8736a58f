//! Grid snapping: pull item edges onto nearby alignment lines.
//!
//! Each line is compared against the nearer of the two item edges that run
//! parallel to it (left/right for vertical lines, top/bottom for horizontal
//! ones). The edge distance falls into one of three bands:
//!
//! | Distance                      | Effect                                     |
//! |-------------------------------|--------------------------------------------|
//! | `d < activate`                | line is reported active (highlight only)   |
//! | `snap < d < sticky`           | rect moves `snap / sticky` of the way over |
//! | `d <= snap`                   | rect moves so the edge lies on the line    |
//!
//! Highlighting and movement are independent: a line can move the rect
//! without being active when `activate` is smaller than the other bands.
//! Lines are processed in order and each measures the rect as left by the
//! previous one. The rect keeps its size; only its origin moves.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use std::collections::HashSet;

use crate::config::GridSnapConfig;
use crate::geometry::{Rect, Size};
use crate::grid::{GridLineId, GridModel, Orientation};

/// Result of one snapping pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SnapOutcome {
    pub rect: Rect,
    /// Lines within the activate threshold of an edge, recomputed per pass.
    pub active_lines: HashSet<GridLineId>,
}

/// Snap `rect` against every line of `grid`, then clamp it into `bounds`.
#[must_use]
pub fn snap_rect(rect: Rect, grid: &GridModel, config: &GridSnapConfig, bounds: Size) -> SnapOutcome {
    let mut rect = rect;
    let mut active_lines = HashSet::new();

    for orientation in [Orientation::Vertical, Orientation::Horizontal] {
        for line in grid.oriented(orientation) {
            let (low, high) = match orientation {
                Orientation::Vertical => (rect.min_x(), rect.max_x()),
                Orientation::Horizontal => (rect.min_y(), rect.max_y()),
            };
            let offset = line.position - nearer_edge(low, high, line.position);
            let distance = offset.abs();

            if distance < config.activate_threshold {
                active_lines.insert(line.id);
            }

            let shift = if distance <= config.snap_threshold {
                offset
            } else if distance < config.sticky_threshold {
                offset * (config.snap_threshold / config.sticky_threshold)
            } else {
                continue;
            };
            match orientation {
                Orientation::Vertical => rect.x += shift,
                Orientation::Horizontal => rect.y += shift,
            }
        }
    }

    SnapOutcome { rect: rect.clamped_to(bounds), active_lines }
}

fn nearer_edge(low: f64, high: f64, position: f64) -> f64 {
    if (position - low).abs() <= (position - high).abs() { low } else { high }
}
