//! Single-finger translation.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use tracing::trace;

use crate::geometry::{Point, Size};
use crate::item::Item;

/// Move `item` by the finger's motion from `previous` to `current`.
///
/// The new origin is clamped into `bounds` per axis, then the item kind gets
/// to adjust the rect. Grid snapping is left to the caller.
pub fn drag_item(item: &mut Item, previous: Point, current: Point, bounds: Size) {
    let moved = item.rect.translated(current - previous).clamped_to(bounds);
    item.rect = item.intercept_rect(moved).confined_to(bounds);
    trace!(item = %item.id, x = item.rect.x, y = item.rect.y, "item dragged");
}
