//! Double-tap recognition and text edit mode.
//!
//! A tap is any began touch that lands on an item. Two taps on the same item,
//! close together in time and space, form a double tap; on a text item that
//! puts the item into edit mode. While an item is edited it cannot be dragged,
//! and touching anywhere outside it leaves edit mode.

#[cfg(test)]
#[path = "edit_test.rs"]
mod edit_test;

use tracing::info;

use crate::config::TapConfig;
use crate::geometry::Point;
use crate::item::ItemId;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tap {
    timestamp_ms: u64,
    location: Point,
    item: ItemId,
}

/// Remembers the last tap so the next one can be matched against it.
#[derive(Debug, Clone, Default)]
pub struct TapTracker {
    last: Option<Tap>,
}

impl TapTracker {
    #[must_use]
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Whether a tap on `item` at `location` completes a double tap.
    ///
    /// Both the elapsed time and the distance must be strictly below the
    /// configured limits. A timestamp earlier than the last tap never matches.
    #[must_use]
    pub fn is_double_tap(&self, item: ItemId, location: Point, timestamp_ms: u64, config: &TapConfig) -> bool {
        let Some(last) = self.last else {
            return false;
        };
        let Some(elapsed) = timestamp_ms.checked_sub(last.timestamp_ms) else {
            return false;
        };
        last.item == item
            && elapsed < config.double_tap_window_ms
            && last.location.distance(location) < config.double_tap_distance
    }

    /// Remember a tap as the one the next tap is compared against.
    pub fn record(&mut self, item: ItemId, location: Point, timestamp_ms: u64) {
        self.last = Some(Tap { timestamp_ms, location, item });
    }

    /// Forget the last tap.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Which item, if any, is in text edit mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditMode {
    editing: Option<ItemId>,
}

impl EditMode {
    /// Enter edit mode for `item`. Returns the item that was being edited
    /// before, if it was a different one.
    pub fn start(&mut self, item: ItemId) -> Option<ItemId> {
        let previous = self.editing.replace(item).filter(|prev| *prev != item);
        info!(%item, "text editing started");
        previous
    }

    /// Leave edit mode, returning the item that was being edited.
    pub fn stop(&mut self) -> Option<ItemId> {
        let previous = self.editing.take();
        if let Some(item) = previous {
            info!(%item, "text editing stopped");
        }
        previous
    }

    #[must_use]
    pub fn is_editing(&self, item: &ItemId) -> bool {
        self.editing.as_ref() == Some(item)
    }

    #[must_use]
    pub fn editing_item(&self) -> Option<ItemId> {
        self.editing
    }
}
