//! Item model: draggable items, their kinds, and the in-memory store.
//!
//! Items are created and destroyed by the host. The gesture controllers only
//! rewrite `rect` and the two rotation fields, always routing the new values
//! through the item's kind first (see [`Item::intercept_rect`]) so each kind
//! can impose its own sizing rules.
//!
//! The store keeps insertion order: the last inserted item is drawn on top and
//! wins hit tests on overlap.

#[cfg(test)]
#[path = "item_test.rs"]
mod item_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{
    TEXT_GLYPH_ADVANCE_EM, TEXT_LINE_HEIGHT_EM, TEXT_MIN_HEIGHT, TEXT_MIN_WIDTH, TEXT_MIN_WRAP_WIDTH,
    TEXT_PADDING, TEXT_REFERENCE_FONT_SIZE,
};
use crate::geometry::{Point, Rect, Size, normalize_radians};

/// Unique identifier for an item.
pub type ItemId = Uuid;

/// What an item shows. The kind decides how geometry changes are intercepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    /// Plain rectangle; accepts every geometry change as is.
    Shape,
    /// Named image; accepts every geometry change as is.
    Image { name: String },
    /// Text box; never shrinks below what its text needs.
    Text { text: String },
}

/// A draggable item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    /// Bounding rectangle in the reference frame.
    pub rect: Rect,
    /// Rotation used for drawing, wrapped into `[0, 2π)`.
    pub display_rotation: f64,
    /// Unbounded running rotation; the basis for further rotation deltas.
    pub cumulative_rotation: f64,
}

impl Item {
    /// Create an unrotated item with a fresh id.
    #[must_use]
    pub fn new(kind: ItemKind, rect: Rect) -> Self {
        Self::with_id(Uuid::new_v4(), kind, rect)
    }

    #[must_use]
    pub fn with_id(id: ItemId, kind: ItemKind, rect: Rect) -> Self {
        Self { id, kind, rect, display_rotation: 0.0, cumulative_rotation: 0.0 }
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self.kind, ItemKind::Text { .. })
    }

    /// Let the kind adjust a proposed rectangle before it is stored.
    #[must_use]
    pub fn intercept_rect(&self, proposed: Rect) -> Rect {
        match &self.kind {
            ItemKind::Shape | ItemKind::Image { .. } => proposed,
            ItemKind::Text { text } => fit_text_rect(text, proposed),
        }
    }

    /// Let the kind adjust a proposed `(display, cumulative)` rotation pair.
    #[must_use]
    pub fn intercept_rotation(&self, display: f64, cumulative: f64) -> (f64, f64) {
        match self.kind {
            ItemKind::Shape | ItemKind::Image { .. } | ItemKind::Text { .. } => (display, cumulative),
        }
    }

    /// Set the cumulative rotation and derive the wrapped display rotation.
    pub fn set_rotation(&mut self, cumulative: f64) {
        let (display, cumulative) = self.intercept_rotation(normalize_radians(cumulative), cumulative);
        self.display_rotation = display;
        self.cumulative_rotation = cumulative;
    }
}

/// Grow `proposed` so it can hold `text`, never shrinking it.
fn fit_text_rect(text: &str, proposed: Rect) -> Rect {
    let wrap_width = (proposed.width - TEXT_PADDING).max(TEXT_MIN_WRAP_WIDTH);
    let measured = measure_text(text, TEXT_REFERENCE_FONT_SIZE, wrap_width);
    Rect {
        width: proposed.width.max(TEXT_MIN_WIDTH.max(measured.width + TEXT_PADDING)),
        height: proposed.height.max(TEXT_MIN_HEIGHT.max(measured.height + TEXT_PADDING)),
        ..proposed
    }
}

/// Approximate the bounding box of `text` set at `font_size` and wrapped at `max_width`.
///
/// Uses fixed glyph metrics instead of real font data: every character
/// advances by [`TEXT_GLYPH_ADVANCE_EM`] and lines are [`TEXT_LINE_HEIGHT_EM`]
/// tall. Words are wrapped greedily; a word longer than a line is broken
/// across lines.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn measure_text(text: &str, font_size: f64, max_width: f64) -> Size {
    let advance = font_size * TEXT_GLYPH_ADVANCE_EM;
    let per_line = ((max_width / advance).floor() as usize).max(1);

    let mut lines = 0usize;
    let mut widest = 0usize;
    for paragraph in text.split('\n') {
        let mut current = 0usize;
        for word in paragraph.split_whitespace() {
            let mut len = word.chars().count();
            let needed = if current == 0 { len } else { current + 1 + len };
            if needed <= per_line {
                current = needed;
                continue;
            }
            if current > 0 {
                widest = widest.max(current);
                lines += 1;
            }
            while len > per_line {
                widest = widest.max(per_line);
                lines += 1;
                len -= per_line;
            }
            current = len;
        }
        widest = widest.max(current);
        lines += 1;
    }

    Size::new(widest as f64 * advance, lines as f64 * font_size * TEXT_LINE_HEIGHT_EM)
}

/// In-memory store of items in draw order.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Vec<Item>,
}

impl ItemStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Insert an item on top, or replace the item with the same id in place.
    pub fn insert(&mut self, item: Item) {
        if let Some(existing) = self.get_mut(&item.id) {
            *existing = item;
        } else {
            self.items.push(item);
        }
    }

    /// Remove an item by id, returning it if it was present.
    pub fn remove(&mut self, id: &ItemId) -> Option<Item> {
        let idx = self.items.iter().position(|item| item.id == *id)?;
        Some(self.items.remove(idx))
    }

    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == *id)
    }

    pub fn get_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == *id)
    }

    /// The topmost item whose rectangle contains `pt`.
    #[must_use]
    pub fn topmost_at(&self, pt: Point) -> Option<&Item> {
        self.items.iter().rev().find(|item| item.rect.contains(pt))
    }

    /// Replace the text of a text item. Returns false for unknown ids and
    /// non-text items.
    pub fn update_text(&mut self, id: &ItemId, new_text: &str) -> bool {
        let Some(item) = self.get_mut(id) else {
            return false;
        };
        let ItemKind::Text { text } = &mut item.kind else {
            return false;
        };
        new_text.clone_into(text);
        true
    }

    /// Replace all items with a full snapshot, keeping its order.
    pub fn load_snapshot(&mut self, items: Vec<Item>) {
        self.items = items;
    }

    /// All items, bottom to top.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
