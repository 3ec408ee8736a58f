//! Gesture dispatcher: the entry point for touch batches.
//!
//! [`EngineCore`] owns the item store, the grid, the session registry and the
//! edit-mode state. The host feeds it one [`TouchBatch`] at a time and applies
//! the returned [`Action`]s to its own view layer.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashSet;

use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::drag::drag_item;
use crate::edit::{EditMode, TapTracker};
use crate::geometry::{Rect, Size};
use crate::grid::{GridLineId, GridModel};
use crate::input::{Touch, TouchBatch, TouchPhase};
use crate::item::{Item, ItemId, ItemStore};
use crate::session::{GestureState, Role, SessionRegistry};
use crate::snap::snap_rect;
use crate::transform::resize_rotate;

/// Actions returned from batch handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// An item's geometry changed.
    ItemTransformed { id: ItemId, rect: Rect, display_rotation: f64 },
    /// An item entered text edit mode.
    EditingStarted { id: ItemId },
    /// An item left text edit mode.
    EditingStopped { id: ItemId },
    /// Something visible (geometry, highlights, edit state) changed.
    RenderNeeded,
}

/// Touch-driven interaction state for one canvas.
///
/// Single-threaded: a host that receives touches on several threads must
/// route them through one owner.
#[derive(Debug, Clone)]
pub struct EngineCore {
    store: ItemStore,
    grid: GridModel,
    sessions: SessionRegistry,
    active_lines: HashSet<GridLineId>,
    taps: TapTracker,
    edit: EditMode,
    config: EngineConfig,
    /// Reference frame of the most recent batch.
    viewport: Size,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(Vec::new(), GridModel::default(), EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(items: Vec<Item>, grid: GridModel, config: EngineConfig) -> Self {
        config.warn_suspicious();
        let mut store = ItemStore::new();
        store.load_snapshot(items);
        info!(items = store.len(), grid_lines = grid.len(), "interaction engine ready");
        Self {
            store,
            grid,
            sessions: SessionRegistry::new(),
            active_lines: HashSet::new(),
            taps: TapTracker::new(),
            edit: EditMode::default(),
            config,
            viewport: Size::default(),
        }
    }

    // --- Input events ---

    /// Route a batch to the handler for its phase.
    pub fn handle(&mut self, batch: &TouchBatch) -> Vec<Action> {
        match batch.phase {
            TouchPhase::Began => self.on_began(batch),
            TouchPhase::Moved => self.on_moved(batch),
            TouchPhase::Ended => self.on_ended(batch),
            TouchPhase::Cancelled => self.on_cancelled(batch),
        }
    }

    /// Fingers touched down: start sessions, or enter/leave edit mode.
    ///
    /// Entering or leaving edit mode consumes the batch; touches after the
    /// one that caused it are not registered.
    pub fn on_began(&mut self, batch: &TouchBatch) -> Vec<Action> {
        self.viewport = batch.bounds;
        let mut actions = Vec::new();

        for touch in &batch.touches {
            let location = touch.location;

            if let Some(editing) = self.edit.editing_item() {
                match self.store.get(&editing) {
                    Some(item) if !item.rect.contains(location) => {
                        self.edit.stop();
                        actions.push(Action::EditingStopped { id: editing });
                        actions.push(Action::RenderNeeded);
                        return actions;
                    }
                    Some(_) => {}
                    None => {
                        self.edit.stop();
                    }
                }
            }

            if let Some(item) = self.store.topmost_at(location) {
                let id = item.id;
                if item.is_text() && self.taps.is_double_tap(id, location, batch.timestamp_ms, &self.config.tap) {
                    if let Some(previous) = self.edit.start(id) {
                        actions.push(Action::EditingStopped { id: previous });
                    }
                    self.taps.reset();
                    actions.push(Action::EditingStarted { id });
                    actions.push(Action::RenderNeeded);
                    return actions;
                }
                self.taps.record(id, location, batch.timestamp_ms);
            }

            self.sessions
                .begin(touch.id, location, &self.store, self.edit.editing_item());
        }

        actions
    }

    /// Fingers moved: drag touches first, then resize touches, so every
    /// resize sees its anchor's current location.
    pub fn on_moved(&mut self, batch: &TouchBatch) -> Vec<Action> {
        self.viewport = batch.bounds;

        let mut drags = Vec::new();
        let mut resizes = Vec::new();
        for touch in &batch.touches {
            match self.sessions.get(touch.id).map(|s| s.role) {
                Some(Role::Drag(_)) => drags.push(*touch),
                Some(Role::ResizeRotate(_)) => resizes.push(*touch),
                None => {}
            }
        }

        let mut actions = Vec::new();
        for touch in &drags {
            self.sessions.set_location(touch.id, touch.location);
            actions.extend(self.apply_drag(touch));
        }
        for touch in &resizes {
            self.sessions.set_location(touch.id, touch.location);
            actions.extend(self.apply_resize(touch));
        }

        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Fingers lifted.
    pub fn on_ended(&mut self, batch: &TouchBatch) -> Vec<Action> {
        self.finish_touches(batch)
    }

    /// Touches aborted by the platform; handled exactly like lifted fingers.
    pub fn on_cancelled(&mut self, batch: &TouchBatch) -> Vec<Action> {
        self.finish_touches(batch)
    }

    fn finish_touches(&mut self, batch: &TouchBatch) -> Vec<Action> {
        self.viewport = batch.bounds;
        let mut removed = 0;
        for touch in &batch.touches {
            removed += self.sessions.end(touch.id).len();
        }
        let had_lines = !self.active_lines.is_empty();
        self.active_lines.clear();

        if removed > 0 || had_lines {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    fn apply_drag(&mut self, touch: &Touch) -> Option<Action> {
        let Role::Drag(drag) = self.sessions.get(touch.id)?.role else {
            return None;
        };
        let item = self.store.get_mut(&drag.target)?;
        drag_item(item, touch.previous_location, touch.location, self.viewport);
        self.snap_item(drag.target)
    }

    fn apply_resize(&mut self, touch: &Touch) -> Option<Action> {
        let Role::ResizeRotate(resize) = self.sessions.get(touch.id)?.role else {
            return None;
        };
        let anchor = self.sessions.get(resize.anchor)?.last_location;
        let item = self.store.get_mut(&resize.target)?;
        resize_rotate(item, &resize, anchor, touch.location, self.viewport, &self.config);
        self.snap_item(resize.target)
    }

    /// Run the grid pass on an item and report its final geometry.
    fn snap_item(&mut self, id: ItemId) -> Option<Action> {
        let item = self.store.get_mut(&id)?;
        let outcome = snap_rect(item.rect, &self.grid, &self.config.grid, self.viewport);
        item.rect = outcome.rect;
        self.active_lines = outcome.active_lines;
        Some(Action::ItemTransformed { id, rect: item.rect, display_rotation: item.display_rotation })
    }

    // --- Data inputs ---

    /// Replace every item. Live sessions and highlights are dropped; edit
    /// mode survives only if the edited item is still present.
    pub fn load_snapshot(&mut self, items: Vec<Item>) {
        self.store.load_snapshot(items);
        self.sessions = SessionRegistry::new();
        self.active_lines.clear();
        self.taps.reset();
        let edited_gone = self.edit.editing_item().is_some_and(|id| self.store.get(&id).is_none());
        if edited_gone {
            self.edit.stop();
        }
        debug!(items = self.store.len(), "snapshot loaded");
    }

    /// Add an item on top, or replace the item with the same id.
    pub fn insert_item(&mut self, item: Item) {
        self.store.insert(item);
    }

    /// Remove an item along with every session that targets it.
    pub fn remove_item(&mut self, id: &ItemId) -> Option<Item> {
        let removed = self.store.remove(id)?;
        if !self.sessions.forget_item(id).is_empty() {
            self.active_lines.clear();
        }
        if self.edit.is_editing(id) {
            self.edit.stop();
        }
        Some(removed)
    }

    // --- Text editing ---

    /// Put an item into edit mode. Returns false for unknown ids.
    pub fn start_editing(&mut self, id: ItemId) -> bool {
        if self.store.get(&id).is_none() {
            return false;
        }
        self.edit.start(id);
        true
    }

    /// Leave edit mode, returning the item that was being edited.
    pub fn stop_editing(&mut self) -> Option<ItemId> {
        self.edit.stop()
    }

    #[must_use]
    pub fn is_editing(&self, id: &ItemId) -> bool {
        self.edit.is_editing(id)
    }

    #[must_use]
    pub fn editing_item(&self) -> Option<ItemId> {
        self.edit.editing_item()
    }

    /// Replace the text of a text item and regrow its box to fit.
    ///
    /// Unknown ids and non-text items are ignored.
    pub fn update_text(&mut self, id: &ItemId, text: &str) -> Vec<Action> {
        if !self.store.update_text(id, text) {
            return Vec::new();
        }
        let Some(item) = self.store.get_mut(id) else {
            return Vec::new();
        };
        let fitted = item.intercept_rect(item.rect);
        item.rect = if self.viewport.width > 0.0 && self.viewport.height > 0.0 {
            fitted.confined_to(self.viewport)
        } else {
            fitted
        };
        vec![
            Action::ItemTransformed { id: *id, rect: item.rect, display_rotation: item.display_rotation },
            Action::RenderNeeded,
        ]
    }

    // --- Queries ---

    #[must_use]
    pub fn items(&self) -> &[Item] {
        self.store.items()
    }

    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.store.get(id)
    }

    #[must_use]
    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn is_dragging_active(&self) -> bool {
        self.sessions.is_dragging_active()
    }

    #[must_use]
    pub fn is_resizing_active(&self) -> bool {
        self.sessions.is_resizing_active()
    }

    /// Whether any grid line is currently highlighted.
    #[must_use]
    pub fn is_grid_active(&self) -> bool {
        !self.active_lines.is_empty()
    }

    #[must_use]
    pub fn active_line_ids(&self) -> &HashSet<GridLineId> {
        &self.active_lines
    }

    #[must_use]
    pub fn gesture_state(&self, id: &ItemId) -> GestureState {
        self.sessions.gesture_state(id)
    }

    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
