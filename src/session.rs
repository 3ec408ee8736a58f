//! Touch session registry: one role per active touch.
//!
//! The first touch that lands on an item becomes its `Drag` session. While
//! that drag is alive, the next touch (wherever it lands) becomes a
//! `ResizeRotate` session that uses the drag touch as its fixed pivot. Any
//! further touch is inert: it registers nothing and all of its later events
//! are ignored.
//!
//! Ending a touch removes its session and, in the same pass, every
//! `ResizeRotate` session anchored to it. Ended and cancelled touches go
//! through the same [`SessionRegistry::end`].

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::HashMap;

use tracing::debug;

use crate::consts::MIN_ANCHOR_DISTANCE;
use crate::geometry::{Point, Size};
use crate::input::TouchId;
use crate::item::{ItemId, ItemStore};

/// Bookkeeping for a one-finger move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub target: ItemId,
    /// Item origin when the touch began.
    pub initial_origin: Point,
}

/// Bookkeeping for a two-finger resize + rotate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeRotateSession {
    pub target: ItemId,
    /// The drag touch acting as the pivot.
    pub anchor: TouchId,
    /// Pivot position within the item rect, normalized by its size.
    pub anchor_ratio: Point,
    pub initial_size: Size,
    pub initial_cumulative_rotation: f64,
    /// Anchor-to-touch distance at the start, floored at [`MIN_ANCHOR_DISTANCE`].
    pub initial_anchor_distance: f64,
    /// Anchor-to-touch angle at the start, in radians.
    pub initial_angle: f64,
}

/// What a touch is doing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Role {
    Drag(DragSession),
    ResizeRotate(ResizeRotateSession),
}

impl Role {
    /// The item this role manipulates.
    #[must_use]
    pub fn target(&self) -> ItemId {
        match self {
            Self::Drag(drag) => drag.target,
            Self::ResizeRotate(resize) => resize.target,
        }
    }
}

/// A live touch and its role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSession {
    pub touch: TouchId,
    /// Most recent location reported for this touch.
    pub last_location: Point,
    pub role: Role,
}

/// Interaction state of a single item, derived from the sessions targeting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging,
    ResizingRotating,
}

/// Outcome of [`SessionRegistry::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Begin {
    /// A drag session was created for the item.
    Drag(ItemId),
    /// A resize/rotate session was created for the item.
    ResizeRotate(ItemId),
    /// No session was created.
    Ignored,
}

/// Maps live touches to their sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: HashMap<TouchId, TouchSession>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self { sessions: HashMap::new() }
    }

    /// Register a touch that just began at `location`.
    ///
    /// `locked` names an item that must not start a drag (the item being text
    /// edited); it does not block resize sessions on an existing drag.
    pub fn begin(&mut self, touch: TouchId, location: Point, store: &ItemStore, locked: Option<ItemId>) -> Begin {
        if self.sessions.contains_key(&touch) {
            return Begin::Ignored;
        }

        if let Some(anchor) = self.drag_session().copied() {
            if self.has_dependent(anchor.touch) {
                debug!(%touch, "additional touch ignored; item already has two fingers");
                return Begin::Ignored;
            }
            let target = anchor.role.target();
            let Some(item) = store.get(&target) else {
                return Begin::Ignored;
            };

            let pivot = anchor.last_location;
            let rect = item.rect;
            let session = ResizeRotateSession {
                target,
                anchor: anchor.touch,
                anchor_ratio: Point::new(ratio(pivot.x - rect.x, rect.width), ratio(pivot.y - rect.y, rect.height)),
                initial_size: rect.size(),
                initial_cumulative_rotation: item.cumulative_rotation,
                initial_anchor_distance: pivot.distance(location).max(MIN_ANCHOR_DISTANCE),
                initial_angle: pivot.angle_to(location),
            };
            debug!(%touch, anchor = %anchor.touch, item = %target, "resize/rotate session started");
            self.sessions
                .insert(touch, TouchSession { touch, last_location: location, role: Role::ResizeRotate(session) });
            return Begin::ResizeRotate(target);
        }

        let Some(item) = store.topmost_at(location) else {
            return Begin::Ignored;
        };
        if locked == Some(item.id) {
            return Begin::Ignored;
        }

        let session = DragSession { target: item.id, initial_origin: item.rect.origin() };
        debug!(%touch, item = %item.id, "drag session started");
        self.sessions
            .insert(touch, TouchSession { touch, last_location: location, role: Role::Drag(session) });
        Begin::Drag(item.id)
    }

    /// End a touch: drop its session and every resize session anchored to it.
    ///
    /// Returns the touches whose sessions were removed, the ended touch first.
    pub fn end(&mut self, touch: TouchId) -> Vec<TouchId> {
        let mut removed = Vec::new();
        if self.sessions.remove(&touch).is_some() {
            removed.push(touch);
        }

        let dependents: Vec<TouchId> = self
            .sessions
            .values()
            .filter(|s| matches!(s.role, Role::ResizeRotate(r) if r.anchor == touch))
            .map(|s| s.touch)
            .collect();
        for dependent in dependents {
            self.sessions.remove(&dependent);
            debug!(touch = %dependent, anchor = %touch, "resize/rotate session dropped with its anchor");
            removed.push(dependent);
        }

        if !removed.is_empty() {
            debug!(%touch, removed = removed.len(), "touch session ended");
        }
        removed
    }

    /// Drop every session that targets `item`, e.g. after the host removed it.
    pub fn forget_item(&mut self, item: &ItemId) -> Vec<TouchId> {
        let touches: Vec<TouchId> = self
            .sessions
            .values()
            .filter(|s| s.role.target() == *item)
            .map(|s| s.touch)
            .collect();
        let mut removed = Vec::new();
        for touch in touches {
            removed.extend(self.end(touch));
        }
        removed
    }

    /// Record the latest location of a live touch. Unknown touches are ignored.
    pub fn set_location(&mut self, touch: TouchId, location: Point) {
        if let Some(session) = self.sessions.get_mut(&touch) {
            session.last_location = location;
        }
    }

    #[must_use]
    pub fn get(&self, touch: TouchId) -> Option<&TouchSession> {
        self.sessions.get(&touch)
    }

    /// The live drag session, if any.
    #[must_use]
    pub fn drag_session(&self) -> Option<&TouchSession> {
        self.sessions.values().find(|s| matches!(s.role, Role::Drag(_)))
    }

    /// Whether some resize session is anchored to `anchor`.
    #[must_use]
    pub fn has_dependent(&self, anchor: TouchId) -> bool {
        self.sessions
            .values()
            .any(|s| matches!(s.role, Role::ResizeRotate(r) if r.anchor == anchor))
    }

    #[must_use]
    pub fn is_dragging_active(&self) -> bool {
        self.sessions.values().any(|s| matches!(s.role, Role::Drag(_)))
    }

    #[must_use]
    pub fn is_resizing_active(&self) -> bool {
        self.sessions.values().any(|s| matches!(s.role, Role::ResizeRotate(_)))
    }

    /// Derived interaction state of one item.
    #[must_use]
    pub fn gesture_state(&self, item: &ItemId) -> GestureState {
        let mut state = GestureState::Idle;
        for session in self.sessions.values().filter(|s| s.role.target() == *item) {
            match session.role {
                Role::ResizeRotate(_) => return GestureState::ResizingRotating,
                Role::Drag(_) => state = GestureState::Dragging,
            }
        }
        state
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

fn ratio(offset: f64, extent: f64) -> f64 {
    if extent > 0.0 { offset / extent } else { 0.0 }
}
