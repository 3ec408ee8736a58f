//! Input model: touch identities, phases, and the batches the host delivers.
//!
//! The host translates whatever its platform reports into [`TouchBatch`]es
//! and hands them to [`crate::engine::EngineCore::handle`]. A batch carries
//! the touches that changed in one phase together with the bounds of the
//! reference frame their locations are expressed in.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;

use crate::geometry::{Point, Size};

/// Opaque touch identity supplied by the host. Only compared and hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TouchId(pub u64);

impl fmt::Display for TouchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "touch#{}", self.0)
    }
}

/// Lifecycle phase of the touches in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// Fingers touched down.
    Began,
    /// Fingers moved.
    Moved,
    /// Fingers lifted.
    Ended,
    /// The platform aborted the touches (e.g. an interrupting system gesture).
    Cancelled,
}

/// One touch as reported in a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    pub id: TouchId,
    /// Current location in the reference frame.
    pub location: Point,
    /// Location at the previous event for this touch.
    pub previous_location: Point,
}

impl Touch {
    /// A touch whose previous location equals its current one.
    #[must_use]
    pub fn at(id: TouchId, location: Point) -> Self {
        Self { id, location, previous_location: location }
    }

    /// A touch that moved from `previous_location` to `location`.
    #[must_use]
    pub fn moved(id: TouchId, previous_location: Point, location: Point) -> Self {
        Self { id, location, previous_location }
    }
}

/// Touches sharing one phase, delivered together.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchBatch {
    pub phase: TouchPhase,
    pub touches: Vec<Touch>,
    /// Size of the reference frame; items are kept inside `(0, 0)..bounds`.
    pub bounds: Size,
    /// Host timestamp of the batch in milliseconds; used for double-tap timing.
    pub timestamp_ms: u64,
}

impl TouchBatch {
    #[must_use]
    pub fn new(phase: TouchPhase, touches: Vec<Touch>, bounds: Size, timestamp_ms: u64) -> Self {
        Self { phase, touches, bounds, timestamp_ms }
    }
}
