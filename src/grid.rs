//! Grid model: the immutable set of alignment lines items snap to.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a grid line.
pub type GridLineId = Uuid;

/// Which axis a grid line runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// A line of constant x; attracts the left and right edges.
    Vertical,
    /// A line of constant y; attracts the top and bottom edges.
    Horizontal,
}

/// A single alignment line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub id: GridLineId,
    pub orientation: Orientation,
    /// The x coordinate of a vertical line or the y coordinate of a horizontal one.
    pub position: f64,
}

impl GridLine {
    #[must_use]
    pub fn new(orientation: Orientation, position: f64) -> Self {
        Self { id: Uuid::new_v4(), orientation, position }
    }

    #[must_use]
    pub fn vertical(x: f64) -> Self {
        Self::new(Orientation::Vertical, x)
    }

    #[must_use]
    pub fn horizontal(y: f64) -> Self {
        Self::new(Orientation::Horizontal, y)
    }
}

/// Immutable collection of grid lines, fixed for the lifetime of an engine.
#[derive(Debug, Clone, Default)]
pub struct GridModel {
    lines: Vec<GridLine>,
}

impl GridModel {
    #[must_use]
    pub fn new(lines: Vec<GridLine>) -> Self {
        Self { lines }
    }

    /// All lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[GridLine] {
        &self.lines
    }

    /// Lines of one orientation, in insertion order.
    pub fn oriented(&self, orientation: Orientation) -> impl Iterator<Item = &GridLine> {
        self.lines.iter().filter(move |line| line.orientation == orientation)
    }

    #[must_use]
    pub fn get(&self, id: &GridLineId) -> Option<&GridLine> {
        self.lines.iter().find(|line| line.id == *id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
