//! Shared numeric constants: defaults for the tunable [`crate::config`] values
//! and fixed limits that are not configurable.

// ── Grid snapping ───────────────────────────────────────────────

/// Distance below which a grid line is highlighted.
pub const DEFAULT_GRID_ACTIVATE_THRESHOLD: f64 = 1.0;

/// Distance below which an edge is partially pulled toward a line.
pub const DEFAULT_GRID_STICKY_THRESHOLD: f64 = 1.0;

/// Distance at or below which an edge snaps exactly onto a line.
pub const DEFAULT_GRID_SNAP_THRESHOLD: f64 = 1.0;

// ── Rotation ────────────────────────────────────────────────────

/// Minimum angular change, in degrees, before a two-finger gesture rotates.
pub const DEFAULT_ROTATION_ACTIVATION_DEG: f64 = 10.0;

/// Maximum distance, in degrees, from a snap angle that still snaps.
pub const DEFAULT_ROTATION_SNAP_THRESHOLD_DEG: f64 = 5.0;

/// Rotation snap targets within one turn, in degrees.
pub const ROTATION_SNAP_ANGLES_DEG: [f64; 5] = [0.0, 90.0, 180.0, 270.0, 360.0];

// ── Scale ───────────────────────────────────────────────────────

pub const DEFAULT_MIN_SCALE: f64 = 0.3;
pub const DEFAULT_MAX_SCALE: f64 = 3.0;

/// Floor for the initial anchor-to-touch distance; keeps the scale ratio finite.
pub const MIN_ANCHOR_DISTANCE: f64 = 1.0;

// ── Taps ────────────────────────────────────────────────────────

/// Maximum interval between two taps on the same item for a double tap.
pub const DEFAULT_DOUBLE_TAP_WINDOW_MS: u64 = 500;

/// Maximum distance between two taps for a double tap.
pub const DEFAULT_DOUBLE_TAP_DISTANCE: f64 = 20.0;

// ── Text items ──────────────────────────────────────────────────

pub const TEXT_MIN_WIDTH: f64 = 60.0;
pub const TEXT_MIN_HEIGHT: f64 = 40.0;

/// Padding added around measured text when recommending a size.
pub const TEXT_PADDING: f64 = 16.0;

/// Font size the recommended text box is measured at.
pub const TEXT_REFERENCE_FONT_SIZE: f64 = 16.0;

/// Narrowest wrap width used when measuring text.
pub const TEXT_MIN_WRAP_WIDTH: f64 = 100.0;

/// Average glyph advance as a fraction of the font size.
pub const TEXT_GLYPH_ADVANCE_EM: f64 = 0.6;

/// Line height as a fraction of the font size.
pub const TEXT_LINE_HEIGHT_EM: f64 = 1.2;
