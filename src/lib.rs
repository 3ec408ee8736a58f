//! Multitouch interaction engine for rectangular items on a canvas.
//!
//! Turns concurrent touch streams into move, resize, rotate and grid-snap
//! transforms. One finger on an item drags it; a second finger anywhere on
//! the canvas resizes and rotates the dragged item around the first finger.
//! After every geometry change the item is snapped against a fixed set of
//! alignment lines and the lines near its edges are reported for
//! highlighting. Double-tapping a text item puts it into edit mode.
//!
//! The crate is a synchronous state machine with no I/O. The host delivers
//! [`input::TouchBatch`]es to [`engine::EngineCore::handle`] and applies the
//! returned [`engine::Action`]s to its view.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Gesture dispatcher, [`engine::EngineCore`] and [`engine::Action`] |
//! | [`session`] | Touch session registry: drag and resize/rotate roles |
//! | [`drag`] | Single-finger translation |
//! | [`transform`] | Two-finger scale and rotation with quarter-turn snapping |
//! | [`snap`] | Grid snapping and active-line detection |
//! | [`edit`] | Double-tap recognition and text edit mode |
//! | [`item`] | Items, item kinds and the item store |
//! | [`grid`] | Alignment lines |
//! | [`input`] | Touch ids, phases and batches |
//! | [`geometry`] | Points, sizes, rectangles and angle helpers |
//! | [`config`] | Tunable thresholds, env/JSON loading and validation |
//! | [`consts`] | Default values and fixed limits |

pub mod config;
pub mod consts;
pub mod drag;
pub mod edit;
pub mod engine;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod item;
pub mod session;
pub mod snap;
pub mod transform;
