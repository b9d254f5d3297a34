//! Geometry primitives used across trellis.
//!
//! All coordinates are logical pixels in `f32`, with the origin at the top
//! left and `y` growing downwards.

/// Layout axis helpers.
mod axis;
/// Width/height size type.
mod expanse;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;

pub use axis::Axis;
pub use expanse::Expanse;
pub use point::Point;
pub use rect::Rect;
