//! Pure math/data for holdmenu
//!
//! Geometry primitives and color definitions shared by the gesture,
//! animation and layout crates. Everything here is plain `Copy` data.

mod color;
mod geometry;

pub use color::*;
pub use geometry::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::geometry::{EdgeInsets, Point, Rect, Size};
}
