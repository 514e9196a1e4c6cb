//! Pure math for pointer tracking in Tactus
//!
//! This crate contains the geometry primitives shared by pointer records,
//! hit resolvers and the testing harness.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{Point, Rect, Size};
}
