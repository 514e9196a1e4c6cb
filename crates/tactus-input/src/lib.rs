//! Pooled pointer records for Tactus.
//!
//! A [`Pointer`] is a reusable record for one touch, mouse, pen or synthetic
//! contact. Records keep a stable [`PointerId`] while active, expose a
//! double-buffered position, cache the surface under them until the cache is
//! invalidated, and hold a reference count that delays physical reuse.
//!
//! [`PointerPool`] drives the per-frame lifecycle of a set of records and
//! recycles them once nothing holds them any more.

mod buttons;
mod error;
mod flags;
mod hit;
mod pointer;
mod pool;
mod settings;
mod types;

pub use buttons::PointerButtons;
pub use error::PoolError;
pub use flags::PointerFlags;
pub use hit::{HitPath, HitResolver, HitResult, LayerId};
pub use pointer::Pointer;
pub use pool::{PointerPool, Recycle};
pub use settings::{PoolSettings, CAPACITY_ENV, MAX_POINTERS_ENV};
pub use tactus_geometry::Point;
pub use types::{InputSourceId, PointerButton, PointerId, PointerKind};

pub mod prelude {
    pub use crate::buttons::PointerButtons;
    pub use crate::flags::PointerFlags;
    pub use crate::hit::{HitResolver, HitResult, LayerId};
    pub use crate::pointer::Pointer;
    pub use crate::pool::{PointerPool, Recycle};
    pub use crate::types::{InputSourceId, PointerButton, PointerId, PointerKind};
    pub use tactus_geometry::Point;
}
