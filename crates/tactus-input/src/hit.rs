//! Hit results and the resolver seam.
//!
//! The layer subsystem that knows which surface lies under a position lives
//! outside this crate. Pointers talk to it through [`HitResolver`] and cache
//! whatever [`HitResult`] it hands back.

use smallvec::SmallVec;
use tactus_geometry::Point;

use crate::pointer::Pointer;

/// Identity of a hit-testable surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u32);

/// Layers under a pointer, top-most first.
pub type HitPath = SmallVec<[LayerId; 4]>;

/// Outcome of a hit test for one pointer.
///
/// The default value is the "no hit" result. Resolvers report a miss by
/// returning it rather than failing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HitResult {
    path: HitPath,
    /// Pointer position relative to the top-most layer.
    local_position: Point,
}

impl HitResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(path: impl IntoIterator<Item = LayerId>, local_position: Point) -> Self {
        Self {
            path: path.into_iter().collect(),
            local_position,
        }
    }

    pub fn single(layer: LayerId, local_position: Point) -> Self {
        let mut path = HitPath::new();
        path.push(layer);
        Self {
            path,
            local_position,
        }
    }

    /// Top-most layer under the pointer.
    pub fn target(&self) -> Option<LayerId> {
        self.path.first().copied()
    }

    pub fn path(&self) -> &[LayerId] {
        &self.path
    }

    pub fn local_position(&self) -> Point {
        self.local_position
    }

    pub fn is_hit(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn contains(&self, layer: LayerId) -> bool {
        self.path.contains(&layer)
    }
}

/// Resolves the surface currently under a pointer.
///
/// Pointers only call this when their cached over data is stale, so
/// implementations may do real work (walk a layer tree, query a scene).
pub trait HitResolver {
    fn resolve(&self, pointer: &Pointer) -> HitResult;
}

impl<F> HitResolver for F
where
    F: Fn(&Pointer) -> HitResult,
{
    fn resolve(&self, pointer: &Pointer) -> HitResult {
        self(pointer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_a_miss() {
        let miss = HitResult::default();
        assert!(!miss.is_hit());
        assert_eq!(miss.target(), None);
        assert_eq!(miss, HitResult::none());
    }

    #[test]
    fn target_is_top_of_path() {
        let hit = HitResult::new([LayerId(3), LayerId(1)], Point::new(2.0, 2.0));
        assert_eq!(hit.target(), Some(LayerId(3)));
        assert!(hit.contains(LayerId(1)));
        assert_eq!(hit.path(), &[LayerId(3), LayerId(1)]);
    }
}
