//! A flat, z-ordered set of rectangular layers that resolves pointer hits.

use tactus_geometry::{Point, Rect};
use tactus_input::{HitResolver, HitResult, LayerId, Pointer};

#[derive(Clone, Debug)]
pub struct LayerRegion {
    pub layer: LayerId,
    pub rect: Rect,
    pub z_index: usize,
}

/// Layers are hit-tested top-most first; later pushes sit on top.
#[derive(Clone, Debug, Default)]
pub struct LayerScene {
    regions: Vec<LayerRegion>,
    next_z: usize,
}

impl LayerScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a layer above everything pushed so far.
    pub fn push(&mut self, layer: LayerId, rect: Rect) -> &mut Self {
        let z_index = self.next_z;
        self.next_z += 1;
        self.regions.push(LayerRegion {
            layer,
            rect,
            z_index,
        });
        self
    }

    pub fn with_layer(mut self, layer: LayerId, rect: Rect) -> Self {
        self.push(layer, rect);
        self
    }

    pub fn remove(&mut self, layer: LayerId) {
        self.regions.retain(|region| region.layer != layer);
    }

    /// Moves an existing layer; returns false if it is not in the scene.
    pub fn move_layer(&mut self, layer: LayerId, rect: Rect) -> bool {
        match self.regions.iter_mut().find(|region| region.layer == layer) {
            Some(region) => {
                region.rect = rect;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.regions.clear();
        self.next_z = 0;
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Layers containing `point`, top-most first, with the point in the
    /// top-most layer's local space.
    pub fn hit_test(&self, point: Point) -> HitResult {
        let mut hits: Vec<&LayerRegion> = self
            .regions
            .iter()
            .filter(|region| region.rect.contains_point(point))
            .collect();
        hits.sort_by(|a, b| b.z_index.cmp(&a.z_index));

        match hits.first() {
            Some(top) => HitResult::new(
                hits.iter().map(|region| region.layer),
                top.rect.to_local(point),
            ),
            None => HitResult::none(),
        }
    }
}

impl HitResolver for LayerScene {
    fn resolve(&self, pointer: &Pointer) -> HitResult {
        self.hit_test(pointer.position())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> LayerScene {
        LayerScene::new()
            .with_layer(LayerId(1), Rect::new(0.0, 0.0, 100.0, 100.0))
            .with_layer(LayerId(2), Rect::new(10.0, 10.0, 20.0, 20.0))
    }

    #[test]
    fn top_most_layer_first() {
        let hit = scene().hit_test(Point::new(15.0, 15.0));
        assert_eq!(hit.path(), &[LayerId(2), LayerId(1)]);
        assert_eq!(hit.local_position(), Point::new(5.0, 5.0));
    }

    #[test]
    fn outside_everything_is_a_miss() {
        assert_eq!(scene().hit_test(Point::new(200.0, 5.0)), HitResult::none());
    }

    #[test]
    fn moved_layer_changes_result() {
        let mut scene = scene();
        assert!(scene.move_layer(LayerId(2), Rect::new(50.0, 50.0, 10.0, 10.0)));
        assert_eq!(
            scene.hit_test(Point::new(15.0, 15.0)).target(),
            Some(LayerId(1))
        );
        assert!(!scene.move_layer(LayerId(9), Rect::new(0.0, 0.0, 1.0, 1.0)));
    }
}
