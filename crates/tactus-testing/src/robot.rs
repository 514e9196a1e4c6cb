//! Robot-style driver for pointer scenarios
//!
//! [`PointerRobot`] owns a [`PointerPool`] and a [`LayerScene`] and plays
//! input through them in frame phase order:
//!
//! ```text
//! begin_frame -> input writes -> commit_frame
//! ```
//!
//! # Example
//!
//! ```
//! use tactus_geometry::Rect;
//! use tactus_input::{LayerId, PointerButton};
//! use tactus_testing::{LayerScene, PointerRobot};
//!
//! let scene = LayerScene::new().with_layer(LayerId(1), Rect::new(0.0, 0.0, 50.0, 50.0));
//! let mut robot = PointerRobot::new(scene);
//!
//! let id = robot.touch_down(10.0, 10.0).unwrap();
//! assert!(robot.pointer(id).unwrap().was_pressed(PointerButton::Primary));
//!
//! robot.drag(id, 40.0, 10.0, 3).unwrap();
//! assert_eq!(robot.over(id).and_then(|hit| hit.target()), Some(LayerId(1)));
//! ```

use tactus_geometry::Point;
use tactus_input::{
    HitResult, InputSourceId, Pointer, PointerButton, PointerId, PointerKind, PointerPool,
    PoolError, PoolSettings, Recycle,
};

use crate::counting::CountingResolver;
use crate::scene::LayerScene;

pub struct PointerRobot {
    pool: PointerPool,
    scene: CountingResolver<LayerScene>,
    source: InputSourceId,
    kind: PointerKind,
    frames: u64,
}

impl PointerRobot {
    /// Touch robot with default pool settings.
    pub fn new(scene: LayerScene) -> Self {
        Self::with_settings(scene, PoolSettings::default())
    }

    pub fn with_settings(scene: LayerScene, settings: PoolSettings) -> Self {
        Self {
            pool: PointerPool::with_settings(settings),
            scene: CountingResolver::new(scene),
            source: InputSourceId(0),
            kind: PointerKind::Touch,
            frames: 0,
        }
    }

    /// Pointers activated from now on come from `source` with `kind`.
    pub fn with_source(mut self, source: InputSourceId, kind: PointerKind) -> Self {
        self.source = source;
        self.kind = kind;
        self
    }

    pub fn pool(&self) -> &PointerPool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut PointerPool {
        &mut self.pool
    }

    pub fn pointer(&self, id: PointerId) -> Option<&Pointer> {
        self.pool.get(id)
    }

    pub fn scene(&self) -> &LayerScene {
        self.scene.inner()
    }

    pub fn scene_mut(&mut self) -> &mut LayerScene {
        self.scene.inner_mut()
    }

    /// Hit resolutions performed so far, press captures included.
    pub fn resolver_calls(&self) -> usize {
        self.scene.calls()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs one frame with `input` writing between frame start and commit.
    pub fn frame<T>(&mut self, input: impl FnOnce(&mut PointerPool) -> T) -> T {
        self.pool.begin_frame();
        let out = input(&mut self.pool);
        self.pool.commit_frame();
        self.frames += 1;
        log::trace!("robot frame {} done", self.frames);
        out
    }

    /// Starts a contact at (x, y) with the primary button held.
    pub fn touch_down(&mut self, x: f32, y: f32) -> Result<PointerId, PoolError> {
        let source = self.source;
        let kind = self.kind;
        self.pool.begin_frame();
        let activated = self
            .pool
            .activate(source, kind, Point::new(x, y), &self.scene);
        if let Ok(id) = activated {
            if let Some(pointer) = self.pool.get_mut(id) {
                pointer.press_button(PointerButton::Primary);
            }
        }
        self.pool.commit_frame();
        self.frames += 1;
        activated
    }

    /// One frame moving `id` to (x, y).
    pub fn move_to(&mut self, id: PointerId, x: f32, y: f32) -> Result<(), PoolError> {
        self.frame(|pool| -> Result<(), PoolError> {
            let pointer = pool.get_mut(id).ok_or(PoolError::UnknownPointer(id))?;
            pointer.set_position(Point::new(x, y));
            Ok(())
        })
    }

    /// Moves `id` to (x, y) over `steps` frames.
    pub fn drag(&mut self, id: PointerId, x: f32, y: f32, steps: usize) -> Result<(), PoolError> {
        let start = self
            .pool
            .get(id)
            .ok_or(PoolError::UnknownPointer(id))?
            .position();
        let steps = steps.max(1);
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            self.move_to(
                id,
                start.x + (x - start.x) * t,
                start.y + (y - start.y) * t,
            )?;
        }
        Ok(())
    }

    /// Releases the primary button for one frame, then lifts the contact.
    pub fn touch_up(&mut self, id: PointerId) -> Result<Recycle, PoolError> {
        self.frame(|pool| -> Result<(), PoolError> {
            let pointer = pool.get_mut(id).ok_or(PoolError::UnknownPointer(id))?;
            pointer.release_button(PointerButton::Primary);
            Ok(())
        })?;
        self.pool.lift(id)
    }

    /// Lazily resolved over data of `id`, `None` for unknown ids.
    pub fn over(&mut self, id: PointerId) -> Option<HitResult> {
        let pointer = self.pool.get_mut(id)?;
        Some(pointer.over_data(&self.scene, false).clone())
    }

    /// Over data resolved again regardless of the cache.
    pub fn over_forced(&mut self, id: PointerId) -> Option<HitResult> {
        let pointer = self.pool.get_mut(id)?;
        Some(pointer.over_data(&self.scene, true).clone())
    }
}
