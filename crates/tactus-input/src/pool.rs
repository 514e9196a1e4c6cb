//! Arena of reusable pointer records.
//!
//! Records live in a slot vector and are never dropped while the pool is
//! alive. Unbound slots sit on a free list, live ids map to slots through a
//! hash map kept outside the records themselves.
//!
//! A lifted contact whose record is still retained stays bound ("pending")
//! until the release that brings its count to zero. Only then is the slot
//! reset and handed back to the free list.

use rustc_hash::FxHashMap;
use tactus_geometry::Point;

use crate::error::PoolError;
use crate::hit::HitResolver;
use crate::pointer::Pointer;
use crate::settings::PoolSettings;
use crate::types::{InputSourceId, PointerId, PointerKind};

/// Outcome of [`PointerPool::lift`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recycle {
    /// Nothing held the record; its slot is free again.
    Now,
    /// Holders remain; the slot frees up when the last one releases.
    Deferred,
}

#[derive(Debug)]
struct Slot {
    pointer: Pointer,
    pending_recycle: bool,
}

impl Slot {
    fn new(pointer: Pointer) -> Self {
        Self {
            pointer,
            pending_recycle: false,
        }
    }
}

#[derive(Debug)]
pub struct PointerPool {
    settings: PoolSettings,
    slots: Vec<Slot>,
    free: Vec<usize>,
    live: FxHashMap<PointerId, usize>,
    next_id: i32,
}

impl PointerPool {
    pub fn new() -> Self {
        Self::with_settings(PoolSettings::default())
    }

    pub fn with_settings(settings: PoolSettings) -> Self {
        let capacity = settings.reserved_capacity();
        Self {
            settings,
            slots: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
            live: FxHashMap::default(),
            next_id: 0,
        }
    }

    pub fn settings(&self) -> &PoolSettings {
        &self.settings
    }

    /// Number of bound records, pending ones included.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Number of records ever allocated (bound or free).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Binds a record to a new contact and captures its press data.
    ///
    /// A free record of the same source and kind is reused when one exists.
    /// Otherwise a new record is allocated, and once the pool is full a
    /// free record of another source is replaced.
    pub fn activate<R>(
        &mut self,
        source: InputSourceId,
        kind: PointerKind,
        position: Point,
        resolver: &R,
    ) -> Result<PointerId, PoolError>
    where
        R: HitResolver + ?Sized,
    {
        let slot = self.acquire_slot(source, kind)?;
        let id = self.allocate_id();

        let entry = &mut self.slots[slot];
        entry.pending_recycle = false;
        let pointer = &mut entry.pointer;
        pointer.reset();
        pointer.set_position(position);
        pointer.init(id);
        let press = resolver.resolve(pointer);
        pointer.set_press_data(press);

        self.live.insert(id, slot);
        log::debug!("activated {} in slot {}", pointer, slot);
        Ok(id)
    }

    pub fn get(&self, id: PointerId) -> Option<&Pointer> {
        let slot = self.slot_of(id).ok()?;
        Some(&self.slots[slot].pointer)
    }

    /// Mutable access for input writes. Lifecycle calls (`init`, `reset`,
    /// `commit_position`, `clear_press_data`) stay with the pool.
    pub fn get_mut(&mut self, id: PointerId) -> Option<&mut Pointer> {
        let slot = self.slot_of(id).ok()?;
        Some(&mut self.slots[slot].pointer)
    }

    pub fn contains(&self, id: PointerId) -> bool {
        self.live.contains_key(&id)
    }

    /// True when the contact was lifted but holders still keep it bound.
    pub fn is_pending(&self, id: PointerId) -> bool {
        self.live
            .get(&id)
            .is_some_and(|&slot| self.slots[slot].pending_recycle)
    }

    /// Bound records in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Pointer> {
        self.slots
            .iter()
            .map(|slot| &slot.pointer)
            .filter(|pointer| pointer.is_active())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Pointer> {
        self.slots
            .iter_mut()
            .map(|slot| &mut slot.pointer)
            .filter(|pointer| pointer.is_active())
    }

    /// Frame-start bookkeeping for every bound record.
    pub fn begin_frame(&mut self) {
        for pointer in self.iter_mut() {
            pointer.frame_started();
        }
    }

    /// Commits the staged position of every bound record.
    pub fn commit_frame(&mut self) {
        for pointer in self.iter_mut() {
            pointer.commit_position();
        }
    }

    pub fn retain(&mut self, id: PointerId) -> Result<i32, PoolError> {
        let pointer = self.get_mut(id).ok_or(PoolError::UnknownPointer(id))?;
        Ok(pointer.retain())
    }

    /// Drops one holder of `id` and returns the remaining count.
    ///
    /// If the contact was already lifted and the count reaches zero (or
    /// below), the record is recycled.
    pub fn release(&mut self, id: PointerId) -> Result<i32, PoolError> {
        let slot = self.slot_of(id)?;
        let entry = &mut self.slots[slot];
        let count = entry.pointer.release();
        if count <= 0 && entry.pending_recycle {
            self.recycle(id, slot);
        }
        Ok(count)
    }

    /// Ends the contact behind `id`.
    pub fn lift(&mut self, id: PointerId) -> Result<Recycle, PoolError> {
        let slot = self.slot_of(id)?;
        let entry = &mut self.slots[slot];
        if entry.pointer.ref_count() > 0 {
            entry.pending_recycle = true;
            log::debug!(
                "pointer {} lifted, {} holder(s) left",
                id,
                entry.pointer.ref_count()
            );
            Ok(Recycle::Deferred)
        } else {
            self.recycle(id, slot);
            Ok(Recycle::Now)
        }
    }

    /// Recycles every bound record regardless of holders.
    pub fn clear(&mut self) {
        let live: Vec<(PointerId, usize)> = self.live.drain().collect();
        for (id, slot) in live {
            self.reset_slot(slot);
            log::trace!("pointer {} dropped by clear", id);
        }
    }

    fn slot_of(&self, id: PointerId) -> Result<usize, PoolError> {
        let slot = self
            .live
            .get(&id)
            .copied()
            .ok_or(PoolError::UnknownPointer(id))?;
        debug_assert_eq!(
            self.slots[slot].pointer.id(),
            id,
            "pointer in slot {slot} was re-initialised outside the pool"
        );
        Ok(slot)
    }

    fn acquire_slot(
        &mut self,
        source: InputSourceId,
        kind: PointerKind,
    ) -> Result<usize, PoolError> {
        let matching = self.free.iter().rposition(|&slot| {
            let pointer = &self.slots[slot].pointer;
            pointer.source() == source && pointer.kind() == kind
        });
        if let Some(at) = matching {
            return Ok(self.free.swap_remove(at));
        }

        if self.slots.len() < self.settings.max_pointers {
            self.slots.push(Slot::new(Pointer::new(source, kind)));
            return Ok(self.slots.len() - 1);
        }

        // Records stay bound to one source, so a foreign free slot gets a
        // brand new record instead of being rebound.
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Slot::new(Pointer::new(source, kind));
                Ok(slot)
            }
            None => Err(PoolError::Exhausted {
                max: self.settings.max_pointers,
            }),
        }
    }

    fn allocate_id(&mut self) -> PointerId {
        loop {
            let candidate = PointerId(self.next_id);
            self.next_id = self.next_id.checked_add(1).unwrap_or(0);
            if !self.live.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    fn recycle(&mut self, id: PointerId, slot: usize) {
        self.live.remove(&id);
        self.reset_slot(slot);
        log::debug!("pointer {} recycled into slot {}", id, slot);
    }

    fn reset_slot(&mut self, slot: usize) {
        let entry = &mut self.slots[slot];
        entry.pending_recycle = false;
        entry.pointer.clear_press_data();
        entry.pointer.reset();
        self.free.push(slot);
    }
}

impl Default for PointerPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hit::{HitResult, LayerId};
    use crate::types::PointerButton;

    const TOUCH: InputSourceId = InputSourceId(1);
    const MOUSE: InputSourceId = InputSourceId(2);

    fn no_hit(_: &Pointer) -> HitResult {
        HitResult::none()
    }

    fn pool_of(max: usize) -> PointerPool {
        PointerPool::with_settings(PoolSettings::new().with_max_pointers(max))
    }

    #[test]
    fn activate_binds_fresh_ids() {
        let mut pool = PointerPool::new();
        let a = pool
            .activate(TOUCH, PointerKind::Touch, Point::new(1.0, 1.0), &no_hit)
            .unwrap();
        let b = pool
            .activate(TOUCH, PointerKind::Touch, Point::new(2.0, 2.0), &no_hit)
            .unwrap();

        assert_ne!(a, b);
        assert_eq!(pool.len(), 2);
        let pointer = pool.get(a).unwrap();
        assert_eq!(pointer.position(), Point::new(1.0, 1.0));
        assert_eq!(pointer.previous_position(), Point::new(1.0, 1.0));
    }

    #[test]
    fn activate_captures_press_data() {
        let mut pool = PointerPool::new();
        let resolver = |p: &Pointer| HitResult::single(LayerId(4), p.position());
        let id = pool
            .activate(TOUCH, PointerKind::Touch, Point::new(3.0, 4.0), &resolver)
            .unwrap();

        let pointer = pool.get(id).unwrap();
        assert_eq!(pointer.press_data().target(), Some(LayerId(4)));
        assert!(!pointer.is_over_data_dirty());
    }

    #[test]
    fn lift_without_holders_recycles_immediately() {
        let mut pool = PointerPool::new();
        let id = pool
            .activate(TOUCH, PointerKind::Touch, Point::ZERO, &no_hit)
            .unwrap();

        assert_eq!(pool.lift(id), Ok(Recycle::Now));
        assert!(!pool.contains(id));
        assert_eq!(pool.capacity(), 1);
    }

    #[test]
    fn retained_pointer_survives_lift_until_released() {
        let mut pool = PointerPool::new();
        let id = pool
            .activate(TOUCH, PointerKind::Touch, Point::ZERO, &no_hit)
            .unwrap();
        pool.retain(id).unwrap();
        pool.retain(id).unwrap();

        assert_eq!(pool.lift(id), Ok(Recycle::Deferred));
        assert!(pool.is_pending(id));

        assert_eq!(pool.release(id), Ok(1));
        assert!(pool.contains(id));

        assert_eq!(pool.release(id), Ok(0));
        assert!(!pool.contains(id));
        assert_eq!(pool.release(id), Err(PoolError::UnknownPointer(id)));
    }

    #[test]
    fn release_before_lift_does_not_recycle() {
        let mut pool = PointerPool::new();
        let id = pool
            .activate(TOUCH, PointerKind::Touch, Point::ZERO, &no_hit)
            .unwrap();
        pool.retain(id).unwrap();

        assert_eq!(pool.release(id), Ok(0));
        assert!(pool.contains(id));
        assert_eq!(pool.release(id), Ok(-1));
        assert!(pool.contains(id));
    }

    #[test]
    fn slots_are_reused_per_source() {
        let mut pool = PointerPool::new();
        let touch = pool
            .activate(TOUCH, PointerKind::Touch, Point::ZERO, &no_hit)
            .unwrap();
        pool.lift(touch).unwrap();

        let mouse = pool
            .activate(MOUSE, PointerKind::Mouse, Point::ZERO, &no_hit)
            .unwrap();
        assert_eq!(pool.capacity(), 2);
        assert_eq!(pool.get(mouse).unwrap().source(), MOUSE);

        let touch_again = pool
            .activate(TOUCH, PointerKind::Touch, Point::ZERO, &no_hit)
            .unwrap();
        assert_eq!(pool.capacity(), 2);
        assert_ne!(touch, touch_again);
        assert_eq!(pool.get(touch_again).unwrap().source(), TOUCH);
    }

    #[test]
    fn full_pool_replaces_foreign_free_record() {
        let mut pool = pool_of(1);
        let touch = pool
            .activate(TOUCH, PointerKind::Touch, Point::ZERO, &no_hit)
            .unwrap();
        pool.lift(touch).unwrap();

        let mouse = pool
            .activate(MOUSE, PointerKind::Mouse, Point::ZERO, &no_hit)
            .unwrap();
        assert_eq!(pool.capacity(), 1);
        assert_eq!(pool.get(mouse).unwrap().kind(), PointerKind::Mouse);
    }

    #[test]
    fn exhausted_when_every_slot_is_bound() {
        let mut pool = pool_of(2);
        for _ in 0..2 {
            pool.activate(TOUCH, PointerKind::Touch, Point::ZERO, &no_hit)
                .unwrap();
        }

        let err = pool
            .activate(TOUCH, PointerKind::Touch, Point::ZERO, &no_hit)
            .unwrap_err();
        assert_eq!(err, PoolError::Exhausted { max: 2 });
    }

    #[test]
    fn frame_phases_reach_every_bound_pointer() {
        let mut pool = PointerPool::new();
        let a = pool
            .activate(TOUCH, PointerKind::Touch, Point::ZERO, &no_hit)
            .unwrap();
        let b = pool
            .activate(TOUCH, PointerKind::Touch, Point::ZERO, &no_hit)
            .unwrap();
        pool.get_mut(a).unwrap().press_button(PointerButton::Primary);

        pool.begin_frame();
        pool.get_mut(b).unwrap().set_position(Point::new(4.0, 0.0));
        pool.commit_frame();

        assert!(!pool.get(a).unwrap().was_pressed(PointerButton::Primary));
        assert!(pool.get(a).unwrap().is_held(PointerButton::Primary));
        assert_eq!(pool.get(b).unwrap().delta(), Point::new(4.0, 0.0));
    }

    #[test]
    fn ids_stay_unique_across_reuse() {
        let mut pool = pool_of(3);
        let mut seen = Vec::new();
        for _ in 0..10 {
            let id = pool
                .activate(TOUCH, PointerKind::Touch, Point::ZERO, &no_hit)
                .unwrap();
            assert!(!seen.contains(&id));
            seen.push(id);
            pool.lift(id).unwrap();
        }
        assert_eq!(pool.capacity(), 1);
    }

    #[test]
    fn clear_frees_everything() {
        let mut pool = PointerPool::new();
        let id = pool
            .activate(TOUCH, PointerKind::Touch, Point::ZERO, &no_hit)
            .unwrap();
        pool.retain(id).unwrap();

        pool.clear();

        assert!(pool.is_empty());
        assert_eq!(pool.iter().count(), 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "re-initialised outside the pool")]
    fn rebinding_a_live_record_behind_the_pools_back_is_caught() {
        let mut pool = PointerPool::new();
        let id = pool
            .activate(TOUCH, PointerKind::Touch, Point::ZERO, &no_hit)
            .unwrap();
        pool.get_mut(id).unwrap().init(PointerId(500));

        pool.get(id);
    }
}
