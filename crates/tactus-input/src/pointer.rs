//! The pooled pointer record.
//!
//! A [`Pointer`] is created once per input source slot and then cycles
//! between two states:
//!
//! - **Unbound**: `id` is [`PointerId::INVALID`], press data is empty.
//! - **Active**: `id` is valid, press data was captured at activation.
//!
//! The pool owns the lifecycle calls ([`Pointer::init`], [`Pointer::reset`],
//! [`Pointer::frame_started`], [`Pointer::commit_position`]). Input sources
//! write the staged position, buttons and flags. Consumers read everything,
//! and reading over data may run the hit resolver when the cache is stale.
//!
//! ## Frame phases
//!
//! ```text
//! frame_started()  -> edges cleared, over data stale
//! set_position()   -> staged slot written (any number of times)
//! commit_position() -> previous <- current <- staged
//! over_data()      -> resolver runs at most once until the next dirtying event
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

use tactus_geometry::Point;

use crate::buttons::PointerButtons;
use crate::flags::PointerFlags;
use crate::hit::{HitResolver, HitResult};
use crate::types::{InputSourceId, PointerButton, PointerId, PointerKind};

/// A reusable record for one touch, mouse, pen or object contact.
///
/// Equality and hashing only look at [`Pointer::id`]. Two unbound records
/// are therefore equal; use [`Pointer::is_active`] to test for a live
/// contact.
#[derive(Debug)]
pub struct Pointer {
    id: PointerId,
    source: InputSourceId,
    kind: PointerKind,
    buttons: PointerButtons,
    flags: PointerFlags,
    position: Point,
    previous_position: Point,
    staged_position: Point,
    press_data: HitResult,
    over_data: HitResult,
    over_data_dirty: bool,
    ref_count: i32,
}

impl Pointer {
    /// Creates an unbound record owned by `source`.
    pub fn new(source: InputSourceId, kind: PointerKind) -> Self {
        Self {
            id: PointerId::INVALID,
            source,
            kind,
            buttons: PointerButtons::empty(),
            flags: PointerFlags::empty(),
            position: Point::ZERO,
            previous_position: Point::ZERO,
            staged_position: Point::ZERO,
            press_data: HitResult::default(),
            over_data: HitResult::default(),
            over_data_dirty: true,
            ref_count: 0,
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle (pool manager)
    // ------------------------------------------------------------------

    /// Returns the record to the unbound state.
    ///
    /// Clears the id, press and over data, every position slot, buttons and
    /// flags. The reference count goes back to zero along with the press
    /// data. Safe to call repeatedly.
    pub fn reset(&mut self) {
        if self.id.is_valid() {
            log::trace!("pointer {} reset", self.id);
        }
        self.id = PointerId::INVALID;
        self.clear_press_data();
        self.over_data = HitResult::default();
        self.over_data_dirty = true;
        self.position = Point::ZERO;
        self.previous_position = Point::ZERO;
        self.staged_position = Point::ZERO;
        self.buttons = PointerButtons::empty();
        self.flags = PointerFlags::empty();
    }

    /// Binds the record to a fresh contact.
    ///
    /// The staged position becomes both the current and the previous
    /// position so the first frame reports no movement. The caller must
    /// supply an id no other live record uses.
    pub fn init(&mut self, id: PointerId) {
        if self.id.is_valid() {
            log::warn!(
                "pointer {} re-initialised as {} without a reset",
                self.id,
                id
            );
        }
        self.id = id;
        self.position = self.staged_position;
        self.previous_position = self.staged_position;
        self.over_data_dirty = true;
        log::trace!("pointer {} bound at {}", id, self.position);
    }

    /// Per-frame bookkeeping, run before any input is written.
    ///
    /// Drops the pressed/released edges (held state stays) and marks the
    /// over data stale.
    pub fn frame_started(&mut self) {
        self.buttons.clear_edges();
        self.over_data_dirty = true;
    }

    /// Rotates the position buffers: previous <- current <- staged.
    ///
    /// Run once per frame after every write for that frame. A moved pointer
    /// has its over data marked stale.
    pub fn commit_position(&mut self) {
        self.previous_position = self.position;
        self.position = self.staged_position;
        if self.position != self.previous_position {
            self.over_data_dirty = true;
        }
    }

    /// Records what was under the pointer when the contact began.
    ///
    /// The same value seeds the over data cache, so no hit test runs until
    /// the next dirtying event.
    pub fn set_press_data(&mut self, hit: HitResult) {
        self.over_data = hit.clone();
        self.press_data = hit;
        self.over_data_dirty = false;
    }

    /// Empties the press data and zeroes the reference count.
    pub fn clear_press_data(&mut self) {
        self.press_data = HitResult::default();
        self.ref_count = 0;
    }

    /// Registers one more holder that wants to delay reuse of this record.
    pub fn retain(&mut self) -> i32 {
        self.ref_count += 1;
        self.ref_count
    }

    /// Drops one holder and returns the remaining count.
    ///
    /// Zero means nothing holds the record any more. A negative result
    /// means retain and release calls are mismatched upstream; it is logged
    /// and passed through unchanged.
    pub fn release(&mut self) -> i32 {
        self.ref_count -= 1;
        if self.ref_count < 0 {
            log::warn!(
                "pointer {} released more often than retained (ref count {})",
                self.id,
                self.ref_count
            );
        }
        self.ref_count
    }

    // ------------------------------------------------------------------
    // Identity and classification
    // ------------------------------------------------------------------

    pub fn id(&self) -> PointerId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.id.is_valid()
    }

    pub fn source(&self) -> InputSourceId {
        self.source
    }

    pub fn kind(&self) -> PointerKind {
        self.kind
    }

    pub fn ref_count(&self) -> i32 {
        self.ref_count
    }

    // ------------------------------------------------------------------
    // Buttons and flags (input source writes, anyone reads)
    // ------------------------------------------------------------------

    pub fn buttons(&self) -> PointerButtons {
        self.buttons
    }

    pub fn buttons_mut(&mut self) -> &mut PointerButtons {
        &mut self.buttons
    }

    pub fn set_buttons(&mut self, buttons: PointerButtons) {
        self.buttons = buttons;
    }

    pub fn press_button(&mut self, button: PointerButton) {
        self.buttons.press(button);
    }

    pub fn release_button(&mut self, button: PointerButton) {
        self.buttons.release(button);
    }

    pub fn is_held(&self, button: PointerButton) -> bool {
        self.buttons.is_held(button)
    }

    pub fn was_pressed(&self, button: PointerButton) -> bool {
        self.buttons.was_pressed(button)
    }

    pub fn was_released(&self, button: PointerButton) -> bool {
        self.buttons.was_released(button)
    }

    pub fn flags(&self) -> PointerFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: PointerFlags) {
        self.flags = flags;
    }

    pub fn insert_flags(&mut self, flags: PointerFlags) {
        self.flags.insert(flags);
    }

    pub fn remove_flags(&mut self, flags: PointerFlags) {
        self.flags.remove(flags);
    }

    // ------------------------------------------------------------------
    // Position
    // ------------------------------------------------------------------

    /// Position committed for the current frame.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Position committed for the previous frame.
    pub fn previous_position(&self) -> Point {
        self.previous_position
    }

    /// Latest written position, not yet visible through [`Pointer::position`].
    pub fn staged_position(&self) -> Point {
        self.staged_position
    }

    /// Stages a new position. It becomes visible at the next commit.
    pub fn set_position(&mut self, position: Point) {
        self.staged_position = position;
    }

    /// Movement between the previous and the current frame.
    pub fn delta(&self) -> Point {
        self.position - self.previous_position
    }

    // ------------------------------------------------------------------
    // Hit data
    // ------------------------------------------------------------------

    pub fn press_data(&self) -> &HitResult {
        &self.press_data
    }

    /// Returns what is under the pointer right now.
    ///
    /// The resolver only runs when the cache is stale or
    /// `force_recalculate` is set. Between two dirtying events repeated
    /// unforced calls return the same value without touching the resolver.
    pub fn over_data<R>(&mut self, resolver: &R, force_recalculate: bool) -> &HitResult
    where
        R: HitResolver + ?Sized,
    {
        if self.over_data_dirty || force_recalculate {
            let hit = resolver.resolve(self);
            self.over_data = hit;
            self.over_data_dirty = false;
        }
        &self.over_data
    }

    /// Cached over data without resolving. May be stale.
    pub fn cached_over_data(&self) -> &HitResult {
        &self.over_data
    }

    pub fn is_over_data_dirty(&self) -> bool {
        self.over_data_dirty
    }

    /// Forces the next [`Pointer::over_data`] call to resolve again.
    pub fn invalidate_over_data(&mut self) {
        self.over_data_dirty = true;
    }

    // ------------------------------------------------------------------
    // Copying
    // ------------------------------------------------------------------

    /// Mirrors the transient state of `other`.
    ///
    /// Copies kind, flags, buttons and all three position slots. The id,
    /// owning source, press data, over data cache and reference count stay
    /// tied to this record; the cache is marked stale if the copy moved it.
    pub fn copy_from(&mut self, other: &Pointer) {
        let moved = self.position != other.position;
        self.kind = other.kind;
        self.flags = other.flags;
        self.buttons = other.buttons;
        self.position = other.position;
        self.staged_position = other.staged_position;
        self.previous_position = other.previous_position;
        if moved {
            self.over_data_dirty = true;
        }
    }
}

impl PartialEq for Pointer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Pointer {}

impl Hash for Pointer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} #{} buttons={} flags={} pos={}",
            self.kind, self.id, self.buttons, self.flags, self.position
        )
    }
}
