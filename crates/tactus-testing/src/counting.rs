use std::cell::Cell;

use tactus_input::{HitResolver, HitResult, Pointer};

/// Wraps a resolver and counts how often pointers asked it for a hit.
pub struct CountingResolver<R> {
    inner: R,
    calls: Cell<usize>,
}

impl<R: HitResolver> CountingResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn reset_calls(&self) {
        self.calls.set(0);
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut R {
        &mut self.inner
    }
}

impl<R: HitResolver> HitResolver for CountingResolver<R> {
    fn resolve(&self, pointer: &Pointer) -> HitResult {
        self.calls.set(self.calls.get() + 1);
        self.inner.resolve(pointer)
    }
}
