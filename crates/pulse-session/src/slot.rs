//! Request slots with generation-counter cancellation.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Tracks one logical request slot (prescription, commit, or simulate).
///
/// Each dispatch takes a new generation from a monotonically increasing
/// counter. The generation is re-checked when the response arrives, not
/// only at dispatch, because network completion order is not guaranteed to
/// match issue order. A superseded response is dropped without ever
/// reaching the resolved or failed state.
///
/// Cancellation is advisory: it does not abort the underlying network call,
/// it only suppresses application of the stale result.
#[derive(Debug, Default)]
pub struct RequestSlot {
    generation: AtomicU64,
    pending: AtomicBool,
}

impl RequestSlot {
    /// Create an idle slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding any outstanding one. Returns the
    /// generation to present back to [`RequestSlot::finish`].
    pub fn begin(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.pending.store(true, Ordering::SeqCst);
        generation
    }

    /// True when `generation` is still the newest issue for this slot.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Resolve a request. Returns true when the result may be applied;
    /// false when the request was superseded or invalidated in flight.
    pub fn finish(&self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.pending.store(false, Ordering::SeqCst);
        true
    }

    /// Invalidate every outstanding request: Pending goes straight back to
    /// Idle without resolving.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.pending.store(false, Ordering::SeqCst);
    }

    /// True while a non-superseded request is outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }
}
