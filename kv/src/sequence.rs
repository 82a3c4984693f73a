//! Allocation of synthetic scan index values.
//!
//! The backend has no ordered key iteration, so every insert made with scan
//! support enabled is tagged with a value from a [`ScanSequence`]. Values are
//! strictly increasing in allocation order but not contiguous in storage: an
//! insert that fails after allocating leaves its value unused.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter shared by every client that must agree on scan order.
///
/// Allocation is a single atomic fetch-and-increment, so concurrent callers
/// never observe the same value.
#[derive(Debug, Default)]
pub struct ScanSequence {
    next: AtomicU64,
}

impl ScanSequence {
    /// Creates a sequence whose first allocation returns 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sequence whose first allocation returns `first`.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Allocates the next index value.
    pub fn allocate(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the value the next allocation will return.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}
