//! # Growable Arrays
//!
//! Resizable, randomly addressable sequences with swap-to-end removal.
//!
//! ## Design Philosophy
//!
//! - Removal overwrites the removed slot with the last element: O(1), order is
//!   never preserved
//! - Every operation has a checked entry point (returns a sentinel on a bad
//!   index) and a trusted one (skips the check, debug-asserted)
//! - Growth doubles while small, then switches permanently to 1.5x
//! - Capacity only decreases on an explicit `shrink_to_fit`

mod bag;
mod int_bag;
mod offset_bag;

pub use bag::Bag;
pub use int_bag::{IntBag, IntStack};
pub use offset_bag::OffsetBag;

/// Smallest buffer any array in this module will allocate.
pub const MIN_CAPACITY: usize = 4;

/// Initial capacity used by `new()` constructors.
pub const DEFAULT_CAPACITY: usize = 64;

/// Default size at which growth switches from doubling to 1.5x.
pub const DEFAULT_GROWTH_THRESHOLD: usize = 4096;

/// Which growth rule a [`GrowthPolicy`] is applying.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrowthPhase {
    /// Capacity doubles on each growth.
    Doubling,
    /// Capacity grows by half of itself on each growth.
    Geometric,
}

/// Two-phase capacity growth.
///
/// Doubling bounds the number of reallocations for small collections; once the
/// array has reached `threshold` elements the policy moves to 1.5x growth to
/// bound wasted memory. The transition happens once and never reverts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowthPolicy {
    threshold: usize,
    phase: GrowthPhase,
}

impl GrowthPolicy {
    /// Creates a policy that doubles until `threshold` elements.
    #[inline]
    #[must_use]
    pub const fn new(threshold: usize) -> Self {
        Self {
            threshold,
            phase: GrowthPhase::Doubling,
        }
    }

    /// Returns the current phase.
    #[inline]
    #[must_use]
    pub const fn phase(&self) -> GrowthPhase {
        self.phase
    }

    /// Returns the switch-over size.
    #[inline]
    #[must_use]
    pub const fn threshold(&self) -> usize {
        self.threshold
    }

    /// Computes the next capacity for a buffer of `current` slots holding
    /// `size` elements. Strictly greater than `current` unless `current`
    /// is already `usize::MAX`.
    pub fn next_capacity(&mut self, current: usize, size: usize) -> usize {
        if self.phase == GrowthPhase::Doubling && size >= self.threshold {
            tracing::trace!(size, threshold = self.threshold, "array growth switching to 1.5x");
            self.phase = GrowthPhase::Geometric;
        }

        let next = match self.phase {
            GrowthPhase::Doubling => current.saturating_mul(2),
            GrowthPhase::Geometric => current.saturating_add(current / 2),
        };
        next.max(current.saturating_add(1)).max(MIN_CAPACITY)
    }

    /// Computes the smallest capacity reachable by repeated growth that can
    /// address `index`. Saturates at `usize::MAX`.
    pub fn capacity_for_index(&mut self, current: usize, size: usize, index: usize) -> usize {
        let mut capacity = current;
        while capacity <= index {
            let next = self.next_capacity(capacity, size);
            if next == capacity {
                break;
            }
            capacity = next;
        }
        capacity
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_GROWTH_THRESHOLD)
    }
}

/// Fills `slice` with `value` by repeatedly copying the already-filled prefix
/// onto the rest, doubling the filled region each pass.
///
/// O(log n) bulk copies instead of n single writes.
pub(crate) fn fan_out_fill<T: Copy>(slice: &mut [T], value: T) {
    let len = slice.len();
    if len == 0 {
        return;
    }
    slice[0] = value;

    let mut filled = 1;
    while filled < len {
        let chunk = filled.min(len - filled);
        slice.copy_within(0..chunk, filled);
        filled += chunk;
    }
}
