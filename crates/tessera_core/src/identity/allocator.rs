//! # Interval Identity Allocator
//!
//! Tracks the *free* identities of a fixed range as a sorted list of disjoint,
//! non-touching half-open intervals. Allocation takes from the front of the
//! first interval; freeing coalesces with neighbours so the list stays as
//! short as possible.
//!
//! ```text
//! range [0, 10), after alloc x4 and free(1):
//!
//!   allocated:  0 . 2 3 . . . . . .
//!   free list:  [1,2) [4,10)
//! ```
//!
//! ## Performance
//!
//! - `alloc`: O(1), plus an O(k) shift when the first interval empties
//! - `free`: O(log k) search, plus an O(k) shift on insert/merge
//!
//! where k is the number of free intervals, which stays small under ordinary
//! churn.

use std::ops::Range;

use crate::config::IdentityConfig;
use crate::error::{TesseraError, TesseraResult};

/// Half-open run `[start, end)` of free identities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    /// First free identity.
    pub start: u32,
    /// One past the last free identity.
    pub end: u32,
}

impl Interval {
    /// Creates an interval.
    #[inline]
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Number of identities covered.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns `true` if the interval covers nothing.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns `true` if `id` lies inside the interval.
    #[inline]
    #[must_use]
    pub const fn contains(&self, id: u32) -> bool {
        self.start <= id && id < self.end
    }
}

/// Allocator of identities within a fixed half-open range.
///
/// # Contract
///
/// - `alloc` must not be called when every identity is allocated
///   (use [`try_alloc`](Self::try_alloc) if that cannot be ruled out).
/// - `free` must only be given identities that are currently allocated.
///
/// Both are debug assertions; release builds do not check them.
///
/// # Thread Safety
///
/// Not thread-safe. Serialize access externally.
///
/// # Example
///
/// ```rust,ignore
/// let mut ids = IdentityAllocator::new(0, 1024)?;
/// let a = ids.alloc(); // 0
/// let b = ids.alloc(); // 1
/// ids.free(a)?;
/// assert_eq!(ids.alloc(), 0); // smallest free identity first
/// ```
#[derive(Clone, Debug)]
pub struct IdentityAllocator {
    start: u32,
    end: u32,
    /// Sorted by `start`; never overlapping, never touching.
    free: Vec<Interval>,
}

impl IdentityAllocator {
    /// Creates an allocator over `[start, end)` with every identity free.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidRange`] if `start >= end`.
    pub fn new(start: u32, end: u32) -> TesseraResult<Self> {
        if start >= end {
            return Err(TesseraError::InvalidRange { start, end });
        }
        tracing::debug!(start, end, "identity allocator created");
        Ok(Self {
            start,
            end,
            free: vec![Interval::new(start, end)],
        })
    }

    /// Creates an allocator from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidRange`] if the configured range is empty.
    pub fn from_config(config: &IdentityConfig) -> TesseraResult<Self> {
        Self::new(config.start, config.end)
    }

    /// The configured range.
    #[inline]
    #[must_use]
    pub const fn range(&self) -> Range<u32> {
        self.start..self.end
    }

    /// Allocates the smallest free identity.
    ///
    /// The allocator must not be exhausted.
    #[inline]
    pub fn alloc(&mut self) -> u32 {
        debug_assert!(!self.free.is_empty(), "identity allocator exhausted");
        let first = &mut self.free[0];
        let id = first.start;
        first.start += 1;
        if first.is_empty() {
            self.free.remove(0);
        }
        id
    }

    /// Allocates the smallest free identity, reporting exhaustion.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::IdentitiesExhausted`] if nothing is free.
    pub fn try_alloc(&mut self) -> TesseraResult<u32> {
        if self.free.is_empty() {
            return Err(TesseraError::IdentitiesExhausted {
                start: self.start,
                end: self.end,
            });
        }
        Ok(self.alloc())
    }

    /// Returns `id` to the free set, merging with adjacent free intervals.
    ///
    /// `id` must currently be allocated; freeing it twice is a contract
    /// violation caught only in debug builds.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::IdentityOutOfRange`] if `id` is outside the
    /// configured range.
    pub fn free(&mut self, id: u32) -> TesseraResult<()> {
        if id < self.start || id >= self.end {
            return Err(TesseraError::IdentityOutOfRange {
                id,
                start: self.start,
                end: self.end,
            });
        }
        debug_assert!(!self.is_free(id), "double free of identity {id}");

        // First interval starting after `id`. `id < end <= u32::MAX`, so
        // `id + 1` cannot overflow.
        let i = self.free.partition_point(|interval| interval.start <= id);
        let touches_left = i > 0 && self.free[i - 1].end == id;

        if i < self.free.len() && self.free[i].start == id + 1 {
            self.free[i].start = id;
            if touches_left {
                self.free[i - 1].end = self.free[i].end;
                self.free.remove(i);
            }
        } else if touches_left {
            self.free[i - 1].end = id + 1;
        } else {
            self.free.insert(i, Interval::new(id, id + 1));
        }
        Ok(())
    }

    /// Returns `true` if `id` is in range and not allocated.
    #[must_use]
    pub fn is_free(&self, id: u32) -> bool {
        let i = self.free.partition_point(|interval| interval.start <= id);
        i > 0 && self.free[i - 1].contains(id)
    }

    /// Returns `true` if every identity is allocated.
    #[inline]
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.free.is_empty()
    }

    /// The free intervals, ascending.
    #[inline]
    #[must_use]
    pub fn intervals(&self) -> &[Interval] {
        &self.free
    }

    /// Number of free identities.
    #[must_use]
    pub fn free_count(&self) -> u32 {
        self.free.iter().map(Interval::len).sum()
    }

    /// Number of allocated identities.
    #[must_use]
    pub fn allocated_count(&self) -> u32 {
        (self.end - self.start) - self.free_count()
    }

    /// Frees every identity at once.
    pub fn reset(&mut self) {
        self.free.clear();
        self.free.push(Interval::new(self.start, self.end));
    }
}
