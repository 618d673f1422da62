//! # Integer Arrays
//!
//! `u32` specializations of the growable array: no per-slot `Option`, a
//! reserved sentinel instead, and bulk zeroing on clear.

use super::{fan_out_fill, GrowthPhase, GrowthPolicy, DEFAULT_CAPACITY, MIN_CAPACITY};
use crate::config::ArrayConfig;

/// Growable `u32` array with swap-with-last removal.
///
/// Failed safe accessors return [`IntBag::ABSENT`]. Slots `[len, capacity)`
/// are zero.
///
/// `u32::MAX` is reserved as the sentinel: storing it is not prevented, but a
/// `get` returning it cannot be told apart from a miss. Identities never reach
/// it, since allocator ranges are half-open below `u32::MAX`.
#[derive(Clone, Debug)]
pub struct IntBag {
    data: Box<[u32]>,
    size: usize,
    growth: GrowthPolicy,
}

impl IntBag {
    /// Sentinel returned by checked accessors on a bad index. Reserved; do not
    /// store it as a value.
    pub const ABSENT: u32 = u32::MAX;

    /// Creates an empty bag with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty bag. `capacity` is clamped to [`MIN_CAPACITY`].
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_config(&ArrayConfig::with_capacity(capacity))
    }

    /// Creates an empty bag from configuration.
    #[must_use]
    pub fn from_config(config: &ArrayConfig) -> Self {
        Self {
            data: vec![0; config.clamped_capacity()].into_boxed_slice(),
            size: 0,
            growth: GrowthPolicy::new(config.growth_threshold),
        }
    }

    /// Returns the logical size.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the logical size is zero.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots in the backing buffer.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns which growth rule the next reallocation will use.
    #[inline]
    #[must_use]
    pub const fn growth_phase(&self) -> GrowthPhase {
        self.growth.phase()
    }

    /// Appends a value, growing first if full. Returns its slot index.
    #[inline]
    pub fn add(&mut self, value: u32) -> usize {
        if self.size == self.data.len() {
            let capacity = self.growth.next_capacity(self.data.len(), self.size);
            self.reallocate(capacity);
        }
        let index = self.size;
        self.data[index] = value;
        self.size += 1;
        index
    }

    /// Writes `value` at `index`, growing if needed and raising the logical
    /// size to at least `index + 1`. Returns the previous value.
    pub fn set(&mut self, index: usize, value: u32) -> u32 {
        if index >= self.data.len() {
            let capacity = self
                .growth
                .capacity_for_index(self.data.len(), self.size, index);
            self.reallocate(capacity);
        }
        self.set_trusted(index, value)
    }

    /// Writes without growing; beyond the logical size this raises it to
    /// `index + 1`. `index` must be below capacity.
    #[inline]
    pub fn set_trusted(&mut self, index: usize, value: u32) -> u32 {
        debug_assert!(index < self.data.len(), "set_trusted beyond capacity");
        let previous = std::mem::replace(&mut self.data[index], value);
        if index >= self.size {
            self.size = index + 1;
        }
        previous
    }

    /// Returns the value at `index`, or [`ABSENT`](Self::ABSENT).
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> u32 {
        if index < self.size {
            self.data[index]
        } else {
            Self::ABSENT
        }
    }

    /// Returns the value at `index` without checking the logical size.
    #[inline]
    #[must_use]
    pub fn get_trusted(&self, index: usize) -> u32 {
        debug_assert!(index < self.size, "get_trusted beyond logical size");
        self.data[index]
    }

    /// Swap-removes the value at `index`, or returns [`ABSENT`](Self::ABSENT).
    #[inline]
    pub fn remove(&mut self, index: usize) -> u32 {
        if index < self.size {
            self.remove_trusted(index)
        } else {
            Self::ABSENT
        }
    }

    /// Swap-remove without the bounds check. `index` must be below `len()`.
    #[inline]
    pub fn remove_trusted(&mut self, index: usize) -> u32 {
        debug_assert!(index < self.size, "remove_trusted beyond logical size");
        let last = self.size - 1;
        let removed = self.data[index];
        self.data[index] = self.data[last];
        self.data[last] = 0;
        self.size = last;
        removed
    }

    /// Removes and returns the last value, or [`ABSENT`](Self::ABSENT).
    #[inline]
    pub fn remove_last(&mut self) -> u32 {
        if self.size == 0 {
            return Self::ABSENT;
        }
        self.size -= 1;
        std::mem::take(&mut self.data[self.size])
    }

    /// Swap-removes the first occurrence of `value`. Returns `true` if found.
    pub fn remove_value(&mut self, value: u32) -> bool {
        match self.index_of(value) {
            Some(index) => {
                self.remove_trusted(index);
                true
            }
            None => false,
        }
    }

    /// Position of the first live occurrence of `value`.
    #[must_use]
    pub fn index_of(&self, value: u32) -> Option<usize> {
        self.as_slice().iter().position(|&v| v == value)
    }

    /// Returns `true` if any live slot holds `value`.
    #[must_use]
    pub fn contains_value(&self, value: u32) -> bool {
        self.index_of(value).is_some()
    }

    /// Zeroes the live slice using doubling bulk copies. Capacity is unchanged.
    pub fn clear(&mut self) {
        fan_out_fill(&mut self.data[..self.size], 0);
        self.size = 0;
    }

    /// Grows the buffer so at least `capacity` slots exist.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        if capacity > self.data.len() {
            let target = self
                .growth
                .capacity_for_index(self.data.len(), self.size, capacity - 1);
            self.reallocate(target);
        }
    }

    /// Trims the buffer to the logical size, never below [`MIN_CAPACITY`].
    pub fn shrink_to_fit(&mut self) {
        let target = self.size.max(MIN_CAPACITY);
        if target < self.data.len() {
            self.reallocate(target);
        }
    }

    /// The live values.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.data[..self.size]
    }

    /// The live values as raw bytes, for handing across a type-erased boundary.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_slice())
    }

    fn reallocate(&mut self, capacity: usize) {
        tracing::trace!(
            from = self.data.len(),
            to = capacity,
            size = self.size,
            "int bag reallocating"
        );
        let mut data = std::mem::take(&mut self.data).into_vec();
        data.resize(capacity, 0);
        self.data = data.into_boxed_slice();
    }
}

impl Default for IntBag {
    fn default() -> Self {
        Self::new()
    }
}

/// LIFO stack of `u32` built on [`IntBag`].
#[derive(Clone, Debug, Default)]
pub struct IntStack {
    items: IntBag,
}

impl IntStack {
    /// Creates an empty stack with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty stack with room for `capacity` values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: IntBag::with_capacity(capacity),
        }
    }

    /// Pushes a value.
    #[inline]
    pub fn push(&mut self, value: u32) {
        self.items.add(value);
    }

    /// Pops the most recently pushed value.
    #[inline]
    pub fn pop(&mut self) -> Option<u32> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items.remove_last())
        }
    }

    /// The most recently pushed value.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<u32> {
        self.items.as_slice().last().copied()
    }

    /// Number of values on the stack.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the stack holds no values.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drops every value.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
