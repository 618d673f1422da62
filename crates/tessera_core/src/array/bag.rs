//! # Dense Generic Array
//!
//! Component data addressed by identity, with O(1) swap-remove.

use super::{GrowthPhase, GrowthPolicy, DEFAULT_CAPACITY, MIN_CAPACITY};
use crate::config::ArrayConfig;

/// Growable array of optional slots with swap-with-last removal.
///
/// Slots `[len, capacity)` are always empty. Slots below `len` may also be
/// empty when `set` was used to write past the end.
///
/// # Thread Safety
///
/// Not thread-safe. One writer at a time; serialize access externally.
///
/// # Example
///
/// ```rust,ignore
/// let mut bag: Bag<Position> = Bag::with_capacity(8);
/// let slot = bag.add(Position::new(1.0, 2.0, 3.0));
/// bag.set(40, Position::new(0.0, 0.0, 0.0)); // grows, len becomes 41
/// bag.remove(slot); // slot now holds what was at index 40
/// ```
pub struct Bag<T> {
    /// Backing buffer. Replaced wholesale on growth.
    data: Box<[Option<T>]>,
    /// Logical size.
    size: usize,
    growth: GrowthPolicy,
}

impl<T> Bag<T> {
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
        let capacity = config.clamped_capacity();
        Self {
            data: empty_slots(capacity),
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

    /// Appends an item, growing first if full.
    ///
    /// # Returns
    ///
    /// The slot index the item was written to.
    #[inline]
    pub fn add(&mut self, item: T) -> usize {
        if self.size == self.data.len() {
            let capacity = self.growth.next_capacity(self.data.len(), self.size);
            self.reallocate(capacity);
        }
        let index = self.size;
        self.data[index] = Some(item);
        self.size += 1;
        index
    }

    /// Writes `item` at `index`, growing to accommodate it and raising the
    /// logical size to at least `index + 1`.
    ///
    /// # Returns
    ///
    /// The previous occupant of the slot.
    pub fn set(&mut self, index: usize, item: T) -> Option<T> {
        if index >= self.data.len() {
            let capacity = self
                .growth
                .capacity_for_index(self.data.len(), self.size, index);
            self.reallocate(capacity);
        }
        self.set_trusted(index, item)
    }

    /// Writes `item` at `index` without growing.
    ///
    /// Writing beyond the logical size silently raises it to `index + 1`.
    /// `index` must be below [`capacity`](Self::capacity).
    #[inline]
    pub fn set_trusted(&mut self, index: usize, item: T) -> Option<T> {
        debug_assert!(index < self.data.len(), "set_trusted beyond capacity");
        let previous = self.data[index].replace(item);
        if index >= self.size {
            self.size = index + 1;
        }
        previous
    }

    /// Returns the item at `index`, or `None` if out of bounds or empty.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.size {
            self.data[index].as_ref()
        } else {
            None
        }
    }

    /// Returns the item at `index` mutably, or `None` if out of bounds or empty.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.size {
            self.data[index].as_mut()
        } else {
            None
        }
    }

    /// Returns the item at `index` without checking it against the logical size.
    ///
    /// Callers must only pass indices they know are live.
    #[inline]
    #[must_use]
    pub fn get_trusted(&self, index: usize) -> Option<&T> {
        debug_assert!(index < self.size, "get_trusted beyond logical size");
        self.data[index].as_ref()
    }

    /// Returns `true` if slot `index` is live and occupied.
    #[inline]
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Removes the item at `index`, moving the last element into its slot.
    ///
    /// Returns `None` if `index` is out of bounds. An empty slot inside the
    /// live range (left by writing past the end with `set`) is still
    /// swap-removed and shrinks `len()` by one, but also returns `None`;
    /// compare `len()` before and after to tell the two apart.
    #[inline]
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index < self.size {
            self.remove_trusted(index)
        } else {
            None
        }
    }

    /// Swap-remove without the bounds check. `index` must be below `len()`.
    #[inline]
    pub fn remove_trusted(&mut self, index: usize) -> Option<T> {
        debug_assert!(index < self.size, "remove_trusted beyond logical size");
        let last = self.size - 1;
        let removed = self.data[index].take();
        if index != last {
            self.data[index] = self.data[last].take();
        }
        self.size = last;
        removed
    }

    /// Removes and returns the last element.
    #[inline]
    pub fn remove_last(&mut self) -> Option<T> {
        if self.size == 0 {
            return None;
        }
        self.size -= 1;
        self.data[self.size].take()
    }

    /// Empties the live slice. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.data[..self.size].fill_with(|| None);
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

    /// Trims the buffer down to the logical size (never below
    /// [`MIN_CAPACITY`]). The only operation that reduces capacity.
    pub fn shrink_to_fit(&mut self) {
        let target = self.size.max(MIN_CAPACITY);
        if target < self.data.len() {
            self.reallocate(target);
        }
    }

    /// Iterates over occupied live slots with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.data[..self.size]
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|item| (index, item)))
    }

    /// Iterates mutably over occupied live slots with their indices.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.data[..self.size]
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_mut().map(|item| (index, item)))
    }

    fn reallocate(&mut self, capacity: usize) {
        tracing::trace!(
            from = self.data.len(),
            to = capacity,
            size = self.size,
            phase = ?self.growth.phase(),
            "bag reallocating"
        );
        let mut data = std::mem::take(&mut self.data).into_vec();
        data.truncate(capacity);
        data.resize_with(capacity, || None);
        self.data = data.into_boxed_slice();
    }
}

impl<T: PartialEq> Bag<T> {
    /// Returns `true` if any live slot holds `item`.
    #[must_use]
    pub fn contains_value(&self, item: &T) -> bool {
        self.iter().any(|(_, candidate)| candidate == item)
    }

    /// Swap-removes the first live slot holding `item`.
    ///
    /// # Returns
    ///
    /// `true` if an item was removed.
    pub fn remove_value(&mut self, item: &T) -> bool {
        let found = self.iter().find(|(_, candidate)| *candidate == item).map(|(i, _)| i);
        match found {
            Some(index) => {
                self.remove_trusted(index);
                true
            }
            None => false,
        }
    }
}

impl<T> Default for Bag<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Bag<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.data[..self.size]).finish()
    }
}

fn empty_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    let mut data = Vec::with_capacity(capacity);
    data.resize_with(capacity, || None);
    data.into_boxed_slice()
}
