//! # Offset Array
//!
//! Storage for index spaces that are clustered but not zero-based, such as a
//! secondary index keyed by externally assigned identities.
//!
//! Logical index `i` lives in buffer slot `i - offset`. Inserting below the
//! current offset shifts the buffer right (O(len)); lookups stay O(1).
//! Suited to write-rarely, read-often index spaces.

use super::{GrowthPolicy, DEFAULT_CAPACITY};
use crate::config::ArrayConfig;

/// Growable array addressed by logical index relative to a moving offset.
///
/// The first and last buffer slots of the live span are always occupied.
pub struct OffsetBag<T> {
    data: Box<[Option<T>]>,
    /// Logical index stored in slot 0.
    offset: usize,
    /// Span from the first to the last occupied slot.
    size: usize,
    /// Occupied slots within the span.
    count: usize,
    growth: GrowthPolicy,
}

impl<T> OffsetBag<T> {
    /// Creates an empty array with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty array. `capacity` is clamped to the minimum.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_config(&ArrayConfig::with_capacity(capacity))
    }

    /// Creates an empty array from configuration.
    #[must_use]
    pub fn from_config(config: &ArrayConfig) -> Self {
        let capacity = config.clamped_capacity();
        let mut data = Vec::with_capacity(capacity);
        data.resize_with(capacity, || None);
        Self {
            data: data.into_boxed_slice(),
            offset: 0,
            size: 0,
            count: 0,
            growth: GrowthPolicy::new(config.growth_threshold),
        }
    }

    /// Logical index held by the first buffer slot.
    ///
    /// Meaningless while the array is empty: the next `add` adopts a new one.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Span of the live region, first to last occupied index inclusive.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Number of occupied slots.
    #[inline]
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Returns `true` if nothing is stored.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of slots in the backing buffer.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Lowest occupied logical index.
    #[inline]
    #[must_use]
    pub const fn first_index(&self) -> Option<usize> {
        if self.count == 0 {
            None
        } else {
            Some(self.offset)
        }
    }

    /// Highest occupied logical index.
    #[inline]
    #[must_use]
    pub const fn last_index(&self) -> Option<usize> {
        if self.count == 0 {
            None
        } else {
            Some(self.offset + self.size - 1)
        }
    }

    /// Stores `item` at logical `index`.
    ///
    /// - Empty array: `index` becomes the offset.
    /// - `index` below the offset: the buffer shifts right and the offset
    ///   moves down to `index`.
    /// - Otherwise the item is written in place, growing if needed.
    ///
    /// # Returns
    ///
    /// The previous occupant of `index`.
    pub fn add(&mut self, index: usize, item: T) -> Option<T> {
        if self.count == 0 {
            self.offset = index;
            self.data[0] = Some(item);
            self.size = 1;
            self.count = 1;
            return None;
        }

        if index < self.offset {
            let delta = self.offset - index;
            let needed = self.size + delta;
            self.reserve_slot(needed - 1);
            // Slots [size, needed) are empty, so rotating moves them to the front.
            self.data[..needed].rotate_right(delta);
            tracing::trace!(from = self.offset, to = index, shifted = self.size, "offset bag re-based down");
            self.offset = index;
            self.size = needed;
            self.data[0] = Some(item);
            self.count += 1;
            return None;
        }

        let slot = index - self.offset;
        self.reserve_slot(slot);
        let previous = self.data[slot].replace(item);
        if previous.is_none() {
            self.count += 1;
        }
        if slot >= self.size {
            self.size = slot + 1;
        }
        previous
    }

    /// Stores `item` at a logical index at or above the offset whose slot
    /// already exists in the buffer. Never grows, never shifts.
    ///
    /// The array must not be empty and `index - offset` must be below
    /// [`capacity`](Self::capacity). Writing past the live span raises it to
    /// cover `index`.
    #[inline]
    pub fn add_trusted(&mut self, index: usize, item: T) -> Option<T> {
        debug_assert!(self.count > 0, "add_trusted on empty offset bag");
        debug_assert!(
            index >= self.offset && index - self.offset < self.data.len(),
            "add_trusted outside buffer"
        );
        let slot = index - self.offset;
        let previous = self.data[slot].replace(item);
        if previous.is_none() {
            self.count += 1;
        }
        if slot >= self.size {
            self.size = slot + 1;
        }
        previous
    }

    /// Returns the item at logical `index`, or `None`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        let slot = self.slot_of(index)?;
        self.data[slot].as_ref()
    }

    /// Returns the item at logical `index` mutably, or `None`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let slot = self.slot_of(index)?;
        self.data[slot].as_mut()
    }

    /// Returns the item at a logical index known to be inside the live span.
    #[inline]
    #[must_use]
    pub fn get_trusted(&self, index: usize) -> Option<&T> {
        debug_assert!(self.slot_of(index).is_some(), "get_trusted outside live span");
        self.data[index - self.offset].as_ref()
    }

    /// Returns `true` if logical `index` holds an item.
    #[inline]
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Removes the item at logical `index`.
    ///
    /// Removing the first occupied index re-bases the offset onto the next
    /// occupied one; removing the last occupied index shrinks the span back to
    /// the previous occupied one.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let slot = self.slot_of(index)?;
        self.remove_slot(slot)
    }

    /// Removes the item at a logical index known to be inside the live span,
    /// skipping the span check. Re-basing works as in [`remove`](Self::remove).
    #[inline]
    pub fn remove_trusted(&mut self, index: usize) -> Option<T> {
        debug_assert!(self.slot_of(index).is_some(), "remove_trusted outside live span");
        self.remove_slot(index - self.offset)
    }

    fn remove_slot(&mut self, slot: usize) -> Option<T> {
        let removed = self.data[slot].take()?;
        self.count -= 1;

        if self.count == 0 {
            self.size = 0;
            return Some(removed);
        }

        if slot == 0 {
            let next = self.data[1..self.size]
                .iter()
                .position(Option::is_some)
                .map_or(1, |p| p + 1);
            self.data[..self.size].rotate_left(next);
            tracing::trace!(from = self.offset, to = self.offset + next, "offset bag re-based up");
            self.offset += next;
            self.size -= next;
        } else if slot == self.size - 1 {
            self.size = self.data[..slot]
                .iter()
                .rposition(Option::is_some)
                .map_or(0, |p| p + 1);
        }

        Some(removed)
    }

    /// Drops every item. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.data[..self.size].fill_with(|| None);
        self.size = 0;
        self.count = 0;
    }

    /// Iterates over occupied slots as `(logical index, item)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        let offset = self.offset;
        self.data[..self.size]
            .iter()
            .enumerate()
            .filter_map(move |(slot, item)| item.as_ref().map(|item| (slot + offset, item)))
    }

    #[inline]
    fn slot_of(&self, index: usize) -> Option<usize> {
        let slot = index.checked_sub(self.offset)?;
        (slot < self.size).then_some(slot)
    }

    fn reserve_slot(&mut self, slot: usize) {
        if slot < self.data.len() {
            return;
        }
        let capacity = self
            .growth
            .capacity_for_index(self.data.len(), self.size, slot);
        tracing::trace!(from = self.data.len(), to = capacity, "offset bag reallocating");
        let mut data = std::mem::take(&mut self.data).into_vec();
        data.resize_with(capacity, || None);
        self.data = data.into_boxed_slice();
    }
}

impl<T> Default for OffsetBag<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_add_adopts_offset() {
        let mut bag: OffsetBag<&str> = OffsetBag::with_capacity(4);
        assert_eq!(bag.add(1000, "a"), None);
        assert_eq!(bag.offset(), 1000);
        assert_eq!(bag.len(), 1);
        assert_eq!(bag.capacity(), 4);
        assert_eq!(bag.get(1000), Some(&"a"));
        assert_eq!(bag.get(999), None);
        assert_eq!(bag.get(0), None);
    }

    #[test]
    fn test_add_above_offset_grows() {
        let mut bag: OffsetBag<u32> = OffsetBag::with_capacity(4);
        bag.add(100, 1);
        bag.add(110, 2);
        assert_eq!(bag.offset(), 100);
        assert_eq!(bag.len(), 11);
        assert_eq!(bag.count(), 2);
        assert_eq!(bag.capacity(), 16);
        assert_eq!(bag.get(110), Some(&2));
        assert_eq!(bag.get(105), None);
    }

    #[test]
    fn test_add_below_offset_shifts() {
        let mut bag: OffsetBag<u32> = OffsetBag::with_capacity(8);
        bag.add(50, 1);
        bag.add(52, 2);
        bag.add(47, 3);
        assert_eq!(bag.offset(), 47);
        assert_eq!(bag.len(), 6);
        assert_eq!(bag.get(47), Some(&3));
        assert_eq!(bag.get(50), Some(&1));
        assert_eq!(bag.get(52), Some(&2));
        assert_eq!(bag.get(48), None);
    }

    #[test]
    fn test_add_below_offset_beyond_capacity() {
        let mut bag: OffsetBag<u32> = OffsetBag::with_capacity(4);
        bag.add(20, 1);
        bag.add(22, 2);
        bag.add(10, 3);
        assert_eq!(bag.offset(), 10);
        assert_eq!(bag.len(), 13);
        assert!(bag.capacity() >= 13);
        let items: Vec<_> = bag.iter().collect();
        assert_eq!(items, vec![(10, &3), (20, &1), (22, &2)]);
    }

    #[test]
    fn test_replace_existing() {
        let mut bag: OffsetBag<u32> = OffsetBag::with_capacity(4);
        bag.add(5, 1);
        assert_eq!(bag.add(5, 2), Some(1));
        assert_eq!(bag.count(), 1);
    }

    #[test]
    fn test_remove_first_rebases() {
        let mut bag: OffsetBag<u32> = OffsetBag::with_capacity(8);
        bag.add(10, 1);
        bag.add(13, 2);
        bag.add(14, 3);
        assert_eq!(bag.remove(10), Some(1));
        assert_eq!(bag.offset(), 13);
        assert_eq!(bag.len(), 2);
        assert_eq!(bag.get(13), Some(&2));
        assert_eq!(bag.get(14), Some(&3));
    }

    #[test]
    fn test_remove_last_shrinks_span() {
        let mut bag: OffsetBag<u32> = OffsetBag::with_capacity(8);
        bag.add(10, 1);
        bag.add(11, 2);
        bag.add(15, 3);
        assert_eq!(bag.remove(15), Some(3));
        assert_eq!(bag.len(), 2);
        assert_eq!(bag.last_index(), Some(11));
        assert_eq!(bag.get(15), None);
    }

    #[test]
    fn test_remove_middle_leaves_span() {
        let mut bag: OffsetBag<u32> = OffsetBag::with_capacity(8);
        bag.add(10, 1);
        bag.add(11, 2);
        bag.add(12, 3);
        assert_eq!(bag.remove(11), Some(2));
        assert_eq!(bag.len(), 3);
        assert_eq!(bag.count(), 2);
        assert_eq!(bag.remove(11), None);
        assert_eq!(bag.remove(99), None);
        assert_eq!(bag.remove(3), None);
    }

    #[test]
    fn test_remove_only_element_then_add_elsewhere() {
        let mut bag: OffsetBag<u32> = OffsetBag::with_capacity(4);
        bag.add(500, 1);
        assert_eq!(bag.remove(500), Some(1));
        assert!(bag.is_empty());
        assert_eq!(bag.first_index(), None);
        assert_eq!(bag.get(500), None);

        bag.add(7, 2);
        assert_eq!(bag.offset(), 7);
        assert_eq!(bag.get(7), Some(&2));
        assert_eq!(bag.len(), 1);
    }

    #[test]
    fn test_get_mut() {
        let mut bag: OffsetBag<u32> = OffsetBag::with_capacity(4);
        bag.add(30, 1);
        bag.add(32, 2);
        *bag.get_mut(32).unwrap() += 10;
        assert_eq!(bag.get(32), Some(&12));
        assert!(bag.get_mut(31).is_none());
        assert!(bag.get_mut(29).is_none());
        assert!(bag.get_mut(33).is_none());
    }

    #[test]
    fn test_add_trusted_within_buffer() {
        let mut bag: OffsetBag<u32> = OffsetBag::with_capacity(8);
        bag.add(40, 1);
        assert_eq!(bag.add_trusted(45, 2), None);
        assert_eq!(bag.len(), 6);
        assert_eq!(bag.count(), 2);
        assert_eq!(bag.capacity(), 8);
        assert_eq!(bag.get_trusted(45), Some(&2));

        assert_eq!(bag.add_trusted(40, 3), Some(1));
        assert_eq!(bag.count(), 2);
    }

    #[test]
    fn test_remove_trusted_rebases_like_remove() {
        let mut bag: OffsetBag<u32> = OffsetBag::with_capacity(8);
        bag.add(10, 1);
        bag.add(12, 2);
        bag.add(15, 3);

        assert_eq!(bag.remove_trusted(10), Some(1));
        assert_eq!(bag.offset(), 12);
        assert_eq!(bag.remove_trusted(15), Some(3));
        assert_eq!(bag.len(), 1);
        assert_eq!(bag.remove_trusted(12), Some(2));
        assert!(bag.is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "remove_trusted outside live span")]
    fn test_remove_trusted_asserts_in_debug() {
        let mut bag: OffsetBag<u32> = OffsetBag::with_capacity(4);
        bag.add(10, 1);
        bag.remove_trusted(11);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "add_trusted on empty offset bag")]
    fn test_add_trusted_asserts_in_debug() {
        let mut bag: OffsetBag<u32> = OffsetBag::with_capacity(4);
        bag.add_trusted(0, 1);
    }

    #[test]
    fn test_clear() {
        let mut bag: OffsetBag<String> = OffsetBag::with_capacity(4);
        bag.add(3, "x".into());
        bag.add(9, "y".into());
        bag.clear();
        assert!(bag.is_empty());
        assert_eq!(bag.len(), 0);
        assert_eq!(bag.iter().count(), 0);
    }
}
