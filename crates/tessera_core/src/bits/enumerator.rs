//! # Set-Bit Enumeration
//!
//! Walks the set bits of one or more words in ascending order. Each step
//! isolates the lowest set bit with `word & -word` and converts it to a
//! position with a popcount, so clean words and clean bits cost nothing.

use std::iter::FusedIterator;

use super::WORD_BITS;

/// Lazy, restartable, forward-only iterator over set-bit positions.
///
/// Works over anything that views as `[u64]`: a fixed `[u64; N]` for small
/// fixed-capacity masks, or a borrowed slice for variable-length ones. The
/// words themselves are never modified.
///
/// # Example
///
/// ```rust,ignore
/// let positions: Vec<usize> = SetBits::new([0b1010u64]).collect();
/// assert_eq!(positions, vec![1, 3]);
/// ```
#[derive(Clone, Debug)]
pub struct SetBits<W> {
    words: W,
    word_index: usize,
    /// Bits of `words[word_index]` not yet yielded.
    cursor: u64,
}

impl<W: AsRef<[u64]>> SetBits<W> {
    /// Creates an enumerator positioned at bit 0.
    #[must_use]
    pub fn new(words: W) -> Self {
        let cursor = words.as_ref().first().copied().unwrap_or(0);
        Self {
            words,
            word_index: 0,
            cursor,
        }
    }

    /// Creates an enumerator whose first position is the smallest set bit
    /// at or above `index`.
    #[must_use]
    pub fn starting_from(mut self, index: usize) -> Self {
        self.seek(index);
        self
    }

    /// Repositions to bit 0 so the full sequence replays.
    #[inline]
    pub fn reset(&mut self) {
        self.seek(0);
    }

    /// Repositions so the next position yielded is the smallest set bit at or
    /// above `index`.
    pub fn seek(&mut self, index: usize) {
        let words = self.words.as_ref();
        let word_index = index / WORD_BITS;
        if let Some(&word) = words.get(word_index) {
            self.word_index = word_index;
            self.cursor = word & (u64::MAX << (index % WORD_BITS));
        } else {
            self.word_index = words.len();
            self.cursor = 0;
        }
    }

    /// Number of positions left to yield.
    #[must_use]
    pub fn remaining(&self) -> usize {
        let words = self.words.as_ref();
        let rest: u32 = words
            .iter()
            .skip(self.word_index + 1)
            .map(|word| word.count_ones())
            .sum();
        (self.cursor.count_ones() + rest) as usize
    }

    /// The words being enumerated.
    #[inline]
    #[must_use]
    pub fn words(&self) -> &[u64] {
        self.words.as_ref()
    }
}

impl<W: AsRef<[u64]>> Iterator for SetBits<W> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let words = self.words.as_ref();
        while self.cursor == 0 {
            self.word_index += 1;
            if self.word_index >= words.len() {
                self.word_index = words.len();
                return None;
            }
            self.cursor = words[self.word_index];
        }

        let lowest = self.cursor & self.cursor.wrapping_neg();
        self.cursor ^= lowest;
        Some(self.word_index * WORD_BITS + (lowest - 1).count_ones() as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<W: AsRef<[u64]>> ExactSizeIterator for SetBits<W> {}

impl<W: AsRef<[u64]>> FusedIterator for SetBits<W> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word() {
        let bits: Vec<usize> = SetBits::new([0b1010u64]).collect();
        assert_eq!(bits, vec![1, 3]);
    }

    #[test]
    fn test_second_word() {
        let bits: Vec<usize> = SetBits::new([0u64, 0b1]).collect();
        assert_eq!(bits, vec![64]);
    }

    #[test]
    fn test_all_zero() {
        assert_eq!(SetBits::new([0u64; 4]).count(), 0);
        assert_eq!(SetBits::new(Vec::<u64>::new()).count(), 0);
    }

    #[test]
    fn test_high_bits_and_slices() {
        let words = vec![1u64 << 63, u64::MAX, 0, 1];
        let bits: Vec<usize> = SetBits::new(words.as_slice()).collect();
        let mut expected = vec![63];
        expected.extend(64..128);
        expected.push(192);
        assert_eq!(bits, expected);
    }

    #[test]
    fn test_reset_replays() {
        let mut bits = SetBits::new([0b1011u64, 0b100]);
        assert_eq!(bits.next(), Some(0));
        assert_eq!(bits.next(), Some(1));
        bits.reset();
        assert_eq!(bits.collect::<Vec<_>>(), vec![0, 1, 3, 66]);
    }

    #[test]
    fn test_starting_from() {
        let words = [0b1011u64, 0b100];
        let from_two: Vec<usize> = SetBits::new(words).starting_from(2).collect();
        assert_eq!(from_two, vec![3, 66]);

        let from_set_bit: Vec<usize> = SetBits::new(words).starting_from(3).collect();
        assert_eq!(from_set_bit, vec![3, 66]);

        let next_word: Vec<usize> = SetBits::new(words).starting_from(64).collect();
        assert_eq!(next_word, vec![66]);

        assert_eq!(SetBits::new(words).starting_from(500).count(), 0);
    }

    #[test]
    fn test_exhausted_stays_exhausted() {
        let mut bits = SetBits::new([0b1u64]);
        assert_eq!(bits.next(), Some(0));
        assert_eq!(bits.next(), None);
        assert_eq!(bits.next(), None);
    }

    #[test]
    fn test_size_hint() {
        let mut bits = SetBits::new([0b111u64, 0b11]);
        assert_eq!(bits.len(), 5);
        bits.next();
        assert_eq!(bits.len(), 4);
    }
}
