//! # Growable Bitset
//!
//! Per-entity component masks and per-component entity sets.
//!
//! ## Performance
//!
//! - Insert/remove/contains: O(1), one bit operation
//! - Clear: O(n/64)
//! - Iterate: O(set bits + words)

use super::{words_for, SetBits, WORD_BITS};

/// Packed bitmask that grows to fit the highest bit inserted.
#[derive(Clone, Debug, Default)]
pub struct BitSet {
    /// 1 = present. 64 positions per word.
    words: Vec<u64>,
    /// Cached number of set bits.
    count: usize,
}

impl BitSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            words: Vec::new(),
            count: 0,
        }
    }

    /// Creates an empty set with room for positions below `bits`.
    #[must_use]
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            words: vec![0; words_for(bits)],
            count: 0,
        }
    }

    /// Sets bit `index`, growing if needed. Returns `true` if it was clear.
    #[inline]
    pub fn insert(&mut self, index: usize) -> bool {
        let word = index / WORD_BITS;
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        let mask = 1u64 << (index % WORD_BITS);
        let was_clear = self.words[word] & mask == 0;
        self.words[word] |= mask;
        if was_clear {
            self.count += 1;
        }
        was_clear
    }

    /// Clears bit `index`. Returns `true` if it was set.
    #[inline]
    pub fn remove(&mut self, index: usize) -> bool {
        let Some(word) = self.words.get_mut(index / WORD_BITS) else {
            return false;
        };
        let mask = 1u64 << (index % WORD_BITS);
        let was_set = *word & mask != 0;
        *word &= !mask;
        if was_set {
            self.count -= 1;
        }
        was_set
    }

    /// Checks bit `index`. Positions beyond storage are clear.
    #[inline]
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.words
            .get(index / WORD_BITS)
            .is_some_and(|&word| (word >> (index % WORD_BITS)) & 1 == 1)
    }

    /// Clears every bit. Storage is kept.
    pub fn clear(&mut self) {
        self.words.fill(0);
        self.count = 0;
    }

    /// Number of set bits.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if no bit is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The packed words.
    #[inline]
    #[must_use]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Iterates set positions in ascending order.
    #[inline]
    pub fn iter(&self) -> SetBits<&[u64]> {
        SetBits::new(self.words.as_slice())
    }

    /// Iterates set positions at or above `index`.
    #[inline]
    pub fn iter_from(&self, index: usize) -> SetBits<&[u64]> {
        SetBits::new(self.words.as_slice()).starting_from(index)
    }

    /// Returns `true` if any bit is set in both.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(&other.words)
            .any(|(a, b)| a & b != 0)
    }

    /// Returns `true` if every bit set in `other` is set in `self`.
    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        other.words.iter().enumerate().all(|(i, &theirs)| {
            let ours = self.words.get(i).copied().unwrap_or(0);
            theirs & !ours == 0
        })
    }

    /// Keeps only the bits also set in `other`.
    pub fn intersect_with(&mut self, other: &Self) {
        for (i, word) in self.words.iter_mut().enumerate() {
            *word &= other.words.get(i).copied().unwrap_or(0);
        }
        self.recount();
    }

    /// Sets every bit set in `other`.
    pub fn union_with(&mut self, other: &Self) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (word, theirs) in self.words.iter_mut().zip(&other.words) {
            *word |= theirs;
        }
        self.recount();
    }

    fn recount(&mut self) {
        self.count = self.words.iter().map(|w| w.count_ones() as usize).sum();
    }
}

impl PartialEq for BitSet {
    /// Compares members. Trailing words beyond the shorter set count as zero.
    fn eq(&self, other: &Self) -> bool {
        if self.count != other.count {
            return false;
        }
        let (short, long) = if self.words.len() <= other.words.len() {
            (&self.words, &other.words)
        } else {
            (&other.words, &self.words)
        };
        short.iter().zip(long.iter()).all(|(a, b)| a == b)
            && long[short.len()..].iter().all(|&word| word == 0)
    }
}

impl Eq for BitSet {}

impl<'a> IntoIterator for &'a BitSet {
    type Item = usize;
    type IntoIter = SetBits<&'a [u64]>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<usize> for BitSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for index in iter {
            self.insert(index);
        }
    }
}

impl FromIterator<usize> for BitSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
