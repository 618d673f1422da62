//! # Bitmasks
//!
//! Packed 64-bit word masks where bit `i` means "identity `i` is in the set",
//! and a cursor that walks the set bits without testing each one.

mod enumerator;
mod set;

pub use enumerator::SetBits;
pub use set::BitSet;

/// Bits per mask word.
pub const WORD_BITS: usize = 64;

/// Number of words needed to hold `bits` bits.
#[inline]
#[must_use]
pub const fn words_for(bits: usize) -> usize {
    bits.div_ceil(WORD_BITS)
}
