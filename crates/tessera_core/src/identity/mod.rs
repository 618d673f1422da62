//! # Identity Management
//!
//! Identities are small non-negative integers standing in for entities. They
//! index component arrays directly, so they are kept dense and reused.
//!
//! - [`IdentityAllocator`]: bounded range, free space tracked as coalesced
//!   intervals, always hands out the smallest free identity
//! - [`IdentityPool`]: unbounded, recycles freed identities LIFO before
//!   minting new ones
//!
//! Callers must not assume identities are ordered, contiguous from zero, or
//! never reused.

mod allocator;
mod pool;

pub use allocator::{IdentityAllocator, Interval};
pub use pool::IdentityPool;
