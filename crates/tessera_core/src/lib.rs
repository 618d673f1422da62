//! # TESSERA Core
//!
//! Identity and storage substrate for an entity-component runtime:
//! - Reusable small integer identities that never leak address space
//! - Densely packed growable arrays addressed by those identities
//! - Packed bitmasks enumerated without walking every slot
//!
//! ## Architecture Rules
//!
//! 1. **Swap-remove everywhere** - O(1) removal, insertion order is never kept
//! 2. **Checked and trusted accessors** - hot paths may skip bounds checks
//! 3. **Single writer** - only the type index registry is thread-safe
//!
//! ## Example
//!
//! ```rust,ignore
//! use tessera_core::{Bag, BitSet, IdentityAllocator, TypeIndexRegistry};
//!
//! let registry = TypeIndexRegistry::new();
//! let mut ids = IdentityAllocator::new(0, 1_000_000)?;
//! let mut positions: Bag<Position> = Bag::new();
//! let mut mask = BitSet::new();
//!
//! let entity = ids.alloc();
//! positions.set(entity as usize, Position::new(1.0, 2.0, 3.0));
//! mask.insert(registry.index_of::<Position, dyn Component>());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod array;
pub mod bits;
pub mod config;
pub mod error;
pub mod identity;
pub mod registry;

pub use array::{Bag, GrowthPhase, GrowthPolicy, IntBag, IntStack, OffsetBag};
pub use bits::{BitSet, SetBits};
pub use config::{ArrayConfig, IdentityConfig, TesseraConfig};
pub use error::{TesseraError, TesseraResult};
pub use identity::{IdentityAllocator, IdentityPool, Interval};
pub use registry::TypeIndexRegistry;
