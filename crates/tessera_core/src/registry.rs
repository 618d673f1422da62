//! # Type Index Registry
//!
//! Assigns each concrete type a small integer, densely packed from zero within
//! its family (the trait or marker type it is registered under). The index is
//! the type's bit position in component bitmasks.
//!
//! ## Concurrency
//!
//! The only structure in this crate that is safe to mutate from several
//! threads. Lookups take a shared read lock; the first registration of a type
//! takes the write lock and re-checks before assigning, so each
//! `(family, type)` pair gets at most one index no matter how many threads
//! race on first use.
//!
//! ## Usage
//!
//! Prefer constructing one registry and passing it by reference.
//! [`TypeIndexRegistry::global`] exists for call sites that cannot be handed
//! one; it is created lazily on first access and lives for the process.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::OnceLock;

use parking_lot::RwLock;

/// Per-family index assignments.
type FamilyIndices = HashMap<TypeId, usize>;

/// Stable, dense per-family type indices.
///
/// # Example
///
/// ```rust,ignore
/// trait Component {}
/// struct Position;
/// struct Velocity;
/// impl Component for Position {}
/// impl Component for Velocity {}
///
/// let registry = TypeIndexRegistry::new();
/// assert_eq!(registry.index_of::<Position, dyn Component>(), 0);
/// assert_eq!(registry.index_of::<Velocity, dyn Component>(), 1);
/// assert_eq!(registry.index_of::<Position, dyn Component>(), 0);
/// ```
#[derive(Debug, Default)]
pub struct TypeIndexRegistry {
    families: RwLock<HashMap<TypeId, FamilyIndices>>,
}

static GLOBAL: OnceLock<TypeIndexRegistry> = OnceLock::new();

impl TypeIndexRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry, created on first access.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| {
            tracing::debug!("global type index registry initialized");
            Self::new()
        })
    }

    /// Returns the index of `T` within family `F`, assigning the next free
    /// index on first use.
    pub fn index_of<T: ?Sized + 'static, F: ?Sized + 'static>(&self) -> usize {
        self.index_for(TypeId::of::<T>(), TypeId::of::<F>())
    }

    /// Returns the index of `concrete` within `family`, assigning the next
    /// free index on first use.
    pub fn index_for(&self, concrete: TypeId, family: TypeId) -> usize {
        let cached = self
            .families
            .read()
            .get(&family)
            .and_then(|indices| indices.get(&concrete).copied());
        if let Some(index) = cached {
            return index;
        }

        let mut families = self.families.write();
        let indices = families.entry(family).or_default();
        let next = indices.len();
        let index = *indices.entry(concrete).or_insert(next);
        if index == next {
            tracing::trace!(?family, ?concrete, index, "assigned new type index");
        }
        index
    }

    /// Returns the index of `T` within `F` if one was already assigned.
    #[must_use]
    pub fn get<T: ?Sized + 'static, F: ?Sized + 'static>(&self) -> Option<usize> {
        self.families
            .read()
            .get(&TypeId::of::<F>())
            .and_then(|indices| indices.get(&TypeId::of::<T>()).copied())
    }

    /// Number of types registered under `F`; also the next index it will assign.
    #[must_use]
    pub fn family_len<F: ?Sized + 'static>(&self) -> usize {
        self.families
            .read()
            .get(&TypeId::of::<F>())
            .map_or(0, HashMap::len)
    }
}
