//! # Identity Pool
//!
//! Unbounded identity source: recycles freed identities before minting new
//! ones from a monotonically increasing counter.

use crate::array::IntStack;

/// Recycling identity pool.
///
/// Freed identities go on a LIFO stack and are handed out again most recent
/// first. Only when the stack is empty is a fresh identity minted.
///
/// # Thread Safety
///
/// Not thread-safe. Use one pool per world or wrap in a mutex.
///
/// # Example
///
/// ```rust,ignore
/// let mut pool = IdentityPool::new();
/// let a = pool.alloc(); // 0
/// let b = pool.alloc(); // 1
/// pool.free(a);
/// assert_eq!(pool.alloc(), a); // recycled
/// ```
#[derive(Clone, Debug, Default)]
pub struct IdentityPool {
    /// Freed identities, most recent on top.
    recycled: IntStack,
    /// Next identity never handed out before.
    next: u32,
    /// First identity this pool mints.
    first: u32,
}

impl IdentityPool {
    /// Creates a pool minting from zero.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Creates a pool whose first fresh identity is `first`.
    #[must_use]
    pub fn starting_at(first: u32) -> Self {
        tracing::debug!(first, "identity pool created");
        Self {
            recycled: IntStack::new(),
            next: first,
            first,
        }
    }

    /// Hands out a recycled identity if one is available, else a fresh one.
    ///
    /// This is a **O(1)** operation.
    #[inline]
    pub fn alloc(&mut self) -> u32 {
        if let Some(id) = self.recycled.pop() {
            return id;
        }
        debug_assert!(self.next < u32::MAX, "identity pool exhausted");
        let id = self.next;
        self.next += 1;
        id
    }

    /// Returns `id` for reuse.
    ///
    /// `id` must have been issued by this pool and not freed since; neither is
    /// checked in release builds.
    #[inline]
    pub fn free(&mut self, id: u32) {
        debug_assert!(
            (self.first..self.next).contains(&id),
            "identity {id} was never issued by this pool"
        );
        self.recycled.push(id);
    }

    /// Identity the next `alloc` will return.
    #[inline]
    #[must_use]
    pub fn peek_next(&self) -> u32 {
        self.recycled.peek().unwrap_or(self.next)
    }

    /// Number of identities currently out.
    #[inline]
    #[must_use]
    pub const fn issued_count(&self) -> usize {
        (self.next - self.first) as usize - self.recycled.len()
    }

    /// Number of freed identities waiting for reuse.
    #[inline]
    #[must_use]
    pub const fn recycled_count(&self) -> usize {
        self.recycled.len()
    }

    /// Forgets every issued identity; the next `alloc` starts over.
    pub fn clear(&mut self) {
        self.recycled.clear();
        self.next = self.first;
    }
}
