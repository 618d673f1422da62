//! # Error Types
//!
//! Conditions the calling subsystem can recover from. Contract violations
//! (double free, exhausting the allocator through `alloc`, trusted accessors
//! used with bad indices) are not represented here: they are debug assertions.

use thiserror::Error;

/// Errors that can occur in the storage substrate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TesseraError {
    /// Attempted to free an identity outside the allocator's range.
    #[error("identity {id} is outside the allocator range [{start}, {end})")]
    IdentityOutOfRange {
        /// The offending identity.
        id: u32,
        /// Inclusive lower bound of the range.
        start: u32,
        /// Exclusive upper bound of the range.
        end: u32,
    },

    /// Every identity in the range is currently allocated.
    #[error("no free identities left in [{start}, {end})")]
    IdentitiesExhausted {
        /// Inclusive lower bound of the range.
        start: u32,
        /// Exclusive upper bound of the range.
        end: u32,
    },

    /// An identity range with no values in it.
    #[error("invalid identity range [{start}, {end}): start must be below end")]
    InvalidRange {
        /// Requested lower bound.
        start: u32,
        /// Requested upper bound.
        end: u32,
    },

    /// Configuration values failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(String),
}

/// Result type for storage substrate operations.
pub type TesseraResult<T> = Result<T, TesseraError>;
