//! # Configuration
//!
//! Construction parameters for arrays and allocators, loadable from TOML.
//! Loaded once at startup, never consulted on hot paths.
//!
//! ```toml
//! [array]
//! initial_capacity = 256
//! growth_threshold = 8192
//!
//! [identity]
//! start = 1
//! end = 1000000
//! ```

use serde::{Deserialize, Serialize};

use crate::array::{DEFAULT_CAPACITY, DEFAULT_GROWTH_THRESHOLD, MIN_CAPACITY};
use crate::error::{TesseraError, TesseraResult};

/// Sizing and growth parameters for the growable array family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrayConfig {
    /// Slots allocated up front. Values below [`MIN_CAPACITY`] are clamped.
    pub initial_capacity: usize,
    /// Size at which growth switches from doubling to 1.5x.
    pub growth_threshold: usize,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            growth_threshold: DEFAULT_GROWTH_THRESHOLD,
        }
    }
}

impl ArrayConfig {
    /// Creates a config with the given initial capacity and default threshold.
    #[must_use]
    pub const fn with_capacity(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            growth_threshold: DEFAULT_GROWTH_THRESHOLD,
        }
    }

    /// Sets the growth threshold.
    #[must_use]
    pub const fn with_threshold(mut self, growth_threshold: usize) -> Self {
        self.growth_threshold = growth_threshold;
        self
    }

    /// Initial capacity after clamping to the minimum working capacity.
    #[inline]
    #[must_use]
    pub fn clamped_capacity(&self) -> usize {
        self.initial_capacity.max(MIN_CAPACITY)
    }

    /// Checks the values are usable.
    ///
    /// # Errors
    ///
    /// Returns error if the growth threshold is zero.
    pub fn validate(&self) -> TesseraResult<()> {
        if self.growth_threshold == 0 {
            return Err(TesseraError::InvalidConfig(
                "array.growth_threshold must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Half-open range of identity values handed out by an allocator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// First identity in the range.
    pub start: u32,
    /// One past the last identity in the range.
    pub end: u32,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            start: 0,
            end: u32::MAX,
        }
    }
}

impl IdentityConfig {
    /// Checks the values are usable.
    ///
    /// # Errors
    ///
    /// Returns error if the range is empty.
    pub fn validate(&self) -> TesseraResult<()> {
        if self.start >= self.end {
            return Err(TesseraError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

/// Top-level configuration document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TesseraConfig {
    /// Array sizing.
    pub array: ArrayConfig,
    /// Identity range.
    pub identity: IdentityConfig,
}

impl TesseraConfig {
    /// Parses and validates a TOML document. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the text is not valid TOML for this schema or if the
    /// values fail validation.
    pub fn from_toml_str(text: &str) -> TesseraResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| TesseraError::ConfigParse(e.to_string()))?;
        config.validate()?;
        tracing::debug!(
            initial_capacity = config.array.initial_capacity,
            growth_threshold = config.array.growth_threshold,
            identity_start = config.identity.start,
            identity_end = config.identity.end,
            "loaded storage configuration"
        );
        Ok(config)
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns the first section error encountered.
    pub fn validate(&self) -> TesseraResult<()> {
        self.array.validate()?;
        self.identity.validate()
    }
}
