//! # Pool Configuration
//!
//! Pool sizing loaded once at startup from TOML.
//!
//! ```toml
//! capacity = 256
//! label = "particles"
//! ```
//!
//! Missing keys fall back to [`PoolConfig::default`].

use crate::error::{PoolError, PoolResult};
use crate::pool::{validate_capacity, DEFAULT_CAPACITY, DEFAULT_LABEL};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for building a [`Pool`](crate::Pool).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolConfig {
    /// Number of objects to pre-allocate.
    pub capacity: usize,
    /// Name attached to the pool's log events.
    pub label: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            label: DEFAULT_LABEL.to_owned(),
        }
    }
}

impl PoolConfig {
    /// Sets the capacity.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidConfig`] on malformed TOML, unknown keys, or an
    /// unusable capacity.
    pub fn from_toml_str(text: &str) -> PoolResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| PoolError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidConfig`] if the file cannot be read or its
    /// contents are invalid.
    pub fn from_toml_file(path: impl AsRef<Path>) -> PoolResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| PoolError::InvalidConfig(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&text)?;

        tracing::debug!(path = %path.display(), capacity = config.capacity, "loaded pool config");
        Ok(config)
    }

    /// Serializes the configuration as TOML.
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidConfig`] if serialization fails.
    pub fn to_toml_string(&self) -> PoolResult<String> {
        toml::to_string(self).map_err(|e| PoolError::InvalidConfig(e.to_string()))
    }

    /// Checks that the configuration describes a constructible pool.
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidConfig`] if the capacity is zero or too large.
    pub fn validate(&self) -> PoolResult<()> {
        validate_capacity(self.capacity).map_err(|e| PoolError::InvalidConfig(e.to_string()))
    }
}
