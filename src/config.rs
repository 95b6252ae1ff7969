//! Configuration for keybridge
//!
//! Centralized configuration with sensible defaults. These settings seed
//! the base read behavior every operation on a store starts from;
//! per-call snapshot overrides layer on top without touching them.

use crate::options::ReadOptions;

/// Configuration for a store handle
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether reads populate the engine's block cache by default
    pub fill_cache: bool,

    /// Whether cursor walks reconstruct keys in their text form
    ///
    /// When set, a stored key that is not valid UTF-8 surfaces an
    /// encoding error at `current()` instead of a binary key.
    pub prefer_text_keys: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fill_cache: true,
            prefer_text_keys: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// The base read options derived from this config
    pub(crate) fn base_read_options(&self) -> ReadOptions {
        ReadOptions {
            fill_cache: self.fill_cache,
            snapshot: None,
        }
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set whether reads populate the engine's block cache by default
    pub fn fill_cache(mut self, fill: bool) -> Self {
        self.config.fill_cache = fill;
        self
    }

    /// Set whether cursor walks reconstruct keys in their text form
    pub fn prefer_text_keys(mut self, prefer: bool) -> Self {
        self.config.prefer_text_keys = prefer;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.fill_cache);
        assert!(!config.prefer_text_keys);
    }

    #[test]
    fn test_builder_overrides_defaults() {
        let config = Config::builder()
            .fill_cache(false)
            .prefer_text_keys(true)
            .build();

        assert!(!config.fill_cache);
        assert!(config.prefer_text_keys);

        let base = config.base_read_options();
        assert!(!base.fill_cache);
        assert_eq!(base.snapshot, None);
    }
}
