//! Per-session configuration.

use std::num::NonZeroU32;

use crate::core::constants::DEFAULT_TOLERANCE_THRESHOLD;

/// Session configuration, fixed at construction and never mutated while the
/// session is live.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Enable the false-negative write workaround.
    ///
    /// Off by default: only deployments targeting the affected controller
    /// family should turn it on. With the flag off, every negative write
    /// result is fatal, unconditionally.
    pub workaround_enabled: bool,

    /// Maximum consecutive false-negative write results absorbed before a
    /// fault escalates.
    pub tolerance_threshold: NonZeroU32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            workaround_enabled: false,
            tolerance_threshold: DEFAULT_TOLERANCE_THRESHOLD,
        }
    }
}

impl SessionConfig {
    /// Start building a session configuration.
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::new()
    }
}

/// Builder for [`SessionConfig`].
#[derive(Debug)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: SessionConfig::default(),
        }
    }

    /// Enable or disable the false-negative write workaround.
    pub fn workaround_enabled(mut self, enabled: bool) -> Self {
        self.config.workaround_enabled = enabled;
        self
    }

    /// Set the tolerance threshold.
    pub fn tolerance_threshold(mut self, threshold: NonZeroU32) -> Self {
        self.config.tolerance_threshold = threshold;
        self
    }

    /// Build the session configuration.
    pub fn build(self) -> SessionConfig {
        self.config
    }
}

impl Default for SessionConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert!(!config.workaround_enabled);
        assert_eq!(config.tolerance_threshold.get(), 5);
    }

    #[test]
    fn test_builder() {
        let config = SessionConfig::builder()
            .workaround_enabled(true)
            .tolerance_threshold(NonZeroU32::new(3).unwrap())
            .build();

        assert!(config.workaround_enabled);
        assert_eq!(config.tolerance_threshold.get(), 3);
    }
}
