//! Initialize-once holder for the active timeline configuration.
//!
//! There is no hidden global: the application owns one `ConfigRegistry`,
//! initializes it at start-up, and passes it (or the `Arc` it hands out)
//! to every consumer. Tests call [`ConfigRegistry::reset`] between cases.

use super::types::TimelineConfig;
use crate::error::{Result, TimelineError};
use std::sync::Arc;

/// Holds the timeline configuration for the lifetime of the application.
#[derive(Debug, Default)]
pub struct ConfigRegistry {
    config: Option<Arc<TimelineConfig>>,
}

impl ConfigRegistry {
    /// Create an uninitialized registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { config: None }
    }

    /// Install the configuration. Invalid fields are reset to defaults.
    ///
    /// Returns `false`, leaving the existing configuration untouched, when the
    /// registry was already initialized.
    pub fn initialize(&mut self, config: TimelineConfig) -> bool {
        if self.config.is_some() {
            tracing::warn!("Timeline configuration already initialized; ignoring second initialization");
            return false;
        }
        self.config = Some(Arc::new(config.sanitized()));
        true
    }

    /// The active configuration.
    pub fn get(&self) -> Result<Arc<TimelineConfig>> {
        self.config
            .clone()
            .ok_or(TimelineError::ConfigNotInitialized)
    }

    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.config.is_some()
    }

    /// Return to the uninitialized state.
    pub fn reset(&mut self) {
        self.config = None;
    }
}
