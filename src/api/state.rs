//! Application state for the Leave Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::clock::BusinessClock;
use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds the loaded leave policy and the clock used to resolve "today"
/// when a request does not name a reference date.
#[derive(Clone)]
pub struct AppState {
    /// The loaded leave policy.
    config: Arc<ConfigLoader>,
    /// Clock pinned to the policy's business timezone.
    clock: BusinessClock,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        let clock = BusinessClock::new(config.business_offset());
        Self {
            config: Arc::new(config),
            clock,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the business clock.
    pub fn clock(&self) -> &BusinessClock {
        &self.clock
    }
}
