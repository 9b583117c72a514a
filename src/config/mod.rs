//! Configuration loading and management for the Leave Engine.
//!
//! This module loads the leave policy from YAML files: policy metadata, the
//! business timezone, and the accrual rule parameters.
//!
//! # Example
//!
//! ```no_run
//! use leave_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/kr_annual_leave").unwrap();
//! println!("Loaded policy: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AccrualRules, BusinessTimezone, LeavePolicy, PolicyMetadata};
