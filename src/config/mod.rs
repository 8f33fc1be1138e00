//! Configuration Module
//!
//! Client-level settings consumed by the plugins:
//! - Default tags and data
//! - Data exclusion patterns
//! - Feature flags
//! - The plugin registry

pub mod configuration;
pub mod exclusion;
pub mod settings;

pub use configuration::Configuration;
pub use exclusion::{ExclusionMatcher, ExclusionPattern};
pub use settings::{ConfigSnapshot, Settings};
