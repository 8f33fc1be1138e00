//! Plugin Module
//!
//! Provides the enrichment pipeline:
//! - Plugin interface
//! - Plugin registry and lifecycle management
//! - Per-event context
//! - Pipeline runner
//! - Built-in plugins

pub mod builtin;
pub mod context;
pub mod interface;
pub mod registry;
pub mod runner;

pub use context::{known_context_keys, ContextData, EventPluginContext};
pub use interface::{ActionPlugin, EventPlugin, PluginType, DEFAULT_PRIORITY};
pub use registry::{PluginFactory, PluginRegistration, PluginRegistry, PluginStatus};
pub use runner::PluginRunner;
