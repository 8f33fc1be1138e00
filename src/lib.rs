//! # event-enrich - Plugin-driven event enrichment
//!
//! Runs client-side telemetry events through an ordered pipeline of
//! enrichment plugins before they are submitted:
//! - **Registry**: prioritized plugins, constructed lazily and disposed once
//! - **Runner**: priority-ordered execution with cooperative cancellation
//! - **Built-ins**: configuration defaults, error models, environment info,
//!   user identity, reference ids
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use event_enrich::models::CapturedException;
//! use event_enrich::plugin::ContextData;
//! use event_enrich::Client;
//!
//! fn main() -> event_enrich::Result<()> {
//!     let client = Client::new();
//!     client.configuration().add_default_tags(["Internal"]);
//!     client.configuration().add_data_exclusions(["Password*"]);
//!
//!     let mut data = ContextData::new();
//!     data.set_exception(CapturedException::new("IoError", "disk full"));
//!
//!     let context = client.enrich(client.create_event("error"), data)?;
//!     println!("{}", serde_json::to_string_pretty(&context.event)?);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod models;
pub mod monitoring;
pub mod plugin;
pub mod services;

pub use client::Client;
pub use config::{Configuration, Settings};
pub use core::error::{Error, Result};
pub use models::Event;
pub use plugin::{EventPlugin, EventPluginContext, PluginRunner, PluginType};
