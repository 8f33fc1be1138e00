//! Monitoring Module
//!
//! Provides observability for the pipeline:
//! - Structured logging bootstrap

pub mod logging;

pub use logging::{init_logging, LogFormat, LogLevel, LoggerConfig};
