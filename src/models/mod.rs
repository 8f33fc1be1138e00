//! Event Models
//!
//! Data carried through the pipeline:
//! - Telemetry events and their well-known keys
//! - Detailed and simplified error models
//! - Captured exceptions
//! - Environment and user descriptors

pub mod environment;
pub mod error;
pub mod event;
pub mod exception;
pub mod user;

pub use environment::EnvironmentInfo;
pub use error::{known_error_data_keys, ErrorInfo, SimpleErrorInfo};
pub use event::{known_data_keys, known_tags, known_types, Event};
pub use exception::{CapturedException, StackFrame};
pub use user::UserInfo;
