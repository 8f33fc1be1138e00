//! Built-in enrichment plugins.

pub mod configuration_defaults;
pub mod environment_info;
pub mod environment_user;
pub mod error;
pub mod extra_properties;
pub mod reference_id;
pub mod simple_error;
pub mod submission_method;

pub use configuration_defaults::ConfigurationDefaultsPlugin;
pub use environment_info::EnvironmentInfoPlugin;
pub use environment_user::SetEnvironmentUserPlugin;
pub use error::ErrorPlugin;
pub use reference_id::ReferenceIdPlugin;
pub use simple_error::SimpleErrorPlugin;
pub use submission_method::SubmissionMethodPlugin;

/// Declared priorities of the built-in plugins.
///
/// Error extraction runs before anything that reads the error model;
/// environment info runs late so earlier plugins have settled the event type.
pub mod priorities {
    pub const CONFIGURATION_DEFAULTS: i32 = 10;
    pub const REFERENCE_ID: i32 = 20;
    pub const ERROR: i32 = 30;
    pub const SET_ENVIRONMENT_USER: i32 = 45;
    pub const ENVIRONMENT_INFO: i32 = 70;
    pub const SUBMISSION_METHOD: i32 = 100;
}
