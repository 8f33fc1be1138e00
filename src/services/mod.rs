//! Collaborator services handed to plugins at construction time.
//!
//! [`Services`] is the construction provider: a lazily registered plugin
//! type receives it once, on first use, and picks the collaborators it
//! needs.

pub mod environment;
pub mod user;

pub use environment::{EnvironmentInfoCollector, StaticEnvironmentCollector, SystemEnvironmentCollector};
pub use user::{StaticUserNameProvider, SystemUserNameProvider, UserNameProvider};

use std::fmt;
use std::sync::Arc;

/// Bundle of collaborators available to plugin constructors.
#[derive(Clone)]
pub struct Services {
    environment: Arc<dyn EnvironmentInfoCollector>,
    user: Arc<dyn UserNameProvider>,
}

impl Services {
    /// Create services backed by the running system.
    pub fn new() -> Self {
        Self {
            environment: Arc::new(SystemEnvironmentCollector::new()),
            user: Arc::new(SystemUserNameProvider),
        }
    }

    /// Replace the environment-info collector.
    pub fn with_environment_collector(
        mut self,
        collector: impl EnvironmentInfoCollector + 'static,
    ) -> Self {
        self.environment = Arc::new(collector);
        self
    }

    /// Replace the user-name provider.
    pub fn with_user_name_provider(mut self, provider: impl UserNameProvider + 'static) -> Self {
        self.user = Arc::new(provider);
        self
    }

    /// Environment-info collector.
    pub fn environment(&self) -> Arc<dyn EnvironmentInfoCollector> {
        Arc::clone(&self.environment)
    }

    /// User-name provider.
    pub fn user(&self) -> Arc<dyn UserNameProvider> {
        Arc::clone(&self.user)
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}
