//! Client configuration: settings, collaborators and the plugin registry.

use crate::config::settings::{ConfigSnapshot, Settings};
use crate::core::Result;
use crate::plugin::builtin::{
    ConfigurationDefaultsPlugin, EnvironmentInfoPlugin, ErrorPlugin, ReferenceIdPlugin,
    SetEnvironmentUserPlugin, SubmissionMethodPlugin,
};
use crate::plugin::context::EventPluginContext;
use crate::plugin::interface::{EventPlugin, PluginType};
use crate::plugin::registry::{PluginRegistration, PluginRegistry};
use crate::services::Services;
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Configuration shared by every pipeline run of one client.
///
/// Settings are copy-on-write: each mutation publishes a new
/// [`ConfigSnapshot`], and runs read whichever snapshot was current when
/// they asked for it.
pub struct Configuration {
    snapshot: RwLock<Arc<ConfigSnapshot>>,
    registry: RwLock<PluginRegistry>,
    services: Services,
}

impl Configuration {
    /// Create a configuration with default settings and system collaborators.
    pub fn new() -> Self {
        Self::with_services(Services::default())
    }

    /// Create a configuration with custom collaborators.
    pub fn with_services(services: Services) -> Self {
        Self::from_settings(Settings::default(), services)
    }

    /// Create a configuration from settings, registering the built-in plugins.
    pub fn from_settings(settings: Settings, services: Services) -> Self {
        let mut registry = PluginRegistry::new();
        registry.add_plugin::<ConfigurationDefaultsPlugin>();
        registry.add_plugin::<ErrorPlugin>();
        registry.add_plugin::<EnvironmentInfoPlugin>();
        registry.add_plugin::<SubmissionMethodPlugin>();
        if settings.use_reference_ids {
            registry.add_plugin::<ReferenceIdPlugin>();
        }
        if settings.include_environment_user {
            registry.add_plugin::<SetEnvironmentUserPlugin>();
        }

        Self {
            snapshot: RwLock::new(Arc::new(ConfigSnapshot::new(settings))),
            registry: RwLock::new(registry),
            services,
        }
    }

    /// Collaborator services.
    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Current settings snapshot.
    pub fn snapshot(&self) -> Arc<ConfigSnapshot> {
        Arc::clone(&self.snapshot.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Apply a change to the settings and publish a new snapshot.
    pub fn update<F: FnOnce(&mut Settings)>(&self, change: F) {
        let mut current = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        let mut settings = current.settings().clone();
        change(&mut settings);
        *current = Arc::new(ConfigSnapshot::new(settings));
    }

    /// Add tags applied to every event.
    pub fn add_default_tags<I, S>(&self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags: Vec<String> = tags
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        self.update(|settings| settings.default_tags.extend(tags));
    }

    /// Add a data entry applied to every event.
    pub fn add_default_data<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.update(|settings| {
            settings.default_data.insert(key.to_string(), value);
        });
        Ok(())
    }

    /// Add data exclusion patterns.
    pub fn add_data_exclusions<I, S>(&self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(|p| p.as_ref().to_string()).collect();
        self.update(|settings| {
            for pattern in patterns {
                if !settings.data_exclusions.contains(&pattern) {
                    settings.data_exclusions.push(pattern);
                }
            }
        });
    }

    /// Assign reference ids to error events.
    ///
    /// An already registered reference-id plugin is kept as is.
    pub fn use_reference_ids(&self) {
        self.update(|settings| settings.use_reference_ids = true);
        self.add_plugin_if_missing::<ReferenceIdPlugin>();
    }

    /// Backfill missing user identities with the OS user name.
    ///
    /// An already registered user plugin is kept as is.
    pub fn include_environment_user(&self) {
        self.update(|settings| settings.include_environment_user = true);
        self.add_plugin_if_missing::<SetEnvironmentUserPlugin>();
    }

    fn add_plugin_if_missing<T: PluginType>(&self) {
        let mut registry = self.registry_mut();
        if !registry.contains(T::key()) {
            registry.add_plugin::<T>();
        }
    }

    fn registry(&self) -> RwLockReadGuard<'_, PluginRegistry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn registry_mut(&self) -> RwLockWriteGuard<'_, PluginRegistry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a closure plugin. Replaces any plugin with the same key.
    ///
    /// The registry owns the closure for as long as this configuration lives.
    /// A closure that captures a [`Client`](crate::Client) or an
    /// `Arc<Configuration>` forms a reference cycle, and the configuration is
    /// never dropped or disposed; capture `Arc::downgrade` of the
    /// configuration instead.
    pub fn add_plugin_fn<F>(&self, key: &str, priority: i32, action: F)
    where
        F: Fn(&mut EventPluginContext) + Send + Sync + 'static,
    {
        self.registry_mut().add_plugin_fn(key, priority, action);
    }

    /// Register a pre-built plugin instance.
    pub fn add_plugin_instance(&self, key: &str, priority: i32, plugin: Arc<dyn EventPlugin>) {
        self.registry_mut().add_plugin_instance(key, priority, plugin);
    }

    /// Register a plugin type at its declared priority.
    pub fn add_plugin<T: PluginType>(&self) {
        self.registry_mut().add_plugin::<T>();
    }

    /// Register a plugin type at an explicit priority.
    pub fn add_plugin_with_priority<T: PluginType>(&self, priority: i32) {
        self.registry_mut().add_plugin_with_priority::<T>(priority);
    }

    /// Unregister a plugin by key.
    pub fn remove_plugin(&self, key: &str) -> bool {
        self.registry_mut().remove_plugin(key)
    }

    /// Unregister a plugin type.
    pub fn remove_plugin_type<T: PluginType>(&self) -> bool {
        self.registry_mut().remove_plugin_type::<T>()
    }

    /// Remove every plugin, including the built-in ones.
    pub fn clear_plugins(&self) {
        debug!("clearing all plugins");
        self.registry_mut().clear();
    }

    /// Registrations ordered by ascending priority, ties in registration order.
    pub fn plugins(&self) -> Vec<Arc<PluginRegistration>> {
        self.registry().plugins()
    }

    /// Get a registration by key.
    pub fn plugin(&self, key: &str) -> Option<Arc<PluginRegistration>> {
        self.registry().get(key)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("settings", self.snapshot().settings())
            .field("plugins", &*self.registry())
            .finish()
    }
}
