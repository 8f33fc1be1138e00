//! Plugin registry for managing plugins.
//!
//! Handles plugin registration, ordering, lazy construction and disposal.
//!
//! Each [`PluginRegistration`] is a small state machine:
//!
//! ```text
//! Registered --(first run)--> Instantiated --(remove)--> Disposed
//!     |                                                     ^
//!     +-----------------------(remove)----------------------+
//! ```
//!
//! Construction and disposal happen under the registration's lock, so each
//! fires at most once and never concurrently with the other.

use crate::core::{Error, Result};
use crate::plugin::context::EventPluginContext;
use crate::plugin::interface::{ActionPlugin, EventPlugin, PluginType};
use crate::services::Services;
use indexmap::IndexMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Builds a plugin instance on first use.
pub type PluginFactory = Box<dyn Fn(&Services) -> Result<Arc<dyn EventPlugin>> + Send + Sync>;

/// Plugin lifecycle status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PluginStatus {
    /// Registered, not yet constructed
    Registered,
    /// Constructed and shared by pipeline runs
    Instantiated,
    /// Removed from the registry
    Disposed,
}

enum PluginState {
    Registered,
    Instantiated(Arc<dyn EventPlugin>),
    Disposed,
}

/// Registered plugin entry.
pub struct PluginRegistration {
    /// Unique key
    key: String,
    /// Execution priority
    priority: i32,
    /// Constructor (None for pre-built instances)
    factory: Option<PluginFactory>,
    /// Lifecycle state
    state: Mutex<PluginState>,
}

impl PluginRegistration {
    fn lazy(key: &str, priority: i32, factory: PluginFactory) -> Self {
        Self {
            key: key.to_string(),
            priority,
            factory: Some(factory),
            state: Mutex::new(PluginState::Registered),
        }
    }

    fn instance(key: &str, priority: i32, plugin: Arc<dyn EventPlugin>) -> Self {
        Self {
            key: key.to_string(),
            priority,
            factory: None,
            state: Mutex::new(PluginState::Instantiated(plugin)),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, PluginState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registration key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Execution priority.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Current lifecycle status.
    pub fn status(&self) -> PluginStatus {
        match &*self.lock_state() {
            PluginState::Registered => PluginStatus::Registered,
            PluginState::Instantiated(_) => PluginStatus::Instantiated,
            PluginState::Disposed => PluginStatus::Disposed,
        }
    }

    /// Get the plugin, constructing it on first call.
    ///
    /// Returns `Ok(None)` once the registration has been disposed. A failed
    /// construction leaves the registration in the `Registered` state, so
    /// the next call tries again.
    pub fn plugin(&self, services: &Services) -> Result<Option<Arc<dyn EventPlugin>>> {
        let mut state = self.lock_state();
        match &*state {
            PluginState::Instantiated(plugin) => Ok(Some(Arc::clone(plugin))),
            PluginState::Disposed => Ok(None),
            PluginState::Registered => {
                let factory = self.factory.as_ref().ok_or_else(|| {
                    Error::Internal(format!("plugin {} has no constructor", self.key))
                })?;

                debug!(plugin = %self.key, "constructing plugin");
                match factory(services) {
                    Ok(plugin) => {
                        *state = PluginState::Instantiated(Arc::clone(&plugin));
                        Ok(Some(plugin))
                    }
                    Err(e) => {
                        warn!(plugin = %self.key, error = %e, "plugin construction failed");
                        Err(match e {
                            Error::PluginConstructionFailed { .. } => e,
                            other => Error::construction_failed(&self.key, other.to_string()),
                        })
                    }
                }
            }
        }
    }

    /// Move to `Disposed`, disposing the instance if one was constructed.
    ///
    /// Returns true if a plugin instance was disposed.
    fn dispose(&self) -> bool {
        let mut state = self.lock_state();
        match std::mem::replace(&mut *state, PluginState::Disposed) {
            PluginState::Instantiated(plugin) => {
                debug!(plugin = %self.key, "disposing plugin");
                plugin.dispose();
                true
            }
            PluginState::Registered | PluginState::Disposed => false,
        }
    }
}

impl fmt::Debug for PluginRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRegistration")
            .field("key", &self.key)
            .field("priority", &self.priority)
            .field("status", &self.status())
            .finish()
    }
}

impl fmt::Display for PluginRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.key, self.priority)
    }
}

/// Plugin registry.
///
/// Entries live in an insertion-ordered arena; [`plugins`](Self::plugins)
/// sorts them by priority on every call.
#[derive(Default)]
pub struct PluginRegistry {
    /// Registered plugins, in registration order
    plugins: IndexMap<String, Arc<PluginRegistration>>,
}

impl PluginRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, registration: PluginRegistration) {
        debug!(
            plugin = %registration.key,
            priority = registration.priority,
            "registering plugin"
        );
        let key = registration.key.clone();
        if let Some(previous) = self.plugins.insert(key, Arc::new(registration)) {
            previous.dispose();
        }
    }

    /// Register a closure plugin. Replaces any plugin with the same key.
    pub fn add_plugin_fn<F>(&mut self, key: &str, priority: i32, action: F)
    where
        F: Fn(&mut EventPluginContext) + Send + Sync + 'static,
    {
        self.add_plugin_instance(key, priority, Arc::new(ActionPlugin::new(action)));
    }

    /// Register a pre-built plugin instance. Replaces any plugin with the same key.
    pub fn add_plugin_instance(&mut self, key: &str, priority: i32, plugin: Arc<dyn EventPlugin>) {
        self.insert(PluginRegistration::instance(key, priority, plugin));
    }

    /// Register a plugin type at its declared priority.
    pub fn add_plugin<T: PluginType>(&mut self) {
        self.add_plugin_with_priority::<T>(T::PRIORITY);
    }

    /// Register a plugin type at an explicit priority.
    pub fn add_plugin_with_priority<T: PluginType>(&mut self, priority: i32) {
        let factory: PluginFactory = Box::new(|services: &Services| {
            let plugin: Arc<dyn EventPlugin> = Arc::new(T::construct(services)?);
            Ok(plugin)
        });
        self.insert(PluginRegistration::lazy(T::key(), priority, factory));
    }

    /// Unregister a plugin by key.
    ///
    /// Returns true if a registration was removed.
    pub fn remove_plugin(&mut self, key: &str) -> bool {
        match self.plugins.shift_remove(key) {
            Some(registration) => {
                debug!(plugin = %key, "removing plugin");
                registration.dispose();
                true
            }
            None => false,
        }
    }

    /// Unregister a plugin type.
    pub fn remove_plugin_type<T: PluginType>(&mut self) -> bool {
        self.remove_plugin(T::key())
    }

    /// Remove every plugin.
    pub fn clear(&mut self) {
        for (_, registration) in self.plugins.drain(..) {
            registration.dispose();
        }
    }

    /// Registrations ordered by ascending priority, ties in registration order.
    pub fn plugins(&self) -> Vec<Arc<PluginRegistration>> {
        let mut plugins: Vec<Arc<PluginRegistration>> = self.plugins.values().cloned().collect();
        plugins.sort_by_key(|p| p.priority);
        plugins
    }

    /// Get a registration by key.
    pub fn get(&self, key: &str) -> Option<Arc<PluginRegistration>> {
        self.plugins.get(key).cloned()
    }

    /// Is a plugin registered under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.plugins.contains_key(key)
    }

    /// Get plugin count.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// No plugins registered.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl Drop for PluginRegistry {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.plugins()).finish()
    }
}
