//! Plugin interface definition.
//!
//! Defines the interface plugins must implement.

use crate::core::Result;
use crate::plugin::context::EventPluginContext;
use crate::services::Services;
use std::fmt;

/// Priority used when neither the caller nor the plugin type declares one.
pub const DEFAULT_PRIORITY: i32 = 0;

/// Plugin trait that all enrichment plugins must implement.
///
/// One instance is shared by every pipeline run, possibly on many threads
/// at once. `run` must confine its writes to the context it is given.
pub trait EventPlugin: Send + Sync {
    /// Enrich (or cancel) one event.
    fn run(&self, context: &mut EventPluginContext) -> Result<()>;

    /// Release resources. Called at most once, and only if the plugin was
    /// constructed by the registry or handed to it as an instance.
    fn dispose(&self) {}
}

/// A plugin type the registry can construct lazily.
///
/// Registering a `PluginType` stores a constructor, not an instance; the
/// constructor runs the first time a pipeline run reaches the plugin.
pub trait PluginType: EventPlugin + Sized + 'static {
    /// Declared execution priority. Lower runs earlier.
    const PRIORITY: i32 = DEFAULT_PRIORITY;

    /// Build the plugin from the available collaborators.
    fn construct(services: &Services) -> Result<Self>;

    /// Registry key for this type.
    fn key() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Adapts a closure into a plugin.
pub struct ActionPlugin<F> {
    action: F,
}

impl<F> ActionPlugin<F>
where
    F: Fn(&mut EventPluginContext) + Send + Sync,
{
    /// Wrap a closure.
    pub fn new(action: F) -> Self {
        Self { action }
    }
}

impl<F> EventPlugin for ActionPlugin<F>
where
    F: Fn(&mut EventPluginContext) + Send + Sync,
{
    fn run(&self, context: &mut EventPluginContext) -> Result<()> {
        (self.action)(context);
        Ok(())
    }
}

impl<F> fmt::Debug for ActionPlugin<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionPlugin").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Client;
    use crate::models::Event;

    struct PluginWithNoPriority;

    impl EventPlugin for PluginWithNoPriority {
        fn run(&self, _context: &mut EventPluginContext) -> Result<()> {
            Ok(())
        }
    }

    impl PluginType for PluginWithNoPriority {
        fn construct(_services: &Services) -> Result<Self> {
            Ok(Self)
        }
    }

    struct PluginWithPriority11;

    impl EventPlugin for PluginWithPriority11 {
        fn run(&self, _context: &mut EventPluginContext) -> Result<()> {
            Ok(())
        }
    }

    impl PluginType for PluginWithPriority11 {
        const PRIORITY: i32 = 11;

        fn construct(_services: &Services) -> Result<Self> {
            Ok(Self)
        }
    }

    #[test]
    fn test_declared_priority() {
        assert_eq!(PluginWithNoPriority::PRIORITY, DEFAULT_PRIORITY);
        assert_eq!(PluginWithPriority11::PRIORITY, 11);
    }

    #[test]
    fn test_type_keys_are_distinct() {
        assert_ne!(PluginWithNoPriority::key(), PluginWithPriority11::key());
        assert!(PluginWithPriority11::key().ends_with("PluginWithPriority11"));
    }

    #[test]
    fn test_action_plugin() {
        let plugin = ActionPlugin::new(|ctx: &mut EventPluginContext| {
            ctx.event.set_version("1.0.0.0");
        });

        let client = Client::new();
        let mut context = EventPluginContext::new(&client, Event::new());
        plugin.run(&mut context).unwrap();
        assert_eq!(context.event.version(), Some("1.0.0.0"));
    }
}
