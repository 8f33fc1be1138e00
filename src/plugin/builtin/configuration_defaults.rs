//! Merges the configured default tags and data into every event.

use crate::core::Result;
use crate::plugin::builtin::priorities;
use crate::plugin::context::EventPluginContext;
use crate::plugin::interface::{EventPlugin, PluginType};
use crate::services::Services;

/// Adds default tags and default data without overwriting anything already
/// on the event. Running it again on the same event changes nothing.
#[derive(Debug, Default)]
pub struct ConfigurationDefaultsPlugin;

impl EventPlugin for ConfigurationDefaultsPlugin {
    fn run(&self, context: &mut EventPluginContext) -> Result<()> {
        let config = context.configuration();

        for tag in config.default_tags() {
            if !context.event.tags.contains(tag) {
                context.event.tags.insert(tag.clone());
            }
        }

        let exclusions = config.exclusions();
        for (key, value) in config.default_data() {
            if exclusions.is_excluded(key) || context.event.data.contains_key(key) {
                continue;
            }
            context.event.data.insert(key.clone(), value.clone());
        }

        Ok(())
    }
}

impl PluginType for ConfigurationDefaultsPlugin {
    const PRIORITY: i32 = priorities::CONFIGURATION_DEFAULTS;

    fn construct(_services: &Services) -> Result<Self> {
        Ok(Self)
    }
}
