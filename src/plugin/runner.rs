//! Executes the registered plugins against one context.

use crate::config::Configuration;
use crate::core::Result;
use crate::plugin::context::EventPluginContext;
use crate::plugin::interface::EventPlugin;
use crate::plugin::registry::PluginRegistration;
use std::sync::Arc;
use tracing::{debug, trace};

/// Runs the plugin pipeline.
pub struct PluginRunner;

impl PluginRunner {
    /// Run every registered plugin against `context`, in priority order.
    ///
    /// The plugin order is fixed when the run starts. Iteration stops before
    /// the next plugin once `context.cancel` is set. A plugin error is
    /// returned as-is; changes made by earlier plugins are kept. A plugin
    /// removed mid-run is skipped; one replaced mid-run runs in its new form.
    pub fn run(context: &mut EventPluginContext) -> Result<()> {
        let configuration = Arc::clone(context.client().configuration());
        let registrations = configuration.plugins();

        for registration in registrations {
            if context.cancel {
                debug!(next = %registration.key(), "event cancelled, skipping remaining plugins");
                break;
            }

            let plugin = match registration.plugin(configuration.services())? {
                Some(plugin) => plugin,
                None => match Self::replacement(&configuration, &registration)? {
                    Some(plugin) => plugin,
                    None => {
                        trace!(plugin = %registration.key(), "skipping removed plugin");
                        continue;
                    }
                },
            };

            trace!(
                plugin = %registration.key(),
                priority = registration.priority(),
                "running plugin"
            );
            plugin.run(context)?;
        }

        Ok(())
    }

    /// Resolve a disposed registration against the live registry.
    ///
    /// A key re-registered after the run started is served by the new
    /// registration, in the slot of the one it replaced. A removed key yields
    /// `None`.
    fn replacement(
        configuration: &Configuration,
        disposed: &Arc<PluginRegistration>,
    ) -> Result<Option<Arc<dyn EventPlugin>>> {
        match configuration.plugin(disposed.key()) {
            Some(current) if !Arc::ptr_eq(&current, disposed) => {
                debug!(plugin = %current.key(), "plugin replaced during run, using new registration");
                current.plugin(configuration.services())
            }
            _ => Ok(None),
        }
    }
}
