//! Attaches the host environment to session-start events.

use crate::core::Result;
use crate::models::known_data_keys;
use crate::plugin::builtin::priorities;
use crate::plugin::context::EventPluginContext;
use crate::plugin::interface::{EventPlugin, PluginType};
use crate::services::{EnvironmentInfoCollector, Services};
use std::fmt;
use std::sync::Arc;

/// Stores an [`EnvironmentInfo`](crate::models::EnvironmentInfo) snapshot
/// under `@environment` on session events that do not carry one yet.
pub struct EnvironmentInfoPlugin {
    collector: Arc<dyn EnvironmentInfoCollector>,
}

impl EnvironmentInfoPlugin {
    /// Create the plugin over a collector.
    pub fn new(collector: Arc<dyn EnvironmentInfoCollector>) -> Self {
        Self { collector }
    }
}

impl EventPlugin for EnvironmentInfoPlugin {
    fn run(&self, context: &mut EventPluginContext) -> Result<()> {
        if !context.event.is_session_start()
            || context.event.data.contains_key(known_data_keys::ENVIRONMENT_INFO)
        {
            return Ok(());
        }

        let info = self.collector.collect();
        context.event.set_property(known_data_keys::ENVIRONMENT_INFO, &info)
    }
}

impl PluginType for EnvironmentInfoPlugin {
    const PRIORITY: i32 = priorities::ENVIRONMENT_INFO;

    fn construct(services: &Services) -> Result<Self> {
        Ok(Self::new(services.environment()))
    }
}

impl fmt::Debug for EnvironmentInfoPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentInfoPlugin").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Client;
    use crate::config::Configuration;
    use crate::models::{known_types, EnvironmentInfo, Event};
    use crate::services::{StaticEnvironmentCollector, SystemEnvironmentCollector};

    fn plugin() -> EnvironmentInfoPlugin {
        EnvironmentInfoPlugin::new(Arc::new(SystemEnvironmentCollector::new()))
    }

    #[test]
    fn test_incorrect_event_types() {
        let client = Client::new();
        let plugin = plugin();

        for event_type in [
            known_types::ERROR,
            known_types::FEATURE_USAGE,
            known_types::LOG,
            known_types::NOT_FOUND,
            known_types::SESSION_END,
            known_types::SESSION_HEARTBEAT,
        ] {
            let mut context = EventPluginContext::new(&client, Event::with_type(event_type));
            plugin.run(&mut context).unwrap();
            assert!(context.event.data.is_empty(), "{} should not be enriched", event_type);
        }

        let mut context = EventPluginContext::new(&client, Event::new());
        plugin.run(&mut context).unwrap();
        assert!(context.event.data.is_empty());
    }

    #[test]
    fn test_session_start() {
        let client = Client::new();
        let mut context = EventPluginContext::new(&client, Event::with_type(known_types::SESSION));
        plugin().run(&mut context).unwrap();

        assert_eq!(context.event.data.len(), 1);
        assert!(context.event.environment_info().is_some());
    }

    #[test]
    fn test_existing_environment_is_kept() {
        let info = EnvironmentInfo {
            machine_name: "build-01".into(),
            ..Default::default()
        };
        let plugin = EnvironmentInfoPlugin::new(Arc::new(StaticEnvironmentCollector::new(info)));

        let client = Client::new();
        let mut event = Event::with_type(known_types::SESSION);
        event
            .set_property(
                known_data_keys::ENVIRONMENT_INFO,
                &EnvironmentInfo {
                    machine_name: "from-host".into(),
                    ..Default::default()
                },
            )
            .unwrap();
        let mut context = EventPluginContext::new(&client, event);
        plugin.run(&mut context).unwrap();

        assert_eq!(context.event.data.len(), 1);
        assert_eq!(context.event.environment_info().unwrap().machine_name, "from-host");
    }

    #[test]
    fn test_constructed_from_services() {
        let info = EnvironmentInfo {
            machine_name: "build-01".into(),
            processor_count: 4,
            ..Default::default()
        };
        let services = Services::new().with_environment_collector(StaticEnvironmentCollector::new(info));
        let client = Client::with_configuration(Configuration::with_services(services));

        let context = client
            .enrich(Event::with_type(known_types::SESSION), Default::default())
            .unwrap();
        let attached = context.event.environment_info().unwrap();
        assert_eq!(attached.machine_name, "build-01");
        assert_eq!(attached.processor_count, 4);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_runs_from_one_template() {
        let client = Client::new();
        let plugin = Arc::new(plugin());
        let template = Arc::new(Event::with_type(known_types::SESSION));

        let handles: Vec<_> = (0..10_000)
            .map(|_| {
                let client = client.clone();
                let plugin = Arc::clone(&plugin);
                let template = Arc::clone(&template);
                tokio::task::spawn_blocking(move || {
                    let mut context = EventPluginContext::new(&client, (*template).clone());
                    plugin.run(&mut context).unwrap();
                    context.event.data.len()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap(), 1);
        }
        assert!(template.data.is_empty());
    }
}
