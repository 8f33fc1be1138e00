//! Backfills the user identity with the operating-system user.

use crate::core::Result;
use crate::plugin::builtin::priorities;
use crate::plugin::context::EventPluginContext;
use crate::plugin::interface::{EventPlugin, PluginType};
use crate::services::{Services, UserNameProvider};
use std::fmt;
use std::sync::Arc;

/// Sets the event's user identity to the current OS user when the event
/// has no user yet.
///
/// An existing identity is never replaced. A user entry that carries only
/// a name is treated as deliberate and left alone.
pub struct SetEnvironmentUserPlugin {
    provider: Arc<dyn UserNameProvider>,
}

impl SetEnvironmentUserPlugin {
    /// Create the plugin over a user-name provider.
    pub fn new(provider: Arc<dyn UserNameProvider>) -> Self {
        Self { provider }
    }
}

impl EventPlugin for SetEnvironmentUserPlugin {
    fn run(&self, context: &mut EventPluginContext) -> Result<()> {
        let name = match context.event.user_identity() {
            None => None,
            Some(user) if user.has_identity() => return Ok(()),
            Some(user) if user.name.as_deref().map_or(false, |n| !n.trim().is_empty()) => {
                return Ok(())
            }
            Some(user) => user.name,
        };

        if let Some(identity) = self.provider.current_user_name() {
            context
                .event
                .set_user_identity(Some(identity.as_str()), name.as_deref());
        }
        Ok(())
    }
}

impl PluginType for SetEnvironmentUserPlugin {
    const PRIORITY: i32 = priorities::SET_ENVIRONMENT_USER;

    fn construct(services: &Services) -> Result<Self> {
        Ok(Self::new(services.user()))
    }
}

impl fmt::Debug for SetEnvironmentUserPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetEnvironmentUserPlugin").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Client;
    use crate::config::Configuration;
    use crate::models::Event;
    use crate::services::{StaticUserNameProvider, SystemUserNameProvider};

    #[test]
    fn test_will_set_identity() {
        let client = Client::new();
        let plugin = SetEnvironmentUserPlugin::new(Arc::new(StaticUserNameProvider::new("jdoe")));

        let mut context = EventPluginContext::new(&client, Event::new());
        plugin.run(&mut context).unwrap();

        let user = context.event.user_identity().unwrap();
        assert_eq!(user.identity.as_deref(), Some("jdoe"));
        assert!(user.name.is_none());
    }

    #[test]
    fn test_will_set_identity_from_system() {
        let expected = SystemUserNameProvider.current_user_name();
        let client = Client::new();
        let plugin = SetEnvironmentUserPlugin::new(Arc::new(SystemUserNameProvider));

        let mut context = EventPluginContext::new(&client, Event::new());
        plugin.run(&mut context).unwrap();

        let identity = context.event.user_identity().and_then(|u| u.identity);
        assert_eq!(identity, expected);
    }

    #[test]
    fn test_will_not_update_identity() {
        let client = Client::new();
        let plugin = SetEnvironmentUserPlugin::new(Arc::new(StaticUserNameProvider::new("jdoe")));

        let mut event = Event::new();
        event.set_user_identity(None, Some("Blake"));
        let mut context = EventPluginContext::new(&client, event);
        plugin.run(&mut context).unwrap();

        let user = context.event.user_identity().unwrap();
        assert!(user.identity.is_none());
        assert_eq!(user.name.as_deref(), Some("Blake"));
    }

    #[test]
    fn test_existing_identity_is_kept() {
        let client = Client::new();
        let plugin = SetEnvironmentUserPlugin::new(Arc::new(StaticUserNameProvider::new("jdoe")));

        let mut event = Event::new();
        event.set_user_identity(Some("blake@example.com"), None);
        let mut context = EventPluginContext::new(&client, event);
        plugin.run(&mut context).unwrap();

        let user = context.event.user_identity().unwrap();
        assert_eq!(user.identity.as_deref(), Some("blake@example.com"));
    }

    #[test]
    fn test_unknown_user_is_noop() {
        let client = Client::new();
        let plugin = SetEnvironmentUserPlugin::new(Arc::new(StaticUserNameProvider::unknown()));

        let mut context = EventPluginContext::new(&client, Event::new());
        plugin.run(&mut context).unwrap();
        assert!(context.event.data.is_empty());
    }

    #[test]
    fn test_enabled_through_configuration() {
        let services = Services::new().with_user_name_provider(StaticUserNameProvider::new("svc"));
        let configuration = Configuration::with_services(services);
        configuration.include_environment_user();
        let client = Client::with_configuration(configuration);

        let context = client.enrich(Event::new(), Default::default()).unwrap();
        let user = context.event.user_identity().unwrap();
        assert_eq!(user.identity.as_deref(), Some("svc"));
    }
}
