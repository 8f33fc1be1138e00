//! Client handle tying configuration and pipeline together.

use crate::config::Configuration;
use crate::core::{now, Result};
use crate::models::Event;
use crate::plugin::context::{ContextData, EventPluginContext};
use crate::plugin::runner::PluginRunner;
use std::fmt;
use std::sync::Arc;

/// Cheap, clonable handle over a shared [`Configuration`].
#[derive(Clone)]
pub struct Client {
    configuration: Arc<Configuration>,
}

impl Client {
    /// Create a client with the default configuration and built-in plugins.
    pub fn new() -> Self {
        Self::with_configuration(Configuration::new())
    }

    /// Create a client over an existing configuration.
    pub fn with_configuration(configuration: Configuration) -> Self {
        Self {
            configuration: Arc::new(configuration),
        }
    }

    /// Shared configuration.
    pub fn configuration(&self) -> &Arc<Configuration> {
        &self.configuration
    }

    /// Create an event of the given type, stamped with the current time.
    pub fn create_event(&self, event_type: &str) -> Event {
        let mut event = Event::with_type(event_type);
        event.date = Some(now());
        event
    }

    /// Run the pipeline over `event`.
    ///
    /// The returned context carries the enriched event and whether a plugin
    /// cancelled it.
    pub fn enrich(&self, event: Event, context_data: ContextData) -> Result<EventPluginContext> {
        let mut context = EventPluginContext::with_context_data(self, event, context_data);
        PluginRunner::run(&mut context)?;
        Ok(context)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("configuration", &self.configuration)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{known_tags, known_types, CapturedException};

    #[test]
    fn test_create_event() {
        let client = Client::new();
        let event = client.create_event(known_types::LOG);
        assert!(event.is_type(known_types::LOG));
        assert!(event.date.is_some());
    }

    #[test]
    fn test_enrich_error_event() {
        let client = Client::new();
        client.configuration().add_default_tags([known_tags::INTERNAL]);
        client.configuration().use_reference_ids();

        let mut data = ContextData::new();
        data.set_exception(CapturedException::new("IoError", "disk full"));
        data.mark_as_unhandled_error();
        data.set_submission_method("unhandled");

        let context = client.enrich(client.create_event(known_types::ERROR), data).unwrap();
        assert!(!context.cancel);

        let event = context.into_event();
        assert!(event.is_error());
        assert!(event.tags.contains(known_tags::INTERNAL));
        assert_eq!(event.error().unwrap().message, "disk full");
        assert_eq!(event.submission_method(), Some("unhandled"));
        assert!(event.reference_id.is_some());
    }

    #[test]
    fn test_clones_share_configuration() {
        let client = Client::new();
        let other = client.clone();
        other.configuration().add_default_tags(["shared"]);

        assert!(Arc::ptr_eq(client.configuration(), other.configuration()));
        assert!(client.configuration().snapshot().default_tags().contains("shared"));
    }
}
