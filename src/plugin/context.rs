//! Per-event plugin context.

use crate::client::Client;
use crate::config::ConfigSnapshot;
use crate::models::{CapturedException, Event};
use crate::services::Services;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Well-known keys in [`ContextData`].
pub mod known_context_keys {
    pub const EXCEPTION: &str = "@@_Exception";
    pub const IS_UNHANDLED_ERROR: &str = "@@_IsUnhandledError";
    pub const SUBMISSION_METHOD: &str = "@@_SubmissionMethod";
}

/// Ambient typed values travelling with one event, but never serialized
/// onto it (captured exceptions, submission hints, host objects).
#[derive(Default)]
pub struct ContextData {
    values: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl ContextData {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, replacing any value under the same key.
    pub fn set<T: Any + Send + Sync>(&mut self, key: &str, value: T) {
        self.values.insert(key.to_string(), Box::new(value));
    }

    /// Get a value if present and of type `T`.
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.values.get(key).and_then(|v| v.downcast_ref::<T>())
    }

    /// Remove a value.
    pub fn remove(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }

    /// Is a value stored under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// No values stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Attach the exception being reported.
    pub fn set_exception(&mut self, exception: CapturedException) {
        self.set(known_context_keys::EXCEPTION, exception);
    }

    /// The exception being reported, if any.
    pub fn exception(&self) -> Option<&CapturedException> {
        self.get(known_context_keys::EXCEPTION)
    }

    /// Mark the exception as not handled by the host application.
    pub fn mark_as_unhandled_error(&mut self) {
        self.set(known_context_keys::IS_UNHANDLED_ERROR, true);
    }

    /// Was the exception unhandled.
    pub fn is_unhandled_error(&self) -> bool {
        self.get::<bool>(known_context_keys::IS_UNHANDLED_ERROR)
            .copied()
            .unwrap_or(false)
    }

    /// Record how the event was submitted (e.g. `"unhandled"`, `"manual"`).
    pub fn set_submission_method(&mut self, method: &str) {
        self.set(known_context_keys::SUBMISSION_METHOD, method.to_string());
    }

    /// How the event was submitted.
    pub fn submission_method(&self) -> Option<&str> {
        self.get::<String>(known_context_keys::SUBMISSION_METHOD)
            .map(String::as_str)
    }
}

impl fmt::Debug for ContextData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}

/// Mutable state for one pipeline run.
///
/// Plugins mutate `event` and `context_data`, or set `cancel` to stop the
/// remaining plugins. A context is used for exactly one run.
pub struct EventPluginContext {
    client: Client,
    /// The event being enriched
    pub event: Event,
    /// Ambient data for this event
    pub context_data: ContextData,
    /// Stop the pipeline before the next plugin
    pub cancel: bool,
}

impl EventPluginContext {
    /// Create a context for `event`.
    pub fn new(client: &Client, event: Event) -> Self {
        Self::with_context_data(client, event, ContextData::new())
    }

    /// Create a context with pre-populated context data.
    pub fn with_context_data(client: &Client, event: Event, context_data: ContextData) -> Self {
        Self {
            client: client.clone(),
            event,
            context_data,
            cancel: false,
        }
    }

    /// The owning client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Current configuration snapshot.
    pub fn configuration(&self) -> Arc<ConfigSnapshot> {
        self.client.configuration().snapshot()
    }

    /// Collaborator services.
    pub fn services(&self) -> &Services {
        self.client.configuration().services()
    }

    /// Consume the context, returning the event.
    pub fn into_event(self) -> Event {
        self.event
    }
}

impl fmt::Debug for EventPluginContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventPluginContext")
            .field("event", &self.event)
            .field("context_data", &self.context_data)
            .field("cancel", &self.cancel)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_data_typed_access() {
        let mut data = ContextData::new();
        data.set("attempt", 3u32);

        assert_eq!(data.get::<u32>("attempt"), Some(&3));
        assert!(data.get::<String>("attempt").is_none());
        assert!(data.get::<u32>("missing").is_none());
        assert!(data.remove("attempt"));
        assert!(data.is_empty());
    }

    #[test]
    fn test_known_context_values() {
        let mut data = ContextData::new();
        assert!(data.exception().is_none());
        assert!(!data.is_unhandled_error());

        data.set_exception(CapturedException::new("IoError", "disk full"));
        data.mark_as_unhandled_error();
        data.set_submission_method("unhandled");

        assert_eq!(data.exception().unwrap().message, "disk full");
        assert!(data.is_unhandled_error());
        assert_eq!(data.submission_method(), Some("unhandled"));
        assert_eq!(data.len(), 3);
    }

    #[test]
    fn test_new_context_is_not_cancelled() {
        let client = Client::new();
        let context = EventPluginContext::new(&client, Event::new());
        assert!(!context.cancel);
        assert!(context.context_data.is_empty());
        assert!(context.configuration().default_tags().is_empty());
    }
}
