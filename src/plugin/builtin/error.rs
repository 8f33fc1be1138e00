//! Attaches the detailed error model for a captured exception.

use crate::core::Result;
use crate::models::error::known_error_data_keys;
use crate::models::{known_data_keys, known_types, ErrorInfo};
use crate::plugin::builtin::extra_properties::extra_properties_json;
use crate::plugin::builtin::priorities;
use crate::plugin::context::EventPluginContext;
use crate::plugin::interface::{EventPlugin, PluginType};
use crate::services::Services;
use serde_json::Value;

/// Converts the captured exception into an [`ErrorInfo`] with a frame-level
/// call stack and stores it under `@error`.
#[derive(Debug, Default)]
pub struct ErrorPlugin;

impl EventPlugin for ErrorPlugin {
    fn run(&self, context: &mut EventPluginContext) -> Result<()> {
        let config = context.configuration();
        let exception = match context.context_data.exception() {
            Some(exception) => exception,
            None => return Ok(()),
        };

        let mut error = ErrorInfo::from_exception(exception);
        if let Some(json) = extra_properties_json(exception, config.exclusions())? {
            error
                .data
                .insert(known_error_data_keys::EXTRA_PROPERTIES.to_string(), Value::String(json));
        }
        if context.context_data.is_unhandled_error() {
            error
                .data
                .insert(known_error_data_keys::UNHANDLED.to_string(), Value::Bool(true));
        }

        context.event.event_type = Some(known_types::ERROR.to_string());
        context.event.set_property(known_data_keys::ERROR, &error)
    }
}

impl PluginType for ErrorPlugin {
    const PRIORITY: i32 = priorities::ERROR;

    fn construct(_services: &Services) -> Result<Self> {
        Ok(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Client;
    use crate::models::{CapturedException, Event, StackFrame};

    fn my_application_exception() -> CapturedException {
        CapturedException::new("MyApplicationException", "Test")
            .with_property("IgnoredProperty", "Test")
            .with_property("RandomValue", "Test")
    }

    fn run_with(client: &Client, exception: CapturedException) -> EventPluginContext {
        let mut context = EventPluginContext::new(client, Event::new());
        context.context_data.set_exception(exception);
        ErrorPlugin.run(&mut context).unwrap();
        context
    }

    #[test]
    fn test_extra_properties() {
        let client = Client::new();

        let context = run_with(&client, my_application_exception());
        let error = context.event.error().unwrap();
        assert_eq!(
            error.extra_properties(),
            Some(r#"{"ignored_property":"Test","random_value":"Test"}"#)
        );

        client.configuration().add_data_exclusions(["Ignore*"]);
        let context = run_with(&client, my_application_exception());
        let error = context.event.error().unwrap();
        assert_eq!(error.extra_properties(), Some(r#"{"random_value":"Test"}"#));
    }

    #[test]
    fn test_no_exception_is_noop() {
        let client = Client::new();
        let mut context = EventPluginContext::new(&client, Event::new());
        ErrorPlugin.run(&mut context).unwrap();

        assert!(context.event.data.is_empty());
        assert!(context.event.event_type.is_none());
    }

    #[test]
    fn test_error_model_shape() {
        let client = Client::new();
        let exception = CapturedException::new("TimeoutError", "request timed out")
            .with_code("E_TIMEOUT")
            .with_stack_frame(StackFrame::new("fetch").with_location("src/http.rs", 88))
            .with_inner(CapturedException::new("IoError", "connection reset"));

        let mut context = EventPluginContext::new(&client, Event::new());
        context.context_data.set_exception(exception);
        context.context_data.mark_as_unhandled_error();
        ErrorPlugin.run(&mut context).unwrap();

        assert!(context.event.is_error());
        let error = context.event.error().unwrap();
        assert_eq!(error.error_type, "TimeoutError");
        assert_eq!(error.code.as_deref(), Some("E_TIMEOUT"));
        assert_eq!(error.stack_trace[0].line_number, Some(88));
        assert_eq!(error.inner.as_ref().unwrap().message, "connection reset");
        assert_eq!(error.data[known_error_data_keys::UNHANDLED], true);
        assert!(error.extra_properties().is_none());
    }
}
