//! Attaches the simplified error model for a captured exception.

use crate::core::Result;
use crate::models::error::known_error_data_keys;
use crate::models::{known_data_keys, known_types, SimpleErrorInfo};
use crate::plugin::builtin::extra_properties::extra_properties_json;
use crate::plugin::builtin::priorities;
use crate::plugin::context::EventPluginContext;
use crate::plugin::interface::{EventPlugin, PluginType};
use crate::services::Services;
use serde_json::Value;

/// Like [`ErrorPlugin`](super::ErrorPlugin), but flattens the call stack to
/// text and stores a [`SimpleErrorInfo`] under `@simple_error`.
///
/// Not registered by default; swap it in for hosts that cannot resolve frames.
#[derive(Debug, Default)]
pub struct SimpleErrorPlugin;

impl EventPlugin for SimpleErrorPlugin {
    fn run(&self, context: &mut EventPluginContext) -> Result<()> {
        let config = context.configuration();
        let exception = match context.context_data.exception() {
            Some(exception) => exception,
            None => return Ok(()),
        };

        let mut error = SimpleErrorInfo::from_exception(exception);
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
        context.event.set_property(known_data_keys::SIMPLE_ERROR, &error)
    }
}

impl PluginType for SimpleErrorPlugin {
    const PRIORITY: i32 = priorities::ERROR;

    fn construct(_services: &Services) -> Result<Self> {
        Ok(Self)
    }
}
