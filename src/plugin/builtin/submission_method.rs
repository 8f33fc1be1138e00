//! Records how an event was submitted.

use crate::core::Result;
use crate::models::known_data_keys;
use crate::plugin::builtin::priorities;
use crate::plugin::context::EventPluginContext;
use crate::plugin::interface::{EventPlugin, PluginType};
use crate::services::Services;
use serde_json::Value;

/// Copies the submission method from context data onto the event.
#[derive(Debug, Default)]
pub struct SubmissionMethodPlugin;

impl EventPlugin for SubmissionMethodPlugin {
    fn run(&self, context: &mut EventPluginContext) -> Result<()> {
        let method = match context.context_data.submission_method() {
            Some(method) if !method.is_empty() => method,
            _ => return Ok(()),
        };

        if !context.event.data.contains_key(known_data_keys::SUBMISSION_METHOD) {
            context.event.data.insert(
                known_data_keys::SUBMISSION_METHOD.to_string(),
                Value::String(method.to_string()),
            );
        }
        Ok(())
    }
}

impl PluginType for SubmissionMethodPlugin {
    const PRIORITY: i32 = priorities::SUBMISSION_METHOD;

    fn construct(_services: &Services) -> Result<Self> {
        Ok(Self)
    }
}
