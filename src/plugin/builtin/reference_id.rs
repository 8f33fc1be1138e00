//! Assigns client-side reference ids to error events.

use crate::core::Result;
use crate::plugin::builtin::priorities;
use crate::plugin::context::EventPluginContext;
use crate::plugin::interface::{EventPlugin, PluginType};
use crate::services::Services;
use uuid::Uuid;

/// Length of generated reference ids.
pub const REFERENCE_ID_LENGTH: usize = 10;

/// Gives each error event a short id the host can show to its users.
#[derive(Debug, Default)]
pub struct ReferenceIdPlugin;

impl ReferenceIdPlugin {
    /// Generate a new reference id.
    pub fn generate() -> String {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(REFERENCE_ID_LENGTH);
        id
    }
}

impl EventPlugin for ReferenceIdPlugin {
    fn run(&self, context: &mut EventPluginContext) -> Result<()> {
        if context.cancel || !context.event.is_error() || context.event.reference_id.is_some() {
            return Ok(());
        }

        context.event.reference_id = Some(Self::generate());
        Ok(())
    }
}

impl PluginType for ReferenceIdPlugin {
    const PRIORITY: i32 = priorities::REFERENCE_ID;

    fn construct(_services: &Services) -> Result<Self> {
        Ok(Self)
    }
}
