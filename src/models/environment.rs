//! Machine and runtime descriptor attached to session events.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Snapshot of the host environment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentInfo {
    /// Logical processor count
    pub processor_count: usize,
    /// Operating system family
    pub os_name: String,
    /// Operating system version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_version: Option<String>,
    /// CPU architecture
    pub architecture: String,
    /// Host name
    pub machine_name: String,
    /// Executable name
    pub process_name: String,
    /// Process id
    pub process_id: u32,
    /// Runtime / SDK version
    pub runtime_version: String,
    /// Command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_line: Option<String>,
    /// Extended data
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
}
