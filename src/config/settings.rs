//! Configuration settings and immutable per-run snapshots.

use crate::config::exclusion::ExclusionMatcher;
use crate::core::{Error, Result};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Client-level enrichment settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tags added to every event
    pub default_tags: IndexSet<String>,
    /// Data added to every event unless already present
    pub default_data: Map<String, Value>,
    /// Wildcard patterns for data keys that must never be attached
    pub data_exclusions: Vec<String>,
    /// Assign reference ids to error events
    pub use_reference_ids: bool,
    /// Backfill the user identity with the OS user name
    pub include_environment_user: bool,
}

impl Settings {
    /// Create empty settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidConfiguration(e.to_string()))
    }

    /// Serialize settings to JSON text.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Read-only view of the settings at one point in time.
///
/// Plugins read configuration exclusively through snapshots, so a
/// concurrent settings change never becomes visible halfway through
/// a plugin's work.
#[derive(Clone, Debug, Default)]
pub struct ConfigSnapshot {
    settings: Settings,
    exclusions: ExclusionMatcher,
}

impl ConfigSnapshot {
    /// Build a snapshot, compiling the exclusion patterns.
    pub fn new(settings: Settings) -> Self {
        let exclusions = ExclusionMatcher::from_patterns(&settings.data_exclusions);
        Self {
            settings,
            exclusions,
        }
    }

    /// The settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Compiled exclusion matcher.
    pub fn exclusions(&self) -> &ExclusionMatcher {
        &self.exclusions
    }

    /// Default tags.
    pub fn default_tags(&self) -> &IndexSet<String> {
        &self.settings.default_tags
    }

    /// Default data.
    pub fn default_data(&self) -> &Map<String, Value> {
        &self.settings.default_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_json() {
        let settings = Settings::from_json(
            r#"{
                "default_tags": ["Critical", "Critical", "Internal"],
                "default_data": {"Message": "Test"},
                "data_exclusions": ["Ignore*"],
                "use_reference_ids": true
            }"#,
        )
        .unwrap();

        assert_eq!(settings.default_tags.len(), 2);
        assert_eq!(settings.default_data["Message"], "Test");
        assert!(settings.use_reference_ids);
        assert!(!settings.include_environment_user);
    }

    #[test]
    fn test_settings_from_invalid_json() {
        let err = Settings::from_json(r#"{"data_exclusions": "Ignore*"}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_settings_roundtrip_keeps_data_order() {
        let mut settings = Settings::new();
        settings.default_data.insert("zeta".into(), Value::from(1));
        settings.default_data.insert("alpha".into(), Value::from(2));

        let parsed = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        let keys: Vec<&String> = parsed.default_data.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_snapshot_compiles_exclusions() {
        let mut settings = Settings::new();
        settings.data_exclusions.push("Ignore*".into());
        let snapshot = ConfigSnapshot::new(settings);
        assert!(snapshot.exclusions().is_excluded("Ignored"));
        assert!(!snapshot.exclusions().is_excluded("Message"));
    }
}
