//! The telemetry event being enriched.

use crate::core::{Result, Timestamp};
use crate::models::environment::EnvironmentInfo;
use crate::models::error::{ErrorInfo, SimpleErrorInfo};
use crate::models::user::UserInfo;
use indexmap::IndexSet;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Well-known event types.
pub mod known_types {
    pub const ERROR: &str = "error";
    pub const FEATURE_USAGE: &str = "usage";
    pub const LOG: &str = "log";
    pub const NOT_FOUND: &str = "404";
    pub const SESSION: &str = "session";
    pub const SESSION_END: &str = "sessionend";
    pub const SESSION_HEARTBEAT: &str = "heartbeat";
}

/// Well-known event tags.
pub mod known_tags {
    pub const CRITICAL: &str = "Critical";
    pub const INTERNAL: &str = "Internal";
}

/// Well-known keys in [`Event::data`].
pub mod known_data_keys {
    pub const ERROR: &str = "@error";
    pub const SIMPLE_ERROR: &str = "@simple_error";
    pub const ENVIRONMENT_INFO: &str = "@environment";
    pub const USER_INFO: &str = "@user";
    pub const VERSION: &str = "@version";
    pub const LEVEL: &str = "@level";
    pub const SUBMISSION_METHOD: &str = "@submission_method";
}

/// A telemetry record (error, log entry, session marker, feature usage, ...).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    /// Event type, see [`known_types`]
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    /// Event source (logger name, request path, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Occurrence date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Timestamp>,
    /// Tags (set semantics, insertion order kept)
    #[serde(skip_serializing_if = "IndexSet::is_empty")]
    pub tags: IndexSet<String>,
    /// Extended data
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
    /// Client-assigned reference id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
}

impl Event {
    /// Create an empty event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an event of the given type.
    pub fn with_type(event_type: &str) -> Self {
        Self {
            event_type: Some(event_type.to_string()),
            ..Default::default()
        }
    }

    /// Set message.
    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    /// Set source.
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    /// Check the event type.
    pub fn is_type(&self, event_type: &str) -> bool {
        self.event_type.as_deref() == Some(event_type)
    }

    /// Is this an error event.
    pub fn is_error(&self) -> bool {
        self.is_type(known_types::ERROR)
    }

    /// Is this a session start event.
    pub fn is_session_start(&self) -> bool {
        self.is_type(known_types::SESSION)
    }

    /// Add tags, ignoring empty strings and duplicates.
    pub fn add_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for tag in tags {
            let tag = tag.as_ref().trim();
            if !tag.is_empty() {
                self.tags.insert(tag.to_string());
            }
        }
    }

    /// Store a serializable value under a data key.
    pub fn set_property<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        self.data.insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    /// Read a data key as a typed value.
    ///
    /// Returns `None` when the key is missing or has a different shape.
    pub fn get_property<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.data
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Set the application version.
    pub fn set_version(&mut self, version: &str) {
        self.data.insert(
            known_data_keys::VERSION.to_string(),
            Value::String(version.to_string()),
        );
    }

    /// Get the application version.
    pub fn version(&self) -> Option<&str> {
        self.data.get(known_data_keys::VERSION).and_then(Value::as_str)
    }

    /// Get the user identity.
    pub fn user_identity(&self) -> Option<UserInfo> {
        self.get_property(known_data_keys::USER_INFO)
    }

    /// Set the user identity.
    ///
    /// Passing `None` for both fields removes the user entirely.
    pub fn set_user_identity(&mut self, identity: Option<&str>, name: Option<&str>) {
        if identity.is_none() && name.is_none() {
            self.data.remove(known_data_keys::USER_INFO);
            return;
        }

        let user = UserInfo::new(identity, name);
        if let Ok(value) = serde_json::to_value(&user) {
            self.data
                .insert(known_data_keys::USER_INFO.to_string(), value);
        }
    }

    /// Get the detailed error model.
    pub fn error(&self) -> Option<ErrorInfo> {
        self.get_property(known_data_keys::ERROR)
    }

    /// Get the simplified error model.
    pub fn simple_error(&self) -> Option<SimpleErrorInfo> {
        self.get_property(known_data_keys::SIMPLE_ERROR)
    }

    /// Get the attached environment info.
    pub fn environment_info(&self) -> Option<EnvironmentInfo> {
        self.get_property(known_data_keys::ENVIRONMENT_INFO)
    }

    /// Get the submission method.
    pub fn submission_method(&self) -> Option<&str> {
        self.data
            .get(known_data_keys::SUBMISSION_METHOD)
            .and_then(Value::as_str)
    }
}
