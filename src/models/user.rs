//! User identity attached to events.

use serde::{Deserialize, Serialize};

/// The user an event is attributed to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Unique identity (email, account id, OS user name)
    pub identity: Option<String>,
    /// Friendly name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl UserInfo {
    /// Create new user info.
    pub fn new(identity: Option<&str>, name: Option<&str>) -> Self {
        Self {
            identity: identity.map(str::to_string),
            name: name.map(str::to_string),
        }
    }

    /// Has a non-empty identity.
    pub fn has_identity(&self) -> bool {
        self.identity.as_deref().map_or(false, |s| !s.trim().is_empty())
    }
}
