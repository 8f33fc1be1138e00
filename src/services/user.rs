//! Current-user collaborator.

/// Supplies the OS-level user name.
pub trait UserNameProvider: Send + Sync {
    /// Current user name, if it can be determined.
    fn current_user_name(&self) -> Option<String>;
}

/// Reads the user name from the process environment (`USER`, then `USERNAME`).
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemUserNameProvider;

impl UserNameProvider for SystemUserNameProvider {
    fn current_user_name(&self) -> Option<String> {
        ["USER", "USERNAME"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|name| !name.trim().is_empty())
    }
}

/// Always returns the same user name.
#[derive(Clone, Debug)]
pub struct StaticUserNameProvider {
    name: Option<String>,
}

impl StaticUserNameProvider {
    /// Create a provider returning `name`.
    pub fn new(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
        }
    }

    /// Create a provider that never knows the user.
    pub fn unknown() -> Self {
        Self { name: None }
    }
}

impl UserNameProvider for StaticUserNameProvider {
    fn current_user_name(&self) -> Option<String> {
        self.name.clone()
    }
}
