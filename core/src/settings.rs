//! Read-only key/value settings consulted when building requests.

use std::collections::HashMap;

/// Key under which the API access token is stored.
pub const TOKEN_KEY: &str = "token";

/// A read-only string lookup. Injected into `RequestBuilder` so the token
/// source can be swapped per client and in tests.
pub trait SettingsStore: Send + Sync {
    fn string(&self, key: &str) -> Option<String>;
}

/// Fixed in-memory settings.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: HashMap<String, String>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl SettingsStore for MemorySettings {
    fn string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_stored_value() {
        let settings = MemorySettings::new().with(TOKEN_KEY, "abc");
        assert_eq!(settings.string(TOKEN_KEY).as_deref(), Some("abc"));
        assert!(settings.string("missing").is_none());
    }
}
