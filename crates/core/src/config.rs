//! Access to secrets that are read at use time rather than at startup.
//!
//! The session secret and the bootstrap admin password are looked up through a
//! [`ConfigProvider`] on every login. A missing value fails that request, not
//! the process.

use std::collections::HashMap;

use crate::error::CoreError;

/// Key used to derive stored session-token hashes.
pub const SESSION_SECRET: &str = "SESSION_SECRET";

/// Plaintext password accepted only while no admin credential exists.
pub const ADMIN_PASSWORD: &str = "ADMIN_PASSWORD";

/// Named-value lookup.
pub trait ConfigProvider: Send + Sync {
    /// Return the raw value for `name`, if set.
    fn get(&self, name: &str) -> Option<String>;

    /// Return the value for `name`, treating unset and empty the same way.
    fn get_required(&self, name: &str) -> Result<String, CoreError> {
        self.get(name)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| CoreError::Configuration(format!("{name} is not set")))
    }
}

/// Reads from the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvConfig;

impl ConfigProvider for EnvConfig {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Fixed in-memory values.
#[derive(Debug, Default, Clone)]
pub struct StaticConfig {
    values: HashMap<String, String>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl ConfigProvider for StaticConfig {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn static_config_returns_configured_values() {
        let config = StaticConfig::new().with(SESSION_SECRET, "s3cret");
        assert_eq!(config.get(SESSION_SECRET).as_deref(), Some("s3cret"));
        assert_eq!(config.get_required(SESSION_SECRET).unwrap(), "s3cret");
    }

    #[test]
    fn missing_value_is_a_configuration_error() {
        let config = StaticConfig::new();
        assert_matches!(
            config.get_required(ADMIN_PASSWORD),
            Err(CoreError::Configuration(msg)) if msg.contains("ADMIN_PASSWORD")
        );
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let config = StaticConfig::new().with(SESSION_SECRET, "");
        assert_eq!(config.get(SESSION_SECRET).as_deref(), Some(""));
        assert_matches!(
            config.get_required(SESSION_SECRET),
            Err(CoreError::Configuration(_))
        );
    }
}
