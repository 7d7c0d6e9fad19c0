//! Environment lookup used for server-side provider defaults

use std::collections::HashMap;

/// Variable holding the shared Simkl OAuth client id
pub const SIMKL_CLIENT_ID_VAR: &str = "PRIVATE_SIMKL_CLIENT_ID";

/// Read-only key/value lookup. Empty values count as unset.
pub trait EnvironmentLookup: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl EnvironmentLookup for ProcessEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }
}

/// Fixed set of values, for config-file overrides and tests
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment(HashMap<String, String>);

impl StaticEnvironment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

impl EnvironmentLookup for StaticEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).filter(|v| !v.is_empty()).cloned()
    }
}

/// Try each lookup in order
pub struct LayeredEnvironment(pub Vec<Box<dyn EnvironmentLookup>>);

impl EnvironmentLookup for LayeredEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        self.0.iter().find_map(|env| env.get(key))
    }
}
