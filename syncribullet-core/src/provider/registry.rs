// Provider Registry
//
// Kind-keyed table of list providers, built at startup and shared read-only

use std::collections::HashMap;
use std::sync::Arc;

use super::ListProvider;

/// Registry of list providers by kind
///
/// Adding a provider means registering one more implementation here; the
/// catalog pipeline looks it up by the kind segment of the catalog id.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<&'static str, Arc<dyn ListProvider>>,
}

impl ProviderRegistry {
    /// Create new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under its own kind, replacing any previous one
    pub fn register(&mut self, provider: Arc<dyn ListProvider>) {
        let kind = provider.kind();
        if self.providers.insert(kind, provider).is_some() {
            tracing::warn!(kind, "list provider registered twice, keeping the latest");
        }
    }

    /// Builder-style [`ProviderRegistry::register`]
    #[must_use]
    pub fn with(mut self, provider: Arc<dyn ListProvider>) -> Self {
        self.register(provider);
        self
    }

    /// Get provider by kind
    #[must_use]
    pub fn get(&self, kind: &str) -> Option<Arc<dyn ListProvider>> {
        self.providers.get(kind).cloned()
    }

    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.providers.contains_key(kind)
    }

    /// Registered kinds, sorted
    #[must_use]
    pub fn kinds(&self) -> Vec<&'static str> {
        let mut kinds: Vec<_> = self.providers.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
