// SyncriBullet Provider Clients
//
// Pure HTTP client implementations for watch-list providers.
// These clients know nothing about catalogs or the ListProvider trait and
// can be used standalone.
//
// Architecture:
// - syncribullet-media-providers: Pure HTTP clients (Simkl)
// - syncribullet-core/provider: ListProvider adapters calling these clients

// Shared error types
pub mod error;

// HTTP clients
pub mod simkl;

// Re-export client types for convenience
pub use error::ProviderClientError;
pub use simkl::SimklClient;
