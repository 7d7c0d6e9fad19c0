// List Provider System
//
// Two tiers:
//
// Tier 1: syncribullet-media-providers (pure provider HTTP clients)
//   - simkl::SimklClient
//   - No dependency on the catalog pipeline
//
// Tier 2: syncribullet-core/provider (ListProvider adapters)
//   - SimklListProvider
//   - Wrap the clients, map their records into RawListEntry
//   - Registered by kind in ProviderRegistry and looked up per request

pub mod error;
pub mod registry;
pub mod traits;

pub mod simkl;

pub use error::*;
pub use registry::*;
pub use traits::*;

pub use simkl::SimklListProvider;
