pub mod catalog;
pub mod codec;
pub mod config;
pub mod env;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod provider;
pub mod receivers;

pub use catalog::{CatalogRequestHandler, CatalogResponse};
pub use codec::ConfigBlob;
pub use config::Config;
pub use error::{Error, Result};
pub use provider::{ListProvider, ProviderRegistry};
