//! Catalog resolution pipeline
//!
//! request path -> config blob + catalog id -> list provider -> converter

pub mod converter;
pub mod handler;
pub mod request;
pub mod types;

pub use converter::{resolve_identity, CatalogConverter, GenreMatch};
pub use handler::{
    apply_provider_defaults, degrade, inject_default_client_id, CatalogError, CatalogRequestHandler,
};
pub use request::{split_request_path, CatalogId, CatalogRequestPath, NAMESPACE_PREFIX};
pub use types::{CatalogItem, CatalogResponse, InvalidSkip, MediaKind, PaginationFilter};
