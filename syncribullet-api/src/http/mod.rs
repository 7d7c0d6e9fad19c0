// Module: http
// Catalog add-on HTTP API, consumed cross-origin by Stremio clients

pub mod catalog;
pub mod error;
pub mod manifest;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use syncribullet_core::{
    catalog::{CatalogConverter, CatalogRequestHandler},
    config::{CatalogConfig, ManifestConfig},
    env::EnvironmentLookup,
    Config, ProviderRegistry,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<CatalogRequestHandler>,
    pub registry: Arc<ProviderRegistry>,
    pub env: Arc<dyn EnvironmentLookup>,
    pub catalog_config: CatalogConfig,
    pub manifest_config: Arc<ManifestConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: &Config,
        registry: Arc<ProviderRegistry>,
        env: Arc<dyn EnvironmentLookup>,
    ) -> Self {
        let converter = CatalogConverter::new(config.catalog.genre_match());
        Self {
            handler: Arc::new(CatalogRequestHandler::new(registry.clone(), converter)),
            registry,
            env,
            catalog_config: config.catalog.clone(),
            manifest_config: Arc::new(config.manifest.clone()),
        }
    }
}

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/manifest.json", get(manifest::get_manifest))
        .route("/{config}/manifest.json", get(manifest::get_configured_manifest))
        .route("/catalog/{*rest}", get(catalog::get_catalog))
        .route("/{config}/catalog/{*rest}", get(catalog::get_catalog))
        .route("/api/install-link", post(manifest::create_install_link));

    // Apply layers before state
    let router = router
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    router.with_state(state)
}
