//! Catalog request handler
//!
//! Decodes a catalog request, dispatches to the matching list provider and
//! converts the result. Every request is independent; the only shared state
//! is the read-only provider registry.

use std::sync::Arc;

use super::converter::CatalogConverter;
use super::request::{split_request_path, CatalogId, CatalogRequestPath};
use super::types::{CatalogResponse, PaginationFilter};
use crate::codec::{self, ConfigBlob};
use crate::env::EnvironmentLookup;
use crate::provider::{ProviderError, ProviderRegistry};
use crate::receivers::keys;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Missing identifiers, malformed catalog id or unregistered provider
    #[error("Unknown catalog route: {0}")]
    UnknownRoute(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl CatalogError {
    /// Whether the failure came from the upstream provider
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(self, Self::Provider(_))
    }
}

/// Put the environment's client id into `provider_kind`'s settings unless
/// the blob already carries one. Returns whether a value was injected.
pub fn inject_default_client_id(
    blob: &mut ConfigBlob,
    provider_kind: &str,
    env_var: &str,
    env: &dyn EnvironmentLookup,
) -> bool {
    if blob
        .setting(provider_kind, keys::CLIENT_ID)
        .is_some_and(|v| !v.is_empty())
    {
        return false;
    }
    match env.get(env_var) {
        Some(client_id) => {
            blob.set(provider_kind, keys::CLIENT_ID, client_id);
            true
        }
        None => false,
    }
}

/// Run [`inject_default_client_id`] for every registered provider that
/// declares a default
pub fn apply_provider_defaults(
    registry: &ProviderRegistry,
    blob: &mut ConfigBlob,
    env: &dyn EnvironmentLookup,
) {
    for kind in registry.kinds() {
        let Some(var) = registry.get(kind).and_then(|p| p.default_client_id_var()) else {
            continue;
        };
        if inject_default_client_id(blob, kind, var, env) {
            tracing::debug!(provider = kind, "using server default client id");
        }
    }
}

pub struct CatalogRequestHandler {
    registry: Arc<ProviderRegistry>,
    converter: CatalogConverter,
}

impl CatalogRequestHandler {
    #[must_use]
    pub const fn new(registry: Arc<ProviderRegistry>, converter: CatalogConverter) -> Self {
        Self { registry, converter }
    }

    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Inject server-side defaults for every registered provider
    pub fn apply_provider_defaults(&self, blob: &mut ConfigBlob, env: &dyn EnvironmentLookup) {
        apply_provider_defaults(&self.registry, blob, env);
    }

    /// Resolve a catalog request, reporting why it could not be served
    pub async fn try_resolve(
        &self,
        path: &CatalogRequestPath,
        mut blob: ConfigBlob,
        env: &dyn EnvironmentLookup,
    ) -> Result<CatalogResponse, CatalogError> {
        let (Some(resource_type), Some(raw_id)) = (&path.resource_type, &path.catalog_id) else {
            return Err(CatalogError::UnknownRoute(
                "missing resource type or catalog id".to_string(),
            ));
        };

        let catalog_id = CatalogId::parse(raw_id)
            .ok_or_else(|| CatalogError::UnknownRoute(format!("malformed catalog id '{raw_id}'")))?;

        let provider = self.registry.get(&catalog_id.provider_kind).ok_or_else(|| {
            CatalogError::UnknownRoute(format!("no provider '{}'", catalog_id.provider_kind))
        })?;
        let descriptor = provider.descriptor().ok_or_else(|| {
            CatalogError::UnknownRoute(format!("no receiver '{}'", catalog_id.provider_kind))
        })?;

        let object_type = descriptor.object_type(&catalog_id.object_type).ok_or_else(|| {
            ProviderError::NotFound(format!(
                "{} has no '{}' section",
                descriptor.id, catalog_id.object_type
            ))
        })?;
        let object_status = descriptor.object_status(&catalog_id.object_status).ok_or_else(|| {
            ProviderError::NotFound(format!(
                "{} has no '{}' status",
                descriptor.id, catalog_id.object_status
            ))
        })?;

        if let Some(var) = provider.default_client_id_var() {
            inject_default_client_id(&mut blob, provider.kind(), var, env);
        }

        let filter = PaginationFilter::parse_or_default(path.params_or_default());

        tracing::debug!(
            resource_type = %resource_type,
            catalog = %catalog_id,
            skip = filter.skip,
            genre = filter.genre.as_deref(),
            "resolving catalog"
        );

        let entries = provider
            .fetch(object_type, object_status, blob.provider(provider.kind()))
            .await?;
        let metas = self.converter.convert(object_type, entries, &filter);

        Ok(CatalogResponse { metas })
    }

    /// Like [`CatalogRequestHandler::try_resolve`], but every failure is an
    /// empty catalog
    pub async fn resolve(
        &self,
        path: &CatalogRequestPath,
        blob: ConfigBlob,
        env: &dyn EnvironmentLookup,
    ) -> CatalogResponse {
        self.try_resolve(path, blob, env)
            .await
            .unwrap_or_else(|e| degrade(&e))
    }

    /// Resolve a full request path, config segment included
    pub async fn try_resolve_path(
        &self,
        full_path: &str,
        env: &dyn EnvironmentLookup,
    ) -> Result<CatalogResponse, CatalogError> {
        let (config_segment, rest) = split_request_path(full_path)
            .ok_or_else(|| CatalogError::UnknownRoute(format!("not a catalog path '{full_path}'")))?;

        let blob = codec::decode(config_segment);
        let path = CatalogRequestPath::parse(rest);
        self.try_resolve(&path, blob, env).await
    }

    pub async fn resolve_path(&self, full_path: &str, env: &dyn EnvironmentLookup) -> CatalogResponse {
        self.try_resolve_path(full_path, env)
            .await
            .unwrap_or_else(|e| degrade(&e))
    }
}

/// Log a resolution failure and answer with an empty catalog
pub fn degrade(error: &CatalogError) -> CatalogResponse {
    match error {
        CatalogError::UnknownRoute(reason) => tracing::debug!(%reason, "unknown catalog route"),
        CatalogError::Provider(e) => tracing::warn!(error = %e, "list provider failed"),
    }
    CatalogResponse::empty()
}
