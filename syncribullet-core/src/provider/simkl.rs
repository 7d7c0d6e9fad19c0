//! Simkl ListProvider Adapter
//!
//! Adapter that calls SimklClient to implement the ListProvider trait

use std::time::Duration;

use async_trait::async_trait;
use syncribullet_media_providers::simkl::{
    SimklClient, SimklEntry, SimklListStatus, SimklListType, POSTER_BASE_URL,
};
use syncribullet_media_providers::ProviderClientError;

use super::{ListProvider, MediaIds, ProviderError, RawListEntry};
use crate::catalog::MediaKind;
use crate::codec::ProviderSettings;
use crate::config::SimklConfig;
use crate::env::SIMKL_CLIENT_ID_VAR;
use crate::receivers::{keys, ObjectStatus, ObjectType, SIMKL};

/// Simkl ListProvider
///
/// Holds a credential-less client; each fetch clones it (sharing the
/// connection pool) and attaches the caller's credentials.
#[derive(Clone, Default)]
pub struct SimklListProvider {
    client: SimklClient,
}

impl SimklListProvider {
    #[must_use]
    pub const fn new(client: SimklClient) -> Self {
        Self { client }
    }

    /// Build from configuration: API host and transport timeouts
    pub fn from_config(config: &SimklConfig) -> Result<Self, ProviderClientError> {
        let http = SimklClient::build_http_client(
            Duration::from_secs(config.connect_timeout_secs),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        let client = SimklClient::new()
            .with_base_url(config.api_base_url.as_str())
            .with_http_client(http);
        Ok(Self::new(client))
    }
}

fn poster_url(poster: &str) -> String {
    if poster.starts_with("http://") || poster.starts_with("https://") {
        poster.to_string()
    } else {
        format!("{POSTER_BASE_URL}/{poster}_m.jpg")
    }
}

fn to_raw_entry(entry: SimklEntry) -> Option<RawListEntry> {
    let is_movie = entry.is_movie();
    let media = entry.show.or(entry.movie)?;

    Some(RawListEntry {
        title: media.title,
        ids: MediaIds {
            imdb: media.ids.imdb,
            kitsu: media.ids.kitsu,
            mal: media.ids.mal,
            native: media.ids.simkl,
        },
        poster: media.poster.filter(|p| !p.is_empty()).map(|p| poster_url(&p)),
        genres: media.genres,
        year: media.year,
        overview: media.overview,
        media_kind: Some(if is_movie { MediaKind::Movie } else { MediaKind::Series }),
    })
}

#[async_trait]
impl ListProvider for SimklListProvider {
    fn kind(&self) -> &'static str {
        SIMKL
    }

    fn default_client_id_var(&self) -> Option<&'static str> {
        Some(SIMKL_CLIENT_ID_VAR)
    }

    async fn fetch(
        &self,
        object_type: &ObjectType,
        object_status: &ObjectStatus,
        credentials: Option<&ProviderSettings>,
    ) -> Result<Vec<RawListEntry>, ProviderError> {
        let list_type = SimklListType::parse(object_type.id).ok_or_else(|| {
            ProviderError::NotFound(format!("simkl has no '{}' section", object_type.id))
        })?;
        let status = SimklListStatus::parse(object_status.id).ok_or_else(|| {
            ProviderError::NotFound(format!("simkl has no '{}' status", object_status.id))
        })?;

        let setting = |key: &str| credentials.and_then(|c| c.get(key)).cloned();
        let client = self
            .client
            .clone()
            .with_credentials(setting(keys::ACCESS_TOKEN), setting(keys::CLIENT_ID));

        let entries = client.all_items(list_type, status).await?;
        let total = entries.len();
        let raw: Vec<_> = entries.into_iter().filter_map(to_raw_entry).collect();

        tracing::debug!(
            list_type = %list_type,
            status = %status,
            total,
            usable = raw.len(),
            "fetched simkl list"
        );

        Ok(raw)
    }
}
