// List Provider Traits
//
// Core interface every watch-list provider implements

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ProviderError;
use crate::catalog::MediaKind;
use crate::codec::ProviderSettings;
use crate::receivers::{self, ObjectStatus, ObjectType, ReceiverDescriptor};

/// Cross-service identifiers of a list entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaIds {
    pub imdb: Option<String>,
    pub kitsu: Option<String>,
    pub mal: Option<String>,
    /// Id inside the provider itself, kept for logging
    pub native: Option<String>,
}

/// Provider-neutral list entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawListEntry {
    pub title: String,
    pub ids: MediaIds,
    /// Absolute poster URL
    pub poster: Option<String>,
    pub genres: Vec<String>,
    pub year: Option<u32>,
    pub overview: Option<String>,
    /// Overrides the section's default kind (an anime film in an anime list)
    pub media_kind: Option<MediaKind>,
}

/// Watch-list provider
///
/// Implementations must accept missing or partial credentials; some
/// sections may be readable anonymously.
#[async_trait]
pub trait ListProvider: Send + Sync {
    /// Provider kind as it appears in catalog ids (e.g. "simkl")
    fn kind(&self) -> &'static str;

    /// Static description of the provider
    fn descriptor(&self) -> Option<&'static ReceiverDescriptor> {
        receivers::find(self.kind())
    }

    /// Environment variable holding a server-side default client id.
    ///
    /// When set, the value is injected into the config blob before the
    /// provider is called, unless the user supplied their own.
    fn default_client_id_var(&self) -> Option<&'static str> {
        None
    }

    /// Fetch every entry of one section with the given status
    async fn fetch(
        &self,
        object_type: &ObjectType,
        object_status: &ObjectStatus,
        credentials: Option<&ProviderSettings>,
    ) -> Result<Vec<RawListEntry>, ProviderError>;
}
