//! Add-on manifest
//!
//! The manifest tells the consumer application which catalogs exist for a
//! given config blob, and the install link points it at that manifest.

use serde::{Deserialize, Serialize};

use crate::catalog::{apply_provider_defaults, CatalogId, MediaKind};
use crate::codec::{self, CodecError, ConfigBlob};
use crate::config::ManifestConfig;
use crate::env::EnvironmentLookup;
use crate::provider::ProviderRegistry;
use crate::receivers::{self, keys, ReceiverDescriptor};

/// Hosts ending with this get the community hosting domain appended
const HOSTED_NAME: &str = "syncribullet";
const HOSTED_DOMAIN: &str = ".baby-beamup.club";

/// Genres offered by the `genre` catalog extra
pub const GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Animation",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "History",
    "Horror",
    "Mystery",
    "Romance",
    "Science Fiction",
    "Thriller",
    "War",
    "Western",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestExtra {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub is_required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestCatalog {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub id: String,
    pub name: String,
    pub extra: Vec<ManifestExtra>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorHints {
    pub configurable: bool,
    pub configuration_required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: String,
    pub version: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    pub resources: Vec<String>,
    pub types: Vec<MediaKind>,
    pub catalogs: Vec<ManifestCatalog>,
    pub behavior_hints: BehaviorHints,
}

fn catalog_extras() -> Vec<ManifestExtra> {
    vec![
        ManifestExtra {
            name: "skip".to_string(),
            options: None,
            is_required: false,
        },
        ManifestExtra {
            name: "genre".to_string(),
            options: Some(GENRES.iter().map(|g| (*g).to_string()).collect()),
            is_required: false,
        },
    ]
}

/// One catalog per (object type, status) pair of the receiver
#[must_use]
pub fn catalogs_for(receiver: &ReceiverDescriptor) -> Vec<ManifestCatalog> {
    receiver
        .object_types
        .iter()
        .flat_map(|object_type| {
            receiver.object_statuses.iter().map(move |status| ManifestCatalog {
                kind: object_type.media_kind,
                id: CatalogId::new(receiver.id, object_type.id, status.id).to_string(),
                name: format!("{} {} {}", receiver.display_name, object_type.label, status.label),
                extra: catalog_extras(),
            })
        })
        .collect()
}

/// Catalog ids the user enabled with `<provider>_catalogs`; `None` means all
fn enabled_catalogs<'a>(blob: &'a ConfigBlob, receiver_id: &str) -> Option<Vec<&'a str>> {
    let enabled: Vec<&str> = blob
        .setting(receiver_id, keys::CATALOGS)?
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect();
    (!enabled.is_empty()).then_some(enabled)
}

/// Build the manifest for a decoded config blob.
///
/// Only receivers with a registered provider and complete settings (after
/// server-side defaults) contribute catalogs.
#[must_use]
pub fn build_manifest(
    blob: &ConfigBlob,
    registry: &ProviderRegistry,
    env: &dyn EnvironmentLookup,
    config: &ManifestConfig,
) -> Manifest {
    let mut blob = blob.clone();
    apply_provider_defaults(registry, &mut blob, env);

    let mut configured = false;
    let mut catalogs = Vec::new();

    for receiver in receivers::receivers() {
        if !registry.contains(receiver.id) || !receiver.is_configured(blob.provider(receiver.id)) {
            continue;
        }
        configured = true;

        let enabled = enabled_catalogs(&blob, receiver.id);
        catalogs.extend(
            catalogs_for(receiver)
                .into_iter()
                .filter(|c| enabled.as_ref().is_none_or(|ids| ids.contains(&c.id.as_str()))),
        );
    }

    let mut types = Vec::new();
    for catalog in &catalogs {
        if !types.contains(&catalog.kind) {
            types.push(catalog.kind);
        }
    }
    if types.is_empty() {
        types = vec![MediaKind::Movie, MediaKind::Series];
    }

    tracing::debug!(configured, catalogs = catalogs.len(), "built manifest");

    Manifest {
        id: config.id.clone(),
        version: config.version.clone(),
        name: config.name.clone(),
        description: config.description.clone(),
        logo: config.logo.clone(),
        background: config.background.clone(),
        resources: vec!["catalog".to_string()],
        types,
        catalogs,
        behavior_hints: BehaviorHints {
            configurable: true,
            configuration_required: !configured,
        },
    }
}

/// Install deep link for the consumer application:
/// `stremio://<host>/<config>/manifest.json`
pub fn manifest_url(host: &str, blob: &ConfigBlob) -> Result<String, CodecError> {
    let host = host
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');
    let suffix = if host.ends_with(HOSTED_NAME) { HOSTED_DOMAIN } else { "" };

    let encoded = codec::encode(blob)?;
    if encoded.is_empty() {
        Ok(format!("stremio://{host}{suffix}/manifest.json"))
    } else {
        Ok(format!("stremio://{host}{suffix}/{encoded}/manifest.json"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::env::{StaticEnvironment, SIMKL_CLIENT_ID_VAR};
    use crate::provider::SimklListProvider;
    use crate::receivers::SIMKL;

    fn registry() -> ProviderRegistry {
        ProviderRegistry::new().with(Arc::new(SimklListProvider::default()))
    }

    #[test]
    fn test_catalogs_for_simkl() {
        let simkl = receivers::find(SIMKL).unwrap();
        let catalogs = catalogs_for(simkl);

        assert_eq!(catalogs.len(), 15);
        let anime_completed = catalogs
            .iter()
            .find(|c| c.id == "syncribullet-simkl-anime-completed")
            .unwrap();
        assert_eq!(anime_completed.name, "Simkl Anime Completed");
        assert_eq!(anime_completed.kind, MediaKind::Series);
        assert!(catalogs
            .iter()
            .filter(|c| c.id.starts_with("syncribullet-simkl-movies-"))
            .all(|c| c.kind == MediaKind::Movie));
    }

    #[test]
    fn test_unconfigured_manifest() {
        let manifest = build_manifest(
            &ConfigBlob::new(),
            &registry(),
            &StaticEnvironment::new(),
            &ManifestConfig::default(),
        );

        assert!(manifest.catalogs.is_empty());
        assert!(manifest.behavior_hints.configuration_required);
        assert_eq!(manifest.types, [MediaKind::Movie, MediaKind::Series]);
    }

    #[test]
    fn test_configured_with_default_client_id() {
        let blob = ConfigBlob::new().with(SIMKL, keys::ACCESS_TOKEN, "token");
        let env = StaticEnvironment::new().with(SIMKL_CLIENT_ID_VAR, "server-default");

        let manifest = build_manifest(&blob, &registry(), &env, &ManifestConfig::default());

        assert_eq!(manifest.catalogs.len(), 15);
        assert!(!manifest.behavior_hints.configuration_required);
        assert_eq!(manifest.types, [MediaKind::Series, MediaKind::Movie]);

        // without the default the client id is missing
        let manifest = build_manifest(&blob, &registry(), &StaticEnvironment::new(), &ManifestConfig::default());
        assert!(manifest.catalogs.is_empty());
    }

    #[test]
    fn test_catalog_allow_list() {
        let blob = ConfigBlob::new()
            .with(SIMKL, keys::ACCESS_TOKEN, "token")
            .with(SIMKL, keys::CLIENT_ID, "client")
            .with(
                SIMKL,
                keys::CATALOGS,
                "syncribullet-simkl-anime-watching, syncribullet-simkl-movies-completed",
            );

        let manifest = build_manifest(&blob, &registry(), &StaticEnvironment::new(), &ManifestConfig::default());

        let ids: Vec<_> = manifest.catalogs.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["syncribullet-simkl-movies-completed", "syncribullet-simkl-anime-watching"]);
    }

    #[test]
    fn test_unregistered_receiver_not_listed() {
        let blob = ConfigBlob::new().with(receivers::ANILIST, keys::ACCESS_TOKEN, "token");
        let manifest = build_manifest(&blob, &registry(), &StaticEnvironment::new(), &ManifestConfig::default());
        assert!(manifest.catalogs.is_empty());
        assert!(manifest.behavior_hints.configuration_required);
    }

    #[test]
    fn test_manifest_serialization() {
        let manifest = build_manifest(
            &ConfigBlob::new(),
            &registry(),
            &StaticEnvironment::new(),
            &ManifestConfig::default(),
        );
        let json = serde_json::to_value(&manifest).unwrap();

        assert_eq!(json["id"], "com.syncribullet");
        assert_eq!(json["resources"], serde_json::json!(["catalog"]));
        assert_eq!(json["behaviorHints"]["configurationRequired"], true);
        assert!(json.get("logo").is_none());
    }

    #[test]
    fn test_manifest_url() {
        let blob = ConfigBlob::new().with(SIMKL, keys::ACCESS_TOKEN, "abc");

        assert_eq!(
            manifest_url("https://my-syncribullet", &blob).unwrap(),
            "stremio://my-syncribullet.baby-beamup.club/simkl_accesstoken-=-abc/manifest.json"
        );
        assert_eq!(
            manifest_url("localhost:7000", &ConfigBlob::new()).unwrap(),
            "stremio://localhost:7000/manifest.json"
        );
    }
}
