//! Receiver registry
//!
//! Static description of every supported watch-list provider. Built once on
//! first access and never mutated.

use std::sync::LazyLock;

use crate::catalog::MediaKind;
use crate::codec::ProviderSettings;

/// Setting keys understood inside a provider's config entry
pub mod keys {
    pub const ACCESS_TOKEN: &str = "accesstoken";
    pub const CLIENT_ID: &str = "clientid";
    /// Comma-separated catalog ids to expose; all catalogs when absent
    pub const CATALOGS: &str = "catalogs";
}

pub const SIMKL: &str = "simkl";
pub const ANILIST: &str = "anilist";

/// A library section a receiver can list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectType {
    pub id: &'static str,
    pub label: &'static str,
    /// Default kind of the entries in this section, also the catalog `type`
    pub media_kind: MediaKind,
}

/// A watch status a receiver can filter by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectStatus {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiverDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    pub required_setting_keys: &'static [&'static str],
    pub supports_live_sync: bool,
    pub supports_full_sync: bool,
    pub object_types: &'static [ObjectType],
    pub object_statuses: &'static [ObjectStatus],
}

impl ReceiverDescriptor {
    #[must_use]
    pub fn object_type(&self, id: &str) -> Option<&'static ObjectType> {
        self.object_types.iter().find(|t| t.id == id)
    }

    #[must_use]
    pub fn object_status(&self, id: &str) -> Option<&'static ObjectStatus> {
        self.object_statuses.iter().find(|s| s.id == id)
    }

    /// Whether every required setting is present and non-empty
    #[must_use]
    pub fn is_configured(&self, settings: Option<&ProviderSettings>) -> bool {
        settings.is_some_and(|settings| {
            self.required_setting_keys
                .iter()
                .all(|key| settings.get(*key).is_some_and(|v| !v.is_empty()))
        })
    }
}

static RECEIVERS: LazyLock<Vec<ReceiverDescriptor>> = LazyLock::new(|| {
    vec![
        ReceiverDescriptor {
            id: SIMKL,
            display_name: "Simkl",
            required_setting_keys: &[keys::ACCESS_TOKEN, keys::CLIENT_ID],
            supports_live_sync: true,
            supports_full_sync: false,
            object_types: &[
                ObjectType { id: "shows", label: "Shows", media_kind: MediaKind::Series },
                ObjectType { id: "movies", label: "Movies", media_kind: MediaKind::Movie },
                ObjectType { id: "anime", label: "Anime", media_kind: MediaKind::Series },
            ],
            object_statuses: &[
                ObjectStatus { id: "watching", label: "Watching" },
                ObjectStatus { id: "plantowatch", label: "Plan to Watch" },
                ObjectStatus { id: "hold", label: "On Hold" },
                ObjectStatus { id: "completed", label: "Completed" },
                ObjectStatus { id: "dropped", label: "Dropped" },
            ],
        },
        ReceiverDescriptor {
            id: ANILIST,
            display_name: "AniList",
            required_setting_keys: &[keys::ACCESS_TOKEN],
            supports_live_sync: true,
            supports_full_sync: false,
            object_types: &[
                ObjectType { id: "anime", label: "Anime", media_kind: MediaKind::Series },
            ],
            object_statuses: &[
                ObjectStatus { id: "current", label: "Watching" },
                ObjectStatus { id: "planning", label: "Planning" },
                ObjectStatus { id: "paused", label: "Paused" },
                ObjectStatus { id: "completed", label: "Completed" },
                ObjectStatus { id: "dropped", label: "Dropped" },
                ObjectStatus { id: "repeating", label: "Rewatching" },
            ],
        },
    ]
});

/// All supported receivers, in display order
#[must_use]
pub fn receivers() -> &'static [ReceiverDescriptor] {
    &RECEIVERS
}

/// Look up a receiver by id
#[must_use]
pub fn find(id: &str) -> Option<&'static ReceiverDescriptor> {
    RECEIVERS.iter().find(|r| r.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ConfigBlob;

    #[test]
    fn test_find_receiver() {
        let simkl = find(SIMKL).unwrap();
        assert_eq!(simkl.display_name, "Simkl");
        assert!(simkl.supports_live_sync);
        assert!(simkl.object_type("anime").is_some());
        assert!(simkl.object_status("plantowatch").is_some());
        assert!(simkl.object_status("current").is_none());
        assert!(find("letterboxd").is_none());
    }

    #[test]
    fn test_receiver_ids_free_of_delimiters() {
        for receiver in receivers() {
            assert!(!receiver.id.contains('_'));
            assert!(!receiver.id.contains('-'));
            for key in receiver.required_setting_keys {
                assert!(!key.contains('_'));
            }
        }
    }

    #[test]
    fn test_is_configured() {
        let simkl = find(SIMKL).unwrap();

        let blob = ConfigBlob::new().with(SIMKL, keys::ACCESS_TOKEN, "token");
        assert!(!simkl.is_configured(blob.provider(SIMKL)));

        let blob = blob.with(SIMKL, keys::CLIENT_ID, "");
        assert!(!simkl.is_configured(blob.provider(SIMKL)));

        let blob = blob.with(SIMKL, keys::CLIENT_ID, "client");
        assert!(simkl.is_configured(blob.provider(SIMKL)));

        assert!(!simkl.is_configured(None));
    }
}
