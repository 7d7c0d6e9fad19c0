//! Catalog request paths
//!
//! `/{config}/catalog/{resourceType}/{catalogId}[/{params}].json`

use std::fmt;

use percent_encoding::percent_decode_str;

/// Namespace every catalog id starts with
pub const NAMESPACE_PREFIX: &str = "syncribullet-";

/// Separator between the parts of a catalog id
pub const CATALOG_ID_SEPARATOR: char = '-';

/// Params assumed when the request carries none
pub const DEFAULT_PARAMS: &str = "skip=0";

const CATALOG_MARKER: &str = "/catalog/";
const JSON_SUFFIX: &str = ".json";

/// Split a full request path into the raw config segment and the part after
/// `/catalog/`. `None` if the path is not a catalog request.
#[must_use]
pub fn split_request_path(path: &str) -> Option<(&str, &str)> {
    let path = path.strip_prefix('/').unwrap_or(path);
    if let Some(rest) = path.strip_prefix(&CATALOG_MARKER[1..]) {
        return Some(("", rest));
    }
    path.split_once(CATALOG_MARKER)
}

/// Segments of a catalog request, any of which may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRequestPath {
    pub resource_type: Option<String>,
    pub catalog_id: Option<String>,
    pub params: Option<String>,
}

impl CatalogRequestPath {
    /// Parse the part after `/catalog/`, with or without the `.json` suffix
    #[must_use]
    pub fn parse(catchall: &str) -> Self {
        let trimmed = catchall.strip_suffix(JSON_SUFFIX).unwrap_or(catchall);
        let mut segments = trimmed.split('/').map(|segment| {
            Some(segment)
                .filter(|s| !s.is_empty())
                .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
        });

        Self {
            resource_type: segments.next().flatten(),
            catalog_id: segments.next().flatten(),
            // params stay percent-encoded until split into key/value pairs
            params: trimmed
                .splitn(3, '/')
                .nth(2)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }

    /// Params segment, or the default when absent
    #[must_use]
    pub fn params_or_default(&self) -> &str {
        self.params.as_deref().unwrap_or(DEFAULT_PARAMS)
    }
}

/// `syncribullet-{providerKind}-{objectType}-{objectStatus}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogId {
    pub provider_kind: String,
    pub object_type: String,
    pub object_status: String,
}

impl CatalogId {
    #[must_use]
    pub fn new(
        provider_kind: impl Into<String>,
        object_type: impl Into<String>,
        object_status: impl Into<String>,
    ) -> Self {
        Self {
            provider_kind: provider_kind.into(),
            object_type: object_type.into(),
            object_status: object_status.into(),
        }
    }

    /// `None` when the prefix is missing or the id does not have exactly
    /// three non-empty parts
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let rest = raw.strip_prefix(NAMESPACE_PREFIX)?;
        let mut parts = rest.split(CATALOG_ID_SEPARATOR);
        let (kind, object_type, status) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() || [kind, object_type, status].iter().any(|p| p.is_empty()) {
            return None;
        }
        Some(Self::new(kind, object_type, status))
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{NAMESPACE_PREFIX}{}{CATALOG_ID_SEPARATOR}{}{CATALOG_ID_SEPARATOR}{}",
            self.provider_kind, self.object_type, self.object_status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_request_path() {
        assert_eq!(
            split_request_path("/cfg/catalog/anime/syncribullet-simkl-anime-completed.json"),
            Some(("cfg", "anime/syncribullet-simkl-anime-completed.json"))
        );
        assert_eq!(split_request_path("catalog/anime/x.json"), Some(("", "anime/x.json")));
        assert_eq!(split_request_path("/cfg/manifest.json"), None);
    }

    #[test]
    fn test_parse_full_path() {
        let path = CatalogRequestPath::parse(
            "simklAnime/syncribullet-simkl-anime-completed/skip=20&genre=Comedy.json",
        );
        assert_eq!(path.resource_type.as_deref(), Some("simklAnime"));
        assert_eq!(path.catalog_id.as_deref(), Some("syncribullet-simkl-anime-completed"));
        assert_eq!(path.params_or_default(), "skip=20&genre=Comedy");
    }

    #[test]
    fn test_parse_without_params() {
        let path = CatalogRequestPath::parse("movie/syncribullet-simkl-movies-watching.json");
        assert_eq!(path.params, None);
        assert_eq!(path.params_or_default(), DEFAULT_PARAMS);
    }

    #[test]
    fn test_parse_missing_segments() {
        assert_eq!(CatalogRequestPath::parse(""), CatalogRequestPath::default());
        assert_eq!(CatalogRequestPath::parse(".json"), CatalogRequestPath::default());

        let path = CatalogRequestPath::parse("movie.json");
        assert_eq!(path.resource_type.as_deref(), Some("movie"));
        assert_eq!(path.catalog_id, None);

        let path = CatalogRequestPath::parse("/syncribullet-simkl-anime-completed.json");
        assert_eq!(path.resource_type, None);
    }

    #[test]
    fn test_catalog_id_parse() {
        let id = CatalogId::parse("syncribullet-simkl-anime-plantowatch").unwrap();
        assert_eq!(id, CatalogId::new("simkl", "anime", "plantowatch"));
        assert_eq!(id.to_string(), "syncribullet-simkl-anime-plantowatch");
    }

    #[test]
    fn test_catalog_id_rejects_bad_shapes() {
        assert_eq!(CatalogId::parse("simkl-anime-completed"), None);
        assert_eq!(CatalogId::parse("syncribullet-simkl-anime"), None);
        assert_eq!(CatalogId::parse("syncribullet-simkl-anime-completed-extra"), None);
        assert_eq!(CatalogId::parse("syncribullet--anime-completed"), None);
    }
}
