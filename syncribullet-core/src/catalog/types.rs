//! Catalog schema shared with the consumer application

use std::fmt;

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

/// Kind of a catalog entry, serialized as the item `type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a catalog response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Resolved media identity: `tt…`, `kitsu:N` or `mal:N`
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of a catalog response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub metas: Vec<CatalogItem>,
}

impl CatalogResponse {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metas.is_empty()
    }
}

/// `skip` was present but not a non-negative integer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid skip value {value:?}")]
pub struct InvalidSkip {
    pub value: String,
}

/// Pagination and filter parameters of a catalog request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationFilter {
    pub skip: usize,
    pub genre: Option<String>,
}

impl PaginationFilter {
    /// Strict parse of `skip=N&genre=G`. Unknown keys are ignored; a bad
    /// `skip` is an error.
    pub fn parse(params: &str) -> Result<Self, InvalidSkip> {
        match Self::parse_parts(params) {
            (filter, None) => Ok(filter),
            (_, Some(value)) => Err(InvalidSkip { value }),
        }
    }

    /// Like [`PaginationFilter::parse`], but a bad `skip` falls back to 0
    /// while the other parameters are kept.
    #[must_use]
    pub fn parse_or_default(params: &str) -> Self {
        let (filter, bad_skip) = Self::parse_parts(params);
        if let Some(value) = bad_skip {
            tracing::warn!(skip = %value, "invalid skip parameter, using 0");
        }
        filter
    }

    fn parse_parts(params: &str) -> (Self, Option<String>) {
        let mut filter = Self::default();
        let mut bad_skip = None;

        for token in params.split('&').filter(|t| !t.is_empty()) {
            let (key, value) = token.split_once('=').unwrap_or((token, ""));
            let value = percent_decode_str(value).decode_utf8_lossy();
            match key {
                "skip" => match value.trim().parse::<usize>() {
                    Ok(skip) => {
                        filter.skip = skip;
                        bad_skip = None;
                    }
                    Err(_) => {
                        filter.skip = 0;
                        bad_skip = Some(value.into_owned());
                    }
                },
                "genre" if !value.is_empty() => filter.genre = Some(value.into_owned()),
                _ => {}
            }
        }

        (filter, bad_skip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        assert_eq!(PaginationFilter::parse("skip=0").unwrap(), PaginationFilter::default());
        assert_eq!(PaginationFilter::parse("").unwrap(), PaginationFilter::default());
    }

    #[test]
    fn test_pagination_parse() {
        let filter = PaginationFilter::parse("skip=100&genre=Science%20Fiction&foo=bar").unwrap();
        assert_eq!(filter.skip, 100);
        assert_eq!(filter.genre.as_deref(), Some("Science Fiction"));
    }

    #[test]
    fn test_pagination_invalid_skip() {
        let err = PaginationFilter::parse("skip=abc&genre=Drama").unwrap_err();
        assert_eq!(err.value, "abc");
        assert!(PaginationFilter::parse("skip=-3").is_err());

        let filter = PaginationFilter::parse_or_default("skip=abc&genre=Drama");
        assert_eq!(filter.skip, 0);
        assert_eq!(filter.genre.as_deref(), Some("Drama"));
    }

    #[test]
    fn test_pagination_empty_genre_ignored() {
        let filter = PaginationFilter::parse("genre=&skip=5").unwrap();
        assert_eq!(filter.genre, None);
        assert_eq!(filter.skip, 5);
    }

    #[test]
    fn test_catalog_item_serialization() {
        let item = CatalogItem {
            id: "tt0213338".to_string(),
            kind: MediaKind::Series,
            name: "Cowboy Bebop".to_string(),
            poster: None,
            genres: vec!["Action".to_string()],
            release_info: Some("1998".to_string()),
            description: None,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "tt0213338",
                "type": "series",
                "name": "Cowboy Bebop",
                "genres": ["Action"],
                "releaseInfo": "1998"
            })
        );
    }
}
