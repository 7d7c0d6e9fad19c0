//! Raw list entries -> catalog items

use serde::{Deserialize, Serialize};

use super::types::{CatalogItem, MediaKind, PaginationFilter};
use crate::provider::{MediaIds, RawListEntry};
use crate::receivers::ObjectType;

/// How the `genre` filter compares genre names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenreMatch {
    /// Byte-for-byte, as supplied by the provider
    #[default]
    Exact,
    CaseInsensitive,
}

impl GenreMatch {
    fn matches(self, candidate: &str, wanted: &str) -> bool {
        match self {
            Self::Exact => candidate == wanted,
            Self::CaseInsensitive => candidate.to_lowercase() == wanted.to_lowercase(),
        }
    }
}

fn numeric(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit()))
}

/// Resolve the identity the consumer application understands.
///
/// Preference: IMDb, then Kitsu, then MyAnimeList.
#[must_use]
pub fn resolve_identity(ids: &MediaIds) -> Option<String> {
    if let Some(imdb) = ids.imdb.as_deref().map(str::trim) {
        if imdb.len() > 2 && imdb.starts_with("tt") && imdb[2..].bytes().all(|b| b.is_ascii_digit()) {
            return Some(imdb.to_string());
        }
    }
    if let Some(kitsu) = numeric(ids.kitsu.as_deref()) {
        return Some(format!("kitsu:{kitsu}"));
    }
    numeric(ids.mal.as_deref()).map(|mal| format!("mal:{mal}"))
}

/// Maps provider entries into catalog items, then filters and paginates.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogConverter {
    genre_match: GenreMatch,
}

impl CatalogConverter {
    #[must_use]
    pub const fn new(genre_match: GenreMatch) -> Self {
        Self { genre_match }
    }

    /// Convert one entry; `None` when it has no resolvable identity
    #[must_use]
    pub fn convert_entry(&self, default_kind: MediaKind, entry: RawListEntry) -> Option<CatalogItem> {
        let Some(id) = resolve_identity(&entry.ids) else {
            tracing::trace!(title = %entry.title, "dropping entry without known identity");
            return None;
        };

        Some(CatalogItem {
            id,
            kind: entry.media_kind.unwrap_or(default_kind),
            name: entry.title,
            poster: entry.poster,
            genres: entry.genres,
            release_info: entry.year.map(|y| y.to_string()),
            description: entry.overview.filter(|o| !o.is_empty()),
        })
    }

    /// Map, filter by genre, then drop the first `skip` items.
    ///
    /// Upstream order is kept. No page size is applied.
    #[must_use]
    pub fn convert(
        &self,
        object_type: &ObjectType,
        entries: Vec<RawListEntry>,
        filter: &PaginationFilter,
    ) -> Vec<CatalogItem> {
        let genre = filter.genre.as_deref();

        entries
            .into_iter()
            .filter_map(|entry| self.convert_entry(object_type.media_kind, entry))
            .filter(|item| {
                genre.is_none_or(|wanted| {
                    item.genres.iter().any(|g| self.genre_match.matches(g, wanted))
                })
            })
            .skip(filter.skip)
            .collect()
    }
}
