//! Simkl HTTP API Types
//!
//! Types for the Simkl `sync/all-items` JSON responses.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Library section of a Simkl account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimklListType {
    Shows,
    Movies,
    Anime,
}

impl SimklListType {
    pub const ALL: [Self; 3] = [Self::Shows, Self::Movies, Self::Anime];

    /// Path segment used by the Simkl API
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shows => "shows",
            Self::Movies => "movies",
            Self::Anime => "anime",
        }
    }

    /// Parse a path segment, `None` if unknown
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

impl fmt::Display for SimklListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Watch status of an entry in a Simkl library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimklListStatus {
    Watching,
    #[serde(rename = "plantowatch")]
    PlanToWatch,
    Hold,
    Completed,
    Dropped,
}

impl SimklListStatus {
    pub const ALL: [Self; 5] = [
        Self::Watching,
        Self::PlanToWatch,
        Self::Hold,
        Self::Completed,
        Self::Dropped,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Watching => "watching",
            Self::PlanToWatch => "plantowatch",
            Self::Hold => "hold",
            Self::Completed => "completed",
            Self::Dropped => "dropped",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl fmt::Display for SimklListStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `GET /sync/all-items/{type}/{status}`
///
/// Only the section matching the requested type is populated.
#[derive(Debug, Default, Deserialize)]
pub struct AllItemsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub shows: Vec<SimklEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub movies: Vec<SimklEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub anime: Vec<SimklEntry>,
}

impl AllItemsResponse {
    /// Take the entries for one library section
    #[must_use]
    pub fn into_entries(self, list_type: SimklListType) -> Vec<SimklEntry> {
        match list_type {
            SimklListType::Shows => self.shows,
            SimklListType::Movies => self.movies,
            SimklListType::Anime => self.anime,
        }
    }
}

/// One library entry
#[derive(Debug, Clone, Deserialize)]
pub struct SimklEntry {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub last_watched_at: Option<String>,
    /// Set for anime entries: "tv", "movie", "ova", ...
    #[serde(default)]
    pub anime_type: Option<String>,
    #[serde(default)]
    pub show: Option<SimklMedia>,
    #[serde(default)]
    pub movie: Option<SimklMedia>,
}

impl SimklEntry {
    /// The wrapped media record, whichever key it came under
    #[must_use]
    pub fn media(&self) -> Option<&SimklMedia> {
        match (&self.show, &self.movie) {
            (Some(show), _) => Some(show),
            (None, Some(movie)) => Some(movie),
            (None, None) => None,
        }
    }

    /// Whether the entry describes a film rather than a series
    #[must_use]
    pub fn is_movie(&self) -> bool {
        self.movie.is_some() || self.anime_type.as_deref() == Some("movie")
    }
}

/// Media record as returned with `extended=full`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimklMedia {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: Option<u32>,
    /// Poster path fragment, e.g. "74/74415673dcdc9cdd"
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    #[serde(default)]
    pub ids: SimklIds,
}

/// Cross-service identifiers. Simkl sends these as strings or numbers
/// depending on the service, so all of them are normalized to strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimklIds {
    #[serde(default, deserialize_with = "string_or_number")]
    pub simkl: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub imdb: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub tmdb: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub tvdb: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub mal: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub kitsu: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub anilist: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_type_round_trip() {
        for t in SimklListType::ALL {
            assert_eq!(SimklListType::parse(t.as_str()), Some(t));
        }
        assert_eq!(SimklListType::parse("books"), None);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(SimklListStatus::parse("plantowatch"), Some(SimklListStatus::PlanToWatch));
        assert_eq!(SimklListStatus::parse("PlanToWatch"), None);
    }

    #[test]
    fn test_entry_ids_normalized() {
        let entry: SimklEntry = serde_json::from_value(serde_json::json!({
            "status": "completed",
            "anime_type": "movie",
            "show": {
                "title": "Akira",
                "year": 1988,
                "poster": "12/12345",
                "genres": null,
                "ids": { "simkl": 38413, "mal": "47", "imdb": "tt0094625", "kitsu": "" }
            }
        }))
        .unwrap();

        let media = entry.media().unwrap();
        assert_eq!(media.ids.simkl.as_deref(), Some("38413"));
        assert_eq!(media.ids.mal.as_deref(), Some("47"));
        assert_eq!(media.ids.kitsu, None);
        assert!(media.genres.is_empty());
        assert!(entry.is_movie());
    }

    #[test]
    fn test_all_items_null_sections() {
        let resp: AllItemsResponse =
            serde_json::from_str(r#"{"anime": null, "shows": []}"#).unwrap();
        assert!(resp.into_entries(SimklListType::Anime).is_empty());
    }
}
