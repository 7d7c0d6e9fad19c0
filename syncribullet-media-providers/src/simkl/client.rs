//! Simkl HTTP Client

use std::sync::LazyLock;
use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Client,
};

use super::types::{AllItemsResponse, SimklEntry, SimklListStatus, SimklListType};
use crate::error::{bytes_with_limit, check_response, ProviderClientError};

/// Production API host
pub const DEFAULT_API_BASE_URL: &str = "https://api.simkl.com";

/// Poster CDN; a poster fragment `p` resolves to `{POSTER_BASE_URL}/{p}_m.jpg`
pub const POSTER_BASE_URL: &str = "https://simkl.in/posters";

const SIMKL_API_KEY: &str = "simkl-api-key";

/// Shared HTTP client for all Simkl requests (connection pooling)
static SHARED_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to build Simkl shared HTTP client")
});

/// Simkl HTTP Client
#[derive(Clone)]
pub struct SimklClient {
    base_url: String,
    access_token: Option<String>,
    client_id: Option<String>,
    client: Client,
}

impl SimklClient {
    /// Create an anonymous client against the production API (reuses shared connection pool)
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            access_token: None,
            client_id: None,
            client: SHARED_CLIENT.clone(),
        }
    }

    /// Build a pooled client with custom timeouts
    pub fn build_http_client(
        connect_timeout: Duration,
        timeout: Duration,
    ) -> Result<Client, ProviderClientError> {
        Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| ProviderClientError::InvalidConfig(e.to_string()))
    }

    /// Point the client at another API host (tests, proxies)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a specific `reqwest` client instead of the shared one
    #[must_use]
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Attach user credentials. Either half may be missing.
    #[must_use]
    pub fn with_credentials(
        mut self,
        access_token: Option<impl Into<String>>,
        client_id: Option<impl Into<String>>,
    ) -> Self {
        self.access_token = access_token.map(Into::into).filter(|s: &String| !s.is_empty());
        self.client_id = client_id.map(Into::into).filter(|s: &String| !s.is_empty());
        self
    }

    fn build_headers(&self) -> Result<HeaderMap, ProviderClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(ref token) = self.access_token {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);
        }
        if let Some(ref client_id) = self.client_id {
            headers.insert(SIMKL_API_KEY, HeaderValue::from_str(client_id)?);
        }

        Ok(headers)
    }

    /// Fetch every entry of one library section with the given status.
    ///
    /// Simkl answers an empty library with an empty body or `null`; both
    /// yield an empty list.
    pub async fn all_items(
        &self,
        list_type: SimklListType,
        status: SimklListStatus,
    ) -> Result<Vec<SimklEntry>, ProviderClientError> {
        let url = format!("{}/sync/all-items/{}/{}", self.base_url, list_type, status);

        tracing::debug!(%url, authenticated = self.has_credentials(), "fetching simkl library");

        let response = self
            .client
            .get(&url)
            .headers(self.build_headers()?)
            .query(&[("extended", "full")])
            .send()
            .await?;

        let response = check_response(response)?;
        let body = bytes_with_limit(response).await?;
        let trimmed = body.trim_ascii();
        if trimmed.is_empty() || trimmed == b"null" || trimmed == b"[]" {
            return Ok(Vec::new());
        }

        let items: AllItemsResponse = serde_json::from_slice(trimmed)?;
        Ok(items.into_entries(list_type))
    }

    /// Get API base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if client has an access token
    #[must_use]
    pub const fn has_credentials(&self) -> bool {
        self.access_token.is_some()
    }
}

impl Default for SimklClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_creation() {
        let client = SimklClient::new();
        assert_eq!(client.base_url(), DEFAULT_API_BASE_URL);
        assert!(!client.has_credentials());

        let client = SimklClient::new()
            .with_base_url("http://localhost:1234/")
            .with_credentials(Some("token"), None::<String>);
        assert_eq!(client.base_url(), "http://localhost:1234");
        assert!(client.has_credentials());
    }

    #[test]
    fn test_empty_credentials_ignored() {
        let client = SimklClient::new().with_credentials(Some(""), Some(""));
        assert!(!client.has_credentials());
        let headers = client.build_headers().unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
        assert!(headers.get(SIMKL_API_KEY).is_none());
    }

    #[tokio::test]
    async fn test_all_items_sends_credentials() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sync/all-items/anime/completed"))
            .and(query_param("extended", "full"))
            .and(header("Authorization", "Bearer secret-token"))
            .and(header("simkl-api-key", "client-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "anime": [
                    {
                        "status": "completed",
                        "anime_type": "tv",
                        "show": {
                            "title": "Cowboy Bebop",
                            "poster": "10/10abc",
                            "genres": ["Action", "Comedy"],
                            "ids": { "simkl": 37089, "imdb": "tt0213338" }
                        }
                    }
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = SimklClient::new()
            .with_base_url(mock_server.uri())
            .with_credentials(Some("secret-token"), Some("client-123"));

        let entries = client
            .all_items(SimklListType::Anime, SimklListStatus::Completed)
            .await
            .unwrap();

        assert_eq!(entries.len(), 1);
        let media = entries[0].media().unwrap();
        assert_eq!(media.title, "Cowboy Bebop");
        assert_eq!(media.ids.imdb.as_deref(), Some("tt0213338"));
    }

    #[tokio::test]
    async fn test_all_items_null_body_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sync/all-items/movies/plantowatch"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&mock_server)
            .await;

        let client = SimklClient::new().with_base_url(mock_server.uri());
        let entries = client
            .all_items(SimklListType::Movies, SimklListStatus::PlanToWatch)
            .await
            .unwrap();

        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_all_items_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = SimklClient::new()
            .with_base_url(mock_server.uri())
            .with_credentials(Some("expired"), Some("client-123"));
        let err = client
            .all_items(SimklListType::Shows, SimklListStatus::Watching)
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderClientError::Auth(_)));
    }

    #[tokio::test]
    async fn test_all_items_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = SimklClient::new().with_base_url(mock_server.uri());
        let err = client
            .all_items(SimklListType::Shows, SimklListStatus::Hold)
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderClientError::Http { .. }));
    }
}
