use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::GenreMatch;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub simkl: SimklConfig,
    pub catalog: CatalogConfig,
    pub manifest: ManifestConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub http_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            http_port: 7000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimklConfig {
    pub api_base_url: String,
    /// Shared client id; takes precedence over `PRIVATE_SIMKL_CLIENT_ID`
    pub default_client_id: Option<String>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for SimklConfig {
    fn default() -> Self {
        Self {
            api_base_url: syncribullet_media_providers::simkl::DEFAULT_API_BASE_URL.to_string(),
            default_client_id: None,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Compare `genre` filters ignoring case
    pub case_insensitive_genres: bool,
    /// Answer provider failures with 502 instead of an empty catalog
    pub surface_upstream_errors: bool,
}

impl CatalogConfig {
    #[must_use]
    pub const fn genre_match(&self) -> GenreMatch {
        if self.case_insensitive_genres {
            GenreMatch::CaseInsensitive
        } else {
            GenreMatch::Exact
        }
    }
}

/// Identity of the published add-on
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    pub id: String,
    pub version: String,
    pub name: String,
    pub description: String,
    pub logo: Option<String>,
    pub background: Option<String>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            id: "com.syncribullet".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            name: "SyncriBullet".to_string(),
            description: "Your watch lists from Simkl and other trackers as catalogs".to_string(),
            logo: None,
            background: None,
        }
    }
}

impl Config {
    /// Load configuration from multiple sources with priority:
    /// 1. Environment variables (highest priority)
    /// 2. Config file (if provided)
    /// 3. Defaults (lowest priority)
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_file {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path));
            } else {
                tracing::warn!(path, "config file not found, using defaults");
            }
        }

        // SYNCRIBULLET_SERVER__HTTP_PORT, SYNCRIBULLET_SIMKL__DEFAULT_CLIENT_ID, ...
        builder = builder.add_source(
            Environment::with_prefix("SYNCRIBULLET")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load from environment variables only (for Docker/K8s)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load from file path
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Self::load(Some(path))
    }

    /// Get HTTP address
    #[must_use]
    pub fn http_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.http_port)
    }

    /// Check values the deserializer cannot; returns every problem found
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.server.http_port == 0 {
            errors.push("server.http_port must be non-zero".to_string());
        }
        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            errors.push(format!(
                "logging.format must be 'json' or 'pretty', got '{}'",
                self.logging.format
            ));
        }
        match url::Url::parse(&self.simkl.api_base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(format!(
                "simkl.api_base_url must be http(s), got scheme '{}'",
                url.scheme()
            )),
            Err(e) => errors.push(format!("simkl.api_base_url is not a valid URL: {e}")),
        }
        if self.simkl.request_timeout_secs == 0 {
            errors.push("simkl.request_timeout_secs must be non-zero".to_string());
        }
        if self.manifest.id.is_empty() || self.manifest.name.is_empty() {
            errors.push("manifest.id and manifest.name must be set".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
