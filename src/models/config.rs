//! Application configuration structures.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Upstream forecast sources
    #[serde(default)]
    pub sources: SourceConfig,

    /// HTTP client behavior settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Local file locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Object storage target
    #[serde(default)]
    pub storage: StorageConfig,

    /// Artifact formatting
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Load the file (if any) and layer environment overrides on top.
    pub fn load_with_env(path: impl AsRef<Path>) -> Self {
        let mut config = if path.as_ref().exists() {
            Self::load_or_default(path)
        } else {
            Self::default()
        };
        config.apply_env(|key| env::var(key).ok());
        config
    }

    /// Apply overrides from a variable lookup (normally the process environment).
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |target: &mut String, key: &str| {
            if let Some(value) = lookup(key) {
                *target = value;
            }
        };

        set(&mut self.sources.site_url, "MET_OFFICE_WEATHER_URL");
        set(&mut self.sources.api_url, "MET_OFFICE_API_URL");
        set(&mut self.sources.api_key, "MET_OFFICE_API_KEY");
        set(&mut self.storage.bucket, "S3_BUCKET");
        set(&mut self.storage.prefix, "S3_PREFIX");
        set(&mut self.storage.region, "S3_REGION");
        set(&mut self.storage.cache_control, "CACHE_CONTROL");
        set(&mut self.paths.locations_file, "LOCATIONS_FILE");

        if let Some(endpoint) = lookup("S3_ENDPOINT") {
            self.storage.endpoint = Some(endpoint);
        }

        if let Some(timeout) = lookup("HTTP_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => self.http.timeout_secs = Some(secs),
                Err(_) => log::warn!("Ignoring invalid HTTP_TIMEOUT_SECS value '{}'", timeout),
            }
        }
    }

    /// Validate the values required to fetch both sources.
    pub fn validate(&self) -> Result<()> {
        self.validate_sources(true, true)
    }

    /// Validate only the sources a run will touch, plus the HTTP settings.
    pub fn validate_sources(&self, site: bool, api: bool) -> Result<()> {
        if site {
            validate_url("sources.site_url", &self.sources.site_url)?;
        }
        if api {
            validate_url("sources.api_url", &self.sources.api_url)?;
            if self.sources.api_key.trim().is_empty() {
                return Err(AppError::validation("sources.api_key is empty"));
            }
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == Some(0) {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        Ok(())
    }

    /// Validate the values required for publishing to a bucket.
    pub fn validate_remote(&self) -> Result<()> {
        if self.storage.bucket.trim().is_empty() {
            return Err(AppError::validation("storage.bucket is empty"));
        }
        if let Some(endpoint) = &self.storage.endpoint {
            validate_url("storage.endpoint", endpoint)?;
        }
        Ok(())
    }
}

fn validate_url(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is empty")));
    }
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|e| AppError::validation(format!("{field} is not a valid URL: {e}")))
}

/// Upstream endpoints and credentials.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SourceConfig {
    /// Mountain forecast page
    #[serde(default)]
    pub site_url: String,

    /// Point forecast endpoint (daily time series)
    #[serde(default)]
    pub api_url: String,

    /// Key sent in the `apiKey` header
    #[serde(default)]
    pub api_key: String,
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds; the client default applies when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: None,
        }
    }
}

/// Local file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// JSON array of named summit coordinates
    #[serde(default = "defaults::locations_file")]
    pub locations_file: String,

    /// Directory for locally published artifacts
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            locations_file: defaults::locations_file(),
            output_dir: defaults::output_dir(),
        }
    }
}

/// S3-compatible bucket settings. Credentials come from the AWS environment chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Custom endpoint for non-AWS providers
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub bucket: String,

    /// Key prefix prepended to artifact names
    #[serde(default)]
    pub prefix: String,

    #[serde(default = "defaults::region")]
    pub region: String,

    /// Cache-Control header for uploaded artifacts
    #[serde(default = "defaults::cache_control")]
    pub cache_control: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            bucket: String::new(),
            prefix: String::new(),
            region: defaults::region(),
            cache_control: defaults::cache_control(),
        }
    }
}

/// Artifact formatting.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Indent JSON artifacts instead of writing them compact
    #[serde(default)]
    pub pretty: bool,
}

mod defaults {
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; fellcast/0.1)".into()
    }
    pub fn locations_file() -> String {
        "data/locations.json".into()
    }
    pub fn output_dir() -> String {
        "output".into()
    }
    pub fn region() -> String {
        "auto".into()
    }
    pub fn cache_control() -> String {
        "public, max-age=300".into()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.sources.site_url = "https://example.com/mountain".into();
        config.sources.api_url = "https://api.example.com/point/daily".into();
        config.sources.api_key = "secret".into();
        config
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.paths.locations_file, "data/locations.json");
        assert_eq!(config.storage.cache_control, "public, max-age=300");
        assert!(config.http.timeout_secs.is_none());
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [sources]
            site_url = "https://example.com/mountain"

            [storage]
            bucket = "weather"
            "#,
        )
        .unwrap();

        assert_eq!(config.sources.site_url, "https://example.com/mountain");
        assert_eq!(config.storage.bucket, "weather");
        assert_eq!(config.storage.region, "auto");
        assert_eq!(config.paths.output_dir, "output");
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("MET_OFFICE_WEATHER_URL", "https://example.com/lakes"),
            ("MET_OFFICE_API_KEY", "from-env"),
            ("S3_ENDPOINT", "https://r2.example.com"),
            ("HTTP_TIMEOUT_SECS", "15"),
        ]
        .into_iter()
        .collect();

        let mut config = valid_config();
        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.sources.site_url, "https://example.com/lakes");
        assert_eq!(config.sources.api_key, "from-env");
        assert_eq!(config.sources.api_url, "https://api.example.com/point/daily");
        assert_eq!(config.storage.endpoint.as_deref(), Some("https://r2.example.com"));
        assert_eq!(config.http.timeout_secs, Some(15));
    }

    #[test]
    fn test_invalid_timeout_is_ignored() {
        let mut config = valid_config();
        config.apply_env(|key| (key == "HTTP_TIMEOUT_SECS").then(|| "soon".to_string()));
        assert!(config.http.timeout_secs.is_none());
    }

    #[test]
    fn test_validate() {
        assert!(valid_config().validate().is_ok());
        assert!(Config::default().validate().is_err());

        let mut config = valid_config();
        config.sources.api_key = "  ".into();
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.sources.site_url = "not a url".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_sources_checks_only_what_runs() {
        let mut config = valid_config();
        config.sources.api_key.clear();

        assert!(config.validate_sources(true, false).is_ok());
        assert!(config.validate_sources(false, true).is_err());

        config.sources.site_url.clear();
        assert!(config.validate_sources(true, false).is_err());
        assert!(config.validate_sources(false, false).is_ok());
    }

    #[test]
    fn test_validate_remote() {
        let mut config = valid_config();
        assert!(config.validate_remote().is_err());

        config.storage.bucket = "weather".into();
        assert!(config.validate_remote().is_ok());
    }
}
