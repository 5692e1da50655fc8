//! TOML configuration parsing.
//!
//! A single file (default `./config/catalog.toml`) drives the remote API
//! endpoint, the HTTP bind address, listing defaults, and the log filter.
//!
//! ```toml
//! [api]
//! endpoint = "http://localhost/api-actriz.php"
//!
//! [server]
//! bind = "127.0.0.1:4321"
//!
//! [listing]
//! per_page = 12
//! mode = "server"
//!
//! [log]
//! filter = "info"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Endpoint the PHP catalog API is served from when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost/api-actriz.php";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

/// Where filtering, sorting and pagination of the listing happen.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListingMode {
    /// The remote `filter` action does the work and reports a `count`.
    #[default]
    Server,
    /// The full listing is fetched once and shaped locally.
    Client,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListingConfig {
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default)]
    pub mode: ListingMode,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            mode: ListingMode::default(),
        }
    }
}

fn default_per_page() -> u32 {
    12
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Config {
    /// Configuration pointing at `endpoint` with every other setting defaulted.
    ///
    /// Used by the CLI when no config file exists and by tests.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                endpoint: endpoint.into(),
            },
            server: ServerConfig {
                bind: "127.0.0.1:4321".to_string(),
                cors_origins: default_cors_origins(),
            },
            listing: ListingConfig::default(),
            log: LogConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.listing.per_page == 0 {
        anyhow::bail!("listing.per_page must be >= 1");
    }

    let endpoint = reqwest::Url::parse(&config.api.endpoint)
        .with_context(|| format!("api.endpoint is not a valid URL: {}", config.api.endpoint))?;
    match endpoint.scheme() {
        "http" | "https" => {}
        other => anyhow::bail!(
            "api.endpoint must use http or https, got '{}'",
            other
        ),
    }

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let file = write_config("[server]\nbind = \"127.0.0.1:9000\"\n");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.api.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.listing.per_page, 12);
        assert_eq!(config.listing.mode, ListingMode::Server);
        assert_eq!(config.server.cors_origins, vec!["*".to_string()]);
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn test_full_config() {
        let file = write_config(
            r#"
[api]
endpoint = "https://catalog.example.com/api-actriz.php"

[server]
bind = "0.0.0.0:8080"
cors_origins = ["https://catalog.example.com"]

[listing]
per_page = 24
mode = "client"

[log]
filter = "debug"
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(
            config.api.endpoint,
            "https://catalog.example.com/api-actriz.php"
        );
        assert_eq!(config.listing.per_page, 24);
        assert_eq!(config.listing.mode, ListingMode::Client);
        assert_eq!(config.log.filter, "debug");
    }

    #[test]
    fn test_zero_per_page_rejected() {
        let file = write_config("[server]\nbind = \"127.0.0.1:9000\"\n[listing]\nper_page = 0\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("per_page"));
    }

    #[test]
    fn test_non_http_endpoint_rejected() {
        let file = write_config(
            "[api]\nendpoint = \"ftp://example.com/api\"\n[server]\nbind = \"127.0.0.1:9000\"\n",
        );
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let file = write_config("[server]\nbind = \"127.0.0.1:9000\"\n[listing]\nmode = \"hybrid\"\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/catalog.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
