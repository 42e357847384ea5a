//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable overriding `cms.endpoint`
pub const ENDPOINT_ENV: &str = "PRISMIC_ENDPOINT";
/// Environment variable overriding `cms.access_token`
pub const ACCESS_TOKEN_ENV: &str = "PRISMIC_ACCESS_TOKEN";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub language: String,
    pub timezone: String,

    // URL
    pub root: String,

    // Directory
    pub static_dir: String,

    #[serde(default)]
    pub cms: CmsConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog | sujeito programador".to_string(),
            language: "pt-BR".to_string(),
            timezone: "America/Sao_Paulo".to_string(),

            root: "/".to_string(),

            static_dir: "public".to_string(),

            cms: CmsConfig::default(),
            listing: ListingConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply `PRISMIC_ENDPOINT` / `PRISMIC_ACCESS_TOKEN` from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(ENDPOINT_ENV).ok(),
            std::env::var(ACCESS_TOKEN_ENV).ok(),
        );
    }

    /// Replace CMS settings with non-empty override values
    pub fn apply_overrides(&mut self, endpoint: Option<String>, access_token: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|v| !v.trim().is_empty()) {
            tracing::debug!("Using CMS endpoint from {}", ENDPOINT_ENV);
            self.cms.endpoint = endpoint;
        }
        if let Some(token) = access_token.filter(|v| !v.trim().is_empty()) {
            tracing::debug!("Using CMS access token from {}", ACCESS_TOKEN_ENV);
            self.cms.access_token = Some(token);
        }
    }

    /// Resolve the configured timezone, falling back to UTC
    pub fn tz(&self) -> chrono_tz::Tz {
        match self.timezone.parse::<chrono_tz::Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                tracing::warn!("Unknown timezone {:?}, using UTC", self.timezone);
                chrono_tz::UTC
            }
        }
    }
}

/// Headless CMS connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Prismic API v2 entry point, e.g. `https://my-repo.cdn.prismic.io/api/v2`
    pub endpoint: String,
    pub access_token: Option<String>,
    pub document_type: String,
    pub page_size: u32,
    pub timeout_secs: u64,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            access_token: None,
            document_type: "post".to_string(),
            page_size: 2,
            timeout_secs: 10,
        }
    }
}

/// Listing page settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub route: String,
    /// Seconds before the cached first page is regenerated
    pub revalidate_secs: u64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            route: "/posts".to_string(),
            revalidate_secs: 60 * 30,
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Blog | sujeito programador");
        assert_eq!(config.cms.document_type, "post");
        assert_eq!(config.cms.page_size, 2);
        assert_eq!(config.listing.route, "/posts");
        assert_eq!(config.listing.revalidate_secs, 1800);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
timezone: Europe/Lisbon
cms:
  endpoint: https://my-repo.cdn.prismic.io/api/v2
  page_size: 5
listing:
  revalidate_secs: 60
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.cms.endpoint, "https://my-repo.cdn.prismic.io/api/v2");
        assert_eq!(config.cms.page_size, 5);
        assert_eq!(config.cms.document_type, "post");
        assert_eq!(config.listing.revalidate_secs, 60);
        assert_eq!(config.listing.route, "/posts");
        assert_eq!(config.tz(), chrono_tz::Europe::Lisbon);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "server:\n  port: 8080\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.ip, "127.0.0.1");
    }

    #[test]
    fn test_overrides_skip_empty_values() {
        let mut config = SiteConfig::default();
        config.cms.endpoint = "https://a.cdn.prismic.io/api/v2".to_string();

        config.apply_overrides(Some("  ".to_string()), Some("secret".to_string()));
        assert_eq!(config.cms.endpoint, "https://a.cdn.prismic.io/api/v2");
        assert_eq!(config.cms.access_token.as_deref(), Some("secret"));

        config.apply_overrides(Some("https://b.cdn.prismic.io/api/v2".to_string()), None);
        assert_eq!(config.cms.endpoint, "https://b.cdn.prismic.io/api/v2");
        assert_eq!(config.cms.access_token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_unknown_timezone_falls_back_to_utc() {
        let mut config = SiteConfig::default();
        config.timezone = "Mars/Olympus".to_string();
        assert_eq!(config.tz(), chrono_tz::UTC);
    }
}
