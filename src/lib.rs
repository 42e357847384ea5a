//! prismic-blog: a server-rendered blog front end for the Prismic headless CMS
//!
//! Posts are fetched from the CMS, mapped into small view models and
//! rendered with embedded Tera templates: a paginated listing page and a
//! page per post.

pub mod cache;
pub mod cms;
pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod richtext;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The main blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    ///
    /// Reads `_config.yml` when present, then applies the CMS environment
    /// overrides.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self { config, base_dir })
    }

    /// Directory with static assets served under `/assets`
    pub fn static_dir(&self) -> std::path::PathBuf {
        self.base_dir.join(&self.config.static_dir)
    }

    /// Build a CMS client from the configuration
    pub fn client(&self) -> Result<cms::PrismicClient> {
        Ok(cms::PrismicClient::new(&self.config.cms)?)
    }
}
