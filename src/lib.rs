//! trend-rs: server-rendered front end for a news site
//!
//! Pages are assembled from a REST content API, bucketed into editorial
//! sections and rendered with embedded Tera templates, either live by the
//! HTTP server or ahead of time into static files.

pub mod api;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod pages;
pub mod search;
pub mod server;
pub mod templates;
pub mod views;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use api::{ApiClient, ContentSource};

/// Site configuration file, relative to the base directory
pub const CONFIG_FILE: &str = "site.yml";

/// The main application
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Public (output) directory of static builds
    pub public_dir: PathBuf,
    /// Static assets served under `/static`
    pub static_dir: PathBuf,
    /// Content API client
    pub api: Arc<ApiClient>,
}

impl Site {
    /// Create a new site from a directory
    ///
    /// Reads `site.yml` when present, then applies environment overrides.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();

        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join(&config.static_dir);
        let api = Arc::new(ApiClient::new(config.api_base_url.as_deref()));

        Ok(Self {
            config,
            base_dir,
            public_dir,
            static_dir,
            api,
        })
    }

    /// The content API as a trait object
    pub fn source(&self) -> Arc<dyn ContentSource> {
        self.api.clone()
    }

    /// Render the site into the public directory
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self, &self.public_dir).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
