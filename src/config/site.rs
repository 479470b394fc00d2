//! Site configuration (site.yml + environment)

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable selecting the content API base URL
pub const API_BASE_URL_ENV: &str = "TREND_API_BASE_URL";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub publisher: String,
    pub default_author: String,
    pub language: String,
    pub timezone: String,

    // Content API; absent means offline
    pub api_base_url: Option<String>,

    // Assets
    pub logo: String,
    pub fallback_image: String,
    pub static_dir: String,
    pub public_dir: String,

    // Date / Time format
    pub date_format: String,

    // Chrome
    #[serde(default)]
    pub footer: Vec<LinkGroup>,
    #[serde(default)]
    pub social: Vec<Link>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "TheTrend".to_string(),
            tagline: "Your source for trending news".to_string(),
            description: "Your source for trending news".to_string(),
            publisher: "TheTrend254".to_string(),
            default_author: "TheTrend Desk".to_string(),
            language: "en".to_string(),
            timezone: "Africa/Nairobi".to_string(),

            api_base_url: None,

            logo: "/static/images/logo.png".to_string(),
            fallback_image: "https://res.cloudinary.com/dfepod4q0/image/upload/v1759245188/placeholder-hero_pcaegu.jpg".to_string(),
            static_dir: "static".to_string(),
            public_dir: "public".to_string(),

            date_format: "MMMM DD, YYYY HH:mm".to_string(),

            footer: default_footer(),
            social: default_social(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(config)
    }

    /// Override settings from the environment
    pub fn apply_env(&mut self) {
        self.apply_api_base_url(std::env::var(API_BASE_URL_ENV).ok());
    }

    fn apply_api_base_url(&mut self, value: Option<String>) {
        if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            tracing::debug!("Using content API from {}: {}", API_BASE_URL_ENV, url);
            self.api_base_url = Some(url);
        }
    }

    /// Site timezone, falling back to UTC on an unknown name
    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or_else(|_| {
            tracing::warn!("Unknown timezone {:?}, using UTC", self.timezone);
            Tz::UTC
        })
    }
}

/// A titled group of links (footer columns)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkGroup {
    pub title: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// A single navigation link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub name: String,
    pub url: String,
}

impl Link {
    fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

fn default_footer() -> Vec<LinkGroup> {
    vec![
        LinkGroup {
            title: "More about our company".to_string(),
            links: vec![
                Link::new("About Us", "/about-us"),
                Link::new("Contact Us", "/contact"),
                Link::new("Our Manifesto", "/manifesto"),
                Link::new("Advertise with us", "/advertise"),
                Link::new("Work with us", "/careers"),
                Link::new("DMCA removal", "/dmca"),
                Link::new("Privacy Policy", "/privacy"),
                Link::new("Terms & Conditions", "/terms"),
                Link::new("Policies & Standards", "/policies"),
                Link::new("Cookie Policy", "/cookies"),
                Link::new("Do Not Sell My Personal Info", "/do-not-sell"),
            ],
        },
        LinkGroup {
            title: "Social media".to_string(),
            links: default_social(),
        },
    ]
}

fn default_social() -> Vec<Link> {
    vec![
        Link::new("Facebook", "https://facebook.com"),
        Link::new("Instagram", "https://instagram.com"),
        Link::new("YouTube", "https://youtube.com"),
        Link::new("X", "https://x.com"),
    ]
}
