//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable overriding `api.endpoint`
pub const ENDPOINT_ENV: &str = "PRISMIC_API_ENDPOINT";

/// Environment variable overriding `api.access_token`
pub const ACCESS_TOKEN_ENV: &str = "PRISMIC_ACCESS_TOKEN";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub language: String,
    pub timezone: String,

    // Date format (chrono strftime, localized month/day names)
    pub date_format: String,

    // Directory
    pub public_dir: String,

    // Content API
    pub api: ApiConfig,

    // Detail pages
    pub words_per_minute: usize,

    // Seconds before the list page is regenerated by the server
    pub revalidate: u64,

    // UI strings
    pub load_more_text: String,
    pub loading_text: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "spacetraveling".to_string(),
            language: "pt-BR".to_string(),
            timezone: String::new(),

            date_format: "%-d de %B de %Y".to_string(),

            public_dir: "public".to_string(),

            api: ApiConfig::default(),

            words_per_minute: 200,
            revalidate: 60 * 60 * 24,

            load_more_text: "Carregar mais posts".to_string(),
            loading_text: "Carregando...".to_string(),
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

    /// Apply `PRISMIC_API_ENDPOINT` / `PRISMIC_ACCESS_TOKEN` overrides
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(ENDPOINT_ENV).ok(),
            std::env::var(ACCESS_TOKEN_ENV).ok(),
        );
    }

    fn apply_overrides(&mut self, endpoint: Option<String>, token: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            tracing::debug!("API endpoint overridden from environment");
            self.api.endpoint = endpoint;
        }
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.api.access_token = Some(token);
        }
    }

    /// Serialize to YAML, used by `init`
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Content API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Prismic v2 API root, e.g. `https://my-repo.cdn.prismic.io/api/v2`
    pub endpoint: String,
    pub access_token: Option<String>,
    pub document_type: String,
    pub page_size: u32,
    /// Fields requested for list entries, without the document type prefix
    pub fetch: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            access_token: None,
            document_type: "posts".to_string(),
            page_size: 4,
            fetch: vec![
                "title".to_string(),
                "subtitle".to_string(),
                "author".to_string(),
            ],
        }
    }
}

impl ApiConfig {
    /// Fully-qualified fetch fields, e.g. `posts.title`
    pub fn fetch_fields(&self) -> Vec<String> {
        self.fetch
            .iter()
            .map(|field| format!("{}.{}", self.document_type, field))
            .collect()
    }
}
