//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::error::Result;

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Base URL the corpus assets are served from
    pub data_url: Option<String>,
    /// Local directory holding the corpus assets (overrides `data_url`)
    pub data_dir: Option<PathBuf>,
    /// Hosted backend base URL
    pub backend_url: String,
    /// Hosted backend anon key
    pub backend_anon_key: String,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            data_url: None,
            data_dir: None,
            backend_url: String::new(),
            backend_anon_key: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(url) = env::var("BIBLE_DATA_URL") {
            config.data_url = Some(url);
        }

        // Local data directory: tilde-expanded, kept only if it exists
        config.data_dir = env::var("BIBLE_DATA_DIR").ok().and_then(|path| {
            let p = PathBuf::from(shellexpand::tilde(&path).to_string());
            p.is_dir().then_some(p)
        });

        if let Ok(url) = env::var("SUPABASE_URL") {
            config.backend_url = url;
        }

        if let Ok(key) = env::var("SUPABASE_ANON_KEY") {
            config.backend_anon_key = key;
        }

        Ok(config)
    }

    /// Check if a corpus asset location is configured
    pub const fn has_asset_source(&self) -> bool {
        self.data_url.is_some() || self.data_dir.is_some()
    }

    /// Check if backend credentials are configured
    pub const fn has_backend_credentials(&self) -> bool {
        !self.backend_url.is_empty() && !self.backend_anon_key.is_empty()
    }
}
