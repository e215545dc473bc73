// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, or json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    /// Seconds to wait for in-flight responses during shutdown
    pub shutdown_grace: u64,
}

/// Site configuration: document root, named pages, and asset handling
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Document root; every servable file lives beneath it
    #[serde(default = "default_site_root")]
    pub root: String,
    /// Exact-match route table: request path -> page file under the root
    #[serde(default = "default_pages")]
    pub pages: HashMap<String, String>,
    /// Custom 404 page, relative to the root
    #[serde(default = "default_not_found_page")]
    pub not_found_page: String,
    /// Request-path prefix treated as static assets regardless of extension
    #[serde(default = "default_asset_prefix")]
    pub asset_prefix: String,
    /// max-age for the public Cache-Control on assets (seconds)
    #[serde(default = "default_asset_cache_max_age")]
    pub asset_cache_max_age: u32,
}

#[allow(clippy::missing_const_for_fn)]
fn default_site_root() -> String {
    "site".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_not_found_page() -> String {
    "pages/404.html".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_asset_prefix() -> String {
    "/styles".to_string()
}

const fn default_asset_cache_max_age() -> u32 {
    3600
}

fn default_pages() -> HashMap<String, String> {
    let mut pages = HashMap::new();
    pages.insert("/".to_string(), "pages/home.html".to_string());
    pages.insert("/home".to_string(), "pages/home.html".to_string());
    pages.insert("/about".to_string(), "pages/about.html".to_string());
    pages.insert("/services".to_string(), "pages/services.html".to_string());
    pages.insert("/contact".to_string(), "pages/contact.html".to_string());
    pages
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: default_site_root(),
            pages: default_pages(),
            not_found_page: default_not_found_page(),
            asset_prefix: default_asset_prefix(),
            asset_cache_max_age: default_asset_cache_max_age(),
        }
    }
}

impl SiteConfig {
    pub fn root_path(&self) -> &Path {
        Path::new(&self.root)
    }
}
