//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Default globs the dev server watches for changes: templates plus the
/// built and source assets.
pub const DEFAULT_WATCH_GLOBS: &[&str] = &["**/*.html", "**/*.twig", "**/*.css", "**/*.js"];

/// Theme metadata configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Theme name
    pub name: String,

    /// Theme version; doubles as the cache token for the base stylesheets
    #[serde(default = "default_version")]
    pub version: String,

    /// Path or URL of a parent theme stylesheet to load before style.css
    #[serde(default)]
    pub parent_stylesheet: Option<String>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// Asset URL configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Public URL prefix asset tags are rendered under
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "/".to_string()
}

/// Development server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevConfig {
    /// Port to run the dev server on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Enable live reload
    #[serde(default = "default_true")]
    pub reload: bool,

    /// Globs for files whose changes trigger a reload
    #[serde(default = "default_watch")]
    pub watch: Vec<String>,
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            reload: true,
            watch: default_watch(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_true() -> bool {
    true
}

pub fn default_watch() -> Vec<String> {
    DEFAULT_WATCH_GLOBS.iter().map(|g| g.to_string()).collect()
}
