//! Configuration handling
//!
//! Parses and manages theme.toml configuration files.

mod schema;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub use schema::*;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Theme metadata
    pub theme: ThemeConfig,

    /// Asset URL settings
    #[serde(default)]
    pub assets: AssetsConfig,

    /// Development server settings
    #[serde(default)]
    pub dev: DevConfig,

    /// Theme root directory (computed from config file location)
    #[serde(skip)]
    pub root: PathBuf,
}

impl Config {
    /// Load configuration from a file path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let canonical_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };

        let content = std::fs::read_to_string(&canonical_path)
            .with_context(|| format!("Failed to read config file: {}", canonical_path.display()))?;

        let mut config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse theme.toml")?;

        // The theme root is the directory containing the config file
        config.root = canonical_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        config.validate()?;

        Ok(config)
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self {
            theme: ThemeConfig {
                name: "my-theme".to_string(),
                version: "0.1.0".to_string(),
                parent_stylesheet: None,
            },
            assets: AssetsConfig::default(),
            dev: DevConfig::default(),
            root: PathBuf::from("."),
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.theme.name.trim().is_empty() {
            anyhow::bail!("[theme] name must not be empty");
        }

        semver::Version::parse(&self.theme.version).with_context(|| {
            format!(
                "[theme] version '{}' is not a valid semver version",
                self.theme.version
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.toml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_minimal_config() {
        let (dir, path) = write_config(
            r#"
[theme]
name = "custom"
"#,
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.theme.name, "custom");
        assert_eq!(config.theme.version, "0.1.0");
        assert_eq!(config.assets.base_url, "/");
        assert_eq!(config.dev.port, 3000);
        assert_eq!(config.dev.watch, default_watch());
        assert_eq!(config.root, dir.path());
    }

    #[test]
    fn test_load_full_config() {
        let (_dir, path) = write_config(
            r#"
[theme]
name = "custom"
version = "2.1.0"
parent_stylesheet = "../parent/style.css"

[assets]
base_url = "https://cdn.example.com/themes/custom"

[dev]
port = 3100
host = "0.0.0.0"
reload = false
watch = ["**/*.twig"]
"#,
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.theme.version, "2.1.0");
        assert_eq!(
            config.theme.parent_stylesheet.as_deref(),
            Some("../parent/style.css")
        );
        assert_eq!(config.assets.base_url, "https://cdn.example.com/themes/custom");
        assert_eq!(config.dev.port, 3100);
        assert!(!config.dev.reload);
        assert_eq!(config.dev.watch, vec!["**/*.twig".to_string()]);
    }

    #[test]
    fn test_rejects_invalid_version() {
        let (_dir, path) = write_config(
            r#"
[theme]
name = "custom"
version = "not-a-version"
"#,
        );

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("not a valid semver version"));
    }

    #[test]
    fn test_rejects_empty_name() {
        let (_dir, path) = write_config(
            r#"
[theme]
name = "  "
"#,
        );

        assert!(Config::load(&path).is_err());
    }
}
