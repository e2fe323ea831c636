//! Resolve command implementation

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tracing::info;

use crate::config::Config;
use crate::registry::AssetRegistry;
use crate::resolver::{resolve_assets, DiskFs, Environment};
use crate::utils;

/// Resolve the stylesheet/script assets a page would load
#[derive(Args, Debug)]
pub struct ResolveCommand {
    /// Environment flag; only "development" selects development assets
    #[arg(long, env = "THEME_ENV")]
    pub env: Option<String>,

    /// Print the rendered HTML tags instead of the summary table
    #[arg(long)]
    pub tags: bool,

    /// Print the registrations as JSON
    #[arg(long, conflicts_with = "tags")]
    pub json: bool,
}

impl ResolveCommand {
    pub async fn execute(&self, config_path: &str) -> Result<()> {
        info!("Loading configuration from {}", config_path);
        let config = Config::load(config_path)?;

        let environment = Environment::from_flag(self.env.as_deref());
        let fs = DiskFs::new(config.root.clone());

        eprintln!(
            "{} Resolving assets for {} environment...",
            "→".blue(),
            environment.to_string().cyan()
        );

        let mut registry = AssetRegistry::new();
        registry.seed_base_styles(&config.theme)?;

        for registration in resolve_assets(environment, &fs) {
            registry.register(registration)?;
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(registry.assets())?);
            return Ok(());
        }

        if self.tags {
            let head = registry.head_tags(&config.assets.base_url);
            let footer = registry.footer_tags(&config.assets.base_url);
            if !head.is_empty() {
                println!("{}", head);
            }
            if !footer.is_empty() {
                println!("{}", footer);
            }
            return Ok(());
        }

        eprintln!(
            "\n{} Registered {} asset(s)\n",
            "✓".green().bold(),
            registry.len()
        );

        for asset in registry.assets() {
            let size = std::fs::metadata(config.root.join(&asset.path))
                .map(|m| utils::format_size(m.len() as usize))
                .unwrap_or_else(|_| "missing".to_string());

            eprintln!(
                "  {} {} {} {}",
                "•".dimmed(),
                asset.handle.cyan(),
                asset.path,
                format!("ver={} ({})", asset.version, size).dimmed()
            );
        }

        eprintln!();

        Ok(())
    }
}
