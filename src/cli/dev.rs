//! Development server command implementation

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tracing::info;

use crate::config::Config;
use crate::resolver::Environment;
use crate::server::DevServer;

/// Start development server with live reload
#[derive(Args, Debug)]
pub struct DevCommand {
    /// Port to run the dev server on (defaults to [dev] port)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind to (defaults to [dev] host)
    #[arg(long)]
    pub host: Option<String>,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,

    /// Disable live reload
    #[arg(long)]
    pub no_reload: bool,

    /// Environment flag; the dev server resolves development assets
    /// unless told otherwise
    #[arg(long, env = "THEME_ENV", default_value = "development")]
    pub env: String,
}

impl DevCommand {
    pub async fn execute(&self, config_path: &str) -> Result<()> {
        info!("Loading configuration from {}", config_path);
        let config = Config::load(config_path)?;

        let environment = Environment::from_flag(Some(self.env.as_str()));
        let host = self.host.clone().unwrap_or_else(|| config.dev.host.clone());
        let port = self.port.unwrap_or(config.dev.port);
        let reload = !self.no_reload && config.dev.reload;

        let addr = format!("{}:{}", host, port);

        eprintln!(
            "{} Starting dev server at {}\n",
            "→".blue(),
            format!("http://{}", addr).cyan().underline()
        );

        eprintln!(
            "  {} Resolving {} assets",
            "•".dimmed(),
            environment.to_string().cyan()
        );

        if reload {
            eprintln!("  {} Live reload {}", "•".dimmed(), "enabled".green());
        }

        eprintln!("  {} Press {} to stop\n", "•".dimmed(), "Ctrl+C".yellow());

        let server = DevServer::new(
            Arc::new(config),
            environment,
            DevServerOptions {
                host,
                port,
                reload,
                open: self.open,
            },
        )?;

        server.start().await
    }
}

/// Development server options
#[derive(Debug, Clone)]
pub struct DevServerOptions {
    pub host: String,
    pub port: u16,
    pub reload: bool,
    pub open: bool,
}
