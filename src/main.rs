//! Thematic - a theme asset toolkit
//!
//! Decides which built stylesheet/script artifacts a theme page should
//! load for the current environment, attaches cache-busting version
//! tokens derived from file modification times, and serves the theme
//! locally with live reload during development.
//!
//! # Features
//! - Environment-aware asset resolution (dev builds with source fallback,
//!   minified production builds)
//! - Dependency-ordered tag emission with `?ver=` cache busting
//! - Dev server with WebSocket-based live reload
//! - Theme scaffolding

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod config;
mod registry;
mod resolver;
mod server;
mod utils;

pub use cli::Cli;
pub use config::Config;

/// Initialize the logging/tracing system
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("thematic=debug,tower_http=debug"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("thematic=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    cli.execute().await
}
