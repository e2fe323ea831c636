//! Command-line interface
//!
//! Provides the main CLI structure using clap with subcommands for:
//! - `resolve`: Resolve and print the assets a page would load
//! - `dev`: Development server with live reload
//! - `init`: Theme scaffolding

mod dev;
mod init;
mod resolve;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

pub use dev::{DevCommand, DevServerOptions};
pub use init::InitCommand;
pub use resolve::ResolveCommand;

/// Thematic - a theme asset toolkit
#[derive(Parser, Debug)]
#[command(name = "thematic")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to theme.toml config file
    #[arg(short, long, global = true, default_value = "theme.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the stylesheet/script assets a page would load
    Resolve(ResolveCommand),

    /// Start development server with live reload
    Dev(DevCommand),

    /// Initialize a new theme
    Init(InitCommand),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        print_banner();

        match &self.command {
            Commands::Resolve(cmd) => cmd.execute(&self.config).await,
            Commands::Dev(cmd) => cmd.execute(&self.config).await,
            Commands::Init(cmd) => cmd.execute().await,
        }
    }
}

/// Print the thematic banner
fn print_banner() {
    eprintln!(
        "\n{} {} {}\n",
        "✦".cyan(),
        "thematic".bold().cyan(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
