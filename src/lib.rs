//! Thematic library
//!
//! Core functionality for the thematic asset toolkit.

pub mod cli;
pub mod config;
pub mod registry;
pub mod resolver;
pub mod server;
pub mod utils;

pub use cli::Cli;
pub use config::Config;
pub use registry::AssetRegistry;
pub use resolver::{resolve_assets, Environment};
