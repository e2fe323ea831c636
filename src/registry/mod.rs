//! Page-asset registry
//!
//! Accepts registration intents from the resolver and renders the
//! corresponding head/footer HTML tags. Dependencies must be registered
//! before their dependents, so insertion order is always a valid load
//! order.

mod tags;

use thiserror::Error;
use tracing::debug;

use crate::config::ThemeConfig;
use crate::resolver::{
    AssetKind, Placement, Registration, Version, CHILD_STYLE_HANDLE, PARENT_STYLE_HANDLE,
};

pub use tags::{asset_url, render_tag};

/// Registry API misuse. Distinct from missing asset files, which are
/// handled upstream by simply not registering the artifact.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("handle '{0}' is already registered")]
    DuplicateHandle(String),

    #[error("handle '{handle}' depends on unregistered handle '{dependency}'")]
    UnknownDependency { handle: String, dependency: String },
}

/// Ordered collection of registered page assets.
#[derive(Debug, Default)]
pub struct AssetRegistry {
    assets: Vec<Registration>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the theme's base stylesheets.
    ///
    /// The child stylesheet (`style.css`) is always registered, versioned
    /// with the theme's own version string; when the config names a
    /// parent stylesheet it is registered first and the child depends on
    /// it. No existence check applies to either: base styles are part of
    /// the theme contract, not build outputs.
    pub fn seed_base_styles(&mut self, theme: &ThemeConfig) -> Result<(), RegistryError> {
        let mut child_deps = Vec::new();

        if let Some(parent) = &theme.parent_stylesheet {
            self.register(Registration {
                handle: PARENT_STYLE_HANDLE.to_string(),
                kind: AssetKind::Stylesheet,
                path: parent.clone(),
                deps: Vec::new(),
                version: Version::Tag(theme.version.clone()),
                placement: Placement::Head,
            })?;
            child_deps.push(PARENT_STYLE_HANDLE.to_string());
        }

        self.register(Registration {
            handle: CHILD_STYLE_HANDLE.to_string(),
            kind: AssetKind::Stylesheet,
            path: "style.css".to_string(),
            deps: child_deps,
            version: Version::Tag(theme.version.clone()),
            placement: Placement::Head,
        })
    }

    /// Register one asset. Its dependencies must already be registered.
    pub fn register(&mut self, registration: Registration) -> Result<(), RegistryError> {
        if self.contains(&registration.handle) {
            return Err(RegistryError::DuplicateHandle(registration.handle));
        }

        for dependency in &registration.deps {
            if !self.contains(dependency) {
                return Err(RegistryError::UnknownDependency {
                    handle: registration.handle,
                    dependency: dependency.clone(),
                });
            }
        }

        debug!(
            "Registered '{}' -> {} (ver={})",
            registration.handle, registration.path, registration.version
        );
        self.assets.push(registration);
        Ok(())
    }

    pub fn contains(&self, handle: &str) -> bool {
        self.assets.iter().any(|a| a.handle == handle)
    }

    pub fn get(&self, handle: &str) -> Option<&Registration> {
        self.assets.iter().find(|a| a.handle == handle)
    }

    /// All registered assets, in load order.
    pub fn assets(&self) -> &[Registration] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Rendered `<link>` tags for head placement, one per line.
    pub fn head_tags(&self, base_url: &str) -> String {
        self.tags_for(Placement::Head, base_url)
    }

    /// Rendered `<script>` tags for end-of-body placement, one per line.
    pub fn footer_tags(&self, base_url: &str) -> String {
        self.tags_for(Placement::Footer, base_url)
    }

    fn tags_for(&self, placement: Placement, base_url: &str) -> String {
        self.assets
            .iter()
            .filter(|a| a.placement == placement)
            .map(|a| render_tag(a, base_url))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
