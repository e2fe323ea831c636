//! Asset resolution
//!
//! Decides, per page render, which concrete stylesheet and script files
//! to expose and with what cache-busting token, without ever referencing
//! a non-existent file.
//!
//! In development the built `dev_build/` artifacts are preferred, falling
//! back to the unbuilt sources under `assets/` when a build has not run
//! yet. In production only the minified `dist/` artifacts are considered;
//! a missing production artifact is simply not registered, so a broken
//! build never emits a broken reference.

mod fs;

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

pub use fs::{DiskFs, ThemeFs};

/// Development build outputs, preferred when the environment is development.
pub const DEV_BUILD_STYLESHEET: &str = "dev_build/styles.css";
pub const DEV_BUILD_SCRIPT: &str = "dev_build/scripts.js";

/// Unbuilt sources, the development fallback when no dev build exists.
pub const SOURCE_STYLESHEET: &str = "assets/css/styles.css";
pub const SOURCE_SCRIPT: &str = "assets/js/scripts.js";

/// Minified production build outputs. No fallback applies to these.
pub const DIST_STYLESHEET: &str = "dist/styles.min.css";
pub const DIST_SCRIPT: &str = "dist/scripts.min.js";

/// Handle for the optional parent theme stylesheet.
pub const PARENT_STYLE_HANDLE: &str = "parent-style";
/// Handle for the theme's own base stylesheet (`style.css`).
pub const CHILD_STYLE_HANDLE: &str = "child-style";
/// Handle for the built stylesheet; loads after the base styles.
pub const BUILT_STYLE_HANDLE: &str = "tailwind-style";
/// Handle for the built script; placed at the end of the document body.
pub const SCRIPT_HANDLE: &str = "child-scripts";

/// Runtime environment the assets are resolved for.
///
/// Only the literal flag value `"development"` selects development
/// resolution; anything else, including an unset flag, is production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Interpret an environment flag value. The comparison is exact and
    /// case-sensitive: `"Development"` selects production resolution.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("development") => Environment::Development,
            _ => Environment::Production,
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// The two categories of front-end asset this tool manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Stylesheet,
    Script,
}

/// Where a registered asset is emitted in the page output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Head,
    Footer,
}

/// Cache-busting token appended to an asset URL.
///
/// Resolved build artifacts carry their file modification time; the base
/// stylesheets carry the theme's own version string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Version {
    Time(u64),
    Tag(String),
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Time(t) => write!(f, "{}", t),
            Version::Tag(tag) => write!(f, "{}", tag),
        }
    }
}

/// A registration intent: one asset the page should load.
///
/// Pure data; applying it to an [`AssetRegistry`](crate::registry::AssetRegistry)
/// is the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    /// Unique handle the asset is registered under.
    pub handle: String,

    /// Artifact kind.
    pub kind: AssetKind,

    /// Theme-relative path of the chosen file.
    pub path: String,

    /// Handles this asset must load after.
    pub deps: Vec<String>,

    /// Cache-busting token.
    pub version: Version,

    /// Head or end-of-body placement.
    pub placement: Placement,
}

/// Resolve the stylesheet and script to load for the given environment.
///
/// Returns zero, one, or two registrations depending on which artifacts
/// exist. Nothing is cached: every call re-reads the filesystem, so a
/// rebuild between two invocations changes the next resolution.
pub fn resolve_assets(environment: Environment, fs: &dyn ThemeFs) -> Vec<Registration> {
    debug!("Resolving assets for {} environment", environment);

    let mut registrations = Vec::with_capacity(2);

    if let Some(registration) = resolve_stylesheet(environment, fs) {
        registrations.push(registration);
    }

    if let Some(registration) = resolve_script(environment, fs) {
        registrations.push(registration);
    }

    registrations
}

fn resolve_stylesheet(environment: Environment, fs: &dyn ThemeFs) -> Option<Registration> {
    let path = match environment {
        Environment::Development => with_source_fallback(fs, DEV_BUILD_STYLESHEET, SOURCE_STYLESHEET),
        Environment::Production => DIST_STYLESHEET,
    };

    let version = version_of(path, fs)?;

    Some(Registration {
        handle: BUILT_STYLE_HANDLE.to_string(),
        kind: AssetKind::Stylesheet,
        path: path.to_string(),
        deps: vec![CHILD_STYLE_HANDLE.to_string()],
        version,
        placement: Placement::Head,
    })
}

fn resolve_script(environment: Environment, fs: &dyn ThemeFs) -> Option<Registration> {
    let path = match environment {
        Environment::Development => with_source_fallback(fs, DEV_BUILD_SCRIPT, SOURCE_SCRIPT),
        Environment::Production => DIST_SCRIPT,
    };

    let version = version_of(path, fs)?;

    Some(Registration {
        handle: SCRIPT_HANDLE.to_string(),
        kind: AssetKind::Script,
        path: path.to_string(),
        deps: Vec::new(),
        version,
        placement: Placement::Footer,
    })
}

/// Prefer the built artifact, substituting the source location when the
/// build output is absent. Development only; production never falls back.
fn with_source_fallback<'a>(fs: &dyn ThemeFs, built: &'a str, source: &'a str) -> &'a str {
    if fs.exists(Path::new(built)) {
        built
    } else {
        debug!("'{}' not built, falling back to '{}'", built, source);
        source
    }
}

/// Modification-time token for the chosen path, or `None` when the file
/// does not exist and the artifact should be skipped.
fn version_of(path: &str, fs: &dyn ThemeFs) -> Option<Version> {
    let rel = Path::new(path);

    if !fs.exists(rel) {
        debug!("'{}' does not exist, skipping registration", path);
        return None;
    }

    fs.modified_at(rel).map(Version::Time)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    /// In-memory filesystem: relative path -> mtime.
    #[derive(Debug, Default)]
    struct FakeFs {
        files: HashMap<String, u64>,
    }

    impl FakeFs {
        fn with(files: &[(&str, u64)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(path, mtime)| (path.to_string(), *mtime))
                    .collect(),
            }
        }
    }

    impl ThemeFs for FakeFs {
        fn exists(&self, rel: &Path) -> bool {
            self.files.contains_key(rel.to_str().unwrap())
        }

        fn modified_at(&self, rel: &Path) -> Option<u64> {
            self.files.get(rel.to_str().unwrap()).copied()
        }
    }

    fn flag(value: &str) -> Environment {
        Environment::from_flag(Some(value))
    }

    #[test]
    fn test_only_development_flag_is_special() {
        assert_eq!(flag("development"), Environment::Development);
        assert_eq!(flag("production"), Environment::Production);
        assert_eq!(flag("staging"), Environment::Production);
        assert_eq!(flag(""), Environment::Production);
        // Case-sensitive comparison
        assert_eq!(flag("Development"), Environment::Production);
        assert_eq!(Environment::from_flag(None), Environment::Production);
    }

    #[test]
    fn test_development_prefers_dev_build() {
        let fs = FakeFs::with(&[
            (DEV_BUILD_STYLESHEET, 100),
            (DEV_BUILD_SCRIPT, 200),
            (SOURCE_STYLESHEET, 50),
            (SOURCE_SCRIPT, 50),
        ]);

        let regs = resolve_assets(Environment::Development, &fs);
        assert_eq!(regs.len(), 2);
        assert_eq!(regs[0].path, DEV_BUILD_STYLESHEET);
        assert_eq!(regs[0].version, Version::Time(100));
        assert_eq!(regs[1].path, DEV_BUILD_SCRIPT);
        assert_eq!(regs[1].version, Version::Time(200));
    }

    #[test]
    fn test_development_falls_back_to_sources() {
        let fs = FakeFs::with(&[(SOURCE_STYLESHEET, 1000), (SOURCE_SCRIPT, 1100)]);

        let regs = resolve_assets(Environment::Development, &fs);
        assert_eq!(regs.len(), 2);
        assert_eq!(
            regs[0],
            Registration {
                handle: "tailwind-style".to_string(),
                kind: AssetKind::Stylesheet,
                path: "assets/css/styles.css".to_string(),
                deps: vec!["child-style".to_string()],
                version: Version::Time(1000),
                placement: Placement::Head,
            }
        );
        assert_eq!(regs[1].handle, "child-scripts");
        assert_eq!(regs[1].path, SOURCE_SCRIPT);
        assert!(regs[1].deps.is_empty());
        assert_eq!(regs[1].placement, Placement::Footer);
    }

    #[test]
    fn test_fallback_is_per_artifact() {
        // Dev stylesheet built, script not: only the script falls back.
        let fs = FakeFs::with(&[
            (DEV_BUILD_STYLESHEET, 10),
            (SOURCE_STYLESHEET, 20),
            (SOURCE_SCRIPT, 30),
        ]);

        let regs = resolve_assets(Environment::Development, &fs);
        assert_eq!(regs[0].path, DEV_BUILD_STYLESHEET);
        assert_eq!(regs[1].path, SOURCE_SCRIPT);
    }

    #[test]
    fn test_production_selects_minified_paths() {
        let fs = FakeFs::with(&[(DIST_STYLESHEET, 500), (DIST_SCRIPT, 600)]);

        for value in ["production", "staging", "anything"] {
            let regs = resolve_assets(flag(value), &fs);
            assert_eq!(regs.len(), 2);
            assert_eq!(regs[0].path, DIST_STYLESHEET);
            assert_eq!(regs[1].path, DIST_SCRIPT);
        }
    }

    #[test]
    fn test_production_never_falls_back() {
        // Sources and dev builds exist, but dist does not: nothing registers.
        let fs = FakeFs::with(&[
            (DEV_BUILD_STYLESHEET, 1),
            (DEV_BUILD_SCRIPT, 2),
            (SOURCE_STYLESHEET, 3),
            (SOURCE_SCRIPT, 4),
        ]);

        let regs = resolve_assets(Environment::Production, &fs);
        assert!(regs.is_empty());
    }

    #[test]
    fn test_missing_artifacts_are_skipped_independently() {
        // Unset flag, stylesheet built, script missing: one registration.
        let fs = FakeFs::with(&[(DIST_STYLESHEET, 2000)]);

        let regs = resolve_assets(Environment::from_flag(None), &fs);
        assert_eq!(regs.len(), 1);
        assert_eq!(regs[0].handle, "tailwind-style");
        assert_eq!(regs[0].path, DIST_STYLESHEET);
        assert_eq!(regs[0].version, Version::Time(2000));
    }

    #[test]
    fn test_empty_theme_registers_nothing() {
        let fs = FakeFs::default();

        assert!(resolve_assets(Environment::Development, &fs).is_empty());
        assert!(resolve_assets(Environment::Production, &fs).is_empty());
    }

    #[test]
    fn test_version_tracks_modification_time() {
        let mut fs = FakeFs::with(&[(DIST_STYLESHEET, 2000), (DIST_SCRIPT, 2000)]);

        let before = resolve_assets(Environment::Production, &fs);
        fs.files.insert(DIST_STYLESHEET.to_string(), 3000);
        let after = resolve_assets(Environment::Production, &fs);

        assert_eq!(before[0].version, Version::Time(2000));
        assert_eq!(after[0].version, Version::Time(3000));
        // Untouched script keeps its token
        assert_eq!(after[1].version, Version::Time(2000));
    }

    #[test]
    fn test_resolution_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("dist")).unwrap();
        std::fs::write(dir.path().join("dist/styles.min.css"), "body{margin:0}").unwrap();

        let fs = DiskFs::new(dir.path());
        let regs = resolve_assets(Environment::Production, &fs);

        assert_eq!(regs.len(), 1);
        assert_eq!(regs[0].path, DIST_STYLESHEET);
        assert!(matches!(regs[0].version, Version::Time(t) if t > 0));
    }
}
