//! Filesystem capability for asset resolution
//!
//! The resolver only needs two questions answered about the theme
//! directory: does a file exist, and when was it last modified. Keeping
//! that behind a trait lets tests substitute an in-memory filesystem.

use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Read-only view of a theme directory, addressed by theme-relative paths.
pub trait ThemeFs {
    /// Whether a regular file exists at the given theme-relative path.
    fn exists(&self, rel: &Path) -> bool;

    /// Last-modified time of the file, as seconds since the Unix epoch.
    ///
    /// Returns `None` when the file is absent or its metadata is
    /// unreadable.
    fn modified_at(&self, rel: &Path) -> Option<u64>;
}

/// On-disk theme directory.
#[derive(Debug, Clone)]
pub struct DiskFs {
    root: PathBuf,
}

impl DiskFs {
    /// Create a view rooted at the theme directory.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// The theme root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ThemeFs for DiskFs {
    fn exists(&self, rel: &Path) -> bool {
        self.root.join(rel).is_file()
    }

    fn modified_at(&self, rel: &Path) -> Option<u64> {
        let metadata = std::fs::metadata(self.root.join(rel)).ok()?;
        let modified = metadata.modified().ok()?;
        modified
            .duration_since(UNIX_EPOCH)
            .ok()
            .map(|d| d.as_secs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_fs_exists() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("dist")).unwrap();
        std::fs::write(dir.path().join("dist/styles.min.css"), "body{}").unwrap();

        let fs = DiskFs::new(dir.path());
        assert!(fs.exists(Path::new("dist/styles.min.css")));
        assert!(!fs.exists(Path::new("dist/scripts.min.js")));
        // Directories are not files
        assert!(!fs.exists(Path::new("dist")));
    }

    #[test]
    fn test_disk_fs_modified_at() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("style.css"), "body{}").unwrap();

        let fs = DiskFs::new(dir.path());
        let mtime = fs.modified_at(Path::new("style.css")).unwrap();
        assert!(mtime > 0);
        assert_eq!(fs.modified_at(Path::new("missing.css")), None);
    }
}
