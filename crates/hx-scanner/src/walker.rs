//! Directory traversal for audio files.
//!
//! [`FileWalker`] validates a root directory once and then hands out lazy
//! [`AudioPaths`] iterators over it. Each call to [`FileWalker::paths`]
//! starts a fresh walk, so a walker can be reused for repeated scans.
//!
//! # Features
//!
//! - Recurses into every subdirectory
//! - Case-insensitive extension allow-list (`mp3` matches `Song.MP3`)
//! - Includes hidden files unless configured otherwise
//! - Ignores `.gitignore`/`.ignore` files: a music folder is not a source tree
//! - Sorts entries by file name so unchanged trees walk in the same order
//! - Yields absolute UTF-8 paths
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use hx_core::ScanConfig;
//! use hx_scanner::FileWalker;
//!
//! let walker = FileWalker::new(Utf8Path::new("/sdcard/Music"), &ScanConfig::default())?;
//! for path in walker.paths() {
//!     println!("{path}");
//! }
//! # Ok::<(), hx_scanner::ScanError>(())
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use hx_core::ScanConfig;
use ignore::WalkBuilder;
use tracing::warn;

use crate::error::ScanError;

/// A validated root directory plus the rules for selecting audio files.
#[derive(Debug, Clone)]
pub struct FileWalker {
    /// Canonical root directory.
    root: Utf8PathBuf,
    /// Allowed extensions, without the leading dot.
    extensions: Vec<String>,
    /// Whether to follow symbolic links.
    follow_links: bool,
    /// Whether to skip hidden entries.
    skip_hidden: bool,
}

impl FileWalker {
    /// Creates a walker rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Config`] if the root doesn't exist or isn't a
    /// directory, and [`ScanError::Unreadable`] if it can't be listed or
    /// resolved to an absolute UTF-8 path.
    pub fn new(root: &Utf8Path, config: &ScanConfig) -> Result<Self, ScanError> {
        if !root.exists() {
            return Err(ScanError::config(format!(
                "root path does not exist: {root}"
            )));
        }
        if !root.is_dir() {
            return Err(ScanError::config(format!(
                "root path is not a directory: {root}"
            )));
        }

        root.read_dir_utf8()
            .map_err(|source| ScanError::unreadable(root, source))?;
        let root = root
            .canonicalize_utf8()
            .map_err(|source| ScanError::unreadable(root, source))?;

        Ok(Self {
            root,
            extensions: config.extensions.to_vec(),
            follow_links: config.follow_links,
            skip_hidden: config.skip_hidden,
        })
    }

    /// Starts a new lazy walk over the tree.
    #[must_use]
    pub fn paths(&self) -> AudioPaths<'_> {
        AudioPaths {
            walker: self,
            inner: self.build_walker(),
            skipped: 0,
        }
    }

    /// Walks the whole tree and collects every matching path.
    #[must_use]
    pub fn collect_paths(&self) -> Vec<Utf8PathBuf> {
        self.paths().collect()
    }

    /// Returns `true` if `path` carries an allowed extension.
    #[must_use]
    pub fn matches_extension(&self, path: &Utf8Path) -> bool {
        path.extension().is_some_and(|ext| {
            self.extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
    }

    /// Returns the canonical root directory being walked.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn build_walker(&self) -> ignore::Walk {
        WalkBuilder::new(&self.root)
            // No ignore files, no parent lookups
            .standard_filters(false)
            .hidden(self.skip_hidden)
            .follow_links(self.follow_links)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build()
    }
}

/// Lazy iterator over matching audio files, produced by [`FileWalker::paths`].
///
/// Entries that can't be read mid-walk, or whose paths aren't UTF-8, are
/// logged and skipped; [`skipped`](Self::skipped) reports how many.
pub struct AudioPaths<'a> {
    walker: &'a FileWalker,
    inner: ignore::Walk,
    skipped: usize,
}

impl AudioPaths<'_> {
    /// Number of entries skipped so far.
    #[inline]
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Iterator for AudioPaths<'_> {
    type Item = Utf8PathBuf;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "Skipping unreadable entry");
                    self.skipped += 1;
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let Some(path) = Utf8Path::from_path(entry.path()) else {
                warn!(path = %entry.path().display(), "Skipping non-UTF-8 path");
                self.skipped += 1;
                continue;
            };

            if self.walker.matches_extension(path) {
                return Some(path.to_owned());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn utf8(dir: &TempDir) -> &Utf8Path {
        Utf8Path::from_path(dir.path()).expect("temp dir should be UTF-8")
    }

    fn touch(root: &Utf8Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"x").unwrap();
    }

    fn walker_for(root: &Utf8Path) -> FileWalker {
        FileWalker::new(root, &ScanConfig::default()).unwrap()
    }

    #[test]
    fn test_counts_only_allowed_files_at_any_depth() {
        let dir = TempDir::new().unwrap();
        let root = utf8(&dir);
        for rel in [
            "a.mp3",
            "one/b.mp3",
            "one/two/c.mp3",
            "one/two/three/four/d.mp3",
            "cover.jpg",
            "one/notes.txt",
            "one/two/e.ogg",
            "one/two/three/mp3",
        ] {
            touch(root, rel);
        }

        let paths = walker_for(root).collect_paths();
        assert_eq!(paths.len(), 4);
        assert!(paths.iter().all(|p| p.extension() == Some("mp3")));
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let root = utf8(&dir);
        touch(root, "LOUD.MP3");
        touch(root, "Mixed.Mp3");

        assert_eq!(walker_for(root).collect_paths().len(), 2);
    }

    #[test]
    fn test_paths_are_absolute() {
        let dir = TempDir::new().unwrap();
        let root = utf8(&dir);
        touch(root, "sub/a.mp3");

        let paths = walker_for(root).collect_paths();
        assert_eq!(paths.len(), 1);
        assert!(paths[0].is_absolute());
    }

    #[test]
    fn test_hidden_files_included_by_default() {
        let dir = TempDir::new().unwrap();
        let root = utf8(&dir);
        touch(root, ".hidden.mp3");
        touch(root, ".cache/inner.mp3");

        assert_eq!(walker_for(root).collect_paths().len(), 2);

        let config = ScanConfig {
            skip_hidden: true,
            ..ScanConfig::default()
        };
        let walker = FileWalker::new(root, &config).unwrap();
        assert!(walker.collect_paths().is_empty());
    }

    #[test]
    fn test_gitignore_is_not_consulted() {
        let dir = TempDir::new().unwrap();
        let root = utf8(&dir);
        fs::write(root.join(".gitignore"), "*.mp3\n").unwrap();
        touch(root, "a.mp3");

        assert_eq!(walker_for(root).collect_paths().len(), 1);
    }

    #[test]
    fn test_walks_are_restartable_and_stable() {
        let dir = TempDir::new().unwrap();
        let root = utf8(&dir);
        for rel in ["z.mp3", "a.mp3", "m/b.mp3", "m/a.mp3"] {
            touch(root, rel);
        }

        let walker = walker_for(root);
        let first: Vec<_> = walker.paths().collect();
        let second: Vec<_> = walker.paths().collect();
        assert_eq!(first.len(), 4);
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_root_is_config_error() {
        let result = FileWalker::new(
            Utf8Path::new("/nonexistent/path/that/does/not/exist"),
            &ScanConfig::default(),
        );
        assert!(matches!(result, Err(ScanError::Config(_))));
    }

    #[test]
    fn test_file_root_is_config_error() {
        let dir = TempDir::new().unwrap();
        let root = utf8(&dir);
        touch(root, "a.mp3");

        let result = FileWalker::new(&root.join("a.mp3"), &ScanConfig::default());
        assert!(matches!(result, Err(ScanError::Config(_))));
    }

    #[test]
    fn test_matches_extension() {
        let dir = TempDir::new().unwrap();
        let config = ScanConfig {
            extensions: ["mp3".to_owned(), "ogg".to_owned()].into_iter().collect(),
            ..ScanConfig::default()
        };
        let walker = FileWalker::new(utf8(&dir), &config).unwrap();

        assert!(walker.matches_extension(Utf8Path::new("a.mp3")));
        assert!(walker.matches_extension(Utf8Path::new("a.OGG")));
        assert!(!walker.matches_extension(Utf8Path::new("a.flac")));
        assert!(!walker.matches_extension(Utf8Path::new("mp3")));
        assert!(!walker.matches_extension(Utf8Path::new("a.mp3.bak")));
    }

    #[test]
    fn test_empty_tree_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let walker = walker_for(utf8(&dir));
        let mut paths = walker.paths();
        assert!(paths.next().is_none());
        assert_eq!(paths.skipped(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_skipped() {
        let dir = TempDir::new().unwrap();
        let root = utf8(&dir);
        touch(root, "a.mp3");
        let target = root.join("missing-target");
        std::os::unix::fs::symlink(target, root.join("broken.mp3")).unwrap();

        let config = ScanConfig {
            follow_links: true,
            ..ScanConfig::default()
        };
        let walker = FileWalker::new(root, &config).unwrap();
        let mut walk = walker.paths();
        let paths: Vec<_> = walk.by_ref().collect();

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].file_name(), Some("a.mp3"));
        assert_eq!(walk.skipped(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_unlistable_root_is_unreadable_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let root = utf8(&dir).join("locked");
        fs::create_dir(&root).unwrap();
        fs::set_permissions(&root, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits don't bind root; nothing to check then.
        let listable = fs::read_dir(&root).is_ok();
        let result = FileWalker::new(&root, &ScanConfig::default());
        fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();
        if listable {
            return;
        }

        let err = result.unwrap_err();
        assert!(matches!(err, ScanError::Unreadable { .. }));
        assert_eq!(err.path(), Some(&root));
    }
}
