//! Audio file discovery and tag metadata extraction.
//!
//! # Overview
//!
//! The main entry point is [`Scanner`], which combines:
//!
//! - [`FileWalker`]: validated root + lazy, restartable [`AudioPaths`] walks
//! - [`MetadataReader`]: per-file tag extraction that never fails
//! - [`ScanStats`]: atomic counters filled in while reading in parallel
//!
//! # Example
//!
//! ```no_run
//! use camino::Utf8Path;
//! use hx_core::ScanConfig;
//! use hx_scanner::Scanner;
//!
//! let scanner = Scanner::new(ScanConfig::default());
//! let report = scanner.scan(Utf8Path::new("/sdcard/Music"))?;
//! for record in &report.records {
//!     println!("{} - {} ({})", record.artist, record.title, record.uri);
//! }
//! # Ok::<(), hx_scanner::ScanError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! Scanner
//!     │
//!     ├── FileWalker ── AudioPaths (ignore::Walk, sorted, lazy)
//!     │
//!     └── rayon par_iter ── MetadataReader (lofty) ── ScanStats
//! ```
//!
//! Paths are collected first, then read in parallel; the indexed collect
//! keeps records in walk order, so identical trees give identical output.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod error;
mod metadata;
mod stats;
mod walker;

pub use error::{MetadataError, ScanError};
pub use metadata::{MetadataReader, TagFields, file_uri, read_tags};
pub use stats::{ScanStats, StatsSnapshot};
pub use walker::{AudioPaths, FileWalker};

use camino::Utf8Path;
use hx_core::{FileRecord, ScanConfig};
use rayon::prelude::*;
use tracing::info;

/// Result of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// One record per matching file, in walk order.
    pub records: Vec<FileRecord>,
    /// Counters gathered during the scan.
    pub stats: StatsSnapshot,
}

/// Walks a directory and reads tag metadata for every matching file.
///
/// Holds only immutable configuration, so one scanner can serve concurrent
/// callers.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    config: ScanConfig,
    reader: MetadataReader,
}

impl Scanner {
    /// Creates a scanner with the given configuration.
    #[must_use]
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            reader: MetadataReader::new(),
        }
    }

    /// Returns the scanner configuration.
    #[must_use]
    pub const fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scans `root` and returns one record per matching file.
    ///
    /// # Errors
    ///
    /// Returns a [`ScanError`] if `root` is missing, not a directory, or
    /// cannot be listed. No partial results are produced in that case.
    pub fn scan(&self, root: &Utf8Path) -> Result<ScanReport, ScanError> {
        let walker = FileWalker::new(root, &self.config)?;
        info!(root = %walker.root(), "Starting scan");

        let mut walk = walker.paths();
        let paths: Vec<_> = walk.by_ref().collect();

        let stats = ScanStats::new();
        stats.add_skipped(walk.skipped() as u64);

        let records: Vec<FileRecord> = paths
            .par_iter()
            .map(|path| {
                let record = self.reader.read(path);
                stats.record(&record);
                record
            })
            .collect();

        let stats = stats.snapshot();
        info!(
            total = stats.total,
            tagged = stats.tagged,
            untagged = stats.untagged,
            unreadable = stats.unreadable,
            skipped = stats.skipped,
            "Scan completed"
        );

        Ok(ScanReport { records, stats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::fs;
    use tempfile::TempDir;

    fn music_dir() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_owned()).unwrap();
        (dir, root)
    }

    #[test]
    fn test_scan_produces_one_record_per_match() {
        let (_dir, root) = music_dir();
        fs::create_dir_all(root.join("album")).unwrap();
        fs::write(root.join("a.mp3"), b"not audio").unwrap();
        fs::write(root.join("album/b.mp3"), b"not audio either").unwrap();
        fs::write(root.join("album/cover.png"), b"png").unwrap();

        let report = Scanner::default().scan(&root).unwrap();
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.stats.total, 2);
        assert_eq!(report.stats.unreadable, 2);
        assert!(report.records.iter().all(FileRecord::is_unreadable));
    }

    #[test]
    fn test_scan_is_deterministic() {
        let (_dir, root) = music_dir();
        for name in ["c.mp3", "a.mp3", "b.mp3"] {
            fs::write(root.join(name), b"junk").unwrap();
        }

        let scanner = Scanner::default();
        let first = scanner.scan(&root).unwrap();
        let second = scanner.scan(&root).unwrap();
        assert_eq!(first, second);
        assert!(first.records[0].uri.ends_with("/a.mp3"));
        assert!(first.records[2].uri.ends_with("/c.mp3"));
    }

    #[test]
    fn test_scan_missing_root() {
        let missing = Utf8Path::new("/nonexistent/path/that/does/not/exist");
        let result = Scanner::default().scan(missing);
        assert!(matches!(result, Err(ScanError::Config(_))));
    }

    #[test]
    fn test_scan_empty_root() {
        let (_dir, root) = music_dir();
        let report = Scanner::default().scan(&root).unwrap();
        assert!(report.records.is_empty());
        assert_eq!(report.stats, StatsSnapshot::default());
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_counts_skipped_entries() {
        let (_dir, root) = music_dir();
        fs::write(root.join("a.mp3"), b"junk").unwrap();
        std::os::unix::fs::symlink(root.join("gone.mp3"), root.join("broken.mp3")).unwrap();

        let scanner = Scanner::new(ScanConfig {
            follow_links: true,
            ..ScanConfig::default()
        });
        let report = scanner.scan(&root).unwrap();
        assert_eq!(report.records.len(), 1);
        assert!(report.records[0].uri.ends_with("/a.mp3"));
        assert_eq!(report.stats.total, 1);
        assert_eq!(report.stats.skipped, 1);
    }
}
