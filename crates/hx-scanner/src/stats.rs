//! Scan statistics with atomic counters.
//!
//! [`ScanStats`] is filled in from rayon worker threads while metadata is
//! read; [`StatsSnapshot`] is the plain copy handed back to callers.
//!
//! All counters use [`Relaxed`](Ordering::Relaxed) ordering. They are only
//! read after the parallel section has joined.

use std::sync::atomic::{AtomicU64, Ordering};

use hx_core::FileRecord;
use serde::{Deserialize, Serialize};

/// Atomic counters for a single scan.
#[derive(Debug, Default)]
pub struct ScanStats {
    total: AtomicU64,
    tagged: AtomicU64,
    untagged: AtomicU64,
    unreadable: AtomicU64,
    skipped: AtomicU64,
}

impl ScanStats {
    /// Creates a new [`ScanStats`] with all counters at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one produced record under the matching category.
    pub fn record(&self, record: &FileRecord) {
        self.total.fetch_add(1, Ordering::Relaxed);
        let bucket = if record.is_unreadable() {
            &self.unreadable
        } else if record.is_untagged() {
            &self.untagged
        } else {
            &self.tagged
        };
        bucket.fetch_add(1, Ordering::Relaxed);
    }

    /// Adds walk entries that were skipped before reaching the reader.
    pub fn add_skipped(&self, count: u64) {
        self.skipped.fetch_add(count, Ordering::Relaxed);
    }

    /// Takes a point-in-time copy of the counters.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total: self.total.load(Ordering::Relaxed),
            tagged: self.tagged.load(Ordering::Relaxed),
            untagged: self.untagged.load(Ordering::Relaxed),
            unreadable: self.unreadable.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time scan statistics.
///
/// # Examples
///
/// ```
/// use hx_core::FileRecord;
/// use hx_scanner::ScanStats;
///
/// let stats = ScanStats::new();
/// stats.record(&FileRecord::new("file:///a.mp3", "A", "B"));
/// stats.record(&FileRecord::unreadable("file:///b.mp3"));
///
/// let snap = stats.snapshot();
/// assert_eq!(snap.total, 2);
/// assert_eq!(snap.unreadable, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Records produced.
    pub total: u64,
    /// Records with at least a title or an artist.
    pub tagged: u64,
    /// Readable files without title and artist.
    pub untagged: u64,
    /// Files whose tags could not be read.
    pub unreadable: u64,
    /// Walk entries skipped (unreadable directories, non-UTF-8 paths).
    pub skipped: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_are_zero() {
        assert_eq!(ScanStats::new().snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn test_record_buckets() {
        let stats = ScanStats::new();
        stats.record(&FileRecord::new("file:///a.mp3", "Title", ""));
        stats.record(&FileRecord::new("file:///b.mp3", "", ""));
        stats.record(&FileRecord::unreadable("file:///c.mp3"));
        stats.add_skipped(2);

        let snap = stats.snapshot();
        assert_eq!(snap.total, 3);
        assert_eq!(snap.tagged, 1);
        assert_eq!(snap.untagged, 1);
        assert_eq!(snap.unreadable, 1);
        assert_eq!(snap.skipped, 2);
    }

    #[test]
    fn test_snapshot_serialization() {
        let snap = StatsSnapshot {
            total: 3,
            tagged: 1,
            untagged: 1,
            unreadable: 1,
            skipped: 0,
        };
        let json = serde_json::to_string(&snap).unwrap();
        let parsed: StatsSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, parsed);
    }
}
