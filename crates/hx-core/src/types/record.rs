//! Metadata records for scanned audio files.

use serde::{Deserialize, Serialize};

/// Placeholder stored in both `title` and `artist` when a file's tags could
/// not be read.
///
/// Consumers compare against this value instead of inspecting error text.
pub const UNREADABLE: &str = "__UNREADABLE__";

/// Location and tag metadata for a single audio file.
///
/// # Examples
///
/// ```
/// use hx_core::{FileRecord, UNREADABLE};
///
/// let record = FileRecord::unreadable("file:///music/broken.mp3");
/// assert_eq!(record.title, UNREADABLE);
/// assert_eq!(record.artist, UNREADABLE);
/// assert!(record.is_unreadable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileRecord {
    /// `file://` URI of the absolute file path.
    pub uri: String,

    /// First title found in the file's tag, or `""` when the tag has none.
    pub title: String,

    /// First artist found in the file's tag, or `""` when the tag has none.
    pub artist: String,
}

impl FileRecord {
    /// Creates a record with the given tag values.
    #[must_use]
    pub fn new(
        uri: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
            artist: artist.into(),
        }
    }

    /// Creates a record for a file whose tags could not be read.
    ///
    /// Both `title` and `artist` are set to [`UNREADABLE`].
    #[must_use]
    pub fn unreadable(uri: impl Into<String>) -> Self {
        Self::new(uri, UNREADABLE, UNREADABLE)
    }

    /// Returns `true` if this record carries the unreadable sentinel.
    #[inline]
    #[must_use]
    pub fn is_unreadable(&self) -> bool {
        self.title == UNREADABLE && self.artist == UNREADABLE
    }

    /// Returns `true` if the file was readable but had neither title nor artist.
    #[inline]
    #[must_use]
    pub fn is_untagged(&self) -> bool {
        self.title.is_empty() && self.artist.is_empty()
    }
}
