//! Tag metadata extraction for audio files.
//!
//! [`MetadataReader::read`] always produces a [`FileRecord`]. A file whose
//! tags can't be read is reported with the [`UNREADABLE`](hx_core::UNREADABLE)
//! sentinel in both `title` and `artist`, so one corrupt file never aborts a
//! directory scan.

use std::borrow::Cow;

use camino::Utf8Path;
use hx_core::FileRecord;
use lofty::file::TaggedFileExt;
use lofty::tag::Accessor;
use tracing::debug;

use crate::error::MetadataError;

/// Title and artist pulled from a file's tag.
///
/// Missing fields, and files without any tag, are represented as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFields {
    /// First title in the tag.
    pub title: String,
    /// First artist in the tag.
    pub artist: String,
}

/// Reads tag metadata into [`FileRecord`]s.
///
/// Stateless: a single instance may be shared freely across threads.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use hx_scanner::MetadataReader;
///
/// let record = MetadataReader::new().read(Utf8Path::new("/sdcard/Music/song.mp3"));
/// if record.is_unreadable() {
///     println!("could not read {}", record.uri);
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataReader;

impl MetadataReader {
    /// Creates a new reader.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds the record for `path`, degrading to the sentinel on failure.
    #[must_use]
    pub fn read(&self, path: &Utf8Path) -> FileRecord {
        let uri = file_uri(path);
        match read_tags(path) {
            Ok(TagFields { title, artist }) => FileRecord::new(uri, title, artist),
            Err(err) => {
                debug!(path = %path, error = %err, "Tags unreadable, using sentinel");
                FileRecord::unreadable(uri)
            }
        }
    }
}

/// Opens `path` and extracts its title and artist.
///
/// The format's primary tag is preferred; otherwise the first tag found is
/// used.
pub fn read_tags(path: &Utf8Path) -> Result<TagFields, MetadataError> {
    let tagged = lofty::read_from_path(path).map_err(|source| MetadataError {
        path: path.to_owned(),
        source,
    })?;

    let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
        return Ok(TagFields::default());
    };

    Ok(TagFields {
        title: tag.title().map(Cow::into_owned).unwrap_or_default(),
        artist: tag.artist().map(Cow::into_owned).unwrap_or_default(),
    })
}

/// Converts an absolute path into a `file://` URI.
///
/// Relative paths can't be expressed as file URIs; they are prefixed
/// verbatim so the record still identifies the file.
#[must_use]
pub fn file_uri(path: &Utf8Path) -> String {
    url::Url::from_file_path(path).map_or_else(|()| format!("file://{path}"), String::from)
}
