//! Error types for the hx-scanner crate.
//!
//! [`ScanError`] covers precondition failures on the scan root. Problems
//! with individual entries never surface here: walk errors below the root
//! are logged and skipped, and unreadable tags become sentinel records.

use camino::Utf8PathBuf;

/// Errors that prevent a scan from starting.
///
/// # Examples
///
/// ```
/// use hx_scanner::ScanError;
///
/// let err = ScanError::config("root path does not exist: /sdcard/Music");
/// assert!(err.path().is_none());
/// assert_eq!(
///     err.to_string(),
///     "invalid configuration: root path does not exist: /sdcard/Music"
/// );
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The root path is missing or is not a directory.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The root directory exists but cannot be listed or resolved.
    #[error("cannot read directory {path}: {source}")]
    Unreadable {
        /// The directory that could not be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Creates a new [`ScanError::Config`] error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a new [`ScanError::Unreadable`] error.
    #[inline]
    pub fn unreadable(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Unreadable {
            path: path.into(),
            source,
        }
    }

    /// Returns the directory associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::Unreadable { path, .. } => Some(path),
            Self::Config(_) => None,
        }
    }
}

/// Failure to read tag metadata from a single file.
///
/// Never escapes [`MetadataReader::read`](crate::MetadataReader::read); it is
/// exposed for callers of [`read_tags`](crate::read_tags) that want the cause.
#[derive(Debug, thiserror::Error)]
#[error("failed to read tags from {path}: {source}")]
pub struct MetadataError {
    /// The file whose tags could not be read.
    pub path: Utf8PathBuf,
    /// The underlying tag library error.
    #[source]
    pub source: lofty::error::LoftyError,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_scan_error_config() {
        let err = ScanError::config("invalid root path");
        assert!(err.path().is_none());
        assert!(err.to_string().contains("invalid root path"));
    }

    #[test]
    fn test_scan_error_unreadable() {
        let err = ScanError::unreadable(
            "/sdcard/Music",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.path().map(|p| p.as_str()), Some("/sdcard/Music"));
        assert!(err.to_string().contains("/sdcard/Music"));
    }
}
