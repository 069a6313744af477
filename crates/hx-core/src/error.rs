//! Configuration failures.
//!
//! Loading goes file → JSON → [`Config::validate`](crate::Config::validate);
//! each stage has its own [`ConfigError`] variant carrying the file or
//! option at fault.

use camino::Utf8PathBuf;

/// Why a configuration was rejected.
///
/// # Examples
///
/// ```
/// use hx_core::ConfigError;
///
/// let err = ConfigError::invalid_option("formatter.utc_offset_secs", "90000 is outside +/-86399");
/// assert_eq!(
///     err.to_string(),
///     "invalid configuration option 'formatter.utc_offset_secs': 90000 is outside +/-86399"
/// );
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `storage.root` names something other than a directory.
    #[error("storage root {path} is not a directory")]
    StorageRootNotDirectory {
        /// Configured root.
        path: Utf8PathBuf,
    },

    /// An option holds a value serde accepted but the runtime can't use.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// Dotted option name, e.g. `scan.extensions`.
        option: String,
        /// What is wrong with the value.
        reason: String,
    },

    /// The configuration file couldn't be read.
    #[error("cannot read config file {path}: {source}")]
    Read {
        /// File that was opened.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file isn't valid JSON for [`Config`](crate::Config).
    #[error("cannot parse config file {path}: {source}")]
    Parse {
        /// File that was parsed.
        path: Utf8PathBuf,
        /// Underlying JSON error, with line and column.
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Creates a [`ConfigError::InvalidOption`].
    #[inline]
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// The file or directory involved, if the error is tied to one.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::StorageRootNotDirectory { path }
            | Self::Read { path, .. }
            | Self::Parse { path, .. } => Some(path),
            Self::InvalidOption { .. } => None,
        }
    }
}
