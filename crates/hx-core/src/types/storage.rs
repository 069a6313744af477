//! Platform storage states and logical public directories.
//!
//! These mirror the vocabulary of a mobile platform's external storage
//! API: the host reports a mount state as a short string, and resolves
//! logical directories (music, podcasts, ...) to concrete paths.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Mount state of the external storage medium.
///
/// Only [`Mounted`](Self::Mounted) and [`MountedReadOnly`](Self::MountedReadOnly)
/// allow reading.
///
/// # Examples
///
/// ```
/// use hx_core::StorageState;
///
/// assert!(StorageState::Mounted.is_readable());
/// assert!(StorageState::MountedReadOnly.is_readable());
/// assert!(!StorageState::Unmounted.is_readable());
///
/// let state: StorageState = "mounted_ro".parse().unwrap();
/// assert_eq!(state, StorageState::MountedReadOnly);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageState {
    /// The state could not be determined.
    #[default]
    Unknown,
    /// The medium is not present.
    Removed,
    /// The medium is present but not mounted.
    Unmounted,
    /// The medium is being checked.
    Checking,
    /// The medium is present but blank or using an unsupported filesystem.
    #[serde(rename = "nofs")]
    NoFs,
    /// Mounted with read/write access.
    Mounted,
    /// Mounted with read-only access.
    #[serde(rename = "mounted_ro")]
    MountedReadOnly,
    /// Shared with another host (e.g. over USB mass storage).
    Shared,
    /// Removed before it was unmounted.
    BadRemoval,
    /// Present but cannot be mounted.
    Unmountable,
    /// Being ejected.
    Ejecting,
}

impl StorageState {
    /// Every state, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Unknown,
        Self::Removed,
        Self::Unmounted,
        Self::Checking,
        Self::NoFs,
        Self::Mounted,
        Self::MountedReadOnly,
        Self::Shared,
        Self::BadRemoval,
        Self::Unmountable,
        Self::Ejecting,
    ];

    /// Returns `true` if files on the medium can be read.
    #[inline]
    #[must_use]
    pub const fn is_readable(self) -> bool {
        matches!(self, Self::Mounted | Self::MountedReadOnly)
    }

    /// Returns the platform string for this state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Removed => "removed",
            Self::Unmounted => "unmounted",
            Self::Checking => "checking",
            Self::NoFs => "nofs",
            Self::Mounted => "mounted",
            Self::MountedReadOnly => "mounted_ro",
            Self::Shared => "shared",
            Self::BadRemoval => "bad_removal",
            Self::Unmountable => "unmountable",
            Self::Ejecting => "ejecting",
        }
    }
}

impl fmt::Display for StorageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown storage state string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown storage state '{0}'")]
pub struct ParseStorageStateError(String);

impl FromStr for StorageState {
    type Err = ParseStorageStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| ParseStorageStateError(s.to_owned()))
    }
}

/// Logical public directories on the external storage medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum PublicDirectory {
    /// Music files.
    Music,
    /// Podcast episodes.
    Podcasts,
    /// Ringtones.
    Ringtones,
    /// Alarm sounds.
    Alarms,
    /// Notification sounds.
    Notifications,
    /// Downloaded files.
    Downloads,
}

impl PublicDirectory {
    /// Conventional folder name under the storage root.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Music => "Music",
            Self::Podcasts => "Podcasts",
            Self::Ringtones => "Ringtones",
            Self::Alarms => "Alarms",
            Self::Notifications => "Notifications",
            Self::Downloads => "Download",
        }
    }
}
