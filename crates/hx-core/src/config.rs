//! Configuration structures for the hx host extension runtime.
//!
//! - [`StorageConfig`] - Storage root, mount-state override, directory overrides
//! - [`ScanConfig`] - Scanner settings (extension allow-list, link handling)
//! - [`FormatterConfig`] - Date formatter settings
//! - [`Config`] - Root configuration combining all settings
//!
//! Every section is `#[serde(default)]`, so a configuration file only needs
//! the keys it wants to change.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::error::ConfigError;
use crate::hash::FxHashMap;
use crate::types::{PublicDirectory, StorageState};

/// Largest accepted magnitude for a fixed UTC offset, in seconds.
const MAX_OFFSET_SECS: u32 = 86_399;

/// Configuration for the external storage the extensions read from.
///
/// # Examples
///
/// ```
/// use hx_core::StorageConfig;
///
/// let config = StorageConfig::default();
/// assert!(config.root.as_str().is_empty());
/// assert!(config.state.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Root of the external storage medium.
    ///
    /// Left empty, the host adapter substitutes the working directory.
    pub root: Utf8PathBuf,

    /// Fixed mount state to report instead of probing the root.
    pub state: Option<StorageState>,

    /// Explicit locations for logical directories, overriding
    /// `root/<conventional name>`.
    pub directories: FxHashMap<PublicDirectory, Utf8PathBuf>,
}

/// Configuration for the audio file scanner.
///
/// # Examples
///
/// ```
/// use hx_core::ScanConfig;
///
/// let config = ScanConfig::default();
/// assert_eq!(config.extensions.as_slice(), ["mp3"]);
/// assert!(!config.follow_links);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions to include, without the leading dot.
    ///
    /// Matching is case-insensitive.
    pub extensions: SmallVec<[String; 4]>,

    /// Whether to follow symbolic links while walking.
    pub follow_links: bool,

    /// Whether to skip hidden files and directories.
    pub skip_hidden: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: smallvec!["mp3".to_owned()],
            follow_links: false,
            skip_hidden: false,
        }
    }
}

/// Configuration for the date/time formatter extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Fixed offset east of UTC, in seconds, used when rendering timestamps.
    pub utc_offset_secs: i32,
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use hx_core::Config;
///
/// let config: Config = serde_json::from_str(r#"{"scan": {"extensions": ["mp3", "ogg"]}}"#)?;
/// assert_eq!(config.scan.extensions.len(), 2);
/// assert_eq!(config.formatter.utc_offset_secs, 0);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,

    /// Scanner configuration.
    pub scan: ScanConfig,

    /// Formatter configuration.
    pub formatter: FormatterConfig,
}

impl Config {
    /// Loads and validates a configuration from a JSON file.
    pub fn from_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks option values that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.extensions.is_empty() {
            return Err(ConfigError::invalid_option(
                "scan.extensions",
                "at least one extension is required",
            ));
        }

        for ext in &self.scan.extensions {
            if ext.is_empty() || ext.starts_with('.') {
                return Err(ConfigError::invalid_option(
                    "scan.extensions",
                    format!("'{ext}' must be a bare extension such as 'mp3'"),
                ));
            }
        }

        if self.formatter.utc_offset_secs.unsigned_abs() > MAX_OFFSET_SECS {
            return Err(ConfigError::invalid_option(
                "formatter.utc_offset_secs",
                format!(
                    "{} is outside +/-{MAX_OFFSET_SECS}",
                    self.formatter.utc_offset_secs
                ),
            ));
        }

        let root = &self.storage.root;
        if !root.as_str().is_empty() && root.exists() && !root.is_dir() {
            return Err(ConfigError::StorageRootNotDirectory { path: root.clone() });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_config_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.extensions.as_slice(), ["mp3"]);
        assert!(!config.follow_links);
        assert!(!config.skip_hidden);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_config_deserialize_with_missing_fields() {
        let json = r#"{"storage": {"root": "/sdcard", "state": "mounted_ro"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.storage.root, "/sdcard");
        assert_eq!(config.storage.state, Some(StorageState::MountedReadOnly));
        assert_eq!(config.scan.extensions.as_slice(), ["mp3"]);
        assert_eq!(config.formatter.utc_offset_secs, 0);
    }

    #[test]
    fn test_directory_overrides_deserialize() {
        let json = r#"{"storage": {"directories": {"music": "/data/tunes"}}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(
            config.storage.directories.get(&PublicDirectory::Music),
            Some(&Utf8PathBuf::from("/data/tunes"))
        );
    }

    #[test]
    fn test_validate_rejects_dotted_extension() {
        let mut config = Config::default();
        config.scan.extensions = smallvec![".mp3".to_owned()];
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOption { .. }));
    }

    #[test]
    fn test_validate_rejects_empty_allow_list() {
        let mut config = Config::default();
        config.scan.extensions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_huge_offset() {
        let mut config = Config::default();
        config.formatter.utc_offset_secs = 90_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_file_as_root() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.storage.root = Utf8PathBuf::from_path_buf(file.path().to_owned()).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StorageRootNotDirectory { .. })
        ));
    }

    #[test]
    fn test_from_file_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("hx.json")).unwrap();
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_from_file_missing() {
        let result = Config::from_file(Utf8Path::new("/nonexistent/hx.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
