//! Host collaborators consumed by extensions.
//!
//! The host platform owns storage: it reports whether the external medium
//! is mounted and where its logical directories live. Extensions see those
//! answers only through [`StorageProbe`] and [`DirectoryResolver`], so a
//! mobile shell, a desktop adapter, and tests can each supply their own.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use hx_core::{FxHashMap, PublicDirectory, StorageConfig, StorageState};
use tracing::debug;

/// Reports the mount state of the external storage medium.
pub trait StorageProbe: Send + Sync {
    /// Current state of the medium.
    fn storage_state(&self) -> StorageState;
}

/// Resolves logical directories to concrete paths.
pub trait DirectoryResolver: Send + Sync {
    /// Location of `dir`. The path is not required to exist.
    fn public_directory(&self, dir: PublicDirectory) -> Utf8PathBuf;
}

/// Probe that always reports the same state.
///
/// # Examples
///
/// ```
/// use hx_core::StorageState;
/// use hx_extensions::{FixedStorage, StorageProbe};
///
/// let probe = FixedStorage(StorageState::Unmounted);
/// assert!(!probe.storage_state().is_readable());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedStorage(pub StorageState);

impl StorageProbe for FixedStorage {
    fn storage_state(&self) -> StorageState {
        self.0
    }
}

/// Probe that derives a state from a directory on the local filesystem.
///
/// | Root                       | State         |
/// |----------------------------|---------------|
/// | missing                    | `removed`     |
/// | not a directory            | `unmountable` |
/// | read-only permissions      | `mounted_ro`  |
/// | readable directory         | `mounted`     |
/// | any other I/O error        | `unknown`     |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsStorageProbe {
    root: Utf8PathBuf,
}

impl FsStorageProbe {
    /// Creates a probe for `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the probed root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

impl StorageProbe for FsStorageProbe {
    fn storage_state(&self) -> StorageState {
        match std::fs::metadata(&self.root) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => StorageState::Removed,
            Err(err) => {
                debug!(root = %self.root, error = %err, "Cannot stat storage root");
                StorageState::Unknown
            }
            Ok(meta) if !meta.is_dir() => StorageState::Unmountable,
            Ok(meta) if meta.permissions().readonly() => StorageState::MountedReadOnly,
            Ok(_) => StorageState::Mounted,
        }
    }
}

/// Resolver that places each directory under a storage root, unless an
/// explicit override is configured.
///
/// # Examples
///
/// ```
/// use hx_core::PublicDirectory;
/// use hx_extensions::{DirectoryResolver, StorageRootResolver};
///
/// let resolver = StorageRootResolver::new("/sdcard")
///     .with_override(PublicDirectory::Podcasts, "/data/podcasts");
///
/// assert_eq!(resolver.public_directory(PublicDirectory::Music), "/sdcard/Music");
/// assert_eq!(resolver.public_directory(PublicDirectory::Podcasts), "/data/podcasts");
/// ```
#[derive(Debug, Clone, Default)]
pub struct StorageRootResolver {
    root: Utf8PathBuf,
    overrides: FxHashMap<PublicDirectory, Utf8PathBuf>,
}

impl StorageRootResolver {
    /// Creates a resolver rooted at `root` with no overrides.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            overrides: FxHashMap::default(),
        }
    }

    /// Builds a resolver from the storage section of the configuration.
    #[must_use]
    pub fn from_config(config: &StorageConfig) -> Self {
        Self {
            root: config.root.clone(),
            overrides: config.directories.clone(),
        }
    }

    /// Pins `dir` to `path`.
    #[must_use]
    pub fn with_override(mut self, dir: PublicDirectory, path: impl Into<Utf8PathBuf>) -> Self {
        self.overrides.insert(dir, path.into());
        self
    }
}

impl DirectoryResolver for StorageRootResolver {
    fn public_directory(&self, dir: PublicDirectory) -> Utf8PathBuf {
        self.overrides
            .get(&dir)
            .cloned()
            .unwrap_or_else(|| self.root.join(dir.dir_name()))
    }
}

/// Builds the probe described by the configuration: a fixed state when one
/// is configured, otherwise a filesystem probe on the storage root.
#[must_use]
pub fn probe_from_config(config: &StorageConfig) -> Box<dyn StorageProbe> {
    match config.state {
        Some(state) => Box::new(FixedStorage(state)),
        None => Box::new(FsStorageProbe::new(config.root.clone())),
    }
}
