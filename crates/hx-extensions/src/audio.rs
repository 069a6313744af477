//! The audio file listing extension.

use hx_core::{InstanceId, PublicDirectory, ResponseEnvelope, ScanConfig};
use hx_scanner::Scanner;
use tracing::{debug, warn};

use crate::extension::Extension;
use crate::host::{DirectoryResolver, StorageProbe};

/// Commands understood by [`AudioFileLister`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListerCommand {
    /// `list-files`: list every audio file under the music directory.
    ListFiles,
    /// Anything else.
    Unrecognized,
}

impl ListerCommand {
    /// Wire text of [`ListerCommand::ListFiles`].
    pub const LIST_FILES: &'static str = "list-files";

    /// Parses a command. Matching is exact: no trimming, case-sensitive.
    #[must_use]
    pub fn parse(message: &str) -> Self {
        match message {
            Self::LIST_FILES => Self::ListFiles,
            _ => Self::Unrecognized,
        }
    }
}

/// Lists audio files in the host's music directory as a JSON envelope.
///
/// ```text
/// "list-files" ─► storage readable? ─no─► {"success":false,"error":"audio directory not readable"}
///                      │yes
///                      └─► resolve Music ─► scan ─► {"success":true,"files":[...]}
/// other        ─► {"success":false,"error":"invalid command specified"}
/// ```
pub struct AudioFileLister {
    storage: Box<dyn StorageProbe>,
    directories: Box<dyn DirectoryResolver>,
    scanner: Scanner,
}

impl AudioFileLister {
    /// Registered extension name.
    pub const NAME: &'static str = "audioFileLister";

    /// Creates a lister backed by the given host collaborators.
    #[must_use]
    pub fn new(
        storage: Box<dyn StorageProbe>,
        directories: Box<dyn DirectoryResolver>,
        scan: ScanConfig,
    ) -> Self {
        Self {
            storage,
            directories,
            scanner: Scanner::new(scan),
        }
    }

    /// Runs `message` and returns the structured result.
    #[must_use]
    pub fn run_command(&self, message: &str) -> ResponseEnvelope {
        match ListerCommand::parse(message) {
            ListerCommand::ListFiles => self.list_files(),
            ListerCommand::Unrecognized => {
                debug!(command = message, "Unrecognized lister command");
                ResponseEnvelope::invalid_command()
            }
        }
    }

    fn list_files(&self) -> ResponseEnvelope {
        let state = self.storage.storage_state();
        if !state.is_readable() {
            debug!(state = %state, "Storage not readable");
            return ResponseEnvelope::not_readable();
        }

        let music = self.directories.public_directory(PublicDirectory::Music);
        match self.scanner.scan(&music) {
            Ok(report) => ResponseEnvelope::success(report.records),
            Err(err) => {
                warn!(dir = %music, error = %err, "Music directory not scannable");
                ResponseEnvelope::not_readable()
            }
        }
    }
}

impl Extension for AudioFileLister {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn on_sync_message(&self, _instance: InstanceId, message: &str) -> String {
        self.run_command(message).to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{FixedStorage, StorageRootResolver};
    use camino::Utf8PathBuf;
    use hx_core::StorageState;
    use std::fs;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct CountingResolver {
        calls: Arc<AtomicUsize>,
        root: Utf8PathBuf,
    }

    impl DirectoryResolver for CountingResolver {
        fn public_directory(&self, dir: PublicDirectory) -> Utf8PathBuf {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.root.join(dir.dir_name())
        }
    }

    fn lister(state: StorageState, root: &Utf8PathBuf) -> AudioFileLister {
        AudioFileLister::new(
            Box::new(FixedStorage(state)),
            Box::new(StorageRootResolver::new(root.clone())),
            ScanConfig::default(),
        )
    }

    fn storage() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_owned()).unwrap();
        (dir, root)
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(ListerCommand::parse("list-files"), ListerCommand::ListFiles);
        assert_eq!(ListerCommand::parse("LIST-FILES"), ListerCommand::Unrecognized);
        assert_eq!(ListerCommand::parse(" list-files"), ListerCommand::Unrecognized);
        assert_eq!(ListerCommand::parse(""), ListerCommand::Unrecognized);
    }

    #[test]
    fn test_unmounted_storage_skips_resolver() {
        let calls = Arc::new(AtomicUsize::new(0));
        let lister = AudioFileLister::new(
            Box::new(FixedStorage(StorageState::Unmounted)),
            Box::new(CountingResolver {
                calls: Arc::clone(&calls),
                root: Utf8PathBuf::from("/nonexistent"),
            }),
            ScanConfig::default(),
        );

        assert_eq!(lister.run_command("list-files"), ResponseEnvelope::not_readable());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_bogus_command_for_every_state() {
        let (_dir, root) = storage();
        for state in StorageState::ALL {
            let reply = lister(state, &root).on_sync_message(InstanceId::new(1), "bogus");
            insta::allow_duplicates! {
                insta::assert_snapshot!(
                    reply,
                    @r#"{"success":false,"error":"invalid command specified"}"#
                );
            }
        }
    }

    #[test]
    fn test_lists_files_under_music() {
        let (_dir, root) = storage();
        let music = root.join("Music");
        fs::create_dir_all(music.join("album")).unwrap();
        fs::write(music.join("one.mp3"), b"junk").unwrap();
        fs::write(music.join("album/two.MP3"), b"junk").unwrap();
        fs::write(music.join("album/notes.txt"), b"text").unwrap();
        fs::write(root.join("outside.mp3"), b"junk").unwrap();

        let envelope = lister(StorageState::Mounted, &root).run_command("list-files");
        let files = envelope.files().unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.uri.starts_with("file://")));
        assert!(files.iter().all(|f| f.is_unreadable()));
        assert!(files.iter().any(|f| f.uri.ends_with("/album/two.MP3")));
    }

    #[test]
    fn test_read_only_storage_is_readable() {
        let (_dir, root) = storage();
        fs::create_dir(root.join("Music")).unwrap();

        let envelope = lister(StorageState::MountedReadOnly, &root).run_command("list-files");
        assert_eq!(envelope, ResponseEnvelope::success(Vec::new()));
        assert_eq!(envelope.to_json(), r#"{"success":true,"files":[]}"#);
    }

    #[test]
    fn test_missing_music_dir_is_not_readable() {
        let (_dir, root) = storage();
        let envelope = lister(StorageState::Mounted, &root).run_command("list-files");
        assert_eq!(envelope.error(), Some(ResponseEnvelope::NOT_READABLE));
    }

    #[test]
    fn test_listing_is_idempotent() {
        let (_dir, root) = storage();
        let music = root.join("Music");
        fs::create_dir(&music).unwrap();
        for name in ["b.mp3", "a.mp3", "c.mp3"] {
            fs::write(music.join(name), b"junk").unwrap();
        }

        let lister = lister(StorageState::Mounted, &root);
        let first = lister.on_sync_message(InstanceId::new(1), "list-files");
        let second = lister.on_sync_message(InstanceId::new(2), "list-files");
        assert_eq!(first, second);
    }
}
