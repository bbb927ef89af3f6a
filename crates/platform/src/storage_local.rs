//! Local filesystem Storage implementation for the desktop simulator.
//!
//! `LocalFileStorage` implements `platform::Storage` using `std::fs`.
//! Used when the `std` feature is enabled (simulator builds only).
//! Card-absolute paths (`/TV/Seinfeld/show.sdb`) are resolved relative to
//! the card root provided at construction.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use crate::settings::{Settings, SettingsStore, SETTINGS_TEXT_LEN};
use crate::storage::{DirEntry, File, Storage};

/// Error type for local filesystem operations.
#[derive(Debug, thiserror::Error)]
#[error("local storage error: {0}")]
pub struct LocalStorageError(#[from] pub std::io::Error);

/// An open file on the local filesystem.
pub struct LocalFile {
    inner: fs::File,
    size: u64,
}

impl File for LocalFile {
    type Error = LocalStorageError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(Read::read(&mut self.inner, buf)?)
    }

    fn size(&self) -> u64 {
        self.size
    }
}

/// A `platform::Storage` implementation backed by `std::fs`.
///
/// # Example
/// ```no_run
/// use platform::storage_local::LocalFileStorage;
/// use platform::Storage;
/// let mut storage = LocalFileStorage::new("/media/sdcard");
/// let found = storage.exists("/TV").unwrap();
/// ```
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    /// Create a new storage rooted at `card_root`.
    #[must_use]
    pub fn new(card_root: impl Into<PathBuf>) -> Self {
        Self { root: card_root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl Storage for LocalFileStorage {
    type Error = LocalStorageError;
    type File = LocalFile;

    fn open_file(&mut self, path: &str) -> Result<Self::File, Self::Error> {
        let file = fs::File::open(self.resolve(path))?;
        let size = file.metadata()?.len();
        Ok(LocalFile { inner: file, size })
    }

    fn exists(&mut self, path: &str) -> Result<bool, Self::Error> {
        Ok(self.resolve(path).exists())
    }

    fn list_dir(
        &mut self,
        path: &str,
        visit: &mut dyn FnMut(DirEntry<'_>),
    ) -> Result<(), Self::Error> {
        for entry in fs::read_dir(self.resolve(path))? {
            let entry = entry?;
            let is_dir = entry.file_type()?.is_dir();
            // Non-UTF-8 names cannot match any card naming scheme.
            if let Some(name) = entry.file_name().to_str() {
                visit(DirEntry { name, is_dir });
            }
        }
        Ok(())
    }
}

/// `settings.txt` in the card root, written with `std::fs`.
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    /// Settings file at `{card_root}/settings.txt`.
    #[must_use]
    pub fn new(card_root: impl Into<PathBuf>) -> Self {
        Self { path: card_root.into().join("settings.txt") }
    }
}

impl SettingsStore for FileSettingsStore {
    type Error = LocalStorageError;

    fn load(&mut self, defaults: &Settings) -> Result<Option<Settings>, Self::Error> {
        match fs::read(&self.path) {
            Ok(bytes) => {
                let head = bytes.get(..SETTINGS_TEXT_LEN.min(bytes.len())).unwrap_or(&[]);
                Ok(Some(Settings::parse_bytes(head, defaults.clone())))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn persist(&mut self, settings: &Settings) -> Result<(), Self::Error> {
        fs::write(&self.path, settings.to_text().as_bytes())?;
        Ok(())
    }
}
