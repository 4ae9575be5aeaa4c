//! Filesystem persistence for configuration files.
//!
//! A [`ConfigStore`] owns one configuration root directory. All access goes
//! through a `cap-std` capability handle on that root, so registrations can
//! only touch paths beneath it.

mod error;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};

use crate::{ConfigFormat, ReconcileResult};

use error::file_error;

/// Default configuration root, relative to the working directory.
pub const DEFAULT_CONFIG_ROOT: &str = "config";

/// A configuration file located by [`ConfigStore::find`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundFile {
    /// Path relative to the store root.
    pub path: Utf8PathBuf,
    /// Format implied by the file extension.
    pub format: ConfigFormat,
}

/// Capability-scoped access to a configuration root directory.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    root: Utf8PathBuf,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_ROOT)
    }
}

impl ConfigStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first write.
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Path of `relative` as seen from the working directory.
    #[must_use]
    pub fn resolve(&self, relative: &Utf8Path) -> Utf8PathBuf {
        self.root.join(relative)
    }

    fn open_root(&self) -> std::io::Result<Dir> {
        Dir::open_ambient_dir(&self.root, ambient_authority())
    }

    /// Locate an existing file for `base` (a relative path without
    /// extension).
    ///
    /// When several recognised formats exist side by side, the file in
    /// `expected` wins; otherwise the first match in
    /// [`ConfigFormat::ALL`] order is returned.
    #[must_use]
    pub fn find(&self, base: &Utf8Path, expected: ConfigFormat) -> Option<FoundFile> {
        let dir = self.open_root().ok()?;
        let mut found = ConfigFormat::ALL
            .into_iter()
            .map(|format| FoundFile {
                path: with_extension(base, format),
                format,
            })
            .filter(|candidate| dir.is_file(&candidate.path));
        let first = found.next()?;
        if first.format == expected {
            return Some(first);
        }
        Some(
            found
                .find(|candidate| candidate.format == expected)
                .unwrap_or(first),
        )
    }

    /// Whether a regular file exists at `relative`.
    #[must_use]
    pub fn exists(&self, relative: &Utf8Path) -> bool {
        self.open_root().is_ok_and(|dir| dir.is_file(relative))
    }

    /// Read the file at `relative` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReconcileError::File`] when the root cannot be opened
    /// or the file cannot be read.
    pub fn read(&self, relative: &Utf8Path) -> ReconcileResult<String> {
        self.open_root()
            .and_then(|dir| dir.read_to_string(relative))
            .map_err(|err| file_error(&self.resolve(relative), err))
    }

    /// Write `contents` to `relative`, creating the root and any parent
    /// folders.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReconcileError::File`] when a directory cannot be
    /// created or the file cannot be written.
    pub fn write(&self, relative: &Utf8Path, contents: &str) -> ReconcileResult<()> {
        let write = || -> std::io::Result<()> {
            Dir::create_ambient_dir_all(&self.root, ambient_authority())?;
            let dir = self.open_root()?;
            if let Some(parent) = relative.parent().filter(|parent| !parent.as_str().is_empty()) {
                dir.create_dir_all(parent)?;
            }
            dir.write(relative, contents)
        };
        write().map_err(|err| file_error(&self.resolve(relative), err))
    }

    /// Delete the file at `relative`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReconcileError::File`] when the file cannot be
    /// removed.
    pub fn remove(&self, relative: &Utf8Path) -> ReconcileResult<()> {
        self.open_root()
            .and_then(|dir| dir.remove_file(relative))
            .map_err(|err| file_error(&self.resolve(relative), err))
    }
}

/// Append the lower-case extension of `format` to `base`.
#[must_use]
pub fn with_extension(base: &Utf8Path, format: ConfigFormat) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{base}.{}", format.extension()))
}
