//! Disposable configuration roots backed by a temporary directory.
//!
//! # Examples
//!
//! ```
//! use reconcile_config_test_helpers::TempConfigRoot;
//!
//! let root = TempConfigRoot::new().expect("temp root");
//! root.write("audio/main-common.toml", "volume = 0.5\n").expect("write");
//! assert!(root.exists("audio/main-common.toml"));
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Temporary directory holding a `config` root for a single test.
///
/// The directory and everything beneath it is removed on drop.
#[derive(Debug)]
pub struct TempConfigRoot {
    _dir: TempDir,
    config_dir: Utf8PathBuf,
}

impl TempConfigRoot {
    /// Create a fresh temporary directory. The `config` folder inside it is
    /// not created, so callers can observe lazy creation.
    ///
    /// # Errors
    ///
    /// Returns an error when the temporary directory cannot be created or its
    /// path is not valid UTF-8.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temporary directory")?;
        let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("temporary path is not UTF-8: {}", path.display()))?;
        Ok(Self {
            _dir: dir,
            config_dir: base.join("config"),
        })
    }

    /// Absolute path of the configuration root.
    #[must_use]
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Absolute path of `relative` beneath the configuration root.
    #[must_use]
    pub fn path(&self, relative: impl AsRef<Utf8Path>) -> Utf8PathBuf {
        self.config_dir.join(relative)
    }

    /// Write `contents` to `relative`, creating parent folders.
    ///
    /// # Errors
    ///
    /// Returns an error when a folder or the file cannot be written.
    pub fn write(&self, relative: impl AsRef<Utf8Path>, contents: &str) -> Result<()> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        std::fs::write(&path, contents).with_context(|| format!("write {path}"))
    }

    /// Read `relative` as text.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read.
    pub fn read(&self, relative: impl AsRef<Utf8Path>) -> Result<String> {
        let path = self.path(relative);
        std::fs::read_to_string(&path).with_context(|| format!("read {path}"))
    }

    /// Whether a file exists at `relative`.
    #[must_use]
    pub fn exists(&self, relative: impl AsRef<Utf8Path>) -> bool {
        self.path(relative).is_file()
    }
}
