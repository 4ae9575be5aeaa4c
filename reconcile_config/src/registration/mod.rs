//! Lifecycle coordination for one bound configuration object.
//!
//! A [`Registration`] ties a [`SpecTree`] to a [`ConfigBinding`], a
//! [`ConfigStore`] path and a file format. It decides when each
//! reconciliation pass runs relative to file I/O and remote overlay events,
//! and absorbs every recoverable failure: a missing, unreadable or malformed
//! file is regenerated, never reported to the caller.

mod builder;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, error, info, warn};

use crate::{
    ConfigBinding, ConfigFormat, ConfigStore, Element, Mapping, ReconcileResult, Scope, SpecTree,
    file::{FoundFile, with_extension},
};

pub use builder::RegistrationBuilder;

/// Lifecycle state of a [`Registration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    /// No local file has been loaded yet.
    Unloaded,
    /// Live values reflect the local file.
    LocalLoaded,
    /// A remote overlay is applied and the local values are held in a
    /// snapshot until it is withdrawn.
    RemoteOverlaid,
}

/// One configuration object managed through its full lifecycle.
#[derive(Debug)]
pub struct Registration<B> {
    spec: SpecTree,
    binding: B,
    store: ConfigStore,
    format: ConfigFormat,
    base_path: Utf8PathBuf,
    file_path: Utf8PathBuf,
    saved_local: Option<Element>,
    loaded: bool,
}

impl<B: ConfigBinding> Registration<B> {
    /// Schema driving every reconciliation pass.
    #[must_use]
    pub const fn spec(&self) -> &SpecTree {
        &self.spec
    }

    /// The bound configuration object.
    #[must_use]
    pub const fn binding(&self) -> &B {
        &self.binding
    }

    /// Scope of the root node.
    #[must_use]
    pub const fn scope(&self) -> Scope {
        self.spec.root().scope()
    }

    /// Declared file format.
    #[must_use]
    pub const fn format(&self) -> ConfigFormat {
        self.format
    }

    /// Registry key: `<folder>/<name>-<scope>`.
    #[must_use]
    pub fn key(&self) -> &str {
        self.base_path.as_str()
    }

    /// Canonical file path, relative to the store root.
    #[must_use]
    pub fn file_path(&self) -> &Utf8Path {
        &self.file_path
    }

    /// Returns `true` when the spec tree declares no options beyond the implicit
    /// advanced toggle. Empty registrations never touch the filesystem.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spec.is_empty()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> RegistrationState {
        match (self.loaded, &self.saved_local) {
            (_, Some(_)) => RegistrationState::RemoteOverlaid,
            (true, None) => RegistrationState::LocalLoaded,
            (false, None) => RegistrationState::Unloaded,
        }
    }

    /// Load the local file into the bound object and rewrite it in
    /// canonical form.
    ///
    /// A missing, unreadable, unparsable or unsalvageable file is replaced
    /// by a freshly generated one. On `reload`, only reload-safe options are
    /// applied to the live object. While the file leaves advanced options
    /// disabled, advanced nodes are applied at their defaults. Any remote
    /// overlay snapshot is discarded.
    /// Once the canonical file is written, copies in other formats are
    /// deleted.
    pub fn load_local_config_file(&mut self, reload: bool) {
        self.saved_local = None;
        let corrected = self
            .store
            .find(&self.base_path, self.format)
            .and_then(|found| self.read_file(&found))
            .and_then(|parsed| {
                let ordered = self.spec.correct_order(&parsed);
                self.spec.correct_to_valid_state(&ordered).into_valid()
            });
        let persisted = match corrected {
            Some(valid) => self.apply_local(&valid, reload),
            None => self.generate_file(reload),
        };
        if persisted {
            self.remove_stale_variants();
        }
        self.loaded = true;
    }

    /// Overlay a tree received from a remote authority onto the live object.
    ///
    /// Only `COMMON` registrations that have loaded their local file accept
    /// overlays; pushes arriving earlier are ignored. The first overlay
    /// snapshots the live sync-eligible values so that
    /// [`Registration::unload_remote_config`] can restore them. Unknown or
    /// non-synchronised entries are stripped; an unusable payload falls back
    /// to the sync-eligible defaults.
    pub fn load_remote_config(&mut self, tree: &Element, reload: bool) {
        if self.scope() != Scope::Common {
            debug!(key = self.key(), scope = %self.scope(), "ignoring remote configuration");
            return;
        }
        if !self.loaded {
            debug!(key = self.key(), "ignoring remote configuration before the local file is loaded");
            return;
        }
        if self.saved_local.is_none() {
            match self.binding.current_element() {
                Ok(current) => {
                    let snapshot = self
                        .spec
                        .sync_element(&current)
                        .unwrap_or_else(|| Element::Mapping(Mapping::new()));
                    self.saved_local = Some(snapshot);
                }
                Err(err) => {
                    error!(key = self.key(), error = %err, "cannot snapshot local configuration; remote configuration not applied");
                    return;
                }
            }
        }
        let sync_defaults = || self.spec.sync_element(&self.spec.default_element());
        let corrected = self
            .spec
            .remove_unknown_elements(tree)
            .or_else(sync_defaults)
            .and_then(|stripped| {
                self.spec
                    .correct_to_valid_state(&stripped)
                    .into_valid()
                    .or_else(sync_defaults)
            });
        let applied = if reload {
            corrected.and_then(|valid| self.spec.trim_to_reloadable(&valid))
        } else {
            corrected
        };
        match applied {
            Some(overlay) => {
                if self.write_binding(&overlay) {
                    info!(key = self.key(), reload, "applied remote configuration");
                }
            }
            None => debug!(key = self.key(), "remote configuration left nothing to apply"),
        }
    }

    /// Withdraw the remote overlay, restoring the values held before the
    /// first [`Registration::load_remote_config`]. Does nothing when no
    /// overlay is applied.
    pub fn unload_remote_config(&mut self) {
        if self.scope() != Scope::Common {
            return;
        }
        let Some(saved) = self.saved_local.take() else {
            return;
        };
        if self.write_binding(&saved) {
            info!(key = self.key(), "restored local configuration");
        }
    }

    /// Sync-eligible subset of the live values, in canonical order, for
    /// transmission to remote peers.
    ///
    /// Returns `None` when nothing is eligible or the live values cannot be
    /// read.
    #[must_use]
    pub fn generate_sync_element(&self) -> Option<Element> {
        match self.binding.current_element() {
            Ok(current) => self.spec.sync_element(&current),
            Err(err) => {
                error!(key = self.key(), error = %err, "cannot read live configuration");
                None
            }
        }
    }

    fn apply_local(&mut self, corrected: &Element, reload: bool) -> bool {
        let effective = self.spec.reset_hidden_advanced(corrected);
        let applied = if reload {
            self.spec.trim_to_reloadable(&effective)
        } else {
            Some(effective)
        };
        if let Some(subset) = applied {
            self.write_binding(&subset);
        }
        let regenerated = self.spec.regenerate_missing_elements(corrected);
        self.persist(&regenerated)
    }

    fn generate_file(&mut self, reload: bool) -> bool {
        if !reload {
            let defaults = self.spec.default_element();
            self.write_binding(&defaults);
        }
        let current = match self.binding.current_element() {
            Ok(current) => self.spec.canonicalize(&current),
            Err(err) => {
                error!(key = self.key(), error = %err, "cannot read live configuration; writing defaults");
                self.spec.default_element()
            }
        };
        info!(path = %self.store.resolve(&self.file_path), "generating configuration file");
        self.persist(&self.spec.regenerate_missing_elements(&current))
    }

    fn read_file(&self, found: &FoundFile) -> Option<Element> {
        let parsed = self
            .store
            .read(&found.path)
            .and_then(|text| found.format.codec()?.parse(&text));
        match parsed {
            Ok(tree) => Some(tree),
            Err(err) => {
                error!(path = %self.store.resolve(&found.path), error = %err, "failed to load configuration file");
                None
            }
        }
    }

    fn persist(&self, tree: &Element) -> bool {
        match self.render(tree).and_then(|text| self.store.write(&self.file_path, &text)) {
            Ok(()) => true,
            Err(err) => {
                error!(path = %self.store.resolve(&self.file_path), error = %err, "failed to write configuration file");
                false
            }
        }
    }

    fn render(&self, tree: &Element) -> ReconcileResult<String> {
        let header = self.spec.describe(SpecTree::advanced_enabled(tree));
        self.format
            .codec()?
            .serialize_with_header(&self.spec.visible_element(tree), &header)
    }

    fn remove_stale_variants(&self) {
        let stale = ConfigFormat::ALL
            .into_iter()
            .filter(|format| *format != self.format)
            .map(|format| with_extension(&self.base_path, format))
            .filter(|path| self.store.exists(path));
        for path in stale {
            match self.store.remove(&path) {
                Ok(()) => debug!(path = %self.store.resolve(&path), "removed stale configuration file"),
                Err(err) => warn!(
                    path = %self.store.resolve(&path),
                    error = %err,
                    "failed to remove stale configuration file"
                ),
            }
        }
    }

    fn write_binding(&mut self, tree: &Element) -> bool {
        let merged = self
            .binding
            .current_element()
            .map(|live| self.spec.merge_into(&live, tree));
        match merged.and_then(|complete| self.binding.write_element(&complete)) {
            Ok(()) => true,
            Err(err) => {
                error!(key = self.key(), error = %err, "failed to apply configuration to bound value");
                false
            }
        }
    }
}
