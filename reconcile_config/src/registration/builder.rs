//! Builder for [`Registration`] instances.

use std::sync::Arc;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

use super::Registration;
use crate::{
    ConfigBinding, ConfigFormat, ConfigStore, ReconcileError, ReconcileResult, SpecTree,
    file::with_extension,
};

#[cfg(feature = "toml")]
const DEFAULT_FORMAT: ConfigFormat = ConfigFormat::Toml;
#[cfg(not(feature = "toml"))]
const DEFAULT_FORMAT: ConfigFormat = ConfigFormat::Json;

/// Builder for [`Registration`].
///
/// # Examples
///
/// ```rust,no_run
/// use reconcile_config::{
///     ConfigFormat, Leaf, RegistrationBuilder, RegistrationState, Scope, SpecTree, ValueBinding,
/// };
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Default, Serialize, Deserialize)]
/// struct Audio { enable_advanced_config: bool, volume: f64 }
///
/// # fn run() -> reconcile_config::ReconcileResult<()> {
/// let spec = SpecTree::builder(Scope::Common)
///     .leaf(Leaf::float("volume", 0.5).reloadable(true))
///     .build()?;
/// let binding = ValueBinding::new(Audio::default());
/// let mut registration = RegistrationBuilder::new("audio")
///     .folder("my_plugin")
///     .format(ConfigFormat::Json)
///     .build(spec, binding.clone())?;
/// registration.load_local_config_file(false);
/// assert_eq!(registration.state(), RegistrationState::LocalLoaded);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RegistrationBuilder {
    name: String,
    folder: Utf8PathBuf,
    format: ConfigFormat,
    store: ConfigStore,
}

impl RegistrationBuilder {
    /// Creates a builder for the configuration called `name`.
    ///
    /// Files live directly under the default `config` root in TOML (or JSON
    /// when the `toml` feature is disabled) until overridden.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            folder: Utf8PathBuf::new(),
            format: DEFAULT_FORMAT,
            store: ConfigStore::default(),
        }
    }

    /// Sets the folder beneath the configuration root.
    #[must_use]
    pub fn folder(mut self, folder: impl Into<Utf8PathBuf>) -> Self {
        self.folder = folder.into();
        self
    }

    /// Sets the declared file format.
    #[must_use]
    pub const fn format(mut self, format: ConfigFormat) -> Self {
        self.format = format;
        self
    }

    /// Overrides the configuration root directory.
    #[must_use]
    pub fn root(mut self, root: impl Into<Utf8PathBuf>) -> Self {
        self.store = ConfigStore::new(root);
        self
    }

    /// Finish the registration for `spec` and `binding`.
    ///
    /// The bound object is not touched until the first load.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::InvalidRegistration`] when the name is empty
    /// or contains a path separator, or the folder is not a plain relative
    /// path.
    pub fn build<B: ConfigBinding>(
        self,
        spec: SpecTree,
        binding: B,
    ) -> ReconcileResult<Registration<B>> {
        if self.name.is_empty() || self.name.contains(['/', '\\']) {
            return Err(invalid(&self.name, "name must be a non-empty file stem"));
        }
        if !is_plain_relative(&self.folder) {
            let message = format!(
                "folder '{}' must stay beneath the configuration root",
                self.folder
            );
            return Err(invalid(&self.name, message));
        }
        let stem = format!("{}-{}", self.name, spec.root().scope());
        let base_path = self.folder.join(stem);
        Ok(Registration {
            file_path: with_extension(&base_path, self.format),
            base_path,
            spec,
            binding,
            store: self.store,
            format: self.format,
            saved_local: None,
            loaded: false,
        })
    }
}

fn is_plain_relative(path: &Utf8Path) -> bool {
    path.components()
        .all(|component| matches!(component, Utf8Component::Normal(_) | Utf8Component::CurDir))
}

fn invalid(name: &str, message: impl Into<String>) -> Arc<ReconcileError> {
    Arc::new(ReconcileError::InvalidRegistration {
        name: name.to_owned(),
        message: message.into(),
    })
}
