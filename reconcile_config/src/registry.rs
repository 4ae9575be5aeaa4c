//! Phase-ordered coordination of every registration in a process.
//!
//! Components register their configuration before anything else runs; the
//! registry performs the initial local load and afterwards fans lifecycle
//! events out to every registration in declaration order.

use std::sync::Arc;

use tracing::info;

use crate::{
    ConfigBinding, Element, Mapping, ReconcileError, ReconcileResult, Registration,
    RegistrationState, Scope,
};

/// Object-safe view of a [`Registration`], independent of its binding type.
pub trait ManagedConfig {
    /// Registry key: `<folder>/<name>-<scope>`.
    fn key(&self) -> &str;

    /// Scope of the root node.
    fn scope(&self) -> Scope;

    /// Whether the spec tree declares no options beyond the advanced toggle.
    fn is_empty(&self) -> bool;

    /// Current lifecycle state.
    fn state(&self) -> RegistrationState;

    /// See [`Registration::load_local_config_file`].
    fn load_local_config_file(&mut self, reload: bool);

    /// See [`Registration::load_remote_config`].
    fn load_remote_config(&mut self, tree: &Element, reload: bool);

    /// See [`Registration::unload_remote_config`].
    fn unload_remote_config(&mut self);

    /// See [`Registration::generate_sync_element`].
    fn generate_sync_element(&self) -> Option<Element>;
}

impl<B: ConfigBinding> ManagedConfig for Registration<B> {
    fn key(&self) -> &str {
        Self::key(self)
    }

    fn scope(&self) -> Scope {
        Self::scope(self)
    }

    fn is_empty(&self) -> bool {
        Self::is_empty(self)
    }

    fn state(&self) -> RegistrationState {
        Self::state(self)
    }

    fn load_local_config_file(&mut self, reload: bool) {
        Self::load_local_config_file(self, reload);
    }

    fn load_remote_config(&mut self, tree: &Element, reload: bool) {
        Self::load_remote_config(self, tree, reload);
    }

    fn unload_remote_config(&mut self) {
        Self::unload_remote_config(self);
    }

    fn generate_sync_element(&self) -> Option<Element> {
        Self::generate_sync_element(self)
    }
}

/// Ordered collection of registrations.
///
/// # Examples
///
/// ```rust,no_run
/// use reconcile_config::{
///     ConfigRegistry, Leaf, RegistrationBuilder, Scope, SpecTree, ValueBinding,
/// };
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Default, Serialize, Deserialize)]
/// struct Audio { enable_advanced_config: bool, volume: f64 }
///
/// # fn run() -> reconcile_config::ReconcileResult<()> {
/// let audio = ValueBinding::new(Audio::default());
/// let spec = SpecTree::builder(Scope::Common)
///     .leaf(Leaf::float("volume", 0.5).reloadable(true))
///     .build()?;
/// let mut registry = ConfigRegistry::new();
/// registry.register(RegistrationBuilder::new("audio").build(spec, audio.clone())?)?;
///
/// let outbound = registry.sync_payload();
/// registry.apply_remote(&outbound, false)?;
/// registry.withdraw_remote();
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ConfigRegistry {
    registrations: Vec<Box<dyn ManagedConfig>>,
}

impl std::fmt::Debug for ConfigRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.registrations.iter().map(|registration| registration.key()))
            .finish()
    }
}

impl ConfigRegistry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }

    /// Add `registration` and load its local file.
    ///
    /// Registrations whose spec is empty are kept but never loaded.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::DuplicateRegistration`] when a registration
    /// with the same key already exists.
    pub fn register<R>(&mut self, registration: R) -> ReconcileResult<()>
    where
        R: ManagedConfig + 'static,
    {
        let mut managed = Box::new(registration);
        if self.get(managed.key()).is_some() {
            return Err(Arc::new(ReconcileError::DuplicateRegistration {
                key: managed.key().to_owned(),
            }));
        }
        if !managed.is_empty() {
            managed.load_local_config_file(false);
        }
        info!(key = managed.key(), "registered configuration");
        self.registrations.push(managed);
        Ok(())
    }

    /// Registration stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&dyn ManagedConfig> {
        self.registrations
            .iter()
            .find(|registration| registration.key() == key)
            .map(|registration| &**registration)
    }

    /// Keys of every registration, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.registrations.iter().map(|registration| registration.key())
    }

    /// Number of registrations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Reload every non-empty registration from disk, applying only
    /// reload-safe options.
    pub fn reload_local(&mut self) {
        for registration in self.active_mut() {
            registration.load_local_config_file(true);
        }
    }

    /// Overlay a remote payload mapping registration keys to trees.
    ///
    /// Every key is resolved before anything is applied, so an unknown key
    /// leaves all registrations untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::UnknownRegistration`] for the first key with
    /// no registration.
    pub fn apply_remote(&mut self, payload: &Mapping, reload: bool) -> ReconcileResult<()> {
        if let Some(key) = payload.keys().find(|key| self.get(key).is_none()) {
            return Err(Arc::new(ReconcileError::UnknownRegistration {
                key: key.to_owned(),
            }));
        }
        for registration in self.active_mut() {
            if let Some(tree) = payload.get(registration.key()) {
                registration.load_remote_config(tree, reload);
            }
        }
        Ok(())
    }

    /// Withdraw every remote overlay, restoring local values.
    pub fn withdraw_remote(&mut self) {
        for registration in self.active_mut() {
            registration.unload_remote_config();
        }
    }

    /// Sync-eligible live values of every `COMMON` registration, keyed by
    /// registration key.
    #[must_use]
    pub fn sync_payload(&self) -> Mapping {
        self.registrations
            .iter()
            .filter(|registration| registration.scope() == Scope::Common && !registration.is_empty())
            .filter_map(|registration| {
                let tree = registration.generate_sync_element()?;
                Some((registration.key().to_owned(), tree))
            })
            .collect()
    }

    fn active_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn ManagedConfig>> {
        self.registrations
            .iter_mut()
            .filter(|registration| !registration.is_empty())
    }
}
