//! Primary error enum for reconciliation and persistence flows.

use camino::Utf8PathBuf;
use figment::Error as FigmentError;
use thiserror::Error;

use crate::ConfigFormat;

/// Errors that can occur while reconciling, persisting, or applying
/// configuration trees.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReconcileError {
    /// Filesystem failure against a configuration path.
    #[error("Configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A codec rejected the raw text it was given.
    #[error("Failed to parse {format} configuration: {message}")]
    Parse {
        /// Format whose codec rejected the input.
        format: ConfigFormat,
        /// Codec diagnostic.
        message: String,
    },

    /// A codec could not render an element tree.
    #[error("Failed to serialise {format} configuration: {message}")]
    Serialize {
        /// Format whose codec failed.
        format: ConfigFormat,
        /// Codec diagnostic.
        message: String,
    },

    /// The declared spec tree is structurally inconsistent.
    #[error("Invalid configuration spec at '{path}': {message}")]
    InvalidSpec {
        /// Dotted path of the offending node (empty for the root).
        path: String,
        /// Human-readable explanation of the inconsistency.
        message: String,
    },

    /// The bound configuration object could not absorb an element tree.
    #[error("Failed to apply configuration to bound value: {0}")]
    Binding(#[source] Box<FigmentError>),

    /// Registration metadata cannot produce a configuration path.
    #[error("Invalid configuration registration '{name}': {message}")]
    InvalidRegistration {
        /// Declared configuration name.
        name: String,
        /// Human-readable explanation.
        message: String,
    },

    /// A registration with the same key already exists.
    #[error("configuration '{key}' is already registered")]
    DuplicateRegistration {
        /// Registration key (`<folder>/<name>-<scope>`).
        key: String,
    },

    /// A remote payload referenced a registration that does not exist.
    #[error("no configuration registered under '{key}'")]
    UnknownRegistration {
        /// Registration key that failed to resolve.
        key: String,
    },
}

impl ReconcileError {
    /// Construct an [`ReconcileError::InvalidSpec`] for the node at `path`.
    #[must_use]
    pub fn invalid_spec(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSpec {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Construct a binding error from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use reconcile_config::ReconcileError;
    /// let e = ReconcileError::binding(figment::Error::from("boom"));
    /// assert!(matches!(e, ReconcileError::Binding(_)));
    /// ```
    #[must_use]
    pub fn binding(source: FigmentError) -> Self {
        Self::Binding(Box::new(source))
    }
}
