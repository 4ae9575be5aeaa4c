//! Schema-driven configuration reconciliation.
//!
//! A component declares its configuration as a [`SpecTree`] and binds it to
//! a live value through a [`ConfigBinding`]. A [`Registration`] keeps that
//! value in step with a file on disk, repairing whatever it finds there, and
//! lets a remote authority overlay synchronised options temporarily. The
//! [`ConfigRegistry`] drives every registration through the same lifecycle.
//!
//! Untrusted input, whether read from disk or received from a peer, is an
//! [`Element`] tree. The reconciliation passes on [`SpecTree`] turn such
//! trees into schema-conformant ones without ever failing: bad values fall
//! back to declared defaults and unsalvageable trees are regenerated.

use std::sync::Arc;

mod binding;
mod element;
mod error;
mod file;
mod format;
mod reconcile;
mod registration;
mod registry;
mod result_ext;
mod spec;
#[cfg(test)]
mod test_fixtures;

pub use binding::{ConfigBinding, ValueBinding};
pub use element::{Element, Mapping, Scalar};
pub use error::ReconcileError;
pub use file::{ConfigStore, DEFAULT_CONFIG_ROOT, FoundFile};
pub use format::{ConfigFormat, FormatCodec, JsonCodec};
#[cfg(feature = "json5")]
pub use format::Json5Codec;
#[cfg(feature = "toml")]
pub use format::TomlCodec;
pub use reconcile::Correction;
pub use registration::{Registration, RegistrationBuilder, RegistrationState};
pub use registry::{ConfigRegistry, ManagedConfig};
pub use result_ext::ReconcileResultExt;
pub use spec::{
    ADVANCED_TOGGLE_KEY, Leaf, LeafSpec, Scope, Section, SpecKind, SpecNode, SpecTree,
    SpecTreeBuilder, Validator, ValueType,
};

/// Result type alias used throughout the crate.
///
/// Errors are shared behind an [`Arc`] so they can be logged and returned
/// without cloning the underlying diagnostic.
pub type ReconcileResult<T> = Result<T, Arc<ReconcileError>>;
