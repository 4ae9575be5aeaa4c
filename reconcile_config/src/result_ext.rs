//! Extensions for mapping errors to `ReconcileResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(e.into()))`
//! patterns when converting external error types into the crate's
//! `ReconcileResult<T>` alias (`Result<T, Arc<ReconcileError>>`).
//!
//! # Examples
//!
//! ```
//! use reconcile_config::{ReconcileResult, ReconcileResultExt};
//!
//! fn render() -> ReconcileResult<String> {
//!     // serde_json::Error implements Into<ReconcileError>
//!     serde_json::to_string(&42).into_reconcile()
//! }
//! ```

use crate::{ReconcileError, ReconcileResult};
use std::sync::Arc;

/// Generic extension for mapping any `Result<T, E>` with
/// `E: Into<ReconcileError>` into a `ReconcileResult<T>`.
pub trait ReconcileResultExt<T, E> {
    /// Convert `Result<T, E>` into `ReconcileResult<T>` using
    /// `Into<ReconcileError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into
    /// `Arc<ReconcileError>`.
    fn into_reconcile(self) -> ReconcileResult<T>;
}

impl<T, E> ReconcileResultExt<T, E> for Result<T, E>
where
    E: Into<ReconcileError>,
{
    fn into_reconcile(self) -> ReconcileResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
