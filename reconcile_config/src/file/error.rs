//! Error constructors shared by the file store.

use std::sync::Arc;

use camino::Utf8Path;

use crate::ReconcileError;

/// Construct a [`ReconcileError::File`] for a configuration path.
pub(super) fn file_error(path: &Utf8Path, err: std::io::Error) -> Arc<ReconcileError> {
    Arc::new(ReconcileError::File {
        path: path.to_path_buf(),
        source: err,
    })
}
