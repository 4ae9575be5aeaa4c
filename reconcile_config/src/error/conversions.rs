//! Trait-based conversions between external error types and `ReconcileError`.

use figment::Error as FigmentError;

use super::ReconcileError;
use crate::ConfigFormat;

/// Convert JSON encoding or decoding failures into
/// [`ReconcileError::Parse`].
impl From<serde_json::Error> for ReconcileError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse {
            format: ConfigFormat::Json,
            message: format!("{e} at line {}, column {}", e.line(), e.column()),
        }
    }
}

#[cfg(feature = "toml")]
impl From<toml::de::Error> for ReconcileError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse {
            format: ConfigFormat::Toml,
            message: e.to_string(),
        }
    }
}

#[cfg(feature = "toml")]
impl From<toml::ser::Error> for ReconcileError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Serialize {
            format: ConfigFormat::Toml,
            message: e.to_string(),
        }
    }
}

impl From<FigmentError> for ReconcileError {
    fn from(e: FigmentError) -> Self {
        Self::binding(e)
    }
}
