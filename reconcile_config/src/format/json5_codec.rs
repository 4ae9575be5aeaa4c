//! JSON5 codec backed by the `json5` crate.

use std::sync::Arc;

use super::{ConfigFormat, FormatCodec};
use crate::{Element, ReconcileError, ReconcileResult};

/// Codec for JSON5 files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json5Codec;

impl FormatCodec for Json5Codec {
    fn format(&self) -> ConfigFormat {
        ConfigFormat::Json5
    }

    fn parse(&self, text: &str) -> ReconcileResult<Element> {
        json5::from_str(text).map_err(|err| {
            Arc::new(ReconcileError::Parse {
                format: ConfigFormat::Json5,
                message: err.to_string(),
            })
        })
    }

    fn serialize(&self, element: &Element) -> ReconcileResult<String> {
        json5::to_string(element).map_err(|err| {
            Arc::new(ReconcileError::Serialize {
                format: ConfigFormat::Json5,
                message: err.to_string(),
            })
        })
    }

    fn comment_prefix(&self) -> Option<&'static str> {
        Some("//")
    }
}
