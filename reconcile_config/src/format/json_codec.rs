//! JSON codec backed by `serde_json`.

use super::{ConfigFormat, FormatCodec};
use crate::{Element, ReconcileError, ReconcileResult, ReconcileResultExt};

/// Codec for plain JSON files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl FormatCodec for JsonCodec {
    fn format(&self) -> ConfigFormat {
        ConfigFormat::Json
    }

    fn parse(&self, text: &str) -> ReconcileResult<Element> {
        serde_json::from_str(text).into_reconcile()
    }

    fn serialize(&self, element: &Element) -> ReconcileResult<String> {
        let mut text = serde_json::to_string_pretty(element).map_err(|err| {
            std::sync::Arc::new(ReconcileError::Serialize {
                format: ConfigFormat::Json,
                message: err.to_string(),
            })
        })?;
        text.push('\n');
        Ok(text)
    }
}
