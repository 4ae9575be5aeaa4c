//! TOML codec backed by the `toml` crate.

use super::{ConfigFormat, FormatCodec};
use crate::{Element, ReconcileResult, ReconcileResultExt};

/// Codec for TOML files.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlCodec;

impl FormatCodec for TomlCodec {
    fn format(&self) -> ConfigFormat {
        ConfigFormat::Toml
    }

    fn parse(&self, text: &str) -> ReconcileResult<Element> {
        toml::from_str(text).into_reconcile()
    }

    fn serialize(&self, element: &Element) -> ReconcileResult<String> {
        toml::to_string_pretty(element).into_reconcile()
    }

    fn comment_prefix(&self) -> Option<&'static str> {
        Some("#")
    }
}
