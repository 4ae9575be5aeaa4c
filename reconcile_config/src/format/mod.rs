//! Text codecs that map raw configuration files to element trees.
//!
//! Each [`ConfigFormat`] is backed by a [`FormatCodec`]. Codecs only turn
//! text into an [`Element`] and back; they know nothing about schemas.

mod json_codec;
#[cfg(feature = "json5")]
mod json5_codec;
#[cfg(feature = "toml")]
mod toml_codec;

use std::fmt;

use crate::{Element, ReconcileError, ReconcileResult};

pub use json_codec::JsonCodec;
#[cfg(feature = "json5")]
pub use json5_codec::Json5Codec;
#[cfg(feature = "toml")]
pub use toml_codec::TomlCodec;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFormat {
    /// Plain JSON.
    Json,
    /// JSON5, which permits comments. Requires the `json5` feature.
    Json5,
    /// TOML. Requires the `toml` feature (enabled by default).
    Toml,
}

impl ConfigFormat {
    /// Every recognised format, in lookup order.
    pub const ALL: [Self; 3] = [Self::Json, Self::Json5, Self::Toml];

    /// Lower-case file extension for the format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Json5 => "json5",
            Self::Toml => "toml",
        }
    }

    /// Resolve a format from a file extension, ignoring ASCII case.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(extension))
    }

    /// Returns the codec backing this format.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Parse`] when the format's cargo feature is
    /// disabled.
    pub fn codec(self) -> ReconcileResult<Box<dyn FormatCodec>> {
        match self {
            Self::Json => Ok(Box::new(JsonCodec)),
            Self::Json5 => {
                #[cfg(feature = "json5")]
                {
                    Ok(Box::new(Json5Codec))
                }
                #[cfg(not(feature = "json5"))]
                {
                    Err(feature_disabled(self, "json5"))
                }
            }
            Self::Toml => {
                #[cfg(feature = "toml")]
                {
                    Ok(Box::new(TomlCodec))
                }
                #[cfg(not(feature = "toml"))]
                {
                    Err(feature_disabled(self, "toml"))
                }
            }
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(any(not(feature = "json5"), not(feature = "toml")))]
fn feature_disabled(format: ConfigFormat, feature: &str) -> std::sync::Arc<ReconcileError> {
    std::sync::Arc::new(ReconcileError::Parse {
        format,
        message: format!(
            "{feature} feature disabled: enable the '{feature}' feature to support this file format"
        ),
    })
}

/// Bidirectional mapping between raw configuration text and element trees.
pub trait FormatCodec {
    /// Format implemented by this codec.
    fn format(&self) -> ConfigFormat;

    /// Parse raw text into an element tree.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Parse`] for malformed input.
    fn parse(&self, text: &str) -> ReconcileResult<Element>;

    /// Render an element tree as text.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Serialize`] when the tree cannot be
    /// represented in this format.
    fn serialize(&self, element: &Element) -> ReconcileResult<String>;

    /// Line-comment prefix, or `None` when the format has no comments.
    fn comment_prefix(&self) -> Option<&'static str> {
        None
    }

    /// Render `element` preceded by `header` lines as comments.
    ///
    /// Formats without comment support drop the header.
    ///
    /// # Errors
    ///
    /// Propagates serialisation failures from [`FormatCodec::serialize`].
    fn serialize_with_header(&self, element: &Element, header: &[String]) -> ReconcileResult<String> {
        let body = self.serialize(element)?;
        let Some(prefix) = self.comment_prefix() else {
            return Ok(body);
        };
        if header.is_empty() {
            return Ok(body);
        }
        let mut text = String::new();
        for line in header {
            text.push_str(prefix);
            if !line.is_empty() {
                text.push(' ');
                text.push_str(line);
            }
            text.push('\n');
        }
        text.push('\n');
        text.push_str(&body);
        Ok(text)
    }
}
