//! Format-agnostic element trees.
//!
//! An [`Element`] is the untrusted representation of configuration data:
//! whatever a codec parsed from disk, whatever a remote peer sent, or
//! whatever the engine generated from declared defaults. Elements carry no
//! type information beyond their tag. Reconciliation passes never mutate an
//! element in place; every correction builds a new tree.

mod json;
mod mapping;
mod serde_impl;

use std::fmt;

pub use mapping::Mapping;

/// A scalar leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Integer(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    String(String),
}

impl Scalar {
    /// Returns the value as `f64` when it is numeric.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "range checks tolerate precision loss beyond 2^53"
    )]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            Self::Bool(_) | Self::String(_) => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
            Self::String(value) => write!(f, "{value:?}"),
        }
    }
}

/// A node of an element tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A scalar leaf.
    Scalar(Scalar),
    /// An ordered list of elements. Order is meaningful.
    Sequence(Vec<Self>),
    /// An ordered mapping with unique keys.
    Mapping(Mapping),
}

impl Element {
    /// Build a mapping element from `(key, element)` pairs.
    ///
    /// Later duplicates replace earlier entries in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use reconcile_config::Element;
    ///
    /// let tree = Element::mapping([("volume", Element::from(0.5)), ("fov", Element::from(110))]);
    /// assert_eq!(tree.as_mapping().map(|m| m.len()), Some(2));
    /// ```
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Self)>,
    {
        Self::Mapping(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    /// Returns the mapping if this element is one.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(mapping) => Some(mapping),
            Self::Scalar(_) | Self::Sequence(_) => None,
        }
    }

    /// Returns the scalar if this element is one.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            Self::Sequence(_) | Self::Mapping(_) => None,
        }
    }

    /// Returns the sequence items if this element is one.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items),
            Self::Scalar(_) | Self::Mapping(_) => None,
        }
    }

    /// Returns the boolean value if this element is a boolean scalar.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Scalar(Scalar::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    /// Follow a dotted path through nested mappings.
    ///
    /// ```
    /// use reconcile_config::Element;
    ///
    /// let tree = Element::mapping([("audio", Element::mapping([("volume", Element::from(0.5))]))]);
    /// assert_eq!(tree.lookup("audio.volume"), Some(&Element::from(0.5)));
    /// assert!(tree.lookup("audio.missing").is_none());
    /// ```
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&Self> {
        path.split('.')
            .try_fold(self, |node, key| node.as_mapping()?.get(key))
    }

    /// Short name of the element's tag, used in diagnostics.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Scalar(Scalar::Bool(_)) => "bool",
            Self::Scalar(Scalar::Integer(_)) => "integer",
            Self::Scalar(Scalar::Float(_)) => "float",
            Self::Scalar(Scalar::String(_)) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => scalar.fmt(f),
            Self::Sequence(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt(f)?;
                }
                f.write_str("]")
            }
            Self::Mapping(mapping) => {
                f.write_str("{")?;
                for (idx, (key, value)) in mapping.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Element {
    fn from(value: bool) -> Self {
        Self::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for Element {
    fn from(value: i64) -> Self {
        Self::Scalar(Scalar::Integer(value))
    }
}

impl From<i32> for Element {
    fn from(value: i32) -> Self {
        Self::Scalar(Scalar::Integer(i64::from(value)))
    }
}

impl From<f64> for Element {
    fn from(value: f64) -> Self {
        Self::Scalar(Scalar::Float(value))
    }
}

impl From<&str> for Element {
    fn from(value: &str) -> Self {
        Self::Scalar(Scalar::String(value.to_owned()))
    }
}

impl From<String> for Element {
    fn from(value: String) -> Self {
        Self::Scalar(Scalar::String(value))
    }
}

impl From<Mapping> for Element {
    fn from(value: Mapping) -> Self {
        Self::Mapping(value)
    }
}

impl From<Vec<Self>> for Element {
    fn from(value: Vec<Self>) -> Self {
        Self::Sequence(value)
    }
}

#[cfg(test)]
mod tests;
