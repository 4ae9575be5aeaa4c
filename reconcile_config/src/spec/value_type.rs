//! Leaf value types and validators.

use std::fmt;
use std::sync::Arc;

use crate::{Element, Scalar};

/// Declared type of a leaf node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    /// `true` or `false`.
    Bool,
    /// Signed integer.
    Integer,
    /// Floating point number; integers are accepted too.
    Float,
    /// Free-form string.
    String,
    /// String restricted to the listed variants.
    Enum(Vec<String>),
    /// Ordered list whose items share one type.
    List(Box<ValueType>),
    /// Mapping with arbitrary string keys whose values share one type.
    Map(Box<ValueType>),
}

impl ValueType {
    /// Convenience constructor for [`ValueType::Enum`].
    pub fn enumeration<I, S>(variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum(variants.into_iter().map(Into::into).collect())
    }

    /// Returns `true` when `element` has the shape this type requires.
    #[must_use]
    pub fn accepts(&self, element: &Element) -> bool {
        match (self, element) {
            (Self::Bool, Element::Scalar(Scalar::Bool(_)))
            | (Self::Integer, Element::Scalar(Scalar::Integer(_)))
            | (Self::Float, Element::Scalar(Scalar::Integer(_) | Scalar::Float(_)))
            | (Self::String, Element::Scalar(Scalar::String(_))) => true,
            (Self::Enum(variants), Element::Scalar(Scalar::String(value))) => {
                variants.iter().any(|variant| variant == value)
            }
            (Self::List(item), Element::Sequence(items)) => {
                items.iter().all(|value| item.accepts(value))
            }
            (Self::Map(value_type), Element::Mapping(mapping)) => {
                mapping.iter().all(|(_, value)| value_type.accepts(value))
            }
            _ => false,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Integer => f.write_str("integer"),
            Self::Float => f.write_str("float"),
            Self::String => f.write_str("string"),
            Self::Enum(variants) => write!(f, "one of [{}]", variants.join(", ")),
            Self::List(item) => write!(f, "list of {item}"),
            Self::Map(value) => write!(f, "map of {value}"),
        }
    }
}

type CustomCheck = dyn Fn(&Element) -> Result<(), String> + Send + Sync;

/// Additional constraint applied to a leaf after its type check.
///
/// Range and membership checks apply to each item of a list and each value
/// of a map, so a `List(Float)` leaf can be bounded the same way as a
/// scalar.
#[derive(Clone)]
pub enum Validator {
    /// Inclusive numeric bounds.
    Range {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// Value must equal one of the listed elements.
    OneOf(Vec<Element>),
    /// Caller-supplied check returning a diagnostic on failure.
    Custom(Arc<CustomCheck>),
}

impl Validator {
    /// Inclusive numeric range.
    #[must_use]
    pub const fn range(min: f64, max: f64) -> Self {
        Self::Range { min, max }
    }

    /// Restrict values to the listed elements.
    pub fn one_of<I, E>(values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Element>,
    {
        Self::OneOf(values.into_iter().map(Into::into).collect())
    }

    /// Wrap an arbitrary check.
    ///
    /// # Examples
    ///
    /// ```
    /// use reconcile_config::{Element, Validator};
    ///
    /// let even = Validator::custom(|value| match value {
    ///     Element::Scalar(reconcile_config::Scalar::Integer(n)) if n % 2 == 0 => Ok(()),
    ///     _ => Err(String::from("must be even")),
    /// });
    /// assert!(even.check(&Element::from(4)).is_ok());
    /// assert!(even.check(&Element::from(3)).is_err());
    /// ```
    pub fn custom<F>(check: F) -> Self
    where
        F: Fn(&Element) -> Result<(), String> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(check))
    }

    /// Check `element` against the constraint.
    ///
    /// # Errors
    ///
    /// Returns a human-readable diagnostic when the constraint is violated.
    pub fn check(&self, element: &Element) -> Result<(), String> {
        match self {
            Self::Custom(check) => check(element),
            Self::Range { .. } | Self::OneOf(_) => match element {
                Element::Sequence(items) => items.iter().try_for_each(|item| self.check_scalar(item)),
                Element::Mapping(mapping) => mapping
                    .iter()
                    .try_for_each(|(_, value)| self.check_scalar(value)),
                Element::Scalar(_) => self.check_scalar(element),
            },
        }
    }

    fn check_scalar(&self, element: &Element) -> Result<(), String> {
        match self {
            Self::Range { min, max } => {
                let value = element
                    .as_scalar()
                    .and_then(Scalar::as_f64)
                    .ok_or_else(|| format!("expected a number, found {}", element.tag()))?;
                if value >= *min && value <= *max {
                    Ok(())
                } else {
                    Err(format!("{value} is outside [{min}, {max}]"))
                }
            }
            Self::OneOf(allowed) => {
                if allowed.contains(element) {
                    Ok(())
                } else {
                    Err(format!("{element} is not an allowed value"))
                }
            }
            Self::Custom(check) => check(element),
        }
    }

    /// Returns a short description used in generated file headers.
    #[must_use]
    pub fn describe(&self) -> Option<String> {
        match self {
            Self::Range { min, max } => Some(format!("range: {min} to {max}")),
            Self::OneOf(allowed) => Some(format!(
                "allowed: {}",
                allowed
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
            Self::Custom(_) => None,
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range { min, max } => f
                .debug_struct("Range")
                .field("min", min)
                .field("max", max)
                .finish(),
            Self::OneOf(allowed) => f.debug_tuple("OneOf").field(allowed).finish(),
            Self::Custom(_) => f.write_str("Custom(<fn>)"),
        }
    }
}
