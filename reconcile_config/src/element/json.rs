//! Conversions between element trees and `serde_json` values.

use serde::Serialize;
use serde_json::{Number, Value};

use std::sync::Arc;

use super::{Element, Mapping, Scalar};
use crate::{ConfigFormat, ReconcileError, ReconcileResult};

impl Element {
    /// Convert a JSON value into an element tree.
    ///
    /// `null` has no element representation: it yields `None` at the root
    /// and is dropped wherever it appears inside a mapping or sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use reconcile_config::Element;
    /// use serde_json::json;
    ///
    /// let tree = Element::from_json(json!({"volume": 0.5, "name": null}));
    /// let mapping = tree.as_ref().and_then(Element::as_mapping);
    /// assert_eq!(mapping.map(|m| m.len()), Some(1));
    /// ```
    #[must_use]
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(flag) => Some(Self::from(flag)),
            Value::Number(number) => Some(Self::Scalar(number_to_scalar(&number))),
            Value::String(text) => Some(Self::from(text)),
            Value::Array(items) => Some(Self::Sequence(
                items.into_iter().filter_map(Self::from_json).collect(),
            )),
            Value::Object(map) => Some(Self::Mapping(
                map.into_iter()
                    .filter_map(|(key, value)| Self::from_json(value).map(|element| (key, element)))
                    .collect::<Mapping>(),
            )),
        }
    }

    /// Convert this element tree into a JSON value.
    ///
    /// Non-finite floats have no JSON representation and become `null`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Scalar(Scalar::Bool(flag)) => Value::Bool(*flag),
            Self::Scalar(Scalar::Integer(number)) => Value::from(*number),
            Self::Scalar(Scalar::Float(number)) => {
                Number::from_f64(*number).map_or(Value::Null, Value::Number)
            }
            Self::Scalar(Scalar::String(text)) => Value::String(text.clone()),
            Self::Sequence(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Mapping(mapping) => Value::Object(
                mapping
                    .iter()
                    .map(|(key, value)| (key.to_owned(), value.to_json()))
                    .collect(),
            ),
        }
    }

    /// Snapshot any serialisable value as an element tree.
    ///
    /// Fields serialised as `null` (for example `None` options) are absent
    /// from the resulting tree. A value that serialises to `null` yields an
    /// empty mapping.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::ReconcileError`] when the value cannot be
    /// serialised.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> ReconcileResult<Self> {
        let json = serde_json::to_value(value).map_err(|err| {
            Arc::new(ReconcileError::Serialize {
                format: ConfigFormat::Json,
                message: err.to_string(),
            })
        })?;
        Ok(Self::from_json(json).unwrap_or_else(|| Self::Mapping(Mapping::new())))
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "integers beyond i64 degrade to floats"
)]
fn number_to_scalar(number: &Number) -> Scalar {
    if let Some(value) = number.as_i64() {
        Scalar::Integer(value)
    } else if let Some(value) = number.as_u64() {
        Scalar::Float(value as f64)
    } else {
        Scalar::Float(number.as_f64().unwrap_or(f64::NAN))
    }
}
