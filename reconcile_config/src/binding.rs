//! Bound configuration objects.
//!
//! A binding is whatever holds the live configuration values. The engine
//! only ever reads a snapshot of those values as an [`Element`] and writes
//! corrected trees back onto them.

use std::sync::Arc;

use figment::{Figment, providers::Serialized};
use parking_lot::{RwLock, RwLockReadGuard};
use serde::{Serialize, de::DeserializeOwned};

use crate::{Element, ReconcileResult, ReconcileResultExt};

/// Live configuration object driven by a registration.
pub trait ConfigBinding {
    /// Snapshot of the live values.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::ReconcileError`] when the live values cannot be
    /// represented as an element tree.
    fn current_element(&self) -> ReconcileResult<Element>;

    /// Replace the live values with a complete corrected tree.
    ///
    /// Registrations merge partial trees (reload-trimmed or sync subsets)
    /// into [`ConfigBinding::current_element`] before writing, so `element`
    /// always describes every live value.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::ReconcileError`] when the tree cannot be applied;
    /// the live values are then left unchanged.
    fn write_element(&mut self, element: &Element) -> ReconcileResult<()>;
}

/// Binding over a serde value shared between the registration and its owner.
///
/// Cloning a `ValueBinding` yields another handle to the same value, so the
/// owning component keeps reading live settings while the registration
/// rewrites them.
///
/// # Examples
///
/// ```
/// use reconcile_config::{ConfigBinding, Element, ValueBinding};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Audio { volume: f64, muted: bool }
///
/// let mut binding = ValueBinding::new(Audio { volume: 0.5, muted: false });
/// let handle = binding.clone();
/// binding.write_element(&Element::mapping([
///     ("volume", Element::from(0.8)),
///     ("muted", Element::from(true)),
/// ]))?;
/// assert_eq!(handle.read().volume, 0.8);
/// assert!(handle.read().muted);
/// # Ok::<(), std::sync::Arc<reconcile_config::ReconcileError>>(())
/// ```
#[derive(Debug, Default)]
pub struct ValueBinding<T> {
    value: Arc<RwLock<T>>,
}

impl<T> Clone for ValueBinding<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
        }
    }
}

impl<T> ValueBinding<T> {
    /// Wrap `value` in a new shared binding.
    pub fn new(value: T) -> Self {
        Self {
            value: Arc::new(RwLock::new(value)),
        }
    }

    /// Borrow the live value.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.value.read()
    }
}

impl<T: Clone> ValueBinding<T> {
    /// Clone the live value out of the binding.
    #[must_use]
    pub fn snapshot(&self) -> T {
        self.value.read().clone()
    }
}

impl<T> ConfigBinding for ValueBinding<T>
where
    T: Serialize + DeserializeOwned,
{
    fn current_element(&self) -> ReconcileResult<Element> {
        Element::from_serialize(&*self.value.read())
    }

    fn write_element(&mut self, element: &Element) -> ReconcileResult<()> {
        let replacement: T = Figment::from(Serialized::defaults(element))
            .extract()
            .into_reconcile()?;
        *self.value.write() = replacement;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rstest::rstest;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::{ConfigBinding, ValueBinding};
    use crate::Element;
    use crate::test_fixtures::GameSettings;

    fn tree(value: serde_json::Value) -> Element {
        Element::from_json(value).expect("fixture is not null")
    }

    fn with_changes(binding: &ValueBinding<GameSettings>, changes: serde_json::Value) -> Element {
        let mut live = binding
            .current_element()
            .expect("snapshot")
            .to_json();
        if let (Some(target), serde_json::Value::Object(patch)) = (live.as_object_mut(), changes) {
            target.extend(patch);
        }
        tree(live)
    }

    #[test]
    fn snapshot_reflects_live_values() {
        let binding = ValueBinding::new(GameSettings::default());
        let current = binding.current_element().expect("snapshot");
        assert_eq!(current.lookup("volume"), Some(&Element::from(0.5)));
        assert_eq!(
            current.lookup("network.servers"),
            Some(&Element::from(vec![Element::from("eu")]))
        );
    }

    #[test]
    fn writes_replace_live_values() {
        let mut binding = ValueBinding::new(GameSettings::default());
        let written = with_changes(&binding, json!({"fov": 110, "difficulty": "hard"}));
        binding.write_element(&written).expect("write");
        let live = binding.snapshot();
        assert_eq!(live.fov, 110.0);
        assert_eq!(live.difficulty, "hard");
        assert_eq!(live.graphics.max_fps, 144);
    }

    #[rstest]
    #[case::wrong_type(json!({"volume": "loud"}))]
    #[case::nested_wrong_type(json!({"graphics": {"vsync": true, "max_fps": "many"}}))]
    fn rejected_writes_keep_previous_state(#[case] changes: serde_json::Value) {
        let mut binding = ValueBinding::new(GameSettings::default());
        let written = with_changes(&binding, changes);
        assert!(binding.write_element(&written).is_err());
        assert_eq!(binding.snapshot(), GameSettings::default());
    }

    #[test]
    fn incomplete_trees_are_rejected() {
        let mut binding = ValueBinding::new(GameSettings::default());
        assert!(binding.write_element(&tree(json!({"volume": 0.2}))).is_err());
        assert_eq!(binding.snapshot(), GameSettings::default());
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Quotas {
        limits: BTreeMap<String, i64>,
    }

    #[test]
    fn map_keys_absent_from_the_tree_are_dropped() {
        let mut binding = ValueBinding::new(Quotas {
            limits: BTreeMap::from([(String::from("a"), 1), (String::from("b"), 5)]),
        });
        binding
            .write_element(&tree(json!({"limits": {"a": 1}})))
            .expect("write");
        assert_eq!(
            binding.snapshot().limits,
            BTreeMap::from([(String::from("a"), 1)])
        );
    }

    #[test]
    fn clones_share_the_same_value() {
        let mut binding = ValueBinding::new(GameSettings::default());
        let handle = binding.clone();
        let written = with_changes(&binding, json!({"difficulty": "hard"}));
        binding.write_element(&written).expect("write");
        assert_eq!(handle.read().difficulty, "hard");
    }
}
