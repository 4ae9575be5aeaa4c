//! Canonical ordering of mapping entries.

use crate::{Element, Mapping, SpecKind, SpecNode, SpecTree};

impl SpecTree {
    /// Reorder mapping entries to match declared child order.
    ///
    /// Known keys come first in canonical order, followed by unknown keys in
    /// the order they were found. Nothing is dropped. Sequences and map-typed
    /// leaves keep their order.
    ///
    /// ```
    /// use reconcile_config::{Element, Leaf, Scope, SpecTree};
    ///
    /// let spec = SpecTree::builder(Scope::Client)
    ///     .leaf(Leaf::integer("a", 1))
    ///     .leaf(Leaf::integer("b", 2))
    ///     .build()?;
    /// let tree = Element::mapping([("x", Element::from(0)), ("b", Element::from(2)), ("a", Element::from(1))]);
    /// let ordered = spec.correct_order(&tree);
    /// let keys: Vec<_> = ordered.as_mapping().map(|m| m.keys().collect()).unwrap_or_default();
    /// assert_eq!(keys, ["a", "b", "x"]);
    /// # Ok::<(), std::sync::Arc<reconcile_config::ReconcileError>>(())
    /// ```
    #[must_use]
    pub fn correct_order(&self, tree: &Element) -> Element {
        reorder(self.root(), tree, true)
    }

    /// Reorder like [`SpecTree::correct_order`] and drop keys with no
    /// declared node.
    ///
    /// Used to snapshot a bound object's live values, whose serialised form
    /// may contain fields the schema does not describe.
    #[must_use]
    pub fn canonicalize(&self, tree: &Element) -> Element {
        reorder(self.root(), tree, false)
    }
}

fn reorder(node: &SpecNode, tree: &Element, keep_unknown: bool) -> Element {
    let (SpecKind::Container(children), Element::Mapping(mapping)) = (node.kind(), tree) else {
        return tree.clone();
    };
    let mut ordered = Mapping::new();
    for child in children {
        if let Some(value) = mapping.get(child.name()) {
            ordered.insert(child.name(), reorder(child, value, keep_unknown));
        }
    }
    if keep_unknown {
        for (key, value) in mapping {
            if node.child(key).is_none() {
                ordered.insert(key, value.clone());
            }
        }
    }
    Element::Mapping(ordered)
}
