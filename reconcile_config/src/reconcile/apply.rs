//! Merging corrected trees into live values.

use crate::{Element, Mapping, SpecKind, SpecNode, SpecTree};

impl SpecTree {
    /// Merge `tree` into the complete `live` tree.
    ///
    /// Declared sections are merged entry by entry, so entries absent from
    /// `tree` keep their live value. Leaves are replaced wholesale: a map or
    /// list leaf takes exactly the keys and items of `tree`, never a union
    /// with the live value. Undeclared entries of `tree` replace their live
    /// counterpart.
    ///
    /// # Examples
    ///
    /// ```
    /// use reconcile_config::{Element, Leaf, Mapping, Scope, SpecTree, ValueType};
    ///
    /// let spec = SpecTree::builder(Scope::Common)
    ///     .leaf(Leaf::map("limits", ValueType::Integer, Mapping::new()))
    ///     .build()?;
    /// let live = Element::mapping([("limits", Element::mapping([("a", Element::from(1))]))]);
    /// let patch = Element::mapping([("limits", Element::mapping([("b", Element::from(5))]))]);
    /// let merged = spec.merge_into(&live, &patch);
    /// assert_eq!(merged.lookup("limits.a"), None);
    /// assert_eq!(merged.lookup("limits.b"), Some(&Element::from(5)));
    /// # Ok::<(), std::sync::Arc<reconcile_config::ReconcileError>>(())
    /// ```
    #[must_use]
    pub fn merge_into(&self, live: &Element, tree: &Element) -> Element {
        merge(self.root(), live, tree)
    }

    /// Replace every advanced node with its default unless `tree` enables
    /// advanced options.
    ///
    /// Hidden advanced nodes never reach persisted files, so the live
    /// object must hold their defaults for the next load to agree with it.
    #[must_use]
    pub fn reset_hidden_advanced(&self, tree: &Element) -> Element {
        if Self::advanced_enabled(tree) {
            return tree.clone();
        }
        reset(self.root(), tree)
    }
}

fn merge(node: &SpecNode, live: &Element, tree: &Element) -> Element {
    let (SpecKind::Container(_), Element::Mapping(current), Element::Mapping(patch)) =
        (node.kind(), live, tree)
    else {
        return tree.clone();
    };
    let mut merged = current.clone();
    for (key, value) in patch {
        let replacement = match (node.child(key), current.get(key)) {
            (Some(child), Some(existing)) => merge(child, existing, value),
            _ => value.clone(),
        };
        merged.insert(key, replacement);
    }
    Element::Mapping(merged)
}

fn reset(node: &SpecNode, tree: &Element) -> Element {
    let Element::Mapping(mapping) = tree else {
        return tree.clone();
    };
    let mut reset_tree: Mapping = mapping
        .iter()
        .map(|(key, value)| {
            let replaced = match node.child(key) {
                Some(child) if child.advanced() => child.default_element(),
                Some(child) => reset(child, value),
                None => value.clone(),
            };
            (key.to_owned(), replaced)
        })
        .collect();
    for child in node.children().iter().filter(|child| child.advanced()) {
        if !reset_tree.contains_key(child.name()) {
            reset_tree.insert(child.name(), child.default_element());
        }
    }
    Element::Mapping(reset_tree)
}
