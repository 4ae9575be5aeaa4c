//! Re-insertion of declared nodes missing from a tree.

use crate::{Element, Mapping, SpecKind, SpecNode, SpecTree};

impl SpecTree {
    /// Insert every declared node absent from `tree`, filled with its
    /// default, keeping existing values untouched.
    ///
    /// Advanced nodes are only re-added when `tree` enables advanced
    /// options. The result is in canonical order.
    #[must_use]
    pub fn regenerate_missing_elements(&self, tree: &Element) -> Element {
        let show_advanced = Self::advanced_enabled(tree);
        regenerate(self.root(), tree, show_advanced)
    }
}

fn regenerate(node: &SpecNode, tree: &Element, show_advanced: bool) -> Element {
    let (SpecKind::Container(children), Element::Mapping(mapping)) = (node.kind(), tree) else {
        return tree.clone();
    };
    let mut regenerated = Mapping::new();
    for child in children {
        match (mapping.get(child.name()), child.kind()) {
            (Some(value), SpecKind::Container(_)) => {
                regenerated.insert(child.name(), regenerate(child, value, show_advanced));
            }
            (Some(value), SpecKind::Leaf(_)) => regenerated.insert(child.name(), value.clone()),
            (None, _) if child.advanced() && !show_advanced => {}
            (None, SpecKind::Container(_)) => regenerated.insert(
                child.name(),
                regenerate(child, &Element::Mapping(Mapping::new()), show_advanced),
            ),
            (None, SpecKind::Leaf(leaf)) => {
                regenerated.insert(child.name(), leaf.default_value().clone());
            }
        }
    }
    for (key, value) in mapping {
        if node.child(key).is_none() {
            regenerated.insert(key, value.clone());
        }
    }
    Element::Mapping(regenerated)
}
