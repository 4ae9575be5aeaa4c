//! Extraction of the reload-safe subset of a tree.

use crate::{Element, Mapping, SpecKind, SpecNode, SpecTree};

impl SpecTree {
    /// Keep only leaves marked reloadable, dropping sections left empty.
    ///
    /// Returns `None` when nothing reloadable is present. Applying the result
    /// to a live object can never touch a non-reloadable leaf.
    #[must_use]
    pub fn trim_to_reloadable(&self, tree: &Element) -> Option<Element> {
        trim(self.root(), tree)
    }
}

fn trim(node: &SpecNode, tree: &Element) -> Option<Element> {
    let Element::Mapping(mapping) = tree else {
        return None;
    };
    let trimmed: Mapping = node
        .children()
        .iter()
        .filter_map(|child| {
            let value = mapping.get(child.name())?;
            let kept = match child.kind() {
                SpecKind::Leaf(_) => child.reloadable().then(|| value.clone()),
                SpecKind::Container(_) => trim(child, value),
            }?;
            Some((child.name().to_owned(), kept))
        })
        .collect();
    (!trimmed.is_empty()).then_some(Element::Mapping(trimmed))
}
