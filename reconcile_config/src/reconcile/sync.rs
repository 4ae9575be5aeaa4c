//! Remote-sync projections: stripping untrusted input and building the
//! outbound subset.

use tracing::debug;

use crate::{Element, Mapping, SpecKind, SpecNode, SpecTree};

impl SpecTree {
    /// Remove every entry with no declared node or whose node may not be
    /// synchronised.
    ///
    /// Remote input is untrusted, so removal is silent. Returns `None` when
    /// nothing survives.
    #[must_use]
    pub fn remove_unknown_elements(&self, tree: &Element) -> Option<Element> {
        strip(self.root(), tree)
    }

    /// Subset of `source` eligible for synchronisation, in canonical order.
    ///
    /// Pass the live tree to build an outbound payload or an overlay
    /// snapshot, or [`SpecTree::default_element`] for the defaults used when
    /// a remote payload is unusable. Returns `None` when no eligible node is
    /// present.
    #[must_use]
    pub fn sync_element(&self, source: &Element) -> Option<Element> {
        subset(self.root(), source)
    }
}

fn strip(node: &SpecNode, tree: &Element) -> Option<Element> {
    let Element::Mapping(mapping) = tree else {
        return None;
    };
    let kept: Mapping = mapping
        .iter()
        .filter_map(|(key, value)| {
            let Some(child) = node.child(key) else {
                debug!(key, "dropping unknown remote configuration key");
                return None;
            };
            if !child.is_sync_eligible() {
                debug!(key, scope = %child.scope(), "dropping remote key that may not be synchronised");
                return None;
            }
            let retained = match child.kind() {
                SpecKind::Leaf(_) => Some(value.clone()),
                SpecKind::Container(_) => strip(child, value),
            }?;
            Some((key.to_owned(), retained))
        })
        .collect();
    (!kept.is_empty()).then_some(Element::Mapping(kept))
}

fn subset(node: &SpecNode, tree: &Element) -> Option<Element> {
    let Element::Mapping(mapping) = tree else {
        return None;
    };
    let eligible: Mapping = node
        .children()
        .iter()
        .filter(|child| child.is_sync_eligible())
        .filter_map(|child| {
            let value = mapping.get(child.name())?;
            let retained = match child.kind() {
                SpecKind::Leaf(_) => Some(value.clone()),
                SpecKind::Container(_) => subset(child, value),
            }?;
            Some((child.name().to_owned(), retained))
        })
        .collect();
    (!eligible.is_empty()).then_some(Element::Mapping(eligible))
}
