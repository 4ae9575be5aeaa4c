//! Value and type correction against declared leaves.

use tracing::{debug, warn};

use super::Correction;
use crate::{Element, Mapping, SpecKind, SpecNode, SpecTree};

impl SpecTree {
    /// Replace invalid values with their declared defaults.
    ///
    /// Each present leaf is kept when it satisfies its type and validator
    /// and replaced by its default otherwise. A section holding a non-mapping
    /// value is replaced by its default subtree. Keys with no declared node
    /// are dropped. Absent nodes stay absent; missing-element regeneration
    /// fills them in.
    ///
    /// A root that is not a mapping cannot be repaired and yields
    /// [`Correction::Regenerate`].
    pub fn correct_to_valid_state(&self, tree: &Element) -> Correction {
        let Element::Mapping(mapping) = tree else {
            warn!(found = tree.tag(), "configuration root is not a mapping");
            return Correction::Regenerate;
        };
        Correction::Valid(Element::Mapping(correct_container(self.root(), mapping, "")))
    }
}

fn correct_container(node: &SpecNode, mapping: &Mapping, path: &str) -> Mapping {
    for key in mapping.keys().filter(|key| node.child(key).is_none()) {
        debug!(path, key, "dropping undeclared configuration key");
    }
    node.children()
        .iter()
        .filter_map(|child| {
            let value = mapping.get(child.name())?;
            let child_path = if path.is_empty() {
                child.name().to_owned()
            } else {
                format!("{path}.{}", child.name())
            };
            Some((child.name().to_owned(), correct_node(child, value, &child_path)))
        })
        .collect()
}

fn correct_node(node: &SpecNode, value: &Element, path: &str) -> Element {
    match (node.kind(), value) {
        (SpecKind::Leaf(leaf), _) => match leaf.validate(value) {
            Ok(()) => value.clone(),
            Err(reason) => {
                debug!(path, %reason, "substituting default for invalid value");
                leaf.default_value().clone()
            }
        },
        (SpecKind::Container(_), Element::Mapping(mapping)) => {
            Element::Mapping(correct_container(node, mapping, path))
        }
        (SpecKind::Container(_), _) => {
            debug!(path, found = value.tag(), "substituting default section");
            node.default_element()
        }
    }
}
