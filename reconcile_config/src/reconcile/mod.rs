//! Reconciliation passes between spec trees and untrusted element trees.
//!
//! Every pass is a pure function of a [`SpecTree`](crate::SpecTree) and an
//! input tree: inputs are borrowed and corrections build new trees. When
//! loading from disk the passes run in a fixed pipeline:
//!
//! 1. [`correct_order`](crate::SpecTree::correct_order)
//! 2. [`correct_to_valid_state`](crate::SpecTree::correct_to_valid_state)
//! 3. [`trim_to_reloadable`](crate::SpecTree::trim_to_reloadable) on reload
//! 4. [`regenerate_missing_elements`](crate::SpecTree::regenerate_missing_elements)
//!
//! Remote payloads go through
//! [`remove_unknown_elements`](crate::SpecTree::remove_unknown_elements)
//! before value correction, and
//! [`sync_element`](crate::SpecTree::sync_element) builds the outbound or
//! snapshot tree.
//!
//! Corrected trees reach the bound object through
//! [`merge_into`](crate::SpecTree::merge_into), which replaces declared
//! leaves wholesale.

mod apply;
mod correct;
mod order;
mod regenerate;
mod reload;
mod sync;

use crate::Element;

/// Outcome of value correction.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Correction {
    /// A schema-conformant tree.
    Valid(Element),
    /// The tree is unsalvageable and must be regenerated from defaults.
    Regenerate,
}

impl Correction {
    /// Returns the corrected tree, or `None` when regeneration is required.
    #[must_use]
    pub fn into_valid(self) -> Option<Element> {
        match self {
            Self::Valid(tree) => Some(tree),
            Self::Regenerate => None,
        }
    }
}
