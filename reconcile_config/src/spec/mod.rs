//! Canonical schema trees.
//!
//! A [`SpecTree`] is derived once from a configuration object's declared
//! structure and never changes afterwards. Every node carries its resolved
//! scope, synchronisation and reload flags, so reconciliation passes never
//! need to consult a parent to interpret a child.

mod builder;
mod describe;
mod value_type;

use std::fmt;

use crate::{Element, Mapping};

pub use builder::{Leaf, Section, SpecTreeBuilder};
pub use value_type::{Validator, ValueType};

/// Key of the implicit toggle every root carries to reveal advanced options
/// in persisted files.
pub const ADVANCED_TOGGLE_KEY: &str = "enable_advanced_config";

/// Visibility class of a configuration node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Applies only to the local instance; never synchronised.
    Client,
    /// Persisted locally and eligible for remote synchronisation.
    Common,
    /// Authoritative-only.
    Server,
}

impl Scope {
    /// Lower-case name used in file names and diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Common => "common",
            Self::Server => "server",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type, default and validator of a leaf node.
#[derive(Debug, Clone)]
pub struct LeafSpec {
    value_type: ValueType,
    default: Element,
    validator: Option<Validator>,
}

impl LeafSpec {
    /// Declared value type.
    #[must_use]
    pub const fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    /// Declared default value.
    #[must_use]
    pub const fn default_value(&self) -> &Element {
        &self.default
    }

    /// Optional extra constraint.
    #[must_use]
    pub const fn validator(&self) -> Option<&Validator> {
        self.validator.as_ref()
    }

    /// Check `element` against the type and validator.
    ///
    /// # Errors
    ///
    /// Returns a diagnostic describing the first failed check.
    pub fn validate(&self, element: &Element) -> Result<(), String> {
        if !self.value_type.accepts(element) {
            return Err(format!(
                "expected {}, found {}",
                self.value_type,
                element.tag()
            ));
        }
        self.validator
            .as_ref()
            .map_or(Ok(()), |validator| validator.check(element))
    }
}

/// Leaf or container payload of a [`SpecNode`].
#[derive(Debug, Clone)]
pub enum SpecKind {
    /// A value with a type and a default.
    Leaf(LeafSpec),
    /// Named children in canonical order.
    Container(Vec<SpecNode>),
}

/// One logical configuration entry with resolved options.
#[derive(Debug, Clone)]
pub struct SpecNode {
    name: String,
    comment: Option<String>,
    scope: Scope,
    synchronized: bool,
    reloadable: bool,
    advanced: bool,
    kind: SpecKind,
}

impl SpecNode {
    /// Key of the node within its parent; empty for the root.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable documentation.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Resolved scope.
    #[must_use]
    pub const fn scope(&self) -> Scope {
        self.scope
    }

    /// Whether the node participates in remote synchronisation.
    #[must_use]
    pub const fn synchronized(&self) -> bool {
        self.synchronized
    }

    /// Whether a live change may be applied without a restart.
    #[must_use]
    pub const fn reloadable(&self) -> bool {
        self.reloadable
    }

    /// Whether the node is hidden from files unless advanced options are on.
    #[must_use]
    pub const fn advanced(&self) -> bool {
        self.advanced
    }

    /// Leaf or container payload.
    #[must_use]
    pub const fn kind(&self) -> &SpecKind {
        &self.kind
    }

    /// Leaf payload, if this node is a leaf.
    #[must_use]
    pub const fn leaf(&self) -> Option<&LeafSpec> {
        match &self.kind {
            SpecKind::Leaf(leaf) => Some(leaf),
            SpecKind::Container(_) => None,
        }
    }

    /// Children in canonical order; empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match &self.kind {
            SpecKind::Leaf(_) => &[],
            SpecKind::Container(children) => children,
        }
    }

    /// Child declared under `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children().iter().find(|child| child.name == name)
    }

    /// Whether this node may travel over the remote-sync channel.
    #[must_use]
    pub fn is_sync_eligible(&self) -> bool {
        self.scope == Scope::Common && self.synchronized
    }

    /// Element populated entirely from declared defaults.
    #[must_use]
    pub fn default_element(&self) -> Element {
        match &self.kind {
            SpecKind::Leaf(leaf) => leaf.default.clone(),
            SpecKind::Container(children) => Element::Mapping(
                children
                    .iter()
                    .map(|child| (child.name.clone(), child.default_element()))
                    .collect::<Mapping>(),
            ),
        }
    }
}

/// Immutable schema for one bound configuration object.
#[derive(Debug, Clone)]
pub struct SpecTree {
    root: SpecNode,
}

impl SpecTree {
    /// Start declaring a tree whose nodes default to `scope`.
    ///
    /// # Examples
    ///
    /// ```
    /// use reconcile_config::{Leaf, Scope, Section, SpecTree};
    ///
    /// let spec = SpecTree::builder(Scope::Common)
    ///     .comment("Audio and video settings")
    ///     .leaf(Leaf::float("volume", 0.5).range(0.0, 1.0).reloadable(true))
    ///     .section(Section::new("video").leaf(Leaf::integer("fov", 90)))
    ///     .build()?;
    /// assert!(!spec.is_empty());
    /// # Ok::<(), std::sync::Arc<reconcile_config::ReconcileError>>(())
    /// ```
    #[must_use]
    pub fn builder(scope: Scope) -> SpecTreeBuilder {
        SpecTreeBuilder::new(scope)
    }

    /// Root container node.
    #[must_use]
    pub const fn root(&self) -> &SpecNode {
        &self.root
    }

    /// Node at a dotted path, e.g. `video.fov`.
    #[must_use]
    pub fn node(&self, path: &str) -> Option<&SpecNode> {
        path.split('.')
            .try_fold(&self.root, |node, key| node.child(key))
    }

    /// Returns `true` when the implicit advanced toggle is the only option.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.children().len() == 1
    }

    /// Element tree populated entirely from declared defaults, in canonical
    /// order.
    #[must_use]
    pub fn default_element(&self) -> Element {
        self.root.default_element()
    }

    /// Whether `tree` switches advanced options on.
    #[must_use]
    pub fn advanced_enabled(tree: &Element) -> bool {
        tree.as_mapping()
            .and_then(|mapping| mapping.get(ADVANCED_TOGGLE_KEY))
            .and_then(Element::as_bool)
            .unwrap_or(false)
    }

    /// Restrict `tree` to what belongs in a persisted file.
    ///
    /// Advanced nodes are dropped unless the tree enables them.
    #[must_use]
    pub fn visible_element(&self, tree: &Element) -> Element {
        if Self::advanced_enabled(tree) {
            return tree.clone();
        }
        strip_advanced(&self.root, tree)
    }
}

fn strip_advanced(node: &SpecNode, tree: &Element) -> Element {
    let (SpecKind::Container(_), Element::Mapping(mapping)) = (&node.kind, tree) else {
        return tree.clone();
    };
    Element::Mapping(
        mapping
            .iter()
            .filter_map(|(key, value)| match node.child(key) {
                Some(child) if child.advanced => None,
                Some(child) => Some((key.to_owned(), strip_advanced(child, value))),
                None => Some((key.to_owned(), value.clone())),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests;
