//! Declarative builders for spec trees.
//!
//! Configuration objects enumerate their nodes through [`Leaf`] and
//! [`Section`] values and hand them to a [`SpecTreeBuilder`]. Options left
//! unset inherit from the enclosing section; [`SpecTreeBuilder::build`]
//! resolves inheritance and rejects inconsistent declarations.

use std::collections::HashSet;
use std::sync::Arc;

use super::{ADVANCED_TOGGLE_KEY, LeafSpec, Scope, SpecKind, SpecNode, SpecTree, Validator, ValueType};
use crate::{Element, Mapping, ReconcileError, ReconcileResult};

#[derive(Debug, Clone, Default)]
struct NodeOptions {
    comment: Option<String>,
    scope: Option<Scope>,
    synchronized: Option<bool>,
    reloadable: Option<bool>,
    advanced: bool,
}

/// Options inherited by children while resolving.
#[derive(Debug, Clone, Copy)]
struct Inherited {
    scope: Scope,
    synchronized: bool,
    reloadable: bool,
}

macro_rules! option_setters {
    () => {
        /// Documentation emitted into generated files.
        #[must_use]
        pub fn comment(mut self, comment: impl Into<String>) -> Self {
            self.options.comment = Some(comment.into());
            self
        }

        /// Override the inherited scope.
        #[must_use]
        pub fn scope(mut self, scope: Scope) -> Self {
            self.options.scope = Some(scope);
            self
        }

        /// Override whether the node takes part in remote synchronisation.
        #[must_use]
        pub fn synchronized(mut self, synchronized: bool) -> Self {
            self.options.synchronized = Some(synchronized);
            self
        }

        /// Override whether live changes apply without a restart.
        #[must_use]
        pub fn reloadable(mut self, reloadable: bool) -> Self {
            self.options.reloadable = Some(reloadable);
            self
        }

        /// Hide the node from files unless advanced options are enabled.
        #[must_use]
        pub fn advanced(mut self) -> Self {
            self.options.advanced = true;
            self
        }
    };
}

/// Declaration of a leaf node.
#[derive(Debug, Clone)]
pub struct Leaf {
    name: String,
    value_type: ValueType,
    default: Element,
    validator: Option<Validator>,
    options: NodeOptions,
}

impl Leaf {
    /// Declare a leaf of arbitrary type.
    #[must_use]
    pub fn new(name: impl Into<String>, value_type: ValueType, default: impl Into<Element>) -> Self {
        Self {
            name: name.into(),
            value_type,
            default: default.into(),
            validator: None,
            options: NodeOptions::default(),
        }
    }

    /// Declare a boolean leaf.
    #[must_use]
    pub fn boolean(name: impl Into<String>, default: bool) -> Self {
        Self::new(name, ValueType::Bool, default)
    }

    /// Declare an integer leaf.
    #[must_use]
    pub fn integer(name: impl Into<String>, default: i64) -> Self {
        Self::new(name, ValueType::Integer, default)
    }

    /// Declare a floating point leaf.
    #[must_use]
    pub fn float(name: impl Into<String>, default: f64) -> Self {
        Self::new(name, ValueType::Float, default)
    }

    /// Declare a string leaf.
    #[must_use]
    pub fn string(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(name, ValueType::String, default.into())
    }

    /// Declare a leaf restricted to `variants`.
    #[must_use]
    pub fn enumeration<I, S>(name: impl Into<String>, variants: I, default: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, ValueType::enumeration(variants), default.into())
    }

    /// Declare a list leaf whose items have type `item`.
    #[must_use]
    pub fn list(name: impl Into<String>, item: ValueType, default: Vec<Element>) -> Self {
        Self::new(name, ValueType::List(Box::new(item)), default)
    }

    /// Declare a dynamic map leaf whose values have type `value`.
    #[must_use]
    pub fn map(name: impl Into<String>, value: ValueType, default: Mapping) -> Self {
        Self::new(name, ValueType::Map(Box::new(value)), default)
    }

    /// Attach an extra constraint.
    #[must_use]
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Bound numeric values to `[min, max]`.
    #[must_use]
    pub fn range(self, min: f64, max: f64) -> Self {
        self.validator(Validator::range(min, max))
    }

    /// Attach a caller-supplied check.
    #[must_use]
    pub fn check<F>(self, check: F) -> Self
    where
        F: Fn(&Element) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validator(Validator::Custom(Arc::new(check)))
    }

    option_setters!();
}

#[derive(Debug, Clone)]
enum Declared {
    Leaf(Leaf),
    Section(Section),
}

impl Declared {
    fn name(&self) -> &str {
        match self {
            Self::Leaf(leaf) => &leaf.name,
            Self::Section(section) => &section.name,
        }
    }
}

/// Declaration of a container node.
#[derive(Debug, Clone)]
pub struct Section {
    name: String,
    children: Vec<Declared>,
    options: NodeOptions,
}

impl Section {
    /// Start declaring a section named `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            options: NodeOptions::default(),
        }
    }

    /// Append a leaf; declaration order becomes canonical order.
    #[must_use]
    pub fn leaf(mut self, leaf: Leaf) -> Self {
        self.children.push(Declared::Leaf(leaf));
        self
    }

    /// Append a nested section.
    #[must_use]
    pub fn section(mut self, section: Self) -> Self {
        self.children.push(Declared::Section(section));
        self
    }

    option_setters!();
}

/// Builder for [`SpecTree`].
#[derive(Debug, Clone)]
pub struct SpecTreeBuilder {
    scope: Scope,
    reloadable: bool,
    comment: Option<String>,
    children: Vec<Declared>,
}

impl SpecTreeBuilder {
    /// Creates a builder whose nodes default to `scope`.
    #[must_use]
    pub const fn new(scope: Scope) -> Self {
        Self {
            scope,
            reloadable: false,
            comment: None,
            children: Vec::new(),
        }
    }

    /// Root comment, emitted at the top of generated files.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Root-level reloadable default inherited by every node.
    #[must_use]
    pub fn reloadable(mut self, reloadable: bool) -> Self {
        self.reloadable = reloadable;
        self
    }

    /// Append a top-level leaf.
    #[must_use]
    pub fn leaf(mut self, leaf: Leaf) -> Self {
        self.children.push(Declared::Leaf(leaf));
        self
    }

    /// Append a top-level section.
    #[must_use]
    pub fn section(mut self, section: Section) -> Self {
        self.children.push(Declared::Section(section));
        self
    }

    /// Resolve inheritance and validate the declaration.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::InvalidSpec`] when a name is empty, contains
    /// a `.`, repeats among its siblings, or shadows the advanced toggle, or
    /// when a default fails its own type or validator.
    pub fn build(self) -> ReconcileResult<SpecTree> {
        let inherited = Inherited {
            scope: self.scope,
            synchronized: true,
            reloadable: self.reloadable,
        };
        if let Some(clash) = self
            .children
            .iter()
            .find(|child| child.name() == ADVANCED_TOGGLE_KEY)
        {
            return Err(invalid(clash.name(), "name is reserved for the advanced options toggle"));
        }
        let toggle = SpecNode {
            name: ADVANCED_TOGGLE_KEY.to_owned(),
            comment: Some(String::from("Show advanced options in this file")),
            scope: self.scope,
            synchronized: false,
            reloadable: true,
            advanced: false,
            kind: SpecKind::Leaf(LeafSpec {
                value_type: ValueType::Bool,
                default: Element::from(false),
                validator: None,
            }),
        };
        let mut children = vec![toggle];
        children.extend(resolve_children(self.children, inherited, "")?);
        Ok(SpecTree {
            root: SpecNode {
                name: String::new(),
                comment: self.comment,
                scope: self.scope,
                synchronized: true,
                reloadable: self.reloadable,
                advanced: false,
                kind: SpecKind::Container(children),
            },
        })
    }
}

fn invalid(path: &str, message: &str) -> Arc<ReconcileError> {
    Arc::new(ReconcileError::invalid_spec(path, message))
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_owned()
    } else {
        format!("{parent}.{name}")
    }
}

fn resolve_children(
    declared: Vec<Declared>,
    inherited: Inherited,
    parent_path: &str,
) -> ReconcileResult<Vec<SpecNode>> {
    let mut seen = HashSet::new();
    let mut nodes = Vec::with_capacity(declared.len());
    for child in declared {
        let path = join_path(parent_path, child.name());
        if child.name().is_empty() {
            return Err(invalid(&path, "node names must not be empty"));
        }
        if child.name().contains('.') {
            return Err(invalid(&path, "node names must not contain '.'"));
        }
        if !seen.insert(child.name().to_owned()) {
            return Err(invalid(&path, "duplicate sibling name"));
        }
        nodes.push(match child {
            Declared::Leaf(leaf) => resolve_leaf(leaf, inherited, &path)?,
            Declared::Section(section) => resolve_section(section, inherited, &path)?,
        });
    }
    Ok(nodes)
}

fn resolve_options(options: &NodeOptions, inherited: Inherited) -> Inherited {
    Inherited {
        scope: options.scope.unwrap_or(inherited.scope),
        synchronized: options.synchronized.unwrap_or(inherited.synchronized),
        reloadable: options.reloadable.unwrap_or(inherited.reloadable),
    }
}

fn resolve_leaf(leaf: Leaf, inherited: Inherited, path: &str) -> ReconcileResult<SpecNode> {
    if let Some(Validator::Range { min, max }) = &leaf.validator
        && (min > max || min.is_nan() || max.is_nan())
    {
        return Err(invalid(path, "range minimum exceeds maximum"));
    }
    let spec = LeafSpec {
        value_type: leaf.value_type,
        default: leaf.default,
        validator: leaf.validator,
    };
    spec.validate(&spec.default)
        .map_err(|reason| invalid(path, &format!("default value is invalid: {reason}")))?;
    let resolved = resolve_options(&leaf.options, inherited);
    Ok(SpecNode {
        name: leaf.name,
        comment: leaf.options.comment,
        scope: resolved.scope,
        synchronized: resolved.synchronized,
        reloadable: resolved.reloadable,
        advanced: leaf.options.advanced,
        kind: SpecKind::Leaf(spec),
    })
}

fn resolve_section(section: Section, inherited: Inherited, path: &str) -> ReconcileResult<SpecNode> {
    let resolved = resolve_options(&section.options, inherited);
    let children = resolve_children(section.children, resolved, path)?;
    Ok(SpecNode {
        name: section.name,
        comment: section.options.comment,
        scope: resolved.scope,
        synchronized: resolved.synchronized,
        reloadable: resolved.reloadable,
        advanced: section.options.advanced,
        kind: SpecKind::Container(children),
    })
}
