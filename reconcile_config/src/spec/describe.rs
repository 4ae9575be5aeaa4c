//! Human-readable documentation for generated configuration files.

use super::{SpecKind, SpecNode, SpecTree};

impl SpecTree {
    /// Header lines documenting the tree, emitted as comments into
    /// generated files.
    ///
    /// Each leaf contributes a summary line with its dotted path, type,
    /// default and constraints, followed by its comment. Advanced nodes are
    /// listed only when `show_advanced` is set.
    #[must_use]
    pub fn describe(&self, show_advanced: bool) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(comment) = self.root.comment() {
            lines.extend(comment.lines().map(str::to_owned));
            lines.push(String::new());
        }
        for child in self.root.children() {
            describe_node(child, "", show_advanced, &mut lines);
        }
        lines
    }
}

fn describe_node(node: &SpecNode, parent: &str, show_advanced: bool, lines: &mut Vec<String>) {
    if node.advanced() && !show_advanced {
        return;
    }
    let path = if parent.is_empty() {
        node.name().to_owned()
    } else {
        format!("{parent}.{}", node.name())
    };
    match node.kind() {
        SpecKind::Container(children) => {
            if let Some(comment) = node.comment() {
                lines.push(format!("[{path}] {comment}"));
            }
            for child in children {
                describe_node(child, &path, show_advanced, lines);
            }
        }
        SpecKind::Leaf(leaf) => {
            let mut facts = vec![
                leaf.value_type().to_string(),
                format!("default: {}", leaf.default_value()),
            ];
            facts.extend(leaf.validator().and_then(super::Validator::describe));
            if !node.reloadable() {
                facts.push(String::from("requires restart"));
            }
            lines.push(format!("{path} ({})", facts.join(", ")));
            if let Some(comment) = node.comment() {
                lines.extend(comment.lines().map(|line| format!("    {line}")));
            }
        }
    }
}
