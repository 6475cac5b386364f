//! # Parse Tree Nodes
//!
//! Every successful match produces a [`Node`]. One variant exists per
//! primitive that can produce output, and each variant carries exactly the
//! fields that are meaningful for it:
//!
//! | Variant | Produced by | Carries |
//! |---------|-------------|---------|
//! | [`Node::Terminal`] | `literal`, `unit`, `unit_range` | the matched text |
//! | [`Node::Sequence`] | `sequence` | one child per sub-parser |
//! | [`Node::Repetition`] | `repeat`, `optional` | one child per accepted repetition |
//! | [`Node::Tagged`] | `tag` | the rule name and the wrapped node |
//!
//! Ordered choice never appears in the tree: it returns the winning
//! alternative's node verbatim.
//!
//! Terminal text borrows from the input, so a tree lives no longer than the
//! string it was parsed from.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// Which terminal matcher produced a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalKind {
    /// Exact string match (`literal`)
    Literal,
    /// Single unit equality (`unit`)
    Unit,
    /// Single unit within an inclusive range (`unit_range`)
    UnitRange,
}

impl fmt::Display for TerminalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TerminalKind::Literal => "literal",
            TerminalKind::Unit => "unit",
            TerminalKind::UnitRange => "range",
        };
        f.write_str(name)
    }
}

/// The primitive a node came from, ignoring any tags around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Terminal(TerminalKind),
    Sequence,
    Repetition,
}

/// A node of the parse tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Node<'i> {
    /// A leaf holding the exact slice of input it consumed.
    Terminal { kind: TerminalKind, text: &'i str },
    /// Children in the order the sub-parsers were supplied.
    Sequence(Vec<Node<'i>>),
    /// Children in the order they were matched. May be empty.
    Repetition(Vec<Node<'i>>),
    /// A named grammar production wrapping the node its body produced.
    Tagged { name: Arc<str>, node: Box<Node<'i>> },
}

impl<'i> Node<'i> {
    /// The producing primitive, looking through tags.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Terminal { kind, .. } => NodeKind::Terminal(*kind),
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Repetition(_) => NodeKind::Repetition,
            Node::Tagged { node, .. } => node.kind(),
        }
    }

    /// The outermost tag, if this node was produced by a named rule.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Tagged { name, .. } => Some(&**name),
            _ => None,
        }
    }

    /// The node with all tag wrappers removed.
    pub fn untagged(&self) -> &Node<'i> {
        let mut node = self;
        while let Node::Tagged { node: inner, .. } = node {
            node = &**inner;
        }
        node
    }

    /// Leaf text, looking through tags. `None` for composite nodes.
    pub fn text(&self) -> Option<&'i str> {
        match self.untagged() {
            Node::Terminal { text, .. } => Some(*text),
            _ => None,
        }
    }

    /// Ordered children of a composite node, looking through tags.
    pub fn children(&self) -> &[Node<'i>] {
        match self.untagged() {
            Node::Sequence(children) | Node::Repetition(children) => children,
            _ => &[],
        }
    }

    /// All leaf text concatenated in order, i.e. the input this node consumed.
    pub fn matched_text(&self) -> String {
        self.descendants().filter_map(Node::text_if_leaf).collect()
    }

    /// Pre-order traversal starting with `self`.
    ///
    /// Unlike [`children`](Self::children), this walks the literal structure:
    /// a tag wrapper yields its inner node as its only child, so nested tags
    /// are all visited.
    pub fn descendants(&self) -> Descendants<'_, 'i> {
        Descendants { stack: vec![self] }
    }

    /// Every node in this subtree carrying the tag `name`, in pre-order.
    pub fn find_tagged<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node<'i>> + 'a {
        self.descendants().filter(move |node| node.tag() == Some(name))
    }

    fn text_if_leaf(&self) -> Option<&'i str> {
        match self {
            Node::Terminal { text, .. } => Some(*text),
            _ => None,
        }
    }

    fn direct_children(&self) -> &[Node<'i>] {
        match self {
            Node::Terminal { .. } => &[],
            Node::Sequence(children) | Node::Repetition(children) => children,
            Node::Tagged { node, .. } => std::slice::from_ref(&**node),
        }
    }

    fn render(&self, depth: usize, lines: &mut Vec<String>) {
        let mut line = "  ".repeat(depth);
        let mut node = self;
        while let Node::Tagged { name, node: inner } = node {
            line.push_str(&format!("[{name}] "));
            node = &**inner;
        }
        match node {
            Node::Terminal { kind, text } => {
                line.push_str(&format!("{kind} {text:?}"));
                lines.push(line);
            }
            Node::Sequence(children) | Node::Repetition(children) => {
                line.push_str(if matches!(node, Node::Sequence(_)) {
                    "sequence"
                } else {
                    "repetition"
                });
                lines.push(line);
                for child in children {
                    child.render(depth + 1, lines);
                }
            }
            Node::Tagged { .. } => unreachable!("tags are consumed above"),
        }
    }
}

/// Renders the tree one node per line, indented two spaces per level.
///
/// ```text
/// [pair] sequence
///   [key] literal "a"
///   literal "="
/// ```
impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();
        self.render(0, &mut lines);
        f.write_str(&lines.join("\n"))
    }
}

/// Iterator returned by [`Node::descendants`].
#[derive(Debug)]
pub struct Descendants<'a, 'i> {
    stack: Vec<&'a Node<'i>>,
}

impl<'a, 'i> Iterator for Descendants<'a, 'i> {
    type Item = &'a Node<'i>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.direct_children().iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn leaf(text: &str) -> Node<'_> {
        Node::Terminal {
            kind: TerminalKind::Literal,
            text,
        }
    }

    fn tagged<'i>(name: &str, node: Node<'i>) -> Node<'i> {
        Node::Tagged {
            name: name.into(),
            node: Box::new(node),
        }
    }

    #[test]
    fn kind_looks_through_tags() {
        let node = tagged("outer", tagged("inner", Node::Sequence(vec![])));
        assert_eq!(node.kind(), NodeKind::Sequence);
        assert_eq!(node.tag(), Some("outer"));
    }

    #[test]
    fn untagged_nodes_have_no_tag() {
        assert_eq!(leaf("a").tag(), None);
        assert_eq!(
            leaf("a").kind(),
            NodeKind::Terminal(TerminalKind::Literal)
        );
    }

    #[test]
    fn text_only_for_leaves() {
        assert_eq!(tagged("t", leaf("abc")).text(), Some("abc"));
        assert_eq!(Node::Sequence(vec![leaf("abc")]).text(), None);
    }

    #[test]
    fn children_look_through_tags() {
        let node = tagged("t", Node::Repetition(vec![leaf("a"), leaf("b")]));
        assert_eq!(node.children(), &[leaf("a"), leaf("b")]);
        assert!(leaf("a").children().is_empty());
    }

    #[test]
    fn matched_text_concatenates_leaves_in_order() {
        let node = Node::Sequence(vec![
            tagged("x", leaf("ab")),
            Node::Repetition(vec![leaf("c"), leaf("d")]),
            Node::Repetition(vec![]),
            leaf("e"),
        ]);
        assert_eq!(node.matched_text(), "abcde");
    }

    #[test]
    fn descendants_are_pre_order() {
        let node = Node::Sequence(vec![tagged("x", leaf("a")), leaf("b")]);
        let order: Vec<String> = node
            .descendants()
            .map(|n| match n {
                Node::Terminal { text, .. } => text.to_string(),
                Node::Tagged { name, .. } => format!("[{name}]"),
                Node::Sequence(_) => "seq".to_string(),
                Node::Repetition(_) => "rep".to_string(),
            })
            .collect();
        assert_eq!(order, vec!["seq", "[x]", "a", "b"]);
    }

    #[test]
    fn find_tagged_visits_nested_tags() {
        let node = Node::Sequence(vec![
            tagged("digit", leaf("1")),
            tagged("number", tagged("digit", leaf("2"))),
        ]);
        let digits: Vec<_> = node
            .find_tagged("digit")
            .map(Node::matched_text)
            .collect();
        assert_eq!(digits, vec!["1", "2"]);
        assert_eq!(node.find_tagged("number").count(), 1);
        assert_eq!(node.find_tagged("missing").count(), 0);
    }

    #[test]
    fn display_renders_indented_tree() {
        let node = tagged(
            "pair",
            Node::Sequence(vec![
                tagged("key", leaf("a")),
                leaf("="),
                Node::Repetition(vec![Node::Terminal {
                    kind: TerminalKind::UnitRange,
                    text: "7",
                }]),
            ]),
        );
        let expected = [
            "[pair] sequence",
            "  [key] literal \"a\"",
            "  literal \"=\"",
            "  repetition",
            "    range \"7\"",
        ]
        .join("\n");
        assert_eq!(node.to_string(), expected);
    }
}
