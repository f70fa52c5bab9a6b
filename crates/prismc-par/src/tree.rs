//! The parse tree model: an N-ary labeled tree with owned children.
//!
//! `{label, value?, children[]}` — `label` names the grammatical
//! production or terminal kind; `value` is present only for terminals
//! (the matched lexeme). A node owns its children outright: there is no
//! sharing, no back-reference, and the tree is acyclic and singly
//! rooted. Rust's ordinary drop glue gives us postorder *destruction* for
//! free — freeing a [`Node`] recursively frees its `children` `Vec` with
//! no explicit traversal needed — but a caller that needs to *visit*
//! nodes in postorder without destroying the tree needs its own walk;
//! [`Node::postorder`] is that explicit, non-recursive iterator.

/// A label or value string beyond this length indicates the caller built
/// the wrong kind of node (50 bytes is a sanity bound, not a hard grammar
/// limit). Unlike the original design this node shape doesn't enforce a
/// child-count cap; a handful of productions genuinely need more than ten
/// children and there is no reason to bound that artificially.
const MAX_ATOM_LEN: usize = 50;

/// One node of the parse tree.
///
/// Non-terminals carry `value: None` and ≥1 child unless they represent
/// an empty production; terminals carry `value: Some(lexeme)` and no
/// children, and that value always equals some token's lexeme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub label: String,
    pub value: Option<String>,
    pub children: Vec<Node>,
}

impl Node {
    /// A terminal node: a leaf carrying the matched lexeme.
    pub fn leaf(label: impl Into<String>, value: impl Into<String>) -> Self {
        let label = label.into();
        let value = value.into();
        debug_assert!(label.len() <= MAX_ATOM_LEN, "node label too long: {label:?}");
        debug_assert!(value.len() <= MAX_ATOM_LEN, "node value too long: {value:?}");
        Self {
            label,
            value: Some(value),
            children: Vec::new(),
        }
    }

    /// A non-terminal node with the given children.
    pub fn node(label: impl Into<String>, children: Vec<Node>) -> Self {
        let label = label.into();
        debug_assert!(label.len() <= MAX_ATOM_LEN, "node label too long: {label:?}");
        Self {
            label,
            value: None,
            children,
        }
    }

    /// An empty-production marker: a non-terminal with zero children,
    /// the one case invariant 5 exempts from the "≥1 child" rule.
    pub fn empty(label: impl Into<String>) -> Self {
        Self::node(label, Vec::new())
    }

    pub fn is_terminal(&self) -> bool {
        self.value.is_some()
    }

    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Preorder node count, root included. Used by tests asserting on
    /// tree shape without hand-walking it.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }

    /// Collects terminal values in left-to-right order — the in-order
    /// terminal sequence a round-trip check compares against the
    /// non-noise, non-comment token sequence.
    pub fn terminal_values(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_terminals(&mut out);
        out
    }

    fn collect_terminals<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Some(v) = &self.value {
            out.push(v.as_str());
        }
        for child in &self.children {
            child.collect_terminals(out);
        }
    }

    /// An explicit postorder traversal (every child visited before its
    /// parent), independent of `Drop`'s destruction order. `Drop` gives
    /// postorder *destruction* for free, but a caller that needs to
    /// *visit* nodes postorder — without destroying the tree — needs its
    /// own iterator; this is that iterator.
    pub fn postorder(&self) -> PostorderIter<'_> {
        PostorderIter { stack: vec![(self, 0)] }
    }
}

/// Iterative (non-recursive) postorder walk over a [`Node`] and its
/// descendants. Each node is yielded only after every one of its children
/// has already been yielded.
pub struct PostorderIter<'a> {
    stack: Vec<(&'a Node, usize)>,
}

impl<'a> Iterator for PostorderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, next_child) = self.stack.last_mut()?;
            if *next_child < node.children.len() {
                let child = &node.children[*next_child];
                *next_child += 1;
                self.stack.push((child, 0));
            } else {
                let (node, _) = self.stack.pop().expect("stack non-empty: just peeked it");
                return Some(node);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_carries_value_and_no_children() {
        let n = Node::leaf("Identifier", "count");
        assert!(n.is_terminal());
        assert_eq!(n.value.as_deref(), Some("count"));
        assert!(n.children.is_empty());
    }

    #[test]
    fn empty_production_has_no_value_and_no_children() {
        let n = Node::empty("Empty");
        assert!(!n.is_terminal());
        assert!(n.children.is_empty());
    }

    #[test]
    fn terminal_values_collected_left_to_right() {
        let tree = Node::node(
            "AssignmentStatement",
            vec![
                Node::leaf("Identifier", "x"),
                Node::leaf("Assignment Operator (Simple)", "="),
                Node::leaf("Integer Literal", "1"),
                Node::leaf("Delimiter (Semicolon)", ";"),
            ],
        );
        assert_eq!(tree.terminal_values(), vec!["x", "=", "1", ";"]);
    }

    #[test]
    fn count_is_preorder_total() {
        let tree = Node::node(
            "Block",
            vec![Node::leaf("Delimiter", "{"), Node::leaf("Delimiter", "}")],
        );
        assert_eq!(tree.count(), 3);
    }

    #[test]
    fn postorder_visits_every_child_before_its_parent() {
        let tree = Node::node(
            "AssignmentStatement",
            vec![
                Node::leaf("Identifier", "x"),
                Node::leaf("Assignment Operator (Simple)", "="),
                Node::leaf("Integer Literal", "1"),
            ],
        );
        let labels: Vec<&str> = tree.postorder().map(|n| n.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Identifier", "Assignment Operator (Simple)", "Integer Literal", "AssignmentStatement"]
        );
    }

    #[test]
    fn postorder_visits_nested_subtrees_before_their_parent() {
        let tree = Node::node(
            "Block",
            vec![
                Node::leaf("Delimiter", "{"),
                Node::node("ExpressionStatement", vec![Node::leaf("Identifier", "x")]),
                Node::leaf("Delimiter", "}"),
            ],
        );
        let labels: Vec<&str> = tree.postorder().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["Delimiter", "Identifier", "ExpressionStatement", "Delimiter", "Block"]);
    }

    #[test]
    fn postorder_count_matches_preorder_count() {
        let tree = Node::node(
            "Program",
            vec![Node::node(
                "Declaration",
                vec![Node::leaf("Keyword", "int"), Node::leaf("Identifier", "x")],
            )],
        );
        assert_eq!(tree.postorder().count(), tree.count());
    }
}
