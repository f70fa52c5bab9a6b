//! The tree serializer: two observable dumps of a parse tree, plus their
//! inverse readers.
//!
//! Neither format is required for the core to function — a
//! [`crate::tree::Node`] is exactly as usable to a caller that never
//! serializes it — but the driver writes one of these to the parse-tree
//! file as the stage-two counterpart of the lexer's symbol-table file.
//! Both formats round-trip: `parse(render(tree)) == tree` for every tree
//! this parser can produce.
//!
//! Token category names like `"Assignment Operator (Simple)"` or
//! `"Delimiter (Semicolon)"` routinely land in a node's `label` (every
//! terminal's label is `TokenKind::category_name()`), and carry spaces
//! and parentheses of their own. A delimiter scheme that reuses `(`/`)`/
//! space as *both* structural punctuation and permitted atom content is
//! ambiguous, so every atom (label or value) is written as a quoted
//! string with `"` and `\` backslash-escaped — the same discipline the
//! token sink uses commas for, just at a different boundary.

use thiserror::Error;

use crate::tree::Node;

#[derive(Debug, Error)]
pub enum SerializerError {
    #[error("unexpected end of input while parsing a serialized tree")]
    UnexpectedEof,

    #[error("expected `(` to start a node, found {0:?}")]
    ExpectedOpenParen(String),

    #[error("expected a quoted atom (`\"...\"`), found {0:?}")]
    ExpectedQuotedAtom(String),

    #[error("unterminated quoted atom: {0:?}")]
    UnterminatedAtom(String),

    #[error("indented dump has inconsistent indentation at line {line}: {text:?}")]
    BadIndent { line: usize, text: String },
}

pub type SerializerResult<T> = std::result::Result<T, SerializerError>;

fn write_quoted(out: &mut String, atom: &str) {
    out.push('"');
    for c in atom.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}

/// Consumes one `"..."` atom starting at `chars`' current position
/// (leading whitespace already skipped by the caller), unescaping `\"`
/// and `\\` as it goes. Returns the atom text.
fn read_quoted(chars: &mut std::iter::Peekable<std::str::Chars>) -> SerializerResult<String> {
    match chars.next() {
        Some('"') => {}
        Some(other) => return Err(SerializerError::ExpectedQuotedAtom(other.to_string())),
        None => return Err(SerializerError::UnexpectedEof),
    }
    let mut atom = String::new();
    loop {
        match chars.next() {
            Some('"') => return Ok(atom),
            Some('\\') => match chars.next() {
                Some(c) => atom.push(c),
                None => return Err(SerializerError::UnterminatedAtom(atom)),
            },
            Some(c) => atom.push(c),
            None => return Err(SerializerError::UnterminatedAtom(atom)),
        }
    }
}

/// Renders `node` as two spaces per depth level, `"label": "value"` for
/// terminals and bare `"label"` for non-terminals, one line per node,
/// preorder.
pub fn to_indented(node: &Node) -> String {
    let mut out = String::new();
    write_indented(node, 0, &mut out);
    out
}

fn write_indented(node: &Node, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    write_quoted(out, &node.label);
    if let Some(v) = &node.value {
        out.push_str(": ");
        write_quoted(out, v);
    }
    out.push('\n');
    for child in &node.children {
        write_indented(child, depth + 1, out);
    }
}

/// Parses the inverse of [`to_indented`]. Each line's leading run of
/// two-space groups gives its depth; a line at depth `d` becomes a
/// child of the most recently seen node at depth `d - 1`. A jump of more
/// than one level between a line and its would-be parent is rejected as
/// malformed rather than silently reparented.
pub fn from_indented(text: &str) -> SerializerResult<Node> {
    let mut stack: Vec<(usize, Node)> = Vec::new();

    for (line_no, raw_line) in text.lines().enumerate() {
        if raw_line.trim().is_empty() {
            continue;
        }
        let indent = raw_line.len() - raw_line.trim_start_matches(' ').len();
        if indent % 2 != 0 {
            return Err(SerializerError::BadIndent {
                line: line_no + 1,
                text: raw_line.to_string(),
            });
        }
        let depth = indent / 2;
        let body = raw_line.trim_start_matches(' ');

        let mut chars = body.chars().peekable();
        let label = read_quoted(&mut chars).map_err(|_| SerializerError::BadIndent {
            line: line_no + 1,
            text: raw_line.to_string(),
        })?;
        while matches!(chars.peek(), Some(' ')) {
            chars.next();
        }
        let value = if chars.peek() == Some(&':') {
            chars.next();
            while matches!(chars.peek(), Some(' ')) {
                chars.next();
            }
            Some(read_quoted(&mut chars).map_err(|_| SerializerError::BadIndent {
                line: line_no + 1,
                text: raw_line.to_string(),
            })?)
        } else {
            None
        };
        let node = match value {
            Some(v) => Node::leaf(label, v),
            None => Node::node(label, Vec::new()),
        };

        if depth > stack.len() {
            return Err(SerializerError::BadIndent {
                line: line_no + 1,
                text: raw_line.to_string(),
            });
        }

        while stack.len() > depth {
            let (_, finished) = stack.pop().unwrap();
            attach_or_push(&mut stack, finished);
        }

        stack.push((depth, node));
    }

    while stack.len() > 1 {
        let (_, finished) = stack.pop().unwrap();
        attach_or_push(&mut stack, finished);
    }

    stack
        .pop()
        .map(|(_, node)| node)
        .ok_or(SerializerError::UnexpectedEof)
}

fn attach_or_push(stack: &mut [(usize, Node)], child: Node) {
    if let Some((_, parent)) = stack.last_mut() {
        parent.children.push(child);
    }
}

/// Renders `node` as `("label" child1 child2 …)` or `("label": "value")`
/// for a childless terminal, a single parenthesized expression with no
/// embedded newlines.
pub fn to_parenthesized(node: &Node) -> String {
    let mut out = String::new();
    write_parenthesized(node, &mut out);
    out
}

fn write_parenthesized(node: &Node, out: &mut String) {
    out.push('(');
    write_quoted(out, &node.label);
    if let Some(v) = &node.value {
        out.push_str(": ");
        write_quoted(out, v);
    }
    for child in &node.children {
        out.push(' ');
        write_parenthesized(child, out);
    }
    out.push(')');
}

/// Parses the inverse of [`to_parenthesized`].
pub fn from_parenthesized(text: &str) -> SerializerResult<Node> {
    let mut chars = text.chars().peekable();
    let node = parse_node(&mut chars)?;
    Ok(node)
}

fn parse_node(chars: &mut std::iter::Peekable<std::str::Chars>) -> SerializerResult<Node> {
    skip_ws(chars);
    match chars.next() {
        Some('(') => {}
        Some(other) => return Err(SerializerError::ExpectedOpenParen(other.to_string())),
        None => return Err(SerializerError::UnexpectedEof),
    }

    skip_ws(chars);
    let label = read_quoted(chars)?;

    skip_ws(chars);
    let value = if chars.peek() == Some(&':') {
        chars.next();
        skip_ws(chars);
        Some(read_quoted(chars)?)
    } else {
        None
    };

    let mut children = Vec::new();
    loop {
        skip_ws(chars);
        match chars.peek() {
            Some('(') => children.push(parse_node(chars)?),
            Some(')') => {
                chars.next();
                break;
            }
            Some(_) => return Err(SerializerError::ExpectedOpenParen(chars.peek().unwrap().to_string())),
            None => return Err(SerializerError::UnexpectedEof),
        }
    }

    Ok(Node {
        label,
        value,
        children,
    })
}

fn skip_ws(chars: &mut std::iter::Peekable<std::str::Chars>) {
    while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
        chars.next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::node(
            "AssignmentStatement",
            vec![
                Node::leaf("Identifier", "x"),
                Node::leaf("Assignment Operator (Simple)", "="),
                Node::leaf("Integer Literal", "1"),
            ],
        )
    }

    #[test]
    fn parenthesized_round_trips_with_embedded_parens_and_spaces_in_labels() {
        let tree = sample();
        let text = to_parenthesized(&tree);
        let parsed = from_parenthesized(&text).unwrap();
        assert_eq!(parsed, tree);
    }

    #[test]
    fn indented_dump_shows_two_spaces_per_level() {
        let tree = sample();
        let text = to_indented(&tree);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "\"AssignmentStatement\"");
        assert_eq!(lines[1], "  \"Identifier\": \"x\"");
        assert_eq!(lines[3], "  \"Integer Literal\": \"1\"");
    }

    #[test]
    fn indented_round_trips_including_parenthesized_category_names() {
        let tree = sample();
        let text = to_indented(&tree);
        let parsed = from_indented(&text).unwrap();
        assert_eq!(parsed, tree);
    }

    #[test]
    fn empty_production_renders_with_no_children() {
        let tree = Node::empty("Empty");
        assert_eq!(to_parenthesized(&tree), "(\"Empty\")");
        assert_eq!(from_parenthesized("(\"Empty\")").unwrap(), tree);
    }

    #[test]
    fn nested_block_round_trips_both_formats() {
        let tree = Node::node(
            "Block",
            vec![
                Node::leaf("Delimiter (Left Brace)", "{"),
                Node::node(
                    "ExpressionStatement",
                    vec![Node::leaf("Identifier", "x"), Node::leaf("Delimiter (Semicolon)", ";")],
                ),
                Node::leaf("Delimiter (Right Brace)", "}"),
            ],
        );
        assert_eq!(from_parenthesized(&to_parenthesized(&tree)).unwrap(), tree);
        assert_eq!(from_indented(&to_indented(&tree)).unwrap(), tree);
    }

    #[test]
    fn malformed_indent_jump_is_rejected() {
        let bad = "\"Program\"\n    \"Declaration\"\n";
        assert!(from_indented(bad).is_err());
    }

    #[test]
    fn value_containing_a_quote_escapes_correctly() {
        let tree = Node::leaf("String Literal", "say \"hi\"");
        let text = to_parenthesized(&tree);
        assert_eq!(from_parenthesized(&text).unwrap(), tree);
    }
}
