//! Keyword recognizer: a trie-shaped DFA over the closed keyword set.
//!
//! Driven by consuming the candidate identifier's bytes one at a time
//! rather than hand-coding a `match` arm per trie node, which would bloat
//! into dozens of near-duplicate states for no benefit. This builds the
//! trie shape once from a static word table and walks it byte by byte.
//!
//! Rejection is not an error. A `None` result means "not a keyword" and the
//! caller falls through to reserved-word / noise-word / identifier
//! classification.

use std::sync::LazyLock;

use prismc_util::symbol::{
    Symbol, KW_ARRAY, KW_BOOL, KW_BREAK, KW_CASE, KW_CHAR, KW_CONTINUE, KW_DEFAULT, KW_DO, KW_ELSE,
    KW_FALSE, KW_FLOAT, KW_FOR, KW_GOTO, KW_IF, KW_INPUT, KW_INT, KW_MAIN, KW_PRINTF, KW_RETURN,
    KW_STRING, KW_SWITCH, KW_TRUE, KW_VOID, KW_WHILE,
};

const KEYWORDS: &[(&str, Symbol)] = &[
    ("array", KW_ARRAY),
    ("bool", KW_BOOL),
    ("break", KW_BREAK),
    ("case", KW_CASE),
    ("char", KW_CHAR),
    ("continue", KW_CONTINUE),
    ("default", KW_DEFAULT),
    ("do", KW_DO),
    ("else", KW_ELSE),
    ("false", KW_FALSE),
    ("float", KW_FLOAT),
    ("for", KW_FOR),
    ("goto", KW_GOTO),
    ("if", KW_IF),
    ("int", KW_INT),
    ("input", KW_INPUT),
    ("main", KW_MAIN),
    ("printf", KW_PRINTF),
    ("return", KW_RETURN),
    ("string", KW_STRING),
    ("switch", KW_SWITCH),
    ("true", KW_TRUE),
    ("void", KW_VOID),
    ("while", KW_WHILE),
];

struct TrieNode {
    /// (byte, child index) pairs; at most a handful per node so a linear
    /// scan beats a hash map.
    edges: Vec<(u8, usize)>,
    accept: Option<Symbol>,
}

impl TrieNode {
    fn empty() -> Self {
        Self {
            edges: Vec::new(),
            accept: None,
        }
    }
}

struct Trie {
    nodes: Vec<TrieNode>,
}

impl Trie {
    fn build() -> Self {
        let mut nodes = vec![TrieNode::empty()];
        for (word, sym) in KEYWORDS {
            let mut state = 0usize;
            for b in word.bytes() {
                state = match nodes[state].edges.iter().find(|(eb, _)| *eb == b) {
                    Some((_, next)) => *next,
                    None => {
                        nodes.push(TrieNode::empty());
                        let next = nodes.len() - 1;
                        nodes[state].edges.push((b, next));
                        next
                    }
                };
            }
            nodes[state].accept = Some(*sym);
        }
        Self { nodes }
    }

    /// Transition on one character; `None` rejects immediately.
    fn step(&self, state: usize, b: u8) -> Option<usize> {
        self.nodes[state]
            .edges
            .iter()
            .find(|(eb, _)| *eb == b)
            .map(|(_, next)| *next)
    }

    fn accept_at(&self, state: usize) -> Option<Symbol> {
        self.nodes[state].accept
    }
}

static KEYWORD_TRIE: LazyLock<Trie> = LazyLock::new(Trie::build);

/// Walks the trie character-by-character over `candidate`. Accepts only if
/// every byte of `candidate` was consumed and the final state is accepting
/// (so "if" accepts but "iffy" does not, even though "if" is a prefix of it).
pub fn recognize(candidate: &str) -> Option<Symbol> {
    let trie = &*KEYWORD_TRIE;
    let mut state = 0usize;
    for b in candidate.bytes() {
        state = trie.step(state, b)?;
    }
    trie.accept_at(state)
}

/// Number of entries in the keyword table, exposed for property tests that
/// need to enumerate every keyword without duplicating the list.
pub(crate) const KEYWORD_COUNT_FOR_TESTS: usize = KEYWORDS.len();

/// The `index`-th keyword spelling, exposed for property tests.
pub(crate) fn nth_keyword_for_tests(index: usize) -> &'static str {
    KEYWORDS[index].0
}
