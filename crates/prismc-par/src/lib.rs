//! prismc-par - syntactic analysis for the `.prsm` token stream.
//!
//! Stage two of the two-stage front end: a recursive-descent parser with
//! operator-precedence climbing over expressions and panic-mode recovery
//! at statement boundaries. Consumes the [`prismc_lex::Token`] stream
//! (loaded from the symbol-table file, or handed across in-process) and
//! produces a concrete [`tree::Node`] — a generic N-ary parse tree, not a
//! typed AST: every production builds a `Node` whose `label` names the
//! grammar rule and whose children are either sub-trees or terminal leaves.
//!
//! - [`tree`] - the parse tree model
//! - [`expr`] - the operator-precedence expression grammar
//! - [`stmt`] - the statement grammar, blocks, and declarations
//! - [`serializer`] - the two observable tree dumps
//!
//! This file owns the [`Parser`] struct itself: token-array/cursor state,
//! the `peek`/`next` primitives with their loop-safety counters, and
//! panic-mode recovery (`synchronize`). [`expr`] and [`stmt`] extend
//! `Parser` with the grammar productions proper via additional `impl`
//! blocks in those modules.

pub mod serializer;
mod stmt;
pub mod tree;

mod expr;

use prismc_lex::{Delimiter, Token, TokenKind};
use prismc_util::diagnostic::DiagnosticCode;
use prismc_util::symbol::{KW_ARRAY, KW_DO, KW_ELSE, KW_FOR, KW_IF, KW_INPUT, KW_PRINTF, KW_RETURN, KW_WHILE};
use prismc_util::{DiagnosticBuilder, Handler, Span, Symbol};

pub use tree::Node;

/// Parses a full token stream into a `Program` tree (`program := statement*`).
///
/// Trivia the lexer preserves "in the stream" but that the grammar never
/// references — noise words (`by`/`from`/`until`) — are dropped before
/// parsing starts; everything else, including the two comment-marker
/// tokens, reaches the grammar (see `statement`'s `comment` alternative).
pub fn parse(tokens: Vec<Token>, handler: &Handler) -> Node {
    let mut parser = Parser::new(tokens, handler);
    parser.parse_program()
}

/// Recursive-descent parser state: a token array loaded once, a cursor
/// index, and a total count. No lookahead buffer beyond the cursor for
/// the two primitives `peek`/`next`; [`Parser::peek_at`] is an additional,
/// uncounted raw
/// lookahead used only to disambiguate a handful of LL(1)-ambiguous
/// statement starts (see DESIGN.md) and does not participate in the
/// loop-safety bookkeeping below.
pub struct Parser<'h> {
    tokens: Vec<Token>,
    cursor: usize,
    handler: &'h Handler,

    /// Cursor position as of the last `peek()` call, and how many times
    /// running `peek()` has observed that same position in a row — the
    /// ">10 times without advance" trip condition.
    last_peek_cursor: Option<usize>,
    peek_repeat: u32,

    /// Set once an internal invariant violation (loop-safety trip, or —
    /// in principle — a production reporting success without advancing)
    /// is detected. The driver maps this to exit code 2.
    internal_error: bool,
}

/// Keywords that start a statement, consulted by both panic-mode recovery
/// and the main statement dispatch.
const STATEMENT_STARTERS: &[Symbol] = &[KW_IF, KW_ELSE, KW_FOR, KW_WHILE, KW_DO, KW_RETURN, KW_INPUT, KW_PRINTF, KW_ARRAY];

impl<'h> Parser<'h> {
    pub fn new(tokens: Vec<Token>, handler: &'h Handler) -> Self {
        let tokens: Vec<Token> = tokens.into_iter().filter(|t| !matches!(t.kind, TokenKind::Noise(_))).collect();
        Self {
            tokens,
            cursor: 0,
            handler,
            last_peek_cursor: None,
            peek_repeat: 0,
            internal_error: false,
        }
    }

    /// True once an internal invariant violation (the loop-safety
    /// bound) forced this parse to a premature halt. The driver reports
    /// exit code 2 when this is set, regardless of ordinary diagnostics.
    pub fn had_internal_error(&self) -> bool {
        self.internal_error
    }

    /// Parses the whole token stream into a `Program` tree. Equivalent
    /// to the free-standing [`parse`] function, but exposed as a method
    /// so a caller that needs [`Parser::had_internal_error`] afterward
    /// doesn't have to construct and discard a second `Parser`.
    pub fn parse(&mut self) -> Node {
        self.parse_program()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// The primary one-token lookahead (`tokens[cursor]`). Counted: ten
    /// consecutive calls observing the same cursor position without an
    /// intervening `next()` trips the internal-error path.
    pub(crate) fn peek(&mut self) -> Option<Token> {
        if self.last_peek_cursor == Some(self.cursor) {
            self.peek_repeat += 1;
            if self.peek_repeat > 10 {
                self.trip_internal(
                    DiagnosticCode::E_INTERNAL_CURSOR_STALL,
                    "parser made no progress: the same token was peeked more than 10 times without the cursor advancing",
                );
            }
        } else {
            self.last_peek_cursor = Some(self.cursor);
            self.peek_repeat = 0;
        }
        self.tokens.get(self.cursor).cloned()
    }

    /// Raw lookahead at `cursor + offset`, bypassing the loop-safety
    /// counter. Used only to disambiguate a handful of statement starts
    /// (e.g. `type IDENT (` vs. `type IDENT =`) that a single-token peek
    /// cannot — see DESIGN.md.
    pub(crate) fn peek_at(&self, offset: usize) -> Option<Token> {
        self.tokens.get(self.cursor + offset).cloned()
    }

    /// Returns `tokens[cursor]` and advances. Resets the peek-repeat
    /// counter, since the cursor has now moved.
    pub(crate) fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.cursor).cloned();
        if tok.is_some() {
            self.cursor += 1;
        }
        self.last_peek_cursor = None;
        self.peek_repeat = 0;
        tok
    }

    pub(crate) fn current_line(&self) -> u32 {
        self.tokens
            .get(self.cursor)
            .or_else(|| self.tokens.last())
            .map(|t| t.line)
            .unwrap_or(1)
    }

    /// Forces the cursor to end-of-input and flags an internal error.
    /// Every grammar production's loops are driven by `is_at_end()`, so
    /// this unwinds the whole recursive-descent call stack within a few
    /// frames without needing `Result` threaded through every signature
    /// (see DESIGN.md).
    pub(crate) fn trip_internal(&mut self, code: DiagnosticCode, message: &str) {
        if self.internal_error {
            return;
        }
        self.internal_error = true;
        DiagnosticBuilder::error(message)
            .code(code)
            .span(Span::point(self.current_line(), 1))
            .emit(self.handler);
        self.cursor = self.tokens.len();
    }

    /// Runs `parse_statement` until `stop` matches the current token or
    /// input is exhausted. Each top-level `parse_statement` call is
    /// tracked for progress: 100 consecutive no-progress iterations trips
    /// the internal-error path.
    pub(crate) fn parse_statements_until(&mut self, stop: impl Fn(&Token) -> bool) -> Vec<Node> {
        let mut children = Vec::new();
        let mut last_cursor = self.cursor;
        let mut no_progress = 0u32;
        loop {
            if self.is_at_end() {
                break;
            }
            if let Some(tok) = self.tokens.get(self.cursor) {
                if stop(tok) {
                    break;
                }
            }
            children.push(self.parse_statement());
            if self.cursor == last_cursor {
                no_progress += 1;
                if no_progress >= 100 {
                    self.trip_internal(
                        DiagnosticCode::E_INTERNAL_LOOP_SAFETY,
                        "parser made no progress across 100 consecutive statement attempts",
                    );
                    break;
                }
            } else {
                no_progress = 0;
            }
            last_cursor = self.cursor;
        }
        children
    }

    pub(crate) fn parse_program(&mut self) -> Node {
        let children = self.parse_statements_until(|_| false);
        Node::node("Program", children)
    }

    /// Panic-mode recovery. Discards tokens until one of: a recovery
    /// delimiter at top level (`;`, `{`, `}`, `)` — consumed), a
    /// statement-starting keyword (left for the caller), or runs out of
    /// input (recovery fails, parsing terminates via `is_at_end`).
    /// Brackets encountered while skipping are matched by counting
    /// rather than treated as synchronization points themselves.
    pub(crate) fn synchronize(&mut self) {
        loop {
            if self.is_at_end() {
                return;
            }
            let tok = self.tokens[self.cursor].clone();
            match &tok.kind {
                TokenKind::Delimiter(Delimiter::Semicolon)
                | TokenKind::Delimiter(Delimiter::LBrace)
                | TokenKind::Delimiter(Delimiter::RBrace)
                | TokenKind::Delimiter(Delimiter::RParen) => {
                    self.cursor += 1;
                    return;
                }
                TokenKind::Keyword(sym) if STATEMENT_STARTERS.contains(sym) => {
                    return;
                }
                TokenKind::Delimiter(Delimiter::LParen) => {
                    self.skip_bracketed(Delimiter::LParen, Delimiter::RParen);
                }
                TokenKind::Delimiter(Delimiter::LBracket) => {
                    self.skip_bracketed(Delimiter::LBracket, Delimiter::RBracket);
                }
                _ => {
                    self.cursor += 1;
                }
            }
        }
    }

    /// Skips a balanced `open ... close` run starting at the current
    /// `open` token, via simple depth counting. Leaves the cursor just
    /// past the matching close, or at
    /// end of input if it's never found.
    fn skip_bracketed(&mut self, open: Delimiter, close: Delimiter) {
        let mut depth = 0usize;
        while !self.is_at_end() {
            match &self.tokens[self.cursor].kind {
                TokenKind::Delimiter(d) if *d == open => {
                    depth += 1;
                    self.cursor += 1;
                }
                TokenKind::Delimiter(d) if *d == close => {
                    self.cursor += 1;
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                _ => self.cursor += 1,
            }
        }
    }

    /// Reports a token mismatch (kind or value) and enters panic-mode
    /// recovery.
    pub(crate) fn report_expected(&mut self, expected: &str) {
        let (found_desc, line) = match self.tokens.get(self.cursor) {
            Some(tok) => (format!("{} {:?}", tok.kind.category_name(), tok.lexeme), tok.line),
            None => ("end of input".to_string(), self.current_line()),
        };
        DiagnosticBuilder::error(format!("expected {expected}, found {found_desc}"))
            .code(DiagnosticCode::E_PARSER_EXPECTED_TOKEN)
            .span(Span::point(line, 1))
            .emit(self.handler);
    }

    /// Consumes and returns a leaf if the current token has kind `kind`;
    /// otherwise reports a mismatch, recovers, and returns an `Error`
    /// placeholder leaf so callers can keep building a tree shape under
    /// recovery: a missing token doesn't abort the whole parse, just the
    /// one statement.
    pub(crate) fn expect_kind(&mut self, kind: TokenKind, expected: &str) -> Node {
        match self.peek() {
            Some(tok) if tok.kind == kind => {
                self.next();
                Node::leaf(tok.kind.category_name(), tok.lexeme)
            }
            _ => {
                self.report_expected(expected);
                self.synchronize();
                Node::leaf("Error", "")
            }
        }
    }

    pub(crate) fn expect_delim(&mut self, delim: Delimiter, expected: &str) -> Node {
        self.expect_kind(TokenKind::Delimiter(delim), expected)
    }

    /// Consumes and returns a leaf if the current token is the keyword
    /// `sym`; otherwise reports a mismatch and recovers, as
    /// [`Parser::expect_kind`].
    pub(crate) fn expect_keyword(&mut self, sym: Symbol, spelling: &str) -> Node {
        self.expect_kind(TokenKind::Keyword(sym), &format!("`{spelling}`"))
    }

    /// Consumes and returns an `Identifier` leaf. `main` is also accepted
    /// here even though the lexer classifies it as `Keyword(main)` (it is
    /// in the closed keyword set) — this is the language's canonical
    /// program entry-point name and must be usable as a function/variable
    /// name; see DESIGN.md.
    pub(crate) fn expect_name(&mut self) -> Node {
        match self.peek() {
            Some(tok) if tok.kind == TokenKind::Identifier => {
                self.next();
                Node::leaf("Identifier", tok.lexeme)
            }
            Some(tok) if matches!(&tok.kind, TokenKind::Keyword(sym) if *sym == prismc_util::symbol::KW_MAIN) => {
                self.next();
                Node::leaf("Identifier", tok.lexeme)
            }
            _ => {
                self.report_expected("an identifier");
                self.synchronize();
                Node::leaf("Error", "")
            }
        }
    }

    pub(crate) fn peek_kind(&mut self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    /// Unconditionally consumes the current token as a leaf. Callers use
    /// this only where dispatch has already confirmed a token is
    /// present and matches the expected kind (e.g. the type keyword that
    /// led `parse_decl_or_function_decl` here in the first place).
    pub(crate) fn consume_as_leaf(&mut self) -> Node {
        let tok = self.next().expect("caller confirmed a token is present via peek");
        Node::leaf(tok.kind.category_name(), tok.lexeme)
    }
}
