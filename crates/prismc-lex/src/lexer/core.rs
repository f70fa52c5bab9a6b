//! The line-oriented lexer FSM.
//!
//! Operates one line at a time, `START`-dispatching on the first
//! significant byte. Per-line state lives entirely on the call stack
//! (no struct field beyond the line index); the only state carried across
//! lines is the comment tracker's `in_block_comment` flag.

use prismc_util::{DiagnosticBuilder, Handler, Span};

use super::comment::{CommentTracker, Marker};
use super::{identifier, number, operator, string};
use crate::classify::{is_delimiter, is_digit, is_letter, is_operator_start, is_space, is_terminator};
use crate::token::{Delimiter, LexErrorKind, Token, TokenKind};

/// Line-oriented scanner producing a token stream from `.prsm` source text.
pub struct Lexer<'a> {
    lines: Vec<&'a str>,
    comment: CommentTracker,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines().collect(),
            comment: CommentTracker::new(),
        }
    }

    /// Lexes the whole source, reporting diagnostics for every lexical
    /// error token it emits (lexical errors never stop the scan — they
    /// become tokens).
    pub fn lex(mut self, handler: &Handler) -> Vec<Token> {
        let mut tokens = Vec::new();
        for (idx, line) in self.lines.clone().iter().enumerate() {
            let line_no = (idx + 1) as u32;
            self.scan_line(line, line_no, &mut tokens, handler);
        }
        if self.comment.in_block_comment() {
            tokens.push(Token::new(
                TokenKind::LexicalError(LexErrorKind::UnterminatedBlockComment),
                "~/",
                self.lines.len().max(1) as u32,
            ));
            DiagnosticBuilder::error("unterminated block comment: no matching `/~` before end of input")
                .code(prismc_util::diagnostic::DiagnosticCode::E_LEXER_UNTERMINATED_BLOCK_COMMENT)
                .span(Span::point(self.lines.len().max(1) as u32, 1))
                .emit(handler);
        }
        tokens
    }

    fn scan_line(&mut self, line: &str, line_no: u32, tokens: &mut Vec<Token>, handler: &Handler) {
        let bytes = line.as_bytes();
        let mut i = 0usize;

        loop {
            if i >= bytes.len() {
                return;
            }

            if self.comment.in_block_comment() {
                match find_marker_from(bytes, i) {
                    Some((Marker::Close, pos)) => {
                        tokens.push(self.comment.record(Marker::Close, line_no));
                        i = pos + 2;
                        continue;
                    }
                    Some((Marker::Open, pos)) => {
                        // A stray `~/` while already inside a block comment
                        // does not nest; keep searching past it on the same
                        // line for the real `/~`.
                        i = pos + 2;
                        continue;
                    }
                    None => return, // stays in the block comment into the next line
                }
            }

            let b = bytes[i];

            if is_space(b) {
                i += 1;
                continue;
            }

            if b == b'~' && bytes.get(i + 1) == Some(&b'~') {
                tokens.push(Token::new(TokenKind::LineComment, &line[i..], line_no));
                return;
            }

            if let Some(marker) = CommentTracker::marker_at(bytes, i) {
                tokens.push(self.comment.record(marker, line_no));
                i += 2;
                continue;
            }

            if is_letter(b) || b == b'_' {
                let (kind, len) = identifier::scan_identifier(bytes, i);
                report_if_error(&kind, &line[i..i + len], line_no, handler);
                tokens.push(Token::new(kind, &line[i..i + len], line_no));
                i += len;
                continue;
            }

            if is_digit(b) {
                let (kind, len) = number::scan_number(bytes, i);
                report_if_error(&kind, &line[i..i + len], line_no, handler);
                tokens.push(Token::new(kind, &line[i..i + len], line_no));
                i += len;
                continue;
            }

            if b == b'"' {
                let (kind, len) = string::scan_string(bytes, i);
                report_if_error(&kind, &line[i..i + len], line_no, handler);
                tokens.push(Token::new(kind, &line[i..i + len], line_no));
                i += len;
                continue;
            }

            if b == b'\'' {
                let (kind, len) = string::scan_char(bytes, i);
                report_if_error(&kind, &line[i..i + len], line_no, handler);
                tokens.push(Token::new(kind, &line[i..i + len], line_no));
                i += len;
                continue;
            }

            if is_operator_start(b) {
                match operator::lex_operator(bytes, i) {
                    Some((kind, len)) => {
                        tokens.push(Token::new(kind, &line[i..i + len], line_no));
                        i += len;
                    }
                    None => {
                        let len = scan_error_run(bytes, i);
                        let lexeme = &line[i..i + len];
                        report_error(LexErrorKind::UnknownOperator, lexeme, line_no, handler);
                        tokens.push(Token::new(
                            TokenKind::LexicalError(LexErrorKind::UnknownOperator),
                            lexeme,
                            line_no,
                        ));
                        i += len;
                    }
                }
                continue;
            }

            if is_delimiter(b) {
                let delim = Delimiter::from_byte(b).expect("is_delimiter implies from_byte");
                tokens.push(Token::new(TokenKind::Delimiter(delim), &line[i..i + 1], line_no));
                i += 1;
                continue;
            }

            // ERROR state: a byte that starts nothing recognized.
            let len = scan_error_run(bytes, i);
            let lexeme = &line[i..i + len];
            report_error(LexErrorKind::InvalidIdentifier, lexeme, line_no, handler);
            tokens.push(Token::new(
                TokenKind::LexicalError(LexErrorKind::InvalidIdentifier),
                lexeme,
                line_no,
            ));
            i += len;
        }
    }
}

/// Finds the next `~/`/`/~` marker starting at or after `from`, used while
/// already inside a block comment. Both marker kinds can be returned: a
/// `Close` ends the comment, while an `Open` is a stray marker the caller
/// must skip past (block comments don't nest) so the close search
/// continues on the same line instead of abandoning it.
fn find_marker_from(bytes: &[u8], from: usize) -> Option<(Marker, usize)> {
    let mut pos = from;
    while pos + 1 < bytes.len() {
        if let Some(m) = CommentTracker::marker_at(bytes, pos) {
            return Some((m, pos));
        }
        pos += 1;
    }
    None
}

/// Consumes the maximal run of non-terminator bytes starting at `start`
/// (the shared "ERROR state" / "unknown operator" recovery rule).
fn scan_error_run(bytes: &[u8], start: usize) -> usize {
    let mut pos = start;
    while pos < bytes.len() && !is_terminator(bytes[pos]) {
        pos += 1;
    }
    (pos - start).max(1)
}

fn report_if_error(kind: &TokenKind, lexeme: &str, line: u32, handler: &Handler) {
    if let TokenKind::LexicalError(err) = kind {
        report_error(*err, lexeme, line, handler);
    }
}

fn report_error(kind: LexErrorKind, lexeme: &str, line: u32, handler: &Handler) {
    let code = match kind {
        LexErrorKind::InvalidIdentifier => {
            prismc_util::diagnostic::DiagnosticCode::E_LEXER_INVALID_IDENTIFIER
        }
        LexErrorKind::InvalidInteger => prismc_util::diagnostic::DiagnosticCode::E_LEXER_INVALID_INTEGER,
        LexErrorKind::InvalidFloat => prismc_util::diagnostic::DiagnosticCode::E_LEXER_INVALID_FLOAT,
        LexErrorKind::InvalidCharLiteral => {
            prismc_util::diagnostic::DiagnosticCode::E_LEXER_INVALID_CHAR_LITERAL
        }
        LexErrorKind::UnterminatedString => {
            prismc_util::diagnostic::DiagnosticCode::E_LEXER_UNTERMINATED_STRING
        }
        LexErrorKind::UnterminatedBlockComment => {
            prismc_util::diagnostic::DiagnosticCode::E_LEXER_UNTERMINATED_BLOCK_COMMENT
        }
        LexErrorKind::UnknownOperator => prismc_util::diagnostic::DiagnosticCode::E_LEXER_UNKNOWN_OPERATOR,
    };
    DiagnosticBuilder::error(format!("{}: `{}`", kind_message(kind), lexeme))
        .code(code)
        .span(Span::point(line, 1))
        .emit(handler);
}

fn kind_message(kind: LexErrorKind) -> &'static str {
    match kind {
        LexErrorKind::InvalidIdentifier => "invalid identifier",
        LexErrorKind::InvalidInteger => "invalid integer literal",
        LexErrorKind::InvalidFloat => "invalid float literal",
        LexErrorKind::InvalidCharLiteral => "invalid character literal",
        LexErrorKind::UnterminatedString => "unterminated string literal",
        LexErrorKind::UnterminatedBlockComment => "unterminated block comment",
        LexErrorKind::UnknownOperator => "unknown operator",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        let handler = Handler::new();
        Lexer::new(source).lex(&handler)
    }

    #[test]
    fn s1_keyword_identifier_boundary() {
        let tokens = lex("int count=0;");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind.category_name()).collect();
        assert_eq!(
            kinds,
            vec![
                "Keyword",
                "Identifier",
                "Assignment Operator (Simple)",
                "Integer Literal",
                "Delimiter (Semicolon)",
            ]
        );
        assert_eq!(tokens[0].lexeme, "int");
        assert_eq!(tokens[1].lexeme, "count");
    }

    #[test]
    fn s2_maximal_munch_on_slash() {
        let tokens = lex("a //= 2;");
        assert_eq!(tokens[0].lexeme, "a");
        assert_eq!(tokens[1].lexeme, "//=");
        assert_eq!(tokens[1].kind.category_name(), "Assignment Operator (Integer Division)");
        assert_eq!(tokens[2].lexeme, "2");
        assert_eq!(tokens[3].lexeme, ";");
    }

    #[test]
    fn s3_block_comment_emits_only_open_and_close() {
        let tokens = lex("~/ a = 1;\n b = 2; /~");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::BlockCommentOpen);
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].kind, TokenKind::BlockCommentClose);
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn s6_lexical_error_survives_and_lexing_continues() {
        let tokens = lex("1abc + 2;");
        assert_eq!(
            tokens[0].kind,
            TokenKind::LexicalError(LexErrorKind::InvalidInteger)
        );
        assert_eq!(tokens[0].lexeme, "1abc");
        assert_eq!(tokens[1].kind, TokenKind::Arithmetic(crate::token::ArithmeticOp::Add));
        assert_eq!(tokens[2].kind, TokenKind::IntegerLiteral);
        assert_eq!(tokens[3].kind, TokenKind::Delimiter(Delimiter::Semicolon));
    }

    #[test]
    fn line_numbers_are_non_decreasing() {
        let tokens = lex("int x = 1;\nint y = 2;\nint z = 3;");
        let mut last = 0;
        for t in &tokens {
            assert!(t.line >= last);
            last = t.line;
        }
    }

    #[test]
    fn stray_open_marker_inside_a_block_comment_does_not_abandon_the_line() {
        // A second `~/` while already inside a block comment doesn't
        // nest; the close search must continue past it on the same line.
        let tokens = lex("~/ x ~/ y /~ z = 1;");
        assert_eq!(tokens[0].kind, TokenKind::BlockCommentOpen);
        assert_eq!(tokens[1].kind, TokenKind::BlockCommentClose);
        assert_eq!(tokens[2].lexeme, "z");
        assert_eq!(tokens[3].kind, TokenKind::Assignment(crate::token::AssignOp::Assign));
    }

    #[test]
    fn unterminated_block_comment_reported_at_eof() {
        let handler = Handler::new();
        let tokens = Lexer::new("~/ never closed").lex(&handler);
        assert!(tokens
            .iter()
            .any(|t| t.kind == TokenKind::BlockCommentOpen));
        assert!(handler.has_errors());
    }

    #[test]
    fn single_line_comment_consumes_rest_of_line() {
        let tokens = lex("int x = 1; ~~ trailing comment");
        assert!(tokens.iter().any(|t| t.kind == TokenKind::LineComment));
        assert_eq!(tokens.last().unwrap().kind, TokenKind::LineComment);
    }

    #[test]
    fn noise_words_are_preserved_in_the_stream() {
        let tokens = lex("for (i from 0 until 10) {}");
        assert!(tokens.iter().any(|t| matches!(t.kind, TokenKind::Noise(_))));
    }

    #[test]
    fn address_of_token_for_input_argument() {
        let tokens = lex("input(\"%d\", &x);");
        assert!(tokens.iter().any(|t| t.kind == TokenKind::AddressOf));
    }

    // ------------------------------------------------------------------------
    // PROPERTY-BASED TESTS
    // ------------------------------------------------------------------------

    #[test]
    fn property_line_numbers_never_decrease() {
        use proptest::prelude::*;

        proptest!(|(lines in prop::collection::vec("[a-z]{1,6}", 1..20))| {
            let source = lines.join(";\n");
            let tokens = lex(&source);
            let mut last = 0;
            for t in &tokens {
                prop_assert!(t.line >= last);
                last = t.line;
            }
        });
    }

    #[test]
    fn property_any_keyword_spelling_is_never_tokenized_as_identifier() {
        use proptest::prelude::*;

        proptest!(|(index in 0usize..crate::keyword::KEYWORD_COUNT_FOR_TESTS)| {
            let word = crate::keyword::nth_keyword_for_tests(index);
            let tokens = lex(&format!("{word} ;"));
            prop_assert_ne!(tokens[0].kind, TokenKind::Identifier);
        });
    }

    #[test]
    fn property_arbitrary_identifier_strings_lex_to_one_token() {
        use proptest::prelude::*;

        proptest!(|(input in "[a-z][a-z0-9_]{0,12}")| {
            prop_assume!(!prismc_util::symbol::Symbol::is_keyword(&input));
            prop_assume!(!prismc_util::symbol::Symbol::is_reserved_word(&input));
            prop_assume!(!prismc_util::symbol::Symbol::is_noise_word(&input));
            let tokens = lex(&input);
            prop_assert_eq!(tokens.len(), 1);
            prop_assert_eq!(tokens[0].kind, TokenKind::Identifier);
        });
    }

    #[test]
    fn property_maximal_munch_prefers_the_longest_assign_operator() {
        use proptest::prelude::*;

        let candidates = ["//=", "//", "/", "+=", "+", "==", "="];
        proptest!(|(index in 0usize..candidates.len())| {
            let op = candidates[index];
            let tokens = lex(&format!("a {op} b;"));
            prop_assert_eq!(tokens[1].lexeme.as_str(), op);
        });
    }
}
