//! The statement grammar: blocks, declarations, control flow, I/O
//! statements, function declarations/calls, and the `comment`
//! statement alternative.
//!
//! `parse_statement` is the dispatcher [`crate::Parser::parse_statements_until`]
//! drives; every other function here is a single grammar production, one
//! function per rule, mirroring [`crate::expr`]'s layout.

use prismc_lex::{AssignOp, Delimiter, TokenKind};
use prismc_util::symbol::{KW_DO, KW_ELSE, KW_FOR, KW_IF, KW_INPUT, KW_PRINTF, KW_RETURN, KW_WHILE};
use prismc_util::symbol::{KW_ARRAY, KW_BOOL, KW_CHAR, KW_FLOAT, KW_INT, KW_STRING, KW_VOID};
use prismc_util::Symbol;

use crate::tree::Node;
use crate::Parser;

/// Keywords that introduce a `decl` or `function-decl` (the grammar's
/// `type` terminal). The closed keyword set also carries `switch`/`case`/
/// `default`/`break`/`continue`/`goto`, but no statement production wires
/// them up; see DESIGN.md.
const TYPE_KEYWORDS: &[Symbol] = &[KW_INT, KW_FLOAT, KW_CHAR, KW_STRING, KW_BOOL, KW_ARRAY, KW_VOID];

impl<'h> Parser<'h> {
    /// `statement := if | while | do-while | for | input | output | decl
    /// | assign | function-decl | function-call | block | expr-stmt |
    /// comment`.
    pub(crate) fn parse_statement(&mut self) -> Node {
        match self.peek_kind() {
            Some(TokenKind::Keyword(sym)) if sym == KW_IF => self.parse_if(),
            Some(TokenKind::Keyword(sym)) if sym == KW_WHILE => self.parse_while(),
            Some(TokenKind::Keyword(sym)) if sym == KW_DO => self.parse_do_while(),
            Some(TokenKind::Keyword(sym)) if sym == KW_FOR => self.parse_for(),
            Some(TokenKind::Keyword(sym)) if sym == KW_INPUT => self.parse_input(),
            Some(TokenKind::Keyword(sym)) if sym == KW_PRINTF => self.parse_output(),
            Some(TokenKind::Keyword(sym)) if sym == KW_RETURN => self.parse_return(),
            Some(TokenKind::Keyword(sym)) if TYPE_KEYWORDS.contains(&sym) => self.parse_decl_or_function_decl(),
            Some(TokenKind::Delimiter(Delimiter::LBrace)) => self.parse_block(),
            Some(TokenKind::LineComment) | Some(TokenKind::BlockCommentOpen) | Some(TokenKind::BlockCommentClose) => {
                self.parse_comment()
            }
            Some(TokenKind::Identifier) => self.parse_identifier_led_statement(),
            Some(TokenKind::Keyword(sym)) if sym == prismc_util::symbol::KW_MAIN => {
                self.parse_identifier_led_statement()
            }
            _ => self.parse_expr_stmt(),
        }
    }

    /// `IDENT` at statement start is `assign`, `function-call`, or a bare
    /// `expr-stmt` depending on what follows — the grammar is ambiguous on
    /// one token of lookahead here, so this uses [`Parser::peek_at`] to
    /// look one token past the identifier (see DESIGN.md).
    fn parse_identifier_led_statement(&mut self) -> Node {
        match self.peek_at(1).map(|t| t.kind) {
            Some(TokenKind::Assignment(_)) => self.parse_assign(),
            Some(TokenKind::Delimiter(Delimiter::LParen)) => self.parse_function_call_stmt(),
            _ => self.parse_expr_stmt(),
        }
    }

    /// `block := "{" statement* "}"`.
    pub(crate) fn parse_block(&mut self) -> Node {
        let lbrace = self.expect_delim(Delimiter::LBrace, "`{`");
        let mut children = vec![lbrace];
        children.extend(self.parse_statements_until(|t| matches!(t.kind, TokenKind::Delimiter(Delimiter::RBrace))));
        children.push(self.expect_delim(Delimiter::RBrace, "`}`"));
        Node::node("Block", children)
    }

    /// `comment` statement alternative. A single-line comment is one
    /// token; a block comment is an open/close pair with no tokens for
    /// the text between.
    fn parse_comment(&mut self) -> Node {
        match self.peek_kind() {
            Some(TokenKind::LineComment) => {
                let tok = self.consume_as_leaf();
                Node::node("Comment", vec![tok])
            }
            Some(TokenKind::BlockCommentOpen) => {
                let open = self.consume_as_leaf();
                let close = if matches!(self.peek_kind(), Some(TokenKind::BlockCommentClose)) {
                    self.consume_as_leaf()
                } else {
                    self.report_expected("a closing `/~`");
                    self.synchronize();
                    Node::leaf("Error", "")
                };
                Node::node("Comment", vec![open, close])
            }
            _ => Node::node("Comment", vec![self.consume_as_leaf()]),
        }
    }

    /// `if := "if" "(" expression ")" block ("else" (if | block))?`.
    fn parse_if(&mut self) -> Node {
        let kw = self.expect_keyword(KW_IF, "if");
        let lparen = self.expect_delim(Delimiter::LParen, "`(`");
        let cond = self.parse_expression();
        let rparen = self.expect_delim(Delimiter::RParen, "`)`");
        let then_block = self.parse_block();
        let mut children = vec![kw, lparen, cond, rparen, then_block];
        if matches!(self.peek_kind(), Some(TokenKind::Keyword(sym)) if sym == KW_ELSE) {
            children.push(self.expect_keyword(KW_ELSE, "else"));
            let else_branch = if matches!(self.peek_kind(), Some(TokenKind::Keyword(sym)) if sym == KW_IF) {
                self.parse_if()
            } else {
                self.parse_block()
            };
            children.push(else_branch);
        }
        Node::node("IfStatement", children)
    }

    /// `while := "while" "(" expression ")" block`.
    fn parse_while(&mut self) -> Node {
        let kw = self.expect_keyword(KW_WHILE, "while");
        let lparen = self.expect_delim(Delimiter::LParen, "`(`");
        let cond = self.parse_expression();
        let rparen = self.expect_delim(Delimiter::RParen, "`)`");
        let body = self.parse_block();
        Node::node("WhileStatement", vec![kw, lparen, cond, rparen, body])
    }

    /// `do-while := "do" block "while" "(" expression ")" ";"`.
    fn parse_do_while(&mut self) -> Node {
        let do_kw = self.expect_keyword(KW_DO, "do");
        let body = self.parse_block();
        let while_kw = self.expect_keyword(KW_WHILE, "while");
        let lparen = self.expect_delim(Delimiter::LParen, "`(`");
        let cond = self.parse_expression();
        let rparen = self.expect_delim(Delimiter::RParen, "`)`");
        let semi = self.expect_delim(Delimiter::Semicolon, "`;`");
        Node::node("DoWhileStatement", vec![do_kw, body, while_kw, lparen, cond, rparen, semi])
    }

    /// `for := "for" "(" for-init ";" expression ";" expression ")" block`.
    fn parse_for(&mut self) -> Node {
        let kw = self.expect_keyword(KW_FOR, "for");
        let lparen = self.expect_delim(Delimiter::LParen, "`(`");
        let init = self.parse_for_init();
        let semi1 = self.expect_delim(Delimiter::Semicolon, "`;`");
        let cond = self.parse_expression();
        let semi2 = self.expect_delim(Delimiter::Semicolon, "`;`");
        let update = self.parse_expression();
        let rparen = self.expect_delim(Delimiter::RParen, "`)`");
        let body = self.parse_block();
        Node::node(
            "ForStatement",
            vec![kw, lparen, init, semi1, cond, semi2, update, rparen, body],
        )
    }

    /// `for-init := decl-no-semi | assign-no-semi | empty`.
    fn parse_for_init(&mut self) -> Node {
        match self.peek_kind() {
            Some(TokenKind::Delimiter(Delimiter::Semicolon)) => Node::empty("Empty"),
            Some(TokenKind::Keyword(sym)) if TYPE_KEYWORDS.contains(&sym) => self.parse_decl_body(false),
            Some(TokenKind::Identifier) => self.parse_assign_body(false),
            Some(TokenKind::Keyword(sym)) if sym == prismc_util::symbol::KW_MAIN => self.parse_assign_body(false),
            _ => Node::empty("Empty"),
        }
    }

    /// `decl := type declarator ("," declarator)* ";"`, entered only once
    /// a caller (here, `for-init`) already knows the current token is a
    /// type keyword.
    fn parse_decl_body(&mut self, consume_semi: bool) -> Node {
        let type_kw = self.consume_as_leaf();
        let mut children = vec![type_kw, self.parse_declarator()];
        while matches!(self.peek_kind(), Some(TokenKind::Delimiter(Delimiter::Comma))) {
            children.push(self.expect_delim(Delimiter::Comma, "`,`"));
            children.push(self.parse_declarator());
        }
        if consume_semi {
            children.push(self.expect_delim(Delimiter::Semicolon, "`;`"));
        }
        Node::node("Declaration", children)
    }

    /// `declarator := IDENT ("=" expression)?`.
    fn parse_declarator(&mut self) -> Node {
        let name = self.expect_name();
        if matches!(self.peek_kind(), Some(TokenKind::Assignment(AssignOp::Assign))) {
            let op = self.consume_as_leaf();
            let expr = self.parse_expression();
            return Node::node("Declarator", vec![name, op, expr]);
        }
        Node::node("Declarator", vec![name])
    }

    /// `assign := IDENT assign-op expression ";"`, entered only once a
    /// caller already knows the current token is an identifier.
    fn parse_assign_body(&mut self, consume_semi: bool) -> Node {
        let name = self.expect_name();
        let op = match self.peek_kind() {
            Some(TokenKind::Assignment(_)) => self.consume_as_leaf(),
            _ => {
                self.report_expected("an assignment operator");
                self.synchronize();
                Node::leaf("Error", "")
            }
        };
        let expr = self.parse_expression();
        let mut children = vec![name, op, expr];
        if consume_semi {
            children.push(self.expect_delim(Delimiter::Semicolon, "`;`"));
        }
        Node::node("AssignmentStatement", children)
    }

    fn parse_assign(&mut self) -> Node {
        self.parse_assign_body(true)
    }

    /// `decl` and `function-decl` share the `type IDENT` prefix; a single
    /// token of lookahead past the name (`(` vs. anything else) picks
    /// between them.
    fn parse_decl_or_function_decl(&mut self) -> Node {
        let type_kw = self.consume_as_leaf();
        let name = self.expect_name();
        if matches!(self.peek_kind(), Some(TokenKind::Delimiter(Delimiter::LParen))) {
            return self.parse_function_decl_tail(type_kw, name);
        }
        let first_declarator = if matches!(self.peek_kind(), Some(TokenKind::Assignment(AssignOp::Assign))) {
            let op = self.consume_as_leaf();
            let expr = self.parse_expression();
            Node::node("Declarator", vec![name, op, expr])
        } else {
            Node::node("Declarator", vec![name])
        };
        let mut children = vec![type_kw, first_declarator];
        while matches!(self.peek_kind(), Some(TokenKind::Delimiter(Delimiter::Comma))) {
            children.push(self.expect_delim(Delimiter::Comma, "`,`"));
            children.push(self.parse_declarator());
        }
        children.push(self.expect_delim(Delimiter::Semicolon, "`;`"));
        Node::node("Declaration", children)
    }

    /// `function-decl := type IDENT "(" param-list? ")" (block | ";")`,
    /// the tail once `type IDENT (` has been confirmed.
    fn parse_function_decl_tail(&mut self, type_kw: Node, name: Node) -> Node {
        let lparen = self.expect_delim(Delimiter::LParen, "`(`");
        let mut children = vec![type_kw, name, lparen];
        if !matches!(self.peek_kind(), Some(TokenKind::Delimiter(Delimiter::RParen))) {
            children.push(self.parse_param_list());
        }
        children.push(self.expect_delim(Delimiter::RParen, "`)`"));
        if matches!(self.peek_kind(), Some(TokenKind::Delimiter(Delimiter::Semicolon))) {
            children.push(self.expect_delim(Delimiter::Semicolon, "`;`"));
        } else {
            children.push(self.parse_block());
        }
        Node::node("FunctionDecl", children)
    }

    fn parse_param_list(&mut self) -> Node {
        let mut children = vec![self.parse_param()];
        while matches!(self.peek_kind(), Some(TokenKind::Delimiter(Delimiter::Comma))) {
            children.push(self.expect_delim(Delimiter::Comma, "`,`"));
            children.push(self.parse_param());
        }
        Node::node("ParamList", children)
    }

    fn parse_param(&mut self) -> Node {
        let type_tok = match self.peek_kind() {
            Some(TokenKind::Keyword(sym)) if TYPE_KEYWORDS.contains(&sym) => self.consume_as_leaf(),
            _ => {
                self.report_expected("a parameter type");
                self.synchronize();
                Node::leaf("Error", "")
            }
        };
        let name = self.expect_name();
        Node::node("Param", vec![type_tok, name])
    }

    /// `function-call := IDENT "(" arg-list? ")" ";"` in statement
    /// position, entered only once a caller already knows the current
    /// token is an identifier followed by `(`.
    fn parse_function_call_stmt(&mut self) -> Node {
        let name = self.expect_name();
        let lparen = self.expect_delim(Delimiter::LParen, "`(`");
        let mut children = vec![name, lparen];
        if !matches!(self.peek_kind(), Some(TokenKind::Delimiter(Delimiter::RParen))) {
            children.push(self.parse_arg_list());
        }
        children.push(self.expect_delim(Delimiter::RParen, "`)`"));
        children.push(self.expect_delim(Delimiter::Semicolon, "`;`"));
        Node::node("FunctionCallStatement", children)
    }

    fn parse_arg_list(&mut self) -> Node {
        let mut children = vec![self.parse_expression()];
        while matches!(self.peek_kind(), Some(TokenKind::Delimiter(Delimiter::Comma))) {
            children.push(self.expect_delim(Delimiter::Comma, "`,`"));
            children.push(self.parse_expression());
        }
        Node::node("ArgList", children)
    }

    /// `input := "input" "(" input-list? ")" ";"`.
    fn parse_input(&mut self) -> Node {
        let kw = self.expect_keyword(KW_INPUT, "input");
        let lparen = self.expect_delim(Delimiter::LParen, "`(`");
        let mut children = vec![kw, lparen];
        if !matches!(self.peek_kind(), Some(TokenKind::Delimiter(Delimiter::RParen))) {
            children.push(self.parse_input_list());
        }
        children.push(self.expect_delim(Delimiter::RParen, "`)`"));
        children.push(self.expect_delim(Delimiter::Semicolon, "`;`"));
        Node::node("InputStatement", children)
    }

    /// `input-list := fmt-var-pair ("," fmt-var-pair)*`.
    fn parse_input_list(&mut self) -> Node {
        let mut children = vec![self.parse_fmt_var_pair()];
        while matches!(self.peek_kind(), Some(TokenKind::Delimiter(Delimiter::Comma))) {
            children.push(self.expect_delim(Delimiter::Comma, "`,`"));
            children.push(self.parse_fmt_var_pair());
        }
        Node::node("InputList", children)
    }

    /// `fmt-var-pair := format-string "," "&" IDENT`.
    fn parse_fmt_var_pair(&mut self) -> Node {
        let fmt = self.expect_kind(TokenKind::StringLiteral, "a format string");
        let comma = self.expect_delim(Delimiter::Comma, "`,`");
        let amp = self.expect_kind(TokenKind::AddressOf, "`&`");
        let name = self.expect_name();
        Node::node("FmtVarPair", vec![fmt, comma, amp, name])
    }

    /// `output := "printf" "(" output-list ")" ";"`. Emits exactly one
    /// trailing `;` — see DESIGN.md for the Open Question this resolves.
    fn parse_output(&mut self) -> Node {
        let kw = self.expect_keyword(KW_PRINTF, "printf");
        let lparen = self.expect_delim(Delimiter::LParen, "`(`");
        let list = self.parse_output_list();
        let rparen = self.expect_delim(Delimiter::RParen, "`)`");
        let semi = self.expect_delim(Delimiter::Semicolon, "`;`");
        Node::node("OutputStatement", vec![kw, lparen, list, rparen, semi])
    }

    /// `output-list := format-string ("," expression-list)?`.
    fn parse_output_list(&mut self) -> Node {
        let fmt = self.expect_kind(TokenKind::StringLiteral, "a format string");
        let mut children = vec![fmt];
        while matches!(self.peek_kind(), Some(TokenKind::Delimiter(Delimiter::Comma))) {
            children.push(self.expect_delim(Delimiter::Comma, "`,`"));
            children.push(self.parse_expression());
        }
        Node::node("OutputList", children)
    }

    /// `return := "return" expression? ";"` — the source left `return`
    /// partially wired with no production; this implementation commits
    /// to the optional-expression reading (see DESIGN.md).
    fn parse_return(&mut self) -> Node {
        let kw = self.expect_keyword(KW_RETURN, "return");
        let mut children = vec![kw];
        if !matches!(self.peek_kind(), Some(TokenKind::Delimiter(Delimiter::Semicolon))) {
            children.push(self.parse_expression());
        }
        children.push(self.expect_delim(Delimiter::Semicolon, "`;`"));
        Node::node("ReturnStatement", children)
    }

    /// `expr-stmt := expression ";"`, the fallback for any statement that
    /// does not match a more specific production.
    fn parse_expr_stmt(&mut self) -> Node {
        let expr = self.parse_expression();
        let semi = self.expect_delim(Delimiter::Semicolon, "`;`");
        Node::node("ExpressionStatement", vec![expr, semi])
    }
}
