//! The operator-precedence expression grammar, low to high:
//! `assignment-expr`, `logical-or`, `logical-and`, `equality`,
//! `relational`, `additive`, `multiplicative`, `exponential`, `unary`,
//! `postfix`, `primary`.
//!
//! All binary operators except exponentiation are left-associative;
//! exponentiation is right-associative; assignment is right-associative.
//! Every left-associative level follows the same shape: parse the next
//! tighter level, then loop consuming same-level operators and folding
//! left — `left = Node(label, [left, op, right])`. A level that never
//! matches its operator collapses to its single operand with no
//! wrapping node, which is what keeps e.g. `EqualityExpr[Identifier(x),
//! ==, IntegerLiteral(1)]` from growing a chain of pass-through wrapper
//! nodes around expressions with no `==` in them at all.
//!
//! `+`/`-` are lexed uniformly as binary operators rather than attempting
//! a lexical "Unary Operator (Positive/Negative)" distinction (see
//! `prismc_lex`'s token model); `unary` is the only place a prefix `-`
//! (or `!`, `++`, `--`) is recognized, resolving `a - b` vs. `-b` entirely
//! in the parser.

use prismc_lex::{ArithmeticOp, AssignOp, Delimiter, LogicalOp, RelationalOp, StepOp, TokenKind};

use crate::tree::Node;
use crate::Parser;

fn leaf_for(tok: prismc_lex::Token) -> Node {
    Node::leaf(tok.kind.category_name(), tok.lexeme)
}

impl<'h> Parser<'h> {
    pub(crate) fn parse_expression(&mut self) -> Node {
        self.parse_assignment_expr()
    }

    /// `assignment-expr := logical-or (assign-op assignment-expr)?` —
    /// right-associative: the RHS recurses into `assignment-expr`
    /// itself, not `logical-or`, so `a = b = 1` nests as `a = (b = 1)`.
    fn parse_assignment_expr(&mut self) -> Node {
        let left = self.parse_logical_or();
        if let Some(TokenKind::Assignment(_)) = self.peek_kind() {
            let op = self.next().unwrap();
            let right = self.parse_assignment_expr();
            return Node::node("AssignmentExpr", vec![left, leaf_for(op), right]);
        }
        left
    }

    fn parse_logical_or(&mut self) -> Node {
        let mut left = self.parse_logical_and();
        while matches!(self.peek_kind(), Some(TokenKind::Logical(LogicalOp::Or))) {
            let op = self.next().unwrap();
            let right = self.parse_logical_and();
            left = Node::node("LogicalOrExpr", vec![left, leaf_for(op), right]);
        }
        left
    }

    fn parse_logical_and(&mut self) -> Node {
        let mut left = self.parse_equality();
        while matches!(self.peek_kind(), Some(TokenKind::Logical(LogicalOp::And))) {
            let op = self.next().unwrap();
            let right = self.parse_equality();
            left = Node::node("LogicalAndExpr", vec![left, leaf_for(op), right]);
        }
        left
    }

    fn parse_equality(&mut self) -> Node {
        let mut left = self.parse_relational();
        loop {
            match self.peek_kind() {
                Some(TokenKind::Relational(RelationalOp::Eq | RelationalOp::Ne)) => {
                    let op = self.next().unwrap();
                    let right = self.parse_relational();
                    left = Node::node("EqualityExpr", vec![left, leaf_for(op), right]);
                }
                _ => break,
            }
        }
        left
    }

    fn parse_relational(&mut self) -> Node {
        let mut left = self.parse_additive();
        loop {
            match self.peek_kind() {
                Some(TokenKind::Relational(
                    RelationalOp::Lt | RelationalOp::Gt | RelationalOp::Le | RelationalOp::Ge,
                )) => {
                    let op = self.next().unwrap();
                    let right = self.parse_additive();
                    left = Node::node("RelationalExpr", vec![left, leaf_for(op), right]);
                }
                _ => break,
            }
        }
        left
    }

    fn parse_additive(&mut self) -> Node {
        let mut left = self.parse_multiplicative();
        loop {
            match self.peek_kind() {
                Some(TokenKind::Arithmetic(ArithmeticOp::Add | ArithmeticOp::Sub)) => {
                    let op = self.next().unwrap();
                    let right = self.parse_multiplicative();
                    left = Node::node("AdditiveExpr", vec![left, leaf_for(op), right]);
                }
                _ => break,
            }
        }
        left
    }

    fn parse_multiplicative(&mut self) -> Node {
        let mut left = self.parse_exponential();
        loop {
            match self.peek_kind() {
                Some(TokenKind::Arithmetic(
                    ArithmeticOp::Mul | ArithmeticOp::Div | ArithmeticOp::Mod | ArithmeticOp::IntDiv,
                )) => {
                    let op = self.next().unwrap();
                    let right = self.parse_exponential();
                    left = Node::node("MultiplicativeExpr", vec![left, leaf_for(op), right]);
                }
                _ => break,
            }
        }
        left
    }

    /// Right-associative: `^` recurses into itself for the RHS, so `a ^
    /// b ^ c` nests as `a ^ (b ^ c)`.
    fn parse_exponential(&mut self) -> Node {
        let left = self.parse_unary();
        if matches!(self.peek_kind(), Some(TokenKind::Arithmetic(ArithmeticOp::Pow))) {
            let op = self.next().unwrap();
            let right = self.parse_exponential();
            return Node::node("ExponentialExpr", vec![left, leaf_for(op), right]);
        }
        left
    }

    /// `unary := ("!"|"-"|"++"|"--") unary | postfix`.
    fn parse_unary(&mut self) -> Node {
        let is_prefix = matches!(
            self.peek_kind(),
            Some(TokenKind::Logical(LogicalOp::Not))
                | Some(TokenKind::Arithmetic(ArithmeticOp::Sub))
                | Some(TokenKind::Step(StepOp::Increment))
                | Some(TokenKind::Step(StepOp::Decrement))
        );
        if is_prefix {
            let op = self.next().unwrap();
            let operand = self.parse_unary();
            return Node::node("UnaryExpr", vec![leaf_for(op), operand]);
        }
        self.parse_postfix()
    }

    /// `postfix := primary (call-suffix | "++" | "--" | index-suffix)*`.
    fn parse_postfix(&mut self) -> Node {
        let mut node = self.parse_primary();
        loop {
            match self.peek_kind() {
                Some(TokenKind::Delimiter(Delimiter::LParen)) => {
                    node = self.parse_call_suffix(node);
                }
                Some(TokenKind::Delimiter(Delimiter::LBracket)) => {
                    node = self.parse_index_suffix(node);
                }
                Some(TokenKind::Step(StepOp::Increment)) => {
                    let op = self.next().unwrap();
                    node = Node::node("PostIncrementExpr", vec![node, leaf_for(op)]);
                }
                Some(TokenKind::Step(StepOp::Decrement)) => {
                    let op = self.next().unwrap();
                    node = Node::node("PostDecrementExpr", vec![node, leaf_for(op)]);
                }
                _ => break,
            }
        }
        node
    }

    /// `"(" arg-list? ")"` applied to an already-parsed callee expression.
    fn parse_call_suffix(&mut self, callee: Node) -> Node {
        let lparen = self.expect_delim(Delimiter::LParen, "`(`");
        let mut children = vec![callee, lparen];
        if !matches!(self.peek_kind(), Some(TokenKind::Delimiter(Delimiter::RParen))) {
            children.push(self.parse_expression());
            while matches!(self.peek_kind(), Some(TokenKind::Delimiter(Delimiter::Comma))) {
                children.push(self.expect_delim(Delimiter::Comma, "`,`"));
                children.push(self.parse_expression());
            }
        }
        children.push(self.expect_delim(Delimiter::RParen, "`)`"));
        Node::node("CallExpr", children)
    }

    /// `"[" expression "]"` applied to an already-parsed target.
    fn parse_index_suffix(&mut self, target: Node) -> Node {
        let lbracket = self.expect_delim(Delimiter::LBracket, "`[`");
        let index = self.parse_expression();
        let rbracket = self.expect_delim(Delimiter::RBracket, "`]`");
        Node::node("IndexExpr", vec![target, lbracket, index, rbracket])
    }

    /// `primary := literal | IDENT | "&" IDENT | "(" expression ")"`.
    fn parse_primary(&mut self) -> Node {
        match self.peek_kind() {
            Some(
                TokenKind::IntegerLiteral
                | TokenKind::FloatLiteral
                | TokenKind::CharLiteral
                | TokenKind::StringLiteral
                | TokenKind::Identifier
                | TokenKind::Reserved(_),
            ) => leaf_for(self.next().unwrap()),
            Some(TokenKind::Keyword(sym))
                if sym == prismc_util::symbol::KW_TRUE || sym == prismc_util::symbol::KW_FALSE =>
            {
                leaf_for(self.next().unwrap())
            }
            Some(TokenKind::AddressOf) => {
                let amp = self.next().unwrap();
                let ident = self.expect_name();
                Node::node("SpecifierIdentifier", vec![leaf_for(amp), ident])
            }
            Some(TokenKind::Delimiter(Delimiter::LParen)) => {
                let lparen = self.next().unwrap();
                let inner = self.parse_expression();
                let rparen = self.expect_delim(Delimiter::RParen, "`)`");
                Node::node("ParenExpr", vec![leaf_for(lparen), inner, rparen])
            }
            _ => {
                self.report_expected("an expression");
                self.synchronize();
                Node::leaf("Error", "")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use prismc_lex::Lexer;
    use prismc_util::Handler;

    fn parse_first_statement(source: &str) -> Node {
        let handler = Handler::new();
        let tokens = Lexer::new(source).lex(&handler);
        let program = parse(tokens, &handler);
        assert!(!handler.has_errors(), "unexpected errors parsing {source:?}");
        program.children.into_iter().next().expect("one statement")
    }

    fn parse_expr_stmt(source: &str) -> Node {
        let stmt = parse_first_statement(source);
        assert_eq!(stmt.label, "ExpressionStatement");
        stmt.children.into_iter().next().expect("the expression")
    }

    #[test]
    fn exponentiation_is_right_associative() {
        // a ^ b ^ c  =>  a ^ (b ^ c)
        let expr = parse_expr_stmt("a ^ b ^ c;");
        assert_eq!(expr.label, "ExponentialExpr");
        let rhs = &expr.children[2];
        assert_eq!(rhs.label, "ExponentialExpr");
    }

    #[test]
    fn additive_is_left_associative() {
        // a - b - c  =>  (a - b) - c
        let expr = parse_expr_stmt("a - b - c;");
        assert_eq!(expr.label, "AdditiveExpr");
        let lhs = &expr.children[0];
        assert_eq!(lhs.label, "AdditiveExpr");
    }

    #[test]
    fn unary_minus_binds_tighter_than_exponent() {
        let expr = parse_expr_stmt("-a ^ b;");
        assert_eq!(expr.label, "ExponentialExpr");
        assert_eq!(expr.children[0].label, "UnaryExpr");
    }

    #[test]
    fn assignment_expression_is_right_associative() {
        // `a = b = 1;` parses as the dedicated `assign` statement, whose
        // own RHS is a nested `AssignmentExpr` for `b = 1`.
        let stmt = parse_first_statement("a = b = 1;");
        assert_eq!(stmt.label, "AssignmentStatement");
        assert_eq!(stmt.children[2].label, "AssignmentExpr");
    }

    #[test]
    fn plain_identifier_is_not_wrapped_in_precedence_nodes() {
        let expr = parse_expr_stmt("a;");
        assert_eq!(expr.label, "Identifier");
    }

    #[test]
    fn call_expr_as_assignment_rhs() {
        // A bare `IDENT(...)`  statement is the dedicated `function-call`
        // production (see stmt.rs); exercise `CallExpr` from inside an
        // expression position instead.
        let stmt = parse_first_statement("x = add(1, 2);");
        assert_eq!(stmt.label, "AssignmentStatement");
        let call = &stmt.children[2];
        assert_eq!(call.label, "CallExpr");
        assert_eq!(call.children[0].label, "Identifier");
    }

    #[test]
    fn index_expression_statement() {
        let expr = parse_expr_stmt("a[0];");
        assert_eq!(expr.label, "IndexExpr");
    }
}
