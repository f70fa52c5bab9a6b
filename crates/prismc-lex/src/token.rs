//! The token model: a closed kind enumeration plus the `{kind, lexeme, line}`
//! value record both stages agree on.
//!
//! Internal code matches on [`TokenKind`] variants, never on strings; the
//! human-readable names (used by the symbol-table file and by diagnostics)
//! are produced only at the file boundary via [`TokenKind::category_name`].

use std::fmt;

use prismc_util::Symbol;

/// One of the three bracket pairs, or one of the nine single-character
/// delimiters listed in the glossary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Delimiter {
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Semicolon,
    Colon,
    SingleQuote,
    DoubleQuote,
}

impl Delimiter {
    pub fn from_byte(b: u8) -> Option<Self> {
        Some(match b {
            b'(' => Self::LParen,
            b')' => Self::RParen,
            b'{' => Self::LBrace,
            b'}' => Self::RBrace,
            b'[' => Self::LBracket,
            b']' => Self::RBracket,
            b',' => Self::Comma,
            b'.' => Self::Dot,
            b';' => Self::Semicolon,
            b':' => Self::Colon,
            b'\'' => Self::SingleQuote,
            b'"' => Self::DoubleQuote,
            _ => return None,
        })
    }

    fn name(self) -> &'static str {
        match self {
            Self::LParen => "Left Parenthesis",
            Self::RParen => "Right Parenthesis",
            Self::LBrace => "Left Brace",
            Self::RBrace => "Right Brace",
            Self::LBracket => "Left Bracket",
            Self::RBracket => "Right Bracket",
            Self::Comma => "Comma",
            Self::Dot => "Dot",
            Self::Semicolon => "Semicolon",
            Self::Colon => "Colon",
            Self::SingleQuote => "Single Quote",
            Self::DoubleQuote => "Double Quote",
        }
    }
}

/// `+ - * / % ^ //` - arithmetic binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    IntDiv,
}

impl ArithmeticOp {
    fn name(self) -> &'static str {
        match self {
            Self::Add => "Addition",
            Self::Sub => "Subtraction",
            Self::Mul => "Multiplication",
            Self::Div => "Division",
            Self::Mod => "Modulo",
            Self::Pow => "Exponentiation",
            Self::IntDiv => "Integer Division",
        }
    }
}

/// `= += -= *= /= %= //= ~=` - assignment operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    IntDivAssign,
    ConcatAssign,
}

impl AssignOp {
    fn name(self) -> &'static str {
        match self {
            Self::Assign => "Simple",
            Self::AddAssign => "Addition",
            Self::SubAssign => "Subtraction",
            Self::MulAssign => "Multiplication",
            Self::DivAssign => "Division",
            Self::ModAssign => "Modulo",
            Self::IntDivAssign => "Integer Division",
            Self::ConcatAssign => "Concatenation",
        }
    }
}

/// `== != > < >= <=` - relational operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelationalOp {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

impl RelationalOp {
    fn name(self) -> &'static str {
        match self {
            Self::Eq => "Equal To",
            Self::Ne => "Not Equal To",
            Self::Gt => "Greater Than",
            Self::Lt => "Less Than",
            Self::Ge => "Greater Or Equal",
            Self::Le => "Less Or Equal",
        }
    }
}

/// `! && ||` - logical operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    Not,
    And,
    Or,
}

impl LogicalOp {
    fn name(self) -> &'static str {
        match self {
            Self::Not => "Not",
            Self::And => "And",
            Self::Or => "Or",
        }
    }
}

/// `++ --` - prefix/postfix step operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepOp {
    Increment,
    Decrement,
}

impl StepOp {
    fn name(self) -> &'static str {
        match self {
            Self::Increment => "Increment",
            Self::Decrement => "Decrement",
        }
    }
}

/// The lexical half of the error taxonomy.
///
/// Each variant also produces a token of kind [`TokenKind::LexicalError`];
/// the lexer never stops on these, it emits the token and resumes scanning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LexErrorKind {
    InvalidIdentifier,
    InvalidInteger,
    InvalidFloat,
    InvalidCharLiteral,
    UnterminatedString,
    UnterminatedBlockComment,
    UnknownOperator,
}

impl LexErrorKind {
    fn name(self) -> &'static str {
        match self {
            Self::InvalidIdentifier => "Invalid Identifier",
            Self::InvalidInteger => "Invalid Integer",
            Self::InvalidFloat => "Invalid Float",
            Self::InvalidCharLiteral => "Invalid Character Literal",
            Self::UnterminatedString => "Unterminated String",
            Self::UnterminatedBlockComment => "Unterminated Block Comment",
            Self::UnknownOperator => "Unknown Operator",
        }
    }
}

/// The closed token-kind enumeration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Keyword(Symbol),
    Identifier,
    IntegerLiteral,
    FloatLiteral,
    CharLiteral,
    StringLiteral,
    /// `true false null const` - tagged distinctly from the keyword set,
    /// reached only when the keyword recognizer rejects the lexeme first
    /// (see DESIGN.md for why `true`/`false` never actually land here).
    Reserved(Symbol),
    /// `by from until` - preserved in the stream, skipped by the parser.
    Noise(Symbol),
    Delimiter(Delimiter),
    Arithmetic(ArithmeticOp),
    Assignment(AssignOp),
    Relational(RelationalOp),
    Logical(LogicalOp),
    Step(StepOp),
    /// Bare `&`, the address-of marker preceding a `SpecifierIdentifier`
    /// (glossary; grammar.input-list / primary). The operator table in
    /// the maximal-munch operator table only defines `&&` and treats a lone `&` as unknown,
    /// but the grammar requires `&` as its own token — see DESIGN.md.
    AddressOf,
    LineComment,
    BlockCommentOpen,
    BlockCommentClose,
    LexicalError(LexErrorKind),
}

impl TokenKind {
    /// The human-readable category name written to the symbol-table file.
    pub fn category_name(&self) -> String {
        match self {
            Self::Keyword(_) => "Keyword".to_string(),
            Self::Identifier => "Identifier".to_string(),
            Self::IntegerLiteral => "Integer Literal".to_string(),
            Self::FloatLiteral => "Float Literal".to_string(),
            Self::CharLiteral => "Character Literal".to_string(),
            Self::StringLiteral => "String Literal".to_string(),
            Self::Reserved(_) => "Reserved Word".to_string(),
            Self::Noise(_) => "Noise Word".to_string(),
            Self::Delimiter(d) => format!("Delimiter ({})", d.name()),
            Self::Arithmetic(op) => format!("Arithmetic Operator ({})", op.name()),
            Self::Assignment(op) => format!("Assignment Operator ({})", op.name()),
            Self::Relational(op) => format!("Relational Operator ({})", op.name()),
            Self::Logical(op) => format!("Logical Operator ({})", op.name()),
            Self::Step(op) => format!("Unary Operator ({})", op.name()),
            Self::AddressOf => "Address-Of Operator".to_string(),
            Self::LineComment => "Single-Line Comment".to_string(),
            Self::BlockCommentOpen => "Block Comment Open".to_string(),
            Self::BlockCommentClose => "Block Comment Close".to_string(),
            Self::LexicalError(k) => format!("Lexical Error ({})", k.name()),
        }
    }

    /// True for the three kinds the parser skips without consuming as
    /// grammar symbols (noise words and the two comment forms).
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            Self::Noise(_) | Self::LineComment | Self::BlockCommentOpen | Self::BlockCommentClose
        )
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::LexicalError(_))
    }

    /// Reconstructs a `TokenKind` from a symbol-table record's `category`
    /// and `lexeme` fields (the symbol-table file format) — the inverse of
    /// [`TokenKind::category_name`] at the file boundary. Strings are
    /// mapped to and from the enum only at that boundary, to avoid
    /// fragile string comparisons in hot paths; this is the one place
    /// that string-matches a category name. Once a
    /// `Vec<Token>` is back in memory every other comparison in this
    /// crate and `prismc-par` is a plain enum match again.
    ///
    /// Operator and delimiter variants are recovered from `lexeme`
    /// itself (the exact spelling the lexer matched) rather than by
    /// re-parsing the parenthesized operator name out of `category`;
    /// `category` only disambiguates which family a lexeme belongs to.
    pub fn from_category_and_lexeme(category: &str, lexeme: &str) -> Option<TokenKind> {
        match category {
            "Keyword" => return Some(Self::Keyword(Symbol::intern_known(lexeme))),
            "Identifier" => return Some(Self::Identifier),
            "Integer Literal" => return Some(Self::IntegerLiteral),
            "Float Literal" => return Some(Self::FloatLiteral),
            "Character Literal" => return Some(Self::CharLiteral),
            "String Literal" => return Some(Self::StringLiteral),
            "Reserved Word" => return Some(Self::Reserved(Symbol::intern_known(lexeme))),
            "Noise Word" => return Some(Self::Noise(Symbol::intern_known(lexeme))),
            "Address-Of Operator" => return Some(Self::AddressOf),
            "Single-Line Comment" => return Some(Self::LineComment),
            "Block Comment Open" => return Some(Self::BlockCommentOpen),
            "Block Comment Close" => return Some(Self::BlockCommentClose),
            _ => {}
        }
        if category.starts_with("Delimiter") && lexeme.len() == 1 {
            return Delimiter::from_byte(lexeme.as_bytes()[0]).map(Self::Delimiter);
        }
        if category.starts_with("Arithmetic Operator") {
            return arithmetic_op_from_lexeme(lexeme).map(Self::Arithmetic);
        }
        if category.starts_with("Assignment Operator") {
            return assign_op_from_lexeme(lexeme).map(Self::Assignment);
        }
        if category.starts_with("Relational Operator") {
            return relational_op_from_lexeme(lexeme).map(Self::Relational);
        }
        if category.starts_with("Logical Operator") {
            return logical_op_from_lexeme(lexeme).map(Self::Logical);
        }
        if category.starts_with("Unary Operator") {
            return step_op_from_lexeme(lexeme).map(Self::Step);
        }
        if let Some(name) = category.strip_prefix("Lexical Error (").and_then(|s| s.strip_suffix(')')) {
            return lex_error_kind_from_name(name).map(Self::LexicalError);
        }
        None
    }
}

fn arithmetic_op_from_lexeme(lexeme: &str) -> Option<ArithmeticOp> {
    Some(match lexeme {
        "+" => ArithmeticOp::Add,
        "-" => ArithmeticOp::Sub,
        "*" => ArithmeticOp::Mul,
        "/" => ArithmeticOp::Div,
        "%" => ArithmeticOp::Mod,
        "^" => ArithmeticOp::Pow,
        "//" => ArithmeticOp::IntDiv,
        _ => return None,
    })
}

fn assign_op_from_lexeme(lexeme: &str) -> Option<AssignOp> {
    Some(match lexeme {
        "=" => AssignOp::Assign,
        "+=" => AssignOp::AddAssign,
        "-=" => AssignOp::SubAssign,
        "*=" => AssignOp::MulAssign,
        "/=" => AssignOp::DivAssign,
        "%=" => AssignOp::ModAssign,
        "//=" => AssignOp::IntDivAssign,
        "~=" => AssignOp::ConcatAssign,
        _ => return None,
    })
}

fn relational_op_from_lexeme(lexeme: &str) -> Option<RelationalOp> {
    Some(match lexeme {
        "==" => RelationalOp::Eq,
        "!=" => RelationalOp::Ne,
        ">" => RelationalOp::Gt,
        "<" => RelationalOp::Lt,
        ">=" => RelationalOp::Ge,
        "<=" => RelationalOp::Le,
        _ => return None,
    })
}

fn logical_op_from_lexeme(lexeme: &str) -> Option<LogicalOp> {
    Some(match lexeme {
        "!" => LogicalOp::Not,
        "&&" => LogicalOp::And,
        "||" => LogicalOp::Or,
        _ => return None,
    })
}

fn step_op_from_lexeme(lexeme: &str) -> Option<StepOp> {
    Some(match lexeme {
        "++" => StepOp::Increment,
        "--" => StepOp::Decrement,
        _ => return None,
    })
}

fn lex_error_kind_from_name(name: &str) -> Option<LexErrorKind> {
    Some(match name {
        "Invalid Identifier" => LexErrorKind::InvalidIdentifier,
        "Invalid Integer" => LexErrorKind::InvalidInteger,
        "Invalid Float" => LexErrorKind::InvalidFloat,
        "Invalid Character Literal" => LexErrorKind::InvalidCharLiteral,
        "Unterminated String" => LexErrorKind::UnterminatedString,
        "Unterminated Block Comment" => LexErrorKind::UnterminatedBlockComment,
        "Unknown Operator" => LexErrorKind::UnknownOperator,
        _ => return None,
    })
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category_name())
    }
}

/// A single emitted token: `{kind, lexeme, line}`.
///
/// Tokens are immutable once emitted and compare structurally (invariant 1
/// `lexeme` always matches the source substring it came from).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?}) @ line {}", self.kind.category_name(), self.lexeme, self.line)
    }
}
