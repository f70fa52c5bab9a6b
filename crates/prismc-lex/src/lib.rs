//! prismc-lex - lexical analysis for `.prsm` source text.
//!
//! Stage one of the two-stage front end: scans source text line by line
//! and emits a stream of classified [`Token`]s. Each file owns one FSM
//! state or one supporting concern, with [`lexer::core::Lexer`] as the
//! single driver that dispatches between them.
//!
//! - [`classify`] - pure single-byte predicates
//! - [`keyword`] - the keyword trie
//! - [`lexer`] - the line-oriented FSM itself, split into
//!   `identifier`/`number`/`string`/`operator`/`comment` sub-scanners
//! - [`token`] - the closed [`TokenKind`] enumeration and [`Token`] record
//! - [`sink`] - the symbol-table file codec

pub mod classify;
pub mod keyword;
mod lexer;
pub mod sink;
pub mod token;

pub use lexer::Lexer;
pub use token::{
    ArithmeticOp, AssignOp, Delimiter, LexErrorKind, LogicalOp, RelationalOp, StepOp, Token, TokenKind,
};
