//! The pipeline proper: source text → lexer → symbol-table file →
//! parser → parse-tree file.
//!
//! The symbol-table file is a genuine handoff, not an in-process
//! shortcut: tokens are written out, the writer is dropped (closing the
//! file before the parser opens it), then reopened and read back into a
//! fresh `Vec<Token>` via [`prismc_lex::TokenKind::from_category_and_lexeme`]
//! before parsing. This is slower than keeping the `Vec<Token>` around,
//! but it is the documented lexer/parser handoff contract, and
//! exercising it here is what gives `from_category_and_lexeme` a reason
//! to exist.

use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use prismc_lex::{sink, Lexer, Token, TokenKind};
use prismc_par::{serializer, Node, Parser};
use prismc_util::Handler;
use tracing::debug;

use crate::error::{DriverError, DriverResult};

/// Which of the two tree dump formats to write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeFormat {
    Indented,
    Parenthesized,
}

impl TreeFormat {
    pub fn render(self, tree: &Node) -> String {
        match self {
            Self::Indented => serializer::to_indented(tree),
            Self::Parenthesized => serializer::to_parenthesized(tree),
        }
    }
}

/// The exit code a run maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitOutcome {
    Success,
    LexOrSyntaxErrors,
    InternalInvariantViolation,
}

impl ExitOutcome {
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::LexOrSyntaxErrors => 1,
            Self::InternalInvariantViolation => 2,
        }
    }
}

pub struct PipelineResult {
    pub outcome: ExitOutcome,
    pub token_count: usize,
    pub tree: Node,
}

/// Runs the whole pipeline against one source file, writing the
/// symbol-table file at `sink_path` and the rendered tree at
/// `tree_path`.
pub fn run(
    source_path: &Path,
    sink_path: &Path,
    tree_path: &Path,
    format: TreeFormat,
) -> DriverResult<PipelineResult> {
    let source = fs::read_to_string(source_path).map_err(|e| DriverError::SourceUnreadable {
        path: source_path.to_path_buf(),
        source: e,
    })?;

    let handler = Handler::new();
    debug!(path = %source_path.display(), "lexing source file");
    let tokens = Lexer::new(&source).lex(&handler);

    write_symbol_table(&tokens, sink_path)?;
    let records = read_symbol_table(sink_path)?;
    let reconstructed = reconstruct_tokens(&records)?;

    let token_count = reconstructed.len();
    debug!(token_count, "parsing token stream");
    let mut parser = Parser::new(reconstructed, &handler);
    let tree = parser.parse();
    let internal_error = parser.had_internal_error();

    let rendered = format.render(&tree);
    fs::write(tree_path, &rendered).map_err(|e| DriverError::TreeUnwritable {
        path: tree_path.to_path_buf(),
        source: e,
    })?;

    let outcome = if internal_error {
        ExitOutcome::InternalInvariantViolation
    } else if handler.has_errors() {
        ExitOutcome::LexOrSyntaxErrors
    } else {
        ExitOutcome::Success
    };

    Ok(PipelineResult {
        outcome,
        token_count,
        tree,
    })
}

fn write_symbol_table(tokens: &[Token], sink_path: &Path) -> DriverResult<()> {
    let file = fs::File::create(sink_path).map_err(|e| DriverError::SinkUnwritable {
        path: sink_path.to_path_buf(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);
    sink::write_all(&mut writer, tokens).map_err(|e| DriverError::SinkCorrupt {
        path: sink_path.to_path_buf(),
        source: e,
    })
}

fn read_symbol_table(sink_path: &Path) -> DriverResult<Vec<sink::SinkRecord>> {
    let file = fs::File::open(sink_path).map_err(|e| DriverError::SinkUnreadable {
        path: sink_path.to_path_buf(),
        source: e,
    })?;
    let reader = BufReader::new(file);
    sink::read_all(reader).map_err(|e| DriverError::SinkCorrupt {
        path: sink_path.to_path_buf(),
        source: e,
    })
}

fn reconstruct_tokens(records: &[sink::SinkRecord]) -> DriverResult<Vec<Token>> {
    records
        .iter()
        .map(|record| {
            TokenKind::from_category_and_lexeme(&record.category, &record.lexeme)
                .map(|kind| Token::new(kind, record.lexeme.clone(), record.line))
                .ok_or_else(|| DriverError::UnrecognizedRecord {
                    category: record.category.clone(),
                    lexeme: record.lexeme.clone(),
                })
        })
        .collect()
}

/// Derives the parse-tree file's path from the symbol-table path: same
/// directory, `<stem>_tree.prsm`. The tree file's name is
/// implementation-defined, so it is named relative to wherever the
/// caller pointed the symbol-table file.
pub fn tree_path_for(sink_path: &Path) -> PathBuf {
    let stem = sink_path.file_stem().and_then(|s| s.to_str()).unwrap_or("parse");
    sink_path.with_file_name(format!("{stem}_tree.prsm"))
}
