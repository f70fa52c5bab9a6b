//! Driver-level error type, kept distinct from the token-carried
//! lexical/syntax errors a `Handler` collects.
//!
//! Every variant here corresponds to a way the pipeline can fail before
//! or between stages: before the lexer ever runs (bad directory, no
//! `.prsm` files, out-of-range selection) or between stages (the
//! symbol-table file the lexer just closed won't reopen for the
//! parser). All of them map to exit code `1` at the `main` boundary.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("directory does not exist or is not readable: {0:?}")]
    DirectoryUnreadable(PathBuf, #[source] std::io::Error),

    #[error("no .prsm files found in {0:?}")]
    NoSourceFiles(PathBuf),

    #[error("selection index {index} is out of range (found {count} file(s))")]
    SelectionOutOfRange { index: usize, count: usize },

    #[error("failed to read selection from standard input")]
    SelectionReadFailed(#[source] std::io::Error),

    #[error("could not parse {0:?} as a file index")]
    SelectionNotANumber(String),

    #[error("failed to read source file {path:?}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create or truncate symbol-table file {path:?}")]
    SinkUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to reopen symbol-table file {path:?} for the parser")]
    SinkUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed symbol-table record in {path:?}")]
    SinkCorrupt {
        path: PathBuf,
        #[source]
        source: prismc_lex::sink::SinkError,
    },

    #[error("symbol-table record has a category/lexeme pair this build doesn't recognize: {category:?}, {lexeme:?}")]
    UnrecognizedRecord { category: String, lexeme: String },

    #[error("failed to write parse-tree file {path:?}")]
    TreeUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type DriverResult<T> = std::result::Result<T, DriverError>;
