//! prismc-drv - the CLI driver binary (`prismc`) wrapping the two-stage
//! `.prsm` front end.
//!
//! The core crates (`prismc-lex`, `prismc-par`) never enumerate
//! directories, prompt a user, or open a file; this crate is the
//! external collaborator that does exactly that. Everything here is
//! ambient-stack work the core doesn't need:
//! directory scanning ([`discover`]), the lex → symbol-table-file →
//! parse → tree-file pipeline ([`pipeline`]), the CLI argument surface
//! ([`Cli`]), and a `thiserror` error taxonomy distinct from the
//! token-carried diagnostics the core produces ([`error`]).

pub mod discover;
pub mod error;
pub mod pipeline;

use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::Parser as ClapParser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub use error::{DriverError, DriverResult};
pub use pipeline::{ExitOutcome, TreeFormat};

/// `prismc` - lex and parse a `.prsm` source file, emitting a
/// symbol-table file and a serialized parse tree.
#[derive(ClapParser, Debug)]
#[command(name = "prismc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan for `.prsm` files (default: current directory).
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Symbol-table output path.
    #[arg(long, default_value = "symbol_table.prsm")]
    pub output: PathBuf,

    /// Parse-tree dump format.
    #[arg(long, value_enum, default_value_t = FormatArg::Indented)]
    pub format: FormatArg,

    /// Raise logging verbosity (repeatable: `-v` = debug, `-vv` = trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Pick the file at this index without prompting (scripted/test use).
    #[arg(long)]
    pub non_interactive: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatArg {
    Indented,
    Parenthesized,
}

impl From<FormatArg> for TreeFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Indented => TreeFormat::Indented,
            FormatArg::Parenthesized => TreeFormat::Parenthesized,
        }
    }
}

/// Initializes `tracing` at a level derived from `-v` repetition count.
pub fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);
    let _ = tracing_subscriber::registry().with(filter).with(subscriber).try_init();
}

/// Runs the full driver flow: scan, select (prompting on `input` if
/// `cli.non_interactive` is unset), then run the pipeline. `input` is
/// only read from when a prompt is needed.
pub fn run(cli: &Cli, input: &mut impl BufRead) -> DriverResult<ExitOutcome> {
    info!(directory = %cli.directory.display(), "scanning for .prsm files");
    let files = discover::find_source_files(&cli.directory)?;

    let selected = match cli.non_interactive {
        Some(index) => discover::select_by_index(&files, index)?,
        None => discover::prompt_for_selection(&files, io::stdout(), input)?,
    };
    info!(file = %selected.display(), "selected source file");

    let tree_path = pipeline::tree_path_for(&cli.output);
    let result = pipeline::run(&selected, &cli.output, &tree_path, cli.format.into())?;
    if result.outcome != ExitOutcome::Success {
        warn!(outcome = ?result.outcome, "pipeline completed with errors");
    }
    Ok(result.outcome)
}
