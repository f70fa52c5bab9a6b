use std::io::{self, BufReader};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser as ClapParser;
use prismc_drv::{init_logging, run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut input = BufReader::new(io::stdin());
    let outcome = run(&cli, &mut input)
        .map_err(anyhow::Error::from)
        .context("prismc pipeline failed");

    match outcome {
        Ok(outcome) => ExitCode::from(outcome.code() as u8),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
