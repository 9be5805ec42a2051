//! The `graphcmp` binary: structural comparison of JSON object graphs.
//!
//! Thin shell around `graphcmp-core`: all argument parsing and I/O happens
//! here, all comparison semantics live in the library. Exit codes follow the
//! diff convention: 0 = equal, 1 = differences found, 2 = input failure.
use clap::Parser;

mod cli;
mod cmd;
mod error;
mod io;

pub use cli::{Cli, Command, OutputFormat, PathOrStdin};

use crate::error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = dispatch(&cli) {
        if !err.is_silent() {
            eprintln!("error: {err}");
        }
        std::process::exit(err.exit_code());
    }
}

/// Reads inputs and runs the selected subcommand.
fn dispatch(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Diff {
            a,
            b,
            lenient_order,
            ignore_defaults,
            label,
            summary_only,
        } => {
            if matches!(a, PathOrStdin::Stdin) && matches!(b, PathOrStdin::Stdin) {
                return Err(CliError::BothStdin);
            }
            let content_a = io::read_input(a, cli.max_file_size)?;
            let content_b = io::read_input(b, cli.max_file_size)?;
            cmd::diff::run(
                &content_a,
                &content_b,
                *lenient_order,
                *ignore_defaults,
                label,
                *summary_only,
                &cli.format,
            )
        }
        Command::Version => {
            println!("{}", graphcmp_core::version());
            Ok(())
        }
    }
}
