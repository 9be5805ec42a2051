//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`].  This avoids stringly-typed handling of the stdin
/// sentinel throughout the codebase.
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary and per-difference lines (default).
    Human,
    /// A single structured JSON object.
    Json,
}

/// All top-level subcommands exposed by the `graphcmp` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Compare two JSON documents structurally and report their differences.
    Diff {
        /// Path to the expected document, or `-` for stdin.
        #[arg(value_name = "A")]
        a: PathOrStdin,
        /// Path to the actual document (cannot be `-` if A is `-`).
        #[arg(value_name = "B")]
        b: PathOrStdin,
        /// Treat arrays as unordered: elements match by structure, not position.
        #[arg(long)]
        lenient_order: bool,
        /// A default value on the A side (null, 0, false, "", empty container)
        /// matches anything on the B side.
        #[arg(long)]
        ignore_defaults: bool,
        /// Root label prefixed to every reported field path.
        #[arg(long, value_name = "NAME", default_value = "")]
        label: String,
        /// Only print the summary line, no per-difference details.
        #[arg(long)]
        summary_only: bool,
    },

    /// Print the graphcmp-core library version.
    Version,
}

/// Root CLI struct for the `graphcmp` binary.
///
/// All global flags are defined here and marked `global = true` so that clap
/// propagates them to every subcommand.
#[derive(Parser)]
#[command(
    name = "graphcmp",
    version,
    about = "Structural comparison of object graphs",
    long_about = "Compares two JSON documents as object graphs and reports a\n\
                  navigable tree of their structural differences, with optional\n\
                  order-insensitive and default-tolerant matching."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Maximum input file size in bytes.
    ///
    /// Can also be set via the `GRAPHCMP_MAX_FILE_SIZE` environment variable.
    /// The CLI flag takes precedence over the environment variable.
    /// Default: 268435456 (256 MB).
    #[arg(
        long,
        global = true,
        env = "GRAPHCMP_MAX_FILE_SIZE",
        default_value = "268435456"
    )]
    pub max_file_size: u64,
}

#[cfg(test)]
mod tests;
