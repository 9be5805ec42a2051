//! Subcommand implementations. Each submodule exposes a `run` function that
//! takes already-read input strings plus its flags, writes to stdout, and
//! returns a [`crate::error::CliError`] carrying the exit code on failure.

pub mod diff;
