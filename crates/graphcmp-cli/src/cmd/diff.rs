//! Implementation of `graphcmp diff <a> <b>`.
//!
//! Parses two JSON documents, builds their value graphs, runs the structural
//! comparison engine, and writes the result to stdout.
//!
//! Flags:
//! - `--lenient-order`: Treat sequences as unordered multisets.
//! - `--ignore-defaults`: A default left-hand value matches anything.
//! - `--label <NAME>`: Prefix every reported field path with this root label.
//! - `--summary-only`: Only print the summary line, no per-leaf detail.
//!
//! Exit codes:
//! - 0 = documents are structurally equal
//! - 1 = differences found
//! - 2 = read or parse failure on either input
use graphcmp_core::{Difference, ModeSet, ValueGraph, compare_labeled, render, summary};
use serde_json::Value as JsonValue;

use crate::OutputFormat;
use crate::error::CliError;

/// Runs the `diff` command.
///
/// Parses `content_a` and `content_b` as JSON, builds the [`ModeSet`] from
/// the CLI flags, runs the engine, and writes the result in the requested
/// format.
///
/// Returns `Ok(())` when the documents are equal (exit 0).
///
/// # Errors
///
/// - [`CliError::ParseFailed`] — either input is not valid JSON.
/// - [`CliError::DifferencesFound`] — the documents differ (exit 1).
/// - [`CliError::WriteFailed`] — stdout write failed.
pub fn run(
    content_a: &str,
    content_b: &str,
    lenient_order: bool,
    ignore_defaults: bool,
    label: &str,
    summary_only: bool,
    format: &OutputFormat,
) -> Result<(), CliError> {
    let doc_a: JsonValue = serde_json::from_str(content_a).map_err(|e| CliError::ParseFailed {
        detail: format!("input A: {e}"),
    })?;
    let doc_b: JsonValue = serde_json::from_str(content_b).map_err(|e| CliError::ParseFailed {
        detail: format!("input B: {e}"),
    })?;

    let mut modes = ModeSet::strict();
    if lenient_order {
        modes = modes.with_lenient_order();
    }
    if ignore_defaults {
        modes = modes.with_ignore_defaults();
    }

    let mut graph = ValueGraph::new();
    let left = graph.from_json(&doc_a);
    let right = graph.from_json(&doc_b);

    // Ingested JSON always resolves; an engine error here is a bug, but it
    // still maps to the input-failure exit code rather than a panic.
    let result =
        compare_labeled(&graph, left, right, modes, label).map_err(|e| CliError::ParseFailed {
            detail: e.to_string(),
        })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Human => write_human(&mut out, result.as_ref(), summary_only),
        OutputFormat::Json => write_json(&mut out, result.as_ref()),
    }
    .map_err(|e| CliError::WriteFailed {
        detail: e.to_string(),
    })?;

    match result {
        None => Ok(()),
        Some(_) => Err(CliError::DifferencesFound),
    }
}

/// Writes the human-readable report: a summary line, then one line per leaf
/// unless `summary_only` is set.
fn write_human<W: std::io::Write>(
    w: &mut W,
    result: Option<&Difference>,
    summary_only: bool,
) -> std::io::Result<()> {
    match result {
        None => writeln!(w, "documents are structurally equal"),
        Some(diff) => {
            writeln!(w, "{}", summary(diff))?;
            if !summary_only {
                write!(w, "{}", render(diff))?;
            }
            Ok(())
        }
    }
}

/// Writes the structured result: `{"equal": bool, "difference": tree|null}`.
fn write_json<W: std::io::Write>(w: &mut W, result: Option<&Difference>) -> std::io::Result<()> {
    let payload = serde_json::json!({
        "equal": result.is_none(),
        "difference": result,
    });
    writeln!(w, "{payload}")
}
