#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(clippy::wildcard_enum_match_arm)]

use clap::CommandFactory;
use clap::Parser;

use super::*;

/// The root help output must contain all top-level subcommand names.
#[test]
fn test_root_help_lists_all_subcommands() {
    let mut cmd = Cli::command();
    let help = format!("{}", cmd.render_help());

    for name in &["diff", "version"] {
        assert!(
            help.contains(name),
            "root help should mention subcommand '{name}'"
        );
    }
}

/// The root help output must describe every global flag.
#[test]
fn test_root_help_lists_global_flags() {
    let mut cmd = Cli::command();
    let help = format!("{}", cmd.render_help());

    for flag in &["--format", "--max-file-size", "--help", "--version"] {
        assert!(help.contains(flag), "root help should mention flag '{flag}'");
    }
}

/// `graphcmp diff --help` must mention both positionals and every mode flag.
#[test]
fn test_diff_help() {
    let mut cmd = Cli::command();
    let sub = cmd
        .find_subcommand_mut("diff")
        .expect("diff subcommand should exist");
    let help = format!("{}", sub.render_help());
    for needle in &[
        "A",
        "B",
        "--lenient-order",
        "--ignore-defaults",
        "--label",
        "--summary-only",
    ] {
        assert!(help.contains(needle), "diff help should mention '{needle}'");
    }
}

/// `"-"` parses to the stdin variant, anything else to a path.
#[test]
fn test_path_or_stdin_parsing() {
    let stdin: PathOrStdin = "-".parse().expect("infallible");
    assert!(matches!(stdin, PathOrStdin::Stdin));

    let path: PathOrStdin = "a.json".parse().expect("infallible");
    match path {
        PathOrStdin::Path(p) => assert_eq!(p, std::path::PathBuf::from("a.json")),
        PathOrStdin::Stdin => panic!("'a.json' should not parse as stdin"),
    }
}

/// Mode flags default to off and parse when given.
#[test]
fn test_diff_flags_parse() {
    let cli = Cli::parse_from(["graphcmp", "diff", "a.json", "b.json"]);
    match cli.command {
        Command::Diff {
            lenient_order,
            ignore_defaults,
            label,
            summary_only,
            ..
        } => {
            assert!(!lenient_order);
            assert!(!ignore_defaults);
            assert!(label.is_empty());
            assert!(!summary_only);
        }
        Command::Version => panic!("expected diff subcommand"),
    }

    let cli = Cli::parse_from([
        "graphcmp",
        "diff",
        "a.json",
        "b.json",
        "--lenient-order",
        "--ignore-defaults",
        "--label",
        "root",
        "--summary-only",
    ]);
    match cli.command {
        Command::Diff {
            lenient_order,
            ignore_defaults,
            label,
            summary_only,
            ..
        } => {
            assert!(lenient_order);
            assert!(ignore_defaults);
            assert_eq!(label, "root");
            assert!(summary_only);
        }
        Command::Version => panic!("expected diff subcommand"),
    }
}

/// The global `--format` flag is accepted after the subcommand.
#[test]
fn test_format_flag_is_global() {
    let cli = Cli::parse_from(["graphcmp", "diff", "a.json", "b.json", "--format", "json"]);
    assert!(matches!(cli.format, OutputFormat::Json));
}

/// `--max-file-size` overrides the default cap.
#[test]
fn test_max_file_size_flag() {
    let cli = Cli::parse_from([
        "graphcmp",
        "diff",
        "a.json",
        "b.json",
        "--max-file-size",
        "1024",
    ]);
    assert_eq!(cli.max_file_size, 1024);

    let cli = Cli::parse_from(["graphcmp", "version"]);
    assert_eq!(cli.max_file_size, 268_435_456);
}
