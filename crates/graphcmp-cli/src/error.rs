/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `graphcmp` binary. Every
/// variant maps to a stable exit code via [`CliError::exit_code`]:
///
/// - Exit code **2** — input failure: the tool could not read or parse an
///   input at all. These errors terminate before any comparison runs.
/// - Exit code **1** — logical outcome: the tool ran to completion and the
///   compared documents differ.
use std::fmt;
use std::path::PathBuf;

/// All error conditions the `graphcmp` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read a file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input exceeds the configured `--max-file-size` limit.
    FileTooLarge {
        /// Label for the source (`"-"` for stdin, or the path).
        source: String,
        /// The configured size limit in bytes.
        limit: u64,
        /// The actual size in bytes, if known (disk files only).
        actual: Option<u64>,
    },

    /// The input bytes are not valid UTF-8.
    InvalidUtf8 {
        /// Label for the source.
        source: String,
        /// Byte offset of the first invalid sequence.
        byte_offset: usize,
    },

    /// A generic I/O error while reading an input.
    IoError {
        /// Label for the source.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// Both positional inputs were given as `-`; stdin can back only one.
    BothStdin,

    /// An input is not a valid JSON document.
    ParseFailed {
        /// Which input failed and why.
        detail: String,
    },

    /// Writing to stdout failed.
    WriteFailed {
        /// The underlying I/O error message.
        detail: String,
    },

    // --- Exit code 1: logical outcome ---
    /// The comparison found differences.
    ///
    /// The report has already been printed; this variant exists so `main`
    /// can exit 1 cleanly.
    DifferencesFound,
}

impl CliError {
    /// The process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::FileNotFound { .. }
            | CliError::PermissionDenied { .. }
            | CliError::FileTooLarge { .. }
            | CliError::InvalidUtf8 { .. }
            | CliError::IoError { .. }
            | CliError::BothStdin
            | CliError::ParseFailed { .. }
            | CliError::WriteFailed { .. } => 2,
            CliError::DifferencesFound => 1,
        }
    }

    /// Returns `true` when `main` should print this error to stderr.
    ///
    /// [`CliError::DifferencesFound`] is silent: the report has already gone
    /// to stdout.
    pub fn is_silent(&self) -> bool {
        matches!(self, CliError::DifferencesFound)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound { path } => {
                write!(f, "file not found: {}", path.display())
            }
            CliError::PermissionDenied { path } => {
                write!(f, "permission denied: {}", path.display())
            }
            CliError::FileTooLarge {
                source,
                limit,
                actual,
            } => match actual {
                Some(actual) => write!(
                    f,
                    "{source}: input is {actual} bytes, exceeds limit of {limit} bytes"
                ),
                None => write!(f, "{source}: input exceeds limit of {limit} bytes"),
            },
            CliError::InvalidUtf8 {
                source,
                byte_offset,
            } => write!(f, "{source}: invalid UTF-8 at byte offset {byte_offset}"),
            CliError::IoError { source, detail } => write!(f, "{source}: {detail}"),
            CliError::BothStdin => write!(f, "at most one input may be read from stdin"),
            CliError::ParseFailed { detail } => write!(f, "parse failure: {detail}"),
            CliError::WriteFailed { detail } => write!(f, "stdout: {detail}"),
            CliError::DifferencesFound => write!(f, "documents differ"),
        }
    }
}

impl std::error::Error for CliError {}
