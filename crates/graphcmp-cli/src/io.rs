/// File and stdin reading with size enforcement and UTF-8 validation.
///
/// This module is the single entry point for all input I/O in the `graphcmp`
/// binary; `graphcmp-core` never touches the filesystem.
///
/// - Disk files: size checked via `std::fs::metadata` before any read.
/// - Stdin: buffered with a `Read::take` cap so allocation is bounded.
/// - UTF-8 validation with byte-offset reporting.
/// - All failures convert to [`CliError`] variants with exit code 2.
use std::io::Read as _;
use std::path::Path;

use crate::PathOrStdin;
use crate::error::CliError;

/// Reads the entire contents of `source` into a `String`.
///
/// # Errors
///
/// [`CliError`] (exit code 2) for missing files, permission problems, inputs
/// over `max_size`, other I/O failures, and invalid UTF-8.
pub fn read_input(source: &PathOrStdin, max_size: u64) -> Result<String, CliError> {
    match source {
        PathOrStdin::Path(path) => read_file(path, max_size),
        PathOrStdin::Stdin => read_stdin(max_size),
    }
}

fn read_file(path: &Path, max_size: u64) -> Result<String, CliError> {
    // Size check via metadata, so nothing is allocated for oversized files.
    let file_size = std::fs::metadata(path)
        .map_err(|e| io_error_to_cli(&e, path))?
        .len();
    if file_size > max_size {
        return Err(CliError::FileTooLarge {
            source: path.display().to_string(),
            limit: max_size,
            actual: Some(file_size),
        });
    }
    let bytes = std::fs::read(path).map_err(|e| io_error_to_cli(&e, path))?;
    bytes_to_string(&bytes, &path.display().to_string())
}

fn read_stdin(max_size: u64) -> Result<String, CliError> {
    let mut bytes = Vec::new();
    let stdin = std::io::stdin();
    // One extra byte so an exactly-at-limit stream is distinguishable from
    // an over-limit one.
    let mut capped = stdin.lock().take(max_size.saturating_add(1));
    capped
        .read_to_end(&mut bytes)
        .map_err(|e| CliError::IoError {
            source: "-".to_owned(),
            detail: e.to_string(),
        })?;
    if bytes.len() as u64 > max_size {
        return Err(CliError::FileTooLarge {
            source: "-".to_owned(),
            limit: max_size,
            actual: None,
        });
    }
    bytes_to_string(&bytes, "-")
}

fn bytes_to_string(bytes: &[u8], source: &str) -> Result<String, CliError> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(s.to_owned()),
        Err(e) => Err(CliError::InvalidUtf8 {
            source: source.to_owned(),
            byte_offset: e.valid_up_to(),
        }),
    }
}

fn io_error_to_cli(e: &std::io::Error, path: &Path) -> CliError {
    if e.kind() == std::io::ErrorKind::NotFound {
        CliError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else if e.kind() == std::io::ErrorKind::PermissionDenied {
        CliError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        CliError::IoError {
            source: path.display().to_string(),
            detail: e.to_string(),
        }
    }
}
