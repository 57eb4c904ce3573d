//! Reading email HTML from files and stdin.
//!
//! The extraction engine itself does no I/O; these helpers exist for callers
//! such as the CLI that receive a saved email body.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::{LetterboxError, Result};

/// Source name that means "read standard input".
pub const STDIN_SOURCE: &str = "-";

/// Reads HTML content from a local file.
///
/// Callers should validate and sanitize the path when accepting user input.
pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();

    if !path.exists() {
        Err(LetterboxError::FileNotFound(path.to_path_buf()))
    } else {
        fs::read_to_string(path).map_err(LetterboxError::from)
    }
}

/// Reads HTML content from standard input until EOF.
pub fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    Ok(buffer)
}

/// Reads from stdin when `source` is `-`, otherwise from the named file.
pub fn read_input(source: &str) -> Result<String> {
    if source == STDIN_SOURCE { read_stdin() } else { read_file(source) }
}
