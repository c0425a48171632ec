//! Task document parsing
//!
//! Splits the task document into numbered lines and nothing more; content
//! rules live in [`crate::validate`].

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};

/// A document line paired with its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistLine {
    /// 1-based line number
    pub number: usize,
    /// Line content without the trailing newline
    pub text: String,
}

/// Reads the task document as an ordered sequence of numbered lines.
///
/// Fails with [`Error::DocumentNotFound`] when the path does not exist and
/// [`Error::DocumentUnreadable`] on any other read failure (permissions,
/// invalid encoding).
pub fn read_lines(path: &Path) -> Result<Vec<ChecklistLine>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::DocumentNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::DocumentUnreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    Ok(content
        .lines()
        .enumerate()
        .map(|(index, text)| ChecklistLine {
            number: index + 1,
            text: text.to_string(),
        })
        .collect())
}
