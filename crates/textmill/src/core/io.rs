//! File I/O for document discovery and output writing.
//!
//! Directory scanning is non-recursive: the batch contract covers one corpus
//! directory, and files in subdirectories are out of scope. Output files land
//! next to their source with a `.txt` extension, overwriting prior content.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::core::formats::DocumentFormat;
use crate::error::{Result, TextmillError};

/// Read a file asynchronously.
///
/// # Errors
///
/// Returns `TextmillError::Io` for I/O errors (these always bubble up).
pub async fn read_file_async(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    fs::read(path.as_ref()).await.map_err(TextmillError::Io)
}

/// List the files in `dir` that belong to `format`, non-recursively.
///
/// Subdirectories and files with other extensions are ignored. Results are
/// sorted by file name because `read_dir` order is platform-dependent and the
/// batch contract is deterministic processing order.
///
/// # Errors
///
/// Returns `TextmillError::Validation` if `dir` is not a directory and
/// `TextmillError::Io` if it cannot be read. Either aborts the whole batch.
pub fn list_format_files(dir: impl AsRef<Path>, format: DocumentFormat) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(TextmillError::validation(format!(
            "Path is not a directory: {}",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(TextmillError::Io)? {
        let entry = entry.map_err(TextmillError::Io)?;
        let path = entry.path();
        if path.is_file() && format.matches_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Derive the output path for an input document: same directory, same base
/// name, `.txt` extension.
pub fn output_path_for(input: impl AsRef<Path>) -> PathBuf {
    input.as_ref().with_extension("txt")
}

/// Write extracted text to `path`, creating or truncating the file.
///
/// # Errors
///
/// Returns `TextmillError::Io` for I/O errors (these always bubble up).
pub async fn write_text_async(path: impl AsRef<Path>, text: &str) -> Result<()> {
    fs::write(path.as_ref(), text.as_bytes())
        .await
        .map_err(TextmillError::Io)
}
