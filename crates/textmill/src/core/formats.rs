//! Supported document formats and format-list parsing.
//!
//! Conversion requests name their formats as a comma-separated list
//! (`"pdf,docx,html"`). This module parses that list into [`DocumentFormat`]
//! values and answers whether a directory entry belongs to a format. Extension
//! matching is case-insensitive and accepts `.htm` as an alias for HTML files,
//! while `htm` is not a valid *requested* format token.
//!
//! # Example
//!
//! ```rust
//! use textmill::core::formats::{DocumentFormat, parse_format_list};
//!
//! let formats = parse_format_list("pdf, html").unwrap();
//! assert_eq!(formats, vec![DocumentFormat::Pdf, DocumentFormat::Html]);
//! assert!(DocumentFormat::Html.matches_extension("page.HTM".as_ref()));
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TextmillError};

/// A document format the conversion pipeline understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Html,
}

impl DocumentFormat {
    /// Canonical lowercase name, as used in format lists and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Html => "html",
        }
    }

    /// File extensions (lowercase, without dot) that belong to this format.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            DocumentFormat::Pdf => &["pdf"],
            DocumentFormat::Docx => &["docx"],
            DocumentFormat::Html => &["html", "htm"],
        }
    }

    /// Whether the path's extension belongs to this format, ignoring case.
    pub fn matches_extension(&self, path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => {
                let ext = ext.to_ascii_lowercase();
                self.extensions().contains(&ext.as_str())
            }
            None => false,
        }
    }

}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentFormat {
    type Err = TextmillError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "html" => Ok(DocumentFormat::Html),
            other => Err(TextmillError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Parse a comma-separated format list into formats, preserving order.
///
/// Empty tokens are skipped, so `"pdf,,html"` and `"pdf, html"` both work.
/// An unknown token fails the whole list: a misspelled format is a
/// configuration mistake, not something to silently ignore.
pub fn parse_format_list(list: &str) -> Result<Vec<DocumentFormat>> {
    let mut formats = Vec::new();
    for token in list.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        formats.push(token.parse()?);
    }
    Ok(formats)
}
