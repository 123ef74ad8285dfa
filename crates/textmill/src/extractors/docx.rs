//! DOCX extractor using docx-lite for streaming text extraction.

use crate::Result;
use crate::core::formats::DocumentFormat;
use crate::core::io::read_file_async;
use crate::error::TextmillError;
use crate::extractors::Extractor;
use async_trait::async_trait;
use std::io::Cursor;
use std::path::Path;

/// Extracts paragraph and table text from Word documents.
///
/// Body paragraphs come first, then table content row by row: each row
/// becomes one output line with its cell text joined by single spaces.
pub struct DocxExtractor;

impl DocxExtractor {
    /// Create a new DOCX extractor.
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Flatten a docx-lite table into one string per row.
fn table_row_lines(table: &docx_lite::Table) -> Vec<String> {
    table
        .rows
        .iter()
        .map(|row| {
            row.cells
                .iter()
                .map(|cell| {
                    cell.paragraphs
                        .iter()
                        .map(|para| para.to_text())
                        .collect::<Vec<_>>()
                        .join(" ")
                        .trim()
                        .to_string()
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

#[async_trait]
impl Extractor for DocxExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let content = read_file_async(path).await?;
        let cursor = Cursor::new(content);
        let doc = docx_lite::parse_document(cursor)
            .map_err(|e| TextmillError::parsing(format!("DOCX parsing failed: {}", e)))?;

        let mut text = doc.extract_text();
        for table in &doc.tables {
            for row_line in table_row_lines(table) {
                let row_line = row_line.trim();
                if row_line.is_empty() {
                    continue;
                }
                if !text.is_empty() && !text.ends_with('\n') {
                    text.push('\n');
                }
                text.push_str(row_line);
                text.push('\n');
            }
        }
        Ok(text)
    }
}
