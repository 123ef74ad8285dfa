//! HTML extractor that renders markup to plain text.

use crate::Result;
use crate::core::formats::DocumentFormat;
use crate::core::io::read_file_async;
use crate::error::TextmillError;
use crate::extractors::Extractor;
use async_trait::async_trait;
use std::io::Cursor;
use std::path::Path;

/// Line width used when reflowing rendered text.
const RENDER_WIDTH: usize = 80;

/// Renders HTML to plain text, dropping tags while keeping block structure.
pub struct HtmlExtractor;

impl HtmlExtractor {
    /// Create a new HTML extractor.
    pub fn new() -> Self {
        Self
    }
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extractor for HtmlExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Html
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let content = read_file_async(path).await?;
        html2text::from_read(Cursor::new(content), RENDER_WIDTH)
            .map_err(|e| TextmillError::parsing(format!("HTML conversion failed: {}", e)))
    }
}
