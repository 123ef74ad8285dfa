//! Tier 1: structured text-layer extraction.
//!
//! Reads the text layer the way a compliant viewer would, page by page in
//! page-number order. This is the fast path for born-digital PDFs. Scanned
//! documents have no text layer and come back empty, which sends the chain to
//! the next tier.

use super::error::Result;
use super::{PdfTextStrategy, load_document};

pub struct TextLayerStrategy;

impl PdfTextStrategy for TextLayerStrategy {
    fn name(&self) -> &'static str {
        "text-layer"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let document = load_document(bytes)?;

        let mut text = String::new();
        for (page_num, _page_id) in document.get_pages() {
            match document.extract_text(&[page_num]) {
                Ok(content) => {
                    // Blank pages decode to a bare newline; keep them out.
                    if !content.trim().is_empty() {
                        text.push_str(&content);
                        text.push('\n');
                    }
                }
                Err(err) => {
                    // A single damaged page does not fail the tier.
                    tracing::warn!(
                        page = page_num,
                        error = %err,
                        "skipping page with unreadable text layer"
                    );
                }
            }
        }
        Ok(text)
    }
}
