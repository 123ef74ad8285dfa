//! Tier 3: rebuild and re-read with an independent parser.
//!
//! Re-serializes the leniently parsed document to an in-memory buffer and
//! hands the normalized bytes to `pdf-extract`, a second implementation with
//! its own page walking and font handling. The round trip repairs damaged
//! cross-reference tables and object offsets that make the original bytes
//! unreadable, and the second parser covers failure classes the first two
//! tiers share.

use super::error::{PdfError, Result};
use super::{PdfTextStrategy, load_document};

pub struct RebuildStrategy;

impl PdfTextStrategy for RebuildStrategy {
    fn name(&self) -> &'static str {
        "rebuild"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let mut document = load_document(bytes)?;
        document.decompress();

        let mut buffer: Vec<u8> = Vec::new();
        document
            .save_to(&mut buffer)
            .map_err(|e| PdfError::RebuildFailed(e.to_string()))?;

        pdf_extract::extract_text_from_mem(&buffer)
            .map_err(|e| PdfError::TextExtractionFailed(e.to_string()))
    }
}
