//! PDF extractor backed by the tiered extraction chain.

use crate::Result;
use crate::core::formats::DocumentFormat;
use crate::core::io::read_file_async;
use crate::extractors::Extractor;
use crate::pdf::{ExtractionChain, default_chain};
use async_trait::async_trait;
use std::path::Path;

/// Extracts PDF text by running the tiered strategy chain over the raw bytes.
///
/// The default chain tries the text layer first, then a raw content-stream
/// scan, then a rebuild pass. See [`crate::pdf`] for the tier semantics.
pub struct PdfExtractor {
    chain: ExtractionChain,
}

impl PdfExtractor {
    /// Create an extractor with the default three-tier chain.
    pub fn new() -> Self {
        Self {
            chain: default_chain(),
        }
    }

    /// Create an extractor that runs a caller-supplied chain instead.
    pub fn with_chain(chain: ExtractionChain) -> Self {
        Self { chain }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extractor for PdfExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = read_file_async(path).await?;
        let text = self.chain.extract(&bytes)?;
        Ok(text)
    }
}
