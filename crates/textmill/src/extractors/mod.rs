//! Format-specific text extractors.
//!
//! One extractor per supported input format, all funneled through the
//! [`Extractor`] trait so the conversion pipeline can treat them uniformly.
//! Dispatch is a closed `match` on [`DocumentFormat`]; adding a format means
//! adding an enum variant and an arm in [`extractor_for`].

use crate::Result;
use crate::core::formats::DocumentFormat;
use async_trait::async_trait;
use std::path::Path;

pub mod docx;
pub mod html;
pub mod pdf;

pub use docx::DocxExtractor;
pub use html::HtmlExtractor;
pub use pdf::PdfExtractor;

/// Converts one document format to plain text.
///
/// Extractors are stateless and thread-safe; the pipeline may call
/// [`extract`](Extractor::extract) from concurrent tasks.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// The input format this extractor handles.
    fn format(&self) -> DocumentFormat;

    /// Read the file at `path` and return its plain-text content.
    async fn extract(&self, path: &Path) -> Result<String>;
}

/// Select the built-in extractor for `format`.
pub fn extractor_for(format: DocumentFormat) -> Box<dyn Extractor> {
    match format {
        DocumentFormat::Pdf => Box::new(PdfExtractor::new()),
        DocumentFormat::Docx => Box::new(DocxExtractor::new()),
        DocumentFormat::Html => Box::new(HtmlExtractor::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extractor_for_covers_every_format() {
        for format in [
            DocumentFormat::Pdf,
            DocumentFormat::Docx,
            DocumentFormat::Html,
        ] {
            assert_eq!(extractor_for(format).format(), format);
        }
    }
}
