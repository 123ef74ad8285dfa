//! Tiered PDF text extraction.
//!
//! No single extraction method handles every real-world PDF: scanned papers
//! have no text layer, some writers emit malformed page trees, others produce
//! content streams that only a lenient parser survives. The chain runs an
//! ordered list of [`PdfTextStrategy`] implementations and stops at the first
//! one that yields non-empty text without an error.
//!
//! The default order is:
//!
//! 1. [`TextLayerStrategy`] reads the structured text layer page by page.
//! 2. [`ContentStreamStrategy`] decodes raw content streams and scans them for
//!    text-show operators.
//! 3. [`RebuildStrategy`] re-serializes the document in memory and hands it to
//!    an independent second parser.
//!
//! Adding, removing, or reordering tiers is a change to the list built by
//! [`default_chain`], not to the evaluation logic.

pub mod content_stream;
pub mod error;
pub mod rebuild;
pub mod text_layer;

pub use content_stream::ContentStreamStrategy;
pub use rebuild::RebuildStrategy;
pub use text_layer::TextLayerStrategy;

use lopdf::Document;

use error::{PdfError, Result};

/// One extraction strategy in the fallback chain.
///
/// `extract` returns `Ok` with the recovered text (possibly empty when the
/// document parsed but contained none) or an error when the strategy could not
/// process the document at all.
pub trait PdfTextStrategy: Send + Sync {
    /// Short name used in log events.
    fn name(&self) -> &'static str;

    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// Ordered list of strategies, tried until one produces text.
pub struct ExtractionChain {
    strategies: Vec<Box<dyn PdfTextStrategy>>,
}

impl ExtractionChain {
    pub fn new(strategies: Vec<Box<dyn PdfTextStrategy>>) -> Self {
        Self { strategies }
    }

    /// Run the chain: first strategy returning usable text wins.
    ///
    /// Usable means containing at least one non-whitespace character; parsers
    /// emit stray newlines for blank pages, and those must not count as a
    /// successful extraction. Strategies that error or find no usable text
    /// are logged and the next one is tried. When every strategy is exhausted
    /// the result is the last error if nothing parsed, or `Ok("")` if the
    /// document parsed but yielded no text anywhere. Both cases make the
    /// caller fall back to OCR when it is available.
    pub fn extract(&self, bytes: &[u8]) -> Result<String> {
        let mut last_error: Option<PdfError> = None;
        let mut parsed_empty = false;

        for strategy in &self.strategies {
            match strategy.extract(bytes) {
                Ok(text) if !text.trim().is_empty() => {
                    tracing::debug!(
                        strategy = strategy.name(),
                        chars = text.len(),
                        "PDF strategy produced text"
                    );
                    return Ok(text);
                }
                Ok(_) => {
                    tracing::debug!(strategy = strategy.name(), "PDF strategy found no text");
                    parsed_empty = true;
                }
                Err(err) => {
                    tracing::warn!(strategy = strategy.name(), error = %err, "PDF strategy failed");
                    last_error = Some(err);
                }
            }
        }

        match last_error {
            Some(err) if !parsed_empty => Err(err),
            _ => Ok(String::new()),
        }
    }
}

impl Default for ExtractionChain {
    fn default() -> Self {
        default_chain()
    }
}

/// The standard three-tier chain.
pub fn default_chain() -> ExtractionChain {
    ExtractionChain::new(vec![
        Box::new(TextLayerStrategy),
        Box::new(ContentStreamStrategy),
        Box::new(RebuildStrategy),
    ])
}

/// Load a PDF from memory, attempting an empty-password decrypt for
/// nominally encrypted documents.
pub(crate) fn load_document(bytes: &[u8]) -> Result<Document> {
    let mut document = Document::load_mem(bytes)?;
    if document.is_encrypted() && document.decrypt("").is_err() {
        return Err(PdfError::InvalidPdf(
            "cannot decrypt password-protected PDF".to_string(),
        ));
    }
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedStrategy {
        name: &'static str,
        result: std::result::Result<String, String>,
        calls: Arc<AtomicUsize>,
    }

    fn ok_strategy(name: &'static str, text: &str) -> (FixedStrategy, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let strategy = FixedStrategy {
            name,
            result: Ok(text.to_string()),
            calls: calls.clone(),
        };
        (strategy, calls)
    }

    fn err_strategy(name: &'static str, msg: &str) -> (FixedStrategy, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let strategy = FixedStrategy {
            name,
            result: Err(msg.to_string()),
            calls: calls.clone(),
        };
        (strategy, calls)
    }

    impl PdfTextStrategy for FixedStrategy {
        fn name(&self) -> &'static str {
            self.name
        }

        fn extract(&self, _bytes: &[u8]) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.result {
                Ok(text) => Ok(text.clone()),
                Err(msg) => Err(PdfError::TextExtractionFailed(msg.clone())),
            }
        }
    }

    #[test]
    fn test_first_non_empty_wins_and_later_tiers_never_run() {
        let (first, first_calls) = ok_strategy("first", "recovered text");
        let (second, second_calls) = ok_strategy("second", "should never appear");
        let chain = ExtractionChain::new(vec![Box::new(first), Box::new(second)]);

        let text = chain.extract(b"%PDF-").unwrap();
        assert_eq!(text, "recovered text");
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_result_falls_through() {
        let (first, first_calls) = ok_strategy("first", "");
        let (second, second_calls) = ok_strategy("second", "from second tier");
        let chain = ExtractionChain::new(vec![Box::new(first), Box::new(second)]);

        let text = chain.extract(b"%PDF-").unwrap();
        assert_eq!(text, "from second tier");
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_whitespace_only_result_falls_through() {
        // Blank pages come back as "\n" from some parsers.
        let (first, _) = ok_strategy("first", "\n \n");
        let (second, _) = ok_strategy("second", "real text");
        let chain = ExtractionChain::new(vec![Box::new(first), Box::new(second)]);

        assert_eq!(chain.extract(b"%PDF-").unwrap(), "real text");
    }

    #[test]
    fn test_error_falls_through() {
        let (first, _) = err_strategy("first", "broken page tree");
        let (second, _) = ok_strategy("second", "rescued");
        let chain = ExtractionChain::new(vec![Box::new(first), Box::new(second)]);

        assert_eq!(chain.extract(b"%PDF-").unwrap(), "rescued");
    }

    #[test]
    fn test_all_errors_reports_last_error() {
        let (first, _) = err_strategy("first", "first failure");
        let (second, _) = err_strategy("second", "second failure");
        let chain = ExtractionChain::new(vec![Box::new(first), Box::new(second)]);

        let err = chain.extract(b"not a pdf").unwrap_err();
        assert!(err.to_string().contains("second failure"));
    }

    #[test]
    fn test_parsed_but_empty_everywhere_returns_empty() {
        let (first, _) = err_strategy("first", "failure");
        let (second, _) = ok_strategy("second", "");
        let chain = ExtractionChain::new(vec![Box::new(first), Box::new(second)]);

        // One strategy parsed the document and found nothing, so "no text"
        // beats the earlier parse error.
        assert_eq!(chain.extract(b"%PDF-").unwrap(), "");
    }

    #[test]
    fn test_exhausted_empty_chain_returns_empty() {
        let chain = ExtractionChain::new(vec![]);
        assert_eq!(chain.extract(b"%PDF-").unwrap(), "");
    }

    #[test]
    fn test_default_chain_has_three_tiers() {
        let chain = default_chain();
        let names: Vec<_> = chain.strategies.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["text-layer", "content-stream", "rebuild"]);
    }
}
