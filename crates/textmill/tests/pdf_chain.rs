//! The tiered PDF extraction chain against generated documents.
//!
//! Each tier gets the same generated input so the tests pin down that every
//! tier can stand alone, not only as part of the chain.

mod helpers;

use helpers::{blank_pdf, pdf_with_text};
use tempfile::tempdir;
use textmill::Extractor;
use textmill::extractors::PdfExtractor;
use textmill::pdf::{
    ContentStreamStrategy, PdfTextStrategy, RebuildStrategy, TextLayerStrategy, default_chain,
};

#[test]
fn test_text_layer_tier_reads_generated_pdf() {
    let text = TextLayerStrategy.extract(&pdf_with_text("Hello World")).unwrap();
    assert!(text.contains("Hello World"), "text layer output: {text:?}");
}

#[test]
fn test_content_stream_tier_reads_generated_pdf() {
    let text = ContentStreamStrategy
        .extract(&pdf_with_text("Hello World"))
        .unwrap();
    assert!(text.contains("Hello World"), "content stream output: {text:?}");
}

#[test]
fn test_rebuild_tier_reads_generated_pdf() {
    let text = RebuildStrategy.extract(&pdf_with_text("Hello World")).unwrap();
    assert!(text.contains("Hello World"), "rebuild output: {text:?}");
}

#[test]
fn test_chain_recovers_text_from_generated_pdf() {
    let text = default_chain().extract(&pdf_with_text("Chain input")).unwrap();
    assert!(text.contains("Chain input"), "chain output: {text:?}");
}

#[test]
fn test_blank_pdf_yields_empty_not_error() {
    // A parseable document with no text anywhere is the OCR-fallback signal,
    // not a chain failure.
    let text = default_chain().extract(&blank_pdf()).unwrap();
    assert_eq!(text, "");
}

#[test]
fn test_garbage_bytes_fail_the_whole_chain() {
    assert!(default_chain().extract(b"not a pdf at all").is_err());
}

#[tokio::test]
async fn test_pdf_extractor_end_to_end() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("paper.pdf");
    std::fs::write(&path, pdf_with_text("Extractor end to end")).unwrap();

    let text = PdfExtractor::new().extract(&path).await.unwrap();
    assert!(text.contains("Extractor end to end"), "output: {text:?}");
}
