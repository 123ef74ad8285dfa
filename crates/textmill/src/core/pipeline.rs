//! Per-file conversion control flow.
//!
//! Runs the local extractor, applies the OCR fallback policy, writes the
//! output file, and reports a [`FileOutcome`] for summary accounting. A
//! failed file never propagates as an error from here; the caller decides
//! what to do with the recorded outcome.

use crate::Result;
use crate::core::io::{output_path_for, write_text_async};
use crate::error::TextmillError;
use crate::extractors::Extractor;
use crate::ocr::OcrEngine;
use crate::types::{ConversionStatus, Document, FileOutcome};
use std::time::{Duration, Instant};

/// Convert one document to plain text and write `name.txt` next to it.
///
/// `ocr` must only be `Some` when the remote service answered the batch-level
/// probe; passing it here never triggers another availability check. With
/// `ocr_only` set, the local extractor is skipped entirely and the OCR result
/// is the only candidate. Otherwise the local extractor runs first and OCR is
/// consulted when the local result is an error or empty text.
///
/// Error-free empty text still produces an output file. That preserves the
/// zero-byte marker downstream retry logic keys on.
pub async fn convert_document(
    extractor: &dyn Extractor,
    document: &Document,
    ocr: Option<&dyn OcrEngine>,
    ocr_only: bool,
) -> FileOutcome {
    let started = Instant::now();
    let mut used_ocr = false;

    tracing::info!(
        "Starting conversion: {} (format={})",
        document.path.display(),
        document.format
    );

    let extracted: Result<String> = if ocr_only {
        match ocr {
            Some(engine) => {
                used_ocr = true;
                engine.extract(&document.path).await
            }
            // Unreachable when callers enforce the batch-level ocr-only
            // precondition, but a misuse must not panic.
            None => Err(TextmillError::validation(
                "ocr-only conversion requires a reachable OCR server",
            )),
        }
    } else {
        let local = extractor.extract(&document.path).await;
        let needs_fallback = match &local {
            // Whitespace-only counts as no text, same as an empty result.
            Ok(text) => text.trim().is_empty(),
            Err(_) => true,
        };
        match (needs_fallback, ocr) {
            (true, Some(engine)) => {
                used_ocr = true;
                tracing::info!(
                    "Standard conversion failed for {}, attempting OCR fallback",
                    document.path.display()
                );
                engine.extract(&document.path).await
            }
            _ => local,
        }
    };

    match extracted {
        Ok(text) => {
            let output = output_path_for(&document.path);
            match write_text_async(&output, &text).await {
                Ok(()) => {
                    let elapsed = started.elapsed();
                    tracing::info!(
                        "Finished conversion: {} (format={}, ocr={}, duration={:?})",
                        document.path.display(),
                        document.format,
                        used_ocr,
                        elapsed
                    );
                    outcome(document, ConversionStatus::Converted, used_ocr, elapsed, None)
                }
                Err(err) => {
                    tracing::warn!(
                        "Error writing output for {}: {}",
                        document.path.display(),
                        err
                    );
                    outcome(
                        document,
                        ConversionStatus::Failed,
                        used_ocr,
                        started.elapsed(),
                        Some(err.to_string()),
                    )
                }
            }
        }
        Err(err) => {
            let elapsed = started.elapsed();
            tracing::warn!(
                "Failed to convert {} (ocr={}, duration={:?}): {}",
                document.path.display(),
                used_ocr,
                elapsed,
                err
            );
            outcome(
                document,
                ConversionStatus::Failed,
                used_ocr,
                elapsed,
                Some(err.to_string()),
            )
        }
    }
}

fn outcome(
    document: &Document,
    status: ConversionStatus,
    used_ocr: bool,
    elapsed: Duration,
    error: Option<String>,
) -> FileOutcome {
    FileOutcome {
        path: document.path.clone(),
        format: document.format,
        status,
        used_ocr,
        elapsed,
        error,
    }
}
