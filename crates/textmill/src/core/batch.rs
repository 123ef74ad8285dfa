//! Batch conversion entry points.
//!
//! [`convert`] is the primary API: scan a directory, select files by
//! requested format, and convert each one while keeping per-file failures
//! contained. [`convert_sync`] wraps it for non-async callers.

use crate::Result;
use crate::core::config::ConvertOptions;
use crate::core::formats::{DocumentFormat, parse_format_list};
use crate::core::io::list_format_files;
use crate::core::pipeline::convert_document;
use crate::error::TextmillError;
use crate::extractors::extractor_for;
use crate::ocr::{OcrEngine, RemoteOcrClient};
use crate::types::{BatchSummary, Document};
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};

/// Shared runtime for the synchronous wrappers.
///
/// Runtime creation fails only on system resource exhaustion, at which point
/// nothing else in the process can run either.
static GLOBAL_RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create global Tokio runtime - system may be out of resources")
});

/// Convert every matching file under `input_dir` to plain text.
///
/// `formats` is a comma-separated list of format names, e.g. `"pdf,docx,html"`.
/// Configuration problems (unknown format token, ocr-only without a reachable
/// server, single-file extension mismatch, unreadable directory) fail the call
/// before any file is converted. Per-file conversion problems are logged,
/// recorded in the returned [`BatchSummary`], and do not stop the batch.
///
/// The OCR server is probed exactly once per call; the result holds for the
/// whole batch even if the server's state changes mid-run.
pub async fn convert(
    input_dir: impl AsRef<Path>,
    formats: &str,
    options: &ConvertOptions,
) -> Result<BatchSummary> {
    let input_dir = input_dir.as_ref();
    options.validate()?;
    let formats = parse_format_list(formats)?;

    if formats.contains(&DocumentFormat::Pdf) {
        if let Some(single) = &options.pdf.single_file {
            if !DocumentFormat::Pdf.matches_extension(single) {
                return Err(TextmillError::validation(format!(
                    "single file {} does not match format pdf",
                    single.display()
                )));
            }
        }
    }

    let client = resolve_ocr_fallback(options).await?;
    let ocr: Option<&dyn OcrEngine> = client.as_ref().map(|c| c as &dyn OcrEngine);

    let mut summary = BatchSummary::new();
    for format in formats {
        let files = select_files(input_dir, format, options)?;
        let extractor = extractor_for(format);
        let ocr_only = options.pdf.ocr_only && format == DocumentFormat::Pdf;
        for path in files {
            let document = Document::new(path, format);
            let outcome = convert_document(extractor.as_ref(), &document, ocr, ocr_only).await;
            summary.record(outcome);
        }
    }
    Ok(summary)
}

/// Synchronous wrapper for [`convert`].
///
/// Runs on the shared global runtime rather than creating one per call.
/// Must not be invoked from inside an async context.
pub fn convert_sync(
    input_dir: impl AsRef<Path>,
    formats: &str,
    options: &ConvertOptions,
) -> Result<BatchSummary> {
    GLOBAL_RUNTIME.block_on(convert(input_dir, formats, options))
}

/// Construct the OCR client and probe it exactly once.
///
/// Returns `Some` only when the server answered the probe. The answer is
/// immutable for the rest of the batch. Enforces the ocr-only precondition:
/// a configured but unreachable server fails the invocation here, before any
/// file is converted.
pub(crate) async fn resolve_ocr_fallback(
    options: &ConvertOptions,
) -> Result<Option<RemoteOcrClient>> {
    let client = match &options.ocr_server {
        Some(address) => Some(RemoteOcrClient::new(address)?),
        None => None,
    };
    let reachable = match client {
        Some(client) => {
            if client.available().await {
                tracing::info!(
                    "OCR server available at {} - will use as fallback",
                    client.address()
                );
                Some(client)
            } else {
                tracing::info!(
                    "OCR server not available at {} - OCR fallback disabled",
                    client.address()
                );
                None
            }
        }
        None => None,
    };
    if options.pdf.ocr_only && reachable.is_none() {
        return Err(TextmillError::validation(format!(
            "ocr-only requested but OCR server not available at {}",
            options.ocr_server.as_deref().unwrap_or("")
        )));
    }
    Ok(reachable)
}

/// File selection for one format: single-file mode for PDF, directory scan
/// otherwise. The single-file extension is validated before any conversion
/// starts, not here.
fn select_files(
    input_dir: &Path,
    format: DocumentFormat,
    options: &ConvertOptions,
) -> Result<Vec<PathBuf>> {
    if format == DocumentFormat::Pdf {
        if let Some(single) = &options.pdf.single_file {
            return Ok(vec![single.clone()]);
        }
    }
    list_format_files(input_dir, format)
}
