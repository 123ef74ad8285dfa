//! Supervised per-file conversion with a bounded retry.
//!
//! Each file is converted in its own spawned task so a panic in one
//! decoder cannot take down the rest of the batch. After every attempt the
//! output file is inspected: a zero-byte `.txt` is treated as a silent
//! extraction failure and triggers exactly one retry in OCR-only mode,
//! provided the OCR server answered the batch-level probe. Results flow
//! back through the task handle, and every processed file gets one line in
//! an append-only JSONL report next to the inputs.
//!
//! Re-running the supervisor over the same directory resumes: files whose
//! `.txt` output already has content are skipped without reprocessing.

use crate::Result;
use crate::core::batch::resolve_ocr_fallback;
use crate::core::config::ConvertOptions;
use crate::core::formats::DocumentFormat;
use crate::core::io::{list_format_files, output_path_for};
use crate::core::pipeline::convert_document;
use crate::error::TextmillError;
use crate::extractors::extractor_for;
use crate::ocr::{OcrEngine, RemoteOcrClient};
use crate::types::{BatchSummary, ConversionStatus, Document, FileOutcome};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// File name of the per-directory conversion report.
pub const REPORT_FILE_NAME: &str = "conversion_report.jsonl";

/// Longest error text recorded in a report entry, in characters.
const MAX_REPORT_ERROR_LEN: usize = 2000;

/// One conversion attempt, executed inside a supervised task.
///
/// Implementations write the output file themselves (via the pipeline); the
/// supervisor only inspects the result and the file afterwards.
#[async_trait]
pub trait ConversionWorker: Send + Sync + 'static {
    async fn convert(&self, document: Document, ocr_only: bool) -> FileOutcome;
}

/// Production worker: runs the standard extraction pipeline.
pub struct PipelineWorker {
    ocr: Option<RemoteOcrClient>,
}

impl PipelineWorker {
    /// `ocr` must already be probed; pass `Some` only for a reachable server.
    pub fn new(ocr: Option<RemoteOcrClient>) -> Self {
        Self { ocr }
    }
}

#[async_trait]
impl ConversionWorker for PipelineWorker {
    async fn convert(&self, document: Document, ocr_only: bool) -> FileOutcome {
        let extractor = extractor_for(document.format);
        let ocr = self.ocr.as_ref().map(|c| c as &dyn OcrEngine);
        convert_document(extractor.as_ref(), &document, ocr, ocr_only).await
    }
}

/// One line of the JSONL conversion report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub file: String,
    pub status: ConversionStatus,
    pub used_ocr: bool,
    pub retried: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReportEntry {
    fn from_outcome(outcome: &FileOutcome, retried: bool) -> Self {
        let file = outcome
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| outcome.path.display().to_string());
        Self {
            file,
            status: outcome.status,
            used_ocr: outcome.used_ocr,
            retried,
            error: outcome.error.as_deref().map(sanitize_report_error),
        }
    }
}

/// Append-only JSONL report, flushed after every entry so a crash mid-batch
/// loses at most the in-flight file.
pub struct ConversionReport {
    path: PathBuf,
    file: tokio::fs::File,
}

impl ConversionReport {
    pub async fn open(input_dir: &Path) -> Result<Self> {
        let path = input_dir.join(REPORT_FILE_NAME);
        let file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn record(&mut self, entry: &ReportEntry) -> Result<()> {
        let mut line = serde_json::to_string(entry)
            .map_err(|e| TextmillError::Other(format!("Failed to encode report entry: {}", e)))?;
        line.push('\n');
        self.file.write_all(line.as_bytes()).await?;
        self.file.flush().await?;
        Ok(())
    }
}

/// Drives supervised conversion of one directory.
pub struct Supervisor {
    worker: Arc<dyn ConversionWorker>,
    ocr_available: bool,
    ocr_only: bool,
}

impl Supervisor {
    pub fn new(worker: Arc<dyn ConversionWorker>, ocr_available: bool, ocr_only: bool) -> Self {
        Self {
            worker,
            ocr_available,
            ocr_only,
        }
    }

    /// Standard setup for the conversion options: validate them, probe the
    /// OCR server once, and wire up the pipeline worker.
    pub async fn from_options(options: &ConvertOptions) -> Result<Self> {
        options.validate()?;
        let client = resolve_ocr_fallback(options).await?;
        let ocr_available = client.is_some();
        Ok(Self::new(
            Arc::new(PipelineWorker::new(client)),
            ocr_available,
            options.pdf.ocr_only,
        ))
    }

    /// Convert every `format` file under `input_dir`, one at a time.
    ///
    /// Files with an existing non-empty `.txt` are skipped. Every processed
    /// file is appended to the directory's conversion report.
    pub async fn run(&self, input_dir: &Path, format: DocumentFormat) -> Result<BatchSummary> {
        let mut report = ConversionReport::open(input_dir).await?;
        let files = list_format_files(input_dir, format)?;

        let mut summary = BatchSummary::new();
        for path in files {
            let output = output_path_for(&path);
            if file_size(&output).await.is_some_and(|len| len > 0) {
                tracing::debug!(
                    "Skipping {} - non-empty output already exists",
                    path.display()
                );
                summary.record(FileOutcome {
                    path,
                    format,
                    status: ConversionStatus::Skipped,
                    used_ocr: false,
                    elapsed: Duration::ZERO,
                    error: None,
                });
                continue;
            }

            let document = Document::new(path.clone(), format);
            let first = self.attempt(document.clone(), self.ocr_only).await;
            let zero_output = file_size(&output).await == Some(0);

            let mut retried = false;
            let outcome = if zero_output && self.ocr_available && !self.ocr_only {
                // The stale empty file must not survive a failed retry.
                let _ = tokio::fs::remove_file(&output).await;
                retried = true;
                tracing::info!(
                    "Output for {} is zero bytes, retrying in OCR-only mode",
                    path.display()
                );
                let retry = self.attempt(document, true).await;
                merge_attempts(first, retry)
            } else if zero_output {
                let mut failed = first;
                failed.status = ConversionStatus::Failed;
                failed.error = Some(append_error(
                    failed.error.take(),
                    "output txt is zero bytes",
                ));
                failed
            } else {
                first
            };

            report
                .record(&ReportEntry::from_outcome(&outcome, retried))
                .await?;
            summary.record(outcome);
        }

        tracing::info!("Conversion report written to {}", report.path().display());
        Ok(summary)
    }

    /// Run one conversion attempt in its own task and contain any panic.
    async fn attempt(&self, document: Document, ocr_only: bool) -> FileOutcome {
        let path = document.path.clone();
        let format = document.format;
        let worker = Arc::clone(&self.worker);
        let handle = tokio::spawn(async move { worker.convert(document, ocr_only).await });
        match handle.await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!("Conversion task for {} aborted: {}", path.display(), err);
                FileOutcome {
                    path,
                    format,
                    status: ConversionStatus::Failed,
                    used_ocr: false,
                    elapsed: Duration::ZERO,
                    error: Some(format!("conversion task aborted: {}", err)),
                }
            }
        }
    }
}

/// Combine a zero-byte first attempt with its OCR-only retry into the final
/// recorded outcome. The retry decides the status; timings accumulate.
fn merge_attempts(first: FileOutcome, retry: FileOutcome) -> FileOutcome {
    let error = match (first.error, retry.error) {
        (_, None) => None,
        (Some(first_err), Some(retry_err)) => Some(format!(
            "{}; ocr-only retry failed: {}",
            first_err, retry_err
        )),
        (None, Some(retry_err)) => Some(format!("ocr-only retry failed: {}", retry_err)),
    };
    FileOutcome {
        path: retry.path,
        format: retry.format,
        status: retry.status,
        used_ocr: first.used_ocr || retry.used_ocr,
        elapsed: first.elapsed + retry.elapsed,
        error,
    }
}

fn append_error(base: Option<String>, extra: &str) -> String {
    match base {
        Some(base) if !base.is_empty() => format!("{}; {}", base, extra),
        _ => extra.to_string(),
    }
}

/// Single-line, bounded error text for the report.
fn sanitize_report_error(message: &str) -> String {
    let flat = message.replace(['\n', '\r'], " ");
    if flat.chars().count() <= MAX_REPORT_ERROR_LEN {
        flat
    } else {
        let mut truncated: String = flat.chars().take(MAX_REPORT_ERROR_LEN).collect();
        truncated.push('…');
        truncated
    }
}

async fn file_size(path: &Path) -> Option<u64> {
    tokio::fs::metadata(path).await.ok().map(|meta| meta.len())
}
