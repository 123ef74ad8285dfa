//! Result types produced by batch conversion.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::formats::DocumentFormat;

/// A document selected for conversion: where it lives and how to read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub path: PathBuf,
    pub format: DocumentFormat,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, format: DocumentFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }
}

/// Terminal state of one file's conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionStatus {
    /// Text was extracted and the output file was written.
    Converted,
    /// Extraction or the output write failed; no usable output exists.
    Failed,
    /// A non-empty output already existed and the file was not reprocessed.
    Skipped,
}

/// Outcome of converting a single document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub format: DocumentFormat,
    pub status: ConversionStatus,
    /// Whether the remote OCR service produced the final text.
    pub used_ocr: bool,
    pub elapsed: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.status == ConversionStatus::Converted
    }
}

/// Aggregate result of a batch run, returned by the conversion entry points.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    pub outcomes: Vec<FileOutcome>,
}

impl BatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one outcome into the counters and keep it for per-file reporting.
    pub fn record(&mut self, outcome: FileOutcome) {
        match outcome.status {
            ConversionStatus::Converted => {
                self.attempted += 1;
                self.succeeded += 1;
            }
            ConversionStatus::Failed => {
                self.attempted += 1;
                self.failed += 1;
            }
            ConversionStatus::Skipped => self.skipped += 1,
        }
        self.outcomes.push(outcome);
    }

    /// Absorb another summary, e.g. when separate per-format runs make up one
    /// logical batch.
    pub fn merge(&mut self, other: BatchSummary) {
        self.attempted += other.attempted;
        self.succeeded += other.succeeded;
        self.failed += other.failed;
        self.skipped += other.skipped;
        self.outcomes.extend(other.outcomes);
    }
}
