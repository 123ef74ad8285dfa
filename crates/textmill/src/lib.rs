//! Textmill - Document to Plain-Text Conversion
//!
//! Textmill converts directories of PDF, DOCX, and HTML documents into
//! plain-text files. PDF extraction runs a tiered chain of strategies, and
//! an optional OCR server (Tika protocol) acts as a fallback when local
//! extraction fails or produces nothing, which is the common case for
//! scanned papers.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use textmill::{ConvertOptions, convert_sync};
//!
//! # fn main() -> textmill::Result<()> {
//! let summary = convert_sync("papers/", "pdf,docx,html", &ConvertOptions::default())?;
//! println!("converted {} of {} files", summary.succeeded, summary.attempted);
//! # Ok(())
//! # }
//! ```
//!
//! With an OCR fallback server:
//!
//! ```rust,no_run
//! use textmill::{ConvertOptions, convert};
//!
//! # async fn example() -> textmill::Result<()> {
//! let options = ConvertOptions {
//!     ocr_server: Some("localhost:9998".to_string()),
//!     ..Default::default()
//! };
//! let summary = convert("papers/", "pdf", &options).await?;
//! for outcome in &summary.outcomes {
//!     println!("{}: {:?} (ocr={})", outcome.path.display(), outcome.status, outcome.used_ocr);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core** (`core`): batch dispatch, per-file pipeline, supervised runner
//! - **Extractors** (`extractors`): one extractor per input format
//! - **PDF chain** (`pdf`): ordered extraction strategies with fallback
//! - **OCR** (`ocr`): Tika-protocol client consulted when local extraction
//!   fails or yields empty text

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod extractors;
pub mod ocr;
pub mod pdf;
pub mod types;

pub use error::{Result, TextmillError};
pub use types::{BatchSummary, ConversionStatus, Document, FileOutcome};

pub use core::batch::{convert, convert_sync};
pub use core::config::{ConvertOptions, PdfOptions};
pub use core::formats::{DocumentFormat, parse_format_list};
pub use core::supervisor::{ConversionWorker, PipelineWorker, ReportEntry, Supervisor};

pub use extractors::{Extractor, extractor_for};
pub use ocr::{OcrEngine, RemoteOcrClient};
