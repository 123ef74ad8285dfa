//! Conversion orchestration.
//!
//! Everything between the public entry points and the format extractors:
//!
//! - **Dispatch** (`batch`): directory scan, format selection, batch entry points
//! - **Configuration** (`config`): conversion options and TOML loading
//! - **Formats** (`formats`): the closed set of supported input formats
//! - **Pipeline** (`pipeline`): per-file extract/fallback/write control flow
//! - **Supervisor** (`supervisor`): isolated per-file execution with bounded retry
//! - **I/O** (`io`): file listing, reading, and output-path helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use textmill::core::batch::convert;
//! use textmill::core::config::ConvertOptions;
//!
//! # async fn example() -> textmill::Result<()> {
//! let summary = convert("papers/", "pdf", &ConvertOptions::default()).await?;
//! println!("{} files converted", summary.succeeded);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod formats;
pub mod io;
pub mod pipeline;
pub mod supervisor;

pub use batch::{convert, convert_sync};
pub use config::{ConvertOptions, PdfOptions};
pub use formats::{DocumentFormat, parse_format_list};
pub use supervisor::{ConversionWorker, PipelineWorker, Supervisor};
