//! CLI binary for textmill.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConvertOptions`, routes PDF directories through the supervised runner,
//! and renders the batch summary.

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};
use textmill::{
    BatchSummary, ConversionStatus, ConvertOptions, DocumentFormat, Supervisor, convert,
    parse_format_list,
};
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert every supported document in a directory
  textmill papers/

  # PDFs only
  textmill --format pdf papers/

  # With an OCR fallback server (Tika protocol)
  textmill --format pdf --ocr-server localhost:9998 papers/

  # Force OCR for scanned PDFs
  textmill --format pdf --ocr-server localhost:9998 --ocr-only papers/

  # Convert a single PDF
  textmill --single-file papers/review-2019.pdf

  # Load options from a TOML file
  textmill --config textmill.toml papers/

OUTPUTS:
  Each converted document produces a `name.txt` file next to the input,
  overwriting any previous content. PDF directory runs also append one line
  per processed file to `conversion_report.jsonl` in the input directory and
  skip files whose `.txt` output already has content, so an interrupted run
  can be resumed by running the same command again.
"#;

/// Convert PDF, DOCX, and HTML documents to plain text.
#[derive(Parser, Debug)]
#[command(
    name = "textmill",
    version,
    about = "Convert PDF, DOCX, and HTML documents to plain text",
    long_about = "Convert directories of PDF, DOCX, and HTML documents to plain-text files. \
PDF extraction runs a tiered strategy chain; an optional OCR server (Tika protocol) is used \
as a fallback when local extraction fails or yields no text.",
    arg_required_else_help = true,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Directory containing the documents to convert.
    input: Option<PathBuf>,

    /// Comma-separated input formats to process: pdf, docx, html.
    #[arg(short, long, default_value = "pdf,docx,html")]
    format: String,

    /// OCR server address (host:port) used as fallback when local extraction fails.
    #[arg(long, value_name = "HOST:PORT")]
    ocr_server: Option<String>,

    /// Convert exactly one PDF file; the directory argument is not needed.
    #[arg(long, value_name = "FILE")]
    single_file: Option<PathBuf>,

    /// Skip local PDF extraction and use only the OCR server.
    #[arg(long)]
    ocr_only: bool,

    /// Load conversion options from a TOML file; flags still take precedence.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug-level logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress everything except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let options = build_options(&cli)?;
    tracing::debug!("Resolved options: {:?}", options);

    let summary = if let Some(single) = &cli.single_file {
        run_single_file(single, options).await?
    } else {
        let input = cli
            .input
            .as_deref()
            .context("an input directory is required unless --single-file is given")?;
        run_directory(input, &cli.format, options).await?
    };

    if !cli.quiet {
        render_summary(&summary);
    }
    Ok(())
}

/// Map the config file (if any) plus CLI flags to `ConvertOptions`.
fn build_options(cli: &Cli) -> Result<ConvertOptions> {
    let mut options = match &cli.config {
        Some(path) => ConvertOptions::from_toml_file(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => ConvertOptions::default(),
    };
    if cli.ocr_server.is_some() {
        options.ocr_server = cli.ocr_server.clone();
    }
    if cli.ocr_only {
        options.pdf.ocr_only = true;
    }
    Ok(options)
}

/// Convert one PDF in place, next to wherever it lives.
async fn run_single_file(file: &Path, mut options: ConvertOptions) -> Result<BatchSummary> {
    options.pdf.single_file = Some(file.to_path_buf());
    let dir = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    convert(&dir, "pdf", &options)
        .await
        .with_context(|| format!("Failed to convert {}", file.display()))
}

/// Directory mode: PDFs run under the supervisor (per-file isolation plus the
/// zero-byte retry); the remaining formats go through the plain batch path.
async fn run_directory(
    input: &Path,
    formats: &str,
    options: ConvertOptions,
) -> Result<BatchSummary> {
    let requested = parse_format_list(formats)?;
    let mut summary = BatchSummary::new();

    if requested.contains(&DocumentFormat::Pdf) {
        let supervisor = Supervisor::from_options(&options).await?;
        summary.merge(
            supervisor
                .run(input, DocumentFormat::Pdf)
                .await
                .with_context(|| format!("Failed to convert PDFs in {}", input.display()))?,
        );
    }

    let rest: Vec<&str> = requested
        .iter()
        .filter(|format| **format != DocumentFormat::Pdf)
        .map(|format| format.as_str())
        .collect();
    if !rest.is_empty() {
        summary.merge(
            convert(input, &rest.join(","), &options)
                .await
                .with_context(|| format!("Failed to convert files in {}", input.display()))?,
        );
    }

    Ok(summary)
}

fn render_summary(summary: &BatchSummary) {
    for outcome in &summary.outcomes {
        let status = match outcome.status {
            ConversionStatus::Converted => "converted",
            ConversionStatus::Failed => "failed",
            ConversionStatus::Skipped => "skipped",
        };
        match &outcome.error {
            Some(error) => println!(
                "  {:<9} {} (ocr={}, {:.1}s): {}",
                status,
                outcome.path.display(),
                outcome.used_ocr,
                outcome.elapsed.as_secs_f64(),
                error
            ),
            None => println!(
                "  {:<9} {} (ocr={}, {:.1}s)",
                status,
                outcome.path.display(),
                outcome.used_ocr,
                outcome.elapsed.as_secs_f64()
            ),
        }
    }
    println!(
        "{} attempted: {} succeeded, {} failed, {} skipped",
        summary.attempted, summary.succeeded, summary.failed, summary.skipped
    );
}
