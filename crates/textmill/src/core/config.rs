//! Conversion options and configuration loading.
//!
//! Options can be built programmatically, loaded from a TOML project file, or
//! assembled from CLI flags. [`ConvertOptions::validate`] performs the checks
//! that do not need the network; whether a configured OCR server actually
//! answers is probed once at the start of a batch.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TextmillError};
use crate::ocr::validate_server_address;

/// Options for a conversion run.
///
/// # Example
///
/// ```rust
/// use textmill::core::config::ConvertOptions;
///
/// let mut options = ConvertOptions::default();
/// options.ocr_server = Some("localhost:9998".to_string());
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// OCR service address as `host:port` (None = OCR fallback disabled).
    #[serde(default)]
    pub ocr_server: Option<String>,

    /// PDF-specific options.
    #[serde(default)]
    pub pdf: PdfOptions,
}

/// PDF-specific conversion options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PdfOptions {
    /// Convert only this file instead of scanning the input directory.
    #[serde(default)]
    pub single_file: Option<PathBuf>,

    /// Skip local extraction and use only the OCR service.
    ///
    /// Requires a configured, reachable OCR server; violating that fails the
    /// whole run before any file is touched.
    #[serde(default)]
    pub ocr_only: bool,
}

impl ConvertOptions {
    /// Load options from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `TextmillError::Validation` if the file cannot be read or is
    /// invalid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            TextmillError::validation(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            TextmillError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e))
        })
    }

    /// Check the options for configuration errors that need no network access.
    ///
    /// Catches a malformed `ocr_server` address and `ocr_only` without any
    /// server configured. Reachability is checked separately by the batch
    /// driver's one-time probe.
    pub fn validate(&self) -> Result<()> {
        if let Some(addr) = &self.ocr_server {
            validate_server_address(addr)?;
        }
        if self.pdf.ocr_only && self.ocr_server.is_none() {
            return Err(TextmillError::validation(
                "ocr-only conversion requested but no OCR server is configured",
            ));
        }
        Ok(())
    }
}
