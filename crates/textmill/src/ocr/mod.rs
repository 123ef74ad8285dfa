//! Remote OCR fallback.
//!
//! The terminal fallback for any format is an external OCR/content-analysis
//! service speaking the Apache Tika wire protocol. [`OcrEngine`] is the seam
//! the pipeline depends on; [`RemoteOcrClient`] is the HTTP implementation.
//! Reachability is probed once per batch, never per file.

pub mod client;

pub use client::RemoteOcrClient;

use std::path::Path;

use async_trait::async_trait;

use crate::error::{Result, TextmillError};

/// An OCR service the pipeline can probe and call.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Whether the service currently answers. Errors count as unavailable.
    async fn available(&self) -> bool;

    /// Send the file's raw bytes to the service and return extracted text.
    async fn extract(&self, path: &Path) -> Result<String>;
}

/// Validate an OCR server address of the form `host:port`.
///
/// A scheme prefix, a missing or non-numeric port, and an empty host are all
/// configuration errors. Reachability is not checked here.
pub fn validate_server_address(address: &str) -> Result<()> {
    if address.contains("://") {
        return Err(TextmillError::validation(format!(
            "OCR server address must be host:port without a scheme: {}",
            address
        )));
    }
    let Some((host, port)) = address.rsplit_once(':') else {
        return Err(TextmillError::validation(format!(
            "OCR server address must be host:port: {}",
            address
        )));
    };
    if host.is_empty() {
        return Err(TextmillError::validation(format!(
            "OCR server address has an empty host: {}",
            address
        )));
    }
    if port.parse::<u16>().is_err() {
        return Err(TextmillError::validation(format!(
            "OCR server address has an invalid port: {}",
            address
        )));
    }
    Ok(())
}
