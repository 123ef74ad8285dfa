//! HTTP client for a Tika-compatible OCR service.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::core::io::read_file_async;
use crate::error::{Result, TextmillError};
use crate::ocr::{OcrEngine, validate_server_address};

/// Probe timeout. The probe runs once per batch and a slow answer means the
/// fallback is not worth waiting for.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Per-document extraction timeout. OCR on a large scanned PDF is slow, but
/// an unbounded request could hang a batch forever.
const EXTRACT_TIMEOUT: Duration = Duration::from_secs(300);

/// Client for an OCR service reachable at `host:port`.
///
/// Protocol: `GET /tika` answers the availability probe (200 or 204 counts as
/// up); `PUT /tika` with the raw document bytes and `Accept: text/plain`
/// returns the extracted text.
pub struct RemoteOcrClient {
    address: String,
    client: reqwest::Client,
}

impl RemoteOcrClient {
    /// Create a client for `address` (`host:port`, no scheme).
    ///
    /// # Errors
    ///
    /// Returns `TextmillError::Validation` for a malformed address and
    /// `TextmillError::Ocr` if the HTTP client cannot be constructed.
    pub fn new(address: impl Into<String>) -> Result<Self> {
        let address = address.into();
        validate_server_address(&address)?;

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| TextmillError::ocr_with_source("failed to create HTTP client", e))?;

        Ok(Self { address, client })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    fn endpoint(&self) -> String {
        format!("http://{}/tika", self.address)
    }
}

#[async_trait]
impl OcrEngine for RemoteOcrClient {
    async fn available(&self) -> bool {
        match self
            .client
            .get(self.endpoint())
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => matches!(response.status().as_u16(), 200 | 204),
            Err(_) => false,
        }
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = read_file_async(path).await?;

        let response = self
            .client
            .put(self.endpoint())
            .header(reqwest::header::ACCEPT, "text/plain")
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(bytes)
            .timeout(EXTRACT_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                TextmillError::ocr_with_source(
                    format!("OCR request to {} failed", self.address),
                    e,
                )
            })?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(TextmillError::ocr(format!(
                "OCR server returned status {}",
                response.status().as_u16()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| TextmillError::ocr_with_source("failed to read OCR response body", e))
    }
}
