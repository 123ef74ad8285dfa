//! Error types for textmill.
//!
//! All fallible operations in the library return [`TextmillError`]:
//!
//! - Use `thiserror` for the `Error` trait implementation
//! - Preserve error chains with `#[source]` attributes
//! - Include context in error messages (file paths, addresses, formats)
//!
//! **System errors bubble up unchanged:** `TextmillError::Io` (from
//! `std::io::Error`) indicates a real filesystem problem and is never wrapped
//! or suppressed. Application errors are wrapped with context: `Parsing` for
//! corrupt or unreadable documents, `Ocr` for remote OCR failures,
//! `Validation` for bad options or addresses.
//!
//! # Example
//!
//! ```rust
//! use textmill::{Result, TextmillError};
//!
//! fn check_address(addr: &str) -> Result<()> {
//!     if addr.is_empty() {
//!         return Err(TextmillError::validation("OCR server address is empty"));
//!     }
//!     Ok(())
//! }
//! ```
use thiserror::Error;

/// Result type alias using `TextmillError`.
pub type Result<T> = std::result::Result<T, TextmillError>;

/// Main error type for all textmill operations.
///
/// # Variants
///
/// - `Io` - File system and I/O errors (always bubble up)
/// - `Parsing` - Document parsing errors (corrupt files, undecodable streams)
/// - `Ocr` - Remote OCR service errors (unreachable, non-success status)
/// - `Validation` - Invalid options, addresses, or file selections
/// - `UnsupportedFormat` - Requested format the library does not handle
/// - `Other` - Catch-all for uncommon errors
#[derive(Debug, Error)]
pub enum TextmillError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("OCR error: {message}")]
    Ocr {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Other(String),
}

impl From<crate::pdf::error::PdfError> for TextmillError {
    fn from(err: crate::pdf::error::PdfError) -> Self {
        TextmillError::Parsing {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl TextmillError {
    /// Create a Parsing error
    pub fn parsing<S: Into<String>>(message: S) -> Self {
        Self::Parsing {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Parsing error with source
    pub fn parsing_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Parsing {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an Ocr error
    pub fn ocr<S: Into<String>>(message: S) -> Self {
        Self::Ocr {
            message: message.into(),
            source: None,
        }
    }

    /// Create an Ocr error with source
    pub fn ocr_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Ocr {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a Validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Validation error with source
    pub fn validation_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Validation {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
