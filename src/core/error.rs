//! Error types for img-grab library
//!
//! Two failure stages matter to a run: the page itself, which aborts
//! everything, and individual images, which are reported and skipped.

use thiserror::Error;

/// Main error type for img-grab operations
#[derive(Debug, Error)]
pub enum Error {
    /// The target page could not be fetched; no images are processed
    #[error("failed to fetch page {url}: {reason}")]
    PageFetch { url: String, reason: String },

    /// A single image could not be downloaded or written
    #[error("failed to download {url}: {reason}")]
    ResourceFetch { url: String, reason: String },

    /// Local file I/O outside of a single image download
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid invocation input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Human readable cause, without the URL prefix
    pub fn reason(&self) -> String {
        match self {
            Error::PageFetch { reason, .. } | Error::ResourceFetch { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }

    pub(crate) fn page(url: &str, reason: impl Into<String>) -> Self {
        Error::PageFetch {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn resource(url: &str, reason: impl Into<String>) -> Self {
        Error::ResourceFetch {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

/// Describe a reqwest failure in a single line.
///
/// Timeouts and connection failures get a fixed prefix so the console output
/// reads the same regardless of the underlying hyper error chain.
pub(crate) fn describe_http_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else if let Some(status) = err.status() {
        format!("HTTP status {status}")
    } else if err.is_builder() {
        format!("invalid request: {err}")
    } else {
        err.to_string()
    }
}

/// Message for a non-success status code
pub(crate) fn describe_status(status: reqwest::StatusCode) -> String {
    format!("HTTP status {status}")
}

/// Convenience result type for img-grab operations
pub type Result<T> = std::result::Result<T, Error>;
