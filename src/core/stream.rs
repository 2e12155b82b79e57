//! Streaming and option types for img-grab
//!
//! Provides the AsyncRead adapter used to pull response bodies in chunks.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncRead;
use futures::TryStreamExt;

use crate::core::downloader::ImageOutcome;

/// Default output directory, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "images";

/// Per-request timeout applied to the page and every image
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Size of each read from a response body
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Called once per image, as soon as its outcome is known
pub type ImageCallback = Arc<dyn Fn(&ImageOutcome) + Send + Sync>;

/// Options for a scrape run
#[derive(Clone)]
pub struct ScrapeOptions {
    /// Directory the images are written to; created if absent
    pub output_dir: PathBuf,

    /// Timeout for each individual request
    pub timeout: Duration,

    /// Buffer size for streaming image bodies to disk
    pub chunk_size: usize,

    /// Optional per-image report hook
    pub on_image: Option<ImageCallback>,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            timeout: DEFAULT_TIMEOUT,
            chunk_size: DEFAULT_CHUNK_SIZE,
            on_image: None,
        }
    }
}

impl std::fmt::Debug for ScrapeOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrapeOptions")
            .field("output_dir", &self.output_dir)
            .field("timeout", &self.timeout)
            .field("chunk_size", &self.chunk_size)
            .field("on_image", &self.on_image.is_some())
            .finish()
    }
}

/// Exposes an HTTP response body as an AsyncRead
pub fn create_http_stream(response: reqwest::Response) -> impl AsyncRead + Send + Unpin {
    tokio_util::io::StreamReader::new(
        response.bytes_stream().map_err(std::io::Error::other)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ScrapeOptions::default();
        assert_eq!(options.output_dir, PathBuf::from("images"));
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert_eq!(options.chunk_size, 8192);
        assert!(options.on_image.is_none());
    }
}
