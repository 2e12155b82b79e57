//! Core download functionality for img-grab
//!
//! Drives the page -> references -> URLs -> files pipeline. Images are
//! downloaded one at a time, in discovery order, and each failure stays
//! local to its image.

use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tempfile::TempPath;
use reqwest::{Client, ClientBuilder};
use once_cell::sync::Lazy;
use log::{debug, info, warn};

use crate::core::error::{describe_http_error, describe_status, Error, Result};
use crate::core::markup::extract_image_refs;
use crate::core::page::fetch_page;
use crate::core::resolve::{resolve_filename, resolve_reference};
use crate::core::stream::{create_http_stream, ScrapeOptions};

/// Prefix and suffix of files still being written
const STAGING_PREFIX: &str = ".img-grab-";
const PARTIAL_SUFFIX: &str = ".part";

/// Global HTTP client shared by every request of the process
static GLOBAL_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .tcp_keepalive(Duration::from_secs(60))
        .pool_idle_timeout(Duration::from_secs(90))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(format!("img-grab/{}", env!("IMG_GRAB_VERSION")))
        .build()
        .expect("Failed to create HTTP client")
});

/// An image reference resolved to a URL and destination filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedImage {
    /// 1-based position in discovery order
    pub ordinal: usize,
    /// Absolute URL to fetch
    pub url: String,
    /// File name inside the output directory
    pub filename: String,
}

/// Terminal state of one image
#[derive(Debug)]
pub enum ImageStatus {
    /// Body fully written to `path`
    Written {
        filename: String,
        path: PathBuf,
        bytes: u64,
    },
    /// Download or write failed; nothing was left behind
    Failed(Error),
}

/// Result of processing one image
#[derive(Debug)]
pub struct ImageOutcome {
    pub ordinal: usize,
    pub url: String,
    pub status: ImageStatus,
}

impl ImageOutcome {
    /// True if the image ended up on disk
    pub fn is_written(&self) -> bool {
        matches!(self.status, ImageStatus::Written { .. })
    }
}

/// Sequential page image downloader
pub struct Downloader {
    client: Client,
    options: ScrapeOptions,
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new()
    }
}

impl Downloader {
    /// Create a new downloader with default options
    pub fn new() -> Self {
        Self::with_options(ScrapeOptions::default())
    }

    /// Create a new downloader with custom options
    pub fn with_options(options: ScrapeOptions) -> Self {
        Self {
            client: GLOBAL_CLIENT.clone(),
            options,
        }
    }

    /// Options this downloader was built with
    pub fn options(&self) -> &ScrapeOptions {
        &self.options
    }

    /// Fetch the page and resolve every image it references, without
    /// downloading anything or touching the filesystem.
    pub async fn plan(&self, page_url: &str) -> Result<Vec<PlannedImage>> {
        let html = fetch_page(&self.client, page_url, self.options.timeout).await?;

        let refs = extract_image_refs(&html);
        info!("Found {} image reference(s) on {page_url}", refs.len());

        let planned = refs
            .iter()
            .enumerate()
            .map(|(idx, reference)| {
                let ordinal = idx + 1;
                let url = resolve_reference(reference, page_url);
                let filename = resolve_filename(&url, ordinal);
                debug!("#{ordinal}: {reference} -> {url} -> {filename}");
                PlannedImage { ordinal, url, filename }
            })
            .collect();

        Ok(planned)
    }

    /// Download every image on the page into the output directory.
    ///
    /// Returns `Err` only when the page itself cannot be fetched or the
    /// output directory cannot be created. Per-image failures are carried in
    /// the returned outcomes and reported through `on_image`.
    pub async fn scrape(&self, page_url: &str) -> Result<Vec<ImageOutcome>> {
        let planned = self.plan(page_url).await?;
        self.download_all(planned).await
    }

    /// Download already planned images, strictly in the given order.
    pub async fn download_all(&self, planned: Vec<PlannedImage>) -> Result<Vec<ImageOutcome>> {
        tokio::fs::create_dir_all(&self.options.output_dir).await?;

        let mut outcomes = Vec::with_capacity(planned.len());
        for image in planned {
            let status = match self.download_planned(&image).await {
                Ok((path, bytes)) => ImageStatus::Written {
                    filename: image.filename,
                    path,
                    bytes,
                },
                Err(e) => {
                    warn!("Image #{} failed: {e}", image.ordinal);
                    ImageStatus::Failed(e)
                }
            };

            let outcome = ImageOutcome {
                ordinal: image.ordinal,
                url: image.url,
                status,
            };
            if let Some(ref on_image) = self.options.on_image {
                on_image(&outcome);
            }
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    /// Download a single resolved URL into the output directory.
    ///
    /// `ordinal` is the 1-based discovery position, used for the fallback
    /// filename. Returns the path written.
    pub async fn download_image(&self, url: &str, ordinal: usize) -> Result<PathBuf> {
        let image = PlannedImage {
            ordinal,
            url: url.to_string(),
            filename: resolve_filename(url, ordinal),
        };
        let (path, _) = self.download_planned(&image).await?;
        Ok(path)
    }

    async fn download_planned(&self, image: &PlannedImage) -> Result<(PathBuf, u64)> {
        let url = image.url.as_str();

        let response = self
            .client
            .get(url)
            .timeout(self.options.timeout)
            .send()
            .await
            .map_err(|e| Error::resource(url, describe_http_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::resource(url, describe_status(status)));
        }

        let path = self.options.output_dir.join(&image.filename);
        let (file, staged) = staging_file(&self.options.output_dir)
            .map_err(|e| Error::resource(url, format!("I/O error: {e}")))?;
        let stream = create_http_stream(response);

        // `staged` deletes the file when dropped, on every error path below
        let bytes = self
            .stream_to_file(stream, tokio::fs::File::from_std(file))
            .await
            .map_err(|reason| Error::resource(url, reason))?;

        staged
            .persist(&path)
            .map_err(|e| Error::resource(url, format!("I/O error: {}", e.error)))?;
        debug!("Wrote {bytes} bytes to {}", path.display());
        Ok((path, bytes))
    }

    /// Copy the body into `file` in `chunk_size` reads. Returns bytes written.
    async fn stream_to_file(
        &self,
        mut stream: impl AsyncRead + Unpin,
        mut file: tokio::fs::File,
    ) -> std::result::Result<u64, String> {
        let mut buffer = vec![0u8; self.options.chunk_size.max(1)];
        let mut written = 0u64;

        loop {
            let bytes_read = stream
                .read(&mut buffer)
                .await
                .map_err(|e| format!("stream read error: {}", describe_stream_error(&e)))?;

            if bytes_read == 0 {
                break;
            }

            file.write_all(&buffer[..bytes_read])
                .await
                .map_err(|e| format!("I/O error: {e}"))?;
            written += bytes_read as u64;
        }

        file.flush().await.map_err(|e| format!("I/O error: {e}"))?;
        Ok(written)
    }
}

/// Create a short-named staging file inside `dir`.
///
/// The name does not depend on the final filename, so any name the
/// filesystem accepts for the image also works while staging.
fn staging_file(dir: &Path) -> std::io::Result<(std::fs::File, TempPath)> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(STAGING_PREFIX).suffix(PARTIAL_SUFFIX);
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }
    Ok(builder.tempfile_in(dir)?.into_parts())
}

/// Unwrap the reqwest error hidden inside a StreamReader I/O error
fn describe_stream_error(err: &std::io::Error) -> String {
    match err.get_ref().and_then(|inner| inner.downcast_ref::<reqwest::Error>()) {
        Some(http) => describe_http_error(http),
        None => err.to_string(),
    }
}
