//! # img-grab
//!
//! Fetches one web page, finds every `<img src>` on it and downloads the
//! referenced images, one after another, into a local directory.
//!
//! ```no_run
//! # async fn demo() -> img_grab::Result<()> {
//! let outcomes = img_grab::download_images("https://example.com/gallery", "images").await?;
//! for outcome in &outcomes {
//!     println!("#{} {}: written = {}", outcome.ordinal, outcome.url, outcome.is_written());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! A page that cannot be fetched is an error. An image that cannot be
//! fetched is only an [`ImageStatus::Failed`] entry; the remaining images
//! are still attempted.

use std::path::Path;

pub mod core;

pub use crate::core::downloader::{Downloader, ImageOutcome, ImageStatus, PlannedImage};
pub use crate::core::error::{Error, Result};
pub use crate::core::markup::extract_image_refs;
pub use crate::core::resolve::{fallback_filename, resolve_filename, resolve_reference};
pub use crate::core::stream::{
    ImageCallback, ScrapeOptions, DEFAULT_CHUNK_SIZE, DEFAULT_OUTPUT_DIR, DEFAULT_TIMEOUT,
};

/// Download every image referenced by `url` into `output_dir`
pub async fn download_images(url: &str, output_dir: impl AsRef<Path>) -> Result<Vec<ImageOutcome>> {
    let options = ScrapeOptions {
        output_dir: output_dir.as_ref().to_path_buf(),
        ..Default::default()
    };
    download_images_with_options(url, options).await
}

/// Download every image referenced by `url` with custom options
pub async fn download_images_with_options(
    url: &str,
    options: ScrapeOptions,
) -> Result<Vec<ImageOutcome>> {
    Downloader::with_options(options).scrape(url).await
}

/// Resolve the images referenced by `url` without downloading them
pub async fn plan_images(url: &str, options: ScrapeOptions) -> Result<Vec<PlannedImage>> {
    Downloader::with_options(options).plan(url).await
}
