//! Page fetching for img-grab

use std::time::Duration;
use log::debug;
use reqwest::Client;

use crate::core::error::{describe_http_error, describe_status, Error, Result};

/// Fetches the target page and returns its body as text.
///
/// Single attempt. Network failures, timeouts and non-2xx statuses all
/// become [`Error::PageFetch`].
pub async fn fetch_page(client: &Client, url: &str, timeout: Duration) -> Result<String> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| Error::page(url, describe_http_error(&e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::page(url, describe_status(status)));
    }

    let body = response
        .text()
        .await
        .map_err(|e| Error::page(url, describe_http_error(&e)))?;

    debug!("Fetched page {url} ({} bytes)", body.len());
    Ok(body)
}
