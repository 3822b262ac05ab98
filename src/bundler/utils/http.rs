//! HTTP utilities for downloading bundler tools.
//!
//! Provides release-metadata lookup and streaming file downloads.

use crate::bundler::error::{Error, ErrorExt, Result};
use futures_lite::StreamExt;
use serde::Deserialize;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Release description returned by the GitHub releases API.
#[derive(Debug, Deserialize)]
pub struct Release {
    /// Tag of the release, e.g. "1.17.2"
    #[serde(default)]
    pub tag_name: Option<String>,
    /// Downloadable files attached to the release
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// One downloadable release file.
#[derive(Debug, Deserialize)]
pub struct ReleaseAsset {
    /// Asset file name
    #[serde(default)]
    pub name: Option<String>,
    /// Direct download URL
    pub browser_download_url: String,
}

fn download_error(reason: impl Into<String>, source: reqwest::Error) -> Error {
    Error::Download {
        reason: reason.into(),
        source: Some(source),
    }
}

/// Builds the client used for tool downloads.
///
/// Connections are kept alive between the metadata request and the asset
/// request; gzip bodies are decompressed transparently.
pub fn client(user_agent: &str) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .gzip(true)
        .build()
        .map_err(|e| download_error("failed to build HTTP client", e))
}

/// Fetches release metadata from `url`.
pub async fn fetch_release(client: &reqwest::Client, url: &str) -> Result<Release> {
    log::debug!("Fetching release metadata from {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| download_error(format!("release metadata request to {url} failed"), e))?;

    response
        .json::<Release>()
        .await
        .map_err(|e| download_error("release metadata is not valid JSON", e))
}

/// Streams the body of `url` into `dest`, returning the number of bytes written.
///
/// The body is never held in memory as a whole; chunks are written as they arrive.
pub async fn download_to(client: &reqwest::Client, url: &str, dest: &Path) -> Result<u64> {
    log::info!("Downloading {}", url);

    let response = client
        .get(url)
        .header(reqwest::header::CACHE_CONTROL, "max-age=0")
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| download_error(format!("request to {url} failed"), e))?;

    let file = tokio::fs::File::create(dest)
        .await
        .fs_context("creating download target", dest)?;
    let mut writer = tokio::io::BufWriter::new(file);

    let mut written = 0u64;
    let mut stream = std::pin::pin!(response.bytes_stream());
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| download_error(format!("download of {url} interrupted"), e))?;
        writer
            .write_all(&chunk)
            .await
            .fs_context("writing download", dest)?;
        written += chunk.len() as u64;
    }

    writer.flush().await.fs_context("flushing download", dest)?;
    writer
        .into_inner()
        .sync_all()
        .await
        .fs_context("syncing download", dest)?;

    Ok(written)
}
