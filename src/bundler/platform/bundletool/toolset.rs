//! bundletool acquisition and caching.
//!
//! bundletool is fetched from its latest GitHub release on first use and kept
//! at a single well-known path. Presence of that file is the only freshness
//! check: a cached jar is never re-downloaded.

use crate::bundler::{
    Error, Result, Settings,
    error::ErrorExt,
    utils::http,
};
use std::future::Future;
use std::path::{Path, PathBuf};

/// Makes the packaging tool available locally.
pub trait ToolchainProvider: Send + Sync {
    /// Ensures the tool exists on disk and returns its path.
    ///
    /// Idempotent: once the file is present no further network access happens.
    fn ensure_toolchain(&self) -> impl Future<Output = Result<PathBuf>> + Send;
}

/// On-disk bundletool cache populated from the release API.
#[derive(Debug, Clone)]
pub struct BundletoolCache {
    binary_path: PathBuf,
    release_url: String,
    user_agent: String,
}

impl BundletoolCache {
    /// Creates a cache for the jar at `binary_path`.
    pub fn new(
        binary_path: impl Into<PathBuf>,
        release_url: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            binary_path: binary_path.into(),
            release_url: release_url.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Creates a cache at the location configured in `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.bundletool_path(),
            settings.release_url(),
            settings.user_agent(),
        )
    }

    /// Returns where the jar is (or will be) cached.
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    async fn download(&self) -> Result<()> {
        let dir = self
            .binary_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        tokio::fs::create_dir_all(dir)
            .await
            .fs_context("creating toolchain directory", dir)?;

        log::info!("Downloading bundletool...");

        let client = http::client(&self.user_agent)?;
        let release = http::fetch_release(&client, &self.release_url).await?;
        let asset = release.assets.first().ok_or_else(|| Error::Download {
            reason: format!("release at {} lists no assets", self.release_url),
            source: None,
        })?;
        log::debug!(
            "Selected release asset {}",
            asset.name.as_deref().unwrap_or(&asset.browser_download_url)
        );

        // Written next to the final path and renamed into place only once complete,
        // so an interrupted download never looks like a cached jar.
        let partial = tempfile::Builder::new()
            .prefix(".bundletool-")
            .suffix(".part")
            .tempfile_in(dir)
            .fs_context("creating temporary download file", dir)?
            .into_temp_path();

        let size = http::download_to(&client, &asset.browser_download_url, &partial).await?;

        partial.persist(&self.binary_path).map_err(|e| Error::Fs {
            context: "installing bundletool",
            path: self.binary_path.clone(),
            error: e.error,
        })?;

        log::info!(
            "✓ bundletool {} downloaded ({} bytes)",
            release.tag_name.as_deref().unwrap_or("latest"),
            size
        );
        Ok(())
    }
}

impl ToolchainProvider for BundletoolCache {
    async fn ensure_toolchain(&self) -> Result<PathBuf> {
        if tokio::fs::try_exists(&self.binary_path)
            .await
            .fs_context("checking bundletool cache", &self.binary_path)?
        {
            log::debug!("bundletool already cached at {}", self.binary_path.display());
            return Ok(self.binary_path.clone());
        }

        self.download().await?;
        Ok(self.binary_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    const JAR: &[u8] = b"PK\x03\x04 pretend bundletool jar";

    type Route = fn(&str, &str) -> Option<Vec<u8>>;

    fn respond(body: Option<Vec<u8>>) -> Vec<u8> {
        match body {
            Some(body) => {
                let mut out = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                )
                .into_bytes();
                out.extend_from_slice(&body);
                out
            }
            None => b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_vec(),
        }
    }

    /// Serves complete 200/404 responses built from `route`.
    async fn serve(route: Route) -> (String, Arc<Mutex<Vec<String>>>) {
        serve_raw(move |base, path| respond(route(base, path))).await
    }

    /// Minimal HTTP/1.1 server on loopback. Writes whatever bytes `route`
    /// returns, then closes. Records each request head.
    async fn serve_raw<F>(route: F) -> (String, Arc<Mutex<Vec<String>>>)
    where
        F: Fn(&str, &str) -> Vec<u8> + Send + 'static,
    {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let (server_base, seen) = (base.clone(), requests.clone());
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }
                let head = String::from_utf8_lossy(&head).into_owned();
                let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
                seen.lock().unwrap().push(head);

                let response = route(&server_base, &path);
                let _ = socket.write_all(&response).await;
                let _ = socket.shutdown().await;
            }
        });

        (base, requests)
    }

    fn release_with_jar(base: &str, path: &str) -> Option<Vec<u8>> {
        match path {
            "/latest" => Some(
                format!(
                    r#"{{"tag_name":"1.17.2","assets":[{{"name":"bundletool-all-1.17.2.jar","browser_download_url":"{base}/bundletool.jar"}}]}}"#
                )
                .into_bytes(),
            ),
            "/bundletool.jar" => Some(JAR.to_vec()),
            _ => None,
        }
    }

    fn cache_in(dir: &Path, base: &str) -> BundletoolCache {
        BundletoolCache::new(
            dir.join("tools").join("bundletool.jar"),
            format!("{base}/latest"),
            "kodegen-test-agent",
        )
    }

    #[tokio::test]
    async fn downloads_first_asset_once() {
        let dir = tempfile::tempdir().unwrap();
        let (base, requests) = serve(release_with_jar).await;
        let cache = cache_in(dir.path(), &base);

        let first = cache.ensure_toolchain().await.unwrap();
        let second = cache.ensure_toolchain().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(std::fs::read(&first).unwrap(), JAR);

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 2, "metadata + asset, nothing on the second call");
        assert!(requests[0].starts_with("GET /latest "));
        assert!(
            requests[0]
                .to_ascii_lowercase()
                .contains("user-agent: kodegen-test-agent")
        );
        assert!(requests[1].starts_with("GET /bundletool.jar "));
    }

    #[tokio::test]
    async fn cached_jar_is_reused_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let (base, requests) = serve(release_with_jar).await;
        let cache = cache_in(dir.path(), &base);
        std::fs::create_dir_all(cache.binary_path().parent().unwrap()).unwrap();
        std::fs::write(cache.binary_path(), b"stale but present").unwrap();

        cache.ensure_toolchain().await.unwrap();
        cache.ensure_toolchain().await.unwrap();

        assert!(requests.lock().unwrap().is_empty());
        assert_eq!(std::fs::read(cache.binary_path()).unwrap(), b"stale but present");
    }

    #[tokio::test]
    async fn release_without_assets_is_download_error() {
        let dir = tempfile::tempdir().unwrap();
        let (base, _) = serve(|_, path| (path == "/latest").then(|| br#"{"assets":[]}"#.to_vec())).await;
        let cache = cache_in(dir.path(), &base);

        let err = cache.ensure_toolchain().await.unwrap_err();

        assert!(matches!(err, Error::Download { .. }));
        assert!(!cache.binary_path().exists());
    }

    #[tokio::test]
    async fn failed_asset_download_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        // Metadata points at an asset the server does not have.
        let (base, _) = serve(|base, path| {
            (path == "/latest").then(|| {
                format!(r#"{{"assets":[{{"browser_download_url":"{base}/missing.jar"}}]}}"#).into_bytes()
            })
        })
        .await;
        let cache = cache_in(dir.path(), &base);

        let err = cache.ensure_toolchain().await.unwrap_err();

        assert!(matches!(err, Error::Download { .. }));
        let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("tools")).unwrap().collect();
        assert!(leftovers.is_empty(), "unexpected files: {leftovers:?}");
    }

    #[tokio::test]
    async fn truncated_asset_body_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        // Announces 1000 bytes, sends 10, then hangs up.
        let (base, _) = serve_raw(|base, path| match path {
            "/latest" => respond(Some(
                format!(r#"{{"assets":[{{"browser_download_url":"{base}/bundletool.jar"}}]}}"#)
                    .into_bytes(),
            )),
            _ => {
                let mut out =
                    b"HTTP/1.1 200 OK\r\nContent-Length: 1000\r\nConnection: close\r\n\r\n".to_vec();
                out.extend_from_slice(&JAR[..10]);
                out
            }
        })
        .await;
        let cache = cache_in(dir.path(), &base);

        let err = cache.ensure_toolchain().await.unwrap_err();

        assert!(matches!(err, Error::Download { .. }));
        assert!(!cache.binary_path().exists());
        let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("tools")).unwrap().collect();
        assert!(leftovers.is_empty(), "unexpected files: {leftovers:?}");
    }

    #[tokio::test]
    async fn metadata_error_status_is_download_error() {
        let dir = tempfile::tempdir().unwrap();
        let (base, _) = serve(|_, _| None).await;

        let err = cache_in(dir.path(), &base).ensure_toolchain().await.unwrap_err();

        assert!(matches!(err, Error::Download { .. }));
    }
}
