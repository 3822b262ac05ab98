//! Builder for constructing Settings.

use super::{
    Settings,
    core::{BUNDLETOOL_RELEASES_URL, DEFAULT_USER_AGENT},
};
use crate::bail;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Every field is optional; unset fields fall back to defaults suitable for a
/// machine with a JDK on `PATH`.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_aab::bundler::SettingsBuilder;
///
/// # fn example() -> kodegen_bundler_aab::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .toolchain_dir("/opt/bundletool")
///     .scratch_root("/var/tmp")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    java: Option<PathBuf>,
    keytool: Option<PathBuf>,
    toolchain_dir: Option<PathBuf>,
    release_url: Option<String>,
    user_agent: Option<String>,
    scratch_root: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the Java launcher.
    ///
    /// Default: `java` resolved from `PATH`
    pub fn java<P: AsRef<Path>>(mut self, java: P) -> Self {
        self.java = Some(java.as_ref().to_path_buf());
        self
    }

    /// Sets the keytool launcher.
    ///
    /// Default: `keytool` resolved from `PATH`
    pub fn keytool<P: AsRef<Path>>(mut self, keytool: P) -> Self {
        self.keytool = Some(keytool.as_ref().to_path_buf());
        self
    }

    /// Sets the directory where bundletool is cached.
    ///
    /// Default: `<user cache dir>/kodegen/bundletool`
    pub fn toolchain_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.toolchain_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Sets the release metadata endpoint.
    ///
    /// Default: GitHub "latest release" API for google/bundletool
    pub fn release_url(mut self, url: impl Into<String>) -> Self {
        self.release_url = Some(url.into());
        self
    }

    /// Sets the User-Agent sent with release API requests.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the parent directory for per-request scratch directories.
    ///
    /// Default: the system temp directory
    pub fn scratch_root<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.scratch_root = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the release URL is not an http(s) URL or the
    /// User-Agent is empty.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        let release_url = self
            .release_url
            .unwrap_or_else(|| BUNDLETOOL_RELEASES_URL.to_string());
        if !(release_url.starts_with("https://") || release_url.starts_with("http://")) {
            bail!("release URL must be http(s): {}", release_url);
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        if user_agent.trim().is_empty() {
            bail!("User-Agent must not be empty");
        }

        let toolchain_dir = self.toolchain_dir.unwrap_or_else(default_toolchain_dir);

        Ok(Settings::new(
            self.java.unwrap_or_else(|| PathBuf::from("java")),
            self.keytool.unwrap_or_else(|| PathBuf::from("keytool")),
            toolchain_dir,
            release_url,
            user_agent,
            self.scratch_root.unwrap_or_else(std::env::temp_dir),
        ))
    }
}

fn default_toolchain_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("kodegen")
        .join("bundletool")
}
