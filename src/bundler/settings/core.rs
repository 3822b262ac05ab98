//! Core Settings struct and implementations.

use std::path::{Path, PathBuf};

/// GitHub API endpoint describing the latest bundletool release.
pub const BUNDLETOOL_RELEASES_URL: &str =
    "https://api.github.com/repos/google/bundletool/releases/latest";

/// File name of the cached bundletool jar.
pub const BUNDLETOOL_FILE_NAME: &str = "bundletool.jar";

/// User-Agent sent to the release API, which rejects anonymous requests.
pub const DEFAULT_USER_AGENT: &str = concat!("kodegen-bundler-aab/", env!("CARGO_PKG_VERSION"));

/// Process-wide settings for the conversion pipeline.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). Unlike a
/// [`ConversionRequest`](super::ConversionRequest), settings outlive a single
/// conversion and are shared by every request that goes through a
/// [`Converter`](crate::bundler::Converter).
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_aab::bundler::SettingsBuilder;
///
/// # fn example() -> kodegen_bundler_aab::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .toolchain_dir("/var/cache/bundletool")
///     .java("/usr/lib/jvm/java-17/bin/java")
///     .build()?;
///
/// assert!(settings.bundletool_path().ends_with("bundletool.jar"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Java launcher used for the runtime probe and for running bundletool.
    java: PathBuf,

    /// keytool launcher used to generate missing keystores.
    keytool: PathBuf,

    /// Directory holding the cached bundletool jar.
    toolchain_dir: PathBuf,

    /// Release metadata endpoint.
    release_url: String,

    /// User-Agent header for release API requests.
    user_agent: String,

    /// Parent of the per-request scratch directories.
    scratch_root: PathBuf,
}

impl Settings {
    /// Returns the Java launcher.
    pub fn java(&self) -> &Path {
        &self.java
    }

    /// Returns the keytool launcher.
    pub fn keytool(&self) -> &Path {
        &self.keytool
    }

    /// Returns the toolchain cache directory.
    pub fn toolchain_dir(&self) -> &Path {
        &self.toolchain_dir
    }

    /// Returns the well-known location of the cached bundletool jar.
    pub fn bundletool_path(&self) -> PathBuf {
        self.toolchain_dir.join(BUNDLETOOL_FILE_NAME)
    }

    /// Returns the release metadata URL.
    pub fn release_url(&self) -> &str {
        &self.release_url
    }

    /// Returns the User-Agent for release API requests.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the directory under which scratch directories are created.
    pub fn scratch_root(&self) -> &Path {
        &self.scratch_root
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        java: PathBuf,
        keytool: PathBuf,
        toolchain_dir: PathBuf,
        release_url: String,
        user_agent: String,
        scratch_root: PathBuf,
    ) -> Self {
        Self {
            java,
            keytool,
            toolchain_dir,
            release_url,
            user_agent,
            scratch_root,
        }
    }
}
