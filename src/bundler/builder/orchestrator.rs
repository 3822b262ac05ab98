//! Main conversion orchestration.
//!
//! This module provides the [`Converter`] that runs one conversion request
//! through the pipeline stages in order.

use crate::bundler::{
    ConversionRequest, Error, Result, Settings,
    error::ErrorExt,
    platform::bundletool::{
        BundletoolCache, ToolchainProvider, build_universal_apks, extract_and_replace,
    },
    utils::process::{ProcessRunner, SystemRunner},
};
use std::path::{Path, PathBuf};

use super::{
    signing::{KeystoreProvider, KeytoolProvisioner},
    tool_detection::probe_runtime,
};

/// Converts Android App Bundles into universal APKs in place.
///
/// # Pipeline
///
/// 1. Probe the Java runtime
/// 2. Ensure bundletool is cached
/// 3. Ensure the signing keystore exists
/// 4. Re-check that bundle, keystore and bundletool are on disk
/// 5. Run `bundletool build-apks --mode=universal`
/// 6. Extract `universal.apk` over the original bundle
///
/// Each stage must finish before the next starts and the first failure ends
/// the conversion. Nothing is retried.
///
/// The toolchain cache and keystore provisioner are shared by every request a
/// converter handles; both are idempotent, so a converter can serve concurrent
/// requests for different artifacts.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_aab::bundler::{ConversionRequest, Converter, KeystoreSpec, SettingsBuilder};
///
/// # async fn example() -> kodegen_bundler_aab::bundler::Result<()> {
/// let converter = Converter::new(SettingsBuilder::new().build()?);
/// let request = ConversionRequest::from_path("/data/app.aab", KeystoreSpec::default());
///
/// let apk = converter.convert(&request).await?;
/// assert_eq!(apk, request.bundle_path());
/// # Ok(())
/// # }
/// ```
pub struct Converter<R = SystemRunner, T = BundletoolCache, K = KeytoolProvisioner<SystemRunner>> {
    settings: Settings,
    runner: R,
    toolchain: T,
    keystore: K,
}

impl<R, T, K> std::fmt::Debug for Converter<R, T, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Converter {
    /// Creates a converter that runs real processes and caches bundletool
    /// where `settings` says.
    pub fn new(settings: Settings) -> Self {
        let toolchain = BundletoolCache::from_settings(&settings);
        let keystore = KeytoolProvisioner::new(SystemRunner, settings.keytool());
        Self {
            settings,
            runner: SystemRunner,
            toolchain,
            keystore,
        }
    }
}

impl<R, T, K> Converter<R, T, K>
where
    R: ProcessRunner,
    T: ToolchainProvider,
    K: KeystoreProvider,
{
    /// Creates a converter from explicit components.
    pub fn with_components(settings: Settings, runner: R, toolchain: T, keystore: K) -> Self {
        Self {
            settings,
            runner,
            toolchain,
            keystore,
        }
    }

    /// Returns a reference to the converter settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Converts the request's bundle into a universal APK at the same path.
    ///
    /// Returns the request's path unchanged, without running anything, when
    /// the request is not an app bundle.
    ///
    /// # Errors
    ///
    /// The first stage failure: [`Error::RuntimeMissing`], [`Error::Download`],
    /// [`Error::KeyGen`], [`Error::MissingPrecondition`],
    /// [`Error::Conversion`] or [`Error::Extraction`].
    pub async fn convert(&self, request: &ConversionRequest) -> Result<PathBuf> {
        let bundle = request.bundle_path();

        if !request.is_bundle_format() {
            log::debug!("{} is not an app bundle, leaving it as is", bundle.display());
            return Ok(bundle.to_path_buf());
        }

        log::info!("Converting {} to a universal APK", bundle.display());

        probe_runtime(&self.runner, self.settings.java()).await?;
        let bundletool = self.toolchain.ensure_toolchain().await?;
        self.keystore.ensure_keystore(request.keystore()).await?;

        verify_preconditions(bundle, request.keystore().path(), &bundletool).await?;

        let archive = build_universal_apks(
            &self.runner,
            self.settings.java(),
            &bundletool,
            bundle,
            request.keystore(),
            &request.archive_path(),
        )
        .await?;

        extract_and_replace(&archive, bundle, self.settings.scratch_root()).await?;

        Ok(bundle.to_path_buf())
    }
}

/// Fails with a named precondition instead of letting bundletool fail opaquely.
async fn verify_preconditions(bundle: &Path, keystore: &Path, bundletool: &Path) -> Result<()> {
    for (what, path) in [
        ("app bundle", bundle),
        ("keystore", keystore),
        ("bundletool", bundletool),
    ] {
        let present = tokio::fs::try_exists(path)
            .await
            .fs_context("checking", path)?;
        if !present {
            return Err(Error::MissingPrecondition {
                what,
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}
