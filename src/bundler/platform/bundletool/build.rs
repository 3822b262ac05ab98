//! bundletool `build-apks` execution.
//!
//! Produces a signed `.apks` archive holding a single universal APK.

use crate::bundler::{
    ConversionFailure, KeystoreSpec, Result,
    utils::process::{ProcessRunner, Termination},
};
use std::path::{Path, PathBuf};

/// Arguments for `java -jar <bundletool> build-apks` in universal mode.
pub fn build_apks_args(
    bundletool: &Path,
    bundle: &Path,
    output: &Path,
    keystore: &KeystoreSpec,
) -> Vec<String> {
    vec![
        "-jar".to_string(),
        bundletool.display().to_string(),
        "build-apks".to_string(),
        format!("--bundle={}", bundle.display()),
        format!("--output={}", output.display()),
        format!("--ks={}", keystore.path().display()),
        format!("--ks-pass=pass:{}", keystore.store_password),
        format!("--ks-key-alias={}", keystore.alias),
        format!("--key-pass=pass:{}", keystore.key_password),
        "--overwrite".to_string(),
        "--mode=universal".to_string(),
    ]
}

/// Runs bundletool to turn `bundle` into a universal `.apks` archive at `output`.
///
/// Success means exit code 0 and nothing else. The invocation is not retried:
/// bundletool is deterministic for identical inputs.
///
/// # Errors
///
/// [`Error::Conversion`](crate::bundler::Error::Conversion) carrying
/// [`ConversionFailure::Spawn`], [`ConversionFailure::ExitCode`] or
/// [`ConversionFailure::Signal`].
pub async fn build_universal_apks<R: ProcessRunner>(
    runner: &R,
    java: &Path,
    bundletool: &Path,
    bundle: &Path,
    keystore: &KeystoreSpec,
    output: &Path,
) -> Result<PathBuf> {
    log::info!("Running bundletool build-apks for {}", bundle.display());

    let args = build_apks_args(bundletool, bundle, output, keystore);
    let result = runner
        .run(java, &args)
        .await
        .map_err(ConversionFailure::Spawn)?;

    match result.termination() {
        Termination::Exited(0) => {
            log::info!("✓ Built {}", output.display());
            Ok(output.to_path_buf())
        }
        Termination::Exited(code) => {
            log::error!(
                "bundletool exited with status {}: {}",
                code,
                String::from_utf8_lossy(&result.stderr).trim()
            );
            Err(ConversionFailure::ExitCode(code).into())
        }
        Termination::Signaled(signal) => Err(ConversionFailure::Signal(signal).into()),
    }
}
