//! Signing keystore provisioning.
//!
//! The universal APK is signed with a keystore that persists across
//! conversions. It is generated once with `keytool` and reused as long as the
//! file exists.

use crate::bundler::{
    Error, KeystoreSpec, Result,
    error::ErrorExt,
    utils::process::{ProcessRunner, Termination},
};
use std::future::Future;
use std::path::PathBuf;

/// Makes a signing keystore available.
pub trait KeystoreProvider: Send + Sync {
    /// Ensures a keystore exists at `spec.path`, generating it if absent.
    ///
    /// Idempotent: an existing file is never regenerated, whatever it contains.
    fn ensure_keystore(&self, spec: &KeystoreSpec) -> impl Future<Output = Result<()>> + Send;
}

/// Generates missing keystores with `keytool -genkey`.
#[derive(Debug, Clone)]
pub struct KeytoolProvisioner<R> {
    runner: R,
    keytool: PathBuf,
}

impl<R: ProcessRunner> KeytoolProvisioner<R> {
    /// Creates a provisioner that runs `keytool` through `runner`.
    pub fn new(runner: R, keytool: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            keytool: keytool.into(),
        }
    }
}

impl<R: ProcessRunner> KeystoreProvider for KeytoolProvisioner<R> {
    async fn ensure_keystore(&self, spec: &KeystoreSpec) -> Result<()> {
        let path = spec.path();
        if tokio::fs::try_exists(path)
            .await
            .fs_context("checking keystore", path)?
        {
            log::debug!("Keystore already present at {}", path.display());
            return Ok(());
        }

        log::info!("Generating keystore at {}", path.display());

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .fs_context("creating keystore directory", parent)?;
        }

        // Awaited to completion: bundletool must never run before the keystore exists.
        let output = self
            .runner
            .run(&self.keytool, &spec.keytool_args())
            .await
            .map_err(|e| Error::KeyGen {
                path: path.to_path_buf(),
                reason: format!("failed to execute {}: {}", self.keytool.display(), e),
            })?;

        match output.termination() {
            Termination::Exited(0) => {
                log::info!("✓ Keystore generated: {}", path.display());
                Ok(())
            }
            termination => Err(Error::KeyGen {
                path: path.to_path_buf(),
                reason: format!(
                    "keytool {:?}: {}",
                    termination,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            }),
        }
    }
}
