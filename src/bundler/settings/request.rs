//! Per-artifact conversion request.

use super::KeystoreSpec;
use std::path::{Path, PathBuf};

/// One artifact to convert.
///
/// Immutable for the duration of a conversion. When `is_bundle_format` is
/// false the pipeline returns `bundle_path` untouched without spawning anything.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    bundle_path: PathBuf,
    is_bundle_format: bool,
    keystore: KeystoreSpec,
}

impl ConversionRequest {
    /// Creates a request with an explicit format flag.
    pub fn new(bundle_path: impl Into<PathBuf>, is_bundle_format: bool, keystore: KeystoreSpec) -> Self {
        Self {
            bundle_path: bundle_path.into(),
            is_bundle_format,
            keystore,
        }
    }

    /// Creates a request, treating the file as a bundle when it has an `.aab` extension.
    pub fn from_path(bundle_path: impl Into<PathBuf>, keystore: KeystoreSpec) -> Self {
        let bundle_path = bundle_path.into();
        let is_bundle_format = has_bundle_extension(&bundle_path);
        Self::new(bundle_path, is_bundle_format, keystore)
    }

    /// Path of the artifact; replaced in place on success.
    pub fn bundle_path(&self) -> &Path {
        &self.bundle_path
    }

    /// Whether the artifact is an app bundle that needs converting.
    pub fn is_bundle_format(&self) -> bool {
        self.is_bundle_format
    }

    /// Signing keystore for this conversion.
    pub fn keystore(&self) -> &KeystoreSpec {
        &self.keystore
    }

    /// Where bundletool writes its `.apks` archive: `<bundle_path>.apks`.
    pub fn archive_path(&self) -> PathBuf {
        let mut path = self.bundle_path.clone().into_os_string();
        path.push(".apks");
        PathBuf::from(path)
    }
}

fn has_bundle_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("aab"))
}
