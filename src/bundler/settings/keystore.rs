//! Signing keystore parameters.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Keystore used to sign the universal APK.
///
/// Values are passed verbatim to `keytool` (when the keystore has to be
/// generated) and to bundletool `build-apks`. Defaults describe a debug
/// signing identity.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_aab::bundler::KeystoreSpec;
///
/// let keystore = KeystoreSpec {
///     path: "/var/lib/app/release.keystore".into(),
///     alias: "release".into(),
///     store_password: "s3cret".into(),
///     key_password: "s3cret".into(),
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct KeystoreSpec {
    /// Keystore file location.
    pub path: PathBuf,

    /// Key alias inside the keystore.
    pub alias: String,

    /// Key algorithm passed to `keytool -keyalg` (e.g. "RSA").
    pub key_algorithm: String,

    /// Key size in bits passed to `keytool -keysize`.
    pub key_size: u32,

    /// Keystore password.
    pub store_password: String,

    /// Key password.
    pub key_password: String,

    /// Distinguished name of the certificate, e.g. "CN=Android Debug,O=Android,C=US".
    pub distinguished_name: String,

    /// Certificate validity in days.
    pub validity_days: u32,
}

impl Default for KeystoreSpec {
    fn default() -> Self {
        Self {
            path: PathBuf::from("kodegen.keystore"),
            alias: "kodegen".into(),
            key_algorithm: "RSA".into(),
            key_size: 2048,
            store_password: "android".into(),
            key_password: "android".into(),
            distinguished_name: "CN=Android Debug,O=Android,C=US".into(),
            validity_days: 10000,
        }
    }
}

impl KeystoreSpec {
    /// Returns the keystore file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Arguments for `keytool` to generate this keystore.
    pub fn keytool_args(&self) -> Vec<String> {
        vec![
            "-genkey".into(),
            "-noprompt".into(),
            "-keystore".into(),
            self.path.display().to_string(),
            "-alias".into(),
            self.alias.clone(),
            "-keyalg".into(),
            self.key_algorithm.clone(),
            "-keysize".into(),
            self.key_size.to_string(),
            "-storepass".into(),
            self.store_password.clone(),
            "-keypass".into(),
            self.key_password.clone(),
            "-dname".into(),
            self.distinguished_name.clone(),
            "-validity".into(),
            self.validity_days.to_string(),
        ]
    }
}

impl std::fmt::Debug for KeystoreSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeystoreSpec")
            .field("path", &self.path)
            .field("alias", &self.alias)
            .field("key_algorithm", &self.key_algorithm)
            .field("key_size", &self.key_size)
            .field("store_password", &"<redacted>")
            .field("key_password", &"<redacted>")
            .field("distinguished_name", &self.distinguished_name)
            .field("validity_days", &self.validity_days)
            .finish()
    }
}
