//! Optional TOML configuration file.
//!
//! ```toml
//! [keystore]
//! path = "release.keystore"
//! alias = "upload"
//! store_password = "s3cret"
//! key_password = "s3cret"
//!
//! [toolchain]
//! cache_dir = "/var/cache/bundletool"
//! java = "/usr/lib/jvm/java-17/bin/java"
//! ```
//!
//! Every key is optional. Values given on the command line win over the file.

use crate::bundler::{KeystoreSpec, SettingsBuilder};
use crate::error::{BundlerError, CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Contents of a configuration file.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Signing keystore, merged over [`KeystoreSpec::default`].
    pub keystore: KeystoreSpec,

    /// Toolchain locations.
    pub toolchain: ToolchainConfig,
}

/// `[toolchain]` table.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolchainConfig {
    /// Directory holding the cached bundletool jar.
    pub cache_dir: Option<PathBuf>,

    /// Release metadata endpoint.
    pub release_url: Option<String>,

    /// Java launcher.
    pub java: Option<PathBuf>,

    /// keytool launcher.
    pub keytool: Option<PathBuf>,

    /// Parent of per-conversion scratch directories.
    pub scratch_dir: Option<PathBuf>,
}

impl ToolchainConfig {
    /// Applies the values present in this table to `builder`.
    pub fn apply(&self, mut builder: SettingsBuilder) -> SettingsBuilder {
        if let Some(dir) = &self.cache_dir {
            builder = builder.toolchain_dir(dir);
        }
        if let Some(url) = &self.release_url {
            builder = builder.release_url(url);
        }
        if let Some(java) = &self.java {
            builder = builder.java(java);
        }
        if let Some(keytool) = &self.keytool {
            builder = builder.keytool(keytool);
        }
        if let Some(dir) = &self.scratch_dir {
            builder = builder.scratch_root(dir);
        }
        builder
    }
}

/// Reads and parses a configuration file.
///
/// A relative keystore path is resolved against the file's directory.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        BundlerError::Cli(CliError::ExecutionFailed {
            command: "read_config".to_string(),
            reason: format!("Failed to read {}: {}", path.display(), e),
        })
    })?;

    let mut config: ConfigFile = toml::from_str(&contents)?;

    if config.keystore.path.is_relative() {
        let base = path.parent().unwrap_or(Path::new(""));
        config.keystore.path = base.join(&config.keystore.path);
    }

    log::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("kodegen-aab.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn empty_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&write(dir.path(), "")).unwrap();

        assert_eq!(config.toolchain, ToolchainConfig::default());
        assert_eq!(config.keystore.alias, KeystoreSpec::default().alias);
        assert_eq!(config.keystore.path, dir.path().join("kodegen.keystore"));
    }

    #[test]
    fn partial_keystore_table_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            r#"
            [keystore]
            path = "/keys/release.keystore"
            alias = "upload"

            [toolchain]
            cache_dir = "/var/cache/bundletool"
            "#,
        );

        let config = load_config(&path).unwrap();

        assert_eq!(config.keystore.path, PathBuf::from("/keys/release.keystore"));
        assert_eq!(config.keystore.alias, "upload");
        assert_eq!(config.keystore.key_size, 2048);
        assert_eq!(
            config.toolchain.cache_dir,
            Some(PathBuf::from("/var/cache/bundletool"))
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "[keystore]\nalais = \"typo\"\n");

        assert!(matches!(load_config(&path), Err(BundlerError::Toml(_))));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, BundlerError::Cli(CliError::ExecutionFailed { .. })));
    }

    #[test]
    fn toolchain_table_overrides_builder_defaults() {
        let toolchain = ToolchainConfig {
            cache_dir: Some("/opt/bundletool".into()),
            java: Some("/opt/jdk/bin/java".into()),
            ..Default::default()
        };

        let settings = toolchain.apply(SettingsBuilder::new()).build().unwrap();

        assert_eq!(settings.toolchain_dir(), Path::new("/opt/bundletool"));
        assert_eq!(settings.java(), Path::new("/opt/jdk/bin/java"));
        assert_eq!(settings.keytool(), Path::new("keytool"));
    }
}
