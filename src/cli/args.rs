//! Command line argument parsing and validation.
//!
//! Flags override the configuration file, which overrides built-in defaults.

use crate::bundler::{ConversionRequest, KeystoreSpec, SettingsBuilder};
use crate::config::ConfigFile;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How to decide whether the input is an app bundle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Treat files ending in `.aab` as bundles
    #[default]
    Auto,
    /// Always convert
    Aab,
    /// Never convert; the input is passed through unchanged
    Apk,
}

/// Android App Bundle to universal APK converter
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_aab",
    version,
    about = "Converts an Android App Bundle into a signed universal APK",
    long_about = "Converts an Android App Bundle (.aab) into a single signed universal APK using bundletool.

The APK replaces the bundle at the same path. bundletool is downloaded on first use and cached;
a debug keystore is generated with keytool if the configured one does not exist.

Usage:
  kodegen_bundler_aab app-release.aab
  kodegen_bundler_aab app-release.aab --keystore release.keystore --ks-key-alias upload
  kodegen_bundler_aab build/output.bin --format aab --config kodegen-aab.toml

Exit code 0 = the converted (or passed-through) artifact exists at the input path."
)]
pub struct Args {
    /// Artifact to convert in place
    #[arg(value_name = "BUNDLE")]
    pub bundle: PathBuf,

    /// Input format
    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    pub format: InputFormat,

    /// TOML configuration file with [keystore] and [toolchain] tables
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Signing keystore path (generated if missing)
    #[arg(long, value_name = "PATH")]
    pub keystore: Option<PathBuf>,

    /// Key alias inside the keystore
    #[arg(long, value_name = "ALIAS")]
    pub ks_key_alias: Option<String>,

    /// Keystore password
    #[arg(long, env = "KS_PASS", hide_env_values = true, value_name = "PASSWORD")]
    pub ks_pass: Option<String>,

    /// Key password
    #[arg(long, env = "KEY_PASS", hide_env_values = true, value_name = "PASSWORD")]
    pub key_pass: Option<String>,

    /// Key algorithm for a generated keystore
    #[arg(long, value_name = "ALG")]
    pub keyalg: Option<String>,

    /// Key size in bits for a generated keystore
    #[arg(long, value_name = "BITS")]
    pub keysize: Option<u32>,

    /// Distinguished name for a generated keystore
    #[arg(long, value_name = "DN")]
    pub dname: Option<String>,

    /// Validity in days for a generated keystore
    #[arg(long, value_name = "DAYS")]
    pub validity: Option<u32>,

    /// Directory where bundletool is cached
    #[arg(long, env = "BUNDLETOOL_CACHE_DIR", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// bundletool release metadata URL
    #[arg(long, value_name = "URL")]
    pub release_url: Option<String>,

    /// Java launcher
    #[arg(long, value_name = "PROGRAM")]
    pub java: Option<PathBuf>,

    /// keytool launcher
    #[arg(long, value_name = "PROGRAM")]
    pub keytool: Option<PathBuf>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.bundle.as_os_str().is_empty() {
            return Err("Bundle path cannot be empty".to_string());
        }
        if self.ks_key_alias.as_deref().is_some_and(str::is_empty) {
            return Err("Key alias cannot be empty".to_string());
        }
        if self.keysize == Some(0) {
            return Err("Key size must be greater than zero".to_string());
        }
        if self.validity == Some(0) {
            return Err("Validity must be at least one day".to_string());
        }
        Ok(())
    }

    /// Whether the input should be converted.
    pub fn is_bundle_format(&self) -> bool {
        match self.format {
            InputFormat::Auto => ConversionRequest::from_path(&self.bundle, KeystoreSpec::default())
                .is_bundle_format(),
            InputFormat::Aab => true,
            InputFormat::Apk => false,
        }
    }

    /// Settings from the configuration file with flags applied on top.
    pub fn settings_builder(&self, config: &ConfigFile) -> SettingsBuilder {
        let mut builder = config.toolchain.apply(SettingsBuilder::new());
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
        builder
    }

    /// Keystore from the configuration file with flags applied on top.
    pub fn keystore_spec(&self, config: &ConfigFile) -> KeystoreSpec {
        let mut spec = config.keystore.clone();
        if let Some(path) = &self.keystore {
            spec.path = path.clone();
        }
        if let Some(alias) = &self.ks_key_alias {
            spec.alias = alias.clone();
        }
        if let Some(password) = &self.ks_pass {
            spec.store_password = password.clone();
        }
        if let Some(password) = &self.key_pass {
            spec.key_password = password.clone();
        }
        if let Some(algorithm) = &self.keyalg {
            spec.key_algorithm = algorithm.clone();
        }
        if let Some(size) = self.keysize {
            spec.key_size = size;
        }
        if let Some(dname) = &self.dname {
            spec.distinguished_name = dname.clone();
        }
        if let Some(days) = self.validity {
            spec.validity_days = days;
        }
        spec
    }

    /// The conversion request these arguments describe.
    pub fn request(&self, config: &ConfigFile) -> ConversionRequest {
        ConversionRequest::new(&self.bundle, self.is_bundle_format(), self.keystore_spec(config))
    }
}
