//! Android App Bundle conversion.
//!
//! Turns an `.aab` into a signed universal APK written over the original file,
//! using Google's bundletool. The pipeline probes for a Java runtime, caches
//! bundletool on first use, provisions a signing keystore, runs
//! `build-apks --mode=universal` and unpacks the result.
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_aab::bundler::{
//!     ConversionRequest, Converter, KeystoreSpec, SettingsBuilder, calculate_sha256,
//! };
//!
//! # async fn example() -> kodegen_bundler_aab::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .toolchain_dir("/var/cache/bundletool")
//!     .build()?;
//! let converter = Converter::new(settings);
//!
//! let request = ConversionRequest::from_path("app-release.aab", KeystoreSpec::default());
//! let apk = converter.convert(&request).await?;
//!
//! println!("Created: {} ({})", apk.display(), calculate_sha256(&apk).await?);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod utils;

#[cfg(all(test, unix))]
mod test_support;

pub use builder::{
    Converter, KeystoreProvider, KeytoolProvisioner, calculate_sha256, parse_java_version,
    probe_runtime,
};
pub use error::{ConversionFailure, Error, Result};
pub use platform::bundletool::{BundletoolCache, ToolchainProvider};
pub use settings::{ConversionRequest, KeystoreSpec, Settings, SettingsBuilder};
pub use utils::process::{ProcessOutput, ProcessRunner, SystemRunner};
