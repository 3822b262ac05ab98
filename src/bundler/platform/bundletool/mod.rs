//! Android App Bundle to universal APK conversion with bundletool.
//!
//! # Module Organization
//!
//! - `toolset` - bundletool download and caching
//! - `build` - `build-apks` execution
//! - `extract` - `.apks` unpacking and in-place replacement

mod build;
mod extract;
mod toolset;

pub use build::{build_apks_args, build_universal_apks};
pub use extract::{UNIVERSAL_APK_NAME, extract_and_replace};
pub use toolset::{BundletoolCache, ToolchainProvider};
