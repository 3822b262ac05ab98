//! Android App Bundle to universal APK converter
//!
//! This library converts an `.aab` into a single signed universal APK with
//! Google's bundletool, provisioning the Java toolchain pieces it needs:
//! - bundletool itself, downloaded once and cached
//! - a signing keystore, generated with keytool when absent
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
