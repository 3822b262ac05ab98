//! Conversion orchestration and the stages it drives.
//!
//! This module provides the [`Converter`] that takes one
//! [`ConversionRequest`](crate::bundler::ConversionRequest) from app bundle to
//! universal APK.
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum of the produced artifact
//! - [`orchestrator`] - The [`Converter`] pipeline
//! - [`signing`] - Keystore provisioning via `keytool`
//! - [`tool_detection`] - Java runtime probe

mod checksum;
mod orchestrator;
mod signing;
mod tool_detection;

pub use checksum::calculate_sha256;
pub use orchestrator::Converter;
pub use signing::{KeystoreProvider, KeytoolProvisioner};
pub use tool_detection::{parse_java_version, probe_runtime};
