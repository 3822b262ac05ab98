//! Configuration structures for conversion operations.
//!
//! [`Settings`] are process-wide and shared across requests; a
//! [`ConversionRequest`] describes one artifact and the keystore that signs it.

mod builder;
mod core;
mod keystore;
mod request;

pub use builder::SettingsBuilder;
pub use self::core::{BUNDLETOOL_FILE_NAME, BUNDLETOOL_RELEASES_URL, DEFAULT_USER_AGENT, Settings};
pub use keystore::KeystoreSpec;
pub use request::ConversionRequest;
