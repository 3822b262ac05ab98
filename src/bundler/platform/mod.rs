//! Packaging tool integrations.

pub mod bundletool;
