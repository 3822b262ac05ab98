//! Shared helpers for the conversion stages.

pub mod fs;
pub mod http;
pub mod process;
