//! Kodegen Bundler AAB - Android App Bundle to universal APK converter.
//!
//! Converts an `.aab` into a signed universal APK in place using bundletool,
//! with the toolchain and signing keystore provisioned on demand.

use kodegen_bundler_aab::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            for suggestion in e.recovery_suggestions() {
                eprintln!("  hint: {}", suggestion);
            }
            1
        }
    };

    process::exit(exit_code);
}
