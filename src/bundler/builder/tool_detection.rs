//! Java runtime detection.
//!
//! bundletool is a jar, so a working `java` launcher is a hard prerequisite.
//! The probe only trusts the version banner: a launcher that exits cleanly
//! without printing one is treated as absent.

use crate::bundler::{Error, Result, utils::process::ProcessRunner};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Version banner printed by OpenJDK and Oracle launchers on the first stderr line.
static VERSION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(openjdk|java) version").expect("version marker regex is valid")
});

/// Checks that `java` is installed and returns its version string.
///
/// Runs `java -version`, which reports on stderr, and parses the first line.
///
/// # Errors
///
/// [`Error::RuntimeMissing`] if the launcher cannot be spawned or its output
/// lacks a recognized version marker, regardless of exit status.
pub async fn probe_runtime<R: ProcessRunner>(runner: &R, java: &Path) -> Result<String> {
    let output = runner
        .run(java, &["-version".to_string()])
        .await
        .map_err(|e| Error::RuntimeMissing {
            reason: format!("failed to execute {}: {}", java.display(), e),
        })?;

    let first_line = output.stderr_first_line();
    match parse_java_version(&first_line) {
        Some(version) => {
            log::info!("✓ Java runtime available: {}", version);
            Ok(version)
        }
        None => {
            log::debug!(
                "{} -version printed no version marker (exit: {:?}): {:?}",
                java.display(),
                output.status.code(),
                first_line
            );
            Err(Error::RuntimeMissing {
                reason: format!("unrecognized `{} -version` output", java.display()),
            })
        }
    }
}

/// Extracts the version from a `java -version` banner line.
///
/// `openjdk version "17.0.2" 2022-01-18` yields `17.0.2`.
pub fn parse_java_version(line: &str) -> Option<String> {
    if !VERSION_MARKER.is_match(line) {
        return None;
    }

    let version = line.split_whitespace().nth(2)?.replace('"', "");
    if version.is_empty() {
        return None;
    }
    Some(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_banners() {
        assert_eq!(
            parse_java_version("openjdk version \"17.0.2\" 2022-01-18").as_deref(),
            Some("17.0.2")
        );
        assert_eq!(
            parse_java_version("java version \"1.8.0_381\"").as_deref(),
            Some("1.8.0_381")
        );
    }

    #[test]
    fn rejects_output_without_marker() {
        assert_eq!(parse_java_version(""), None);
        assert_eq!(parse_java_version("Picked up _JAVA_OPTIONS: -Xmx1g"), None);
        assert_eq!(parse_java_version("openjdk version"), None);
    }
}
