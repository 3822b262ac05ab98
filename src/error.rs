//! Top-level error types for the command line tool.
//!
//! Library failures arrive as [`crate::bundler::Error`] and are wrapped here
//! together with argument and configuration errors, each with recovery
//! suggestions for the user.

use crate::bundler::{ConversionFailure, Error};
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for the command line tool
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Conversion pipeline errors
    #[error("Conversion error: {0}")]
    Bundler(#[from] Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            BundlerError::Cli(CliError::InvalidArguments { .. }) => {
                vec!["Run with --help to see accepted arguments".to_string()]
            }
            BundlerError::Cli(CliError::ExecutionFailed { .. }) => {
                vec!["Check that the configuration file exists and is readable".to_string()]
            }
            BundlerError::Toml(_) => vec![
                "Check the configuration file syntax".to_string(),
                "Only [keystore] and [toolchain] tables are recognised".to_string(),
            ],
            BundlerError::Io(_) => {
                vec!["Check file permissions and available disk space".to_string()]
            }
            BundlerError::Bundler(error) => pipeline_suggestions(error),
        }
    }
}

fn pipeline_suggestions(error: &Error) -> Vec<String> {
    match error {
        Error::RuntimeMissing { .. } => vec![
            "Install a Java runtime (JDK 11 or newer) and make sure `java` is on PATH".to_string(),
            "Or point --java at a specific launcher".to_string(),
        ],
        Error::Download { .. } => vec![
            "Check network access to api.github.com and github.com".to_string(),
            "Or place bundletool.jar in the --cache-dir directory manually".to_string(),
        ],
        Error::KeyGen { .. } => vec![
            "Make sure `keytool` from the JDK is on PATH, or pass --keytool".to_string(),
            "Check that the keystore directory is writable".to_string(),
        ],
        Error::Conversion(ConversionFailure::Spawn(_)) => {
            vec!["Check that the Java launcher can be executed".to_string()]
        }
        Error::Conversion(_) => vec![
            "Run with RUST_LOG=debug to see bundletool's output".to_string(),
            "Check that the keystore alias and passwords match the keystore".to_string(),
        ],
        Error::Extraction { .. } => {
            vec!["The bundletool output was unusable; the original bundle was left unchanged".to_string()]
        }
        Error::MissingPrecondition { .. } => {
            vec!["Check that the input bundle path exists".to_string()]
        }
        Error::Fs { .. } | Error::IoError(_) => {
            vec!["Check file permissions and available disk space".to_string()]
        }
        Error::GenericError(_) => {
            vec!["Check the error message above for specific details".to_string()]
        }
    }
}
