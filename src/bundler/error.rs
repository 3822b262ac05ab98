//! Error types for the AAB conversion pipeline.
//!
//! Each pipeline stage owns one variant so callers can tell which stage
//! rejected a conversion. The remaining variants carry ambient I/O and
//! subprocess failures.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// How the bundletool subprocess failed.
#[derive(Debug, thiserror::Error)]
pub enum ConversionFailure {
    /// The process could not be started.
    #[error("failed to spawn bundletool: {0}")]
    Spawn(#[source] io::Error),

    /// The process exited with a non-zero status code.
    #[error("exited with status {0}")]
    ExitCode(i32),

    /// The process was terminated by a signal.
    #[error("exited with signal {0}")]
    Signal(i32),
}

/// Main error type for the conversion pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No usable Java runtime was found.
    #[error("Java runtime not found: {reason}")]
    RuntimeMissing {
        /// Why the probe rejected the runtime
        reason: String,
    },

    /// bundletool could not be fetched into the toolchain cache.
    #[error("Unable to download bundletool: {reason}")]
    Download {
        /// What went wrong
        reason: String,
        /// Underlying HTTP error, if any
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The keystore was absent and keytool failed to generate it.
    #[error("Failed to generate keystore at {}: {reason}", path.display())]
    KeyGen {
        /// Keystore path that was being generated
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// bundletool `build-apks` did not succeed.
    #[error("bundletool build-apks failed: {0}")]
    Conversion(#[from] ConversionFailure),

    /// The `.apks` archive could not be opened, read or unpacked.
    #[error("Failed to extract {}: {reason}", archive.display())]
    Extraction {
        /// Archive being extracted
        archive: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// A pipeline input was missing right before bundletool would run.
    #[error("{what} not found at {}", path.display())]
    MissingPrecondition {
        /// Human readable name of the missing input
        what: &'static str,
        /// Where it was expected
        path: PathBuf,
    },

    /// A filesystem operation failed on a known path.
    #[error("Error {context} {}: {error}", path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        error: io::Error,
    },

    /// IO errors without path context
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Anything else
    #[error("{0}")]
    GenericError(String),
}

/// Attaches filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Wraps an IO error with the operation and the path it touched.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Converts options and foreign errors into [`Error::GenericError`].
pub trait Context<T> {
    /// Adds a message describing what was expected.
    fn context<C: Display>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

impl<T, E: Display> Context<T> for std::result::Result<T, E> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }
}

/// Returns early with an [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}
