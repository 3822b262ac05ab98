//! Subprocess execution.
//!
//! Every external program the pipeline runs (java, keytool, bundletool) goes
//! through [`ProcessRunner`], so the pipeline can be driven by a fake in tests.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

/// Captured result of a finished process.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Exit status of the process
    pub status: ExitStatus,
    /// Captured stdout
    pub stdout: Vec<u8>,
    /// Captured stderr
    pub stderr: Vec<u8>,
}

/// How a process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Exited normally with the given code.
    Exited(i32),
    /// Killed by the given signal.
    Signaled(i32),
}

impl ProcessOutput {
    /// Classifies the exit status as a normal exit or a signal.
    pub fn termination(&self) -> Termination {
        if let Some(code) = self.status.code() {
            return Termination::Exited(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = self.status.signal() {
                return Termination::Signaled(signal);
            }
        }

        // Neither code nor signal: treat as an abnormal exit.
        Termination::Exited(-1)
    }

    /// First line of stderr, lossily decoded.
    pub fn stderr_first_line(&self) -> String {
        String::from_utf8_lossy(&self.stderr)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    }
}

/// Runs external programs to completion.
pub trait ProcessRunner: Send + Sync {
    /// Runs `program` with `args`, waiting for exit and capturing both output streams.
    ///
    /// A spawn failure (e.g. program not found) is returned as `Err`; a process
    /// that ran and failed is returned as `Ok` with its status.
    fn run(
        &self,
        program: &Path,
        args: &[String],
    ) -> impl Future<Output = io::Result<ProcessOutput>> + Send;
}

/// Runs programs with `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    async fn run(&self, program: &Path, args: &[String]) -> io::Result<ProcessOutput> {
        let resolved = resolve_program(program)?;

        let output = tokio::process::Command::new(&resolved)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        Ok(ProcessOutput {
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Resolves a bare program name through `PATH`; paths with a directory are used as given.
fn resolve_program(program: &Path) -> io::Result<PathBuf> {
    if program.components().count() > 1 {
        return Ok(program.to_path_buf());
    }

    match which::which(program) {
        Ok(path) => {
            log::debug!("Found {} at: {}", program.display(), path.display());
            Ok(path)
        }
        Err(e) => Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} not found in PATH: {}", program.display(), e),
        )),
    }
}
