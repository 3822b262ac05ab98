//! Test doubles shared by the pipeline's unit tests.

use super::utils::process::{ProcessOutput, ProcessRunner};
use std::collections::HashMap;
use std::io::{self, Write};
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::{Arc, Mutex};

type Handler = Arc<dyn Fn(&[String]) -> io::Result<ProcessOutput> + Send + Sync>;

/// Process runner that answers from registered handlers and records every call.
///
/// Programs without a handler fail to spawn with `NotFound`.
#[derive(Clone, Default)]
pub struct FakeRunner {
    handlers: Arc<Mutex<HashMap<PathBuf, Handler>>>,
    calls: Arc<Mutex<Vec<(PathBuf, Vec<String>)>>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for `program`.
    pub fn on<F>(self, program: &str, handler: F) -> Self
    where
        F: Fn(&[String]) -> io::Result<ProcessOutput> + Send + Sync + 'static,
    {
        self.handlers
            .lock()
            .unwrap()
            .insert(PathBuf::from(program), Arc::new(handler));
        self
    }

    /// Every invocation so far, in order.
    pub fn calls(&self) -> Vec<(PathBuf, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    /// Invocations of one program.
    pub fn calls_to(&self, program: &str) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|(p, _)| p == Path::new(program))
            .map(|(_, args)| args)
            .collect()
    }
}

impl ProcessRunner for FakeRunner {
    async fn run(&self, program: &Path, args: &[String]) -> io::Result<ProcessOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_path_buf(), args.to_vec()));

        let handler = self.handlers.lock().unwrap().get(program).cloned();
        match handler {
            Some(handler) => handler(args),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", program.display()),
            )),
        }
    }
}

/// Output of a process that exited with `code`.
pub fn exited(code: i32, stderr: &str) -> ProcessOutput {
    ProcessOutput {
        status: ExitStatus::from_raw(code << 8),
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// Output of a process killed by `signal`.
pub fn signaled(signal: i32) -> ProcessOutput {
    ProcessOutput {
        status: ExitStatus::from_raw(signal),
        stdout: Vec::new(),
        stderr: Vec::new(),
    }
}

/// Typical `java -version` stderr.
pub const OPENJDK_VERSION: &str = "openjdk version \"17.0.2\" 2022-01-18\n\
    OpenJDK Runtime Environment (build 17.0.2+8-86)\n\
    OpenJDK 64-Bit Server VM (build 17.0.2+8-86, mixed mode, sharing)\n";

/// Value of a `--flag=value` style argument.
pub fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let prefix = format!("{flag}=");
    args.iter().find_map(|a| a.strip_prefix(prefix.as_str()))
}

/// Writes a zip archive with the given directories and stored files.
pub fn write_archive(path: &Path, dirs: &[&str], files: &[(&str, &[u8])]) {
    write_archive_with(path, zip::CompressionMethod::Stored, dirs, files);
}

/// Writes a zip archive whose files use `method`.
pub fn write_archive_with(
    path: &Path,
    method: zip::CompressionMethod,
    dirs: &[&str],
    files: &[(&str, &[u8])],
) {
    let file = std::fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default().compression_method(method);

    for dir in dirs {
        zip.add_directory(*dir, options).unwrap();
    }
    for (name, contents) in files {
        zip.start_file(*name, options).unwrap();
        zip.write_all(contents).unwrap();
    }
    zip.finish().unwrap();
}
