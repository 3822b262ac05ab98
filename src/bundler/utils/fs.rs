//! File system utilities for conversion.
//!
//! Scratch directories and in-place artifact replacement.

use crate::bundler::error::{Context, ErrorExt, Result};
use std::{io, path::Path};
use tempfile::TempDir;
use tokio::fs;

/// Creates a uniquely named scratch directory under `root`.
///
/// The directory and everything in it is removed when the returned guard is
/// dropped, on success and failure alike.
pub async fn scratch_dir(root: &Path) -> Result<TempDir> {
    fs::create_dir_all(root)
        .await
        .fs_context("creating scratch root", root)?;
    tempfile::Builder::new()
        .prefix("kodegen-aab-")
        .tempdir_in(root)
        .fs_context("creating scratch directory", root)
}

/// Moves `from` onto `to`, replacing any existing file.
///
/// A plain rename when both live on the same filesystem. Otherwise the file is
/// copied next to `to` and renamed over it, so `to` is never half-written.
pub async fn move_file(from: &Path, to: &Path) -> Result<()> {
    match fs::rename(from, to).await {
        Ok(()) => return Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            log::debug!(
                "{} and {} are on different filesystems, copying",
                from.display(),
                to.display()
            );
        }
        Err(e) => return Err(e).fs_context("moving file onto", to),
    }

    let file_name = to
        .file_name()
        .context(format!("{} has no file name", to.display()))?;
    let staged = to.with_file_name(format!(".{}.part", file_name.to_string_lossy()));

    if let Err(e) = fs::copy(from, &staged).await {
        let _ = fs::remove_file(&staged).await;
        return Err(e).fs_context("staging copy", &staged);
    }
    fs::rename(&staged, to)
        .await
        .fs_context("replacing file", to)?;
    fs::remove_file(from)
        .await
        .fs_context("removing moved file", from)?;
    Ok(())
}

/// Removes a file, treating an already missing file as success.
pub async fn remove_file_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing", path),
    }
}
