//! `.apks` archive extraction.
//!
//! bundletool in universal mode writes an archive holding `universal.apk`
//! (plus a table of contents). The APK is streamed out entry by entry and
//! moved over the original bundle; everything else is discarded.

use crate::bundler::{Error, Result, utils::fs};
use async_zip::tokio::read::fs::ZipFileReader;
use futures_lite::io::AsyncWriteExt;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tokio_util::compat::TokioAsyncWriteCompatExt;

/// Base name of the single APK bundletool produces in universal mode.
pub const UNIVERSAL_APK_NAME: &str = "universal.apk";

fn extraction_error(archive: &Path, reason: impl Display) -> Error {
    Error::Extraction {
        archive: archive.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Final path component of an archive entry name, if it is safe to write.
fn base_name(entry_name: &str) -> Option<&str> {
    let base = entry_name.rsplit('/').next()?;
    match base {
        "" | "." | ".." => None,
        base => Some(base),
    }
}

/// Extracts `universal.apk` from `archive` and moves it onto `target`.
///
/// Entries are processed strictly one after another: each entry's stream is
/// drained, checked against its CRC-32 and its file closed before the next
/// entry is opened, so memory use does not grow with archive size. Directory entries are skipped and file
/// entries land in a per-call scratch directory under `scratch_root`, keyed by
/// base name.
///
/// On success `target` holds the APK, the archive is deleted and the scratch
/// directory is gone. On failure the scratch directory is still removed; the
/// archive and `target` are left as they were.
///
/// # Errors
///
/// [`Error::Extraction`] for open, read, format, checksum and replace failures,
/// and when the archive has no `universal.apk`.
pub async fn extract_and_replace(archive: &Path, target: &Path, scratch_root: &Path) -> Result<()> {
    let scratch = fs::scratch_dir(scratch_root).await?;

    let reader = ZipFileReader::new(archive)
        .await
        .map_err(|e| extraction_error(archive, format!("cannot open archive: {e}")))?;

    let mut universal: Option<PathBuf> = None;
    let entry_count = reader.file().entries().len();

    for index in 0..entry_count {
        let entry = &reader.file().entries()[index];
        let name = entry
            .filename()
            .as_str()
            .map_err(|e| extraction_error(archive, format!("entry {index} has an invalid name: {e}")))?
            .to_string();

        let is_dir = entry
            .dir()
            .map_err(|e| extraction_error(archive, format!("entry {name}: {e}")))?;
        if is_dir {
            log::debug!("Skipping directory entry {}", name);
            continue;
        }

        let Some(base) = base_name(&name) else {
            log::debug!("Skipping entry with unusable name {:?}", name);
            continue;
        };

        let dest = scratch.path().join(base);
        let mut entry_reader = reader
            .reader_with_entry(index)
            .await
            .map_err(|e| extraction_error(archive, format!("cannot read entry {name}: {e}")))?;

        let file = tokio::fs::File::create(&dest)
            .await
            .map_err(|e| extraction_error(archive, format!("cannot create {}: {e}", dest.display())))?;
        let mut writer = file.compat_write();

        let size = futures_lite::io::copy(&mut entry_reader, &mut writer)
            .await
            .map_err(|e| extraction_error(archive, format!("streaming entry {name} failed: {e}")))?;
        writer
            .close()
            .await
            .map_err(|e| extraction_error(archive, format!("cannot finish {}: {e}", dest.display())))?;

        if entry_reader.compute_hash() != entry_reader.entry().crc32() {
            return Err(extraction_error(archive, format!("CRC mismatch in entry {name}")));
        }

        log::debug!("Extracted {} ({} bytes)", name, size);

        if base == UNIVERSAL_APK_NAME {
            universal = Some(dest);
        }
    }

    let universal = universal.ok_or_else(|| {
        extraction_error(archive, format!("archive contains no {UNIVERSAL_APK_NAME}"))
    })?;

    fs::move_file(&universal, target)
        .await
        .map_err(|e| extraction_error(archive, format!("cannot replace {}: {e}", target.display())))?;
    fs::remove_file_if_exists(archive)
        .await
        .map_err(|e| extraction_error(archive, e))?;

    if let Err(e) = scratch.close() {
        log::warn!("Failed to remove scratch directory: {}", e);
    }

    log::info!("✓ Replaced {} with {}", target.display(), UNIVERSAL_APK_NAME);
    Ok(())
}
