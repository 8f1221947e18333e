use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Archive entry {entry:?} escapes the destination directory")]
    PathEscape { entry: String },

    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Zip extraction error: {0}")]
    InvalidArchive(#[from] zip::result::ZipError),
}

/// Expand a zip archive into `dest`.
///
/// Every entry name is checked before anything is written: a single entry
/// that would land outside `dest` fails the whole extraction with
/// [`ExtractError::PathEscape`]. Unix permission bits stored in the archive
/// are applied to extracted files.
pub fn extract_archive(archive_path: &Path, dest: &Path) -> Result<(), ExtractError> {
    let file = std::fs::File::open(archive_path).map_err(|source| ExtractError::Io {
        path: archive_path.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(file)?;

    let targets = resolve_targets(&mut archive)?;

    std::fs::create_dir_all(dest).map_err(|source| ExtractError::Io {
        path: dest.to_path_buf(),
        source,
    })?;

    for (index, rel_path) in targets.into_iter().enumerate() {
        let mut zipped = archive.by_index(index)?;
        let out_path = dest.join(&rel_path);

        if zipped.is_dir() {
            std::fs::create_dir_all(&out_path).map_err(|source| ExtractError::Io {
                path: out_path,
                source,
            })?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ExtractError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        // Handle dropped before the next entry is opened.
        {
            let mut out = std::fs::File::create(&out_path).map_err(|source| ExtractError::Io {
                path: out_path.clone(),
                source,
            })?;
            std::io::copy(&mut zipped, &mut out).map_err(|source| ExtractError::Io {
                path: out_path.clone(),
                source,
            })?;
        }

        #[cfg(unix)]
        if let Some(mode) = zipped.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&out_path, std::fs::Permissions::from_mode(mode & 0o7777))
                .map_err(|source| ExtractError::Io {
                    path: out_path.clone(),
                    source,
                })?;
        }

        debug!("Extracted {:?}", rel_path);
    }

    Ok(())
}

/// Relative output path for every entry, in archive order.
fn resolve_targets<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
) -> Result<Vec<PathBuf>, ExtractError> {
    let mut targets = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let zipped = archive.by_index_raw(index)?;
        let rel_path = zipped
            .enclosed_name()
            .ok_or_else(|| ExtractError::PathEscape {
                entry: zipped.name().to_string(),
            })?;
        targets.push(rel_path);
    }
    Ok(targets)
}
