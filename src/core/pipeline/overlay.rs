use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::error::{ServerPackError, ServerPackResult};

/// Resolve the manifest's overrides directory, refusing paths that leave
/// the directory holding the manifest.
pub fn resolve_overrides_dir(manifest_dir: &Path, relative: &str) -> ServerPackResult<PathBuf> {
    let overlay_err = |path: PathBuf, reason: String| ServerPackError::Overlay { path, reason };

    let candidate = manifest_dir.join(relative);
    let root = std::fs::canonicalize(manifest_dir)
        .map_err(|e| overlay_err(manifest_dir.to_path_buf(), e.to_string()))?;
    let resolved = std::fs::canonicalize(&candidate)
        .map_err(|e| overlay_err(candidate.clone(), e.to_string()))?;

    if !resolved.starts_with(&root) {
        return Err(overlay_err(
            candidate,
            "overrides directory is outside the modpack".into(),
        ));
    }
    if !resolved.is_dir() {
        return Err(overlay_err(candidate, "not a directory".into()));
    }

    Ok(resolved)
}

/// Recursively copy `source` onto `destination`, replacing existing files.
///
/// Relative paths and file permission bits are preserved. Files already
/// copied stay in place if a later entry fails. Returns the number of files
/// copied.
pub fn overlay_dir(source: &Path, destination: &Path) -> ServerPackResult<usize> {
    std::fs::create_dir_all(destination).map_err(|source_err| ServerPackError::Io {
        path: destination.to_path_buf(),
        source: source_err,
    })?;
    copy_dir_recursive(source, destination)
}

fn copy_dir_recursive(source: &Path, destination: &Path) -> ServerPackResult<usize> {
    let io_err = |path: &Path, source: std::io::Error| ServerPackError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut copied = 0;
    for entry in std::fs::read_dir(source).map_err(|e| io_err(source, e))? {
        let entry = entry.map_err(|e| io_err(source, e))?;
        let src_path = entry.path();
        let dst_path = destination.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| io_err(&src_path, e))?;

        if file_type.is_dir() {
            std::fs::create_dir_all(&dst_path).map_err(|e| io_err(&dst_path, e))?;
            copied += copy_dir_recursive(&src_path, &dst_path)?;
        } else if file_type.is_file() {
            if dst_path.is_dir() {
                return Err(ServerPackError::Overlay {
                    path: dst_path,
                    reason: "a directory is in the way of an override file".into(),
                });
            }
            if dst_path.exists() {
                std::fs::remove_file(&dst_path).map_err(|e| io_err(&dst_path, e))?;
            }
            std::fs::copy(&src_path, &dst_path).map_err(|e| io_err(&dst_path, e))?;
            copied += 1;
        } else {
            debug!("Skipping non-regular override entry {:?}", src_path);
        }
    }

    Ok(copied)
}
