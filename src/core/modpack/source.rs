use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info};

use super::manifest::{ModpackManifest, MANIFEST_FILE};
use crate::core::archive::extract_archive;
use crate::core::downloader::ArtifactFetcher;
use crate::core::error::{ServerPackError, ServerPackResult};

const DOWNLOADED_ARCHIVE: &str = "modpack.zip";
const SCRATCH_PREFIX: &str = ".modpack-extract-";

/// A modpack archive expanded into a scratch directory.
///
/// The scratch directory lives inside the output directory and is removed
/// when this value is dropped.
#[derive(Debug)]
pub struct ExtractedModpack {
    _scratch: TempDir,
    manifest_dir: PathBuf,
    pub manifest: ModpackManifest,
}

impl ExtractedModpack {
    /// Directory holding `manifest.json`; overrides are resolved against it.
    pub fn manifest_dir(&self) -> &Path {
        &self.manifest_dir
    }
}

/// Whether the CLI input names a remote archive rather than a local file.
pub fn is_remote_input(input: &str) -> bool {
    let lower = input.get(..8).unwrap_or(input).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Obtain, extract and decode the modpack named by `input`.
///
/// Remote archives are downloaded to `<output>/modpack.zip` and deleted once
/// extracted.
pub async fn open_modpack(
    input: &str,
    output_dir: &Path,
    fetcher: &ArtifactFetcher,
) -> ServerPackResult<ExtractedModpack> {
    let (archive_path, downloaded) = if is_remote_input(input) {
        let dest = output_dir.join(DOWNLOADED_ARCHIVE);
        info!("Downloading modpack from {}", input);
        fetcher.download_file(input, &dest).await?;
        (dest, true)
    } else {
        let path = PathBuf::from(input);
        if !path.is_file() {
            return Err(ServerPackError::Io {
                path,
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "modpack archive not found",
                ),
            });
        }
        (path, false)
    };

    let scratch = tempfile::Builder::new()
        .prefix(SCRATCH_PREFIX)
        .tempdir_in(output_dir)
        .map_err(|source| ServerPackError::Io {
            path: output_dir.to_path_buf(),
            source,
        })?;

    info!("Extracting modpack {:?}", archive_path);
    let extracted = extract_archive(&archive_path, scratch.path());
    if downloaded {
        let _ = tokio::fs::remove_file(&archive_path).await;
    }
    extracted?;

    let manifest_dir = locate_manifest_dir(scratch.path())?;
    debug!("Using manifest in {:?}", manifest_dir);
    let manifest = ModpackManifest::read(&manifest_dir.join(MANIFEST_FILE)).await?;

    Ok(ExtractedModpack {
        _scratch: scratch,
        manifest_dir,
        manifest,
    })
}

/// `manifest.json` at the archive root, or inside the archive's single
/// top-level directory.
fn locate_manifest_dir(root: &Path) -> ServerPackResult<PathBuf> {
    if root.join(MANIFEST_FILE).is_file() {
        return Ok(root.to_path_buf());
    }

    let entries: Vec<PathBuf> = std::fs::read_dir(root)
        .map_err(|source| ServerPackError::Io {
            path: root.to_path_buf(),
            source,
        })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();

    if let [only] = entries.as_slice() {
        if only.is_dir() && only.join(MANIFEST_FILE).is_file() {
            return Ok(only.clone());
        }
    }

    Err(ServerPackError::MalformedManifest(format!(
        "{} not found in modpack archive",
        MANIFEST_FILE
    )))
}
