// ─── Mod Classifier ───
// Decides whether a downloaded mod only makes sense on a game client.
//
// Signals, first match wins:
//   1. loader descriptor declares a client environment
//   2. mod id or file name contains a denylisted substring
//   3. otherwise server-safe

mod denylist;
pub mod metadata;

use std::io::Cursor;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use denylist::Denylist;
pub use metadata::{read_loader_metadata, LoaderMetadata};

#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("Cannot read mod archive {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Not a valid mod archive ({name}): {source}")]
    InvalidArchive {
        name: String,
        source: zip::result::ZipError,
    },
}

/// Why a mod was flagged as client-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientOnlyReason {
    LoaderMetadata,
    Denylist { entry: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub is_client_only: bool,
    pub mod_id: Option<String>,
    pub reason: Option<ClientOnlyReason>,
}

impl ClassificationResult {
    fn server_safe(mod_id: Option<String>) -> Self {
        Self {
            is_client_only: false,
            mod_id,
            reason: None,
        }
    }

    fn client_only(mod_id: Option<String>, reason: ClientOnlyReason) -> Self {
        Self {
            is_client_only: true,
            mod_id,
            reason: Some(reason),
        }
    }
}

/// Classify an in-memory mod archive.
///
/// `file_name` is the downloaded file name, matched against the denylist
/// alongside the mod id. An archive that is not a valid zip is an error.
pub fn classify(
    archive_bytes: &[u8],
    file_name: &str,
    denylist: &Denylist,
) -> Result<ClassificationResult, ClassificationError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(archive_bytes)).map_err(|source| {
        ClassificationError::InvalidArchive {
            name: file_name.to_string(),
            source,
        }
    })?;

    let metadata = read_loader_metadata(&mut archive);
    if metadata.client_only {
        return Ok(ClassificationResult::client_only(
            metadata.mod_id,
            ClientOnlyReason::LoaderMetadata,
        ));
    }

    if let Some(entry) = denylist.matches(metadata.mod_id.as_deref(), file_name) {
        let entry = entry.to_string();
        return Ok(ClassificationResult::client_only(
            metadata.mod_id,
            ClientOnlyReason::Denylist { entry },
        ));
    }

    Ok(ClassificationResult::server_safe(metadata.mod_id))
}

/// Read a mod JAR from disk and classify it.
pub async fn classify_file(
    path: &Path,
    denylist: &Denylist,
) -> Result<ClassificationResult, ClassificationError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ClassificationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    classify(&bytes, &file_name, denylist)
}
