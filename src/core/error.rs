use std::path::PathBuf;
use thiserror::Error;

use crate::core::archive::ExtractError;
use crate::core::classifier::ClassificationError;
use crate::core::downloader::FetchError;

/// Central error type for the server pack builder.
/// Every module returns `Result<T, ServerPackError>` or a narrower error
/// that converts into it.
#[derive(Debug, Error)]
pub enum ServerPackError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Manifest ────────────────────────────────────────
    #[error("Malformed manifest: {0}")]
    MalformedManifest(String),

    // ── Network ─────────────────────────────────────────
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Required mod {project_id}/{file_id} could not be downloaded: {source}")]
    RequiredModFailed {
        project_id: u32,
        file_id: u32,
        source: FetchError,
    },

    #[error("Loader installer could not be downloaded: {0}")]
    InstallerFetch(FetchError),

    // ── Maven ───────────────────────────────────────────
    #[error("Invalid Maven coordinate: {0}")]
    InvalidMavenCoordinate(String),

    // ── Archive ─────────────────────────────────────────
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Classification(#[from] ClassificationError),

    // ── Overrides ───────────────────────────────────────
    #[error("Failed to overlay overrides from {path:?}: {reason}")]
    Overlay { path: PathBuf, reason: String },

    // ── Settings ────────────────────────────────────────
    #[error("Invalid settings at {path:?}: {reason}")]
    Settings { path: PathBuf, reason: String },
}

/// Convenience alias used throughout the crate.
pub type ServerPackResult<T> = Result<T, ServerPackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_mod_failure_names_the_reference() {
        let err = ServerPackError::RequiredModFailed {
            project_id: 1,
            file_id: 2,
            source: FetchError::BadStatus {
                url: "https://example.com".into(),
                status: 404,
            },
        };
        let message = err.to_string();
        assert!(message.contains("1/2"));
        assert!(message.contains("HTTP 404"));
    }

    #[test]
    fn extract_errors_convert_transparently() {
        let err: ServerPackError = ExtractError::PathEscape {
            entry: "../../evil".into(),
        }
        .into();
        assert!(matches!(
            err,
            ServerPackError::Extract(ExtractError::PathEscape { .. })
        ));
    }
}
