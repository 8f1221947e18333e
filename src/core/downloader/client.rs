use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use reqwest::{Client, Response, Url};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::debug;

const PART_SUFFIX: &str = ".part";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Download failed for {url}: HTTP {status}")]
    BadStatus { url: String, status: u16 },

    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Could not determine a file name from {url}")]
    UnresolvableName { url: String },
}

/// A mod JAR written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedMod {
    pub local_path: PathBuf,
    pub display_name: String,
}

/// Generic download endpoint of the mod host. No network access.
pub fn resolve_download_url(mod_host: &str, project_id: u32, file_id: u32) -> String {
    format!(
        "{}/api/v1/mods/{}/files/{}/download",
        mod_host.trim_end_matches('/'),
        project_id,
        file_id
    )
}

/// Single-attempt downloader for mods, modpacks and installers.
///
/// Bodies are streamed into a `.part` file next to the destination and
/// renamed once complete; a failed download never leaves a file behind.
pub struct ArtifactFetcher {
    client: Client,
    mod_host: String,
}

impl ArtifactFetcher {
    pub fn new(client: Client, mod_host: impl Into<String>) -> Self {
        Self {
            client,
            mod_host: mod_host.into(),
        }
    }

    pub fn resolve_download_url(&self, project_id: u32, file_id: u32) -> String {
        resolve_download_url(&self.mod_host, project_id, file_id)
    }

    // ── Named by the server ─────────────────────────────

    /// GET `url` and store the body in `dest_dir` under the file name taken
    /// from the final URL after redirects.
    pub async fn fetch_to_file(&self, url: &str, dest_dir: &Path) -> Result<FetchedMod, FetchError> {
        let response = self.get_checked(url).await?;

        let file_name =
            file_name_from_url(response.url()).ok_or_else(|| FetchError::UnresolvableName {
                url: response.url().to_string(),
            })?;
        let local_path = dest_dir.join(&file_name);

        stream_to_file(response, &local_path).await?;

        debug!("Downloaded: {} -> {:?}", url, local_path);
        Ok(FetchedMod {
            local_path,
            display_name: file_name,
        })
    }

    // ── Fixed destination ───────────────────────────────

    /// GET `url` and store the body at `dest`, creating parent directories.
    pub async fn download_file(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| FetchError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let response = self.get_checked(url).await?;
        stream_to_file(response, dest).await?;

        debug!("Downloaded: {} -> {:?}", url, dest);
        Ok(())
    }

    async fn get_checked(&self, url: &str) -> Result<Response, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

/// Last path segment of `url`, percent-decoded, with path separators
/// replaced by `_`.
pub(crate) fn file_name_from_url(url: &Url) -> Option<String> {
    let raw = url.path_segments()?.next_back()?;
    let decoded = urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    let sanitized = decoded.replace(['/', '\\'], "_");

    match sanitized.as_str() {
        "" | "." | ".." => None,
        _ => Some(sanitized),
    }
}

async fn stream_to_file(response: Response, dest: &Path) -> Result<(), FetchError> {
    let mut part_name = dest.as_os_str().to_owned();
    part_name.push(PART_SUFFIX);
    let part_path = PathBuf::from(part_name);

    if let Err(e) = write_body(response, &part_path).await {
        let _ = tokio::fs::remove_file(&part_path).await;
        return Err(e);
    }

    if let Err(source) = tokio::fs::rename(&part_path, dest).await {
        let _ = tokio::fs::remove_file(&part_path).await;
        return Err(FetchError::Io {
            path: dest.to_path_buf(),
            source,
        });
    }

    Ok(())
}

async fn write_body(response: Response, part_path: &Path) -> Result<(), FetchError> {
    let io_err = |source: std::io::Error| FetchError::Io {
        path: part_path.to_path_buf(),
        source,
    };

    // The handle is dropped at the end of this function on every path.
    let mut file = tokio::fs::File::create(part_path).await.map_err(io_err)?;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await.map_err(io_err)?;
    }
    file.flush().await.map_err(io_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(url: &str) -> Option<String> {
        file_name_from_url(&Url::parse(url).unwrap())
    }

    #[test]
    fn download_url_template() {
        assert_eq!(
            resolve_download_url("https://www.curseforge.com/", 238222, 4712866),
            "https://www.curseforge.com/api/v1/mods/238222/files/4712866/download"
        );
    }

    #[test]
    fn file_name_from_cdn_url() {
        assert_eq!(
            name("https://edge.forgecdn.net/files/4712/866/jei-1.20.1-forge-15.2.0.27.jar"),
            Some("jei-1.20.1-forge-15.2.0.27.jar".to_string())
        );
    }

    #[test]
    fn file_name_is_percent_decoded() {
        assert_eq!(
            name("https://cdn.example/files/Better%20Mod%201.0.jar"),
            Some("Better Mod 1.0.jar".to_string())
        );
    }

    #[test]
    fn encoded_separators_are_sanitized() {
        assert_eq!(
            name("https://cdn.example/files/..%2F..%2Fevil.jar"),
            Some(".._.._evil.jar".to_string())
        );
        assert_eq!(
            name("https://cdn.example/files/a%5Cb.jar"),
            Some("a_b.jar".to_string())
        );
    }

    #[test]
    fn unresolvable_names() {
        assert_eq!(name("https://cdn.example/"), None);
        assert_eq!(name("https://cdn.example/files/"), None);
        assert_eq!(name("https://cdn.example/files/%2E%2E"), None);
    }
}
