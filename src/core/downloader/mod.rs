mod client;

pub use client::{resolve_download_url, ArtifactFetcher, FetchError, FetchedMod};
