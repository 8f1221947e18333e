use std::path::Path;

use crate::core::downloader::ArtifactFetcher;
use crate::core::settings::InstallerSettings;

/// Everything a loader needs to stage its server installer.
pub struct InstallContext<'a> {
    pub minecraft_version: &'a str,
    pub loader_version: &'a str,
    pub output_dir: &'a Path,
    pub fetcher: &'a ArtifactFetcher,
    pub settings: &'a InstallerSettings,
}
