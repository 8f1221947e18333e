// ─── Install Pipeline ───
// prepare -> per mod (fetch, classify, filter) -> overlay -> bootstrap
//
// Only a required mod that cannot be fetched stops the run. Work already
// done is left in place; there is no rollback.

use std::path::Path;

use tracing::{debug, info};

use super::overlay::{overlay_dir, resolve_overrides_dir};
use super::report::{InstallReport, RemovedMod, SkippedMod};
use crate::core::classifier::{classify_file, Denylist};
use crate::core::downloader::ArtifactFetcher;
use crate::core::error::{ServerPackError, ServerPackResult};
use crate::core::loaders::{InstallContext, LoaderId, ServerInstaller};
use crate::core::modpack::{ModReference, ModpackManifest};
use crate::core::settings::InstallerSettings;

pub const MODS_DIR: &str = "mods";

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Stage the loader's server installer after the mods.
    pub bootstrap_installer: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            bootstrap_installer: true,
        }
    }
}

/// Drives one install run into one output directory.
pub struct InstallPipeline<'a> {
    fetcher: &'a ArtifactFetcher,
    settings: &'a InstallerSettings,
    denylist: Denylist,
    options: PipelineOptions,
}

impl<'a> InstallPipeline<'a> {
    pub fn new(fetcher: &'a ArtifactFetcher, settings: &'a InstallerSettings) -> Self {
        Self {
            fetcher,
            settings,
            denylist: settings.denylist(),
            options: PipelineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Run every step against `output_dir`.
    ///
    /// `manifest_dir` is where the manifest was found; the overrides path is
    /// resolved against it.
    pub async fn run(
        &self,
        manifest: &ModpackManifest,
        manifest_dir: &Path,
        output_dir: &Path,
    ) -> ServerPackResult<InstallReport> {
        let mut report = InstallReport::default();

        // 1️⃣ Prepare
        let mods_dir = output_dir.join(MODS_DIR);
        tokio::fs::create_dir_all(&mods_dir)
            .await
            .map_err(|source| ServerPackError::Io {
                path: mods_dir.clone(),
                source,
            })?;

        // 2️⃣ Mods, strictly in manifest order
        let total = manifest.mod_references.len();
        info!("Downloading {} mods...", total);
        for (index, reference) in manifest.mod_references.iter().enumerate() {
            info!(
                "[{}/{}] Mod {} file {}",
                index + 1,
                total,
                reference.project_id,
                reference.file_id
            );
            self.process_reference(reference, &mods_dir, &mut report)
                .await?;
        }

        // 3️⃣ Overrides
        if let Some(relative) = &manifest.overrides_relative_path {
            match self.overlay(manifest_dir, relative, output_dir) {
                Ok(copied) => report.overrides_copied = Some(copied),
                Err(e) => report.warn(format!("Failed to copy overrides: {}", e)),
            }
        }

        // 4️⃣ Loader installer
        if self.options.bootstrap_installer {
            self.bootstrap(manifest, output_dir, &mut report).await;
        }

        info!("Install finished: {}", report.summary());
        Ok(report)
    }

    async fn process_reference(
        &self,
        reference: &ModReference,
        mods_dir: &Path,
        report: &mut InstallReport,
    ) -> ServerPackResult<()> {
        let url = self
            .fetcher
            .resolve_download_url(reference.project_id, reference.file_id);

        let fetched = match self.fetcher.fetch_to_file(&url, mods_dir).await {
            Ok(fetched) => fetched,
            Err(source) if reference.required => {
                return Err(ServerPackError::RequiredModFailed {
                    project_id: reference.project_id,
                    file_id: reference.file_id,
                    source,
                });
            }
            Err(e) => {
                report.warn(format!(
                    "Skipping optional mod {}/{}: {}",
                    reference.project_id, reference.file_id, e
                ));
                report.skipped.push(SkippedMod {
                    reference: reference.clone(),
                    error: e.to_string(),
                });
                return Ok(());
            }
        };

        let classification = match classify_file(&fetched.local_path, &self.denylist).await {
            Ok(result) => result,
            Err(e) => {
                // Unclassifiable mods are assumed server-safe.
                report.warn(format!(
                    "Could not check whether {} is client-side, keeping it: {}",
                    fetched.display_name, e
                ));
                report.keep(fetched.local_path);
                return Ok(());
            }
        };

        let reason = match classification.reason {
            Some(reason) if classification.is_client_only => reason,
            _ => {
                debug!(
                    "Keeping {} (mod id {:?})",
                    fetched.display_name, classification.mod_id
                );
                report.keep(fetched.local_path);
                return Ok(());
            }
        };

        info!(
            "Removing client-side mod: {} (mod id {:?}, {:?})",
            fetched.display_name, classification.mod_id, reason
        );
        if let Err(e) = tokio::fs::remove_file(&fetched.local_path).await {
            report.warn(format!(
                "Failed to remove client-side mod {:?}: {}",
                fetched.local_path, e
            ));
            report.keep(fetched.local_path);
            return Ok(());
        }

        report.removed.push(RemovedMod {
            file_name: fetched.display_name,
            mod_id: classification.mod_id,
            reason,
        });
        Ok(())
    }

    fn overlay(
        &self,
        manifest_dir: &Path,
        relative: &str,
        output_dir: &Path,
    ) -> ServerPackResult<usize> {
        let source = resolve_overrides_dir(manifest_dir, relative)?;
        info!("Copying overrides from {:?} to {:?}...", source, output_dir);
        overlay_dir(&source, output_dir)
    }

    async fn bootstrap(
        &self,
        manifest: &ModpackManifest,
        output_dir: &Path,
        report: &mut InstallReport,
    ) {
        let Some(entry) = manifest.primary_loader() else {
            debug!("Manifest names no mod loader");
            return;
        };
        let Some(loader_id) = LoaderId::parse(&entry.id) else {
            debug!("Unrecognized mod loader id {:?}", entry.id);
            return;
        };
        let Some(installer) = ServerInstaller::for_loader(loader_id.loader) else {
            info!("{} servers need no installer; skipping", loader_id.loader);
            return;
        };

        let ctx = InstallContext {
            minecraft_version: &manifest.minecraft_version,
            loader_version: &loader_id.version,
            output_dir,
            fetcher: self.fetcher,
            settings: self.settings,
        };

        match installer.stage(ctx).await {
            Ok(staged) => report.installer = Some(staged),
            Err(e) => report.warn(format!("Failed to stage {} installer: {}", loader_id, e)),
        }
    }
}
