pub mod cli;
pub mod core;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::core::downloader::ArtifactFetcher;
use crate::core::error::{ServerPackError, ServerPackResult};
use crate::core::http::build_http_client;
use crate::core::modpack::open_modpack;
use crate::core::pipeline::{InstallPipeline, InstallReport, PipelineOptions};
use crate::core::settings::InstallerSettings;

pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "info,modpack_server_lib=trace"
    } else {
        "info,modpack_server_lib=debug"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

/// Build the server tree described by the command line.
pub async fn run(cli: &Cli) -> ServerPackResult<InstallReport> {
    tokio::fs::create_dir_all(&cli.output)
        .await
        .map_err(|source| ServerPackError::Io {
            path: cli.output.clone(),
            source,
        })?;

    let mut settings = InstallerSettings::load(cli.config.as_deref())?;
    settings.extra_denylist.extend(cli.deny.iter().cloned());
    settings.allowlist.extend(cli.allow.iter().cloned());

    let client = build_http_client(&settings.user_agent)?;
    let fetcher = ArtifactFetcher::new(client, settings.mod_host.clone());

    let modpack = open_modpack(&cli.input, &cli.output, &fetcher).await?;
    let manifest = &modpack.manifest;
    info!(
        "Modpack: {} (Version: {}) by {}",
        manifest.name, manifest.display_version, manifest.author
    );
    info!("Minecraft: {}", manifest.minecraft_version);

    InstallPipeline::new(&fetcher, &settings)
        .with_options(PipelineOptions {
            bootstrap_installer: !cli.skip_installer,
        })
        .run(manifest, modpack.manifest_dir(), &cli.output)
        .await
}
