use std::path::{Path, PathBuf};

use tracing::info;

use super::{
    context::InstallContext, forge::ForgeInstaller, kind::LoaderType,
    neoforge::NeoForgeInstaller,
};
use crate::core::error::{ServerPackError, ServerPackResult};
use crate::core::maven::MavenArtifact;
use crate::core::settings::InstallerSettings;

/// Installer JAR and helper script written into the server tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedInstaller {
    pub url: String,
    pub installer_path: PathBuf,
    pub helper_script: PathBuf,
}

/// A loader whose official installer can set up a dedicated server.
pub trait LoaderInstaller {
    /// Maven coordinate of the installer JAR.
    fn installer_artifact(
        &self,
        minecraft_version: &str,
        loader_version: &str,
    ) -> ServerPackResult<MavenArtifact>;

    fn maven_base<'a>(&self, settings: &'a InstallerSettings) -> &'a str;

    /// File name of the installer inside the server tree.
    fn installer_file_name(&self) -> &'static str;

    fn helper_script_name(&self) -> &'static str;
}

/// Closed set of loaders that ship a server installer.
pub enum ServerInstaller {
    Forge(ForgeInstaller),
    NeoForge(NeoForgeInstaller),
}

impl ServerInstaller {
    /// Fabric and Quilt servers are not bootstrapped through an installer.
    pub fn for_loader(loader: LoaderType) -> Option<Self> {
        match loader {
            LoaderType::Forge => Some(Self::Forge(ForgeInstaller)),
            LoaderType::NeoForge => Some(Self::NeoForge(NeoForgeInstaller)),
            LoaderType::Fabric | LoaderType::Quilt => None,
        }
    }

    fn inner(&self) -> &dyn LoaderInstaller {
        match self {
            ServerInstaller::Forge(i) => i,
            ServerInstaller::NeoForge(i) => i,
        }
    }

    pub fn installer_url(&self, ctx: &InstallContext<'_>) -> ServerPackResult<String> {
        let installer = self.inner();
        let artifact = installer.installer_artifact(ctx.minecraft_version, ctx.loader_version)?;
        Ok(artifact.url(installer.maven_base(ctx.settings)))
    }

    /// Download the installer into the output directory and, only once that
    /// succeeded, write the helper script naming the install command.
    pub async fn stage(&self, ctx: InstallContext<'_>) -> ServerPackResult<StagedInstaller> {
        let installer = self.inner();
        let url = self.installer_url(&ctx)?;
        let installer_path = ctx.output_dir.join(installer.installer_file_name());

        info!("Downloading loader installer {}", url);
        ctx.fetcher
            .download_file(&url, &installer_path)
            .await
            .map_err(ServerPackError::InstallerFetch)?;

        let helper_script = ctx.output_dir.join(installer.helper_script_name());
        write_helper_script(&helper_script, installer.installer_file_name()).await?;

        info!(
            "Installer staged. Run: java -jar {} --installServer",
            installer.installer_file_name()
        );

        Ok(StagedInstaller {
            url,
            installer_path,
            helper_script,
        })
    }
}

pub fn install_command(installer_file_name: &str) -> String {
    format!("java -jar {} --installServer", installer_file_name)
}

async fn write_helper_script(path: &Path, installer_file_name: &str) -> ServerPackResult<()> {
    let script = format!(
        "#!/bin/sh\ncd \"$(dirname \"$0\")\"\n{}\n",
        install_command(installer_file_name)
    );

    tokio::fs::write(path, script)
        .await
        .map_err(|source| ServerPackError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .await
            .map_err(|source| ServerPackError::Io {
                path: path.to_path_buf(),
                source,
            })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::downloader::ArtifactFetcher;

    fn ctx<'a>(
        mc: &'a str,
        version: &'a str,
        fetcher: &'a ArtifactFetcher,
        settings: &'a InstallerSettings,
    ) -> InstallContext<'a> {
        InstallContext {
            minecraft_version: mc,
            loader_version: version,
            output_dir: Path::new("server"),
            fetcher,
            settings,
        }
    }

    #[test]
    fn fabric_has_no_server_installer() {
        assert!(ServerInstaller::for_loader(LoaderType::Fabric).is_none());
        assert!(ServerInstaller::for_loader(LoaderType::Quilt).is_none());
    }

    #[test]
    fn forge_installer_url_uses_settings_maven() {
        let fetcher = ArtifactFetcher::new(reqwest::Client::new(), "http://mods.local");
        let settings = InstallerSettings {
            forge_maven: "http://maven.local/".into(),
            ..InstallerSettings::default()
        };
        let installer = ServerInstaller::for_loader(LoaderType::Forge).unwrap();
        let url = installer
            .installer_url(&ctx("1.20.1", "47.2.0", &fetcher, &settings))
            .unwrap();
        assert_eq!(
            url,
            "http://maven.local/net/minecraftforge/forge/1.20.1-47.2.0/forge-1.20.1-47.2.0-installer.jar"
        );
    }

    #[test]
    fn install_command_names_installer() {
        assert_eq!(
            install_command("forge-installer.jar"),
            "java -jar forge-installer.jar --installServer"
        );
    }
}
