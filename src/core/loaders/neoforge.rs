use super::installer::LoaderInstaller;
use crate::core::error::ServerPackResult;
use crate::core::maven::MavenArtifact;
use crate::core::settings::InstallerSettings;

/// NeoForge for 1.20.1 was published as `net.neoforged:forge:<mc>-<ver>`;
/// later releases use `net.neoforged:neoforge:<ver>`.
const LEGACY_MINECRAFT_VERSION: &str = "1.20.1";

pub struct NeoForgeInstaller;

impl LoaderInstaller for NeoForgeInstaller {
    fn installer_artifact(
        &self,
        minecraft_version: &str,
        loader_version: &str,
    ) -> ServerPackResult<MavenArtifact> {
        let coord = if minecraft_version == LEGACY_MINECRAFT_VERSION {
            let version = if loader_version.starts_with(LEGACY_MINECRAFT_VERSION) {
                loader_version.to_string()
            } else {
                format!("{}-{}", minecraft_version, loader_version)
            };
            format!("net.neoforged:forge:{}:installer", version)
        } else {
            format!("net.neoforged:neoforge:{}:installer", loader_version)
        };
        MavenArtifact::parse(&coord)
    }

    fn maven_base<'a>(&self, settings: &'a InstallerSettings) -> &'a str {
        &settings.neoforge_maven
    }

    fn installer_file_name(&self) -> &'static str {
        "neoforge-installer.jar"
    }

    fn helper_script_name(&self) -> &'static str {
        "install_neoforge.sh"
    }
}
