use super::installer::LoaderInstaller;
use crate::core::error::ServerPackResult;
use crate::core::maven::MavenArtifact;
use crate::core::settings::InstallerSettings;

/// Forge publishes one installer per `<minecraft>-<forge>` pair.
pub struct ForgeInstaller;

impl LoaderInstaller for ForgeInstaller {
    fn installer_artifact(
        &self,
        minecraft_version: &str,
        loader_version: &str,
    ) -> ServerPackResult<MavenArtifact> {
        MavenArtifact::parse(&format!(
            "net.minecraftforge:forge:{}-{}:installer",
            minecraft_version, loader_version
        ))
    }

    fn maven_base<'a>(&self, settings: &'a InstallerSettings) -> &'a str {
        &settings.forge_maven
    }

    fn installer_file_name(&self) -> &'static str {
        "forge-installer.jar"
    }

    fn helper_script_name(&self) -> &'static str {
        "install_forge.sh"
    }
}
