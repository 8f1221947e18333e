use crate::core::error::{ServerPackError, ServerPackResult};

/// A Maven coordinate, as used to locate loader installers.
///
/// Accepted forms are `group:artifact:version` and
/// `group:artifact:version:classifier`. Artifacts are always JARs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MavenArtifact {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub classifier: Option<String>,
}

impl MavenArtifact {
    /// Parse a coordinate such as `net.minecraftforge:forge:1.20.1-47.2.0:installer`.
    pub fn parse(coord: &str) -> ServerPackResult<Self> {
        let parts: Vec<&str> = coord.split(':').collect();
        if parts.iter().any(|p| p.trim().is_empty()) {
            return Err(ServerPackError::InvalidMavenCoordinate(coord.to_string()));
        }

        let classifier = match parts.len() {
            3 => None,
            4 => Some(parts[3].to_string()),
            _ => return Err(ServerPackError::InvalidMavenCoordinate(coord.to_string())),
        };

        Ok(Self {
            group_id: parts[0].to_string(),
            artifact_id: parts[1].to_string(),
            version: parts[2].to_string(),
            classifier,
        })
    }

    /// `artifact-version[-classifier].jar`
    pub fn filename(&self) -> String {
        match &self.classifier {
            Some(c) => format!("{}-{}-{}.jar", self.artifact_id, self.version, c),
            None => format!("{}-{}.jar", self.artifact_id, self.version),
        }
    }

    /// `<repo>/<group path>/<artifact>/<version>/<filename>`
    pub fn url(&self, repo_base: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            repo_base.trim_end_matches('/'),
            self.group_id.replace('.', "/"),
            self.artifact_id,
            self.version,
            self.filename()
        )
    }
}
