// ─── Modpack Manifest ───
// Typed view of a CurseForge `manifest.json`.

use std::path::Path;

use serde::Deserialize;

use crate::core::error::{ServerPackError, ServerPackResult};

pub const MANIFEST_FILE: &str = "manifest.json";

/// A `(project, file)` pair at the mod host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModReference {
    pub project_id: u32,
    pub file_id: u32,
    /// Failing to obtain a required mod aborts the install.
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModLoaderEntry {
    pub id: String,
    pub is_primary: bool,
}

/// Immutable description of a modpack, built once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModpackManifest {
    pub name: String,
    pub display_version: String,
    pub author: String,
    pub minecraft_version: String,
    pub mod_loaders: Vec<ModLoaderEntry>,
    pub mod_references: Vec<ModReference>,
    /// Directory, relative to the manifest, overlaid onto the server tree.
    pub overrides_relative_path: Option<String>,
}

// ── Wire format ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawManifest {
    minecraft: RawMinecraft,
    #[serde(default)]
    name: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    files: Vec<RawFile>,
    #[serde(default)]
    overrides: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMinecraft {
    version: String,
    #[serde(default)]
    mod_loaders: Vec<RawModLoader>,
}

#[derive(Debug, Deserialize)]
struct RawModLoader {
    id: String,
    #[serde(default)]
    primary: bool,
}

#[derive(Debug, Deserialize)]
struct RawFile {
    #[serde(rename = "projectID")]
    project_id: u32,
    #[serde(rename = "fileID")]
    file_id: u32,
    #[serde(default = "default_required")]
    required: bool,
}

fn default_required() -> bool {
    true
}

impl From<RawManifest> for ModpackManifest {
    fn from(raw: RawManifest) -> Self {
        Self {
            name: raw.name,
            display_version: raw.version,
            author: raw.author,
            minecraft_version: raw.minecraft.version,
            mod_loaders: raw
                .minecraft
                .mod_loaders
                .into_iter()
                .map(|l| ModLoaderEntry {
                    id: l.id,
                    is_primary: l.primary,
                })
                .collect(),
            mod_references: raw
                .files
                .into_iter()
                .map(|f| ModReference {
                    project_id: f.project_id,
                    file_id: f.file_id,
                    required: f.required,
                })
                .collect(),
            overrides_relative_path: raw
                .overrides
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty()),
        }
    }
}

impl ModpackManifest {
    /// Decode raw manifest bytes. Only structure is checked: an empty mod
    /// list or loader list is accepted.
    pub fn from_slice(bytes: &[u8]) -> ServerPackResult<Self> {
        let raw: RawManifest = serde_json::from_slice(bytes)
            .map_err(|e| ServerPackError::MalformedManifest(e.to_string()))?;
        Ok(raw.into())
    }

    pub async fn read(path: &Path) -> ServerPackResult<Self> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            ServerPackError::MalformedManifest(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_slice(&bytes)
    }

    /// The first listed loader is authoritative, whatever its `primary` flag.
    pub fn primary_loader(&self) -> Option<&ModLoaderEntry> {
        self.mod_loaders.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "minecraft": {
            "version": "1.20.1",
            "modLoaders": [
                { "id": "forge-47.2.0", "primary": true }
            ]
        },
        "manifestType": "minecraftModpack",
        "manifestVersion": 1,
        "name": "All the Mods 9",
        "version": "0.2.44",
        "author": "ATMTeam",
        "files": [
            { "projectID": 238222, "fileID": 4712866, "required": true },
            { "projectID": 306612, "fileID": 4836282, "required": false }
        ],
        "overrides": "overrides"
    }"#;

    #[test]
    fn decodes_curseforge_manifest() {
        let manifest = ModpackManifest::from_slice(SAMPLE.as_bytes()).unwrap();
        assert_eq!(manifest.name, "All the Mods 9");
        assert_eq!(manifest.display_version, "0.2.44");
        assert_eq!(manifest.minecraft_version, "1.20.1");
        assert_eq!(manifest.mod_references.len(), 2);
        assert!(!manifest.mod_references[1].required);
        assert_eq!(manifest.overrides_relative_path.as_deref(), Some("overrides"));
        assert_eq!(manifest.primary_loader().unwrap().id, "forge-47.2.0");
    }

    #[test]
    fn empty_lists_are_accepted() {
        let manifest =
            ModpackManifest::from_slice(br#"{"minecraft":{"version":"1.21.1","modLoaders":[]},"files":[]}"#)
                .unwrap();
        assert!(manifest.mod_references.is_empty());
        assert!(manifest.primary_loader().is_none());
        assert!(manifest.overrides_relative_path.is_none());
    }

    #[test]
    fn first_loader_wins_regardless_of_primary_flag() {
        let manifest = ModpackManifest::from_slice(
            br#"{"minecraft":{"version":"1.20.1","modLoaders":[
                {"id":"neoforge-47.1.106","primary":false},
                {"id":"forge-47.2.0","primary":true}]}}"#,
        )
        .unwrap();
        assert_eq!(manifest.primary_loader().unwrap().id, "neoforge-47.1.106");
    }

    #[test]
    fn required_defaults_to_true() {
        let manifest = ModpackManifest::from_slice(
            br#"{"minecraft":{"version":"1.20.1"},"files":[{"projectID":1,"fileID":2}]}"#,
        )
        .unwrap();
        assert!(manifest.mod_references[0].required);
    }

    #[test]
    fn blank_overrides_is_none() {
        let manifest =
            ModpackManifest::from_slice(br#"{"minecraft":{"version":"1.20.1"},"overrides":"  "}"#)
                .unwrap();
        assert!(manifest.overrides_relative_path.is_none());
    }

    #[test]
    fn malformed_manifest_is_rejected() {
        let err = ModpackManifest::from_slice(b"{\"files\": 3}").unwrap_err();
        assert!(matches!(err, ServerPackError::MalformedManifest(_)));

        let err = ModpackManifest::from_slice(b"not json").unwrap_err();
        assert!(matches!(err, ServerPackError::MalformedManifest(_)));
    }
}
