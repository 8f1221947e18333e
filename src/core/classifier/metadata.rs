// ─── Loader Metadata ───
// Reads the mod descriptor embedded in a mod JAR.

use std::io::{Read, Seek};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

pub const FABRIC_DESCRIPTOR: &str = "fabric.mod.json";
pub const QUILT_DESCRIPTOR: &str = "quilt.mod.json";
pub const FORGE_DESCRIPTOR: &str = "META-INF/mods.toml";
pub const NEOFORGE_DESCRIPTOR: &str = "META-INF/neoforge.mods.toml";

static MOD_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"modId\s*=\s*"([^"]*)""#).expect("mod id pattern is valid")
});

/// What the embedded descriptor says about a mod.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoaderMetadata {
    /// Descriptor declares the mod as client-only.
    pub client_only: bool,
    pub mod_id: Option<String>,
}

/// Subset of Fabric's `fabric.mod.json`.
#[derive(Debug, Deserialize)]
struct FabricModJson {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    environment: Option<String>,
}

/// Subset of Quilt's `quilt.mod.json`.
#[derive(Debug, Deserialize)]
struct QuiltModJson {
    #[serde(default)]
    quilt_loader: Option<QuiltLoader>,
    #[serde(default)]
    minecraft: Option<QuiltMinecraft>,
}

#[derive(Debug, Deserialize)]
struct QuiltLoader {
    #[serde(default)]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuiltMinecraft {
    #[serde(default)]
    environment: Option<String>,
}

/// Inspect the archive's loader descriptors.
///
/// Fabric/Quilt descriptors are checked first; a client environment wins
/// immediately. Otherwise the Forge/NeoForge `modId` is extracted. Missing
/// or unreadable descriptors yield no signal.
pub fn read_loader_metadata<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> LoaderMetadata {
    let mut mod_id = None;

    if let Some(raw) = read_entry(archive, FABRIC_DESCRIPTOR) {
        match serde_json::from_str::<FabricModJson>(&raw) {
            Ok(descriptor) => {
                if descriptor.environment.as_deref() == Some("client") {
                    return LoaderMetadata {
                        client_only: true,
                        mod_id: descriptor.id,
                    };
                }
                mod_id = descriptor.id;
            }
            Err(e) => debug!("Ignoring malformed {}: {}", FABRIC_DESCRIPTOR, e),
        }
    }

    if let Some(raw) = read_entry(archive, QUILT_DESCRIPTOR) {
        match serde_json::from_str::<QuiltModJson>(&raw) {
            Ok(descriptor) => {
                let id = descriptor.quilt_loader.and_then(|loader| loader.id);
                let client = descriptor
                    .minecraft
                    .and_then(|mc| mc.environment)
                    .is_some_and(|env| env == "client");
                if client {
                    return LoaderMetadata {
                        client_only: true,
                        mod_id: id.or(mod_id),
                    };
                }
                mod_id = mod_id.or(id);
            }
            Err(e) => debug!("Ignoring malformed {}: {}", QUILT_DESCRIPTOR, e),
        }
    }

    if mod_id.is_none() {
        for descriptor in [FORGE_DESCRIPTOR, NEOFORGE_DESCRIPTOR] {
            if let Some(raw) = read_entry(archive, descriptor) {
                mod_id = extract_forge_mod_id(&raw);
                if mod_id.is_some() {
                    break;
                }
            }
        }
    }

    LoaderMetadata {
        client_only: false,
        mod_id,
    }
}

/// First `modId = "<value>"` in a Forge-style TOML descriptor.
pub fn extract_forge_mod_id(content: &str) -> Option<String> {
    MOD_ID_PATTERN
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|id| !id.is_empty())
}

fn read_entry<R: Read + Seek>(archive: &mut zip::ZipArchive<R>, name: &str) -> Option<String> {
    let mut file = archive.by_name(name).ok()?;
    let mut bytes = Vec::new();
    if let Err(e) = file.read_to_end(&mut bytes) {
        debug!("Cannot read {}: {}", name, e);
        return None;
    }
    Some(String::from_utf8_lossy(&bytes).into_owned())
}
