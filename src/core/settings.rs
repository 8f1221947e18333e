use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::classifier::Denylist;
use crate::core::error::{ServerPackError, ServerPackResult};
use crate::core::http::DEFAULT_USER_AGENT;
use crate::core::maven::{FORGE_MAVEN, NEOFORGE_MAVEN};

const APP_DIR_NAME: &str = "modpack-server";
const SETTINGS_FILE: &str = "settings.json";

pub const CURSEFORGE_HOST: &str = "https://www.curseforge.com";

/// Known client-only mods. Matched as lowercase substrings of the mod id
/// and of the downloaded file name.
pub const DEFAULT_CLIENT_DENYLIST: &[&str] = &[
    "essential",
    "essential-mod",
    "essentials",
    "essential_mod",
    "essentialclient",
    "oculus",
    "rubidium",
    "embeddium",
    "controlling",
    "searchables",
    "toastcontrol",
    "mouseedits",
    "catalogue",
    "configured",
    "betterf3",
    "legendarytooltips",
    "entityculling",
];

/// Operator configuration, persisted as `settings.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerSettings {
    /// Base URL of the mod host serving `/api/v1/mods/{project}/files/{file}/download`.
    pub mod_host: String,
    pub forge_maven: String,
    pub neoforge_maven: String,
    pub user_agent: String,
    /// Replaces the shipped denylist when set.
    pub client_denylist: Vec<String>,
    pub extra_denylist: Vec<String>,
    pub allowlist: Vec<String>,
}

impl Default for InstallerSettings {
    fn default() -> Self {
        Self {
            mod_host: CURSEFORGE_HOST.to_string(),
            forge_maven: FORGE_MAVEN.to_string(),
            neoforge_maven: NEOFORGE_MAVEN.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            client_denylist: DEFAULT_CLIENT_DENYLIST
                .iter()
                .map(|s| s.to_string())
                .collect(),
            extra_denylist: Vec::new(),
            allowlist: Vec::new(),
        }
    }
}

impl InstallerSettings {
    /// Load settings from an explicit file, falling back to the per-user
    /// config file and finally to defaults.
    ///
    /// An explicit path that cannot be read or parsed is an error; the
    /// per-user file is only used when it exists.
    pub fn load(explicit: Option<&Path>) -> ServerPackResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match default_settings_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> ServerPackResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ServerPackError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self =
            serde_json::from_str(&raw).map_err(|e| ServerPackError::Settings {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Effective denylist: base list plus extras, minus allowlisted entries.
    pub fn denylist(&self) -> Denylist {
        let allowed: Vec<String> = self
            .allowlist
            .iter()
            .map(|entry| entry.trim().to_lowercase())
            .collect();

        Denylist::new(
            self.client_denylist
                .iter()
                .chain(self.extra_denylist.iter())
                .filter(|entry| !allowed.contains(&entry.trim().to_lowercase())),
        )
    }
}

pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE))
}
