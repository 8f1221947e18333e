use std::fmt;

/// Mod loaders a CurseForge manifest can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderType {
    Forge,
    NeoForge,
    Fabric,
    Quilt,
}

impl fmt::Display for LoaderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoaderType::Forge => write!(f, "forge"),
            LoaderType::NeoForge => write!(f, "neoforge"),
            LoaderType::Fabric => write!(f, "fabric"),
            LoaderType::Quilt => write!(f, "quilt"),
        }
    }
}

/// A manifest loader id split into loader and version,
/// e.g. `forge-47.2.0` -> (`Forge`, `47.2.0`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderId {
    pub loader: LoaderType,
    pub version: String,
}

impl LoaderId {
    /// `None` for unknown prefixes or a missing version.
    pub fn parse(id: &str) -> Option<Self> {
        let id = id.trim();
        let lower = id.to_ascii_lowercase();

        let loaders = [
            ("neoforge-", LoaderType::NeoForge),
            ("forge-", LoaderType::Forge),
            ("fabric-", LoaderType::Fabric),
            ("quilt-", LoaderType::Quilt),
        ];

        loaders.into_iter().find_map(|(prefix, loader)| {
            if !lower.starts_with(prefix) {
                return None;
            }
            let version = id[prefix.len()..].trim();
            (!version.is_empty()).then(|| LoaderId {
                loader,
                version: version.to_string(),
            })
        })
    }
}

impl fmt::Display for LoaderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.loader, self.version)
    }
}
