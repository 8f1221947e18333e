use std::path::PathBuf;

use tracing::warn;

use crate::core::classifier::ClientOnlyReason;
use crate::core::loaders::StagedInstaller;
use crate::core::modpack::ModReference;

/// A client-only mod deleted from `mods/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedMod {
    pub file_name: String,
    pub mod_id: Option<String>,
    pub reason: ClientOnlyReason,
}

/// An optional mod that could not be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedMod {
    pub reference: ModReference,
    pub error: String,
}

/// Outcome of a successful install run.
#[derive(Debug, Default)]
pub struct InstallReport {
    /// Mod JARs left in `mods/`, one entry per file.
    pub kept: Vec<PathBuf>,
    pub removed: Vec<RemovedMod>,
    pub skipped: Vec<SkippedMod>,
    /// Files copied from the overrides directory, when one was overlaid.
    pub overrides_copied: Option<usize>,
    pub installer: Option<StagedInstaller>,
    /// Every non-fatal problem, in the order it happened.
    pub warnings: Vec<String>,
}

impl InstallReport {
    /// Record a non-fatal problem and log it.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.warnings.push(message);
    }

    /// Record a JAR left in `mods/`. A manifest listing the same file twice
    /// still yields a single entry.
    pub fn keep(&mut self, path: PathBuf) {
        if !self.kept.contains(&path) {
            self.kept.push(path);
        }
    }

    pub fn summary(&self) -> String {
        let mut line = format!(
            "{} mods kept, {} client-side mods removed, {} optional mods skipped",
            self.kept.len(),
            self.removed.len(),
            self.skipped.len()
        );
        if !self.warnings.is_empty() {
            line.push_str(&format!(", {} warnings", self.warnings.len()));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_jar_is_kept_once() {
        let mut report = InstallReport::default();
        report.keep(PathBuf::from("mods/jei.jar"));
        report.keep(PathBuf::from("mods/create.jar"));
        report.keep(PathBuf::from("mods/jei.jar"));
        assert_eq!(
            report.kept,
            [PathBuf::from("mods/jei.jar"), PathBuf::from("mods/create.jar")]
        );
    }

    #[test]
    fn summary_counts_warnings_without_repeating_them() {
        let mut report = InstallReport::default();
        report.keep(PathBuf::from("mods/jei.jar"));
        report.warn("Skipping optional mod 1/2: HTTP 404");

        let summary = report.summary();
        assert_eq!(
            summary,
            "1 mods kept, 0 client-side mods removed, 0 optional mods skipped, 1 warnings"
        );
        assert!(!summary.contains("HTTP 404"));
    }
}
