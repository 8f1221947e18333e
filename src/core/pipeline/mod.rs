mod install;
mod overlay;
mod report;

pub use install::{InstallPipeline, PipelineOptions, MODS_DIR};
pub use overlay::{overlay_dir, resolve_overrides_dir};
pub use report::{InstallReport, RemovedMod, SkippedMod};
