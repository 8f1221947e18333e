pub mod context;
pub mod forge;
pub mod installer;
mod kind;
pub mod neoforge;

pub use context::InstallContext;
pub use installer::{LoaderInstaller, ServerInstaller, StagedInstaller};
pub use kind::{LoaderId, LoaderType};
