mod manifest;
mod source;

pub use manifest::{ModLoaderEntry, ModReference, ModpackManifest, MANIFEST_FILE};
pub use source::{is_remote_input, open_modpack, ExtractedModpack};
