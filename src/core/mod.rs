// ─── Server Pack Core ───
// Turns a CurseForge modpack into a dedicated server tree.
//
// Architecture:
//   core/
//     modpack/    - manifest model + archive/URL input handling
//     downloader/ - single-attempt artifact fetcher
//     archive/    - zip-slip safe extraction
//     classifier/ - client-only mod detection (metadata + denylist)
//     maven/      - installer coordinates and URLs
//     loaders/    - loader id parsing + server installer staging
//     pipeline/   - install orchestrator, overrides overlay, report
//     settings    - operator configuration

pub mod archive;
pub mod classifier;
pub mod downloader;
pub mod error;
pub mod http;
pub mod loaders;
pub mod maven;
pub mod modpack;
pub mod pipeline;
pub mod settings;
