use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "modpack-server")]
#[command(author, version, about = "Build a dedicated server tree from a CurseForge modpack", long_about = None)]
pub struct Cli {
    /// Path or URL to the modpack zip file
    #[arg(short, long)]
    pub input: String,

    /// Output directory for server files
    #[arg(short, long, default_value = "./server-files")]
    pub output: PathBuf,

    /// Settings file (default: <config dir>/modpack-server/settings.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Extra client-only mod id or file name fragment to remove
    #[arg(long = "deny", value_name = "ID")]
    pub deny: Vec<String>,

    /// Denylist entry to keep anyway
    #[arg(long = "allow", value_name = "ID")]
    pub allow: Vec<String>,

    /// Do not download the mod loader installer
    #[arg(long)]
    pub skip_installer: bool,

    /// Log everything this crate does
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["modpack-server", "--input", "pack.zip"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("./server-files"));
        assert!(!cli.skip_installer);
        assert!(cli.deny.is_empty());
    }

    #[test]
    fn repeated_deny_flags() {
        let cli = Cli::try_parse_from([
            "modpack-server",
            "-i",
            "https://example.com/pack.zip",
            "--deny",
            "fancymenu",
            "--deny",
            "ding",
            "--allow",
            "configured",
        ])
        .unwrap();
        assert_eq!(cli.deny, ["fancymenu", "ding"]);
        assert_eq!(cli.allow, ["configured"]);
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["modpack-server"]).is_err());
    }
}
