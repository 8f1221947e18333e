use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use modpack_server_lib::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    modpack_server_lib::init_logging(cli.verbose);

    match modpack_server_lib::run(&cli).await {
        Ok(report) => {
            info!(
                "Done! Server files generated in {:?}: {}",
                cli.output,
                report.summary()
            );
            if let Some(staged) = &report.installer {
                info!("Run {:?} to install the mod loader", staged.helper_script);
            }
            info!("Note: You may need to accept the EULA in eula.txt before running the server.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error installing server: {}", e);
            ExitCode::FAILURE
        }
    }
}
