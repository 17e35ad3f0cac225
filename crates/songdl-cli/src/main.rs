use songdl_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible.
    if let Err(err) = logging::init_logging() {
        match logging::init_logging_stderr() {
            Ok(()) => tracing::warn!("file logging unavailable, using stderr: {:#}", err),
            Err(e) => eprintln!("songdl: logging disabled: {:#}; {:#}", err, e),
        }
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("songdl error: {:#}", err);
        std::process::exit(1);
    }
}
