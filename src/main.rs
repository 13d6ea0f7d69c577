//! Task runner binary
//!
//! Run with: cargo run
//!
//! For help: cargo run -- --help

use clap::Parser;
use term_task::{Cli, driver};
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Run the driver loop with graceful shutdown on SIGTERM/SIGINT
    let result = tokio::select! {
        result = driver::run(&cli) => result,
        _ = signal::ctrl_c() => {
            eprintln!("Received SIGINT, shutting down...");
            Ok(())
        }
        _ = async {
            #[cfg(unix)]
            {
                let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
                    .expect("Failed to register SIGTERM handler");
                sigterm.recv().await
            }
            #[cfg(not(unix))]
            {
                std::future::pending::<()>().await
            }
        } => {
            eprintln!("Received SIGTERM, shutting down...");
            Ok(())
        }
    };

    if let Err(e) = result {
        // Results go to stdout; diagnostics belong on stderr.
        eprintln!("Error: {e}");
        eprintln!("For debugging, run with --diagnostic to log to a file, or -v/-vv for more verbose logging.");
        std::process::exit(1);
    }

    Ok(())
}
