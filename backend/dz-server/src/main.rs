//! demozone-relay
//!
//! Consumes one broker topic per demozone and relays each event to the
//! WebSocket clients connected to that demozone's own port.
//!
//! ```bash
//! demozone-relay --dbhost setup.example.com:443 --pinginterval 25000 --verbose
//! ```

use dz_config::Config;
use dz_core::ShutdownCoordinator;
use dz_server::{
    Cli, EXIT_FATAL, EXIT_USAGE, IngestServer, Relay, ServerResult, default_broker_client, logger,
};
use dz_setup::SetupClient;

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(EXIT_USAGE),
            };
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::from(EXIT_FATAL),
        Err(e) if e.is_usage() => {
            eprintln!("{}\n", e);
            let _ = Cli::command().print_help();
            ExitCode::from(EXIT_USAGE)
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(EXIT_FATAL)
        }
    }
}

/// Returns `Ok` once the relay has been interrupted and stopped.
async fn run(cli: Cli) -> ServerResult<()> {
    // Load configuration, then let the command line override it
    let mut config = Config::load()?;
    cli.apply(&mut config);
    config.validate()?;

    // Initialize logger (before any other logging)
    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored && std::io::stdout().is_terminal(),
    )?;

    info!("Starting demozone-relay v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let shutdown = ShutdownCoordinator::new();
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    let source = SetupClient::from_config(&config.setup)?;
    let relay = match Relay::bootstrap(&source, default_broker_client(), &config, &shutdown).await
    {
        Ok(relay) => relay,
        Err(e) if e.is_interrupted() => {
            info!("{}", e);
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    if config.ingest.enabled {
        let ingest = IngestServer::bind(&config.ingest).await?;
        tokio::spawn(ingest.serve(relay.route_sender(), shutdown.clone()));
    }

    info!("demozone-relay running, press Ctrl+C to stop");
    shutdown.subscribe_guard().wait().await;

    relay.shutdown().await;
    info!("demozone-relay stopped");

    Ok(())
}
