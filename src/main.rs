use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use config::Config;

use driftr::ctl::{ExitCode, Orchestrator, StopOutcome, StopRequest};
use driftr::ipc::{CtlClientConfig, SocketCtlClient, default_socket_path};
use driftr::registry::{PidfileRegistry, default_runtime_dir};

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("driftr")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("driftr.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<i32> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        Commands::Stop { shutdown } => {
            let request = if *shutdown {
                StopRequest::service_only()
            } else {
                StopRequest::full()
            };
            run_stop(request, ExitCode::Ok, config).await
        }
        Commands::Restart => {
            // A restart is a service-only stop with the restart code; the
            // supervising helper relaunches the service when it sees it.
            run_stop(StopRequest::service_only(), ExitCode::Restart, config).await
        }
    }
}

async fn run_stop(request: StopRequest, exit_code: ExitCode, config: &Config) -> Result<i32> {
    info!(
        "Stop requested (only_service: {}, exit code: {})",
        request.only_service,
        exit_code.code()
    );

    let runtime_dir = config
        .helpers
        .runtime_dir
        .clone()
        .unwrap_or_else(default_runtime_dir);
    let registry = PidfileRegistry::new(runtime_dir, config.helpers.grace_period_ms);

    let socket_path = config
        .service
        .socket_path
        .clone()
        .unwrap_or_else(default_socket_path);
    let client = SocketCtlClient::new(CtlClientConfig {
        socket_path,
        request_timeout_ms: config.service.request_timeout_ms,
    });

    let orchestrator = Orchestrator::new(registry, client);
    let outcome = orchestrator.run(&request, exit_code).await;

    print_summary(&outcome);
    Ok(outcome.exit_code(exit_code, config.ctl.strict).code())
}

fn print_summary(outcome: &StopOutcome) {
    for failure in &outcome.aux_failures {
        println!(
            "{} could not stop helper {}: {}",
            "Warning:".yellow(),
            failure.target,
            failure.error
        );
    }
    match &outcome.service_stop_error {
        Some(err) => println!("{} could not stop service: {}", "Error:".red(), err),
        None => println!("{}", "Stopped".green()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    let code = run_application(&cli, &config)
        .await
        .context("Application failed")?;

    std::process::exit(code);
}
