mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::options;
use crate::cmd::submit::{self, SubmitArgs, SubmitOutcome};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::webhook::WebhookClient;
use crate::workflow::submission::SubmissionState;

#[derive(Parser)]
#[command(name = "deskline", author, version, about = "Submit support tickets to an intake endpoint")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in a support ticket and submit it.
    Submit(SubmitArgs),
    /// List the accepted categories and priorities.
    Options,
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run() -> AppResult<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config(args) => {
            config_cmd::run(args.command)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Options => {
            options::run();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Submit(args) => run_submit(args).await,
    }
}

async fn run_submit(args: SubmitArgs) -> AppResult<ExitCode> {
    let config = AppConfig::load()?;
    let intake = Arc::new(WebhookClient::new(
        config.endpoint_url.clone(),
        config.timeout,
    ));
    let context = AppContext::new(config, intake);

    match submit::run(&context, args).await? {
        SubmitOutcome::Checked(result) if result.is_valid() => {
            println!("Ticket is valid and ready to submit.");
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Checked(result) => {
            for error in result.errors() {
                eprintln!("- {error}");
            }
            Ok(ExitCode::FAILURE)
        }
        SubmitOutcome::Finished(state) => {
            let message = state.message().unwrap_or_default();
            match &state {
                SubmissionState::Succeeded => {
                    println!("{message}");
                    Ok(ExitCode::SUCCESS)
                }
                _ => {
                    eprintln!("{message}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
