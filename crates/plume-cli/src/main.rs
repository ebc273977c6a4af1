use anyhow::Result;
use clap::{Parser, Subcommand};
use plume_provision::ProvisionConfig;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "plume")]
#[command(about = "Bootstrap a JWT-secured local message broker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Provision credentials, launch the broker stack, apply permissions
    Setup,
    /// Read-only checks: credential files, broker health, permission state
    Verify,
    /// Diagnose the admin token against the local key pair and the broker
    AuthCheck,
    /// Interactive producer publishing stdin lines to the test topic
    Produce,
    /// Durable consumer printing messages from the test topic
    Consume,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ProvisionConfig::from_env();

    match cli.command {
        Command::Setup => commands::setup::run(&config).await,
        Command::Verify => commands::verify::run(&config).await,
        Command::AuthCheck => commands::auth_check::run(&config).await,
        Command::Produce => commands::produce::run(&config).await,
        Command::Consume => commands::consume::run(&config).await,
    }
}
