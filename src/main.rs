mod auth;
mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::auth::SessionStore;
use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::dashboard::{self, DashboardArgs};
use crate::cmd::session::{self, LoginArgs, RegisterArgs};
use crate::cmd::tickets::{self, TicketsArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::support_api::SupportApiClient;

#[derive(Parser)]
#[command(name = "ticketdash", author, version, about = "Customer-support ticket dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session token.
    Login(LoginArgs),
    /// Create an account and sign in.
    Register(RegisterArgs),
    /// Forget the stored session token.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// List support tickets, optionally filtered.
    Tickets(TicketsArgs),
    /// Summarize tickets by status, priority and day.
    Dashboard(DashboardArgs),
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config(args) => config_cmd::run(args.command),
        Commands::Login(args) => session::login(&build_context()?, args).await,
        Commands::Register(args) => session::register(&build_context()?, args).await,
        Commands::Logout => session::logout(&build_context()?),
        Commands::Whoami => session::whoami(&build_context()?),
        Commands::Tickets(args) => tickets::run(&build_context()?, args).await,
        Commands::Dashboard(args) => dashboard::run(&build_context()?, args).await,
    }
}

fn build_context() -> AppResult<AppContext> {
    let config = AppConfig::load()?;

    if config.api_endpoint.is_none() {
        warn!("API endpoint not configured; run `ticketdash config init` or set TICKETDASH_API_ENDPOINT");
    }

    let client = Arc::new(SupportApiClient::new(config.api_endpoint.clone()));
    let session = SessionStore::open()?;

    Ok(AppContext::new(config, session, client.clone(), client))
}
