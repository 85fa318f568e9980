//! pgroster - a small PostgreSQL client for managing a student roster.
//!
//! Control flow per invocation: resolve connection settings from the
//! environment, open one session (failure here is fatal), run the requested
//! command against the student repository, render the result, close the
//! session.
use anyhow::{anyhow, Result};
use clap::Parser;
use pgroster::cli::{self, Cli};
use pgroster::config::ConnectionSettings;
use pgroster::core::db::{connect, StudentStore};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing().ok();

    let cli = Cli::parse();

    // Connection establishment is the one fatal path: report and stop,
    // nothing downstream runs without a session.
    let settings = match ConnectionSettings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Connection failed: {err}");
            std::process::exit(1);
        }
    };
    let conn = match connect(&settings).await {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("Connection failed: {err}");
            std::process::exit(1);
        }
    };
    let mut store = StudentStore::new(conn);

    let outcome = cli::run(cli.command, &mut store).await;

    // Close exactly once, whether the command succeeded or not.
    if let Err(err) = store.close().await {
        warn!("error closing connection: {err}");
    }
    outcome
}
