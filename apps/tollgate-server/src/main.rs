use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

mod app;
mod config;
mod logging;

use app::App;
use config::AppConfig;

/// Tollgate server
#[derive(Parser)]
#[command(name = "tollgate-server", version, about)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Print a standard token for a seeded account
    IssueToken {
        #[arg(long)]
        subject: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    logging::init(&config.logging)?;

    let app = App::build(&config)?;
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(app, &config).await,
        Command::IssueToken { subject } => {
            println!("{}", app.issue_token(&subject).await?);
            Ok(())
        }
    }
}

async fn serve(app: App, config: &AppConfig) -> anyhow::Result<()> {
    let addr = config.server.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "tollgate server listening");

    axum::serve(listener, app.router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("tollgate server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
