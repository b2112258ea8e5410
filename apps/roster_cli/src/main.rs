use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{CommandOutcome, HttpRosterApi, MemorySurface, RosterController};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "roster", about = "Browse and edit the activity roster")]
struct Args {
    /// Overrides the configured server url.
    #[arg(long)]
    server_url: Option<String>,
    /// Config file to read instead of ./roster.toml.
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the current roster.
    List,
    /// Sign a participant up for an activity.
    Enroll {
        #[arg(long)]
        activity: String,
        #[arg(long)]
        email: String,
    },
    /// Remove a participant from an activity.
    Withdraw {
        #[arg(long)]
        activity: String,
        #[arg(long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    info!(server_url = %settings.server_url, "using roster server");

    let api = HttpRosterApi::with_timeout(&settings.server_url, settings.request_timeout())
        .context("failed to build roster client")?;
    let surface = Arc::new(MemorySurface::new());
    let controller = RosterController::with_surface(
        Arc::new(api),
        surface.clone(),
        settings.status_display_window(),
    );

    let loaded = controller.load_roster().await;
    let outcome = match args.command {
        Command::List => None,
        Command::Enroll { activity, email } => {
            surface.set_email_input(email.clone());
            Some(controller.enroll(&activity, &email).await)
        }
        Command::Withdraw { activity, email } => Some(controller.withdraw(&activity, &email).await),
    };

    println!(
        "{}",
        surface
            .snapshot_html()
            .context("failed to serialise page snapshot")?
    );

    match outcome {
        None if !loaded => bail!("roster could not be loaded"),
        None => Ok(()),
        Some(CommandOutcome::Succeeded { message }) => {
            println!("{message}");
            Ok(())
        }
        Some(CommandOutcome::Rejected { detail }) => bail!("{detail}"),
        Some(CommandOutcome::Unreachable) => bail!("server unreachable or sent a malformed reply"),
    }
}
