//! Rhythme CLI Application
//!
//! Command-line interface for the rhythme goal-first task tracker.

mod args;
mod cli;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use rhythme_core::StorageBuilder;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        command,
    } = Args::parse();

    let storage = StorageBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize storage")?;

    info!("Rhythme started");

    let cli = Cli::new(storage);
    match command {
        Commands::Task { command } => cli.handle_task_command(command).await,
        Commands::Goal { command } => cli.handle_goal_command(command).await,
        Commands::Auth { command } => cli.handle_auth_command(command).await,
    }
}
