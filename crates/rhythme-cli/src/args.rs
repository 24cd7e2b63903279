use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{AuthCommands, GoalCommands, TaskCommands};

/// Main command-line interface for the Rhythme task tracker
///
/// Rhythme organizes work around a single long-term goal and a flat task
/// collection. The CLI exposes the same storage layer the mobile app uses:
/// task management with derived statistics, the goal record with progress
/// tracking, and email authentication against the remote identity provider.
#[derive(Parser)]
#[command(version, about, name = "rhythme")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/rhythme/rhythme.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the Rhythme CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage tasks
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage the long-term goal
    #[command(alias = "g")]
    Goal {
        #[command(subcommand)]
        command: GoalCommands,
    },
    /// Authenticate against the identity provider
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
}
