//! Core library for the Rhythme goal-first productivity application.
//!
//! This crate provides the portable core behind the app's screens: local
//! persistence for the single long-term goal and the task collection,
//! derived statistics, and the authentication session manager. Screen
//! layout, navigation, and rendering live in the platform shell and call
//! into this crate.
//!
//! # Storage model
//!
//! Persisted state is a namespaced key-value map of JSON blobs backed by
//! SQLite: the goal record under one key, the full task array under another.
//! Mutations are whole-aggregate read-modify-write cycles serialized by a
//! store-level lock. Reads never fail — a missing or malformed blob degrades
//! to "no goal" or "no tasks" with a logged warning.
//!
//! # Quick Start
//!
//! ```rust
//! use rhythme_core::{params::CreateTask, StorageBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a storage instance
//! let storage = StorageBuilder::new()
//!     .with_database_path(Some("rhythme.db"))
//!     .build()
//!     .await?;
//!
//! // Create a task; it lands at the front of the collection
//! let task = storage
//!     .create_task(&CreateTask {
//!         title: "Write the launch post".to_string(),
//!         ..CreateTask::default()
//!     })
//!     .await?;
//! println!("Created task: {}", task.title);
//!
//! // Derived statistics are recomputed on demand
//! let stats = storage.task_stats().await;
//! println!("{} open, {} done", stats.pending, stats.completed);
//! # Ok(())
//! # }
//! ```
//!
//! # Authentication
//!
//! [`auth::SessionManager`] owns the live session state for the process and
//! bridges to a remote identity provider through the
//! [`auth::IdentityProvider`] trait; [`auth::GoTrueClient`] is the
//! production implementation. Dependents subscribe to state changes rather
//! than polling.

pub mod auth;
pub mod db;
pub mod display;
pub mod error;
pub mod ident;
pub mod models;
pub mod params;
pub mod store;

// Re-export commonly used types
pub use auth::{AuthState, SessionManager};
pub use db::Database;
pub use display::LocalDateTime;
pub use error::{Result, StoreError};
pub use models::{
    Difficulty, Goal, GoalPatch, GoalStatus, Priority, Subtask, Task, TaskPatch, TaskStats,
    TaskStatus,
};
pub use params::{CreateGoal, CreateTask};
pub use store::{Storage, StorageBuilder};
