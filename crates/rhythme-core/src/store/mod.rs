//! High-level storage API for the goal record and task collection.
//!
//! This module provides the main [`Storage`] interface. Each aggregate lives
//! as a JSON blob in the key-value layer; every mutation is a full
//! read-modify-write cycle of its aggregate.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   UI / CLI      │    │    Storage      │    │    Database     │
//! │                 │───▶│ (goal_ops,      │───▶│   (kv table)    │
//! │                 │    │  task_ops)      │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Storage`] instances with configuration
//! - [`goal_ops`]: Goal record operations (create, update, progress, delete)
//! - [`task_ops`]: Task collection operations (CRUD, toggling, statistics)
//!
//! ## Failure semantics
//!
//! Reads degrade: a missing key, unreadable database, or malformed blob
//! yields an absent goal or empty task collection with a logged warning,
//! never an error. Writes propagate their errors to the caller.
//!
//! ## Concurrency
//!
//! The original single-writer assumption (one UI thread issuing one mutation
//! at a time) is replaced by an explicit store-level mutex: every
//! read-modify-write cycle is serialized, so concurrent mutations cannot lose
//! updates. The lock is per store, not per record, because writes always
//! rewrite the whole aggregate. Reads take no lock.

use std::path::PathBuf;

use tokio::task;

use crate::{
    db::Database,
    error::{Result, StoreError},
};

pub mod builder;
pub mod goal_ops;
pub mod task_ops;

#[cfg(test)]
mod tests;

// Re-export the main types
pub use builder::StorageBuilder;

/// Main storage interface for the goal record and task collection.
pub struct Storage {
    pub(crate) db_path: PathBuf,
    /// Serializes read-modify-write cycles across both aggregates.
    pub(crate) write_lock: tokio::sync::Mutex<()>,
}

impl Storage {
    /// Creates a new storage handle with the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self {
            db_path,
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Reads the raw blob stored under a key.
    pub(crate) async fn read_value(&self, key: &'static str) -> Result<Option<String>> {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_value(key)
        })
        .await
        .map_err(|e| StoreError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Writes the raw blob stored under a key, replacing any previous value.
    pub(crate) async fn write_value(&self, key: &'static str, value: String) -> Result<()> {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.put_value(key, &value)
        })
        .await
        .map_err(|e| StoreError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Removes the blob stored under a key. Idempotent.
    pub(crate) async fn remove_value(&self, key: &'static str) -> Result<()> {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_value(key)
        })
        .await
        .map_err(|e| StoreError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
