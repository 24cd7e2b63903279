//! SQLite-backed key-value storage for persisted aggregates.
//!
//! This module provides the low-level persistence layer for the rhythme
//! storage system. State is a namespaced string-keyed map of JSON blobs held
//! in a single SQLite table; higher layers decide what lives under each key
//! and how it is encoded.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod kv;
pub mod migrations;

/// Storage key for the single long-term goal record.
pub const GOAL_KEY: &str = "rhythme_goal";

/// Storage key for the JSON-encoded task collection.
pub const TASKS_KEY: &str = "@rhythme_tasks";

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
