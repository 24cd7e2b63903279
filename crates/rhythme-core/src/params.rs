//! Parameter structures for storage operations.
//!
//! These structures carry creation inputs across interface layers (CLI, the
//! mobile shell, tests) without framework-specific derives. Identifiers and
//! timestamps are never part of an input; the store assigns them.

use jiff::{civil, Timestamp};
use serde::{Deserialize, Serialize};

use crate::models::{Difficulty, Priority, Subtask, TaskStatus};

/// Parameters for creating the long-term goal.
///
/// Creation unconditionally replaces any existing goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoal {
    /// Title of the goal (required, non-empty)
    pub title: String,
    /// Optional detailed description
    pub description: Option<String>,
    /// Deadline for the goal
    pub target_date: civil::Date,
}

/// Parameters for creating a new task.
///
/// Everything a task carries except the store-assigned identifier and
/// `created_at`/`updated_at` timestamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    /// Title of the task (required, non-empty)
    pub title: String,
    /// Optional detailed description
    pub description: Option<String>,
    /// Initial status, pending unless stated otherwise
    #[serde(default)]
    pub status: TaskStatus,
    /// Priority of the task
    #[serde(default)]
    pub priority: Priority,
    /// Coarse time-estimate class
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Optional reference to the long-term goal
    pub goal_id: Option<String>,
    /// Optional reference to a sub-goal
    pub sub_goal_id: Option<String>,
    /// Optional due date
    pub due_date: Option<civil::Date>,
    /// Optional free-text category label
    pub category: Option<String>,
    /// Optional set of text labels
    pub tags: Option<Vec<String>>,
    /// Explicit completion timestamp, e.g. for imported records
    pub completed_at: Option<Timestamp>,
    /// Optional ordered list of subtasks
    pub subtasks: Option<Vec<Subtask>>,
    /// Optional override of the difficulty-implied duration, in minutes
    pub estimated_minutes: Option<u32>,
}
