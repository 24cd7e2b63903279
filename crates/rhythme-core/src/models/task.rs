//! Task model definition and related functionality.

use jiff::{civil, Timestamp};
use serde::{Deserialize, Serialize};

use super::{Difficulty, Priority, TaskStatus};

/// An actionable, completable unit of work, optionally linked to the goal.
///
/// Serialized field names match the persisted JSON layout of the array stored
/// under the `@rhythme_tasks` key. Storage order is newest-created first as a
/// consequence of prepend-on-create.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, assigned at creation, immutable
    pub id: String,

    /// Title of the task
    pub title: String,

    /// Optional longer description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Status of the task
    #[serde(default)]
    pub status: TaskStatus,

    /// Priority of the task
    #[serde(default)]
    pub priority: Priority,

    /// Coarse time-estimate class
    #[serde(default)]
    pub difficulty: Difficulty,

    /// Optional reference to the long-term goal. No referential integrity is
    /// enforced; deleting the goal does not cascade here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<String>,

    /// Optional reference to a sub-goal (sub-goal entity not yet implemented)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_goal_id: Option<String>,

    /// Optional due date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<civil::Date>,

    /// Optional free-text category label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Optional set of text labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Timestamp when the task was created (immutable)
    pub created_at: Timestamp,

    /// Timestamp refreshed on every mutation
    pub updated_at: Timestamp,

    /// Set exactly once, the first time status transitions to completed.
    /// Never cleared by storage even if the status later reverts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,

    /// Optional ordered list of subtasks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<Subtask>>,

    /// Optional override of the difficulty-implied duration, in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<u32>,
}

impl Task {
    /// The task's time estimate in minutes: the explicit override when set,
    /// otherwise the duration implied by the difficulty class.
    pub fn estimated_minutes(&self) -> u32 {
        self.estimated_minutes
            .unwrap_or_else(|| self.difficulty.default_minutes())
    }
}

/// A single entry in a task's ordered subtask list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    /// Unique identifier within the parent task
    pub id: String,

    /// Title of the subtask
    pub title: String,

    /// Whether the subtask is done
    pub completed: bool,
}
