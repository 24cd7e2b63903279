//! Patch types with defined shallow-merge semantics.
//!
//! Updates are expressed as structs of optional fields rather than loose
//! maps: a present field overwrites the stored value, an absent field
//! preserves it. `id` and `created_at` are immutable and therefore not
//! representable in a patch.
//!
//! A present field can only overwrite with a value, never clear an optional
//! field back to absent; none of the calling surfaces ever clears a field.

use jiff::{civil, Timestamp};
use serde::{Deserialize, Serialize};

use super::{Difficulty, Goal, GoalStatus, Priority, Subtask, Task, TaskStatus};

/// Partial update for the goal record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPatch {
    /// Updated title
    pub title: Option<String>,
    /// Updated description
    pub description: Option<String>,
    /// Updated target date
    pub target_date: Option<civil::Date>,
    /// Updated status
    pub status: Option<GoalStatus>,
    /// Updated progress value
    pub progress: Option<u8>,
}

impl GoalPatch {
    /// Applies the present fields of this patch onto a goal.
    ///
    /// The caller is responsible for refreshing `updated_at`.
    pub fn apply(&self, goal: &mut Goal) {
        if let Some(title) = &self.title {
            goal.title = title.clone();
        }
        if let Some(description) = &self.description {
            goal.description = Some(description.clone());
        }
        if let Some(target_date) = self.target_date {
            goal.target_date = target_date;
        }
        if let Some(status) = self.status {
            goal.status = status;
        }
        if let Some(progress) = self.progress {
            goal.progress = progress;
        }
    }
}

/// Partial update for a task record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// Updated title
    pub title: Option<String>,
    /// Updated description
    pub description: Option<String>,
    /// Updated status. Transitioning to completed stamps `completed_at` in
    /// the store if it was never set before.
    pub status: Option<TaskStatus>,
    /// Updated priority
    pub priority: Option<Priority>,
    /// Updated difficulty
    pub difficulty: Option<Difficulty>,
    /// Updated goal reference
    pub goal_id: Option<String>,
    /// Updated sub-goal reference
    pub sub_goal_id: Option<String>,
    /// Updated due date
    pub due_date: Option<civil::Date>,
    /// Updated category label
    pub category: Option<String>,
    /// Updated tag set
    pub tags: Option<Vec<String>>,
    /// Explicit completion timestamp, e.g. when importing records
    pub completed_at: Option<Timestamp>,
    /// Updated subtask list
    pub subtasks: Option<Vec<Subtask>>,
    /// Updated time-estimate override
    pub estimated_minutes: Option<u32>,
}

impl TaskPatch {
    /// A patch that only changes the status.
    pub fn with_status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Applies the present fields of this patch onto a task.
    ///
    /// The caller is responsible for refreshing `updated_at` and for the
    /// first-completion `completed_at` stamping rule.
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = Some(description.clone());
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(difficulty) = self.difficulty {
            task.difficulty = difficulty;
        }
        if let Some(goal_id) = &self.goal_id {
            task.goal_id = Some(goal_id.clone());
        }
        if let Some(sub_goal_id) = &self.sub_goal_id {
            task.sub_goal_id = Some(sub_goal_id.clone());
        }
        if let Some(due_date) = self.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(category) = &self.category {
            task.category = Some(category.clone());
        }
        if let Some(tags) = &self.tags {
            task.tags = Some(tags.clone());
        }
        if let Some(completed_at) = self.completed_at {
            task.completed_at = Some(completed_at);
        }
        if let Some(subtasks) = &self.subtasks {
            task.subtasks = Some(subtasks.clone());
        }
        if let Some(estimated_minutes) = self.estimated_minutes {
            task.estimated_minutes = Some(estimated_minutes);
        }
    }
}
