//! Data models for the goal and task aggregates.
//!
//! This module contains the core domain models persisted by the storage
//! layer. Display implementations live in [`crate::display`] to keep data
//! structures separate from presentation.
//!
//! Serialized representations keep the persisted JSON layout stable:
//! camelCase field names, lowercase (goal) and snake_case (task) status
//! values, and optional fields omitted when absent.

pub mod goal;
pub mod requests;
pub mod stats;
pub mod status;
pub mod task;

#[cfg(test)]
mod tests;

// Re-export all public types at the models level
pub use goal::Goal;
pub use requests::{GoalPatch, TaskPatch};
pub use stats::TaskStats;
pub use status::{Difficulty, GoalStatus, Priority, TaskStatus};
pub use task::{Subtask, Task};
