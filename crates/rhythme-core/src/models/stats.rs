//! Aggregate statistics derived from the task collection.

use jiff::{civil, tz::TimeZone};
use serde::{Deserialize, Serialize};

use super::{Priority, Task, TaskStatus};

/// Counts derived on demand from the full task collection.
///
/// No incremental counters are kept; every computation walks the whole
/// collection, which stays small in practice.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    /// Total number of tasks
    pub total: usize,
    /// Tasks with completed status
    pub completed: usize,
    /// Tasks with pending status
    pub pending: usize,
    /// Tasks with in-progress status
    pub in_progress: usize,
    /// Tasks with a due date in the past that are not completed
    pub overdue: usize,
    /// Tasks completed on today's local calendar date
    pub completed_today: usize,
    /// High-priority tasks that are not completed
    pub high_priority: usize,
}

impl TaskStats {
    /// Computes statistics over a task collection relative to a reference
    /// calendar date.
    ///
    /// "Completed today" compares the completion instant converted to the
    /// system timezone against the reference date.
    pub fn compute(tasks: &[Task], today: civil::Date) -> Self {
        let tz = TimeZone::system();

        Self {
            total: tasks.len(),
            completed: tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Completed)
                .count(),
            pending: tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Pending)
                .count(),
            in_progress: tasks
                .iter()
                .filter(|t| t.status == TaskStatus::InProgress)
                .count(),
            overdue: tasks
                .iter()
                .filter(|t| {
                    t.status != TaskStatus::Completed && t.due_date.is_some_and(|due| due < today)
                })
                .count(),
            completed_today: tasks
                .iter()
                .filter(|t| {
                    t.completed_at
                        .is_some_and(|at| at.to_zoned(tz.clone()).date() == today)
                })
                .count(),
            high_priority: tasks
                .iter()
                .filter(|t| t.priority == Priority::High && t.status != TaskStatus::Completed)
                .count(),
        }
    }
}
