//! Task collection operations for the Storage interface.

use jiff::Timestamp;
use log::warn;

use super::Storage;
use crate::{
    db::TASKS_KEY,
    error::{Result, StoreError},
    ident::{generate_id, local_today},
    models::{Task, TaskPatch, TaskStats, TaskStatus},
    params::CreateTask,
};

impl Storage {
    /// Returns all tasks in storage order, newest-created first.
    ///
    /// Never fails: an unreadable database or malformed blob degrades to an
    /// empty collection with a logged warning.
    pub async fn tasks(&self) -> Vec<Task> {
        let raw = match self.read_value(TASKS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read tasks, treating as empty: {e}");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!("Stored task collection is malformed, treating as empty: {e}");
                Vec::new()
            }
        }
    }

    /// Returns a single task by id, or `None` if not found.
    pub async fn task(&self, id: &str) -> Option<Task> {
        self.tasks().await.into_iter().find(|t| t.id == id)
    }

    /// Creates a new task and prepends it to the collection, so the default
    /// storage order is newest-first.
    pub async fn create_task(&self, params: &CreateTask) -> Result<Task> {
        if params.title.trim().is_empty() {
            return Err(StoreError::invalid_input("title", "Title must not be empty"));
        }

        let now = Timestamp::now();
        let task = Task {
            id: generate_id("task"),
            title: params.title.clone(),
            description: params.description.clone(),
            status: params.status,
            priority: params.priority,
            difficulty: params.difficulty,
            goal_id: params.goal_id.clone(),
            sub_goal_id: params.sub_goal_id.clone(),
            due_date: params.due_date,
            category: params.category.clone(),
            tags: params.tags.clone(),
            created_at: now,
            updated_at: now,
            completed_at: params.completed_at,
            subtasks: params.subtasks.clone(),
            estimated_minutes: params.estimated_minutes,
        };

        let _guard = self.write_lock.lock().await;
        let mut tasks = self.tasks().await;
        tasks.insert(0, task.clone());
        self.write_value(TASKS_KEY, serde_json::to_string(&tasks)?)
            .await?;
        Ok(task)
    }

    /// Applies a partial update to a task and refreshes `updated_at`.
    ///
    /// If the patch transitions the status to completed and the task was
    /// never completed before, `completed_at` is stamped now. The stamp is
    /// set exactly once; reverting a completed task leaves the prior value
    /// in place.
    ///
    /// Returns `None` without touching storage when the id is not found.
    pub async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Option<Task>> {
        let _guard = self.write_lock.lock().await;

        let mut tasks = self.tasks().await;
        let Some(index) = tasks.iter().position(|t| t.id == id) else {
            return Ok(None);
        };

        patch.apply(&mut tasks[index]);
        tasks[index].updated_at = Timestamp::now();

        if patch.status == Some(TaskStatus::Completed) && tasks[index].completed_at.is_none() {
            tasks[index].completed_at = Some(Timestamp::now());
        }

        let updated = tasks[index].clone();
        self.write_value(TASKS_KEY, serde_json::to_string(&tasks)?)
            .await?;
        Ok(Some(updated))
    }

    /// Removes a task from the collection.
    ///
    /// Returns `true` whenever the write succeeds, including when the id was
    /// absent; filtering out a non-matching id is a defined no-op success,
    /// not an error.
    pub async fn delete_task(&self, id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;

        let mut tasks = self.tasks().await;
        tasks.retain(|t| t.id != id);
        self.write_value(TASKS_KEY, serde_json::to_string(&tasks)?)
            .await?;
        Ok(true)
    }

    /// Flips a task between completed and pending.
    ///
    /// An in-progress task goes straight to completed; the return path from
    /// completed is always pending. `in_progress` is never produced here.
    pub async fn toggle_complete(&self, id: &str) -> Result<Option<Task>> {
        let Some(task) = self.task(id).await else {
            return Ok(None);
        };

        let new_status = if task.status == TaskStatus::Completed {
            TaskStatus::Pending
        } else {
            TaskStatus::Completed
        };
        self.update_task(id, &TaskPatch::with_status(new_status))
            .await
    }

    /// Computes aggregate statistics over the full task collection.
    ///
    /// Recomputed on every call; the collection is small enough that no
    /// incremental counters are kept.
    pub async fn task_stats(&self) -> TaskStats {
        let tasks = self.tasks().await;
        TaskStats::compute(&tasks, local_today())
    }

    /// Populates the collection with a demo task set.
    ///
    /// Does nothing when any tasks already exist.
    pub async fn seed_sample_tasks(&self) -> Result<()> {
        if !self.tasks().await.is_empty() {
            return Ok(());
        }

        let today = local_today();
        let tomorrow = today.tomorrow().map_err(|e| StoreError::Configuration {
            message: format!("Date arithmetic failed: {e}"),
        })?;
        let day_after = tomorrow.tomorrow().map_err(|e| StoreError::Configuration {
            message: format!("Date arithmetic failed: {e}"),
        })?;

        for params in &sample_tasks(today, tomorrow, day_after) {
            self.create_task(params).await?;
        }
        Ok(())
    }
}

/// The demo task set used by [`Storage::seed_sample_tasks`].
fn sample_tasks(
    today: jiff::civil::Date,
    tomorrow: jiff::civil::Date,
    day_after: jiff::civil::Date,
) -> Vec<CreateTask> {
    use crate::models::{Difficulty, Priority};

    vec![
        CreateTask {
            title: "Review project proposal".to_string(),
            description: Some("Go through the Q1 project proposal and provide feedback".to_string()),
            status: TaskStatus::Completed,
            priority: Priority::High,
            difficulty: Difficulty::Medium,
            due_date: Some(today),
            category: Some("Work".to_string()),
            completed_at: Some(Timestamp::now()),
            ..CreateTask::default()
        },
        CreateTask {
            title: "Team standup meeting".to_string(),
            status: TaskStatus::Completed,
            priority: Priority::Medium,
            difficulty: Difficulty::Quick,
            due_date: Some(today),
            category: Some("Work".to_string()),
            completed_at: Some(Timestamp::now()),
            ..CreateTask::default()
        },
        CreateTask {
            title: "Update documentation".to_string(),
            description: Some("Update API docs for v2.0 release".to_string()),
            status: TaskStatus::InProgress,
            priority: Priority::Medium,
            difficulty: Difficulty::Deep,
            due_date: Some(today),
            category: Some("Work".to_string()),
            ..CreateTask::default()
        },
        CreateTask {
            title: "Code review for PR #42".to_string(),
            status: TaskStatus::Pending,
            priority: Priority::High,
            difficulty: Difficulty::Medium,
            due_date: Some(tomorrow),
            category: Some("Work".to_string()),
            ..CreateTask::default()
        },
        CreateTask {
            title: "Prepare presentation".to_string(),
            description: Some("Create slides for Friday's demo".to_string()),
            status: TaskStatus::Pending,
            priority: Priority::Low,
            difficulty: Difficulty::Deep,
            due_date: Some(day_after),
            category: Some("Work".to_string()),
            ..CreateTask::default()
        },
        CreateTask {
            title: "Buy groceries".to_string(),
            status: TaskStatus::Pending,
            priority: Priority::Medium,
            difficulty: Difficulty::Quick,
            due_date: Some(today),
            category: Some("Personal".to_string()),
            ..CreateTask::default()
        },
        CreateTask {
            title: "Call mom".to_string(),
            status: TaskStatus::Pending,
            priority: Priority::Low,
            difficulty: Difficulty::Quick,
            category: Some("Personal".to_string()),
            ..CreateTask::default()
        },
    ]
}
