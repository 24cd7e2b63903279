//! Goal record operations for the Storage interface.

use jiff::Timestamp;
use log::warn;

use super::Storage;
use crate::{
    db::GOAL_KEY,
    error::{Result, StoreError},
    ident::generate_id,
    models::{Goal, GoalPatch, GoalStatus},
    params::CreateGoal,
};

impl Storage {
    /// Returns the current goal, or `None` if none exists.
    ///
    /// Never fails: an unreadable database or malformed blob degrades to an
    /// absent goal with a logged warning.
    pub async fn goal(&self) -> Option<Goal> {
        let raw = match self.read_value(GOAL_KEY).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Failed to read goal, treating as absent: {e}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(goal) => Some(goal),
            Err(e) => {
                warn!("Stored goal is malformed, treating as absent: {e}");
                None
            }
        }
    }

    /// Whether a goal is currently set.
    pub async fn has_goal(&self) -> bool {
        self.goal().await.is_some()
    }

    /// Creates the long-term goal, unconditionally replacing any existing
    /// one. The new goal starts active with zero progress.
    pub async fn create_goal(&self, params: &CreateGoal) -> Result<Goal> {
        if params.title.trim().is_empty() {
            return Err(StoreError::invalid_input("title", "Title must not be empty"));
        }

        let now = Timestamp::now();
        let goal = Goal {
            id: generate_id("goal"),
            title: params.title.clone(),
            description: params.description.clone(),
            target_date: params.target_date,
            created_at: now,
            updated_at: now,
            status: GoalStatus::Active,
            progress: 0,
        };

        let _guard = self.write_lock.lock().await;
        self.write_value(GOAL_KEY, serde_json::to_string(&goal)?)
            .await?;
        Ok(goal)
    }

    /// Applies a partial update to the goal and refreshes `updated_at`.
    ///
    /// Returns `None` without touching storage when no goal exists.
    pub async fn update_goal(&self, patch: &GoalPatch) -> Result<Option<Goal>> {
        let _guard = self.write_lock.lock().await;

        let Some(mut goal) = self.goal().await else {
            return Ok(None);
        };

        patch.apply(&mut goal);
        goal.updated_at = Timestamp::now();

        self.write_value(GOAL_KEY, serde_json::to_string(&goal)?)
            .await?;
        Ok(Some(goal))
    }

    /// Updates goal progress, clamping the input to `[0, 100]`.
    ///
    /// A clamped progress of 100 transitions the status to achieved; any
    /// other value sets it back to active. This is the only automatic status
    /// transition; paused is never set here.
    pub async fn update_goal_progress(&self, progress: i64) -> Result<Option<Goal>> {
        let clamped = progress.clamp(0, 100) as u8;
        let status = if clamped >= 100 {
            GoalStatus::Achieved
        } else {
            GoalStatus::Active
        };

        self.update_goal(&GoalPatch {
            progress: Some(clamped),
            status: Some(status),
            ..GoalPatch::default()
        })
        .await
    }

    /// Removes the persisted goal record. Idempotent.
    pub async fn delete_goal(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.remove_value(GOAL_KEY).await
    }
}
