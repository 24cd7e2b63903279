//! Goal model definition and related functionality.

use jiff::{civil, Timestamp};
use serde::{Deserialize, Serialize};

use super::GoalStatus;

/// The single long-term goal the application is organized around.
///
/// At most one goal exists in storage at any time; creating a new goal
/// unconditionally replaces any existing one. Serialized field names match
/// the persisted JSON layout under the `rhythme_goal` key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Unique identifier, assigned at creation, immutable
    pub id: String,

    /// Title of the goal
    pub title: String,

    /// Optional longer description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Deadline for the goal
    pub target_date: civil::Date,

    /// Timestamp when the goal was created (immutable)
    pub created_at: Timestamp,

    /// Timestamp refreshed on every mutation
    pub updated_at: Timestamp,

    /// Status of the goal
    #[serde(default)]
    pub status: GoalStatus,

    /// Progress towards the goal, in `[0, 100]`
    pub progress: u8,
}

impl Goal {
    /// Days remaining until the target date, counted in local calendar days.
    ///
    /// Returns `0` when the target date is today and a negative number when
    /// the goal is overdue.
    pub fn days_remaining(&self) -> i32 {
        self.days_remaining_from(crate::ident::local_today())
    }

    /// Days remaining relative to an explicit reference date.
    ///
    /// Pure function; [`Goal::days_remaining`] calls this with today's date.
    pub fn days_remaining_from(&self, today: civil::Date) -> i32 {
        (self.target_date - today).get_days()
    }
}
