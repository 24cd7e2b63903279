//! Display implementations for goals, tasks, and statistics.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{Difficulty, Goal, GoalStatus, Priority, Task, TaskStats, TaskStatus};

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        writeln!(f)?;

        writeln!(f, "- Status: {}", self.status)?;
        writeln!(f, "- Progress: {}%", self.progress)?;
        writeln!(f, "- Target date: {}", self.target_date)?;

        let days = self.days_remaining();
        if days < 0 {
            writeln!(f, "- Overdue by {} day(s)", -days)?;
        } else {
            writeln!(f, "- {days} day(s) remaining")?;
        }

        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {} ({})", self.title, self.status.with_icon())?;
        writeln!(f)?;

        writeln!(f, "- Id: {}", self.id)?;
        writeln!(f, "- Priority: {}", self.priority)?;
        writeln!(
            f,
            "- Difficulty: {} (~{} min)",
            self.difficulty,
            self.estimated_minutes()
        )?;
        if let Some(due) = self.due_date {
            writeln!(f, "- Due: {due}")?;
        }
        if let Some(category) = &self.category {
            writeln!(f, "- Category: {category}")?;
        }
        if let Some(tags) = &self.tags {
            writeln!(f, "- Tags: {}", tags.join(", "))?;
        }
        if let Some(goal_id) = &self.goal_id {
            writeln!(f, "- Goal: {goal_id}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        if let Some(completed_at) = &self.completed_at {
            writeln!(f, "- Completed: {}", LocalDateTime(completed_at))?;
        }

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if let Some(subtasks) = &self.subtasks {
            writeln!(f)?;
            for subtask in subtasks {
                let mark = if subtask.completed { "x" } else { " " };
                writeln!(f, "- [{mark}] {}", subtask.title)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for TaskStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Task statistics")?;
        writeln!(f)?;
        writeln!(f, "- Total: {}", self.total)?;
        writeln!(f, "- Completed: {}", self.completed)?;
        writeln!(f, "- Pending: {}", self.pending)?;
        writeln!(f, "- In progress: {}", self.in_progress)?;
        writeln!(f, "- Overdue: {}", self.overdue)?;
        writeln!(f, "- Completed today: {}", self.completed_today)?;
        writeln!(f, "- High priority open: {}", self.high_priority)?;
        Ok(())
    }
}
