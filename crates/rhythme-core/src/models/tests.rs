use jiff::{civil::date, Timestamp};

use super::*;

fn sample_task(id: &str) -> Task {
    let now = Timestamp::now();
    Task {
        id: id.to_string(),
        title: "Sample".to_string(),
        description: None,
        status: TaskStatus::Pending,
        priority: Priority::Medium,
        difficulty: Difficulty::Medium,
        goal_id: None,
        sub_goal_id: None,
        due_date: None,
        category: None,
        tags: None,
        created_at: now,
        updated_at: now,
        completed_at: None,
        subtasks: None,
        estimated_minutes: None,
    }
}

#[test]
fn test_task_status_serde_uses_snake_case() {
    let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
    assert_eq!(json, "\"in_progress\"");

    let status: TaskStatus = serde_json::from_str("\"in_progress\"").unwrap();
    assert_eq!(status, TaskStatus::InProgress);
}

#[test]
fn test_task_status_from_str_accepts_both_spellings() {
    assert_eq!(
        "in_progress".parse::<TaskStatus>().unwrap(),
        TaskStatus::InProgress
    );
    assert_eq!(
        "inprogress".parse::<TaskStatus>().unwrap(),
        TaskStatus::InProgress
    );
    assert!("done".parse::<TaskStatus>().is_err());
}

#[test]
fn test_goal_status_round_trip() {
    for status in [GoalStatus::Active, GoalStatus::Achieved, GoalStatus::Paused] {
        let parsed: GoalStatus = status.as_str().parse().unwrap();
        assert_eq!(parsed, status);
    }
}

#[test]
fn test_task_reads_persisted_camel_case_layout() {
    let blob = r#"{
        "id": "task_1700000000000_abc123def",
        "title": "Update documentation",
        "status": "in_progress",
        "priority": "medium",
        "difficulty": "deep",
        "dueDate": "2024-05-01",
        "category": "Work",
        "createdAt": "2024-04-20T10:00:00Z",
        "updatedAt": "2024-04-20T10:00:00Z"
    }"#;

    let task: Task = serde_json::from_str(blob).unwrap();
    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(task.difficulty, Difficulty::Deep);
    assert_eq!(task.due_date, Some(date(2024, 5, 1)));
    assert_eq!(task.completed_at, None);

    let out = serde_json::to_string(&task).unwrap();
    assert!(out.contains("\"dueDate\""));
    assert!(out.contains("\"createdAt\""));
    // Absent optional fields stay absent in the persisted layout.
    assert!(!out.contains("completedAt"));
}

#[test]
fn test_goal_reads_persisted_camel_case_layout() {
    let blob = r#"{
        "id": "goal_1700000000000_abc123def",
        "title": "Ship the app",
        "targetDate": "2024-12-31",
        "createdAt": "2024-04-20T10:00:00Z",
        "updatedAt": "2024-04-20T10:00:00Z",
        "status": "active",
        "progress": 40
    }"#;

    let goal: Goal = serde_json::from_str(blob).unwrap();
    assert_eq!(goal.status, GoalStatus::Active);
    assert_eq!(goal.progress, 40);
    assert_eq!(goal.target_date, date(2024, 12, 31));
}

#[test]
fn test_goal_days_remaining_signs() {
    let now = Timestamp::now();
    let goal = Goal {
        id: "goal_1".to_string(),
        title: "Test".to_string(),
        description: None,
        target_date: date(2024, 6, 10),
        created_at: now,
        updated_at: now,
        status: GoalStatus::Active,
        progress: 0,
    };

    assert_eq!(goal.days_remaining_from(date(2024, 6, 10)), 0);
    assert_eq!(goal.days_remaining_from(date(2024, 6, 11)), -1);
    assert_eq!(goal.days_remaining_from(date(2024, 6, 3)), 7);
}

#[test]
fn test_goal_patch_preserves_absent_fields() {
    let now = Timestamp::now();
    let mut goal = Goal {
        id: "goal_1".to_string(),
        title: "Original".to_string(),
        description: Some("Keep me".to_string()),
        target_date: date(2024, 12, 31),
        created_at: now,
        updated_at: now,
        status: GoalStatus::Active,
        progress: 10,
    };

    let patch = GoalPatch {
        title: Some("Renamed".to_string()),
        progress: Some(50),
        ..GoalPatch::default()
    };
    patch.apply(&mut goal);

    assert_eq!(goal.title, "Renamed");
    assert_eq!(goal.progress, 50);
    assert_eq!(goal.description.as_deref(), Some("Keep me"));
    assert_eq!(goal.status, GoalStatus::Active);
}

#[test]
fn test_task_patch_overwrites_present_fields_only() {
    let mut task = sample_task("task_1");
    task.category = Some("Work".to_string());

    let patch = TaskPatch {
        title: Some("Renamed".to_string()),
        priority: Some(Priority::High),
        due_date: Some(date(2024, 7, 1)),
        ..TaskPatch::default()
    };
    patch.apply(&mut task);

    assert_eq!(task.title, "Renamed");
    assert_eq!(task.priority, Priority::High);
    assert_eq!(task.due_date, Some(date(2024, 7, 1)));
    assert_eq!(task.category.as_deref(), Some("Work"));
    assert_eq!(task.status, TaskStatus::Pending);
}

#[test]
fn test_estimated_minutes_prefers_override() {
    let mut task = sample_task("task_1");
    task.difficulty = Difficulty::Deep;
    assert_eq!(task.estimated_minutes(), 120);

    task.estimated_minutes = Some(45);
    assert_eq!(task.estimated_minutes(), 45);

    task.estimated_minutes = None;
    task.difficulty = Difficulty::Quick;
    assert_eq!(task.estimated_minutes(), 15);
}

#[test]
fn test_stats_compute_scenario() {
    let today = crate::ident::local_today();
    let yesterday = today.yesterday().unwrap();
    let tomorrow = today.tomorrow().unwrap();

    let mut done = sample_task("task_a");
    done.status = TaskStatus::Completed;
    done.completed_at = Some(Timestamp::now());

    let mut late = sample_task("task_b");
    late.due_date = Some(yesterday);

    let mut urgent = sample_task("task_c");
    urgent.priority = Priority::High;
    urgent.due_date = Some(tomorrow);

    let stats = TaskStats::compute(&[done, late, urgent], today);
    assert_eq!(
        stats,
        TaskStats {
            total: 3,
            completed: 1,
            pending: 2,
            in_progress: 0,
            overdue: 1,
            completed_today: 1,
            high_priority: 1,
        }
    );
}

#[test]
fn test_stats_overdue_ignores_completed_tasks() {
    let today = crate::ident::local_today();
    let yesterday = today.yesterday().unwrap();

    let mut task = sample_task("task_a");
    task.status = TaskStatus::Completed;
    task.due_date = Some(yesterday);

    let stats = TaskStats::compute(&[task], today);
    assert_eq!(stats.overdue, 0);
}
