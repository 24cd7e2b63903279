//! Command handlers for the Rhythme CLI.

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::Subcommand;
use jiff::civil;
use rhythme_core::{
    auth::{AuthState, GoTrueClient, IdentityProvider, SessionManager},
    params::{CreateGoal, CreateTask},
    Difficulty, GoalPatch, Priority, Storage,
};

/// How long auth commands wait for the subscription-driven state change
/// after the provider call returns.
const AUTH_STATE_TIMEOUT: Duration = Duration::from_secs(10);

/// Task management commands
#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a new task
    Add {
        /// Title of the task
        title: String,
        /// Detailed description of the task
        #[arg(short, long)]
        description: Option<String>,
        /// Priority: high, medium, or low
        #[arg(short, long)]
        priority: Option<Priority>,
        /// Difficulty class: quick, medium, or deep
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<civil::Date>,
        /// Free-text category label
        #[arg(short, long)]
        category: Option<String>,
        /// Tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Link the task to the long-term goal by id
        #[arg(long)]
        goal_id: Option<String>,
        /// Override the difficulty-implied time estimate, in minutes
        #[arg(long)]
        estimated_minutes: Option<u32>,
    },
    /// List all tasks, newest first
    #[command(alias = "ls")]
    List,
    /// Show a single task
    Show {
        /// Task id
        id: String,
    },
    /// Toggle a task between completed and pending
    Toggle {
        /// Task id
        id: String,
    },
    /// Delete a task
    Rm {
        /// Task id
        id: String,
    },
    /// Show aggregate task statistics
    Stats,
    /// Populate empty storage with sample tasks
    Seed,
}

/// Goal management commands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Set the long-term goal, replacing any existing one
    Set {
        /// Title of the goal
        title: String,
        /// Deadline for the goal (YYYY-MM-DD)
        #[arg(long)]
        target_date: civil::Date,
        /// Detailed description of the goal
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Show the current goal
    Show,
    /// Update goal progress (0-100, clamped)
    Progress {
        /// New progress value
        value: i64,
    },
    /// Rename the current goal
    Rename {
        /// New title
        title: String,
    },
    /// Delete the goal
    Clear,
}

/// Authentication commands
#[derive(Subcommand)]
pub enum AuthCommands {
    /// Sign in with email and password
    Login {
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long)]
        password: String,
    },
    /// Create a new account
    Signup {
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long)]
        password: String,
    },
}

/// CLI command dispatcher over a storage instance.
pub struct Cli {
    storage: Storage,
}

impl Cli {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add {
                title,
                description,
                priority,
                difficulty,
                due,
                category,
                tags,
                goal_id,
                estimated_minutes,
            } => {
                let task = self
                    .storage
                    .create_task(&CreateTask {
                        title,
                        description,
                        priority: priority.unwrap_or_default(),
                        difficulty: difficulty.unwrap_or_default(),
                        due_date: due,
                        category,
                        tags: if tags.is_empty() { None } else { Some(tags) },
                        goal_id,
                        estimated_minutes,
                        ..CreateTask::default()
                    })
                    .await
                    .context("Failed to create task")?;
                println!("Created task {}", task.id);
            }
            TaskCommands::List => {
                let tasks = self.storage.tasks().await;
                if tasks.is_empty() {
                    println!("No tasks yet.");
                } else {
                    for task in &tasks {
                        println!("{task}");
                    }
                }
            }
            TaskCommands::Show { id } => match self.storage.task(&id).await {
                Some(task) => println!("{task}"),
                None => println!("No task with id {id}"),
            },
            TaskCommands::Toggle { id } => {
                match self
                    .storage
                    .toggle_complete(&id)
                    .await
                    .context("Failed to toggle task")?
                {
                    Some(task) => println!("{} is now {}", task.id, task.status),
                    None => println!("No task with id {id}"),
                }
            }
            TaskCommands::Rm { id } => {
                self.storage
                    .delete_task(&id)
                    .await
                    .context("Failed to delete task")?;
                println!("Deleted {id}");
            }
            TaskCommands::Stats => {
                let stats = self.storage.task_stats().await;
                println!("{stats}");
            }
            TaskCommands::Seed => {
                self.storage
                    .seed_sample_tasks()
                    .await
                    .context("Failed to seed sample tasks")?;
                println!("Seeded {} task(s)", self.storage.tasks().await.len());
            }
        }
        Ok(())
    }

    pub async fn handle_goal_command(&self, command: GoalCommands) -> Result<()> {
        match command {
            GoalCommands::Set {
                title,
                target_date,
                description,
            } => {
                let goal = self
                    .storage
                    .create_goal(&CreateGoal {
                        title,
                        description,
                        target_date,
                    })
                    .await
                    .context("Failed to create goal")?;
                println!("Goal set: {} (id {})", goal.title, goal.id);
            }
            GoalCommands::Show => match self.storage.goal().await {
                Some(goal) => println!("{goal}"),
                None => println!("No goal set. Use `rhythme goal set` to create one."),
            },
            GoalCommands::Progress { value } => {
                match self
                    .storage
                    .update_goal_progress(value)
                    .await
                    .context("Failed to update progress")?
                {
                    Some(goal) => {
                        println!("Progress: {}% ({})", goal.progress, goal.status);
                    }
                    None => println!("No goal set."),
                }
            }
            GoalCommands::Rename { title } => {
                match self
                    .storage
                    .update_goal(&GoalPatch {
                        title: Some(title),
                        ..GoalPatch::default()
                    })
                    .await
                    .context("Failed to update goal")?
                {
                    Some(goal) => println!("Goal renamed to {}", goal.title),
                    None => println!("No goal set."),
                }
            }
            GoalCommands::Clear => {
                self.storage
                    .delete_goal()
                    .await
                    .context("Failed to delete goal")?;
                println!("Goal cleared.");
            }
        }
        Ok(())
    }

    pub async fn handle_auth_command(&self, command: AuthCommands) -> Result<()> {
        let manager = session_manager_from_env()?;
        wait_for_state(&manager, |s| !s.is_loading).await?;

        match command {
            AuthCommands::Login { email, password } => {
                manager
                    .sign_in_with_email(&email, &password)
                    .await
                    .context("Sign-in failed")?;

                // The session lands via the provider subscription, not the
                // call above.
                let state = wait_for_state(&manager, AuthState::is_authenticated).await?;
                let user = state.user.context("Authenticated state without a user")?;
                println!(
                    "Signed in as {}",
                    user.email.as_deref().unwrap_or(&user.id)
                );
            }
            AuthCommands::Signup { email, password } => {
                manager
                    .sign_up_with_email(&email, &password)
                    .await
                    .context("Sign-up failed")?;
                if manager.state().is_authenticated() {
                    println!("Account created and signed in.");
                } else {
                    println!("Account created. Check {email} to verify the address.");
                }
            }
        }
        Ok(())
    }
}

/// Builds a session manager against the provider configured in the
/// environment.
fn session_manager_from_env() -> Result<SessionManager> {
    let base_url = std::env::var("RHYTHME_SUPABASE_URL")
        .context("RHYTHME_SUPABASE_URL must be set for auth commands")?;
    let api_key = std::env::var("RHYTHME_SUPABASE_ANON_KEY")
        .context("RHYTHME_SUPABASE_ANON_KEY must be set for auth commands")?;

    let provider: Arc<dyn IdentityProvider> = Arc::new(GoTrueClient::new(base_url, api_key));
    Ok(SessionManager::start(provider))
}

/// Waits until the observable auth state satisfies a predicate.
async fn wait_for_state<F>(manager: &SessionManager, pred: F) -> Result<AuthState>
where
    F: Fn(&AuthState) -> bool,
{
    let mut rx = manager.subscribe();
    tokio::time::timeout(AUTH_STATE_TIMEOUT, async {
        loop {
            let state = rx.borrow_and_update().clone();
            if pred(&state) {
                return Ok(state);
            }
            rx.changed()
                .await
                .context("Auth state channel closed unexpectedly")?;
        }
    })
    .await
    .context("Timed out waiting for the session state to settle")?
}
