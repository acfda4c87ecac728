//! taskflow - terminal board for the task API
//!
//! Usage:
//!   taskflow [--api-url <url>] <command>
//!
//! The API address defaults to `TASKFLOW_API_URL`, then `http://localhost:4000`.
//! Filtering, sorting and the timeline are computed locally from the full
//! task list.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use taskflow::api::TaskRequest;
use taskflow::client::{API_URL_ENV, DEFAULT_API_URL, TaskClient};
use taskflow::domain::calendar::{self, format_date};
use taskflow::domain::{
    BoardQuery, DEFAULT_TIMELINE_DAYS, MAX_TIMELINE_DAYS, SortOrder, StatusCounts, StatusFilter,
    Task, TaskId, TaskStatus, TimelineDay, count_by_status, due_badge, timeline, visible_tasks,
};

#[derive(Parser)]
#[command(name = "taskflow")]
#[command(about = "Terminal board for the taskflow API")]
struct Cli {
    /// API base URL
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show status counts and task cards
    List(ListArgs),
    /// Show open tasks due per day
    Timeline(TimelineArgs),
    /// Create a task
    Add(AddArgs),
    /// Change fields of a task
    Edit(EditArgs),
    /// Mark a task as done
    Done {
        /// Task id
        #[arg(value_parser = parse_task_id)]
        id: TaskId,
    },
    /// Delete a task
    Delete {
        /// Task id
        #[arg(value_parser = parse_task_id)]
        id: TaskId,
    },
}

#[derive(Args, Debug)]
struct ListArgs {
    /// all, pending, in-progress or done
    #[arg(long, default_value = "all")]
    filter: StatusFilter,

    /// Case-insensitive text matched against title and description
    #[arg(long, short = 's', default_value = "")]
    search: String,

    /// created_desc, created_asc, due_asc or due_desc
    #[arg(long, default_value = "created_desc")]
    sort: SortOrder,
}

#[derive(Args, Debug)]
struct TimelineArgs {
    /// Number of days to show
    #[arg(
        long,
        default_value_t = DEFAULT_TIMELINE_DAYS,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_TIMELINE_DAYS))
    )]
    days: u32,
}

#[derive(Args, Debug)]
struct AddArgs {
    /// Task title
    title: String,

    /// Longer description
    #[arg(long, short = 'd')]
    description: Option<String>,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    due: Option<String>,

    /// pending, in-progress or done
    #[arg(long)]
    status: Option<String>,
}

#[derive(Args, Debug)]
struct EditArgs {
    /// Task id
    #[arg(value_parser = parse_task_id)]
    id: TaskId,

    /// New title
    #[arg(long)]
    title: Option<String>,

    /// New description; an empty value clears it
    #[arg(long, short = 'd')]
    description: Option<String>,

    /// New due date (YYYY-MM-DD); an empty value clears it
    #[arg(long)]
    due: Option<String>,

    /// pending, in-progress or done
    #[arg(long)]
    status: Option<String>,
}

fn parse_task_id(raw: &str) -> Result<TaskId, String> {
    TaskId::parse(raw).ok_or_else(|| format!("'{raw}' is not a valid task id"))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = TaskClient::new(cli.api_url);
    let today = calendar::today();

    match cli.command {
        Commands::List(args) => {
            let tasks = fetch_all(&client).await?;
            let query = BoardQuery {
                filter: args.filter,
                search: args.search,
                sort: args.sort,
            };
            println!("{}", render_counts(&count_by_status(&tasks)));
            let visible = visible_tasks(&tasks, &query);
            if visible.is_empty() {
                println!("No tasks found.");
            }
            for task in &visible {
                println!("{}", render_card(task, today));
            }
        }
        Commands::Timeline(args) => {
            let tasks = fetch_all(&client).await?;
            print!("{}", render_timeline(&timeline(&tasks, today, args.days)));
        }
        Commands::Add(args) => {
            let request = TaskRequest {
                title: Some(args.title),
                description: args.description,
                due_date: args.due,
                status: args.status,
            };
            let task = client
                .create_task(&request)
                .await
                .context("Failed to create task")?;
            println!("Created\n{}", render_card(&task, today));
        }
        Commands::Edit(args) => {
            let current = client
                .get_task(args.id)
                .await
                .with_context(|| format!("Failed to load task {}", args.id))?;
            let request = merge_edit(TaskRequest::from(&current), args);
            let task = client
                .update_task(current.id, &request)
                .await
                .with_context(|| format!("Failed to update task {}", current.id))?;
            println!("Updated\n{}", render_card(&task, today));
        }
        Commands::Done { id } => {
            let task = client
                .mark_done(id)
                .await
                .with_context(|| format!("Failed to complete task {id}"))?;
            println!("Completed\n{}", render_card(&task, today));
        }
        Commands::Delete { id } => {
            client
                .delete_task(id)
                .await
                .with_context(|| format!("Failed to delete task {id}"))?;
            println!("Deleted task {id}");
        }
    }

    Ok(())
}

async fn fetch_all(client: &TaskClient) -> Result<Vec<Task>> {
    client
        .list_tasks()
        .await
        .with_context(|| format!("Failed to load tasks from {}", client.base_url()))
}

/// Overlays the provided edit flags on the current task's fields.
fn merge_edit(current: TaskRequest, args: EditArgs) -> TaskRequest {
    TaskRequest {
        title: args.title.or(current.title),
        description: args.description.or(current.description),
        due_date: args.due.or(current.due_date),
        status: args.status.or(current.status),
    }
}

fn render_counts(counts: &StatusCounts) -> String {
    let per_status: Vec<String> = TaskStatus::ALL
        .iter()
        .map(|status| format!("{status}: {}", counts.for_status(*status)))
        .collect();
    format!("Total: {} | {}", counts.total, per_status.join(" | "))
}

fn render_card(task: &Task, today: NaiveDate) -> String {
    let mut card = format!(
        "#{} [{}] {}\n    Due: {}",
        task.id,
        task.status,
        task.title,
        format_date(task.due_date)
    );
    if let Some(badge) = due_badge(task, today) {
        card.push_str(&format!(" ({})", badge.text));
    }
    if let Some(description) = &task.description {
        card.push_str(&format!("\n    {description}"));
    }
    card
}

fn render_timeline(days: &[TimelineDay]) -> String {
    days.iter()
        .map(|day| {
            format!(
                "{:<7} {:<10} {}\n",
                day.label,
                "#".repeat(day.count),
                day.count
            )
        })
        .collect()
}
