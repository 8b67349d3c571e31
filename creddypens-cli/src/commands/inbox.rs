use clap::Subcommand;
use creddypens_core::models::TaskStatus;
use creddypens_core::{ApiClient, CreddyError};

use crate::output;

#[derive(Subcommand)]
pub enum InboxCommand {
    #[command(about = "List inbox tasks grouped by status")]
    List,

    #[command(about = "Assign a task to an agent")]
    Assign { task_id: String, agent_code: String },

    #[command(about = "Move a task to pending, in_progress, or completed")]
    Status { task_id: String, status: String },
}

fn parse_status(s: &str) -> Result<TaskStatus, CreddyError> {
    TaskStatus::all()
        .iter()
        .copied()
        .find(|status| status.as_str() == s.to_lowercase())
        .ok_or_else(|| {
            CreddyError::validation(format!(
                "Unknown status '{}'. Expected pending, in_progress, or completed",
                s
            ))
        })
}

pub async fn handle_inbox_command(
    client: &ApiClient,
    command: InboxCommand,
    json: bool,
) -> anyhow::Result<()> {
    match command {
        InboxCommand::List => {
            let tasks = client.list_inbox_tasks().await?;
            if json {
                return output::print_json(&tasks);
            }
            for status in TaskStatus::all() {
                let column: Vec<_> = tasks.iter().filter(|t| t.status == *status).collect();
                if column.is_empty() {
                    continue;
                }
                output::section(&format!("{} ({})", status.label(), column.len()));
                for task in column {
                    println!(
                        "  [{}] {} — {} ({})",
                        task.priority,
                        task.task_id,
                        output::truncate(&task.task_title, 50),
                        task.assigned_to.as_deref().unwrap_or("unassigned")
                    );
                }
                println!();
            }
        }
        InboxCommand::Assign {
            task_id,
            agent_code,
        } => {
            let task = client.assign_inbox_task(&task_id, &agent_code).await?;
            output::success(&format!(
                "Task {} assigned to {}",
                task.task_id,
                task.assigned_to.as_deref().unwrap_or(&agent_code)
            ));
        }
        InboxCommand::Status { task_id, status } => {
            let status = parse_status(&status)?;
            let task = client.set_inbox_task_status(&task_id, status).await?;
            output::success(&format!("Task {} is now {}", task.task_id, task.status));
        }
    }
    Ok(())
}
