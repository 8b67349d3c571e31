use clap::Subcommand;
use colored::Colorize;
use creddypens_core::ApiClient;

use crate::output;

#[derive(Subcommand)]
pub enum AcademyCommand {
    #[command(about = "Training status and recent sessions")]
    Status,

    #[command(about = "Trigger a synthetic training run for one agent")]
    Train { agent_code: String },

    #[command(about = "Record feedback on an interaction")]
    Feedback {
        interaction_id: String,

        /// Mark the interaction as good (omit for negative feedback)
        #[arg(long)]
        positive: bool,
    },
}

pub async fn handle_academy_command(
    client: &ApiClient,
    command: AcademyCommand,
    json: bool,
) -> anyhow::Result<()> {
    match command {
        AcademyCommand::Status => {
            let status = client.academy_status().await?;
            if json {
                return output::print_json(&status);
            }
            output::section("Academy");
            println!(
                "  {:<20} {}",
                "In training:".bold(),
                status.agents_in_training
            );
            println!(
                "  {:<20} {:.2} ({})",
                "Avg quality:".bold(),
                status.avg_quality_score,
                output::dash_if_empty(&status.quality_trend)
            );
            println!(
                "  {:<20} {:.1}h",
                "Next cycle in:".bold(),
                status.next_cycle_hours
            );
            if !status.recent_sessions.is_empty() {
                println!();
                println!("  {}", "Recent sessions".yellow().bold());
                for session in &status.recent_sessions {
                    let mark = if session.passed {
                        "✓".green()
                    } else {
                        "✗".red()
                    };
                    println!(
                        "    {} {} scored {:.2} ({})",
                        mark, session.agent_code, session.score, session.completed_at
                    );
                }
            }
        }
        AcademyCommand::Train { agent_code } => {
            println!("{}", format!("Training {}...", agent_code).cyan());
            client.trigger_training(&agent_code).await?;
            output::success("Training completed");
        }
        AcademyCommand::Feedback {
            interaction_id,
            positive,
        } => {
            client.academy_feedback(&interaction_id, positive).await?;
            output::success("Feedback recorded");
        }
    }
    Ok(())
}
