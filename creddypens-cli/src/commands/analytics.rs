use clap::Subcommand;
use colored::Colorize;
use creddypens_core::ApiClient;

use crate::output;

#[derive(Subcommand)]
pub enum AnalyticsCommand {
    #[command(about = "Usage overview for the organization")]
    Overview {
        #[arg(short, long, default_value_t = 30)]
        days: u32,
    },

    #[command(about = "Estimated cost by department")]
    Costs {
        #[arg(short, long, default_value_t = 30)]
        days: u32,
    },

    #[command(about = "Daily activity trend")]
    Activity {
        #[arg(short, long, default_value_t = 30)]
        days: u32,
    },

    #[command(about = "The dashboard stat block plus recent activity")]
    Dashboard,
}

pub async fn handle_analytics_command(
    client: &ApiClient,
    command: AnalyticsCommand,
    json: bool,
) -> anyhow::Result<()> {
    match command {
        AnalyticsCommand::Overview { days } => {
            let overview = client.analytics_overview(days).await?;
            if json {
                return output::print_json(&overview);
            }
            output::section(&format!("Overview — last {} days", overview.days.max(days)));
            println!(
                "  {:<18} {}",
                "Interactions:".bold(),
                overview.total_interactions
            );
            println!("  {:<18} {}", "Active agents:".bold(), overview.active_agents);
            println!(
                "  {:<18} {:.2}s",
                "Avg latency:".bold(),
                overview.avg_latency_ms / 1000.0
            );
            println!(
                "  {:<18} {:.2}",
                "Avg quality:".bold(),
                overview.avg_quality_score
            );
            println!("  {:<18} {}", "Tokens:".bold(), overview.total_tokens);
            println!(
                "  {:<18} {}/{} ({:.1}%)",
                "Tasks done:".bold(),
                overview.completed_tasks,
                overview.total_tasks,
                overview.task_completion_rate
            );
        }
        AnalyticsCommand::Costs { days } => {
            let costs = client.analytics_costs(days).await?;
            if json {
                return output::print_json(&costs);
            }
            let mut table = output::new_table(&["Department", "Interactions", "Tokens", "Cost"]);
            for dept in &costs.departments {
                table.add_row(vec![
                    dept.department.clone(),
                    dept.interactions.to_string(),
                    dept.tokens_used.to_string(),
                    format!("${:.4}", dept.estimated_cost_usd),
                ]);
            }
            println!("{table}");
            println!(
                "  Total estimated cost: {}",
                format!("${:.4}", costs.total_estimated_cost_usd).yellow()
            );
        }
        AnalyticsCommand::Activity { days } => {
            let activity = client.analytics_activity(days).await?;
            if json {
                return output::print_json(&activity);
            }
            let mut table =
                output::new_table(&["Day", "Interactions", "Avg Latency", "Quality", "Tokens"]);
            for point in &activity.series {
                table.add_row(vec![
                    point.day.clone(),
                    point.interactions.to_string(),
                    format!("{:.2}s", point.avg_latency_ms / 1000.0),
                    format!("{:.2}", point.avg_quality_score),
                    point.tokens_used.to_string(),
                ]);
            }
            println!("{table}");
            if let Some(peak) = activity.peak_day() {
                println!(
                    "  Peak day: {} ({} interactions)",
                    peak.day, peak.interactions
                );
            }
        }
        AnalyticsCommand::Dashboard => {
            let stats = client.dashboard_stats().await?;
            if json {
                return output::print_json(&stats);
            }
            output::section("Dashboard");
            println!(
                "  {:<18} {}",
                "Hired agents:".bold(),
                stats.hired_agents_count
            );
            println!(
                "  {:<18} {}",
                "Active (1h):".bold(),
                stats.active_agents_count
            );
            println!(
                "  {:<18} {}",
                "Tasks this week:".bold(),
                stats.tasks_this_week
            );
            println!(
                "  {:<18} {}ms",
                "Avg response:".bold(),
                stats.avg_response_time_ms
            );
            match stats.avg_quality_score {
                Some(score) => println!("  {:<18} {:.2}", "Avg quality:".bold(), score),
                None => println!("  {:<18} —", "Avg quality:".bold()),
            }
            if !stats.recent_activities.is_empty() {
                println!();
                println!("  {}", "Recent activity".yellow().bold());
                for item in &stats.recent_activities {
                    println!(
                        "    {} {} — {} ({}ms)",
                        item.timestamp.dimmed(),
                        item.agent_code,
                        output::truncate(&item.task_summary, 50),
                        item.latency_ms
                    );
                }
            }
        }
    }
    Ok(())
}
