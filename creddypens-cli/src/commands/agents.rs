use clap::Subcommand;
use colored::Colorize;
use creddypens_core::ApiClient;

use crate::output;

#[derive(Subcommand)]
pub enum AgentsCommand {
    #[command(about = "List marketplace agents, optionally by department")]
    List {
        #[arg(short, long)]
        department: Option<String>,
    },

    #[command(about = "Show one agent's dossier")]
    Show { code: String },

    #[command(about = "Hire an agent for the organization (dev/mock path)")]
    Hire { code: String },

    #[command(about = "Start a checkout for an agent")]
    Checkout { code: String },

    #[command(about = "List the organization's hired agents with stats")]
    Staff,
}

pub async fn handle_agents_command(
    client: &ApiClient,
    command: AgentsCommand,
    json: bool,
) -> anyhow::Result<()> {
    match command {
        AgentsCommand::List { department } => {
            let agents = client.list_agents(department.as_deref()).await?;
            if json {
                return output::print_json(&agents);
            }
            let mut table = output::new_table(&["Code", "Role", "Department", "Price", "Status"]);
            for agent in &agents {
                table.add_row(vec![
                    agent.code.clone(),
                    agent.role.clone(),
                    agent.department.clone(),
                    output::price_cents(agent.price_cents),
                    agent.status.clone(),
                ]);
            }
            println!("{table}");
            println!("  {} agents", agents.len());
        }
        AgentsCommand::Show { code } => {
            let detail = client.get_agent(&code).await?;
            if json {
                return output::print_json(&detail);
            }
            output::section(&format!("{} — {}", detail.agent.code, detail.agent.role));
            println!("  {:<12} {}", "Department:".bold(), detail.agent.department);
            println!(
                "  {:<12} {}",
                "Price:".bold(),
                output::price_cents(detail.agent.price_cents)
            );
            println!("  {:<12} {}", "Status:".bold(), detail.agent.status);
            if let Some(model) = &detail.agent.llm_model {
                println!("  {:<12} {}", "Model:".bold(), model);
            }
            if !detail.agent.description.is_empty() {
                println!();
                println!("{}", detail.agent.description);
            }
        }
        AgentsCommand::Hire { code } => {
            client.hire_agent(&code).await?;
            output::success(&format!("{} hired", code));
        }
        AgentsCommand::Checkout { code } => {
            let outcome = client.checkout_agent(&code).await?;
            if outcome.needs_redirect() {
                output::note("Complete the subscription in your browser:");
                println!("  {}", outcome.checkout_url.unwrap_or_default().underline());
            } else {
                output::success(&format!("Deployment authorized for {}", code));
            }
        }
        AgentsCommand::Staff => {
            let hired = client.list_hired_agents().await?;
            if json {
                return output::print_json(&hired);
            }
            let mut table = output::new_table(&[
                "Code",
                "Role",
                "Department",
                "Tasks Today",
                "Avg Latency",
                "Quality",
                "Status",
            ]);
            for item in &hired {
                table.add_row(vec![
                    item.agent.agent_code.clone(),
                    item.agent.role.clone(),
                    item.agent.department.clone(),
                    item.stats.tasks_today.to_string(),
                    format!("{}ms", item.stats.avg_latency_ms),
                    format!("{:.2}", item.stats.quality_score),
                    item.status.clone(),
                ]);
            }
            println!("{table}");
            println!("  {} deployed agents", hired.len());
        }
    }
    Ok(())
}
