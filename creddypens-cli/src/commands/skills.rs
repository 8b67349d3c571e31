use clap::Subcommand;
use creddypens_core::ApiClient;

use crate::output;

#[derive(Subcommand)]
pub enum SkillsCommand {
    #[command(about = "Browse the skills catalog")]
    Catalog,

    #[command(about = "List skills installed for the organization")]
    Installed,

    #[command(about = "Install a skill, optionally pinned to one agent")]
    Install {
        skill_id: String,

        #[arg(short, long)]
        agent: Option<String>,
    },

    #[command(about = "Uninstall a skill")]
    Uninstall { skill_id: String },
}

pub async fn handle_skills_command(
    client: &ApiClient,
    command: SkillsCommand,
    json: bool,
) -> anyhow::Result<()> {
    match command {
        SkillsCommand::Catalog => {
            let skills = client.list_skills().await?;
            if json {
                return output::print_json(&skills);
            }
            let mut table =
                output::new_table(&["Id", "Name", "Category", "Price", "Installs", "Agents"]);
            for skill in &skills {
                table.add_row(vec![
                    skill.skill_id.clone(),
                    skill.name.clone(),
                    skill.category.clone(),
                    output::price_cents(skill.price_cents),
                    skill.install_count.to_string(),
                    skill.compatible_agents.join(", "),
                ]);
            }
            println!("{table}");
        }
        SkillsCommand::Installed => {
            let skills = client.list_org_skills().await?;
            if json {
                return output::print_json(&skills);
            }
            let mut table = output::new_table(&["Id", "Name", "Category", "Agent", "Installed"]);
            for skill in &skills {
                table.add_row(vec![
                    skill.skill_id.clone(),
                    skill.name.clone(),
                    skill.category.clone(),
                    skill.agent_code.clone().unwrap_or_else(|| "all".to_string()),
                    skill.installed_at.clone(),
                ]);
            }
            println!("{table}");
        }
        SkillsCommand::Install { skill_id, agent } => {
            let installed = client.install_skill(&skill_id, agent.as_deref()).await?;
            output::success(&format!("Skill {} installed", installed.skill_id));
        }
        SkillsCommand::Uninstall { skill_id } => {
            client.uninstall_skill(&skill_id).await?;
            output::success("Skill uninstalled");
        }
    }
    Ok(())
}
