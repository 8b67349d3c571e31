use clap::Subcommand;
use creddypens_core::models::{MemoryCreate, MEMORY_TYPES};
use creddypens_core::{ApiClient, CreddyError};

use crate::output;

#[derive(Subcommand)]
pub enum MemoriesCommand {
    #[command(about = "List stored organization memories")]
    List,

    #[command(about = "Store a memory")]
    Add {
        /// One of: preference, org_fact, instruction, context
        #[arg(short = 't', long = "type")]
        memory_type: String,

        #[arg(short, long)]
        key: String,

        #[arg(short, long)]
        value: String,

        /// Scope the memory to one agent
        #[arg(short, long)]
        agent: Option<String>,
    },

    #[command(about = "Delete a memory")]
    Delete { memory_id: String },

    #[command(about = "Auto-extract memories from a chat session")]
    Extract {
        #[arg(short, long)]
        session: String,
    },
}

pub async fn handle_memories_command(
    client: &ApiClient,
    command: MemoriesCommand,
    json: bool,
) -> anyhow::Result<()> {
    match command {
        MemoriesCommand::List => {
            let memories = client.list_memories().await?;
            if json {
                return output::print_json(&memories);
            }
            let mut table =
                output::new_table(&["Id", "Type", "Key", "Value", "Agent", "Confidence"]);
            for memory in &memories {
                table.add_row(vec![
                    memory.memory_id.clone(),
                    memory.memory_type.clone(),
                    memory.memory_key.clone(),
                    output::truncate(&memory.memory_value, 40),
                    memory.agent_code.clone().unwrap_or_else(|| "—".to_string()),
                    format!("{:.2}", memory.confidence),
                ]);
            }
            println!("{table}");
        }
        MemoriesCommand::Add {
            memory_type,
            key,
            value,
            agent,
        } => {
            if !MEMORY_TYPES.contains(&memory_type.as_str()) {
                return Err(CreddyError::validation(format!(
                    "Unknown memory type '{}'. Expected one of: {}",
                    memory_type,
                    MEMORY_TYPES.join(", ")
                ))
                .into());
            }
            let mut create = MemoryCreate::new(memory_type, key, value);
            if let Some(agent) = agent {
                create = create.for_agent(agent);
            }
            let memory = client.create_memory(&create).await?;
            output::success(&format!("Memory {} stored", memory.memory_id));
        }
        MemoriesCommand::Delete { memory_id } => {
            client.delete_memory(&memory_id).await?;
            output::success("Memory deleted");
        }
        MemoriesCommand::Extract { session } => {
            let result = client.extract_memories(&session).await?;
            output::success(&format!(
                "Extracted {} new, updated {} memories",
                result.created, result.updated
            ));
        }
    }
    Ok(())
}
