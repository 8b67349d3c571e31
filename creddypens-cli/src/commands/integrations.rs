use clap::Subcommand;
use creddypens_core::{ApiClient, CreddyError};

use crate::output;

#[derive(Subcommand)]
pub enum IntegrationsCommand {
    #[command(about = "List configured integrations")]
    List,

    #[command(about = "Configure a Slack webhook integration")]
    Slack {
        #[arg(long)]
        webhook_url: String,
    },

    #[command(about = "Configure an outbound webhook integration")]
    Webhook {
        #[arg(long)]
        url: String,
    },

    #[command(about = "Fire a test delivery")]
    Test { integration_id: String },

    #[command(about = "Remove an integration")]
    Delete { integration_id: String },
}

pub async fn handle_integrations_command(
    client: &ApiClient,
    command: IntegrationsCommand,
    json: bool,
) -> anyhow::Result<()> {
    match command {
        IntegrationsCommand::List => {
            let integrations = client.list_integrations().await?;
            if json {
                return output::print_json(&integrations);
            }
            let mut table = output::new_table(&["Id", "Type", "Active"]);
            for item in &integrations {
                table.add_row(vec![
                    item.integration_id.clone(),
                    item.integration_type.clone(),
                    item.is_active.to_string(),
                ]);
            }
            println!("{table}");
        }
        IntegrationsCommand::Slack { webhook_url } => {
            let saved = client
                .save_integration("slack", &serde_json::json!({ "webhook_url": webhook_url }))
                .await?;
            output::success(&format!("Slack integration {} saved", saved.integration_id));
        }
        IntegrationsCommand::Webhook { url } => {
            let saved = client
                .save_integration("webhook", &serde_json::json!({ "url": url }))
                .await?;
            output::success(&format!(
                "Webhook integration {} saved",
                saved.integration_id
            ));
        }
        IntegrationsCommand::Test { integration_id } => {
            let result = client.test_integration(&integration_id).await?;
            if result.ok {
                output::success("Test delivery sent");
            } else {
                return Err(CreddyError::ApiRequest(
                    result
                        .detail
                        .unwrap_or_else(|| "Test delivery failed".to_string()),
                )
                .into());
            }
        }
        IntegrationsCommand::Delete { integration_id } => {
            client.delete_integration(&integration_id).await?;
            output::success("Integration removed");
        }
    }
    Ok(())
}
