use clap::Args;
use creddypens_core::{ApiClient, CreddyConfig};

use crate::output;

#[derive(Args)]
pub struct LoginArgs {
    /// Account email
    #[arg(short, long)]
    pub email: String,

    /// Company name, used when the organization does not exist yet
    #[arg(short, long)]
    pub company: Option<String>,
}

pub async fn handle_login_command(client: &ApiClient, args: LoginArgs) -> anyhow::Result<()> {
    let bootstrap = client
        .auth_bootstrap(&args.email, args.company.as_deref())
        .await?;

    let path = CreddyConfig::save_org_id(&bootstrap.org_id)?;

    if bootstrap.created {
        output::success(&format!("Organization created: {}", bootstrap.org_id));
    } else {
        output::success(&format!("Signed in to {}", bootstrap.org_id));
    }
    output::note(&format!("Saved to {}", path.display()));
    Ok(())
}
