use colored::Colorize;
use creddypens_core::ApiClient;

use crate::output;

pub async fn handle_director_command(
    client: &ApiClient,
    message: &str,
    json: bool,
) -> anyhow::Result<()> {
    let response = client.director_recommend(message).await?;
    if json {
        return output::print_json(&response);
    }

    output::section("The Director");
    println!("{}", response.message);

    if response.recommendations.is_empty() {
        return Ok(());
    }

    println!();
    for rec in &response.recommendations {
        println!(
            "  {} {} — {} ({})",
            "●".yellow(),
            rec.agent_code.bold(),
            rec.role,
            rec.department
        );
        println!("    {}", rec.reasoning.dimmed());
        println!("    {}", format!("${}/mo", rec.price_monthly).yellow());
    }
    Ok(())
}
