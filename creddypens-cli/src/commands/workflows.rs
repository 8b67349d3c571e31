use clap::Subcommand;
use colored::Colorize;
use creddypens_core::models::{OutputFormat, WorkflowScheduleCreate, WorkflowTemplateCreate};
use creddypens_core::{ApiClient, CreddyError, WorkflowDraft};

use crate::output;

#[derive(Subcommand)]
pub enum WorkflowCommand {
    #[command(about = "Run a linear multi-agent pipeline in one call")]
    Run {
        /// The initial task description
        #[arg(short, long)]
        message: String,

        /// Step spec 'AGENT[:instruction]'; repeat in chain order. A '!'
        /// prefix makes the step ignore the previous step's output.
        #[arg(short, long = "step", required = true)]
        steps: Vec<String>,

        /// Output format for the chain
        #[arg(short, long)]
        format: Option<String>,

        #[arg(long)]
        web_search: bool,

        #[arg(long)]
        deep_research: bool,
    },

    #[command(about = "List saved workflow templates")]
    Templates,

    #[command(about = "Save a step list as a reusable template")]
    SaveTemplate {
        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,

        #[arg(short, long = "step", required = true)]
        steps: Vec<String>,
    },

    #[command(about = "List cron schedules and their next run times")]
    Schedules,

    #[command(about = "Attach a cron schedule to a saved template")]
    Schedule {
        /// Template id to schedule
        #[arg(short, long)]
        template: String,

        #[arg(short, long)]
        name: String,

        /// Cron expression, e.g. '0 9 * * 1'
        #[arg(short, long)]
        cron: String,

        #[arg(long, default_value = "UTC")]
        timezone: String,

        /// The message each triggered run starts from
        #[arg(short, long)]
        message: String,
    },

    #[command(about = "Trigger an immediate run of a saved schedule")]
    RunSchedule { schedule_id: String },
}

/// Parse a step spec of the form `AGENT[:instruction]`, with a leading `!`
/// to opt out of consuming the previous step's output.
fn parse_step(spec: &str) -> Result<creddypens_core::models::WorkflowStep, CreddyError> {
    let (fresh, rest) = match spec.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, spec),
    };

    let (code, message) = match rest.split_once(':') {
        Some((code, msg)) => (code.trim(), Some(msg.trim())),
        None => (rest.trim(), None),
    };

    if code.is_empty() {
        return Err(CreddyError::validation(format!("Invalid step spec '{}'", spec)));
    }

    let mut step = creddypens_core::models::WorkflowStep::new(code);
    if let Some(msg) = message.filter(|m| !m.is_empty()) {
        step = step.with_message(msg);
    }
    if fresh {
        step = step.fresh_input();
    }
    Ok(step)
}

fn draft_from_steps(message: &str, specs: &[String]) -> Result<WorkflowDraft, CreddyError> {
    let mut steps = specs.iter().map(|s| parse_step(s));
    let first = steps
        .next()
        .ok_or_else(|| CreddyError::validation("At least one --step is required"))??;

    let mut draft = WorkflowDraft::new(first.agent_code.clone());
    draft.steps[0] = first;
    for step in steps {
        let step = step?;
        draft.steps.push(step);
    }
    draft.initial_message = message.to_string();
    Ok(draft)
}

pub async fn handle_workflow_command(
    client: &ApiClient,
    command: WorkflowCommand,
    json: bool,
) -> anyhow::Result<()> {
    match command {
        WorkflowCommand::Run {
            message,
            steps,
            format,
            web_search,
            deep_research,
        } => {
            let mut draft = draft_from_steps(&message, &steps)?;
            if let Some(format) = format.as_deref() {
                draft.output_format = OutputFormat::parse(format).ok_or_else(|| {
                    CreddyError::validation(format!("Unknown output format '{}'", format))
                })?;
            }
            draft.web_search = web_search;
            draft.deep_research = deep_research;

            let request = draft.to_request()?;
            println!("{}", "Running workflow...".cyan());
            let result = client.execute_workflow(&request).await?;

            if json {
                return output::print_json(&result);
            }

            println!();
            for step in &result.steps {
                println!(
                    "{}",
                    format!(
                        "STEP {} • {} • {}ms • {}",
                        step.step_index, step.agent_code, step.latency_ms, step.model_used
                    )
                    .yellow()
                );
                println!("{}", step.response);
                println!();
            }
            output::section("Final output");
            println!("{}", result.final_response);
        }
        WorkflowCommand::Templates => {
            let templates = client.list_workflow_templates().await?;
            if json {
                return output::print_json(&templates);
            }
            let mut table = output::new_table(&["Id", "Name", "Steps", "Active", "Description"]);
            for template in &templates {
                table.add_row(vec![
                    template.template_id.clone(),
                    template.name.clone(),
                    template.steps.len().to_string(),
                    template.is_active.to_string(),
                    output::truncate(&template.description, 40),
                ]);
            }
            println!("{table}");
        }
        WorkflowCommand::SaveTemplate {
            name,
            description,
            steps,
        } => {
            let mut draft = draft_from_steps("placeholder", &steps)?;
            draft.initial_message.clear();
            let template = client
                .save_workflow_template(&WorkflowTemplateCreate {
                    name: name.trim().to_string(),
                    description,
                    context: Default::default(),
                    steps: draft.steps,
                    is_active: true,
                })
                .await?;
            output::success(&format!(
                "Template '{}' saved as {}",
                template.name, template.template_id
            ));
        }
        WorkflowCommand::Schedules => {
            let schedules = client.list_workflow_schedules().await?;
            if json {
                return output::print_json(&schedules);
            }
            let mut table =
                output::new_table(&["Id", "Name", "Template", "Cron", "Next Run", "Active"]);
            for schedule in &schedules {
                table.add_row(vec![
                    schedule.schedule_id.clone(),
                    schedule.name.clone(),
                    schedule.template_name.clone(),
                    schedule.cron_expression.clone(),
                    schedule
                        .next_run_at
                        .clone()
                        .unwrap_or_else(|| "—".to_string()),
                    schedule.is_active.to_string(),
                ]);
            }
            println!("{table}");
        }
        WorkflowCommand::Schedule {
            template,
            name,
            cron,
            timezone,
            message,
        } => {
            if message.trim().is_empty() {
                return Err(CreddyError::validation(
                    "Schedules need the message each run starts from",
                )
                .into());
            }
            let schedule = client
                .create_workflow_schedule(
                    &template,
                    &WorkflowScheduleCreate {
                        name: name.trim().to_string(),
                        cron_expression: cron.trim().to_string(),
                        timezone,
                        initial_message: message.trim().to_string(),
                        is_active: true,
                    },
                )
                .await?;
            output::success(&format!("Schedule '{}' created", schedule.name));
            if let Some(next) = &schedule.next_run_at {
                output::note(&format!("Next run: {}", next));
            }
        }
        WorkflowCommand::RunSchedule { schedule_id } => {
            println!("{}", "Triggering scheduled workflow...".cyan());
            let run = client.run_workflow_schedule(&schedule_id).await?;
            if json {
                return output::print_json(&run);
            }
            output::section("Final output");
            println!("{}", run.workflow.final_response);
        }
    }
    Ok(())
}
