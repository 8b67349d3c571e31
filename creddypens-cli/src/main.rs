use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use creddypens_core::{ApiClient, CliErrorDisplay, CreddyConfig, CreddyError};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod output;

use commands::{
    handle_academy_command, handle_agents_command, handle_analytics_command, handle_chat_command,
    handle_inbox_command, handle_integrations_command, handle_login_command,
    handle_memories_command, handle_skills_command, handle_workflow_command, AcademyCommand,
    AgentsCommand, AnalyticsCommand, ChatArgs, InboxCommand, IntegrationsCommand, LoginArgs,
    MemoriesCommand, SkillsCommand, WorkflowCommand,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "creddypens")]
#[command(version = VERSION)]
#[command(about = "CreddyPens - hire, chat with, and orchestrate AI staff from your terminal")]
#[command(long_about = r#"
CreddyPens is a marketplace of AI staff agents. This client browses the
catalog, hires agents, chats with them (streaming or single-turn), runs
multi-agent workflows, and manages organization settings.

Use 'creddypens login' to bind this machine to an organization, then
'creddypens agents list' to browse the marketplace and 'creddypens chat'
to put an agent to work.
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit machine-readable JSON instead of tables
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Sign in and bind this machine to an organization")]
    Login(LoginArgs),

    #[command(about = "Browse the marketplace and manage hired agents")]
    Agents {
        #[command(subcommand)]
        action: AgentsCommand,
    },

    #[command(about = "Send a task to an agent (streaming by default)")]
    Chat(ChatArgs),

    #[command(about = "Ask the director which agent fits a need")]
    Director {
        /// What you need done
        message: String,
    },

    #[command(about = "Run and schedule multi-agent workflows")]
    Workflow {
        #[command(subcommand)]
        action: WorkflowCommand,
    },

    #[command(about = "Usage, cost, and activity analytics")]
    Analytics {
        #[command(subcommand)]
        action: AnalyticsCommand,
    },

    #[command(about = "Manage organization memories")]
    Memories {
        #[command(subcommand)]
        action: MemoriesCommand,
    },

    #[command(about = "Manage delivery integrations")]
    Integrations {
        #[command(subcommand)]
        action: IntegrationsCommand,
    },

    #[command(about = "Work the task inbox")]
    Inbox {
        #[command(subcommand)]
        action: InboxCommand,
    },

    #[command(about = "Browse and install skills")]
    Skills {
        #[command(subcommand)]
        action: SkillsCommand,
    },

    #[command(about = "Academy training status and triggers")]
    Academy {
        #[command(subcommand)]
        action: AcademyCommand,
    },

    #[command(about = "Show version information")]
    Version,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<CreddyError>() {
                Some(creddy) => eprintln!(
                    "{}: {}",
                    "Error".red().bold(),
                    CliErrorDisplay::new(creddy)
                ),
                None => eprintln!("{}: {}", "Error".red().bold(), e),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CreddyConfig::load()?;
    let client = ApiClient::new(&config)?;
    let json = cli.json;

    match cli.command {
        Commands::Login(args) => handle_login_command(&client, args).await,
        Commands::Agents { action } => handle_agents_command(&client, action, json).await,
        Commands::Chat(args) => handle_chat_command(&client, &config, args, json).await,
        Commands::Director { message } => commands::handle_director_command(&client, &message, json).await,
        Commands::Workflow { action } => handle_workflow_command(&client, action, json).await,
        Commands::Analytics { action } => handle_analytics_command(&client, action, json).await,
        Commands::Memories { action } => handle_memories_command(&client, action, json).await,
        Commands::Integrations { action } => {
            handle_integrations_command(&client, action, json).await
        }
        Commands::Inbox { action } => handle_inbox_command(&client, action, json).await,
        Commands::Skills { action } => handle_skills_command(&client, action, json).await,
        Commands::Academy { action } => handle_academy_command(&client, action, json).await,
        Commands::Version => {
            println!("creddypens {}", VERSION);
            Ok(())
        }
    }
}
