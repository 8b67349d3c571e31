use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use creddypens_core::models::{AttachmentRef, OutputFormat};
use creddypens_core::{ApiClient, ChatSession, CreddyConfig, CreddyError, StreamEvent};

use crate::output;

#[derive(Args)]
pub struct ChatArgs {
    /// Agent code, e.g. AUTHOR-01
    pub agent: String,

    /// The task to send
    pub message: String,

    /// Wait for the full response instead of streaming tokens
    #[arg(long)]
    pub no_stream: bool,

    /// Output format: text, markdown, json, email, csv, code, presentation
    #[arg(short, long)]
    pub format: Option<String>,

    /// Let the agent search the web
    #[arg(long)]
    pub web_search: bool,

    /// Enable deep research mode
    #[arg(long)]
    pub deep_research: bool,

    /// Attach a local text file (its excerpt travels with the request)
    #[arg(long = "attach", value_name = "PATH")]
    pub attachments: Vec<PathBuf>,

    /// Reuse an existing session id instead of starting a new session
    #[arg(long)]
    pub session: Option<String>,
}

pub async fn handle_chat_command(
    client: &ApiClient,
    config: &CreddyConfig,
    args: ChatArgs,
    json: bool,
) -> anyhow::Result<()> {
    let mut session = ChatSession::new(&args.agent);

    let format = args
        .format
        .as_deref()
        .or(Some(config.chat.output_format.as_str()))
        .and_then(OutputFormat::parse)
        .unwrap_or_default();
    session.output_format = format;
    session.web_search = args.web_search || config.chat.web_search;
    session.deep_research = args.deep_research || config.chat.deep_research;

    for path in &args.attachments {
        session.attach(read_attachment(path)?);
    }

    let mut request = session
        .begin_send(&args.message)
        .ok_or_else(|| CreddyError::validation("Message must not be empty"))?;
    if let Some(session_id) = args.session {
        request.session_id = session_id;
    }

    if args.no_stream || json {
        let response = client.execute_agent(&args.agent, &request).await?;
        if json {
            return output::print_json(&response);
        }
        print_header(&args.agent, &request.session_id);
        println!("{}", response.response);
        print_metadata(&response.model_used, response.latency_ms, response.tokens_used);
        if let Some(suggested) = &response.suggested_agent {
            print_referral(suggested);
        }
        return Ok(());
    }

    print_header(&args.agent, &request.session_id);
    let mut stream = client.execute_agent_stream(&args.agent, &request)?;

    // Token events carry the cumulative partial; print only what extends
    // the previously shown text so the transcript grows in place.
    let mut shown = String::new();
    while let Some(event) = stream.next_event().await {
        match event {
            StreamEvent::Token { partial } => {
                if let Some(suffix) = partial.strip_prefix(shown.as_str()) {
                    print!("{}", suffix);
                } else {
                    print!("\n{}", partial);
                }
                std::io::stdout().flush().ok();
                shown = partial;
            }
            StreamEvent::Done(done) => {
                // The terminal response is authoritative over token text.
                if done.response != shown {
                    if !shown.is_empty() {
                        println!();
                    }
                    println!("{}", done.response);
                } else {
                    println!();
                }
                print_metadata(&done.model_used, done.latency_ms, done.tokens_used);
                if let Some(suggested) = &done.suggested_agent {
                    print_referral(suggested);
                }
                return Ok(());
            }
            StreamEvent::Error { message } => {
                if !shown.is_empty() {
                    println!();
                }
                return Err(CreddyError::StreamFailed(message).into());
            }
        }
    }

    Err(CreddyError::StreamClosed.into())
}

fn read_attachment(path: &PathBuf) -> anyhow::Result<AttachmentRef> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let metadata = std::fs::metadata(path)?;

    let mime = mime_for(&name);
    if mime.as_deref().is_some_and(|m| m.starts_with("image/")) {
        return Ok(AttachmentRef::image_placeholder(name, mime, metadata.len()));
    }

    let content = std::fs::read_to_string(path)?;
    Ok(AttachmentRef::from_text(name, mime, &content, metadata.len()))
}

fn mime_for(name: &str) -> Option<String> {
    let ext = name.rsplit('.').next()?.to_lowercase();
    let mime = match ext.as_str() {
        "txt" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        _ => return None,
    };
    Some(mime.to_string())
}

fn print_header(agent: &str, session_id: &str) {
    println!(
        "{} {}",
        agent.yellow().bold(),
        format!("({})", session_id).dimmed()
    );
}

fn print_metadata(model: &str, latency_ms: i64, tokens: u64) {
    let mut parts = vec![format!("{}ms", latency_ms)];
    if !model.is_empty() {
        parts.push(model.to_string());
    }
    if tokens > 0 {
        parts.push(format!("{} tokens", tokens));
    }
    println!("{}", format!("  [{}]", parts.join(" • ")).dimmed());
}

fn print_referral(suggested: &creddypens_core::models::SuggestedAgent) {
    println!();
    println!(
        "{} {} ({}) — {}",
        "Suggested colleague:".cyan().bold(),
        suggested.code,
        output::dash_if_empty(suggested.department.as_deref().unwrap_or("")),
        suggested.reason
    );
    if suggested.is_hired {
        println!(
            "  {}",
            format!("creddypens chat {} \"...\"", suggested.code).dimmed()
        );
    } else {
        println!(
            "  {}",
            format!("creddypens agents checkout {}", suggested.code).dimmed()
        );
    }
}
