use std::io;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod event;
mod theme;
mod ui;
mod views;
mod widgets;

use app::{App, ChatModal, Tab};
use creddypens_core::models::TaskStatus;
use creddypens_core::{ApiClient, CreddyConfig};
use event::{AppEvent, EventReader};

#[derive(Parser)]
#[command(name = "creddypens-tui", about = "CreddyPens terminal dashboard")]
struct Args {
    #[arg(short, long, default_value_t = 0)]
    theme: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();

    let args = Args::parse();
    let config = CreddyConfig::load()?;
    let authenticated = config.org_context().is_authenticated();
    let client = Arc::new(ApiClient::new(&config)?);
    let events = EventReader::new(config.tui.tick_rate_ms);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = Arc::new(Mutex::new(App::new(authenticated)));
    if args.theme < theme::THEMES.len() {
        app.lock().await.theme_index = args.theme;
    }

    let refresh_interval = std::time::Duration::from_secs(config.tui.refresh_interval_secs.max(2));
    let mut last_refresh = Instant::now();
    spawn_refresh(Arc::clone(&app), Arc::clone(&client));

    let result = run_loop(
        &mut terminal,
        Arc::clone(&app),
        Arc::clone(&client),
        &events,
        refresh_interval,
        &mut last_refresh,
    )
    .await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn setup_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "creddypens_tui=warn".into()),
        )
        .init();
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
    client: Arc<ApiClient>,
    events: &EventReader,
    refresh_interval: std::time::Duration,
    last_refresh: &mut Instant,
) -> anyhow::Result<()> {
    loop {
        {
            let app_guard = app.lock().await;
            terminal.draw(|f| ui::render(f, &app_guard))?;
            if !app_guard.running {
                break;
            }
        }

        match events.next()? {
            AppEvent::Key(key) => {
                let mut app_guard = app.lock().await;

                if app_guard.chat.is_some() {
                    handle_chat_key(&mut app_guard, key, &client).await;
                    continue;
                }

                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => app_guard.running = false,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app_guard.running = false;
                    }
                    KeyCode::Tab => app_guard.next_tab(),
                    KeyCode::BackTab => app_guard.prev_tab(),
                    KeyCode::Char('j') | KeyCode::Down => app_guard.scroll_down(),
                    KeyCode::Char('k') | KeyCode::Up => app_guard.scroll_up(),
                    KeyCode::Char('t') => app_guard.next_theme(),
                    KeyCode::Char('r') => {
                        drop(app_guard);
                        spawn_refresh(Arc::clone(&app), Arc::clone(&client));
                        *last_refresh = Instant::now();
                    }
                    KeyCode::Char('?') => app_guard.switch_tab(Tab::Help),
                    KeyCode::Char(c) if c.is_ascii_digit() => {
                        if let Some(tab) = Tab::from_key(c) {
                            app_guard.switch_tab(tab);
                            drop(app_guard);
                            spawn_refresh(Arc::clone(&app), Arc::clone(&client));
                            *last_refresh = Instant::now();
                        }
                    }
                    KeyCode::Char('h') if app_guard.current_tab == Tab::Marketplace => {
                        handle_marketplace_hire(&mut app_guard, &client).await;
                    }
                    KeyCode::Enter => {
                        let tab = app_guard.current_tab;
                        let idx = app_guard.selected_index;
                        handle_enter(&mut app_guard, tab, idx, &client).await;
                    }
                    _ => {}
                }
            }
            AppEvent::Tick => {
                let mut app_guard = app.lock().await;
                app_guard.toasts.cleanup();

                // Drain any in-flight chat stream; a terminal event triggers
                // the usage-stats refresh hook.
                let finished = app_guard
                    .chat
                    .as_mut()
                    .map(|modal| modal.drain_stream())
                    .unwrap_or(false);
                drop(app_guard);

                if finished || last_refresh.elapsed() >= refresh_interval {
                    spawn_refresh(Arc::clone(&app), Arc::clone(&client));
                    *last_refresh = Instant::now();
                }
            }
        }
    }

    Ok(())
}

fn spawn_refresh(app: Arc<Mutex<App>>, client: Arc<ApiClient>) {
    tokio::spawn(async move {
        let (tab, authenticated) = {
            let guard = app.lock().await;
            (guard.current_tab, guard.authenticated)
        };
        let result = app::refresh_for_tab(&client, tab, authenticated).await;
        let mut guard = app.lock().await;
        guard.apply_refresh(result);
    });
}

async fn handle_enter(app: &mut App, tab: Tab, idx: usize, client: &ApiClient) {
    match tab {
        Tab::Marketplace => {
            if let Some(agent) = app.agents.get(idx) {
                app.chat = Some(ChatModal::open(&agent.code, &agent.role, &agent.department));
            }
        }
        Tab::Staff => {
            if let Some(hired) = app.staff.get(idx) {
                app.chat = Some(ChatModal::open(
                    &hired.agent.agent_code,
                    &hired.agent.role,
                    &hired.agent.department,
                ));
            }
        }
        Tab::Workflows => {
            if let Some(schedule) = app.schedules.get(idx) {
                let schedule_id = schedule.schedule_id.clone();
                app.workflow_running = true;
                app.workflow_error = None;
                match client.run_workflow_schedule(&schedule_id).await {
                    Ok(run) => {
                        app.workflow_result = Some(run.workflow);
                        app.toasts.success("Scheduled workflow completed");
                    }
                    Err(e) => {
                        app.workflow_error = Some(e.to_string());
                        app.toasts.error(format!("Workflow failed: {}", e));
                    }
                }
                app.workflow_running = false;
            }
        }
        Tab::Inbox => {
            if let Some(task) = app.tasks.get(idx) {
                let next = match task.status {
                    TaskStatus::Pending => TaskStatus::InProgress,
                    TaskStatus::InProgress => TaskStatus::Completed,
                    TaskStatus::Completed => TaskStatus::Pending,
                };
                let task_id = task.task_id.clone();
                match client.set_inbox_task_status(&task_id, next).await {
                    Ok(updated) => {
                        app.toasts
                            .success(format!("Task moved to {}", updated.status));
                        if let Some(slot) = app.tasks.iter_mut().find(|t| t.task_id == task_id) {
                            *slot = updated;
                        }
                    }
                    Err(e) => app.toasts.error(format!("Update failed: {}", e)),
                }
            }
        }
        Tab::Skills => {
            if let Some(skill) = app.skills.get(idx) {
                let skill_id = skill.skill_id.clone();
                match client.install_skill(&skill_id, None).await {
                    Ok(_) => app.toasts.success("Skill installed"),
                    Err(e) => app.toasts.error(format!("Install failed: {}", e)),
                }
            }
        }
        _ => {}
    }
}

async fn handle_marketplace_hire(app: &mut App, client: &ApiClient) {
    let Some(agent) = app.agents.get(app.selected_index) else {
        return;
    };
    let code = agent.code.clone();
    match client.checkout_agent(&code).await {
        Ok(outcome) if outcome.needs_redirect() => {
            app.toasts.info(format!(
                "Finish checkout in your browser: {}",
                outcome.checkout_url.unwrap_or_default()
            ));
        }
        Ok(_) => app
            .toasts
            .success(format!("Deployment authorized for {}", code)),
        Err(e) => app.toasts.error(format!("Checkout failed: {}", e)),
    }
}

/// All input while the chat modal is open. Esc cancels a live stream, or
/// closes the modal when idle; the modal owns every other key.
async fn handle_chat_key(app: &mut App, key: KeyEvent, client: &Arc<ApiClient>) {
    match key.code {
        KeyCode::Esc => {
            let streaming = app.chat.as_ref().is_some_and(|m| m.stream.is_some());
            if streaming {
                if let Some(modal) = app.chat.as_mut() {
                    modal.abandon_stream();
                }
            } else {
                app.chat = None;
            }
            return;
        }
        KeyCode::Enter => {
            if let Some(modal) = app.chat.as_mut() {
                if modal.stream.is_some() {
                    return;
                }
                let input = modal.input.clone();
                if let Some(request) = modal.session.begin_send(&input) {
                    modal.input.clear();
                    let code = modal.session.agent_code().to_string();
                    match client.execute_agent_stream(&code, &request) {
                        Ok(stream) => modal.stream = Some(stream),
                        Err(e) => modal.session.fail(&e.to_string()),
                    }
                }
            }
            return;
        }
        KeyCode::Backspace => {
            if let Some(modal) = app.chat.as_mut() {
                modal.input.pop();
            }
            return;
        }
        _ => {}
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('w') => {
                if let Some(modal) = app.chat.as_mut() {
                    modal.session.web_search = !modal.session.web_search;
                }
            }
            KeyCode::Char('d') => {
                if let Some(modal) = app.chat.as_mut() {
                    modal.session.deep_research = !modal.session.deep_research;
                }
            }
            KeyCode::Char('f') => {
                if let Some(modal) = app.chat.as_mut() {
                    modal.session.output_format = modal.session.output_format.next();
                }
            }
            KeyCode::Char('s') => {
                handle_referral(app, client).await;
            }
            _ => {}
        }
        return;
    }

    if let KeyCode::Char(c) = key.code {
        if let Some(modal) = app.chat.as_mut() {
            modal.input.push(c);
        }
    }
}

/// Act on the most recent referral hint: switch immediately when the
/// colleague is already hired, otherwise checkout first and switch on a
/// mock success (hosted checkout hands the user a URL instead).
async fn handle_referral(app: &mut App, client: &Arc<ApiClient>) {
    let suggested = app
        .chat
        .as_ref()
        .and_then(|m| m.session.pending_referral().cloned());
    let Some(suggested) = suggested else {
        return;
    };

    if suggested.is_hired || app.is_hired(&suggested.code) {
        switch_to_agent(app, &suggested.code);
        return;
    }

    match client.checkout_agent(&suggested.code).await {
        Ok(outcome) if outcome.needs_redirect() => {
            app.toasts.info(format!(
                "Finish checkout in your browser: {}",
                outcome.checkout_url.unwrap_or_default()
            ));
        }
        Ok(_) => {
            app.toasts.success(format!("{} hired", suggested.code));
            switch_to_agent(app, &suggested.code);
        }
        Err(e) => app.toasts.error(format!("Checkout failed: {}", e)),
    }
}

fn switch_to_agent(app: &mut App, code: &str) {
    let (role, department) = app
        .staff
        .iter()
        .find(|h| h.agent.agent_code == code)
        .map(|h| (h.agent.role.clone(), h.agent.department.clone()))
        .or_else(|| {
            app.agents
                .iter()
                .find(|a| a.code == code)
                .map(|a| (a.role.clone(), a.department.clone()))
        })
        .unwrap_or_default();

    if let Some(modal) = app.chat.as_mut() {
        modal.abandon_stream();
        modal.session.switch_agent(code);
        modal.agent_role = role;
        modal.agent_department = department;
        modal.session.push_agent_note(format!(
            "{} reporting for duty. I am ready to assist. What would you like me to work on?",
            code
        ));
    }
}
