use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Tab};
use crate::views;

pub fn render(f: &mut Frame, app: &App) {
    let screen = f.area();

    // The chat modal is full-screen and captures everything while open.
    if let Some(modal) = &app.chat {
        views::chat::render(f, app, modal);
        app.toasts.render(f, screen, app.theme());
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(screen);

    render_tabs(f, app, chunks[0]);

    if app.current_tab.org_scoped() && !app.authenticated {
        render_sign_in_required(f, app, chunks[1]);
    } else {
        match app.current_tab {
            Tab::Dashboard => views::dashboard::render(f, app, chunks[1]),
            Tab::Marketplace => views::marketplace::render(f, app, chunks[1]),
            Tab::Staff => views::staff::render(f, app, chunks[1]),
            Tab::Workflows => views::workflows::render(f, app, chunks[1]),
            Tab::Analytics => views::analytics::render(f, app, chunks[1]),
            Tab::Inbox => views::inbox::render(f, app, chunks[1]),
            Tab::Skills => views::skills::render(f, app, chunks[1]),
            Tab::Academy => views::academy::render(f, app, chunks[1]),
            Tab::Help => views::help::render(f, app, chunks[1]),
        }
    }

    render_status_bar(f, app, chunks[2]);
    app.toasts.render(f, screen, app.theme());
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let titles: Vec<Line> = Tab::all()
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            Line::from(vec![
                Span::styled(format!("{} ", i + 1), Style::default().fg(theme.muted)),
                Span::raw(tab.label()),
            ])
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(Span::styled(
                    " CreddyPens ",
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .select(app.current_tab.index())
        .style(Style::default().fg(theme.fg))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn render_sign_in_required(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "// AUTH REQUIRED",
            Style::default().fg(theme.accent),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Sign in to view this page.",
            Style::default()
                .fg(theme.fg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "No organization is configured on this machine.",
            Style::default().fg(theme.muted),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Run 'creddypens login --email you@company.com' or set CREDDYPENS_ORG_ID.",
            Style::default().fg(theme.warning),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();

    let connection = if app.connected {
        Span::styled("● Connected", Style::default().fg(theme.success))
    } else {
        Span::styled("○ Disconnected", Style::default().fg(theme.error))
    };

    let org = if app.authenticated {
        Span::styled(" │ org active", Style::default().fg(theme.muted))
    } else {
        Span::styled(" │ signed out", Style::default().fg(theme.warning))
    };

    let help_hint = Span::styled(
        " │ q:Quit Tab:Switch Enter:Open r:Refresh t:Theme ?:Help",
        Style::default().fg(theme.muted),
    );

    let status = if let Some(ref msg) = app.status_message {
        Span::styled(format!(" │ {}", msg), Style::default().fg(theme.warning))
    } else if let Some(ref err) = app.last_error {
        Span::styled(
            format!(" │ {}", truncate(err, 48)),
            Style::default().fg(theme.error),
        )
    } else {
        Span::raw("")
    };

    let bar = Paragraph::new(Line::from(vec![connection, org, help_hint, status]))
        .style(Style::default().bg(theme.bg));
    f.render_widget(bar, area);
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
