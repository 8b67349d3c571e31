use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::ui::truncate;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(area);

    // Stat block.
    let stat_cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(chunks[0]);

    let (hired, active, tasks, latency) = match &app.stats {
        Some(stats) => (
            stats.hired_agents_count.to_string(),
            stats.active_agents_count.to_string(),
            stats.tasks_this_week.to_string(),
            format!("{}ms", stats.avg_response_time_ms),
        ),
        None => ("—".into(), "—".into(), "—".into(), "—".into()),
    };

    stat_card(f, theme, stat_cells[0], "HIRED AGENTS", &hired);
    stat_card(f, theme, stat_cells[1], "ACTIVE (1H)", &active);
    stat_card(f, theme, stat_cells[2], "TASKS THIS WEEK", &tasks);
    stat_card(f, theme, stat_cells[3], "AVG RESPONSE", &latency);

    // Recent activity feed.
    let items: Vec<ListItem> = app
        .stats
        .as_ref()
        .map(|s| s.recent_activities.as_slice())
        .unwrap_or_default()
        .iter()
        .map(|item| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<12}", item.agent_code),
                    Style::default().fg(theme.warning),
                ),
                Span::styled(
                    truncate(&item.task_summary, 60),
                    Style::default().fg(theme.fg),
                ),
                Span::styled(
                    format!("  {}ms", item.latency_ms),
                    Style::default().fg(theme.muted),
                ),
            ]))
        })
        .collect();

    let activity = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(Span::styled(
                " Recent Activity ",
                Style::default().fg(theme.accent),
            )),
    );
    f.render_widget(activity, chunks[1]);
}

fn stat_card(f: &mut Frame, theme: &crate::theme::Theme, area: Rect, label: &str, value: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(label, Style::default().fg(theme.muted))),
        Line::from(Span::styled(
            value.to_string(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}
