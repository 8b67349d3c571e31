use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();

    let header = Row::new(vec![
        "Code",
        "Role",
        "Department",
        "Tasks Today",
        "Avg Latency",
        "Quality",
        "Status",
    ])
    .style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )
    .bottom_margin(1);

    let rows: Vec<Row> = app
        .staff
        .iter()
        .enumerate()
        .map(|(i, hired)| {
            let status_color = match hired.status.as_str() {
                "active" => theme.success,
                "paused" => theme.warning,
                _ => theme.muted,
            };

            let style = if i == app.selected_index {
                Style::default().bg(theme.highlight).fg(theme.fg)
            } else {
                Style::default().fg(theme.fg)
            };

            Row::new(vec![
                Cell::from(hired.agent.agent_code.clone()),
                Cell::from(hired.agent.role.clone()),
                Cell::from(hired.agent.department.clone()),
                Cell::from(hired.stats.tasks_today.to_string()),
                Cell::from(format!("{}ms", hired.stats.avg_latency_ms)),
                Cell::from(format!("{:.2}", hired.stats.quality_score)),
                Cell::from(Span::styled(
                    hired.status.clone(),
                    Style::default().fg(status_color),
                )),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(16),
            Constraint::Percentage(24),
            Constraint::Percentage(18),
            Constraint::Percentage(11),
            Constraint::Percentage(11),
            Constraint::Percentage(10),
            Constraint::Percentage(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(Span::styled(
                format!(" My Agents ({}) ", app.staff.len()),
                Style::default().fg(theme.accent),
            ))
            .title_bottom(Line::from(Span::styled(
                " Enter: Chat  j/k: Navigate ",
                Style::default().fg(theme.muted),
            ))),
    );

    f.render_widget(table, area);
}
