use ratatui::prelude::*;
use ratatui::widgets::*;

use creddypens_core::models::TaskStatus;

use crate::app::App;
use crate::ui::truncate;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();

    let header = Row::new(vec!["Priority", "Title", "Status", "Assigned", "Agent"])
        .style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = app
        .tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let status_color = match task.status {
                TaskStatus::Pending => theme.warning,
                TaskStatus::InProgress => theme.accent,
                TaskStatus::Completed => theme.success,
            };

            let style = if i == app.selected_index {
                Style::default().bg(theme.highlight).fg(theme.fg)
            } else {
                Style::default().fg(theme.fg)
            };

            Row::new(vec![
                Cell::from(task.priority.to_string()),
                Cell::from(truncate(&task.task_title, 48)),
                Cell::from(Span::styled(
                    task.status.label(),
                    Style::default().fg(status_color),
                )),
                Cell::from(task.assigned_to.clone().unwrap_or_else(|| "—".to_string())),
                Cell::from(task.agent_code.clone().unwrap_or_default()),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(10),
            Constraint::Percentage(40),
            Constraint::Percentage(16),
            Constraint::Percentage(17),
            Constraint::Percentage(17),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(Span::styled(
                format!(" Inbox ({}) ", app.tasks.len()),
                Style::default().fg(theme.accent),
            ))
            .title_bottom(Line::from(Span::styled(
                " Enter: Advance Status  j/k: Navigate ",
                Style::default().fg(theme.muted),
            ))),
    );

    f.render_widget(table, area);
}
