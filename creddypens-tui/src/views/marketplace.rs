use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();

    let header = Row::new(vec!["Code", "Role", "Department", "Price", "Status"])
        .style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = app
        .agents
        .iter()
        .enumerate()
        .map(|(i, agent)| {
            let style = if i == app.selected_index {
                Style::default().bg(theme.highlight).fg(theme.fg)
            } else {
                Style::default().fg(theme.fg)
            };

            Row::new(vec![
                Cell::from(agent.code.clone()),
                Cell::from(agent.role.clone()),
                Cell::from(agent.department.clone()),
                Cell::from(Span::styled(
                    format!("${}/mo", agent.price_monthly()),
                    Style::default().fg(theme.warning),
                )),
                Cell::from(agent.status.clone()),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(18),
            Constraint::Percentage(30),
            Constraint::Percentage(24),
            Constraint::Percentage(12),
            Constraint::Percentage(16),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(Span::styled(
                format!(" Marketplace ({}) ", app.agents.len()),
                Style::default().fg(theme.accent),
            ))
            .title_bottom(Line::from(Span::styled(
                " Enter: Chat  h: Hire  j/k: Navigate ",
                Style::default().fg(theme.muted),
            ))),
    );

    f.render_widget(table, area);
}
