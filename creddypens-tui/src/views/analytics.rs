use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(area);

    let mut overview_lines: Vec<Line> = Vec::new();
    match &app.overview {
        Some(overview) => {
            overview_lines.push(metric(theme, "Interactions", overview.total_interactions.to_string()));
            overview_lines.push(metric(theme, "Active agents", overview.active_agents.to_string()));
            overview_lines.push(metric(
                theme,
                "Avg latency",
                format!("{:.2}s", overview.avg_latency_ms / 1000.0),
            ));
            overview_lines.push(metric(
                theme,
                "Avg quality",
                format!("{:.2}", overview.avg_quality_score),
            ));
            overview_lines.push(metric(theme, "Tokens", overview.total_tokens.to_string()));
            overview_lines.push(metric(
                theme,
                "Task completion",
                format!(
                    "{}/{} ({:.1}%)",
                    overview.completed_tasks, overview.total_tasks, overview.task_completion_rate
                ),
            ));
        }
        None => overview_lines.push(Line::from(Span::styled(
            "No analytics available.",
            Style::default().fg(theme.muted),
        ))),
    }

    f.render_widget(
        Paragraph::new(overview_lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(Span::styled(
                    " Overview — last 30 days ",
                    Style::default().fg(theme.accent),
                )),
        ),
        chunks[0],
    );

    // Cost by department.
    let rows: Vec<Row> = app
        .costs
        .as_ref()
        .map(|c| c.departments.as_slice())
        .unwrap_or_default()
        .iter()
        .map(|dept| {
            Row::new(vec![
                Cell::from(dept.department.clone()),
                Cell::from(dept.interactions.to_string()),
                Cell::from(dept.tokens_used.to_string()),
                Cell::from(Span::styled(
                    format!("${:.4}", dept.estimated_cost_usd),
                    Style::default().fg(theme.warning),
                )),
            ])
        })
        .collect();

    let total = app
        .costs
        .as_ref()
        .map(|c| c.total_estimated_cost_usd)
        .unwrap_or(0.0);

    f.render_widget(
        Table::new(
            rows,
            [
                Constraint::Percentage(40),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
            ],
        )
        .header(
            Row::new(vec!["Department", "Interactions", "Tokens", "Cost"]).style(
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(Span::styled(
                    format!(" Cost by Department — total ${:.4} ", total),
                    Style::default().fg(theme.accent),
                )),
        ),
        chunks[1],
    );
}

fn metric(theme: &crate::theme::Theme, label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<18}", label), Style::default().fg(theme.muted)),
        Span::styled(value, Style::default().fg(theme.fg)),
    ])
}
