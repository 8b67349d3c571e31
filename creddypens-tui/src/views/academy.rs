use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(area);

    let mut lines: Vec<Line> = Vec::new();
    match &app.academy {
        Some(status) => {
            lines.push(Line::from(vec![
                Span::styled("  In training:    ", Style::default().fg(theme.muted)),
                Span::styled(
                    status.agents_in_training.to_string(),
                    Style::default().fg(theme.fg),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  Avg quality:    ", Style::default().fg(theme.muted)),
                Span::styled(
                    format!("{:.2} ({})", status.avg_quality_score, status.quality_trend),
                    Style::default().fg(theme.fg),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  Next cycle in:  ", Style::default().fg(theme.muted)),
                Span::styled(
                    format!("{:.1}h", status.next_cycle_hours),
                    Style::default().fg(theme.fg),
                ),
            ]));
        }
        None => lines.push(Line::from(Span::styled(
            "No academy data yet.",
            Style::default().fg(theme.muted),
        ))),
    }

    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(Span::styled(" Academy ", Style::default().fg(theme.accent))),
        ),
        chunks[0],
    );

    let session_items: Vec<ListItem> = app
        .academy
        .as_ref()
        .map(|s| s.recent_sessions.as_slice())
        .unwrap_or_default()
        .iter()
        .map(|session| {
            let (mark, color) = if session.passed {
                ("✓", theme.success)
            } else {
                ("✗", theme.error)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", mark), Style::default().fg(color)),
                Span::styled(
                    format!("{:<14}", session.agent_code),
                    Style::default().fg(theme.fg),
                ),
                Span::styled(
                    format!("scored {:.2}", session.score),
                    Style::default().fg(theme.warning),
                ),
                Span::styled(
                    format!("  {}", session.completed_at),
                    Style::default().fg(theme.muted),
                ),
            ]))
        })
        .collect();

    f.render_widget(
        List::new(session_items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(Span::styled(
                    " Recent Training Sessions ",
                    Style::default().fg(theme.accent),
                )),
        ),
        chunks[1],
    );
}
