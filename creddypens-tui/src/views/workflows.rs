use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::ui::truncate;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(6),
            Constraint::Percentage(45),
        ])
        .split(area);

    // Saved templates.
    let template_items: Vec<ListItem> = app
        .templates
        .iter()
        .map(|template| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<14}", template.template_id),
                    Style::default().fg(theme.muted),
                ),
                Span::styled(template.name.clone(), Style::default().fg(theme.fg)),
                Span::styled(
                    format!("  {} steps", template.steps.len()),
                    Style::default().fg(theme.muted),
                ),
            ]))
        })
        .collect();
    f.render_widget(
        List::new(template_items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(Span::styled(
                    format!(" Templates ({}) ", app.templates.len()),
                    Style::default().fg(theme.accent),
                )),
        ),
        chunks[0],
    );

    // Schedules (selectable; Enter runs one now).
    let schedule_rows: Vec<Row> = app
        .schedules
        .iter()
        .enumerate()
        .map(|(i, schedule)| {
            let style = if i == app.selected_index {
                Style::default().bg(theme.highlight).fg(theme.fg)
            } else {
                Style::default().fg(theme.fg)
            };
            Row::new(vec![
                Cell::from(schedule.name.clone()),
                Cell::from(schedule.template_name.clone()),
                Cell::from(schedule.cron_expression.clone()),
                Cell::from(
                    schedule
                        .next_run_at
                        .clone()
                        .unwrap_or_else(|| "—".to_string()),
                ),
            ])
            .style(style)
        })
        .collect();

    let title = if app.workflow_running {
        " Schedules — RUNNING... "
    } else {
        " Schedules "
    };
    f.render_widget(
        Table::new(
            schedule_rows,
            [
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(20),
                Constraint::Percentage(30),
            ],
        )
        .header(
            Row::new(vec!["Name", "Template", "Cron", "Next Run"]).style(
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(Span::styled(title, Style::default().fg(theme.accent)))
                .title_bottom(Line::from(Span::styled(
                    " Enter: Run Now  (compose pipelines with 'creddypens workflow run') ",
                    Style::default().fg(theme.muted),
                ))),
        ),
        chunks[1],
    );

    // Last run result: the full step trace in index order, then the final
    // output verbatim.
    let mut lines: Vec<Line> = Vec::new();
    if let Some(error) = &app.workflow_error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(theme.error),
        )));
    } else if let Some(result) = &app.workflow_result {
        for step in &result.steps {
            lines.push(Line::from(Span::styled(
                format!(
                    "STEP {} • {} • {}ms • {}",
                    step.step_index, step.agent_code, step.latency_ms, step.model_used
                ),
                Style::default().fg(theme.warning),
            )));
            lines.push(Line::from(Span::styled(
                truncate(&step.response, 200),
                Style::default().fg(theme.fg),
            )));
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            "FINAL OUTPUT",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::raw(result.final_response.clone())));
    } else {
        lines.push(Line::from(Span::styled(
            "No workflow run yet.",
            Style::default().fg(theme.muted),
        )));
    }

    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(Span::styled(" Result ", Style::default().fg(theme.accent))),
        ),
        chunks[2],
    );
}
