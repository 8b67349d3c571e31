use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::ui::truncate;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(8)])
        .split(area);

    let installed: Vec<&str> = app.org_skills.iter().map(|s| s.skill_id.as_str()).collect();

    let rows: Vec<Row> = app
        .skills
        .iter()
        .enumerate()
        .map(|(i, skill)| {
            let style = if i == app.selected_index {
                Style::default().bg(theme.highlight).fg(theme.fg)
            } else {
                Style::default().fg(theme.fg)
            };

            let state = if installed.contains(&skill.skill_id.as_str()) {
                Span::styled("installed", Style::default().fg(theme.success))
            } else {
                Span::styled(
                    format!("${}/mo", skill.price_cents / 100),
                    Style::default().fg(theme.warning),
                )
            };

            Row::new(vec![
                Cell::from(skill.name.clone()),
                Cell::from(skill.category.clone()),
                Cell::from(truncate(&skill.description, 40)),
                Cell::from(skill.install_count.to_string()),
                Cell::from(state),
            ])
            .style(style)
        })
        .collect();

    f.render_widget(
        Table::new(
            rows,
            [
                Constraint::Percentage(22),
                Constraint::Percentage(15),
                Constraint::Percentage(38),
                Constraint::Percentage(10),
                Constraint::Percentage(15),
            ],
        )
        .header(
            Row::new(vec!["Name", "Category", "Description", "Installs", ""]).style(
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
                    format!(" Skills Catalog ({}) ", app.skills.len()),
                    Style::default().fg(theme.accent),
                ))
                .title_bottom(Line::from(Span::styled(
                    " Enter: Install  j/k: Navigate ",
                    Style::default().fg(theme.muted),
                ))),
        ),
        chunks[0],
    );

    let installed_items: Vec<ListItem> = app
        .org_skills
        .iter()
        .map(|skill| {
            ListItem::new(Line::from(vec![
                Span::styled(skill.name.clone(), Style::default().fg(theme.fg)),
                Span::styled(
                    format!(
                        "  {}",
                        skill.agent_code.clone().unwrap_or_else(|| "all agents".into())
                    ),
                    Style::default().fg(theme.muted),
                ),
            ]))
        })
        .collect();

    f.render_widget(
        List::new(installed_items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(Span::styled(
                    format!(" Installed ({}) ", app.org_skills.len()),
                    Style::default().fg(theme.accent),
                )),
        ),
        chunks[1],
    );
}
