use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();

    let entries: &[(&str, &str)] = &[
        ("1-9", "Jump to tab"),
        ("Tab / Shift+Tab", "Next / previous tab"),
        ("j/k or ↓/↑", "Move selection"),
        ("Enter", "Open / act on selection"),
        ("h", "Hire selected agent (Marketplace)"),
        ("r", "Refresh current tab"),
        ("t", "Cycle theme"),
        ("q", "Quit"),
        ("", ""),
        ("In chat", ""),
        ("Enter", "Send message"),
        ("Esc", "Cancel stream, then close"),
        ("Ctrl+w", "Toggle web search"),
        ("Ctrl+d", "Toggle deep research"),
        ("Ctrl+f", "Cycle output format"),
        ("Ctrl+s", "Switch to / hire suggested colleague"),
    ];

    let lines: Vec<Line> = entries
        .iter()
        .map(|(key, description)| {
            if description.is_empty() && !key.is_empty() {
                Line::from(Span::styled(
                    format!("  {}", key),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(format!("  {:<18}", key), Style::default().fg(theme.warning)),
                    Span::styled(*description, Style::default().fg(theme.fg)),
                ])
            }
        })
        .collect();

    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(Span::styled(
                    " Keyboard Reference ",
                    Style::default().fg(theme.accent),
                )),
        ),
        area,
    );
}
