use ratatui::prelude::*;
use ratatui::widgets::*;

use creddypens_core::ChatRole;

use crate::app::{App, ChatModal};
use crate::theme::Theme;

/// Full-screen chat modal: header, transcript (with the live partial while
/// streaming), referral banner, and the input box.
pub fn render(f: &mut Frame, app: &App, modal: &ChatModal) {
    let theme = app.theme();
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(theme.bg)),
        area,
    );

    let has_referral = !modal.session.is_streaming() && modal.session.pending_referral().is_some();
    let referral_height = if has_referral { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(referral_height),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, theme, modal, chunks[0]);
    render_transcript(f, theme, modal, chunks[1]);
    if has_referral {
        render_referral(f, theme, modal, chunks[2]);
    }
    render_input(f, theme, modal, chunks[3]);
    render_footer(f, theme, modal, chunks[4]);
}

fn render_header(f: &mut Frame, theme: &Theme, modal: &ChatModal, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", modal.session.agent_code()),
            Style::default()
                .fg(theme.warning)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(theme.border)),
        Span::styled(modal.agent_role.clone(), Style::default().fg(theme.fg)),
        Span::styled(
            format!("  {}", modal.agent_department),
            Style::default().fg(theme.muted),
        ),
    ]);

    let session = Line::from(Span::styled(
        format!(" session {}", modal.session.session_id()),
        Style::default().fg(theme.muted),
    ));

    f.render_widget(
        Paragraph::new(vec![title, session]).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border)),
        ),
        area,
    );
}

fn render_transcript(f: &mut Frame, theme: &Theme, modal: &ChatModal, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    for message in modal.session.messages() {
        let (prefix, color) = match message.role {
            ChatRole::User => ("you   ", theme.accent),
            ChatRole::Agent => ("agent ", theme.warning),
        };

        let mut first = true;
        for text_line in message.content.lines() {
            let head = if first { prefix } else { "      " };
            lines.push(Line::from(vec![
                Span::styled(head, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::styled(text_line.to_string(), Style::default().fg(theme.fg)),
            ]));
            first = false;
        }
        if message.content.is_empty() {
            lines.push(Line::from(Span::styled(
                prefix,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
        }

        if let Some(metadata) = &message.metadata {
            lines.push(Line::from(Span::styled(
                format!(
                    "      [{}ms • {}{}]",
                    metadata.latency_ms,
                    metadata.model_used,
                    if metadata.tokens_used > 0 {
                        format!(" • {} tokens", metadata.tokens_used)
                    } else {
                        String::new()
                    }
                ),
                Style::default().fg(theme.muted),
            )));
        }
        lines.push(Line::from(""));
    }

    // Live partial transcript with a cursor block while streaming.
    if modal.session.is_streaming() {
        let partial = modal.session.partial();
        if partial.is_empty() {
            lines.push(Line::from(vec![
                Span::styled(
                    "agent ",
                    Style::default()
                        .fg(theme.warning)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("▋", Style::default().fg(theme.warning)),
            ]));
        } else {
            let mut first = true;
            let line_count = partial.lines().count();
            for (i, text_line) in partial.lines().enumerate() {
                let head = if first { "agent " } else { "      " };
                let mut spans = vec![
                    Span::styled(
                        head,
                        Style::default()
                            .fg(theme.warning)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(text_line.to_string(), Style::default().fg(theme.fg)),
                ];
                if i + 1 == line_count {
                    spans.push(Span::styled("▋", Style::default().fg(theme.warning)));
                }
                lines.push(Line::from(spans));
                first = false;
            }
        }
    }

    // Keep the tail in view.
    let height = area.height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(height) as u16;

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.border))
                    .title(Span::styled(
                        " Transcript ",
                        Style::default().fg(theme.accent),
                    )),
            ),
        area,
    );
}

fn render_referral(f: &mut Frame, theme: &Theme, modal: &ChatModal, area: Rect) {
    let Some(suggested) = modal.session.pending_referral() else {
        return;
    };

    let action = if suggested.is_hired {
        "Ctrl+s: switch"
    } else {
        "Ctrl+s: hire & switch"
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" Suggested colleague: {} ", suggested.code),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("— {} ", suggested.reason),
            Style::default().fg(theme.fg),
        ),
        Span::styled(format!("[{}]", action), Style::default().fg(theme.warning)),
    ]);

    f.render_widget(
        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        ),
        area,
    );
}

fn render_input(f: &mut Frame, theme: &Theme, modal: &ChatModal, area: Rect) {
    let streaming = modal.session.is_streaming();

    let title = if streaming {
        Span::styled(
            " Streaming — Esc to cancel ",
            Style::default().fg(theme.warning),
        )
    } else {
        Span::styled(" Give this agent a task ", Style::default().fg(theme.accent))
    };

    let border_color = if streaming { theme.muted } else { theme.border };

    let input_line = Line::from(vec![
        Span::styled("> ", Style::default().fg(theme.accent)),
        Span::styled(modal.input.clone(), Style::default().fg(theme.fg)),
        Span::styled(
            if streaming { "" } else { "▏" },
            Style::default().fg(theme.accent),
        ),
    ]);

    f.render_widget(
        Paragraph::new(input_line).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(title),
        ),
        area,
    );
}

fn render_footer(f: &mut Frame, theme: &Theme, modal: &ChatModal, area: Rect) {
    let flag = |on: bool| if on { "on" } else { "off" };
    let hint = format!(
        " Enter: send │ Esc: cancel/close │ Ctrl+w web:{} │ Ctrl+d deep:{} │ Ctrl+f format:{}",
        flag(modal.session.web_search),
        flag(modal.session.deep_research),
        modal.session.output_format,
    );
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(theme.muted),
        ))),
        area,
    );
}
