use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

impl ToastLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastLevel::Info => "ℹ",
            ToastLevel::Success => "✓",
            ToastLevel::Error => "✗",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
            created_at: Instant::now(),
            duration: match level {
                ToastLevel::Error => Duration::from_secs(4),
                _ => Duration::from_secs(3),
            },
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }
}

/// Queue of transient notifications rendered top-right.
#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: Vec<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self { toasts: Vec::new() }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.toasts.push(Toast::new(message, ToastLevel::Info));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.toasts.push(Toast::new(message, ToastLevel::Success));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.toasts.push(Toast::new(message, ToastLevel::Error));
    }

    pub fn cleanup(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn count(&self) -> usize {
        self.toasts.len()
    }

    pub fn render(&self, f: &mut Frame, screen: Rect, theme: &Theme) {
        let width = 44u16.min(screen.width.saturating_sub(4));
        let mut y = 1u16;

        for toast in self.toasts.iter().rev().take(4) {
            if y + 3 > screen.height {
                break;
            }
            let area = Rect::new(screen.width.saturating_sub(width + 2), y, width, 3);

            let color = match toast.level {
                ToastLevel::Info => theme.accent,
                ToastLevel::Success => theme.success,
                ToastLevel::Error => theme.error,
            };

            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(theme.bg));
            let inner = block.inner(area);

            f.render_widget(Clear, area);
            f.render_widget(block, area);

            let mut message = toast.message.clone();
            let budget = (inner.width as usize).saturating_sub(3);
            if message.chars().count() > budget {
                message = message.chars().take(budget.saturating_sub(3)).collect();
                message.push_str("...");
            }

            let content = Line::from(vec![
                Span::styled(
                    format!("{} ", toast.level.icon()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(message, Style::default().fg(theme.fg)),
            ]);
            f.render_widget(Paragraph::new(content), inner);

            y += 4;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expiry() {
        let mut toast = Toast::new("hi", ToastLevel::Info);
        assert!(!toast.is_expired());
        toast.duration = Duration::from_millis(0);
        assert!(toast.is_expired());
    }

    #[test]
    fn test_manager_cleanup() {
        let mut manager = ToastManager::new();
        manager.success("saved");
        assert_eq!(manager.count(), 1);

        manager.toasts[0].duration = Duration::from_millis(0);
        manager.cleanup();
        assert!(manager.is_empty());
    }

    #[test]
    fn test_error_toasts_linger_longer() {
        let info = Toast::new("a", ToastLevel::Info);
        let error = Toast::new("b", ToastLevel::Error);
        assert!(error.duration > info.duration);
    }
}
