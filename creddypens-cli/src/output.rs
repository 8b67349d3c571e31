//! Shared printing helpers: tables for humans, JSON for scripts.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use serde::Serialize;

pub fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| Cell::new(h.to_uppercase())));
    table
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn section(title: &str) {
    println!("{}", title.cyan().bold());
    println!("{}", "═".repeat(40).dimmed());
}

pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn note(message: &str) {
    println!("  {} {}", "→".blue(), message);
}

pub fn price_cents(cents: i64) -> String {
    format!("${}/mo", cents / 100)
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

pub fn dash_if_empty(s: &str) -> String {
    if s.trim().is_empty() {
        "—".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer sentence", 10), "a longe...");
    }

    #[test]
    fn test_price_cents() {
        assert_eq!(price_cents(4900), "$49/mo");
        assert_eq!(price_cents(0), "$0/mo");
    }

    #[test]
    fn test_dash_if_empty() {
        assert_eq!(dash_if_empty(""), "—");
        assert_eq!(dash_if_empty("  "), "—");
        assert_eq!(dash_if_empty("x"), "x");
    }
}
