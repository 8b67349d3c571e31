use ratatui::style::Color;

/// A named color palette. The default mirrors the marketplace's cyan/amber
/// scheme.
pub struct Theme {
    pub name: &'static str,
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub highlight: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

pub const THEMES: &[Theme] = &[
    Theme {
        name: "Command",
        bg: Color::Rgb(10, 15, 20),
        fg: Color::Rgb(230, 237, 243),
        muted: Color::Rgb(110, 130, 150),
        border: Color::Rgb(0, 120, 128),
        accent: Color::Rgb(0, 240, 255),
        highlight: Color::Rgb(30, 45, 60),
        success: Color::Rgb(0, 255, 136),
        warning: Color::Rgb(255, 184, 0),
        error: Color::Rgb(255, 107, 107),
    },
    Theme {
        name: "Slate",
        bg: Color::Rgb(24, 24, 28),
        fg: Color::Rgb(220, 220, 220),
        muted: Color::DarkGray,
        border: Color::Gray,
        accent: Color::Cyan,
        highlight: Color::Rgb(50, 50, 60),
        success: Color::Green,
        warning: Color::Yellow,
        error: Color::Red,
    },
];
