//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

/// Color palette.
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Reset;
    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;

    pub const HEADER_BG: Color = Color::Blue;
    pub const HEADER_FG: Color = Color::White;

    /// Resizable header cells and the drag indicator.
    pub const GRIP: Color = Color::Cyan;
    pub const STATUS: Color = Color::Yellow;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Title bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Table header row style.
    pub fn table_header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Header cell of a column that can be resized.
    pub fn resizable_header() -> Style {
        Self::table_header().add_modifier(Modifier::UNDERLINED)
    }

    /// Header cell of the column being resized.
    pub fn active_header() -> Style {
        Self::table_header().fg(Theme::GRIP)
    }

    /// Drag indicator line.
    pub fn indicator() -> Style {
        Style::default().fg(Theme::GRIP).add_modifier(Modifier::BOLD)
    }

    /// Footer help text.
    pub fn help() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Status message.
    pub fn status() -> Style {
        Style::default().fg(Theme::STATUS)
    }
}
