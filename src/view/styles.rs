//! Entry and status bar styling.
//!
//! Severity decides the header colour: errors red, warnings yellow, tagged
//! application output green, everything else the terminal default.

use crate::model::{LogEntry, Severity};
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Whether colors are enabled.
///
/// Colors are disabled when the `NO_COLOR` environment variable is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Read `NO_COLOR` from the environment.
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Explicitly enabled or disabled colors.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== LogStyles =====

/// Styles used to draw the entry list and status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogStyles {
    error: Style,
    warning: Style,
    tagged: Style,
    info: Style,
    /// `[timestamp]` prefix.
    pub timestamp: Style,
    /// Fold markers.
    pub fold: Style,
    /// Body rows.
    pub body: Style,
    /// Tail indicator while following.
    pub following: Style,
    /// Tail indicator while pinned.
    pub pinned: Style,
    /// Transient status messages.
    pub message: Style,
    /// Search prompt cursor.
    pub cursor: Style,
}

impl LogStyles {
    /// Styles honouring `NO_COLOR`.
    pub fn new() -> Self {
        Self::with_color_config(ColorConfig::from_env())
    }

    /// Styles for the given color configuration.
    ///
    /// Without colors every style is plain except the cursor, which stays
    /// reversed so the prompt remains usable.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let cursor = Style::default().add_modifier(Modifier::REVERSED);
        if !config.colors_enabled() {
            return Self {
                error: Style::default(),
                warning: Style::default(),
                tagged: Style::default(),
                info: Style::default(),
                timestamp: Style::default(),
                fold: Style::default(),
                body: Style::default(),
                following: Style::default(),
                pinned: Style::default(),
                message: Style::default(),
                cursor,
            };
        }
        Self {
            error: Style::default().fg(Color::LightRed),
            warning: Style::default().fg(Color::LightYellow),
            tagged: Style::default().fg(Color::LightGreen),
            info: Style::default(),
            timestamp: Style::default().fg(Color::DarkGray),
            fold: Style::default().fg(Color::DarkGray),
            body: Style::default().fg(Color::Gray),
            following: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            pinned: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            message: Style::default().fg(Color::Cyan),
            cursor,
        }
    }

    /// Header style for an entry. Severity wins over the tag.
    pub fn header(&self, entry: &LogEntry) -> Style {
        match entry.severity() {
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info if entry.is_tagged() => self.tagged,
            Severity::Info => self.info,
        }
    }
}

impl Default for LogStyles {
    fn default() -> Self {
        Self::new()
    }
}
