//! Status bar: tail indicator, entry counts, filter and transient messages.

use super::styles::LogStyles;
use crate::state::Session;
use crate::view_state::TailMode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Tail indicator text while following.
const FOLLOWING_LABEL: &str = "[TAIL] ";
/// Tail indicator text while pinned.
const PINNED_LABEL: &str = "[PINNED] ";

/// Tail mode indicator.
///
/// Pure and stateless: the mode is passed in, the span comes out.
///
/// # Examples
///
/// ```rust
/// use edlog::view::status_bar::TailIndicator;
/// use edlog::view::styles::{ColorConfig, LogStyles};
/// use edlog::view_state::TailMode;
///
/// let styles = LogStyles::with_color_config(ColorConfig::new(false));
/// let span = TailIndicator::new(TailMode::Pinned).render(&styles);
/// assert_eq!(span.content, "[PINNED] ");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TailIndicator {
    mode: TailMode,
}

impl TailIndicator {
    /// Indicator for the given mode.
    pub fn new(mode: TailMode) -> Self {
        Self { mode }
    }

    /// Render the indicator as a ratatui Span.
    pub fn render(&self, styles: &LogStyles) -> Span<'static> {
        match self.mode {
            TailMode::Following => Span::styled(FOLLOWING_LABEL, styles.following),
            TailMode::Pinned => Span::styled(PINNED_LABEL, styles.pinned),
        }
    }
}

/// One-row status bar.
pub struct StatusBar<'a> {
    session: &'a Session,
    styles: &'a LogStyles,
}

impl<'a> StatusBar<'a> {
    /// Status bar for a session.
    pub fn new(session: &'a Session, styles: &'a LogStyles) -> Self {
        Self { session, styles }
    }

    /// The status bar contents.
    pub fn line(&self) -> Line<'static> {
        let store = self.session.store();
        let mut spans = vec![
            TailIndicator::new(self.session.viewport().mode()).render(self.styles),
            Span::raw(format!("{}/{} entries", store.filtered().len(), store.len())),
        ];
        if !store.filter().is_empty() {
            spans.push(Span::raw(format!("  filter: {}", store.filter().text())));
        }
        if let Some(message) = self.session.status() {
            spans.push(Span::styled(format!("  {message}"), self.styles.message));
        }
        Line::from(spans)
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line()).render(area, buf);
    }
}

#[cfg(test)]
#[path = "status_bar_tests.rs"]
mod tests;
