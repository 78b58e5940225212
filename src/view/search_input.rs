//! Search prompt shown in place of the status bar while typing.

use super::styles::LogStyles;
use crate::state::SearchState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Prompt prefix.
const PROMPT: &str = "/";

/// Search input widget.
/// Renders the prompt only in the Typing state.
pub struct SearchInput<'a> {
    search_state: &'a SearchState,
    styles: &'a LogStyles,
}

impl<'a> SearchInput<'a> {
    /// Create new SearchInput widget.
    pub fn new(search_state: &'a SearchState, styles: &'a LogStyles) -> Self {
        Self {
            search_state,
            styles,
        }
    }

    /// Prompt line, or `None` when not typing.
    pub fn line(&self) -> Option<Line<'static>> {
        let SearchState::Typing { query, cursor } = self.search_state else {
            return None;
        };
        let before: String = query.chars().take(*cursor).collect();
        let mut after = query.chars().skip(*cursor);
        let under_cursor = after.next().map_or_else(|| " ".to_string(), String::from);
        let rest: String = after.collect();

        Some(Line::from(vec![
            Span::raw(PROMPT),
            Span::raw(before),
            Span::styled(under_cursor, self.styles.cursor),
            Span::raw(rest),
        ]))
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(line) = self.line() {
            Paragraph::new(line).render(area, buf);
        }
    }
}
