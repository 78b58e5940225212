//! Entry list widget.
//!
//! Draws the placements of the last [`FramePlan`](crate::view_state::FramePlan).
//! Rows come from the same wrapping routine the layout cache measures with,
//! so each entry occupies exactly the rows it was planned for.

use super::styles::LogStyles;
use crate::model::LogEntry;
use crate::parser::file_line_suffix;
use crate::state::Session;
use crate::view_state::layout_cache::{BODY_INDENT, GUTTER_WIDTH};
use crate::view_state::wrap::{rendered_chars, wrap_text};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Fold marker of a collapsed entry with a body.
pub const FOLD_CLOSED: &str = "▸ ";
/// Fold marker of an expanded entry.
pub const FOLD_OPEN: &str = "▾ ";

/// Rows of one entry, ready to draw.
///
/// `text_width` and `body_width` must be the widths the layout cache
/// measured with.
pub fn entry_lines(
    entry: &LogEntry,
    expanded: bool,
    focused: bool,
    text_width: usize,
    body_width: usize,
    styles: &LogStyles,
) -> Vec<Line<'static>> {
    let focus = |style: Style| {
        if focused {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    };
    let header_style = focus(styles.header(entry));
    let timestamp_style = focus(styles.timestamp);
    let blank_gutter = " ".repeat(GUTTER_WIDTH);
    let marker = match (entry.has_body(), expanded) {
        (false, _) => blank_gutter.as_str(),
        (true, false) => FOLD_CLOSED,
        (true, true) => FOLD_OPEN,
    };

    // "[" + timestamp + "]", then the header, then a muted source reference
    let stamp_end = entry.timestamp().chars().count() + 2;
    let suffix_start = file_line_suffix(entry.header()).map_or(usize::MAX, |at| {
        stamp_end + 1 + rendered_chars(&entry.header()[..at])
    });
    let segments = [
        (stamp_end, timestamp_style),
        (suffix_start, header_style),
        (usize::MAX, timestamp_style),
    ];

    let mut position = 0;
    let mut lines = Vec::new();
    for (index, row) in wrap_text(&entry.display_header(), text_width)
        .into_iter()
        .enumerate()
    {
        let gutter = if index == 0 { marker } else { blank_gutter.as_str() };
        let mut spans = vec![Span::styled(gutter.to_string(), styles.fold)];

        let mut rest = row.as_str();
        for &(end, style) in &segments {
            let take = end.saturating_sub(position);
            let split = rest.char_indices().nth(take).map_or(rest.len(), |(at, _)| at);
            let (piece, tail) = rest.split_at(split);
            if !piece.is_empty() {
                position += piece.chars().count();
                spans.push(Span::styled(piece.to_string(), style));
            }
            rest = tail;
        }
        lines.push(Line::from(spans));
    }

    if expanded && entry.has_body() {
        let indent = " ".repeat(GUTTER_WIDTH + BODY_INDENT);
        for row in wrap_text(entry.body(), body_width) {
            lines.push(Line::from(vec![
                Span::raw(indent.clone()),
                Span::styled(row, styles.body),
            ]));
        }
    }
    lines
}

/// Virtualized entry list.
pub struct LogList<'a> {
    session: &'a Session,
    styles: &'a LogStyles,
}

impl<'a> LogList<'a> {
    /// List over the session's last plan.
    pub fn new(session: &'a Session, styles: &'a LogStyles) -> Self {
        Self { session, styles }
    }
}

impl Widget for LogList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let plan = self.session.last_plan();
        let layouts = self.session.layouts();
        let height = usize::from(area.height);

        for placement in plan.visible() {
            let Some(entry) = self.session.entry(placement.id) else {
                continue;
            };
            let lines = entry_lines(
                entry,
                layouts.is_expanded(entry.id()),
                self.session.focus() == Some(entry.id()),
                layouts.text_width(),
                layouts.body_width(),
                self.styles,
            );
            for (index, line) in lines.iter().enumerate() {
                let Some(y) = (placement.top + index).checked_sub(plan.offset) else {
                    continue;
                };
                if y >= height {
                    break;
                }
                buf.set_line(area.x, area.y + y as u16, line, area.width);
            }
        }
    }
}

#[cfg(test)]
#[path = "log_list_tests.rs"]
mod tests;
