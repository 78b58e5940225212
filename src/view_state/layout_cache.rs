//! Per-entry view state, keyed by entry id.
//!
//! Entries themselves carry no view data. Expansion flags and measured row
//! counts live here and are dropped when the entry leaves the store. A
//! height of `None` means "stale, measure before use".

use super::wrap::wrapped_height;
use crate::model::{EntryId, LogEntry};
use crate::state::StoreDelta;
use std::collections::HashMap;

/// Columns reserved left of every entry for the fold marker.
pub const GUTTER_WIDTH: usize = 2;

/// Extra indentation of body rows relative to the header text.
pub const BODY_INDENT: usize = 2;

/// Cached layout of one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntryLayout {
    /// Body shown below the header.
    pub expanded: bool,
    /// Rows taken by the header, if measured.
    pub header_rows: Option<usize>,
    /// Rows taken by header plus visible body, if measured.
    pub total_rows: Option<usize>,
}

impl EntryLayout {
    fn new(expanded: bool) -> Self {
        Self {
            expanded,
            header_rows: None,
            total_rows: None,
        }
    }

    fn invalidate(&mut self) {
        self.header_rows = None;
        self.total_rows = None;
    }

    /// True when both heights are known.
    pub fn is_measured(&self) -> bool {
        self.header_rows.is_some() && self.total_rows.is_some()
    }
}

/// Measured heights for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measured {
    /// Header rows.
    pub header_rows: usize,
    /// Header plus body rows.
    pub total_rows: usize,
}

/// Id-keyed layout cache.
#[derive(Debug, Clone, Default)]
pub struct LayoutCache {
    layouts: HashMap<EntryId, EntryLayout>,
    width: usize,
    expand_all: bool,
    measurements: usize,
}

impl LayoutCache {
    /// Empty cache. New entries start expanded when `expand_all` is set.
    pub fn new(expand_all: bool) -> Self {
        Self {
            expand_all,
            ..Self::default()
        }
    }

    /// Content width entries are measured against.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Set the content width. A change invalidates every height.
    pub fn set_width(&mut self, width: usize) -> bool {
        if width == self.width {
            return false;
        }
        self.width = width;
        self.invalidate_all();
        true
    }

    /// Columns available to header text.
    pub fn text_width(&self) -> usize {
        self.width.saturating_sub(GUTTER_WIDTH).max(1)
    }

    /// Columns available to body text.
    pub fn body_width(&self) -> usize {
        self.text_width().saturating_sub(BODY_INDENT).max(1)
    }

    /// Current expand-all flag.
    pub fn expand_all(&self) -> bool {
        self.expand_all
    }

    /// Expand or collapse every entry and invalidate all heights.
    pub fn set_expand_all(&mut self, expanded: bool) {
        self.expand_all = expanded;
        for layout in self.layouts.values_mut() {
            layout.expanded = expanded;
            layout.invalidate();
        }
    }

    /// Whether the entry's body is shown.
    pub fn is_expanded(&self, id: EntryId) -> bool {
        self.layouts
            .get(&id)
            .map_or(self.expand_all, |layout| layout.expanded)
    }

    /// Flip one entry's expansion. Returns the new state.
    pub fn toggle(&mut self, id: EntryId) -> bool {
        let expand_all = self.expand_all;
        let layout = self
            .layouts
            .entry(id)
            .or_insert_with(|| EntryLayout::new(expand_all));
        layout.expanded = !layout.expanded;
        layout.invalidate();
        layout.expanded
    }

    /// Cached layout, if the entry has been seen.
    pub fn get(&self, id: EntryId) -> Option<&EntryLayout> {
        self.layouts.get(&id)
    }

    /// Mark one entry stale.
    pub fn invalidate(&mut self, id: EntryId) {
        if let Some(layout) = self.layouts.get_mut(&id) {
            layout.invalidate();
        }
    }

    /// Mark every entry stale.
    pub fn invalidate_all(&mut self) {
        for layout in self.layouts.values_mut() {
            layout.invalidate();
        }
    }

    /// Drop an entry's layout.
    pub fn forget(&mut self, id: EntryId) {
        self.layouts.remove(&id);
    }

    /// Follow a store mutation: evicted entries are dropped, grown ones go stale.
    pub fn apply_delta(&mut self, delta: &StoreDelta) {
        for id in &delta.evicted {
            self.forget(*id);
        }
        for id in &delta.grown {
            self.invalidate(*id);
        }
    }

    /// Drop all layouts. The expand-all flag is kept.
    pub fn clear(&mut self) {
        self.layouts.clear();
    }

    /// Heights for `entry`, measuring only if stale.
    pub fn measure(&mut self, entry: &LogEntry) -> Measured {
        let expand_all = self.expand_all;
        let (text_width, body_width) = (self.text_width(), self.body_width());
        let layout = self
            .layouts
            .entry(entry.id())
            .or_insert_with(|| EntryLayout::new(expand_all));

        if let (Some(header_rows), Some(total_rows)) = (layout.header_rows, layout.total_rows) {
            return Measured {
                header_rows,
                total_rows,
            };
        }

        let header_rows = wrapped_height(&entry.display_header(), text_width);
        let body_rows = if layout.expanded && entry.has_body() {
            wrapped_height(entry.body(), body_width)
        } else {
            0
        };
        let total_rows = header_rows + body_rows;
        layout.header_rows = Some(header_rows);
        layout.total_rows = Some(total_rows);
        self.measurements += 1;

        Measured {
            header_rows,
            total_rows,
        }
    }

    /// Number of measurements performed so far.
    pub fn measurement_count(&self) -> usize {
        self.measurements
    }

    /// Number of cached layouts.
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}
