//! Virtualized frame planning.
//!
//! Every filtered entry contributes its height to the running offset, but
//! only stale entries are measured and only entries intersecting the
//! viewport (or holding focus) are placed for drawing.

use super::layout_cache::LayoutCache;
use super::viewport::Viewport;
use crate::model::{EntryId, LogEntry};

/// One entry positioned in the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Entry id.
    pub id: EntryId,
    /// First content row of the entry.
    pub top: usize,
    /// Total rows, header included.
    pub rows: usize,
    /// Header rows.
    pub header_rows: usize,
    /// Intersects the viewport.
    pub visible: bool,
}

impl Placement {
    /// Row after the last row of this entry.
    pub fn bottom(&self) -> usize {
        self.top + self.rows
    }
}

/// Result of a mouse hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// Entry under the pointer.
    pub id: EntryId,
    /// Pointer is on a header row.
    pub on_header: bool,
}

/// Planned frame: placed entries plus the settled scroll geometry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FramePlan {
    /// Placed entries in display order.
    pub placements: Vec<Placement>,
    /// Content height in rows.
    pub total_rows: usize,
    /// First visible row.
    pub offset: usize,
    /// Visible rows.
    pub height: usize,
    /// Entries in the filtered sequence.
    pub entry_count: usize,
}

impl FramePlan {
    /// Placements that intersect the viewport.
    pub fn visible(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(|p| p.visible)
    }

    /// Placement of a given entry, if placed.
    pub fn placement(&self, id: EntryId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.id == id)
    }

    /// Entry under a viewport-relative row.
    pub fn hit_test(&self, row: usize) -> Option<Hit> {
        if row >= self.height {
            return None;
        }
        let absolute = self.offset + row;
        self.visible()
            .find(|p| (p.top..p.bottom()).contains(&absolute))
            .map(|p| Hit {
                id: p.id,
                on_header: absolute < p.top + p.header_rows,
            })
    }
}

/// Lay out the filtered entries and settle the viewport.
///
/// With `reveal` set, the viewport first scrolls just enough to show the
/// focused entry.
pub fn plan_frame<'a, I>(
    entries: I,
    layouts: &mut LayoutCache,
    viewport: &mut Viewport,
    focus: Option<EntryId>,
    reveal: bool,
) -> FramePlan
where
    I: IntoIterator<Item = &'a LogEntry>,
{
    let mut spans = Vec::new();
    let mut total = 0;
    for entry in entries {
        let measured = layouts.measure(entry);
        spans.push((entry.id(), total, measured));
        total += measured.total_rows;
    }

    if reveal {
        if let Some((_, top, measured)) = spans.iter().find(|(id, _, _)| Some(*id) == focus) {
            viewport.reveal(*top, measured.total_rows);
        }
    }
    viewport.settle(total);

    let offset = viewport.offset().get();
    let bottom = offset + viewport.height();
    let placements = spans
        .iter()
        .filter_map(|&(id, top, measured)| {
            let visible = top + measured.total_rows > offset && top < bottom;
            (visible || Some(id) == focus).then_some(Placement {
                id,
                top,
                rows: measured.total_rows,
                header_rows: measured.header_rows,
                visible,
            })
        })
        .collect();

    FramePlan {
        placements,
        total_rows: total,
        offset,
        height: viewport.height(),
        entry_count: spans.len(),
    }
}
