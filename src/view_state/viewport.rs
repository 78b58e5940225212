//! Auto-tail viewport state machine.
//!
//! ```text
//!             scroll up / page up / top
//!   Following ─────────────────────────▶ Pinned
//!       ▲                                  │
//!       └──────────────────────────────────┘
//!        jump_to_tail, or settle() finds the
//!        bottom edge within `resume_slack` rows
//! ```
//!
//! While Following the offset is forced to the bottom on every settle.
//! Pinning through `toggle_tail` disarms the bottom-edge resume until the
//! user scrolls again.

use super::types::LineOffset;

/// Auto-tail mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TailMode {
    /// Newest output stays in view.
    #[default]
    Following,
    /// The user scrolled away; the offset is left alone.
    Pinned,
}

/// Scroll offset, height and tail mode of the list viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    offset: LineOffset,
    height: usize,
    mode: TailMode,
    resume_slack: usize,
    total: usize,
    hold: bool,
}

impl Viewport {
    /// Following viewport of the given height.
    pub fn new(height: usize, resume_slack: usize) -> Self {
        Self {
            height,
            resume_slack,
            ..Self::default()
        }
    }

    /// First visible row.
    pub fn offset(&self) -> LineOffset {
        self.offset
    }

    /// Visible rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Current mode.
    pub fn mode(&self) -> TailMode {
        self.mode
    }

    /// True while following.
    pub fn is_following(&self) -> bool {
        self.mode == TailMode::Following
    }

    /// Total content rows seen at the last settle.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Change the visible height.
    pub fn set_height(&mut self, height: usize) {
        self.height = height;
    }

    /// Largest offset that still fills the viewport.
    pub fn max_offset(&self, total: usize) -> usize {
        total.saturating_sub(self.height)
    }

    /// Scroll towards older output. Pins the viewport.
    pub fn scroll_up(&mut self, rows: usize) {
        self.pin();
        self.offset = self.offset.saturating_sub(rows);
    }

    /// Scroll towards newer output. Only moves a pinned viewport.
    pub fn scroll_down(&mut self, rows: usize) {
        if self.mode == TailMode::Pinned {
            self.hold = false;
            self.offset = self.offset.saturating_add(rows).clamp_max(self.max_offset(self.total));
        }
    }

    /// Scroll up by one viewport.
    pub fn page_up(&mut self) {
        self.scroll_up(self.height.max(1));
    }

    /// Scroll down by one viewport.
    pub fn page_down(&mut self) {
        self.scroll_down(self.height.max(1));
    }

    /// Jump to the first row. Pins the viewport.
    pub fn scroll_to_top(&mut self) {
        self.pin();
        self.offset = LineOffset::new(0);
    }

    /// Follow again and snap to the bottom.
    pub fn jump_to_tail(&mut self) {
        self.mode = TailMode::Following;
        self.hold = false;
        self.offset = LineOffset::new(self.max_offset(self.total));
    }

    /// Flip between following and pinned. Pinning keeps the current offset
    /// and holds it even at the bottom edge.
    pub fn toggle_tail(&mut self) {
        match self.mode {
            TailMode::Following => {
                self.mode = TailMode::Pinned;
                self.hold = true;
            }
            TailMode::Pinned => self.jump_to_tail(),
        }
    }

    /// Pin without moving. Reaching the bottom resumes following.
    pub fn pin(&mut self) {
        self.mode = TailMode::Pinned;
        self.hold = false;
    }

    /// Scroll just enough to show rows `[top, top + rows)`.
    ///
    /// Returns true if the offset moved. Moving pins the viewport.
    pub fn reveal(&mut self, top: usize, rows: usize) -> bool {
        let offset = self.offset.get();
        let new_offset = if top < offset {
            top
        } else if top + rows > offset + self.height {
            (top + rows).saturating_sub(self.height).min(top)
        } else {
            return false;
        };
        if new_offset == offset {
            return false;
        }
        self.pin();
        self.offset = LineOffset::new(new_offset);
        true
    }

    /// Reconcile with the content height after a layout pass.
    ///
    /// A pinned viewport that reaches the bottom (within the resume slack)
    /// resumes following. The offset is clamped to the content, and while
    /// following it is forced to the bottom.
    pub fn settle(&mut self, total: usize) {
        self.total = total;
        let max = self.max_offset(total);
        if self.mode == TailMode::Pinned
            && !self.hold
            && self.offset.get() + self.height + self.resume_slack >= total
        {
            self.mode = TailMode::Following;
        }
        self.offset = match self.mode {
            TailMode::Following => LineOffset::new(max),
            TailMode::Pinned => self.offset.clamp_max(max),
        };
    }
}
