//! Session controller.
//!
//! [`Session`] owns one tailing session: the file cursor, the entry log, the
//! layout cache and the viewport. The terminal shell feeds it [`HostEvent`]s
//! and user commands, and asks it for a [`FramePlan`] before each draw.

use super::filter_index::SearchFilter;
use super::log_store::{LogStore, StoreDelta};
use super::search::{self, SearchQuery, SearchState};
use crate::config::ResolvedConfig;
use crate::model::{AppError, EntryId, LogEntry};
use crate::parser::{assemble, Classifier};
use crate::source::FileTailer;
use crate::view_state::{plan_frame, FramePlan, LayoutCache, Viewport, ViewportDimensions};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Ticks a status message stays visible.
pub const STATUS_TTL_TICKS: u32 = 30;

/// Events raised by the host terminal rather than by a key binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// Periodic poll.
    Tick,
    /// The list area changed size.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
    /// The terminal window lost input focus.
    FocusLost,
    /// The terminal window regained input focus.
    FocusGained,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StatusMessage {
    text: String,
    ticks_left: u32,
}

/// One tailing session and its view state.
#[derive(Debug)]
pub struct Session {
    tailer: FileTailer,
    classifier: Classifier,
    store: LogStore,
    layouts: LayoutCache,
    viewport: Viewport,
    search: SearchState,
    focus: Option<EntryId>,
    reveal_focus: bool,
    window_focused: bool,
    backfill_bytes: u64,
    copy_path: PathBuf,
    status: Option<StatusMessage>,
    plan: FramePlan,
}

impl Session {
    /// Session over the configured file. Nothing is read until [`start`](Self::start).
    pub fn new(config: &ResolvedConfig) -> Self {
        Self {
            tailer: FileTailer::new(&config.file),
            classifier: Classifier::new(config.classifier()),
            store: LogStore::new(config.capacity),
            layouts: LayoutCache::new(config.expand_all),
            viewport: Viewport::new(0, config.resume_slack),
            search: SearchState::Inactive,
            focus: None,
            reveal_focus: false,
            window_focused: true,
            backfill_bytes: config.backfill_bytes,
            copy_path: config.copy_file_path.clone(),
            status: None,
            plan: FramePlan::default(),
        }
    }

    /// Load the tail of the file.
    pub fn start(&mut self) {
        let delta = match self.tailer.backfill(self.backfill_bytes) {
            Some(chunk) => self.ingest(&chunk),
            None => StoreDelta::default(),
        };
        info!(
            path = %self.tailer.path().display(),
            entries = delta.appended.len(),
            offset = self.tailer.offset(),
            "Session started"
        );
    }

    /// Poll the file and age the status message. Returns true if a redraw is due.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;
        if let Some(chunk) = self.tailer.poll() {
            changed = !self.ingest(&chunk).is_empty();
        }
        if let Some(status) = &mut self.status {
            status.ticks_left = status.ticks_left.saturating_sub(1);
            if status.ticks_left == 0 {
                self.status = None;
                changed = true;
            }
        }
        changed
    }

    /// Assemble a raw chunk against the carried partial line and apply it.
    pub fn ingest(&mut self, chunk: &str) -> StoreDelta {
        let assembled = assemble(chunk, self.tailer.leftover(), &self.classifier);
        self.tailer.set_leftover(assembled.leftover);

        let delta = self.store.apply(assembled.fragments);
        if delta.orphaned > 0 {
            debug!(lines = delta.orphaned, "Dropped continuation lines with no entry");
        }
        self.layouts.apply_delta(&delta);
        if self.focus.is_some_and(|id| delta.evicted.contains(&id)) {
            self.focus = None;
        }
        delta
    }

    /// React to a host event. Returns true if a redraw is due.
    pub fn handle_host_event(&mut self, event: HostEvent) -> bool {
        match event {
            HostEvent::Tick => self.tick(),
            HostEvent::Resize { width, height } => {
                self.layouts.set_width(usize::from(width));
                self.viewport.set_height(usize::from(height));
                true
            }
            HostEvent::FocusLost => {
                self.window_focused = false;
                self.focus = None;
                true
            }
            HostEvent::FocusGained => {
                self.window_focused = true;
                true
            }
        }
    }

    // ===== Commands =====

    /// Drop every entry and skip what the file already holds.
    pub fn clear(&mut self) {
        self.store.clear();
        self.layouts.clear();
        self.tailer.fast_forward();
        self.focus = None;
        self.viewport.jump_to_tail();
        info!(offset = self.tailer.offset(), "Cleared entries");
        self.set_status("Cleared");
    }

    /// Expand or collapse every entry.
    pub fn set_expand_all(&mut self, expanded: bool) {
        self.layouts.set_expand_all(expanded);
    }

    /// Flip the expand-all flag.
    pub fn toggle_expand_all(&mut self) {
        self.set_expand_all(!self.layouts.expand_all());
    }

    /// Replace the filter text and rebuild the filtered view.
    pub fn set_search_text(&mut self, text: &str) {
        if self.store.filter().text() == text {
            return;
        }
        self.store.set_filter(SearchFilter::new(text));
        if let Some(id) = self.focus {
            if self.store.filtered().position(id).is_none() {
                self.focus = None;
            }
        }
        debug!(query = text, shown = self.store.filtered().len(), "Filter changed");
    }

    /// Start with a confirmed query, as if typed and submitted.
    pub fn set_search_query(&mut self, text: &str) {
        self.search = match SearchQuery::new(text) {
            Some(query) => SearchState::Active { query },
            None => SearchState::Inactive,
        };
        self.sync_filter();
    }

    /// Filtered entries as text, each followed by a newline.
    pub fn copy_all_visible(&self) -> String {
        self.store
            .visible()
            .map(|entry| {
                let mut text = entry.full_text();
                text.push('\n');
                text
            })
            .collect()
    }

    /// Write [`copy_all_visible`](Self::copy_all_visible) to `path`.
    /// Returns the number of entries written.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Copy`] if the directory or file cannot be written.
    pub fn write_copy(&self, path: &Path) -> Result<usize, AppError> {
        let copy_error = |source| AppError::Copy {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(copy_error)?;
        }
        fs::write(path, self.copy_all_visible()).map_err(copy_error)?;
        Ok(self.store.filtered().len())
    }

    /// Copy to the configured file and report the outcome in the status bar.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Copy`] when the write fails.
    pub fn copy_visible(&mut self) -> Result<usize, AppError> {
        let path = self.copy_path.clone();
        match self.write_copy(&path) {
            Ok(count) => {
                info!(count, path = %path.display(), "Copied entries");
                self.set_status(format!("Copied {count} entries to {}", path.display()));
                Ok(count)
            }
            Err(err) => {
                self.set_status(err.to_string());
                Err(err)
            }
        }
    }

    /// Snap to the newest entry and follow.
    pub fn jump_to_tail(&mut self) {
        self.viewport.jump_to_tail();
    }

    /// Flip between following and pinned.
    pub fn toggle_tail(&mut self) {
        self.viewport.toggle_tail();
    }

    /// Flip one entry's expansion. Returns the new state.
    pub fn toggle_expanded(&mut self, id: EntryId) -> bool {
        self.layouts.toggle(id)
    }

    /// Flip the focused entry's expansion.
    pub fn toggle_focused(&mut self) {
        if let Some(id) = self.focus {
            self.toggle_expanded(id);
            self.reveal_focus = true;
        }
    }

    /// Move focus to the next filtered entry.
    ///
    /// Without focus, the first entry on screen is picked.
    pub fn focus_next(&mut self) {
        let filtered = self.store.filtered();
        let next = match self.focus.and_then(|id| filtered.position(id)) {
            Some(pos) => filtered.get(pos + 1).or(self.focus),
            None => self.plan.visible().next().map(|p| p.id).or_else(|| filtered.get(0)),
        };
        self.set_focus(next);
    }

    /// Move focus to the previous filtered entry.
    ///
    /// Without focus, the last entry on screen is picked.
    pub fn focus_prev(&mut self) {
        let filtered = self.store.filtered();
        let prev = match self.focus.and_then(|id| filtered.position(id)) {
            Some(pos) => pos.checked_sub(1).and_then(|p| filtered.get(p)).or(self.focus),
            None => self
                .plan
                .visible()
                .last()
                .map(|p| p.id)
                .or_else(|| filtered.len().checked_sub(1).and_then(|p| filtered.get(p))),
        };
        self.set_focus(prev);
    }

    fn set_focus(&mut self, id: Option<EntryId>) {
        self.focus = id;
        self.reveal_focus = id.is_some();
    }

    /// Scroll towards older output.
    pub fn scroll_up(&mut self, rows: usize) {
        self.viewport.scroll_up(rows);
    }

    /// Scroll towards newer output.
    pub fn scroll_down(&mut self, rows: usize) {
        self.viewport.scroll_down(rows);
    }

    /// Scroll up one page.
    pub fn page_up(&mut self) {
        self.viewport.page_up();
    }

    /// Scroll down one page.
    pub fn page_down(&mut self) {
        self.viewport.page_down();
    }

    /// Jump to the oldest entry.
    pub fn scroll_to_top(&mut self) {
        self.viewport.scroll_to_top();
    }

    /// Mouse wheel up: scroll and drop focus.
    pub fn wheel_up(&mut self, rows: usize) {
        self.focus = None;
        self.viewport.scroll_up(rows);
    }

    /// Mouse wheel down: scroll and drop focus.
    pub fn wheel_down(&mut self, rows: usize) {
        self.focus = None;
        self.viewport.scroll_down(rows);
    }

    /// Click at a row of the list area. A header click focuses and toggles
    /// the entry; a body click only focuses it. Returns true on a hit.
    pub fn click(&mut self, row: usize) -> bool {
        let Some(hit) = self.plan.hit_test(row) else {
            return false;
        };
        self.focus = Some(hit.id);
        if hit.on_header {
            self.toggle_expanded(hit.id);
        }
        true
    }

    // ===== Search editing =====

    /// Open the search prompt.
    pub fn start_search(&mut self) {
        self.update_search(search::activate);
    }

    /// Type a character into the prompt.
    pub fn search_insert(&mut self, ch: char) {
        self.update_search(|state| search::insert_char(state, ch));
    }

    /// Delete before the prompt cursor.
    pub fn search_backspace(&mut self) {
        self.update_search(search::backspace);
    }

    /// Move the prompt cursor left.
    pub fn search_cursor_left(&mut self) {
        self.update_search(search::cursor_left);
    }

    /// Move the prompt cursor right.
    pub fn search_cursor_right(&mut self) {
        self.update_search(search::cursor_right);
    }

    /// Keep the typed query.
    pub fn search_submit(&mut self) {
        self.update_search(search::submit);
    }

    /// Drop the query and show everything.
    pub fn search_cancel(&mut self) {
        self.update_search(search::cancel);
    }

    fn update_search(&mut self, transition: impl FnOnce(SearchState) -> SearchState) {
        let state = std::mem::take(&mut self.search);
        self.search = transition(state);
        self.sync_filter();
    }

    fn sync_filter(&mut self) {
        let text = self.search.filter_text().to_string();
        self.set_search_text(&text);
    }

    // ===== Frame =====

    /// Lay out the list for an area of the given size.
    pub fn plan(&mut self, area: ViewportDimensions) -> &FramePlan {
        self.layouts.set_width(usize::from(area.width));
        self.viewport.set_height(usize::from(area.height));
        let reveal = std::mem::take(&mut self.reveal_focus);
        self.plan = plan_frame(
            self.store.visible(),
            &mut self.layouts,
            &mut self.viewport,
            self.focus,
            reveal,
        );
        &self.plan
    }

    /// Plan from the last [`plan`](Self::plan) call.
    pub fn last_plan(&self) -> &FramePlan {
        &self.plan
    }

    // ===== Accessors =====

    /// Show a message in the status bar for a while.
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            ticks_left: STATUS_TTL_TICKS,
        });
    }

    /// Current status message.
    pub fn status(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.text.as_str())
    }

    /// Entry log.
    pub fn store(&self) -> &LogStore {
        &self.store
    }

    /// Entry by id.
    pub fn entry(&self, id: EntryId) -> Option<&LogEntry> {
        self.store.get(id)
    }

    /// Layout cache.
    pub fn layouts(&self) -> &LayoutCache {
        &self.layouts
    }

    /// Viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Search prompt state.
    pub fn search(&self) -> &SearchState {
        &self.search
    }

    /// Focused entry.
    pub fn focus(&self) -> Option<EntryId> {
        self.focus
    }

    /// Whether the terminal window has input focus.
    pub fn is_window_focused(&self) -> bool {
        self.window_focused
    }

    /// Tailer.
    pub fn tailer(&self) -> &FileTailer {
        &self.tailer
    }

    /// Copy export path.
    pub fn copy_path(&self) -> &Path {
        &self.copy_path
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
