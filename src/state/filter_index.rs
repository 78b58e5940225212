//! Filtered view of the entry log.
//!
//! [`FilterIndex`] holds the ids of retained entries that satisfy the current
//! [`SearchFilter`], in arrival order. It is maintained incrementally as the
//! entry log changes and can always be rebuilt from scratch; both paths must
//! yield the same sequence.

use crate::model::{EntryId, LogEntry};
use std::collections::VecDeque;

/// Case-insensitive substring predicate over `header + " " + body`.
///
/// An empty filter matches every entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    text: String,
    needle: String,
}

impl SearchFilter {
    /// Build a filter from user-entered text.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            needle: text.to_lowercase(),
        }
    }

    /// Text as entered.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True when the filter matches everything.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Test an entry against the filter.
    ///
    /// # Examples
    ///
    /// ```
    /// # use edlog::model::{EntryDraft, EntryId, LogEntry, Severity};
    /// # use edlog::state::SearchFilter;
    /// let mut entry = LogEntry::new(
    ///     EntryId::new(0),
    ///     EntryDraft {
    ///         timestamp: "09:00:00".into(),
    ///         header: "NullReferenceException".into(),
    ///         severity: Severity::Info,
    ///         tagged: false,
    ///     },
    /// );
    /// entry.push_body_line("at Player.Update ()");
    ///
    /// assert!(SearchFilter::new("nullref").matches(&entry));
    /// assert!(SearchFilter::new("PLAYER.update").matches(&entry));
    /// assert!(!SearchFilter::new("enemy").matches(&entry));
    /// ```
    pub fn matches(&self, entry: &LogEntry) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        let mut haystack = String::with_capacity(entry.header().len() + 1 + entry.body().len());
        haystack.push_str(entry.header());
        haystack.push(' ');
        haystack.push_str(entry.body());
        haystack.to_lowercase().contains(&self.needle)
    }
}

/// Ordered ids of matching entries, bounded like the store it mirrors.
#[derive(Debug, Clone)]
pub struct FilterIndex {
    ids: VecDeque<EntryId>,
    capacity: usize,
}

impl FilterIndex {
    /// Create an empty index. A capacity of 0 is promoted to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            ids: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Recompute from the retained entries (oldest first).
    pub fn rebuild<'a, I>(&mut self, entries: I, filter: &SearchFilter)
    where
        I: IntoIterator<Item = &'a LogEntry>,
    {
        self.ids.clear();
        for entry in entries {
            if filter.matches(entry) {
                self.push(entry.id());
            }
        }
    }

    /// A new entry was appended to the log. Returns true if it was indexed.
    pub fn on_append(&mut self, entry: &LogEntry, filter: &SearchFilter) -> bool {
        if filter.matches(entry) {
            self.push(entry.id());
            true
        } else {
            false
        }
    }

    /// The newest entry's body grew. Returns true if it became indexed.
    ///
    /// Matching only ever turns on as the body grows, so an entry already
    /// indexed stays indexed.
    pub fn on_grow(&mut self, entry: &LogEntry, filter: &SearchFilter) -> bool {
        if self.ids.back() == Some(&entry.id()) || !filter.matches(entry) {
            return false;
        }
        self.push(entry.id());
        true
    }

    /// An entry was evicted from the log.
    ///
    /// Evictions happen oldest-first, so the id can only ever be at the front.
    pub fn on_evict(&mut self, id: EntryId) {
        if self.ids.front() == Some(&id) {
            self.ids.pop_front();
        }
    }

    /// Drop every id.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Ids in arrival order.
    pub fn ids(&self) -> std::collections::vec_deque::Iter<'_, EntryId> {
        self.ids.iter()
    }

    /// Id at a position in the filtered sequence.
    pub fn get(&self, position: usize) -> Option<EntryId> {
        self.ids.get(position).copied()
    }

    /// Position of an id in the filtered sequence.
    pub fn position(&self, id: EntryId) -> Option<usize> {
        // Ids are sorted, so binary search applies.
        let (front, back) = self.ids.as_slices();
        match front.binary_search(&id) {
            Ok(pos) => Some(pos),
            Err(_) => back.binary_search(&id).ok().map(|pos| front.len() + pos),
        }
    }

    /// True when `id` is the newest indexed entry.
    pub fn contains_last(&self, id: EntryId) -> bool {
        self.ids.back() == Some(&id)
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when nothing matches.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn push(&mut self, id: EntryId) {
        if self.ids.len() >= self.capacity {
            self.ids.pop_front();
        }
        self.ids.push_back(id);
    }
}
