//! The entry log: bounded store, id counter and filtered index together.
//!
//! Every mutation of the store goes through [`LogStore`] so the
//! [`FilterIndex`] can follow appends, body growth and evictions without a
//! rebuild.

use super::filter_index::{FilterIndex, SearchFilter};
use crate::model::{EntryDraft, EntryId, LogEntry, RingStore, StoreError};
use crate::parser::Fragment;
use tracing::trace;

/// Default number of retained entries.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Ids touched by one [`LogStore::apply`] call.
///
/// The renderer uses this to keep its layout cache in step with the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreDelta {
    /// Entries created, in order.
    pub appended: Vec<EntryId>,
    /// Entries whose body grew (each id listed once).
    pub grown: Vec<EntryId>,
    /// Entries evicted from the front of the store.
    pub evicted: Vec<EntryId>,
    /// Continuation lines dropped because no entry existed yet.
    pub orphaned: usize,
}

impl StoreDelta {
    /// True when nothing changed.
    pub fn is_empty(&self) -> bool {
        self.appended.is_empty() && self.grown.is_empty() && self.evicted.is_empty()
    }
}

/// Bounded entry log with a consistent filtered view.
#[derive(Debug, Clone)]
pub struct LogStore {
    entries: RingStore<LogEntry>,
    filtered: FilterIndex,
    filter: SearchFilter,
    next_id: EntryId,
}

impl LogStore {
    /// Create an empty log holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RingStore::new(capacity),
            filtered: FilterIndex::new(capacity),
            filter: SearchFilter::default(),
            next_id: EntryId::new(0),
        }
    }

    /// Apply assembled fragments in order.
    pub fn apply(&mut self, fragments: Vec<Fragment>) -> StoreDelta {
        let mut delta = StoreDelta::default();
        for fragment in fragments {
            match fragment {
                Fragment::Header(draft) => {
                    let (id, evicted) = self.push_entry(draft);
                    delta.appended.push(id);
                    delta.evicted.extend(evicted);
                }
                Fragment::Continuation(line) => match self.append_continuation(&line) {
                    Some(id) => {
                        if delta.grown.last() != Some(&id) && !delta.appended.contains(&id) {
                            delta.grown.push(id);
                        }
                    }
                    None => delta.orphaned += 1,
                },
            }
        }
        if !delta.is_empty() {
            trace!(
                appended = delta.appended.len(),
                grown = delta.grown.len(),
                evicted = delta.evicted.len(),
                "Applied fragments"
            );
        }
        delta
    }

    /// Append a new entry. Returns its id and the evicted id, if any.
    pub fn push_entry(&mut self, draft: EntryDraft) -> (EntryId, Option<EntryId>) {
        let id = self.next_id;
        self.next_id = id.next();

        let evicted = self.entries.append(LogEntry::new(id, draft)).map(|old| {
            self.filtered.on_evict(old.id());
            old.id()
        });
        if let Some(entry) = self.entries.last() {
            self.filtered.on_append(entry, &self.filter);
        }
        (id, evicted)
    }

    /// Fold a line into the newest entry. Returns `None` if the log is empty.
    pub fn append_continuation(&mut self, line: &str) -> Option<EntryId> {
        let entry = self.entries.last_mut()?;
        entry.push_body_line(line);
        let entry = &*entry;
        self.filtered.on_grow(entry, &self.filter);
        Some(entry.id())
    }

    /// Look up a retained entry by id in O(1).
    pub fn get(&self, id: EntryId) -> Option<&LogEntry> {
        let front = self.entries.first()?.id();
        let index = id.get().checked_sub(front.get())?;
        let index = usize::try_from(index).ok()?;
        self.entries.get(index).ok().filter(|entry| entry.id() == id)
    }

    /// Entry at a logical store index (0 = oldest).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OutOfRange`] when `index >= len()`.
    pub fn entry_at(&self, index: usize) -> Result<&LogEntry, StoreError> {
        self.entries.get(index)
    }

    /// All retained entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> + Clone {
        self.entries.iter()
    }

    /// Replace the filter and rebuild the index.
    pub fn set_filter(&mut self, filter: SearchFilter) {
        self.filter = filter;
        self.filtered.rebuild(&self.entries, &self.filter);
    }

    /// Active filter.
    pub fn filter(&self) -> &SearchFilter {
        &self.filter
    }

    /// Filtered index.
    pub fn filtered(&self) -> &FilterIndex {
        &self.filtered
    }

    /// Entries passing the filter, in arrival order.
    pub fn visible(&self) -> impl Iterator<Item = &LogEntry> + '_ {
        self.filtered.ids().filter_map(move |id| self.get(*id))
    }

    /// Drop every entry. Ids keep counting from where they were.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.filtered.clear();
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retention limit.
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Id the next entry will receive.
    pub fn next_id(&self) -> EntryId {
        self.next_id
    }
}
