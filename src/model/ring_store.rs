//! Fixed-capacity ring buffer with oldest-first eviction.

use super::error::StoreError;
use std::collections::VecDeque;

/// Bounded FIFO store.
///
/// Holds at most `capacity` items in arrival order. Appending to a full
/// store evicts the oldest item and hands it back to the caller so derived
/// indexes can follow the eviction.
///
/// Logical index 0 always refers to the oldest retained item. Indices are
/// stable only until the next eviction.
#[derive(Debug, Clone)]
pub struct RingStore<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> RingStore<T> {
    /// Create an empty store. A capacity of 0 is promoted to 1.
    ///
    /// # Examples
    ///
    /// ```
    /// # use edlog::model::RingStore;
    /// let store: RingStore<u32> = RingStore::new(3);
    /// assert_eq!(store.capacity(), 3);
    /// assert!(store.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an item, evicting and returning the oldest one when full.
    ///
    /// # Examples
    ///
    /// ```
    /// # use edlog::model::RingStore;
    /// let mut store = RingStore::new(2);
    /// assert_eq!(store.append(1), None);
    /// assert_eq!(store.append(2), None);
    /// assert_eq!(store.append(3), Some(1));
    /// assert_eq!(store.get(0).copied(), Ok(2));
    /// ```
    pub fn append(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() >= self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    /// Item at logical index (0 = oldest).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OutOfRange`] when `index >= len()`.
    pub fn get(&self, index: usize) -> Result<&T, StoreError> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(StoreError::OutOfRange { index, len })
    }

    /// Mutable item at logical index (0 = oldest).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OutOfRange`] when `index >= len()`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, StoreError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(StoreError::OutOfRange { index, len })
    }

    /// Oldest retained item.
    pub fn first(&self) -> Option<&T> {
        self.items.front()
    }

    /// Newest item.
    pub fn last(&self) -> Option<&T> {
        self.items.back()
    }

    /// Newest item, mutably.
    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.items.back_mut()
    }

    /// Drop every item. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterate oldest to newest. The iterator is `Clone`, so it can be restarted.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.items.iter()
    }

    /// Number of retained items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when nothing is retained.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when the next append will evict.
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Maximum number of retained items.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<'a, T> IntoIterator for &'a RingStore<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
