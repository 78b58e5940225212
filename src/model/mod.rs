//! Domain model types (pure).
//!
//! Entries, the bounded ring store that owns them, user actions and the
//! error taxonomy.

pub mod error;
pub mod key_action;
pub mod log_entry;
pub mod ring_store;

pub use error::{AppError, StoreError};
pub use key_action::KeyAction;
pub use log_entry::{EntryDraft, EntryId, LogEntry, Severity};
pub use ring_store::RingStore;
