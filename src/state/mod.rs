//! Session state.
//!
//! The entry log with its filtered index, the search prompt, and the
//! [`Session`] controller that drives them from terminal events. Search
//! transitions are pure functions testable without a terminal.

pub mod filter_index;
pub mod log_store;
pub mod search;
pub mod session;

pub use filter_index::{FilterIndex, SearchFilter};
pub use log_store::{LogStore, StoreDelta, DEFAULT_CAPACITY};
pub use search::{SearchQuery, SearchState};
pub use session::{HostEvent, Session, STATUS_TTL_TICKS};
