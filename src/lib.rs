//! Editor log viewer (edlog)
//!
//! TUI application for tailing a growing editor log file, grouping its
//! multi-line entries, filtering them live and scrolling back without losing
//! the tail.
//!
//! The pure core (`model`, `parser`, `state`, `view_state`) never touches
//! the terminal; `source` reads the file and `view` owns the terminal.

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;
