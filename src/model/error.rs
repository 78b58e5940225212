//! Error types for the edlog application.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - top-level failures (bad config, logging setup, terminal
//!   I/O) and copy export failures
//! - [`StoreError`] - contract violations on the ring store
//!
//! # Recovery Strategy
//!
//! Transient conditions on the tailed file (missing, locked, mid-write,
//! rotated) never surface as errors: the tailer logs them and reports
//! "nothing read" until the next tick. Classification mistakes are a known
//! heuristic limitation, not errors. Only the variants below propagate.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// Returned from startup and from the terminal event loop. All variants but
/// [`AppError::Copy`] end the program; a failed copy is shown in the status
/// bar and the session carries on.
#[derive(Debug, Error)]
pub enum AppError {
    /// A config file exists but could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The tracing subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal or TUI rendering error.
    ///
    /// Raised by crossterm/ratatui. The terminal is restored before the
    /// error is reported.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Writing the copied entries to the export file failed.
    #[error("Failed to write copied entries to {path}: {source}")]
    Copy {
        /// Export file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Contract violation on a [`RingStore`](super::RingStore).
///
/// Distinct from every I/O class: asking for an index outside `[0, len)` is
/// a caller bug, so it is reported to the caller instead of being swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Logical index outside the retained range.
    #[error("index {index} out of range for store of {len} entries")]
    OutOfRange {
        /// Requested logical index.
        index: usize,
        /// Number of retained entries at the time of the request.
        len: usize,
    },
}
