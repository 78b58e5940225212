//! Log input source.
//!
//! A single polled file tailer. The default target is the Unity editor log
//! under the user's home directory.

use std::path::PathBuf;

pub mod tailer;

pub use tailer::{FileTailer, TailCursor};

/// Bytes read from the end of the file when a session starts.
pub const DEFAULT_BACKFILL_BYTES: u64 = 512_000;

/// Editor log location relative to the home directory.
const EDITOR_LOG_RELATIVE: &str = ".config/unity3d/Editor.log";

/// Default log file to tail (`~/.config/unity3d/Editor.log`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn default_log_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(EDITOR_LOG_RELATIVE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_log_file_points_at_editor_log() {
        if let Some(path) = default_log_file() {
            assert!(path.ends_with(".config/unity3d/Editor.log"));
        }
    }
}
