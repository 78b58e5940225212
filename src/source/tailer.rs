//! Incremental tailing of one growing log file.
//!
//! The tailer never watches the file; it is polled on every tick and reads
//! whatever bytes were appended since the last poll. Transient failures
//! (missing file, permission hiccups, races with the writer) are logged and
//! reported as "nothing read" so the next tick simply retries.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Read position plus the unterminated text after the last newline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TailCursor {
    /// Bytes of the file consumed so far.
    pub offset: u64,
    /// Text after the last `\n`, not yet assembled.
    pub leftover: String,
}

/// Polling tailer for a single file path.
#[derive(Debug)]
pub struct FileTailer {
    path: PathBuf,
    cursor: TailCursor,
    /// Trailing bytes of a UTF-8 sequence split across two reads.
    utf8_carry: Vec<u8>,
}

impl FileTailer {
    /// Create a tailer positioned at the start of `path`.
    ///
    /// The file does not need to exist yet.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cursor: TailCursor::default(),
            utf8_carry: Vec::new(),
        }
    }

    /// Tailed path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current cursor.
    pub fn cursor(&self) -> &TailCursor {
        &self.cursor
    }

    /// Bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.cursor.offset
    }

    /// Unterminated text carried from the previous chunk.
    pub fn leftover(&self) -> &str {
        &self.cursor.leftover
    }

    /// Store the leftover produced by assembling the last chunk.
    pub fn set_leftover(&mut self, leftover: String) {
        self.cursor.leftover = leftover;
    }

    /// Read newly appended text.
    ///
    /// Returns `None` when the file is missing, unchanged, or unreadable.
    /// A file shorter than the cursor is treated as rotated and re-read from
    /// the start.
    pub fn poll(&mut self) -> Option<String> {
        match self.try_poll() {
            Ok(chunk) => chunk,
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "Tail poll failed");
                None
            }
        }
    }

    fn try_poll(&mut self) -> io::Result<Option<String>> {
        let Some(mut file) = open_if_exists(&self.path)? else {
            return Ok(None);
        };
        let len = file.metadata()?.len();

        if len < self.cursor.offset {
            info!(
                path = %self.path.display(),
                previous_offset = self.cursor.offset,
                len,
                "Log file shrank, restarting from the beginning"
            );
            self.cursor = TailCursor::default();
            self.utf8_carry.clear();
        }

        if len == self.cursor.offset {
            return Ok(None);
        }

        file.seek(SeekFrom::Start(self.cursor.offset))?;
        let mut bytes = Vec::new();
        file.take(len - self.cursor.offset).read_to_end(&mut bytes)?;
        self.cursor.offset += bytes.len() as u64;

        Ok(self.decode(bytes))
    }

    /// Read at most the last `window` bytes and jump the cursor to the end.
    ///
    /// When the window does not reach the start of the file, the first
    /// (probably partial) line is discarded. Any previous cursor state is
    /// dropped.
    pub fn backfill(&mut self, window: u64) -> Option<String> {
        self.rewind();
        match self.try_backfill(window) {
            Ok(text) => text,
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "Backfill failed");
                None
            }
        }
    }

    fn try_backfill(&mut self, window: u64) -> io::Result<Option<String>> {
        let Some(mut file) = open_if_exists(&self.path)? else {
            return Ok(None);
        };
        let len = file.metadata()?.len();
        let start = len.saturating_sub(window);

        file.seek(SeekFrom::Start(start))?;
        let mut bytes = Vec::new();
        (&mut file).take(len - start).read_to_end(&mut bytes)?;
        self.cursor.offset = start + bytes.len() as u64;

        if start > 0 {
            let cut = bytes
                .iter()
                .position(|&b| b == b'\n')
                .map_or(bytes.len(), |pos| pos + 1);
            bytes.drain(..cut);
        }

        debug!(
            path = %self.path.display(),
            start,
            len,
            kept = bytes.len(),
            "Backfilled log tail"
        );
        Ok(self.decode(bytes))
    }

    /// Skip everything currently in the file.
    ///
    /// Clears the leftover. If the length cannot be read the cursor goes
    /// back to 0.
    pub fn fast_forward(&mut self) {
        let len = match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len(),
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "Fast-forward could not stat file");
                0
            }
        };
        self.cursor = TailCursor {
            offset: len,
            leftover: String::new(),
        };
        self.utf8_carry.clear();
    }

    /// Reset to offset 0 with no leftover.
    pub fn rewind(&mut self) {
        self.cursor = TailCursor::default();
        self.utf8_carry.clear();
    }

    fn decode(&mut self, bytes: Vec<u8>) -> Option<String> {
        let mut buf = std::mem::take(&mut self.utf8_carry);
        buf.extend_from_slice(&bytes);

        let split = incomplete_tail_start(&buf);
        self.utf8_carry = buf.split_off(split);

        if buf.is_empty() {
            return None;
        }
        Some(match String::from_utf8(buf) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        })
    }
}

fn open_if_exists(path: &Path) -> io::Result<Option<File>> {
    match File::open(path) {
        Ok(file) => Ok(Some(file)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Index where an unfinished UTF-8 sequence begins at the end of `buf`,
/// or `buf.len()` when the buffer ends on a character boundary.
fn incomplete_tail_start(buf: &[u8]) -> usize {
    let len = buf.len();
    for back in 1..=len.min(3) {
        let byte = buf[len - back];
        if byte & 0xC0 == 0x80 {
            continue;
        }
        let needed = match byte {
            0xF0..=0xFF => 4,
            0xE0..=0xEF => 3,
            0xC0..=0xDF => 2,
            _ => 1,
        };
        return if needed > back { len - back } else { len };
    }
    len
}
