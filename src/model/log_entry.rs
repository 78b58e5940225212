//! Assembled log entries.
//!
//! A [`LogEntry`] is one logical message: a header line plus any
//! continuation lines folded into its body. Identity fields are fixed at
//! creation; only the body grows, and only while the entry is the newest
//! one in the store.

use std::fmt;

/// Process-unique entry identifier.
///
/// Assigned in arrival order by the entry log and never reused, even after
/// the entry is evicted or the log is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(u64);

impl EntryId {
    /// Wrap a raw id.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw id value.
    pub fn get(&self) -> u64 {
        self.0
    }

    /// The id assigned after this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Severity derived from the header prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// Anything that is not a warning or an error.
    #[default]
    Info,
    /// Header starts with `Warning`.
    Warning,
    /// Header starts with `Error`.
    Error,
}

impl Severity {
    /// Classify a header (timestamp already stripped).
    ///
    /// # Examples
    ///
    /// ```
    /// # use edlog::model::Severity;
    /// assert_eq!(Severity::from_header("Error: boom"), Severity::Error);
    /// assert_eq!(Severity::from_header("Warning CS0168"), Severity::Warning);
    /// assert_eq!(Severity::from_header("Refreshing assets"), Severity::Info);
    /// ```
    pub fn from_header(header: &str) -> Self {
        if header.starts_with("Error") {
            Severity::Error
        } else if header.starts_with("Warning") {
            Severity::Warning
        } else {
            Severity::Info
        }
    }
}

/// Header data produced by the assembler, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    /// Timestamp token from the line, or local time at assembly.
    pub timestamp: String,
    /// Header text with the timestamp token removed.
    pub header: String,
    /// Severity from the header prefix.
    pub severity: Severity,
    /// Header carries a recognized application tag.
    pub tagged: bool,
}

/// One logical log message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    id: EntryId,
    timestamp: String,
    header: String,
    severity: Severity,
    tagged: bool,
    /// Continuation lines, each followed by `\n`.
    raw_body: String,
}

impl LogEntry {
    /// Create an entry with an empty body.
    pub fn new(id: EntryId, draft: EntryDraft) -> Self {
        Self {
            id,
            timestamp: draft.timestamp,
            header: draft.header,
            severity: draft.severity,
            tagged: draft.tagged,
            raw_body: String::new(),
        }
    }

    /// Entry id.
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Timestamp string (without brackets).
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// First physical line, timestamp stripped.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Severity fixed at creation.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Whether the header carries a recognized application tag.
    pub fn is_tagged(&self) -> bool {
        self.tagged
    }

    /// Continuation lines joined by newlines and trimmed.
    /// Empty for single-line entries.
    pub fn body(&self) -> &str {
        self.raw_body.trim()
    }

    /// True when at least one non-blank continuation line was folded in.
    pub fn has_body(&self) -> bool {
        !self.body().is_empty()
    }

    /// Fold one continuation line into the body.
    pub fn push_body_line(&mut self, line: &str) {
        self.raw_body.push_str(line);
        self.raw_body.push('\n');
    }

    /// Header line as displayed: `[timestamp] header`.
    pub fn display_header(&self) -> String {
        format!("[{}] {}", self.timestamp, self.header)
    }

    /// Copy-out form: `[timestamp] header`, plus `\nbody` when there is one.
    ///
    /// # Examples
    ///
    /// ```
    /// # use edlog::model::{EntryDraft, EntryId, LogEntry, Severity};
    /// let mut entry = LogEntry::new(
    ///     EntryId::new(0),
    ///     EntryDraft {
    ///         timestamp: "10:00:00".into(),
    ///         header: "Error: boom".into(),
    ///         severity: Severity::Error,
    ///         tagged: false,
    ///     },
    /// );
    /// assert_eq!(entry.full_text(), "[10:00:00] Error: boom");
    /// entry.push_body_line("at Foo.Bar()");
    /// assert_eq!(entry.full_text(), "[10:00:00] Error: boom\nat Foo.Bar()");
    /// ```
    pub fn full_text(&self) -> String {
        if self.has_body() {
            format!("[{}] {}\n{}", self.timestamp, self.header, self.body())
        } else {
            self.display_header()
        }
    }
}
