//! Entry assembly from raw text chunks.
//!
//! [`assemble`] is pure: it turns `leftover + chunk` into an ordered list of
//! [`Fragment`]s plus the new unterminated leftover. Applying the fragments
//! to the entry log is the caller's job (see `state::log_store`).

pub mod classify;

pub use classify::{
    Classification, Classifier, ClassifierConfig, LineKind, Rule, DEFAULT_DEBUG_API_MARKER,
    DEFAULT_TAG,
};

use crate::model::{EntryDraft, Severity};
use chrono::Local;
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Local wall-clock format used when a header carries no timestamp token.
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S%.3f";

static ANSI_RE: OnceLock<Regex> = OnceLock::new();

fn ansi_regex() -> &'static Regex {
    ANSI_RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ansi regex"))
}

static FILE_LINE_RE: OnceLock<Regex> = OnceLock::new();

/// Byte index where a trailing ` (at ...)` or ` (Filename: ...)` source
/// reference starts in `header`, if there is one.
///
/// # Examples
///
/// ```
/// # use edlog::parser::file_line_suffix;
/// let header = "Shader warning (Filename: Assets/A.shader Line: 3)";
/// assert_eq!(file_line_suffix(header), Some(14));
/// assert_eq!(file_line_suffix("Compiling scripts"), None);
/// ```
pub fn file_line_suffix(header: &str) -> Option<usize> {
    FILE_LINE_RE
        .get_or_init(|| {
            Regex::new(r" \((at |Filename: ).*?\) *$").expect("valid file-line regex")
        })
        .find(header)
        .map(|m| m.start())
}

/// One unit of assembly output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// A line that opens a new entry.
    Header(EntryDraft),
    /// A line folded into the body of the newest entry.
    Continuation(String),
}

/// Result of assembling one chunk.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assembled {
    /// Fragments in input order.
    pub fragments: Vec<Fragment>,
    /// Text after the last newline, carried into the next call.
    pub leftover: String,
}

/// Split `leftover + chunk` into classified fragments.
///
/// The final segment after the last `\n` is never processed; it becomes the
/// new leftover. Each complete line has a trailing `\r` trimmed and ANSI
/// colour/erase sequences stripped, and blank lines are skipped.
///
/// # Examples
///
/// ```
/// # use edlog::parser::{assemble, Classifier, Fragment};
/// let out = assemble("def\n", "2024 abc", &Classifier::default());
/// assert_eq!(out.leftover, "");
/// match &out.fragments[..] {
///     [Fragment::Header(draft)] => assert_eq!(draft.header, "2024 abcdef"),
///     other => panic!("unexpected fragments: {other:?}"),
/// }
/// ```
pub fn assemble(chunk: &str, leftover: &str, classifier: &Classifier) -> Assembled {
    let mut content = String::with_capacity(leftover.len() + chunk.len());
    content.push_str(leftover);
    content.push_str(chunk);

    let (complete, rest) = match content.rfind('\n') {
        Some(pos) => (&content[..pos], &content[pos + 1..]),
        None => {
            return Assembled {
                fragments: Vec::new(),
                leftover: content,
            }
        }
    };

    let fragments = complete
        .split('\n')
        .filter_map(|raw| {
            let line = clean_line(raw);
            if line.trim().is_empty() {
                return None;
            }
            Some(match classifier.classify(&line).kind {
                LineKind::NewEntry => Fragment::Header(draft_from_line(&line, classifier)),
                LineKind::Continuation => Fragment::Continuation(line.into_owned()),
            })
        })
        .collect();

    Assembled {
        fragments,
        leftover: rest.to_string(),
    }
}

/// Trim a trailing `\r` and strip ANSI sequences.
pub fn clean_line(raw: &str) -> Cow<'_, str> {
    let raw = raw.strip_suffix('\r').unwrap_or(raw);
    ansi_regex().replace_all(raw, "")
}

/// Build header fields from a line already classified as a new entry.
///
/// A leading timestamp token is split off (brackets removed); otherwise the
/// current local time is used.
pub fn draft_from_line(line: &str, classifier: &Classifier) -> EntryDraft {
    let header = line.trim_start();
    let (timestamp, header) = match classify::timestamp_regex().find(header) {
        Some(m) => (
            m.as_str().trim_matches(['[', ']']).to_string(),
            header[m.end()..].trim().to_string(),
        ),
        None => (
            Local::now().format(TIMESTAMP_FORMAT).to_string(),
            header.to_string(),
        ),
    };

    EntryDraft {
        severity: Severity::from_header(&header),
        tagged: classifier.is_tagged(&header),
        timestamp,
        header,
    }
}
