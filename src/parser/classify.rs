//! Header/continuation classification for physical log lines.
//!
//! Editor logs mix one-line messages, multi-line messages whose stack trace
//! follows unindented, and indented continuation text. No single signal is
//! reliable, so classification is an ordered list of rules where the first
//! rule that fires decides. Misclassification is a known limitation, not an
//! error.

use regex::Regex;
use std::sync::OnceLock;

/// Outcome of classifying one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// The line starts a new entry.
    NewEntry,
    /// The line belongs to the body of the previous entry.
    Continuation,
}

/// The rule that decided a classification, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Starts with `(Filename:`: stack-trace footer.
    FooterMarker,
    /// Contains `(at `: stack frame source location.
    SourceLocation,
    /// `Namespace.Class:Method (args)` shape: first `:` precedes first `(`
    /// and is not preceded by a space.
    CallSite,
    /// Starts with an `HH:MM:SS[.fff]` token, optionally bracketed.
    Timestamp,
    /// Contains an application tag, or starts with `Error`/`Warning`.
    TagOrSeverity,
    /// Starts with `[` and does not mention the debug-API marker.
    Bracketed,
    /// Fallback: unindented lines start entries, indented lines continue.
    Indentation,
}

/// A classification together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Header or continuation.
    pub kind: LineKind,
    /// Deciding rule.
    pub rule: Rule,
}

impl Classification {
    fn new(kind: LineKind, rule: Rule) -> Self {
        Self { kind, rule }
    }
}

/// Tunable inputs of the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Substrings that mark a line as an application header (and tag it).
    pub tags: Vec<String>,
    /// Substring that disqualifies a bracketed line from being a header.
    pub debug_api_marker: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            tags: vec![DEFAULT_TAG.to_string()],
            debug_api_marker: DEFAULT_DEBUG_API_MARKER.to_string(),
        }
    }
}

/// Default application tag.
pub const DEFAULT_TAG: &str = "Antigravity:";

/// Default debug-API marker.
pub const DEFAULT_DEBUG_API_MARKER: &str = "UnityEngine.Debug";

static TIMESTAMP_RE: OnceLock<Regex> = OnceLock::new();

/// Leading `HH:MM:SS[.fff[f]]` token with optional brackets.
pub(crate) fn timestamp_regex() -> &'static Regex {
    TIMESTAMP_RE.get_or_init(|| {
        Regex::new(r"^\[?\d{2}:\d{2}:\d{2}(\.\d{3,4})?\]?").expect("valid timestamp regex")
    })
}

/// Rule-list classifier.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    /// Create a classifier with the given tags and marker.
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// True when `text` contains one of the configured tags.
    pub fn is_tagged(&self, text: &str) -> bool {
        self.config
            .tags
            .iter()
            .any(|tag| !tag.is_empty() && text.contains(tag.as_str()))
    }

    /// Classify one non-blank, ANSI-stripped line.
    ///
    /// # Examples
    ///
    /// ```
    /// # use edlog::parser::{Classifier, LineKind, Rule};
    /// let classifier = Classifier::default();
    ///
    /// let c = classifier.classify("UnityEngine.Debug:Log (object)");
    /// assert_eq!(c.kind, LineKind::Continuation);
    /// assert_eq!(c.rule, Rule::CallSite);
    ///
    /// let c = classifier.classify("Refreshing native plugins");
    /// assert_eq!(c.kind, LineKind::NewEntry);
    /// assert_eq!(c.rule, Rule::Indentation);
    /// ```
    pub fn classify(&self, line: &str) -> Classification {
        use LineKind::{Continuation, NewEntry};

        if line.starts_with("(Filename:") {
            return Classification::new(Continuation, Rule::FooterMarker);
        }
        if line.contains("(at ") {
            return Classification::new(Continuation, Rule::SourceLocation);
        }
        if is_call_site(line) {
            return Classification::new(Continuation, Rule::CallSite);
        }

        let trimmed = line.trim_start();
        if timestamp_regex().is_match(trimmed) {
            return Classification::new(NewEntry, Rule::Timestamp);
        }
        if self.is_tagged(trimmed) || trimmed.starts_with("Error") || trimmed.starts_with("Warning")
        {
            return Classification::new(NewEntry, Rule::TagOrSeverity);
        }
        if line.starts_with('[') && !line.contains(self.config.debug_api_marker.as_str()) {
            return Classification::new(NewEntry, Rule::Bracketed);
        }

        let kind = if line.starts_with(' ') || line.starts_with('\t') {
            Continuation
        } else {
            NewEntry
        };
        Classification::new(kind, Rule::Indentation)
    }
}

fn is_call_site(line: &str) -> bool {
    let (Some(colon), Some(paren)) = (line.find(':'), line.find('(')) else {
        return false;
    };
    colon < paren && colon > 0 && !line[..colon].ends_with(' ')
}
