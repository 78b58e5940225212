//! Search input state machine.
//!
//! SearchState is a sum type representing the three possible search states:
//! - Inactive: no filter applied
//! - Typing: the user is editing the query; the filter follows every keystroke
//! - Active: query confirmed, filter stays applied while browsing
//!
//! Transitions are pure functions taking and returning the state by value.

// ===== SearchState =====

/// Search state machine.
/// Sum type enforces exactly one state at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchState {
    /// No active search.
    #[default]
    Inactive,
    /// User is typing the query.
    Typing {
        /// Text entered so far.
        query: String,
        /// Cursor position in characters.
        cursor: usize,
    },
    /// Query confirmed.
    Active {
        /// Confirmed query.
        query: SearchQuery,
    },
}

impl SearchState {
    /// Text the filter should currently use (empty when inactive).
    pub fn filter_text(&self) -> &str {
        match self {
            SearchState::Inactive => "",
            SearchState::Typing { query, .. } => query,
            SearchState::Active { query } => query.as_str(),
        }
    }

    /// True while the query is being edited.
    pub fn is_typing(&self) -> bool {
        matches!(self, SearchState::Typing { .. })
    }
}

// ===== SearchQuery =====

/// Validated search query. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Smart constructor: returns `None` for empty or whitespace-only text.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let s = raw.into();
        if s.trim().is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    /// Query text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ===== Transitions =====

/// Enter typing mode. An active query is reopened for editing.
pub fn activate(state: SearchState) -> SearchState {
    match state {
        SearchState::Inactive => SearchState::Typing {
            query: String::new(),
            cursor: 0,
        },
        SearchState::Active { query } => {
            let cursor = query.as_str().chars().count();
            SearchState::Typing {
                query: query.0,
                cursor,
            }
        }
        typing => typing,
    }
}

/// Insert a character at the cursor.
pub fn insert_char(state: SearchState, ch: char) -> SearchState {
    match state {
        SearchState::Typing { mut query, cursor } => {
            let at = byte_index(&query, cursor);
            query.insert(at, ch);
            SearchState::Typing {
                query,
                cursor: cursor + 1,
            }
        }
        other => other,
    }
}

/// Delete the character before the cursor.
pub fn backspace(state: SearchState) -> SearchState {
    match state {
        SearchState::Typing { mut query, cursor } if cursor > 0 => {
            let at = byte_index(&query, cursor - 1);
            query.remove(at);
            SearchState::Typing {
                query,
                cursor: cursor - 1,
            }
        }
        other => other,
    }
}

/// Move the cursor one character left (saturating).
pub fn cursor_left(state: SearchState) -> SearchState {
    match state {
        SearchState::Typing { query, cursor } => SearchState::Typing {
            query,
            cursor: cursor.saturating_sub(1),
        },
        other => other,
    }
}

/// Move the cursor one character right (saturating at the end).
pub fn cursor_right(state: SearchState) -> SearchState {
    match state {
        SearchState::Typing { query, cursor } => {
            let max = query.chars().count();
            SearchState::Typing {
                query,
                cursor: (cursor + 1).min(max),
            }
        }
        other => other,
    }
}

/// Confirm the query. An empty query deactivates search.
pub fn submit(state: SearchState) -> SearchState {
    match state {
        SearchState::Typing { query, .. } => match SearchQuery::new(query) {
            Some(query) => SearchState::Active { query },
            None => SearchState::Inactive,
        },
        other => other,
    }
}

/// Drop the query entirely.
pub fn cancel(_state: SearchState) -> SearchState {
    SearchState::Inactive
}

fn byte_index(text: &str, char_pos: usize) -> usize {
    text.char_indices()
        .nth(char_pos)
        .map_or(text.len(), |(idx, _)| idx)
}
