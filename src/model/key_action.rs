//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Scrolling
    /// Scroll towards older output by one row. Pins the view. Default: k/↑
    ScrollUp,
    /// Scroll towards newer output by one row. Default: j/↓
    ScrollDown,
    /// Scroll up by one page height. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down by one page height. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the oldest retained entry. Default: g/Home
    ScrollToTop,
    /// Snap to the newest entry and resume following. Default: G/End
    JumpToTail,
    /// Flip between following and pinned. Default: t
    ToggleTail,

    // Entry interaction
    /// Move focus to the next entry. Default: Ctrl+j
    NextEntry,
    /// Move focus to the previous entry. Default: Ctrl+k
    PrevEntry,
    /// Show or hide the focused entry's body. Default: Enter/Space
    ToggleExpand,
    /// Expand or collapse every entry. Default: e
    ToggleExpandAll,

    // Search
    /// Start editing the filter. Default: /
    StartSearch,

    // Log commands
    /// Drop all entries and skip what is already in the file. Default: c
    Clear,
    /// Write all filtered entries to the copy file. Default: y
    CopyVisible,

    // Application
    /// Exit. Default: q/Ctrl+c
    Quit,
}
