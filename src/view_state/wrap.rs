//! Character wrapping by display width.
//!
//! The same routine sizes entries for layout and produces the rows that get
//! drawn, so a measured height always equals the drawn height.

use unicode_width::UnicodeWidthChar;

/// Columns a tab expands to.
pub const TAB_WIDTH: usize = 4;

/// Wrap `text` into rows of at most `width` columns.
///
/// Every `\n`-separated line yields at least one row. A character wider than
/// `width` gets a row to itself. Tabs expand to spaces and other control
/// characters are dropped. A `width` of 0 is treated as 1.
///
/// # Examples
///
/// ```
/// # use edlog::view_state::wrap::wrap_text;
/// assert_eq!(wrap_text("abcdef", 4), vec!["abcd", "ef"]);
/// assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
/// ```
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    wrap_into(text, width, |row| rows.push(row.to_string()));
    rows
}

/// Number of rows [`wrap_text`] would produce.
pub fn wrapped_height(text: &str, width: usize) -> usize {
    let mut count = 0;
    wrap_into(text, width, |_| count += 1);
    count
}

/// Characters [`wrap_text`] emits for `text`, newlines excluded.
pub fn rendered_chars(text: &str) -> usize {
    text.chars()
        .map(|c| match c {
            '\t' => TAB_WIDTH,
            c if c.is_control() => 0,
            _ => 1,
        })
        .sum()
}

fn wrap_into(text: &str, width: usize, mut emit: impl FnMut(&str)) {
    let width = width.max(1);
    let mut row = String::new();
    for line in text.split('\n') {
        let mut used = 0;
        for ch in line.chars() {
            match ch {
                '\t' => {
                    for _ in 0..TAB_WIDTH {
                        push_char(&mut row, &mut used, ' ', 1, width, &mut emit);
                    }
                }
                c if c.is_control() => {}
                c => {
                    let w = c.width().unwrap_or(0);
                    push_char(&mut row, &mut used, c, w, width, &mut emit);
                }
            }
        }
        emit(&row);
        row.clear();
    }
}

fn push_char(
    row: &mut String,
    used: &mut usize,
    ch: char,
    ch_width: usize,
    width: usize,
    emit: &mut impl FnMut(&str),
) {
    if *used > 0 && *used + ch_width > width {
        emit(row);
        row.clear();
        *used = 0;
    }
    row.push(ch);
    *used += ch_width;
}
