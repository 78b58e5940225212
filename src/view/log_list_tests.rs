//! Tests for the entry list widget.

use super::*;
use crate::config::ResolvedConfig;
use crate::model::{EntryDraft, EntryId, Severity};
use crate::view::styles::ColorConfig;
use crate::view_state::{LayoutCache, ViewportDimensions};
use ratatui::{backend::TestBackend, Terminal};

fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            line.push_str(cell.symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

fn session() -> Session {
    Session::new(&ResolvedConfig {
        file: std::env::temp_dir().join("edlog_log_list_missing.log"),
        ..ResolvedConfig::default()
    })
}

fn entry(header: &str, body: &[&str]) -> LogEntry {
    let mut entry = LogEntry::new(
        EntryId::new(0),
        EntryDraft {
            timestamp: "12:00:00.000".to_string(),
            header: header.to_string(),
            severity: Severity::from_header(header),
            tagged: false,
        },
    );
    for line in body {
        entry.push_body_line(line);
    }
    entry
}

fn plain() -> LogStyles {
    LogStyles::with_color_config(ColorConfig::new(false))
}

fn render(session: &mut Session, width: u16, height: u16) -> String {
    let styles = plain();
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
    terminal
        .draw(|frame| {
            let area = frame.area();
            session.plan(ViewportDimensions::new(area.width, area.height));
            frame.render_widget(LogList::new(session, &styles), area);
        })
        .expect("draw");
    buffer_to_string(terminal.backend().buffer())
}

fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

#[test]
fn drawn_rows_match_measured_rows() {
    let entry = entry(
        "Error: a header long enough to wrap at narrow widths",
        &["first body line that also wraps", "second"],
    );
    for width in [8, 14, 30, 120] {
        for expanded in [false, true] {
            let mut layouts = LayoutCache::new(expanded);
            layouts.set_width(width);
            let measured = layouts.measure(&entry);
            let lines = entry_lines(
                &entry,
                expanded,
                false,
                layouts.text_width(),
                layouts.body_width(),
                &plain(),
            );
            assert_eq!(
                lines.len(),
                measured.total_rows,
                "width {width}, expanded {expanded}"
            );
        }
    }
}

#[test]
fn fold_marker_reflects_body_and_expansion() {
    let styles = plain();
    let with_body = entry("header", &["body"]);
    let without_body = entry("header", &[]);

    let collapsed = entry_lines(&with_body, false, false, 40, 38, &styles);
    let expanded = entry_lines(&with_body, true, false, 40, 38, &styles);
    let single = entry_lines(&without_body, true, false, 40, 38, &styles);

    assert_eq!(line_text(&collapsed[0]), "▸ [12:00:00.000] header");
    assert_eq!(line_text(&expanded[0]), "▾ [12:00:00.000] header");
    assert_eq!(line_text(&expanded[1]), "    body");
    assert_eq!(line_text(&single[0]), "  [12:00:00.000] header");
    assert_eq!(single.len(), 1);
}

#[test]
fn timestamp_prefix_keeps_its_style_across_wrapped_rows() {
    let styles = LogStyles::with_color_config(ColorConfig::new(true));
    let lines = entry_lines(&entry("first", &[]), false, false, 12, 10, &styles);

    assert_eq!(line_text(&lines[0]), "  [12:00:00.00");
    assert_eq!(line_text(&lines[1]), "  0] first");
    assert_eq!(lines[1].spans[1].content, "0]");
    assert_eq!(lines[1].spans[1].style, styles.timestamp);
    assert_eq!(lines[1].spans[2].content, " first");
}

#[test]
fn source_reference_suffix_is_muted() {
    let styles = LogStyles::with_color_config(ColorConfig::new(true));
    let header = "Shader warning (Filename: A.shader Line: 3)";
    let lines = entry_lines(&entry(header, &[]), false, false, 80, 78, &styles);

    let spans: Vec<(&str, Style)> = lines[0]
        .spans
        .iter()
        .map(|s| (s.content.as_ref(), s.style))
        .collect();
    assert_eq!(
        spans[1..],
        [
            ("[12:00:00.000]", styles.timestamp),
            (" Shader warning", styles.header(&entry(header, &[]))),
            (" (Filename: A.shader Line: 3)", styles.timestamp),
        ]
    );
}

#[test]
fn muted_suffix_continues_across_wrapped_rows() {
    let styles = LogStyles::with_color_config(ColorConfig::new(true));
    let header = "Done (at Assets/Build.cs:10)";
    // "[12:00:00.000] Done (at Ass" | "ets/Build.cs:10)"
    let lines = entry_lines(&entry(header, &[]), false, false, 27, 25, &styles);

    assert_eq!(lines.len(), 2);
    let last = lines[0].spans.last().expect("spans");
    assert_eq!(last.content, " (at Ass");
    assert_eq!(last.style, styles.timestamp);
    assert_eq!(lines[1].spans[1].content, "ets/Build.cs:10)");
    assert_eq!(lines[1].spans[1].style, styles.timestamp);
}

#[test]
fn header_without_source_reference_keeps_one_style() {
    let styles = LogStyles::with_color_config(ColorConfig::new(true));
    let lines = entry_lines(&entry("Error: failed (code 3)", &[]), false, false, 80, 78, &styles);

    assert_eq!(lines[0].spans.len(), 3);
    assert_eq!(lines[0].spans[2].content, " Error: failed (code 3)");
}

#[test]
fn focused_entry_is_reversed() {
    let lines = entry_lines(&entry("header", &[]), false, true, 40, 38, &plain());
    assert!(lines[0].spans[2]
        .style
        .add_modifier
        .contains(Modifier::REVERSED));
}

#[test]
fn renders_collapsed_entries() {
    let mut session = session();
    session.ingest("12:00:00.000 first\n  body a\n12:00:01.000 second\n");

    insta::assert_snapshot!(render(&mut session, 40, 3), @r"
    ▸ [12:00:00.000] first
      [12:00:01.000] second
    ");
}

#[test]
fn renders_expanded_body_indented() {
    let mut session = session();
    session.ingest("12:00:00.000 first\n  body a\n12:00:01.000 second\n");
    session.set_expand_all(true);

    insta::assert_snapshot!(render(&mut session, 40, 4), @r"
    ▾ [12:00:00.000] first
        body a
      [12:00:01.000] second
    ");
}

#[test]
fn following_shows_only_the_newest_rows() {
    let mut session = session();
    let text: String = (0..10)
        .map(|i| format!("12:00:0{i}.000 line {i}\n"))
        .collect();
    session.ingest(&text);

    assert_eq!(
        render(&mut session, 40, 2),
        "  [12:00:08.000] line 8\n  [12:00:09.000] line 9"
    );
}
