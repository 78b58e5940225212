//! Tests for the session controller.

use super::*;
use crate::model::Severity;
use crate::view_state::TailMode;
use std::fs::OpenOptions;
use std::io::Write;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("edlog_session_{}_{name}", std::process::id()))
}

fn config(file: PathBuf, capacity: usize) -> ResolvedConfig {
    ResolvedConfig {
        file,
        capacity,
        copy_file_path: temp_path("copy_unused.log"),
        ..ResolvedConfig::default()
    }
}

fn detached(capacity: usize) -> Session {
    Session::new(&config(temp_path("missing.log"), capacity))
}

fn append(path: &Path, text: &str) {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .expect("open log for append");
    file.write_all(text.as_bytes()).expect("append to log");
}

fn numbered_lines(count: usize) -> String {
    (0..count)
        .map(|i| format!("12:00:{:02}.000 line {i}\n", i % 60))
        .collect()
}

fn headers(session: &Session) -> Vec<String> {
    session
        .store()
        .visible()
        .map(|e| e.header().to_string())
        .collect()
}

#[test]
fn start_backfills_and_assembles_existing_content() {
    let path = temp_path("backfill.log");
    fs::write(
        &path,
        "Error: boom\n  at Foo.Bar()\n(Filename: x.cs Line: 1)\nhello\n",
    )
    .expect("write log");

    let mut session = Session::new(&config(path.clone(), 100));
    session.start();
    let _ = fs::remove_file(&path);

    assert_eq!(headers(&session), vec!["Error: boom", "hello"]);
    let first = session.store().entry_at(0).expect("first entry");
    assert_eq!(first.severity(), Severity::Error);
    assert_eq!(first.body(), "at Foo.Bar()\n(Filename: x.cs Line: 1)");
}

#[test]
fn tick_picks_up_appended_lines() {
    let path = temp_path("tick.log");
    fs::write(&path, "first\n").expect("write log");

    let mut session = Session::new(&config(path.clone(), 100));
    session.start();
    assert!(!session.tick(), "no growth means no redraw");

    append(&path, "second\n  detail\n");
    let changed = session.tick();
    let _ = fs::remove_file(&path);

    assert!(changed);
    assert_eq!(headers(&session), vec!["first", "second"]);
    assert_eq!(
        session.store().entry_at(1).map(|e| e.body().to_string()),
        Ok("detail".to_string())
    );
}

#[test]
fn partial_line_is_carried_to_next_chunk() {
    let mut session = detached(10);

    let delta = session.ingest("2024 abc");
    assert!(delta.is_empty());
    assert_eq!(session.tailer().leftover(), "2024 abc");

    session.ingest("def\n");
    assert_eq!(headers(&session), vec!["2024 abcdef"]);
    assert_eq!(session.tailer().leftover(), "");
}

#[test]
fn clear_skips_existing_content_and_keeps_counting_ids() {
    let path = temp_path("clear.log");
    fs::write(&path, "old one\nold two\n").expect("write log");

    let mut session = Session::new(&config(path.clone(), 100));
    session.start();
    let next_before = session.store().next_id();

    session.clear();
    assert!(session.store().is_empty());
    assert_eq!(session.status(), Some("Cleared"));

    append(&path, "fresh\n");
    session.tick();
    let _ = fs::remove_file(&path);

    assert_eq!(headers(&session), vec!["fresh"]);
    assert_eq!(session.store().entry_at(0).map(|e| e.id()), Ok(next_before));
}

#[test]
fn copy_all_visible_joins_full_text_with_newlines() {
    let mut session = detached(10);
    session.ingest("[12:00:00.000] Error: boom\n  at Foo.Bar()\n12:00:01.500 Done\n");

    assert_eq!(
        session.copy_all_visible(),
        "[12:00:00.000] Error: boom\nat Foo.Bar()\n[12:00:01.500] Done\n"
    );
}

#[test]
fn copy_respects_the_filter() {
    let mut session = detached(10);
    session.ingest("12:00:00.000 alpha\n12:00:01.000 beta\n");
    session.set_search_text("BETA");

    assert_eq!(session.copy_all_visible(), "[12:00:01.000] beta\n");
}

#[test]
fn write_copy_creates_parent_directory() {
    let dir = temp_path("copy_dir");
    let target = dir.join("nested").join("copied.log");
    let _ = fs::remove_dir_all(&dir);

    let mut session = detached(10);
    session.ingest("12:00:00.000 alpha\n12:00:01.000 beta\n");
    let written = session.write_copy(&target);
    let contents = fs::read_to_string(&target);
    let _ = fs::remove_dir_all(&dir);

    assert_eq!(written.ok(), Some(2));
    assert_eq!(
        contents.ok().as_deref(),
        Some("[12:00:00.000] alpha\n[12:00:01.000] beta\n")
    );
}

#[test]
fn search_editing_filters_live() {
    let mut session = detached(100);
    session.ingest(&numbered_lines(20));

    session.start_search();
    for ch in "line 1".chars() {
        session.search_insert(ch);
    }
    // "line 1" and "line 10" through "line 19"
    assert_eq!(session.store().filtered().len(), 11);

    session.search_submit();
    assert_eq!(session.store().filtered().len(), 11);

    session.search_cancel();
    assert_eq!(session.store().filtered().len(), 20);
    assert_eq!(session.search(), &SearchState::Inactive);
}

#[test]
fn set_search_query_starts_active() {
    let mut session = detached(100);
    session.ingest(&numbered_lines(5));

    session.set_search_query("line 3");

    assert!(matches!(session.search(), SearchState::Active { .. }));
    assert_eq!(headers(&session), vec!["line 3"]);
}

#[test]
fn filtering_out_the_focused_entry_drops_focus() {
    let mut session = detached(100);
    session.ingest(&numbered_lines(5));
    session.focus_next();
    assert_eq!(session.focus(), Some(EntryId::new(0)));

    session.set_search_text("line 4");

    assert_eq!(session.focus(), None);
}

#[test]
fn evicting_the_focused_entry_drops_focus() {
    let mut session = detached(3);
    session.ingest(&numbered_lines(3));
    session.focus_next();
    assert_eq!(session.focus(), Some(EntryId::new(0)));

    session.ingest("12:01:00.000 newest\n");

    assert_eq!(session.focus(), None);
    assert_eq!(session.store().len(), 3);
}

#[test]
fn following_plan_shows_the_newest_rows() {
    let mut session = detached(100);
    session.ingest(&numbered_lines(20));

    let plan = session.plan(ViewportDimensions::new(40, 5));

    assert_eq!(plan.total_rows, 20);
    assert_eq!(plan.offset, 15);
    let ids: Vec<u64> = plan.visible().map(|p| p.id.get()).collect();
    assert_eq!(ids, vec![15, 16, 17, 18, 19]);
}

#[test]
fn scrolling_up_pins_and_returning_to_bottom_resumes() {
    let mut session = detached(100);
    session.ingest(&numbered_lines(20));
    session.plan(ViewportDimensions::new(40, 5));

    session.scroll_up(3);
    let plan = session.plan(ViewportDimensions::new(40, 5));
    assert_eq!(plan.offset, 12);
    assert_eq!(session.viewport().mode(), TailMode::Pinned);

    session.ingest("12:02:00.000 while pinned\n");
    let plan = session.plan(ViewportDimensions::new(40, 5));
    assert_eq!(plan.offset, 12, "pinned view stays put as content grows");

    session.scroll_down(4);
    session.plan(ViewportDimensions::new(40, 5));
    assert!(session.viewport().is_following());
}

#[test]
fn one_row_above_the_bottom_stays_pinned() {
    let mut session = detached(100);
    session.ingest(&numbered_lines(20));
    session.plan(ViewportDimensions::new(40, 5));

    session.scroll_up(1);
    let offset = session.plan(ViewportDimensions::new(40, 5)).offset;

    assert_eq!(offset, 14);
    assert_eq!(session.viewport().mode(), TailMode::Pinned);
}

#[test]
fn jump_to_tail_snaps_after_scrolling_to_top() {
    let mut session = detached(100);
    session.ingest(&numbered_lines(20));
    session.plan(ViewportDimensions::new(40, 5));

    session.scroll_to_top();
    assert_eq!(session.plan(ViewportDimensions::new(40, 5)).offset, 0);

    session.jump_to_tail();
    let plan = session.plan(ViewportDimensions::new(40, 5));
    assert_eq!(plan.offset, 15);
    assert!(session.viewport().is_following());
}

#[test]
fn toggle_tail_holds_position_at_the_bottom() {
    let mut session = detached(100);
    session.ingest(&numbered_lines(20));
    session.plan(ViewportDimensions::new(40, 5));

    session.toggle_tail();
    session.ingest("12:03:00.000 more\n");
    let offset = session.plan(ViewportDimensions::new(40, 5)).offset;

    assert_eq!(session.viewport().mode(), TailMode::Pinned);
    assert_eq!(offset, 15);

    session.toggle_tail();
    let offset = session.plan(ViewportDimensions::new(40, 5)).offset;
    assert_eq!(offset, 16);
}

#[test]
fn header_click_focuses_and_expands() {
    let mut session = detached(100);
    session.ingest("12:00:00.000 first\n  body a\n  body b\n12:00:01.000 second\n");
    session.plan(ViewportDimensions::new(40, 10));

    assert!(session.click(0));
    assert_eq!(session.focus(), Some(EntryId::new(0)));
    assert!(session.layouts().is_expanded(EntryId::new(0)));

    let plan = session.plan(ViewportDimensions::new(40, 10));
    assert_eq!(plan.total_rows, 4);

    assert!(!session.click(9), "click below content misses");
}

#[test]
fn wheel_up_drops_focus_and_pins() {
    let mut session = detached(100);
    session.ingest(&numbered_lines(20));
    session.plan(ViewportDimensions::new(40, 5));
    session.focus_next();
    assert!(session.focus().is_some());

    session.wheel_up(3);

    assert_eq!(session.focus(), None);
    assert_eq!(session.viewport().mode(), TailMode::Pinned);
}

#[test]
fn wheel_down_drops_focus() {
    let mut session = detached(100);
    session.ingest(&numbered_lines(20));
    session.plan(ViewportDimensions::new(40, 5));
    session.scroll_up(10);
    session.plan(ViewportDimensions::new(40, 5));
    session.focus_next();
    assert!(session.focus().is_some());

    session.wheel_down(3);

    assert_eq!(session.focus(), None);
    let offset = session.plan(ViewportDimensions::new(40, 5)).offset;
    assert_eq!(offset, 8);
}

#[test]
fn focus_moves_through_filtered_entries_and_stops_at_ends() {
    let mut session = detached(100);
    session.ingest(&numbered_lines(20));
    session.plan(ViewportDimensions::new(40, 5));

    session.focus_next();
    assert_eq!(session.focus(), Some(EntryId::new(15)));
    session.focus_next();
    assert_eq!(session.focus(), Some(EntryId::new(16)));
    session.focus_prev();
    session.focus_prev();
    assert_eq!(session.focus(), Some(EntryId::new(14)));

    let plan = session.plan(ViewportDimensions::new(40, 5));
    assert_eq!(plan.offset, 14, "focus is revealed");

    session.scroll_to_top();
    for _ in 0..20 {
        session.focus_next();
    }
    assert_eq!(session.focus(), Some(EntryId::new(19)));
}

#[test]
fn toggle_expand_all_changes_total_height() {
    let mut session = detached(100);
    session.ingest("12:00:00.000 one\n  a\n  b\n12:00:01.000 two\n  c\n");

    assert_eq!(session.plan(ViewportDimensions::new(40, 10)).total_rows, 2);
    session.toggle_expand_all();
    assert_eq!(session.plan(ViewportDimensions::new(40, 10)).total_rows, 5);
    session.toggle_expand_all();
    assert_eq!(session.plan(ViewportDimensions::new(40, 10)).total_rows, 2);
}

#[test]
fn focus_lost_clears_focus() {
    let mut session = detached(100);
    session.ingest(&numbered_lines(3));
    session.focus_next();

    assert!(session.handle_host_event(HostEvent::FocusLost));
    assert_eq!(session.focus(), None);
    assert!(!session.is_window_focused());

    session.handle_host_event(HostEvent::FocusGained);
    assert!(session.is_window_focused());
}

#[test]
fn resize_updates_layout_width_and_viewport_height() {
    let mut session = detached(10);

    session.handle_host_event(HostEvent::Resize {
        width: 60,
        height: 12,
    });

    assert_eq!(session.layouts().width(), 60);
    assert_eq!(session.viewport().height(), 12);
}

#[test]
fn status_message_expires_after_ttl() {
    let mut session = detached(10);
    session.set_status("hello");

    for _ in 0..STATUS_TTL_TICKS - 1 {
        session.handle_host_event(HostEvent::Tick);
    }
    assert_eq!(session.status(), Some("hello"));

    assert!(session.handle_host_event(HostEvent::Tick));
    assert_eq!(session.status(), None);
}
