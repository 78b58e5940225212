//! Acceptance tests: a session tailing a log that an editor keeps writing.

use edlog::config::ResolvedConfig;
use edlog::model::Severity;
use edlog::state::{HostEvent, Session};
use edlog::view_state::{TailMode, ViewportDimensions};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

struct Fixture {
    path: PathBuf,
    session: Session,
}

impl Fixture {
    fn new(name: &str, initial: &str, capacity: usize) -> Self {
        let path = std::env::temp_dir().join(format!(
            "edlog_accept_{}_{name}.log",
            std::process::id()
        ));
        fs::write(&path, initial).expect("write initial log");
        let config = ResolvedConfig {
            file: path.clone(),
            capacity,
            ..ResolvedConfig::default()
        };
        let mut session = Session::new(&config);
        session.start();
        Self { path, session }
    }

    fn append(&mut self, text: &str) {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .expect("open log");
        file.write_all(text.as_bytes()).expect("append log");
        self.session.handle_host_event(HostEvent::Tick);
    }

    fn headers(&self) -> Vec<String> {
        self.session
            .store()
            .visible()
            .map(|e| e.header().to_string())
            .collect()
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[test]
fn stack_trace_and_footer_fold_into_one_error() {
    let fixture = Fixture::new(
        "round_trip",
        "Error: boom\n  at Foo.Bar()\n(Filename: x.cs Line: 1)\n",
        100,
    );

    let store = fixture.session.store();
    assert_eq!(store.len(), 1);
    let entry = store.entry_at(0).expect("one entry");
    assert_eq!(entry.severity(), Severity::Error);
    assert_eq!(entry.header(), "Error: boom");
    assert_eq!(entry.body(), "at Foo.Bar()\n(Filename: x.cs Line: 1)");
}

#[test]
fn line_split_across_writes_becomes_one_entry() {
    let mut fixture = Fixture::new("carry", "", 100);

    fixture.append("2024 abc");
    assert!(fixture.session.store().is_empty());

    fixture.append("def\n");
    assert_eq!(fixture.headers(), vec!["2024 abcdef"]);
}

#[test]
fn continuation_arriving_later_grows_the_newest_entry() {
    let mut fixture = Fixture::new("grow", "NullReferenceException: oops\n", 100);
    fixture.session.set_search_text("Player.Update");
    assert!(fixture.headers().is_empty());

    fixture.append("  at Player.Update () [0x0001] in Player.cs:12\n");

    assert_eq!(fixture.headers(), vec!["NullReferenceException: oops"]);
}

#[test]
fn unity_log_sample_assembles_expected_entries() {
    let sample = "\
[Licensing::Module] Channel doesn't exist
Refreshing native plugins compatible for Editor in 1.23 ms, found 3 plugins.
Antigravity: Build started
UnityEngine.Debug:Log (object)
Antigravity.Build:Run () (at Assets/Build.cs:10)

Warning: shader compile slow
\tline with tab
Error: Script failed
  at Script.Run ()
  at Script.Main ()
";
    let fixture = Fixture::new("sample", sample, 100);

    insta::assert_snapshot!(fixture.headers().join("\n"), @r"
    [Licensing::Module] Channel doesn't exist
    Refreshing native plugins compatible for Editor in 1.23 ms, found 3 plugins.
    Antigravity: Build started
    Warning: shader compile slow
    Error: Script failed
    ");

    let store = fixture.session.store();
    let tagged = store.entry_at(2).expect("tagged entry");
    assert!(tagged.is_tagged());
    assert_eq!(
        tagged.body(),
        "UnityEngine.Debug:Log (object)\nAntigravity.Build:Run () (at Assets/Build.cs:10)"
    );
    let warning = store.entry_at(3).expect("warning entry");
    assert_eq!(warning.severity(), Severity::Warning);
    assert_eq!(warning.body(), "line with tab");
    let error = store.entry_at(4).expect("error entry");
    assert_eq!(error.body(), "at Script.Run ()\n  at Script.Main ()");
}

#[test]
fn copy_all_visible_is_deterministic() {
    let fixture = Fixture::new(
        "copy",
        "[10:15:00.123] Error: boom\n  at Foo.Bar()\n10:15:01.000 Done\n",
        100,
    );

    assert_eq!(
        fixture.session.copy_all_visible(),
        "[10:15:00.123] Error: boom\nat Foo.Bar()\n[10:15:01.000] Done\n"
    );
}

#[test]
fn capacity_bounds_store_and_filter() {
    let lines: String = (0..50).map(|i| format!("entry {i}\n")).collect();
    let mut fixture = Fixture::new("capacity", &lines, 10);
    fixture.session.set_search_text("entry 4");

    assert_eq!(fixture.session.store().len(), 10);
    assert_eq!(
        fixture.headers(),
        (40..50).map(|i| format!("entry {i}")).collect::<Vec<_>>()
    );

    fixture.append("entry 4x\n");
    assert_eq!(fixture.session.store().len(), 10);
    assert_eq!(fixture.headers().first().map(String::as_str), Some("entry 41"));
    assert_eq!(fixture.headers().last().map(String::as_str), Some("entry 4x"));
}

#[test]
fn rotation_mid_session_reads_the_new_file() {
    let mut fixture = Fixture::new("rotation", "a fairly long first generation\n", 100);
    fs::write(&fixture.path, "fresh\n").expect("rotate");
    fixture.session.handle_host_event(HostEvent::Tick);

    assert_eq!(
        fixture.headers(),
        vec!["a fairly long first generation", "fresh"]
    );
}

#[test]
fn partial_line_is_not_glued_onto_a_rotated_file() {
    let mut fixture = Fixture::new("rotation_partial", "a fairly long first generation\npartial", 100);
    assert_eq!(fixture.session.tailer().leftover(), "partial");

    fs::write(&fixture.path, "new\n").expect("rotate");
    fixture.session.handle_host_event(HostEvent::Tick);

    assert_eq!(
        fixture.headers(),
        vec!["a fairly long first generation", "new"]
    );
    assert_eq!(fixture.session.tailer().leftover(), "");
}

#[test]
fn viewport_follows_pins_and_resumes() {
    let lines: String = (0..30).map(|i| format!("line {i}\n")).collect();
    let mut fixture = Fixture::new("viewport", &lines, 100);
    let area = ViewportDimensions::new(60, 10);

    let plan = fixture.session.plan(area).clone();
    assert_eq!(plan.offset, 20);
    assert_eq!(plan.visible().count(), 10);
    assert_eq!(plan.placements.len(), 10, "only on-screen entries are placed");

    fixture.session.page_up();
    fixture.append("line 30\n");
    let plan = fixture.session.plan(area).clone();
    assert_eq!(fixture.session.viewport().mode(), TailMode::Pinned);
    assert_eq!(plan.offset, 10);

    fixture.session.page_down();
    fixture.session.plan(area);
    assert_eq!(fixture.session.viewport().mode(), TailMode::Pinned);

    fixture.session.scroll_down(1);
    let plan = fixture.session.plan(area).clone();
    assert!(fixture.session.viewport().is_following());
    assert_eq!(plan.offset, 21);
}

#[test]
fn only_stale_entries_are_measured() {
    let lines: String = (0..20).map(|i| format!("line {i}\n")).collect();
    let mut fixture = Fixture::new("measure", &lines, 100);
    let area = ViewportDimensions::new(60, 5);

    fixture.session.plan(area);
    let after_first = fixture.session.layouts().measurement_count();
    assert_eq!(after_first, 20);

    fixture.session.plan(area);
    assert_eq!(fixture.session.layouts().measurement_count(), after_first);

    fixture.append("line 20\n");
    fixture.session.plan(area);
    assert_eq!(fixture.session.layouts().measurement_count(), after_first + 1);

    fixture.append("  continuation\n");
    fixture.session.plan(area);
    assert_eq!(fixture.session.layouts().measurement_count(), after_first + 2);
}
