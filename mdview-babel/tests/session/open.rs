use super::dispatcher;
use crate::common::write_file;
use mdview_babel::dispatch::{DialogResult, ErrorKind, OPEN_FILTERS};
use mdview_babel::{CommandOutcome, DocumentSession, Notification};
use tempfile::tempdir;

#[test]
fn cancelled_open_changes_nothing() {
    let (mut dispatcher, receiver) = dispatcher([DialogResult::canceled()]);
    let mut session = DocumentSession::new();

    let outcome = dispatcher.handle_open(&mut session).unwrap();

    assert_eq!(outcome, CommandOutcome::Cancelled);
    assert_eq!(session, DocumentSession::new());
    assert!(!dispatcher.menu().export_enabled());
    assert!(receiver.try_recv().is_err());
    assert!(dispatcher.converter().html_calls.borrow().is_empty());
}

#[test]
fn open_dialog_offers_markdown_and_all_files() {
    let (mut dispatcher, _receiver) = dispatcher([DialogResult::canceled()]);
    dispatcher.handle_open(&mut DocumentSession::new()).unwrap();

    let requests = &dispatcher.selector_mut().requests;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0], OPEN_FILTERS.to_vec());
    assert_eq!(requests[0][0].name, "Markdown (*.md)");
    assert_eq!(requests[0][1].name, "All files (*.*)");
}

#[test]
fn opening_readme_loads_and_notifies() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "readme.md", "# Hi");
    let (mut dispatcher, receiver) = dispatcher([DialogResult::selected(&path)]);
    let mut session = DocumentSession::new();

    let outcome = dispatcher.handle_open(&mut session).unwrap();

    let expected_html = "<div class=\"markdown-content\"><h1>Hi</h1></div>";
    assert_eq!(outcome, CommandOutcome::Opened { path: path.clone() });
    assert_eq!(session.source_path(), Some(path.as_path()));
    assert_eq!(session.rendered_html(), Some(expected_html));
    assert!(dispatcher.menu().export_enabled());
    assert_eq!(
        receiver.try_iter().collect::<Vec<_>>(),
        vec![Notification::DocumentLoaded {
            path,
            html_content: expected_html.to_string(),
        }]
    );
}

#[test]
fn second_open_replaces_document() {
    let dir = tempdir().unwrap();
    let first = write_file(dir.path(), "first.md", "# One");
    let second = write_file(dir.path(), "second.md", "# Two");
    let (mut dispatcher, receiver) = dispatcher([
        DialogResult::selected(&first),
        DialogResult::selected(&second),
    ]);
    let mut session = DocumentSession::new();

    dispatcher.handle_open(&mut session).unwrap();
    dispatcher.handle_open(&mut session).unwrap();

    assert_eq!(session.source_path(), Some(second.as_path()));
    assert_eq!(
        session.rendered_html(),
        Some("<div class=\"markdown-content\"><h1>Two</h1></div>")
    );
    assert_eq!(receiver.try_iter().count(), 2);
}

#[test]
fn unreadable_file_is_io_error_and_keeps_state() {
    let dir = tempdir().unwrap();
    let loaded = write_file(dir.path(), "loaded.md", "# Loaded");
    let missing = dir.path().join("missing.md");
    let (mut dispatcher, receiver) = dispatcher([
        DialogResult::selected(&loaded),
        DialogResult::selected(&missing),
    ]);
    let mut session = DocumentSession::new();
    dispatcher.handle_open(&mut session).unwrap();
    let before = session.clone();
    receiver.try_iter().for_each(drop);

    let err = dispatcher.handle_open(&mut session).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(session, before);
    assert!(receiver.try_recv().is_err());
}

#[test]
fn failed_first_open_leaves_export_disabled() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("latin1.md");
    std::fs::write(&path, [0xe9, b't', 0xe9]).unwrap();
    let (mut dispatcher, receiver) = dispatcher([DialogResult::selected(&path)]);
    let mut session = DocumentSession::new();

    let err = dispatcher.handle_open(&mut session).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(!session.is_loaded());
    assert!(!dispatcher.menu().export_enabled());
    assert!(receiver.try_recv().is_err());
}

#[test]
fn dialog_failure_is_io_error() {
    // No scripted answers: the selector reports an I/O failure.
    let (mut dispatcher, receiver) = dispatcher(Vec::new());
    let mut session = DocumentSession::new();

    let err = dispatcher.handle_open(&mut session).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(!session.is_loaded());
    assert!(receiver.try_recv().is_err());
    assert!(dispatcher.converter().html_calls.borrow().is_empty());
}
