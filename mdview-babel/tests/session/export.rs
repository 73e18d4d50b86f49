use super::{dispatcher, dispatcher_with, PdfCall, RecordingConverter};
use crate::common::write_file;
use mdview_babel::dispatch::{DialogResult, ErrorKind, SAVE_FILTERS};
use mdview_babel::{CommandError, CommandOutcome, DocumentSession, FormatError, Notification};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn export_before_open_touches_nothing() {
    for answer in [
        DialogResult::selected("/tmp/out.pdf"),
        DialogResult::canceled(),
    ] {
        let (mut dispatcher, receiver) = dispatcher([answer]);
        let session = DocumentSession::new();

        let err = dispatcher.handle_export(&session).unwrap_err();

        assert!(matches!(err, CommandError::NoDocument));
        assert_eq!(err.kind(), ErrorKind::Precondition);
        assert!(dispatcher.selector_mut().requests.is_empty());
        assert!(dispatcher.converter().html_calls.borrow().is_empty());
        assert!(dispatcher.converter().pdf_calls.borrow().is_empty());
        assert!(receiver.try_recv().is_err());
    }
}

#[test]
fn export_renders_rederived_html_to_destination() {
    let dir = tempdir().unwrap();
    let source = write_file(dir.path(), "readme.md", "# Hi");
    let (mut dispatcher, receiver) = dispatcher([
        DialogResult::selected(&source),
        DialogResult::selected("/tmp/out.pdf"),
    ]);
    let mut session = DocumentSession::new();
    dispatcher.handle_open(&mut session).unwrap();
    receiver.try_iter().for_each(drop);

    let outcome = dispatcher.handle_export(&session).unwrap();

    assert_eq!(
        outcome,
        CommandOutcome::Exported {
            path: PathBuf::from("/tmp/out.pdf")
        }
    );
    assert_eq!(
        dispatcher.converter().pdf_calls.borrow().as_slice(),
        &[PdfCall {
            source_path: source.clone(),
            html: "<div class=\"markdown-content\"><h1>Hi</h1></div>".to_string(),
            destination: PathBuf::from("/tmp/out.pdf"),
        }]
    );
    // Once at open, once again at export.
    assert_eq!(
        dispatcher.converter().html_calls.borrow().as_slice(),
        &[source.clone(), source]
    );
    assert_eq!(
        receiver.try_iter().collect::<Vec<_>>(),
        vec![Notification::ExportCompleted {
            path: PathBuf::from("/tmp/out.pdf")
        }]
    );
}

#[test]
fn export_picks_up_edits_made_after_open() {
    let dir = tempdir().unwrap();
    let source = write_file(dir.path(), "notes.md", "# Draft");
    let destination = dir.path().join("notes.pdf");
    let (mut dispatcher, _receiver) = dispatcher([
        DialogResult::selected(&source),
        DialogResult::selected(&destination),
    ]);
    let mut session = DocumentSession::new();
    dispatcher.handle_open(&mut session).unwrap();

    fs::write(&source, "# Final").unwrap();
    dispatcher.handle_export(&session).unwrap();

    let calls = dispatcher.converter().pdf_calls.borrow();
    assert_eq!(
        calls[0].html,
        "<div class=\"markdown-content\"><h1>Final</h1></div>"
    );
    // The session keeps what was rendered at open.
    assert_eq!(
        session.rendered_html(),
        Some("<div class=\"markdown-content\"><h1>Draft</h1></div>")
    );
}

#[test]
fn export_save_dialog_offers_pdf() {
    let dir = tempdir().unwrap();
    let source = write_file(dir.path(), "readme.md", "# Hi");
    let (mut dispatcher, _receiver) = dispatcher([
        DialogResult::selected(&source),
        DialogResult::canceled(),
    ]);
    let mut session = DocumentSession::new();
    dispatcher.handle_open(&mut session).unwrap();

    dispatcher.handle_export(&session).unwrap();

    let requests = &dispatcher.selector_mut().requests;
    assert_eq!(requests[1], SAVE_FILTERS.to_vec());
    assert_eq!(requests[1][0].name, "PDF (*.pdf)");
}

#[test]
fn cancelled_export_emits_nothing() {
    let dir = tempdir().unwrap();
    let source = write_file(dir.path(), "readme.md", "# Hi");
    let (mut dispatcher, receiver) = dispatcher([
        DialogResult::selected(&source),
        DialogResult::canceled(),
    ]);
    let mut session = DocumentSession::new();
    dispatcher.handle_open(&mut session).unwrap();
    receiver.try_iter().for_each(drop);
    let before = session.clone();

    let outcome = dispatcher.handle_export(&session).unwrap();

    assert_eq!(outcome, CommandOutcome::Cancelled);
    assert_eq!(session, before);
    assert!(dispatcher.converter().pdf_calls.borrow().is_empty());
    assert!(receiver.try_recv().is_err());
}

#[test]
fn render_failure_is_reported_without_notification() {
    let dir = tempdir().unwrap();
    let source = write_file(dir.path(), "readme.md", "# Hi");
    let converter = RecordingConverter {
        pdf_error: Some(FormatError::RenderError("chrome crashed".to_string())),
        ..RecordingConverter::default()
    };
    let (mut dispatcher, receiver) = dispatcher_with(
        [
            DialogResult::selected(&source),
            DialogResult::selected("/tmp/out.pdf"),
        ],
        converter,
    );
    let mut session = DocumentSession::new();
    dispatcher.handle_open(&mut session).unwrap();
    receiver.try_iter().for_each(drop);

    let err = dispatcher.handle_export(&session).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Render);
    assert!(err.to_string().contains("chrome crashed"));
    assert!(receiver.try_recv().is_err());
    assert_eq!(session.source_path(), Some(source.as_path()));
}

#[test]
fn source_removed_after_open_fails_export() {
    let dir = tempdir().unwrap();
    let source = write_file(dir.path(), "readme.md", "# Hi");
    let (mut dispatcher, receiver) = dispatcher([
        DialogResult::selected(&source),
        DialogResult::selected("/tmp/out.pdf"),
    ]);
    let mut session = DocumentSession::new();
    dispatcher.handle_open(&mut session).unwrap();
    receiver.try_iter().for_each(drop);
    fs::remove_file(&source).unwrap();

    let err = dispatcher.handle_export(&session).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(dispatcher.converter().pdf_calls.borrow().is_empty());
    assert!(receiver.try_recv().is_err());
}

#[test]
fn repeated_exports_notify_once_each() {
    let dir = tempdir().unwrap();
    let source = write_file(dir.path(), "readme.md", "# Hi");
    let (mut dispatcher, receiver) = dispatcher([
        DialogResult::selected(&source),
        DialogResult::selected("/tmp/a.pdf"),
        DialogResult::selected("/tmp/b.pdf"),
    ]);
    let mut session = DocumentSession::new();
    dispatcher.handle_open(&mut session).unwrap();
    receiver.try_iter().for_each(drop);

    dispatcher.handle_export(&session).unwrap();
    dispatcher.handle_export(&session).unwrap();

    assert_eq!(
        receiver.try_iter().collect::<Vec<_>>(),
        vec![
            Notification::ExportCompleted {
                path: PathBuf::from("/tmp/a.pdf")
            },
            Notification::ExportCompleted {
                path: PathBuf::from("/tmp/b.pdf")
            },
        ]
    );
}
