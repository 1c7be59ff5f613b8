use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use super::*;
use crate::questions::sample_questions;

fn journal_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}

fn short_session() -> Vec<Action> {
    vec![
        Action::Load { questions: sample_questions() },
        Action::SelectChoice { index: 3 },
        Action::LockIn,
        Action::Next,
    ]
}

fn write_session(path: &Path, actions: &[Action]) -> JournalWriter {
    let mut writer = JournalWriter::create(path, 42, "test-build").unwrap();
    for action in actions {
        writer.append(action).unwrap();
    }
    writer
}

#[test]
fn header_and_records_survive_a_round_trip() {
    let dir = tempdir().unwrap();
    let path = journal_path(dir.path(), "session.jsonl");
    write_session(&path, &short_session());

    let loaded = load_journal_from_file(&path).unwrap();
    assert_eq!(loaded.journal.format_version, JOURNAL_FORMAT_VERSION);
    assert_eq!(loaded.journal.build_id, "test-build");
    assert_eq!(loaded.journal.seed, 42);
    assert_eq!(loaded.next_seq, 4);
    assert_ne!(loaded.last_sha256_hex, GENESIS_HASH);

    let actions: Vec<Action> = loaded.journal.actions().cloned().collect();
    assert_eq!(actions, short_session());
    let seqs: Vec<u64> = loaded.journal.inputs.iter().map(|record| record.seq).collect();
    assert_eq!(seqs, vec![0, 1, 2, 3]);
}

#[test]
fn tampered_action_breaks_the_chain() {
    let dir = tempdir().unwrap();
    let path = journal_path(dir.path(), "tampered.jsonl");
    write_session(&path, &short_session());

    let content = fs::read_to_string(&path).unwrap();
    let tampered = content.replace(r#""index":3"#, r#""index":0"#);
    assert_ne!(content, tampered, "fixture should contain the selected index");
    fs::write(&path, tampered).unwrap();

    let result = load_journal_from_file(&path);
    assert!(
        matches!(result, Err(JournalLoadError::HashChainBroken { line: 3 })),
        "expected chain break at line 3, got: {result:?}"
    );
}

#[test]
fn removed_record_is_reported_as_out_of_sequence() {
    let dir = tempdir().unwrap();
    let path = journal_path(dir.path(), "gap.jsonl");
    write_session(&path, &short_session());

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);
    fs::write(&path, format!("{}\n{}\n{}\n", lines[0], lines[1], lines[3])).unwrap();

    let result = load_journal_from_file(&path);
    assert!(
        matches!(result, Err(JournalLoadError::InvalidRecord { line: 3, .. })),
        "expected sequence error at line 3, got: {result:?}"
    );
}

#[test]
fn truncated_tail_is_rejected() {
    let dir = tempdir().unwrap();
    let path = journal_path(dir.path(), "truncated.jsonl");
    write_session(&path, &short_session());

    let content = fs::read_to_string(&path).unwrap();
    fs::write(&path, &content[..content.len() - 10]).unwrap();

    let result = load_journal_from_file(&path);
    assert!(matches!(result, Err(JournalLoadError::IncompleteLine { line: 5 })));
}

#[test]
fn empty_and_garbled_headers_are_rejected() {
    let dir = tempdir().unwrap();
    let empty = journal_path(dir.path(), "empty.jsonl");
    fs::write(&empty, "").unwrap();
    assert!(matches!(load_journal_from_file(&empty), Err(JournalLoadError::EmptyFile)));

    let garbled = journal_path(dir.path(), "garbled.jsonl");
    fs::write(&garbled, "not json\n").unwrap();
    assert!(matches!(
        load_journal_from_file(&garbled),
        Err(JournalLoadError::InvalidHeader { line: 1, .. })
    ));
}

#[test]
fn missing_file_surfaces_io_error() {
    let dir = tempdir().unwrap();
    let result = load_journal_from_file(&journal_path(dir.path(), "absent.jsonl"));
    assert!(matches!(result, Err(JournalLoadError::Io(_))));
}

#[test]
fn resumed_writer_extends_the_same_chain() {
    let dir = tempdir().unwrap();
    let path = journal_path(dir.path(), "resume.jsonl");
    let session = short_session();
    drop(write_session(&path, &session[..2]));

    let loaded = load_journal_from_file(&path).unwrap();
    let mut writer = JournalWriter::resume(&path, &loaded).unwrap();
    assert_eq!(writer.next_seq(), 2);
    for action in &session[2..] {
        writer.append(action).unwrap();
    }
    drop(writer);

    let reloaded = load_journal_from_file(&path).unwrap();
    assert_eq!(reloaded.next_seq, 4);
    let actions: Vec<Action> = reloaded.journal.actions().cloned().collect();
    assert_eq!(actions, session);
}
