use super::*;

fn insert_record(offset: usize, len: usize) -> UndoRecord {
    UndoRecord {
        kind: UndoKind::Insert,
        rune_offset: offset,
        rune_len: len,
        saved_bytes: None,
        user_cursor_rune: offset + len,
    }
}

#[test]
fn undo_then_redo_returns_same_record() {
    let mut log = UndoLog::new();
    log.push(insert_record(0, 3));
    let undone = log.undo();
    assert_eq!(undone.len(), 1);
    assert!(log.can_redo());
    let redone = log.redo();
    assert_eq!(redone.len(), 1);
    assert!(!log.can_redo());
}

#[test]
fn new_edit_after_undo_clears_redo_stack() {
    let mut log = UndoLog::new();
    log.push(insert_record(0, 1));
    log.undo();
    assert!(log.can_redo());
    log.push(insert_record(0, 1));
    assert!(!log.can_redo());
}

#[test]
fn transaction_brackets_undo_as_one_group() {
    let mut log = UndoLog::new();
    log.start_transaction();
    log.push(insert_record(0, 1));
    log.push(insert_record(1, 1));
    log.push(insert_record(2, 1));
    log.end_transaction();

    let unit = log.undo();
    assert_eq!(unit.len(), 3);
    assert!(!log.can_undo());
    assert!(log.can_redo());

    let redone = log.redo();
    assert_eq!(redone.len(), 3);
}

#[test]
fn nested_transactions_coalesce_into_one_bracket() {
    let mut log = UndoLog::new();
    log.start_transaction();
    log.start_transaction();
    log.push(insert_record(0, 1));
    log.end_transaction();
    log.push(insert_record(1, 1));
    log.end_transaction();

    let unit = log.undo();
    assert_eq!(unit.len(), 2);
}
