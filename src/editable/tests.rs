use super::*;
use crate::buffer::PieceTable;

#[test]
fn multi_cursor_insert_shifts_later_cursors() {
    let mut m = EditableModel::new(PieceTable::from_str("aa\naa\naa"));
    m.set_cursors(vec![0, 3, 6]);
    m.insert_text("X");
    assert_eq!(m.cursors(), &[1, 5, 9]);
    assert_eq!(String::from_utf8(m.text()).unwrap(), "Xaa\nXaa\nXaa");
}

#[test]
fn selection_replace_consumes_selected_text() {
    let mut m = EditableModel::new(PieceTable::from_str("hello world"));
    m.add_selection(Selection::new(0, 5));
    m.insert_text("bye");
    assert_eq!(String::from_utf8(m.text()).unwrap(), "bye world");
}

#[test]
fn selection_append_keeps_selected_text_and_appends() {
    let mut m = EditableModel::new(PieceTable::from_str("hello world"));
    m.add_selection(Selection::new(0, 5));
    m.set_typing_in_selected_text_action(TypingAction::AppendTextToSelections);
    m.insert_text("!");
    assert_eq!(String::from_utf8(m.text()).unwrap(), "hello! world");
}

#[test]
fn recently_typed_range_merges_contiguous_inserts() {
    let mut m = EditableModel::new(PieceTable::from_str(""));
    m.set_cursors(vec![0]);
    m.insert_text("a");
    m.insert_text("b");
    let r = m.recently_typed_range().unwrap();
    assert_eq!((r.start, r.end), (0, 2));
}

#[test]
fn escape_with_selections_collapses_to_line_start_cursors() {
    let mut m = EditableModel::new(PieceTable::from_str("line1\nline2\n"));
    m.add_selection(Selection::new(0, 8));
    m.apply_escape();
    assert_eq!(m.cursors(), &[0, 6]);
}

#[test]
fn escape_with_multiple_cursors_keeps_only_first() {
    let mut m = EditableModel::new(PieceTable::from_str("abcdef"));
    m.set_cursors(vec![1, 3, 5]);
    m.apply_escape();
    assert_eq!(m.cursors(), &[1]);
}

#[test]
fn matching_bracket_auto_insert_needs_even_cursor_count() {
    let mut m = EditableModel::new(PieceTable::from_str("aaaa"));
    m.set_cursors(vec![0, 2]);
    assert!(m.maybe_auto_insert_matching_bracket('('));
    assert_eq!(String::from_utf8(m.text()).unwrap(), "(aa)aa");
}

#[test]
fn odd_cursor_count_skips_auto_insert() {
    let mut m = EditableModel::new(PieceTable::from_str("aaaa"));
    m.set_cursors(vec![0, 2, 4]);
    assert!(!m.maybe_auto_insert_matching_bracket('('));
    assert_eq!(String::from_utf8(m.text()).unwrap(), "aaaa");
}

#[test]
fn immutable_range_blocks_insertion_inside_it() {
    let mut m = EditableModel::new(PieceTable::from_str("0123456789"));
    m.set_immutable_range(Some(Range { start: 2, end: 5 }));
    m.set_cursors(vec![3]);
    m.insert_text("X");
    assert_eq!(String::from_utf8(m.text()).unwrap(), "0123456789");
}

#[test]
fn shift_propagates_to_cursors_selections_and_top_left() {
    let mut m = EditableModel::new(PieceTable::from_str("0123456789"));
    m.set_cursors(vec![8]);
    m.add_selection(Selection::new(5, 7));
    m.top_left = 4;
    m.apply_shift(TextChange { offset_rune: 3, delta_rune: 2 });
    assert_eq!(m.cursors(), &[10]);
    assert_eq!(m.selections()[0].start, 7);
    assert_eq!(m.top_left, 6);
}

#[test]
fn undo_shifts_a_cursor_sitting_after_the_undone_insert() {
    let mut m = EditableModel::new(PieceTable::from_str("0123456789"));
    m.buffer.insert_str(3, "XY", 5);
    m.set_cursors(vec![9]);
    m.undo();
    assert_eq!(String::from_utf8(m.text()).unwrap(), "0123456789");
    assert_eq!(m.cursors(), &[7]);
}

#[test]
fn redo_shifts_a_cursor_sitting_after_the_redone_insert() {
    let mut m = EditableModel::new(PieceTable::from_str("0123456789"));
    m.buffer.insert_str(3, "XY", 5);
    m.undo();
    m.set_cursors(vec![7]);
    m.redo();
    assert_eq!(String::from_utf8(m.text()).unwrap(), "012XY3456789");
    assert_eq!(m.cursors(), &[9]);
}
