use super::*;
use crate::character::Character;

fn chars(s: &str) -> Vec<Character> {
    s.chars().map(Character::from).collect()
}

#[test]
fn insert_into_empty_and_middle() {
    let mut t = PieceTree::new(Vec::new());
    t.insert(0, &chars("hello"));
    t.insert(5, &chars(" world"));
    t.insert(5, &chars(","));
    assert_eq!(t.to_logical_bytes(), b"hello, world");
}

#[test]
fn delete_spanning_pieces() {
    let mut t = PieceTree::new(chars("hello "));
    t.insert(6, &chars("world"));
    let removed = t.delete(4..7);
    assert_eq!(removed, chars("o w"));
    assert_eq!(t.to_logical_bytes(), b"hellrld");
}

#[test]
fn line_indexing_tracks_newlines_across_pieces() {
    let mut t = PieceTree::new(chars("line1\n"));
    t.insert(6, &chars("line2\nline3"));
    assert_eq!(t.get_line_count(), 3);
    assert_eq!(t.line_start_offset(1), 6);
    assert_eq!(t.line_start_offset(2), 12);
    assert_eq!(t.line_at_char(7), 1);
}

#[test]
fn byte_and_char_offsets_round_trip_with_multibyte_runes() {
    let t = PieceTree::new(chars("a\u{00e9}b")); // a, e-acute (2 bytes), b
    assert_eq!(t.char_to_byte(0), 0);
    assert_eq!(t.char_to_byte(1), 1);
    assert_eq!(t.char_to_byte(2), 3);
    assert_eq!(t.byte_to_char(3), 2);
}

#[test]
fn many_inserts_stay_balanced_and_correct() {
    let mut t = PieceTree::new(Vec::new());
    for i in 0..500 {
        t.insert(t.len(), &chars(&i.to_string()));
    }
    let expected: String = (0..500).map(|i| i.to_string()).collect();
    assert_eq!(t.to_logical_bytes(), expected.as_bytes());
}
