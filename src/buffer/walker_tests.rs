use super::*;
use crate::buffer::PieceTable;

#[test]
fn forward_and_backward_clamp_to_bounds() {
    let pt = PieceTable::from_str("hello");
    let mut w = pt.walker();
    assert_eq!(w.forward(3), 3);
    assert_eq!(w.forward(10), 5);
    assert_eq!(w.backward(100), 0);
}

#[test]
fn current_line_bounds_excludes_trailing_newline() {
    let pt = PieceTable::from_str("line1\nline2\nline3");
    let w = pt.walker_at(7);
    let b = w.current_line_bounds();
    assert_eq!(&pt.to_bytes()[b.start..b.end], b"line2");
    let incl = w.current_line_bounds_incl_nl();
    assert_eq!(&pt.to_bytes()[incl.start..incl.end], b"line2\n");
}

#[test]
fn word_bounds_split_identifier_space_symbol_runs() {
    let pt = PieceTable::from_str("foo_bar + baz");
    assert_eq!(pt.walker_at(0).current_identifier_bounds(), Some((0, 7)));
    assert_eq!(pt.walker_at(8).current_run_of_symbols_bounds(), Some((8, 9)));
    assert_eq!(pt.walker_at(7).current_run_of_spaces_bounds(), Some((7, 8)));
}

#[test]
fn balanced_bracket_scan_finds_enclosing_pair() {
    let pt = PieceTable::from_str("f(a, (b), c)");
    let w = pt.walker_at(6); // inside "(b)"
    assert_eq!(w.text_within_brackets_bounds(), Some((6, 7)));
    let w2 = pt.walker_at(3); // inside outer, before inner paren
    assert_eq!(w2.text_within_brackets_bounds(), Some((2, 11)));
}

#[test]
fn quote_scan_is_unambiguous_within_line() {
    let pt = PieceTable::from_str("say \"hello\" now");
    let w = pt.walker_at(7);
    assert_eq!(w.text_within_quotes_in_current_line(), Some((5, 10)));
}

#[test]
fn set_rune_pos_cache_records_byte_offset() {
    let pt = PieceTable::from_str("hello world");
    let mut w = pt.walker();
    let mut cache = crate::buffer::offset_cache::OffsetCache::new(1);
    w.set_rune_pos_cache(6, &mut cache);
    assert_eq!(w.rune_pos(), 6);
    assert_eq!(cache.nearest_at_or_before(6), Some((6, 6)));
}
