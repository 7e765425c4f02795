//! Editable model: cursors, selections, immutable ranges, manual
//! highlights, and the typing/search/scroll policies layered on top of a
//! [`PieceTable`]. This is the thing the addressing interpreter, the
//! command dispatcher, and the (external) input layer all drive.

mod handler;
mod search;
mod selection;

pub use handler::EditableHandler;
pub use search::{SearchDirection, SearchMatch};
pub use selection::Selection;

use crate::buffer::undo::{UndoKind, UndoRecord};
use crate::buffer::{PieceTable, TextChange, TextChangeListener, Walker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingAction {
    ReplaceSelectionsWithText,
    AppendTextToSelections,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryPurpose {
    Select,
    Execute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightInterval {
    pub start: usize,
    pub end: usize,
    pub color: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// The editable model sitting over one [`PieceTable`]. `Window` wraps two
/// of these (tag and body).
pub struct EditableModel {
    pub buffer: PieceTable,
    cursors: Vec<usize>,
    selections: Vec<Selection>,
    primary: Option<usize>,
    primary_purpose: PrimaryPurpose,
    immutable_range: Option<Range>,
    pub top_left: usize,
    typing_action: TypingAction,
    recently_typed_range: Option<Range>,
    manual_highlights: Vec<HighlightInterval>,
    /// Saved state for the "undo just the auto-inserted closer" gesture.
    pending_bracket_match: Option<Vec<usize>>,
    /// Last block-paste payload, for the "clipboard == last stored pieces"
    /// detection rule.
    last_multi_clipboard: Vec<String>,
}

impl EditableModel {
    pub fn new(buffer: PieceTable) -> Self {
        Self {
            buffer,
            cursors: vec![0],
            selections: Vec::new(),
            primary: None,
            primary_purpose: PrimaryPurpose::Select,
            immutable_range: None,
            top_left: 0,
            typing_action: TypingAction::ReplaceSelectionsWithText,
            recently_typed_range: None,
            manual_highlights: Vec::new(),
            pending_bracket_match: None,
            last_multi_clipboard: Vec::new(),
        }
    }

    pub fn cursors(&self) -> &[usize] {
        &self.cursors
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    pub fn set_cursors(&mut self, mut cursors: Vec<usize>) {
        cursors.sort_unstable();
        cursors.dedup();
        self.cursors = if cursors.is_empty() { vec![0] } else { cursors };
    }

    /// Add a selection, truncating any existing selection it overlaps so
    /// the set stays pairwise disjoint.
    pub fn add_selection(&mut self, new_sel: Selection) {
        let mut result = Vec::with_capacity(self.selections.len() + 1);
        let mut incoming = new_sel;
        for existing in self.selections.drain(..) {
            if existing.end <= incoming.start || existing.start >= incoming.end {
                result.push(existing);
                continue;
            }
            // Overlap: truncate the existing selection to whichever side
            // doesn't intersect the new one; drop it if fully contained.
            if existing.start < incoming.start {
                result.push(Selection { start: existing.start, end: incoming.start, ..existing });
            }
            if existing.end > incoming.end {
                result.push(Selection { start: incoming.end, end: existing.end, ..existing });
            }
        }
        result.push(incoming);
        result.sort_by_key(|s| s.start);
        self.selections = result;
        self.typing_action = TypingAction::ReplaceSelectionsWithText;
    }

    pub fn clear_selections(&mut self) {
        self.selections.clear();
    }

    pub fn set_typing_in_selected_text_action(&mut self, action: TypingAction) {
        self.typing_action = action;
    }

    pub fn recently_typed_range(&self) -> Option<Range> {
        self.recently_typed_range
    }

    pub fn reset_typing_merge(&mut self) {
        self.recently_typed_range = None;
    }

    pub fn manual_highlights(&self) -> &[HighlightInterval] {
        &self.manual_highlights
    }

    pub fn add_manual_highlight(&mut self, h: HighlightInterval) {
        self.manual_highlights.push(h);
    }

    pub fn immutable_range(&self) -> Option<Range> {
        self.immutable_range
    }

    pub fn set_immutable_range(&mut self, range: Option<Range>) {
        self.immutable_range = range;
    }

    fn overlaps_immutable(&self, start: usize, end: usize) -> bool {
        self.immutable_range
            .map(|r| start < r.end && end > r.start)
            .unwrap_or(false)
    }

    /// Insert `text` at every cursor in ascending order, or replace/append
    /// to every selection per `typing_action`. Always one transaction.
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.buffer.start_transaction();
        if self.selections.is_empty() {
            self.insert_at_cursors(text);
        } else {
            self.insert_into_selections(text);
        }
        self.buffer.end_transaction();
    }

    fn insert_at_cursors(&mut self, text: &str) {
        let rune_len = text.chars().count();
        let mut shift = 0i64;
        let mut new_cursors = Vec::with_capacity(self.cursors.len());
        let cursors = self.cursors.clone();
        for cursor in cursors {
            let pos = (cursor as i64 + shift).max(0) as usize;
            if self.overlaps_immutable(pos, pos) {
                new_cursors.push(pos);
                continue;
            }
            self.buffer.insert_str(pos, text, pos + rune_len);
            shift += rune_len as i64;
            new_cursors.push(pos + rune_len);
        }
        self.cursors = new_cursors;
        self.merge_recently_typed(self.cursors.first().copied().unwrap_or(0), rune_len);
    }

    fn insert_into_selections(&mut self, text: &str) {
        let rune_len = text.chars().count();
        let mut shift = 0i64;
        let mut new_selections = Vec::with_capacity(self.selections.len());
        let selections = self.selections.clone();
        let replace = self.typing_action == TypingAction::ReplaceSelectionsWithText;
        for sel in selections {
            let start = (sel.start as i64 + shift).max(0) as usize;
            let end = (sel.end as i64 + shift).max(0) as usize;
            if self.overlaps_immutable(start, end) {
                new_selections.push(Selection { start, end, ..sel });
                continue;
            }
            if replace {
                self.buffer.delete(start, end - start, start);
                self.buffer.insert_str(start, text, start + rune_len);
                shift += rune_len as i64 - (end - start) as i64;
                new_selections.push(Selection { start, end: start + rune_len, ..sel });
            } else {
                self.buffer.insert_str(end, text, end + rune_len);
                shift += rune_len as i64;
                new_selections.push(Selection { start, end: end + rune_len, ..sel });
            }
        }
        self.selections = new_selections;
        self.typing_action = TypingAction::ReplaceSelectionsWithText;
    }

    fn merge_recently_typed(&mut self, start: usize, len: usize) {
        let new_range = Range { start, end: start + len };
        self.recently_typed_range = match self.recently_typed_range {
            Some(prev) if prev.end == start => Some(Range { start: prev.start, end: new_range.end }),
            _ => Some(new_range),
        };
    }

    /// Matching-bracket auto-insert: if `opener` is one of `([{<` and the
    /// cursor count is even, alternate cursors get the matching closer.
    pub fn maybe_auto_insert_matching_bracket(&mut self, opener: char) -> bool {
        self.auto_insert_matching_bracket_impl(opener)
    }

    fn bracket_pair(opener: char) -> Option<char> {
        match opener {
            '(' => Some(')'),
            '[' => Some(']'),
            '{' => Some('}'),
            '<' => Some('>'),
            _ => None,
        }
    }

    fn auto_insert_matching_bracket_impl(&mut self, opener: char) -> bool {
        let Some(closer) = Self::bracket_pair(opener) else { return false };
        if self.cursors.is_empty() || self.cursors.len() % 2 != 0 {
            return false;
        }
        self.pending_bracket_match = Some(self.cursors.clone());
        self.buffer.start_transaction();
        let mut shift = 0i64;
        let cursors = self.cursors.clone();
        let mut new_cursors = Vec::with_capacity(cursors.len());
        for (i, cursor) in cursors.iter().enumerate() {
            let pos = (*cursor as i64 + shift).max(0) as usize;
            let ch = if i % 2 == 0 { opener } else { closer };
            self.buffer.insert_str(pos, &ch.to_string(), pos + 1);
            shift += 1;
            new_cursors.push(pos + 1);
        }
        self.cursors = new_cursors;
        self.buffer.end_transaction();
        true
    }

    /// Escape policy: selections → line-start cursors; else
    /// multi-cursor → single cursor; else reselect `recently_typed_range`.
    pub fn apply_escape(&mut self) {
        if !self.selections.is_empty() {
            let mut new_cursors = Vec::new();
            for sel in &self.selections {
                let start_line = self.buffer.line_at_char(sel.start);
                let end_line = self.buffer.line_at_char(sel.end.saturating_sub(1).max(sel.start));
                for line in start_line..=end_line {
                    new_cursors.push(self.buffer.line_start_offset(line));
                }
            }
            self.selections.clear();
            self.set_cursors(new_cursors);
        } else if self.cursors.len() > 1 {
            self.cursors = vec![self.cursors[0]];
        } else if let Some(r) = self.recently_typed_range {
            self.selections = vec![Selection { start: r.start, end: r.end, adjust_side: selection::AdjustSide::Right }];
        }
    }

    /// Block paste: distribute `pieces` one-per-cursor when the editable
    /// has ≥2 cursors, no selections, and clipboard content matches the
    /// last stored multi-selection payload.
    pub fn try_block_paste(&mut self, clipboard_text: &str, pieces: &[String]) -> bool {
        if self.cursors.len() < 2 || !self.selections.is_empty() {
            return false;
        }
        let joined: String = pieces.concat();
        if joined != clipboard_text || pieces.len() != self.cursors.len() {
            return false;
        }
        self.buffer.start_transaction();
        let mut shift = 0i64;
        let cursors = self.cursors.clone();
        let mut new_selections = Vec::with_capacity(cursors.len());
        for (cursor, piece) in cursors.iter().zip(pieces.iter()) {
            let pos = (*cursor as i64 + shift).max(0) as usize;
            let len = piece.chars().count();
            self.buffer.insert_str(pos, piece, pos + len);
            shift += len as i64;
            new_selections.push(Selection { start: pos, end: pos + len, adjust_side: selection::AdjustSide::Right });
        }
        self.selections = new_selections;
        self.cursors.clear();
        self.buffer.end_transaction();
        self.last_multi_clipboard = pieces.to_vec();
        true
    }

    pub fn record_multi_clipboard(&mut self, pieces: Vec<String>) {
        self.last_multi_clipboard = pieces;
    }

    pub fn apply_shift(&mut self, change: TextChange) {
        let shift = |pos: &mut usize| {
            if *pos as i64 >= change.offset_rune as i64 {
                *pos = (*pos as i64 + change.delta_rune).max(change.offset_rune as i64) as usize;
            }
        };
        for c in &mut self.cursors {
            shift(c);
        }
        for s in &mut self.selections {
            shift(&mut s.start);
            shift(&mut s.end);
        }
        shift(&mut self.top_left);
        if let Some(r) = &mut self.immutable_range {
            shift(&mut r.start);
            shift(&mut r.end);
        }
        if let Some(r) = &mut self.recently_typed_range {
            shift(&mut r.start);
            shift(&mut r.end);
        }
        for h in &mut self.manual_highlights {
            shift(&mut h.start);
            shift(&mut h.end);
        }
    }

    pub fn walker(&self) -> Walker<'_> {
        self.buffer.walker()
    }

    pub fn text(&self) -> Vec<u8> {
        self.buffer.to_bytes()
    }

    pub fn scroll_one_line(&mut self, down: bool) {
        if down {
            let line = self.buffer.line_at_char(self.top_left) + 1;
            self.top_left = self.buffer.line_start_offset(line);
        } else {
            let line = self.buffer.line_at_char(self.top_left);
            self.top_left = self.buffer.line_start_offset(line.saturating_sub(1));
        }
    }

    pub fn scroll_one_page(&mut self, lines_per_page: usize, down: bool) {
        let line = self.buffer.line_at_char(self.top_left);
        let target = if down { line + lines_per_page } else { line.saturating_sub(lines_per_page) };
        self.top_left = self.buffer.line_start_offset(target.min(self.buffer.line_count().saturating_sub(1)));
    }

    /// After a cursor move, scroll the minimum amount needed to reveal it.
    pub fn ensure_cursor_visible(&mut self, primary_cursor: usize, viewport_lines: usize) {
        let cursor_line = self.buffer.line_at_char(primary_cursor);
        let top_line = self.buffer.line_at_char(self.top_left);
        if cursor_line < top_line {
            self.top_left = self.buffer.line_start_offset(cursor_line);
        } else if cursor_line >= top_line + viewport_lines {
            self.top_left = self.buffer.line_start_offset(cursor_line + 1 - viewport_lines);
        }
    }

    pub fn search_literal(&self, needle: &str, from: usize, dir: SearchDirection) -> Option<SearchMatch> {
        search::search_literal(&self.buffer, needle, from, dir)
    }

    pub fn search_regex(&self, re: &regex::Regex, from: usize, dir: SearchDirection) -> Option<SearchMatch> {
        search::search_regex(&self.buffer, re, from, dir)
    }

    /// Undo the most recent unit and shift cursors/selections/highlights to
    /// match, the same way a live edit would.
    pub fn undo(&mut self) -> Vec<UndoRecord> {
        let records = self.buffer.undo();
        for record in records.iter().rev() {
            if let Some(change) = undo_redo_change(record, true) {
                self.on_text_change(change);
            }
        }
        records
    }

    /// Redo the most recently undone unit and shift cursors/selections/
    /// highlights to match.
    pub fn redo(&mut self) -> Vec<UndoRecord> {
        let records = self.buffer.redo();
        for record in records.iter().rev() {
            if let Some(change) = undo_redo_change(record, false) {
                self.on_text_change(change);
            }
        }
        records
    }
}

/// The `TextChange` a given undo/redo record implies, mirroring exactly how
/// `PieceTable::undo`/`redo` mutate the tree for that record. `None` means
/// the record carried no recoverable text (past the `SaveDeletes` barrier),
/// so nothing shifts.
fn undo_redo_change(record: &UndoRecord, undoing: bool) -> Option<TextChange> {
    match (record.kind, undoing) {
        (UndoKind::Insert, true) => Some(TextChange {
            offset_rune: record.rune_offset,
            delta_rune: -(record.rune_len as i64),
        }),
        (UndoKind::Delete, true) => record.saved_bytes.as_ref().map(|bytes| TextChange {
            offset_rune: record.rune_offset,
            delta_rune: bytes.len() as i64,
        }),
        (UndoKind::Insert, false) => record.saved_bytes.as_ref().map(|bytes| TextChange {
            offset_rune: record.rune_offset,
            delta_rune: bytes.len() as i64,
        }),
        (UndoKind::Delete, false) => Some(TextChange {
            offset_rune: record.rune_offset,
            delta_rune: -(record.rune_len as i64),
        }),
    }
}

impl TextChangeListener for EditableModel {
    fn on_text_change(&mut self, change: TextChange) {
        self.apply_shift(change);
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
