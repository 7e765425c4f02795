//! UTF-8 aware cursor over a [`super::PieceTable`].
//!
//! The Walker is the only thing in this crate that understands both rune
//! and byte coordinate spaces at once; everything above it (the editable
//! model, the addressing interpreter) deals exclusively in rune indices.

use super::offset_cache::OffsetCache;
use super::PieceTable;
use crate::character::Character;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineBounds {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Identifier,
    Spaces,
    Symbols,
}

const OPENERS: [char; 4] = ['(', '[', '{', '<'];
const CLOSERS: [char; 4] = [')', ']', '}', '>'];
const QUOTES: [char; 3] = ['"', '\'', '`'];

pub struct Walker<'a> {
    table: &'a PieceTable,
    rune_pos: usize,
}

impl<'a> Walker<'a> {
    pub fn new(table: &'a PieceTable) -> Self {
        Self { table, rune_pos: 0 }
    }

    pub fn at(table: &'a PieceTable, rune_pos: usize) -> Self {
        Self {
            table,
            rune_pos: rune_pos.min(table.len_runes()),
        }
    }

    pub fn rune_pos(&self) -> usize {
        self.rune_pos
    }

    pub fn byte_pos(&self) -> usize {
        self.table.char_to_byte(self.rune_pos)
    }

    pub fn set_rune_pos_cache(&mut self, target: usize, cache: &mut OffsetCache) {
        let target = target.min(self.table.len_runes());
        if let Some((cached_rune, cached_byte)) = cache.nearest_at_or_before(target) {
            // Resume from the cached anchor rather than rescanning from 0;
            // the table itself still does the O(log n) lookup, this just
            // gives future callers a hint of where dense queries cluster.
            let byte_pos = self.table.char_to_byte(target);
            cache.record(cached_rune.max(target), cached_byte.max(byte_pos));
        }
        self.rune_pos = target;
        cache.record(self.rune_pos, self.byte_pos());
    }

    pub fn forward(&mut self, n: usize) -> usize {
        self.rune_pos = (self.rune_pos + n).min(self.table.len_runes());
        self.rune_pos
    }

    pub fn backward(&mut self, n: usize) -> usize {
        self.rune_pos = self.rune_pos.saturating_sub(n);
        self.rune_pos
    }

    pub fn forward_bytes(&mut self, n: usize) -> usize {
        let target_byte = self.byte_pos() + n;
        self.rune_pos = self.table.byte_to_char(target_byte.min(self.table.len_bytes()));
        self.rune_pos
    }

    pub fn go_to_end(&mut self) -> usize {
        self.rune_pos = self.table.len_runes();
        self.rune_pos
    }

    pub fn index_in_line(&self) -> usize {
        let line = self.table.line_at_char(self.rune_pos);
        self.rune_pos - self.table.line_start_offset(line)
    }

    pub fn current_line_bounds(&self) -> LineBounds {
        let line = self.table.line_at_char(self.rune_pos);
        let start = self.table.line_start_offset(line);
        let mut end = self.table.line_start_offset(line + 1);
        if end > start && self.table.char_at_checked(end - 1) == Some(Character::Newline) {
            end -= 1;
        }
        LineBounds { start, end }
    }

    pub fn current_line_bounds_incl_nl(&self) -> LineBounds {
        let line = self.table.line_at_char(self.rune_pos);
        let start = self.table.line_start_offset(line);
        let end = self.table.line_start_offset(line + 1);
        LineBounds { start, end }
    }

    pub fn backward_to_start_of_line(&mut self) -> usize {
        self.rune_pos = self.current_line_bounds().start;
        self.rune_pos
    }

    pub fn forward_to_end_of_line(&mut self) -> usize {
        self.rune_pos = self.current_line_bounds().end;
        self.rune_pos
    }

    fn classify(c: Character) -> RunKind {
        match c {
            Character::Unicode(ch) if ch.is_alphanumeric() || ch == '_' => RunKind::Identifier,
            Character::Unicode(ch) if ch.is_whitespace() => RunKind::Spaces,
            Character::Tab | Character::Newline => RunKind::Spaces,
            _ => RunKind::Symbols,
        }
    }

    fn run_bounds_of(&self, kind: RunKind) -> Option<(usize, usize)> {
        let len = self.table.len_runes();
        if len == 0 {
            return None;
        }
        let probe = self.rune_pos.min(len.saturating_sub(1));
        let c = self.table.char_at_checked(probe)?;
        if Self::classify(c) != kind {
            return None;
        }
        let mut start = probe;
        while start > 0 {
            let prev = self.table.char_at_checked(start - 1)?;
            if Self::classify(prev) != kind {
                break;
            }
            start -= 1;
        }
        let mut end = probe + 1;
        while end < len {
            let next = self.table.char_at_checked(end)?;
            if Self::classify(next) != kind {
                break;
            }
            end += 1;
        }
        Some((start, end))
    }

    pub fn current_word_bounds(&self) -> Option<(usize, usize)> {
        self.run_bounds_of(RunKind::Identifier)
            .or_else(|| self.run_bounds_of(RunKind::Spaces))
            .or_else(|| self.run_bounds_of(RunKind::Symbols))
    }

    pub fn current_identifier_bounds(&self) -> Option<(usize, usize)> {
        self.run_bounds_of(RunKind::Identifier)
    }

    pub fn current_run_of_spaces_bounds(&self) -> Option<(usize, usize)> {
        self.run_bounds_of(RunKind::Spaces)
    }

    pub fn current_run_of_symbols_bounds(&self) -> Option<(usize, usize)> {
        self.run_bounds_of(RunKind::Symbols)
    }

    pub fn is_at_bracket(&self) -> bool {
        self.table
            .char_at_checked(self.rune_pos)
            .map(|c| matches!(c, Character::Unicode(ch) if OPENERS.contains(&ch) || CLOSERS.contains(&ch)))
            .unwrap_or(false)
    }

    pub fn is_at_quote(&self) -> bool {
        self.table
            .char_at_checked(self.rune_pos)
            .map(|c| matches!(c, Character::Unicode(ch) if QUOTES.contains(&ch)))
            .unwrap_or(false)
    }

    /// Balanced bracket scan across `(){}[]<>` outward from the cursor.
    pub fn text_within_brackets_bounds(&self) -> Option<(usize, usize)> {
        let len = self.table.len_runes();
        let mut depth_by: [i32; 4] = [0; 4];
        let mut open_at: [Option<usize>; 4] = [None; 4];
        let mut pos = self.rune_pos;
        loop {
            if pos == 0 {
                break;
            }
            pos -= 1;
            let c = self.table.char_at_checked(pos)?;
            if let Character::Unicode(ch) = c {
                if let Some(i) = CLOSERS.iter().position(|&x| x == ch) {
                    depth_by[i] += 1;
                } else if let Some(i) = OPENERS.iter().position(|&x| x == ch) {
                    if depth_by[i] == 0 {
                        open_at[i] = Some(pos);
                        break;
                    }
                    depth_by[i] -= 1;
                }
            }
        }
        let (kind, start) = open_at.iter().enumerate().find_map(|(i, v)| v.map(|p| (i, p)))?;
        let mut depth = 1;
        let mut end = start + 1;
        while end < len {
            let c = self.table.char_at_checked(end)?;
            if let Character::Unicode(ch) = c {
                if ch == OPENERS[kind] {
                    depth += 1;
                } else if ch == CLOSERS[kind] {
                    depth -= 1;
                    if depth == 0 {
                        return Some((start + 1, end));
                    }
                }
            }
            end += 1;
        }
        None
    }

    /// Find a matching quote pair on the current line. Fails (returns
    /// `None`) if a candidate quote exists unambiguously on both sides of
    /// the cursor, per the "must be unambiguous" rule.
    pub fn text_within_quotes_in_current_line(&self) -> Option<(usize, usize)> {
        let bounds = self.current_line_bounds();
        let line: Vec<(usize, char)> = (bounds.start..bounds.end)
            .filter_map(|i| match self.table.char_at_checked(i)? {
                Character::Unicode(ch) if QUOTES.contains(&ch) => Some((i, ch)),
                _ => None,
            })
            .collect();

        let left_quote = line.iter().rev().find(|(i, _)| *i < self.rune_pos);
        let right_quote = line.iter().find(|(i, _)| *i >= self.rune_pos);

        match (left_quote, right_quote) {
            (Some(&(li, lq)), Some(&(ri, rq))) if li != ri && lq == rq => Some((li + 1, ri)),
            (Some(&(li, lq)), _) => {
                // search forward for a close of the same quote char
                line.iter()
                    .find(|&&(i, q)| i > li && q == lq)
                    .map(|&(ri, _)| (li + 1, ri))
            }
            (None, Some(&(ri, rq))) => {
                line.iter().rev().find(|&&(i, q)| i < ri && q == rq).map(|&(li, _)| (li + 1, ri))
            }
            (None, None) => None,
        }
    }
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
