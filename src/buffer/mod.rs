//! Piece-table text store with multi-level undo/redo and transactional
//! batching: the AVL piece tree does storage, [`undo::UndoLog`]
//! does history, this module wires the two together with listener
//! notification, the "equal to disk" mark bit, and the single-writer rule.

pub mod offset_cache;
pub mod piece_table;
pub mod undo;
pub mod walker;

use crate::character::Character;
use offset_cache::OffsetCache;
use piece_table::PieceTree;
use undo::{UndoKind, UndoLog, UndoRecord};
pub use walker::Walker;

/// Notification fired to every listener on each mutation. `delta_rune` is
/// signed: negative for a deletion, positive for an insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChange {
    pub offset_rune: usize,
    pub delta_rune: i64,
}

pub trait TextChangeListener {
    fn on_text_change(&mut self, change: TextChange);
}

/// Text buffer: piece tree + undo log + mark bit + listeners.
///
/// Mutation is guarded by a single-writer flag rather than a real mutex —
/// the whole table lives on one thread (the main loop, per the concurrency
/// model); a listener attempting to mutate re-entrantly is a programming
/// error, caught here rather than risking a deadlock that can't happen on a
/// single thread anyway.
pub struct PieceTable {
    tree: PieceTree,
    undo: UndoLog,
    offset_cache: OffsetCache,
    marked: bool,
    writer_locked: bool,
    listeners: Vec<Box<dyn TextChangeListener>>,
}

impl PieceTable {
    pub fn new(original: Vec<Character>) -> Self {
        Self {
            tree: PieceTree::new(original),
            undo: UndoLog::new(),
            offset_cache: OffsetCache::default(),
            marked: false,
            writer_locked: false,
            listeners: Vec::new(),
        }
    }

    pub fn from_str(s: &str) -> Self {
        Self::new(s.chars().map(Character::from).collect())
    }

    pub fn len_bytes(&self) -> usize {
        self.tree.byte_len()
    }

    pub fn len_runes(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Zero-copy iteration over the logical rune stream.
    pub fn bytes_view(&self) -> impl Iterator<Item = Character> + '_ {
        self.tree.iter()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.tree.to_logical_bytes()
    }

    pub fn char_at_checked(&self, rune_pos: usize) -> Option<Character> {
        self.tree.get(rune_pos)
    }

    pub fn char_to_byte(&self, rune_pos: usize) -> usize {
        self.tree.char_to_byte(rune_pos)
    }

    pub fn byte_to_char(&self, byte_pos: usize) -> usize {
        self.tree.byte_to_char(byte_pos)
    }

    pub fn line_at_char(&self, rune_pos: usize) -> usize {
        self.tree.line_at_char(rune_pos)
    }

    pub fn line_start_offset(&self, line: usize) -> usize {
        self.tree.line_start_offset(line)
    }

    pub fn line_count(&self) -> usize {
        self.tree.get_line_count()
    }

    pub fn chars_in_range(&self, range: std::ops::Range<usize>) -> Vec<Character> {
        self.tree.chars_in_range(range)
    }

    pub fn add_listener(&mut self, listener: Box<dyn TextChangeListener>) {
        self.listeners.push(listener);
    }

    fn notify(&mut self, change: TextChange) {
        for l in &mut self.listeners {
            l.on_text_change(change);
        }
    }

    fn with_writer_lock<F: FnOnce(&mut Self)>(&mut self, f: F) {
        if self.writer_locked {
            // Concurrency-rule violation: a listener tried to mutate the
            // table re-entrantly. Silently no-op per the error taxonomy.
            return;
        }
        self.writer_locked = true;
        f(self);
        self.writer_locked = false;
    }

    /// Out-of-range positions are clamped rather than erroring.
    pub fn insert(&mut self, rune_off: usize, text: &[Character], user_cursor: usize) {
        if text.is_empty() {
            return;
        }
        let pos = rune_off.min(self.tree.len());
        self.with_writer_lock(|this| {
            this.tree.insert(pos, text);
            this.offset_cache.invalidate_from(pos);
            this.marked = false;
            this.undo.push(UndoRecord {
                kind: UndoKind::Insert,
                rune_offset: pos,
                rune_len: text.len(),
                // An insert's inverse is a delete, so nothing needs saving
                // for undo; redo re-inserts, so the original text is kept
                // here under the same field rather than duplicating it.
                saved_bytes: Some(text.to_vec()),
                user_cursor_rune: user_cursor,
            });
            this.notify(TextChange {
                offset_rune: pos,
                delta_rune: text.len() as i64,
            });
        });
    }

    pub fn insert_str(&mut self, rune_off: usize, s: &str, user_cursor: usize) {
        let chars: Vec<Character> = s.chars().map(Character::from).collect();
        self.insert(rune_off, &chars, user_cursor);
    }

    pub fn delete(&mut self, rune_off: usize, rune_len: usize, user_cursor: usize) {
        let len = self.tree.len();
        let start = rune_off.min(len);
        let end = (rune_off + rune_len).min(len);
        if start >= end {
            return;
        }
        self.with_writer_lock(|this| {
            let removed = this.tree.delete(start..end);
            this.offset_cache.invalidate_from(start);
            this.marked = false;
            let saved_bytes = if this.undo.save_deletes() { Some(removed) } else { None };
            this.undo.push(UndoRecord {
                kind: UndoKind::Delete,
                rune_offset: start,
                rune_len: end - start,
                saved_bytes,
                user_cursor_rune: user_cursor,
            });
            this.notify(TextChange {
                offset_rune: start,
                delta_rune: -((end - start) as i64),
            });
        });
    }

    /// Undo the most recent unit (single record, or whole transaction).
    /// Returns the records undone, in chronological order.
    pub fn undo(&mut self) -> Vec<UndoRecord> {
        if self.writer_locked {
            return Vec::new();
        }
        let records = self.undo.undo();
        self.writer_locked = true;
        // `records` comes back in chronological order; undo a transaction
        // in reverse so later edits (whose offsets depend on earlier ones
        // already being applied) are unwound first.
        for record in records.iter().rev() {
            match record.kind {
                UndoKind::Insert => {
                    self.tree.delete(record.rune_offset..record.rune_offset + record.rune_len);
                    self.offset_cache.invalidate_from(record.rune_offset);
                    self.notify(TextChange {
                        offset_rune: record.rune_offset,
                        delta_rune: -(record.rune_len as i64),
                    });
                }
                UndoKind::Delete => {
                    if let Some(bytes) = &record.saved_bytes {
                        self.tree.insert(record.rune_offset, bytes);
                        self.offset_cache.invalidate_from(record.rune_offset);
                        self.notify(TextChange {
                            offset_rune: record.rune_offset,
                            delta_rune: bytes.len() as i64,
                        });
                    }
                    // else: past the SaveDeletes barrier, text is
                    // unrecoverable; only the cursor reposition applies.
                }
            }
        }
        self.writer_locked = false;
        self.marked = false;
        records
    }

    /// Redo re-applies the forward edits of the most recently undone unit.
    pub fn redo(&mut self) -> Vec<UndoRecord> {
        if self.writer_locked {
            return Vec::new();
        }
        let records = self.undo.redo();
        self.writer_locked = true;
        // `records` comes back in undo order (most recent first); replay
        // forward in chronological order.
        for record in records.iter().rev() {
            match record.kind {
                UndoKind::Insert => {
                    if let Some(bytes) = &record.saved_bytes {
                        self.tree.insert(record.rune_offset, bytes);
                        self.offset_cache.invalidate_from(record.rune_offset);
                        self.notify(TextChange {
                            offset_rune: record.rune_offset,
                            delta_rune: bytes.len() as i64,
                        });
                    }
                }
                UndoKind::Delete => {
                    self.tree.delete(record.rune_offset..record.rune_offset + record.rune_len);
                    self.offset_cache.invalidate_from(record.rune_offset);
                    self.notify(TextChange {
                        offset_rune: record.rune_offset,
                        delta_rune: -(record.rune_len as i64),
                    });
                }
            }
        }
        self.writer_locked = false;
        self.marked = false;
        records
    }

    pub fn start_transaction(&mut self) {
        self.undo.start_transaction();
    }

    pub fn end_transaction(&mut self) {
        self.undo.end_transaction();
    }

    pub fn in_transaction(&self) -> bool {
        self.undo.in_transaction()
    }

    pub fn mark(&mut self) {
        self.marked = true;
    }

    pub fn is_marked(&self) -> bool {
        self.marked
    }

    pub fn set_save_deletes(&mut self, v: bool) {
        self.undo.set_save_deletes(v);
    }

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    pub fn walker(&self) -> Walker<'_> {
        Walker::new(self)
    }

    pub fn walker_at(&self, rune_pos: usize) -> Walker<'_> {
        Walker::at(self, rune_pos)
    }

    pub fn offset_cache_mut(&mut self) -> &mut OffsetCache {
        &mut self.offset_cache
    }
}

impl std::fmt::Display for PieceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in self.tree.iter() {
            c.render(f)?;
        }
        Ok(())
    }
}
