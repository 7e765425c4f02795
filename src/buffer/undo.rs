//! Linear, transactional undo/redo log.
//!
//! Anvil's undo model is a flat stack of [`UndoRecord`]s with transaction
//! brackets, not the branching undo-tree the editor this crate grew out of
//! used: an expression always undoes as the single unit the user expects,
//! and there is exactly one redo line (any new edit after an undo discards
//! the old redo tail), matching the acme lineage this core targets.

use crate::character::Character;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoKind {
    Insert,
    Delete,
}

/// One reversible mutation, or a transaction bracket marker.
#[derive(Debug, Clone)]
pub enum UndoEntry {
    Record(UndoRecord),
    /// Marks the start of a group of records that undo/redo together.
    TransactionStart,
    TransactionEnd,
}

#[derive(Debug, Clone)]
pub struct UndoRecord {
    pub kind: UndoKind,
    pub rune_offset: usize,
    pub rune_len: usize,
    /// `None` exactly when `SaveDeletes` was off when this record was
    /// created; undoing it can only reposition, not restore text.
    pub saved_bytes: Option<Vec<Character>>,
    pub user_cursor_rune: usize,
}

/// The stack of `UndoEntry`s plus the mirrored redo stack.
#[derive(Debug, Clone, Default)]
pub struct UndoLog {
    undo_stack: Vec<UndoEntry>,
    redo_stack: Vec<UndoEntry>,
    /// Depth of currently open `StartTransaction` brackets; only the
    /// outermost bracket is recorded so nested transactions coalesce.
    transaction_depth: usize,
    save_deletes: bool,
}

impl UndoLog {
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            transaction_depth: 0,
            save_deletes: true,
        }
    }

    pub fn set_save_deletes(&mut self, v: bool) {
        self.save_deletes = v;
    }

    pub fn save_deletes(&self) -> bool {
        self.save_deletes
    }

    pub fn start_transaction(&mut self) {
        if self.transaction_depth == 0 {
            self.undo_stack.push(UndoEntry::TransactionStart);
        }
        self.transaction_depth += 1;
    }

    pub fn end_transaction(&mut self) {
        if self.transaction_depth == 0 {
            return;
        }
        self.transaction_depth -= 1;
        if self.transaction_depth == 0 {
            self.undo_stack.push(UndoEntry::TransactionEnd);
        }
    }

    pub fn in_transaction(&self) -> bool {
        self.transaction_depth > 0
    }

    /// Push a fresh mutation record; any prior redo history is discarded,
    /// matching the standard "new edit kills redo" rule.
    pub fn push(&mut self, mut record: UndoRecord) {
        if record.kind == UndoKind::Delete && !self.save_deletes {
            record.saved_bytes = None;
        }
        self.redo_stack.clear();
        self.undo_stack.push(UndoEntry::Record(record));
    }

    /// Pop the next undoable unit (a whole transaction if the top record sits
    /// inside brackets, or a single record otherwise) and move it to redo.
    pub fn undo(&mut self) -> Vec<UndoRecord> {
        self.pop_unit(true)
    }

    pub fn redo(&mut self) -> Vec<UndoRecord> {
        self.pop_unit(false)
    }

    fn pop_unit(&mut self, is_undo: bool) -> Vec<UndoRecord> {
        let (from, to) = if is_undo {
            (&mut self.undo_stack, &mut self.redo_stack)
        } else {
            (&mut self.redo_stack, &mut self.undo_stack)
        };

        let mut unit = Vec::new();
        match from.pop() {
            None => return unit,
            Some(UndoEntry::Record(r)) => {
                unit.push(r.clone());
                to.push(UndoEntry::Record(r));
            }
            Some(UndoEntry::TransactionEnd) => {
                to.push(UndoEntry::TransactionStart);
                loop {
                    match from.pop() {
                        Some(UndoEntry::Record(r)) => {
                            unit.push(r.clone());
                            to.push(UndoEntry::Record(r));
                        }
                        Some(UndoEntry::TransactionStart) => {
                            to.push(UndoEntry::TransactionEnd);
                            break;
                        }
                        Some(UndoEntry::TransactionEnd) | None => break,
                    }
                }
                unit.reverse();
            }
            Some(UndoEntry::TransactionStart) => {
                // Unbalanced bracket; treat as a no-op boundary.
                to.push(UndoEntry::TransactionStart);
            }
        }
        unit
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

#[cfg(test)]
#[path = "undo_tests.rs"]
mod tests;
