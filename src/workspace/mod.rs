//! Workspace hierarchy: Window, Column, Editor — the container
//! tree the Packer arranges geometrically and the dispatcher
//! addresses by id. This is the single-threaded main-loop owner of
//! every `EditableModel` in the process; background work only reaches
//! it through `WorkItem`s pushed onto a channel.

pub mod panic_capture;

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::address::AddrRange;
use crate::cmdhistory::{CommandHistory, Lru};
use crate::dispatch;
use crate::editable::EditableModel;
use crate::error::{AnvilError, ErrorSink, Result};
use crate::global_path::GlobalPath;
use crate::packer::{ItemId, Packer};

pub type WindowId = ItemId;
pub type ColumnId = ItemId;

/// A named position saved by the user (`k` mark in the address grammar).
#[derive(Debug, Clone)]
pub struct Mark {
    pub file: GlobalPath,
    pub rune_pos: usize,
}

/// A job kind as tracked in the editor's running-jobs list; the actual
/// execution machinery lives in `job_manager`/`dispatch::exec` — this is
/// just the bookkeeping record plus the `start_next` linked-list used to
/// serialize `>cmd` fan-out over multiple selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Load,
    Save,
    Exec,
    Expr,
}

pub struct Job {
    pub name: String,
    pub kind: JobKind,
    pub cancel_token: mpsc::Sender<()>,
    pub start_next: Option<Box<Job>>,
}

/// A unit of work submitted onto the editor's single work channel from a
/// background thread/task (process I/O, SSH session, file load/save).
/// `service` runs on the main loop and returns `true` when the item is
/// fully done.
pub type WorkItem = Box<dyn FnOnce(&mut Editor) -> bool + Send>;

pub struct Window {
    pub id: WindowId,
    pub column: ColumnId,
    pub path: GlobalPath,
    pub tag: EditableModel,
    pub body: EditableModel,
    /// `Some` when this window is a clone sharing its body's piece table
    /// with another window; cloned windows keep independent tag/top-left
    /// state but the same underlying buffer.
    pub clone_of: Option<WindowId>,
}

impl Window {
    pub fn global_path(&self) -> String {
        self.path.display()
    }
}

pub struct Column {
    pub id: ColumnId,
    pub tag: EditableModel,
    pub windows: Packer,
}

/// The process-wide editor singleton: one per process, holding every
/// column/window, the packer states for both axes, recent-files LRU,
/// marks, running jobs, and the work channel that serializes all
/// cross-thread mutation onto this struct.
pub struct Editor {
    pub column_order: Packer,
    pub column_table: HashMap<ColumnId, Column>,
    pub window_table: HashMap<WindowId, Window>,
    /// Which column each window belongs to, kept in step with
    /// `Column::windows` so a window can be looked up without scanning
    /// every column.
    window_column: HashMap<WindowId, ColumnId>,
    header_height: f64,
    max_space: f64,
    pub recent_files: Lru<String>,
    pub marks: HashMap<String, Mark>,
    pub jobs: Vec<Job>,
    pub history: CommandHistory,
    pub work_tx: Sender<WorkItem>,
    work_rx: Receiver<WorkItem>,
}

impl Editor {
    pub fn new(header_height: f64, max_space: f64) -> Self {
        let (work_tx, work_rx) = mpsc::channel();
        Self {
            column_order: Packer::new(header_height, max_space),
            column_table: HashMap::new(),
            window_table: HashMap::new(),
            window_column: HashMap::new(),
            header_height,
            max_space,
            recent_files: Lru::default(),
            marks: HashMap::new(),
            jobs: Vec::new(),
            history: CommandHistory::new(),
            work_tx,
            work_rx,
        }
    }

    pub fn work_sender(&self) -> Sender<WorkItem> {
        self.work_tx.clone()
    }

    /// Drain and service every work item currently queued. Called once
    /// per main-loop iteration; never blocks.
    pub fn drain_work(&mut self) {
        while let Ok(item) = self.work_rx.try_recv() {
            item(self);
        }
    }

    pub fn add_column(&mut self) -> ColumnId {
        let id = self.column_order.pack(1)[0];
        self.column_table.insert(
            id,
            Column {
                id,
                tag: EditableModel::new(crate::buffer::PieceTable::new(Vec::new())),
                windows: Packer::new(self.header_height, self.max_space),
            },
        );
        id
    }

    pub fn remove_column(&mut self, id: ColumnId) {
        if let Some(col) = self.column_table.remove(&id) {
            for win in col.windows.items_in_order() {
                self.window_table.remove(&win.id);
                self.window_column.remove(&win.id);
            }
        }
        self.column_order.remove(id);
    }

    pub fn add_window(&mut self, column: ColumnId, path: GlobalPath, body: EditableModel) -> Option<WindowId> {
        let col = self.column_table.get_mut(&column)?;
        let id = col.windows.pack(1)[0];
        self.window_table.insert(
            id,
            Window {
                id,
                column,
                path,
                tag: EditableModel::new(crate::buffer::PieceTable::new(Vec::new())),
                body,
                clone_of: None,
            },
        );
        self.window_column.insert(id, column);
        Some(id)
    }

    pub fn remove_window(&mut self, id: WindowId) {
        if let Some(win) = self.window_table.remove(&id) {
            if let Some(col) = self.column_table.get_mut(&win.column) {
                col.windows.remove(id);
            }
        }
        self.window_column.remove(&id);
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.window_table.get(&id)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.window_table.get_mut(&id)
    }

    pub fn column_of(&self, window: WindowId) -> Option<ColumnId> {
        self.window_column.get(&window).copied()
    }

    /// Windows in a column, already in vertical (`top_y`) order — the
    /// packer's insertion order *is* that order, since every layout
    /// operation preserves relative ordering.
    pub fn windows_sorted_by_top_y(&self, column: ColumnId) -> Vec<WindowId> {
        self.column_table
            .get(&column)
            .map(|c| c.windows.items_in_order().into_iter().map(|p| p.id).collect())
            .unwrap_or_default()
    }

    pub fn columns_sorted_by_left_x(&self) -> Vec<ColumnId> {
        self.column_order.items_in_order().into_iter().map(|p| p.id).collect()
    }

    /// Run a `!`-prefixed addressing expression (`Resolved::Expression`)
    /// against a window's body, tracked in `jobs` like any other running
    /// command; errors and `p`/`=` output go to `sink`.
    pub fn run_expression(
        &mut self,
        window: WindowId,
        expr_src: &str,
        sink: &mut dyn ErrorSink,
    ) -> Result<Vec<AddrRange>> {
        let dir = self
            .window(window)
            .ok_or_else(|| AnvilError::user(crate::constants::errors::NO_SUCH_WINDOW, "no such window"))?
            .global_path();

        let (cancel_tx, _cancel_rx) = mpsc::channel();
        self.jobs.push(Job {
            name: expr_src.to_string(),
            kind: JobKind::Expr,
            cancel_token: cancel_tx,
            start_next: None,
        });

        let result = (|| {
            let win = self
                .window_table
                .get_mut(&window)
                .ok_or_else(|| AnvilError::user(crate::constants::errors::NO_SUCH_WINDOW, "no such window"))?;
            dispatch::run_expression(expr_src, &mut win.body, sink, &dir)
        })();

        self.jobs.retain(|j| !(j.kind == JobKind::Expr && j.name == expr_src));
        result
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
