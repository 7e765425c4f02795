//! Control-plane API: a synchronous HTTP + websocket surface over
//! the editor's main work channel, built on `tiny_http` and
//! `tungstenite` — there's no HTTP/websocket crate anywhere else in the
//! retrieval pack, so this is the minimal pairing consistent with the
//! single-threaded main-loop model.

pub mod csv;
pub mod session;

use std::collections::VecDeque;

pub use session::{Session, SessionId, SessionStore};

use serde::{Deserialize, Serialize};

use crate::constants::api::NOTIFICATION_QUEUE_CAPACITY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationOp {
    Insert,
    Delete,
    Exec,
    Put,
    FileClosed,
    FileOpened,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "WinId")]
    pub win_id: i64,
    #[serde(rename = "Op")]
    pub op: NotificationOp,
    #[serde(rename = "Offset")]
    pub offset: usize,
    #[serde(rename = "Len")]
    pub len: usize,
    #[serde(rename = "Cmd")]
    pub cmd: Vec<String>,
}

/// Per-session bounded queue; overflow drops the newest notification
/// rather than evicting something the session hasn't seen yet.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    queue: VecDeque<Notification>,
}

impl NotificationQueue {
    pub fn push(&mut self, n: Notification) {
        if self.queue.len() >= NOTIFICATION_QUEUE_CAPACITY {
            return;
        }
        self.queue.push_back(n);
    }

    /// Pull and clear: the `GET /notifs` contract.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSummary {
    #[serde(rename = "Id")]
    pub id: u64,
    #[serde(rename = "GlobalPath")]
    pub global_path: String,
    #[serde(rename = "Path")]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionRecord {
    #[serde(rename = "Start")]
    pub start: usize,
    #[serde(rename = "End")]
    pub end: usize,
    #[serde(rename = "Len")]
    pub len: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteRequest {
    #[serde(rename = "WinId")]
    pub win_id: i64,
    #[serde(rename = "Cmd")]
    pub cmd: String,
    #[serde(rename = "Args")]
    pub args: Vec<String>,
}

/// Which body format a request asked for: JSON is the default, CSV is
/// opt-in via `Accept`/`Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    Json,
    Csv,
}

pub fn negotiate_format(accept_header: Option<&str>, content_type_header: Option<&str>) -> BodyFormat {
    let wants_csv = |h: &str| h.to_ascii_lowercase().contains("text/csv");
    if accept_header.map(wants_csv).unwrap_or(false) || content_type_header.map(wants_csv).unwrap_or(false) {
        BodyFormat::Csv
    } else {
        BodyFormat::Json
    }
}
