//! Dump/Load format: serialised workspace state used by `--load`
//! and by the `Dump`/`Load` builtin commands. Restoring walks the
//! ordered column/window lists and re-opens each file through the
//! (external) loader interface; a single window failing to reopen is
//! reported but does not abort the rest of the restore.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionDump {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowDump {
    pub file: String,
    #[serde(rename = "fileType")]
    pub file_type: String,
    pub tag: String,
    pub top_left: usize,
    pub cursor_indices: Vec<usize>,
    pub selections: Vec<SelectionDump>,
    #[serde(rename = "customEdCommands", default)]
    pub custom_ed_commands: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDump {
    pub windows: Vec<WindowDump>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorkspaceDump {
    pub columns: Vec<ColumnDump>,
}

impl WorkspaceDump {
    pub fn to_json(&self) -> crate::error::Result<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }

    pub fn from_json(src: &str) -> crate::error::Result<Self> {
        serde_json::from_str(src).map_err(Into::into)
    }
}

impl From<serde_json::Error> for crate::error::AnvilError {
    fn from(e: serde_json::Error) -> Self {
        crate::error::AnvilError::user(crate::constants::errors::CONFIG_PARSE_ERROR, e.to_string())
    }
}

/// Result of attempting to restore one window: either it reopened, or
/// it failed with a message that gets surfaced to `+Errors` without
/// aborting the rest of the restore.
pub enum RestoreOutcome {
    Opened,
    Failed(String),
}

/// Restore each window via `open`, continuing past individual
/// failures; returns one outcome per window in dump order.
pub fn restore_with<F>(dump: &WorkspaceDump, mut open: F) -> Vec<RestoreOutcome>
where
    F: FnMut(&WindowDump) -> Result<(), String>,
{
    let mut outcomes = Vec::new();
    for column in &dump.columns {
        for window in &column.windows {
            match open(window) {
                Ok(()) => outcomes.push(RestoreOutcome::Opened),
                Err(msg) => outcomes.push(RestoreOutcome::Failed(msg)),
            }
        }
    }
    outcomes
}

#[cfg(test)]
#[path = "dump_tests.rs"]
mod tests;
