//! Centralized error handling for Anvil's core.
//!
//! Implements the taxonomy from the error-handling design: components never
//! bubble errors up through deep call stacks. Each one renders its own
//! `AnvilError` to the nearest `+Errors`-style sink (see `ErrorSink`) and
//! continues; only invariant breakage (`ErrorCategory::Panic`) is fatal, and
//! even that is caught at the main-loop boundary rather than unwinding past
//! it uncontrolled.

use std::fmt;

/// How serious the error is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational message (not really an error).
    Info,
    /// Something might be wrong but the operation can continue.
    Warning,
    /// The operation failed but the editor can continue.
    Error,
    /// May lead to data loss or require restart.
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Category of the error, following the taxonomy in the error-handling design.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad command name, bad regex, not-a-directory, no such window. Never fatal.
    User,
    /// Read/write/cancelled I/O on a job; the originating job terminates.
    TransientIo,
    /// Writer lock held, or mutation attempted during a locked expression.
    /// Callers silently no-op after logging one of these.
    ConcurrencyViolation,
    /// Malformed `settings.toml` / `plumbing` file; editor continues with defaults.
    ConfigParse,
    /// Internal logic or invariant violations that should never happen.
    Internal,
    /// Invariant breakage caught at the main loop; triggers panic-file capture.
    Panic,
    /// Errors that don't fit another category.
    Other,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "User"),
            Self::TransientIo => write!(f, "TransientIo"),
            Self::ConcurrencyViolation => write!(f, "ConcurrencyViolation"),
            Self::ConfigParse => write!(f, "ConfigParse"),
            Self::Internal => write!(f, "Internal"),
            Self::Panic => write!(f, "Panic"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A structured error produced anywhere in the Anvil core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnvilError {
    /// How serious the error is.
    pub severity: ErrorSeverity,
    /// Which category of the taxonomy produced it.
    pub category: ErrorCategory,
    /// Machine-readable error code (e.g. `"NO_SUCH_WINDOW"`).
    pub code: String,
    /// Human-readable description, suitable for appending to a `+Errors` window.
    pub message: String,
}

impl AnvilError {
    /// Standard error (severity `Error`).
    pub fn new(category: ErrorCategory, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Error,
            category,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Critical error (severity `Critical`).
    pub fn critical(category: ErrorCategory, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Critical,
            category,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Warning (severity `Warning`).
    pub fn warning(category: ErrorCategory, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Warning,
            category,
            code: code.into(),
            message: message.into(),
        }
    }

    /// A user error: bad command name, bad regex, not-a-directory, no such window.
    pub fn user(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::User, code, message)
    }

    /// A concurrency-rule violation: logged and silently no-op'd by the caller.
    pub fn concurrency(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::warning(ErrorCategory::ConcurrencyViolation, code, message)
    }

    /// Whether this error should be treated as fatal (invariant breakage).
    pub fn is_panic(&self) -> bool {
        self.category == ErrorCategory::Panic
    }

    /// Render this error the way it would appear appended to a `+Errors` window.
    pub fn as_errors_line(&self) -> String {
        format!("{}", self)
    }
}

impl fmt::Display for AnvilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}({}): {}",
            self.severity, self.category, self.code, self.message
        )
    }
}

impl std::error::Error for AnvilError {}

impl From<String> for AnvilError {
    fn from(msg: String) -> Self {
        Self::new(ErrorCategory::Other, "GENERIC_ERROR", msg)
    }
}

impl From<&str> for AnvilError {
    fn from(msg: &str) -> Self {
        Self::new(ErrorCategory::Other, "GENERIC_ERROR", msg)
    }
}

impl From<std::io::Error> for AnvilError {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorCategory::TransientIo, "IO_ERROR", err.to_string())
    }
}

/// Result alias used throughout the Anvil core.
pub type Result<T> = std::result::Result<T, AnvilError>;

/// Narrow interface onto the per-directory `+Errors` window. The window
/// itself (rendering, scrollback) is an external collaborator; the core
/// only needs somewhere to append a line.
pub trait ErrorSink {
    fn report(&mut self, dir: &str, err: &AnvilError);
}

/// An `ErrorSink` that just collects lines, useful for tests and for the
/// control-plane API (which surfaces collected errors as notifications).
#[derive(Debug, Default, Clone)]
pub struct CollectingErrorSink {
    pub lines: Vec<(String, AnvilError)>,
}

impl ErrorSink for CollectingErrorSink {
    fn report(&mut self, dir: &str, err: &AnvilError) {
        self.lines.push((dir.to_string(), err.clone()));
    }
}

/// Writes the three panic artefacts described in the error-handling design:
/// `<editor>.panic`, `<editor>.panic-logs`, `<editor>.panic-gortns`. Actually
/// writing to disk is an external collaborator concern (filesystem I/O is
/// out of scope); this records the three payloads in memory so a caller can
/// hand them to whatever file-writing collaborator it has.
#[derive(Debug, Clone)]
pub struct PanicReport {
    pub stack_trace: String,
    pub debug_ring_buffer: Vec<String>,
    pub task_stacks: Vec<String>,
}

impl PanicReport {
    pub fn new(stack_trace: impl Into<String>) -> Self {
        Self {
            stack_trace: stack_trace.into(),
            debug_ring_buffer: Vec::new(),
            task_stacks: Vec::new(),
        }
    }

    pub fn file_payloads(&self, editor_name: &str) -> [(String, String); 3] {
        [
            (format!("{editor_name}.panic"), self.stack_trace.clone()),
            (
                format!("{editor_name}.panic-logs"),
                self.debug_ring_buffer.join("\n"),
            ),
            (
                format!("{editor_name}.panic-gortns"),
                self.task_stacks.join("\n\n"),
            ),
        ]
    }
}
