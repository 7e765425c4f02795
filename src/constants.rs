//! Global constants for Anvil's core.

pub mod paths {
    /// Directory name for plumbing rule files, relative to the config root.
    pub const PLUMBING_FILE: &str = "plumbing";
    /// Directory name for settings, relative to the config root.
    pub const SETTINGS_FILE: &str = "settings.toml";
}

pub mod errors {
    // Error codes
    pub const NO_SUCH_WINDOW: &str = "NO_SUCH_WINDOW";
    pub const NO_SUCH_COLUMN: &str = "NO_SUCH_COLUMN";
    pub const BAD_COMMAND: &str = "BAD_COMMAND";
    pub const BAD_REGEX: &str = "BAD_REGEX";
    pub const BAD_ADDRESS: &str = "BAD_ADDRESS";
    pub const NOT_A_DIRECTORY: &str = "NOT_A_DIRECTORY";
    pub const IO_ERROR: &str = "IO_ERROR";
    pub const JOB_CANCELLED: &str = "JOB_CANCELLED";
    pub const CONCURRENCY_VIOLATION: &str = "CONCURRENCY_VIOLATION";
    pub const CONFIG_PARSE_ERROR: &str = "CONFIG_PARSE_ERROR";
    pub const SESSION_UNAUTHORIZED: &str = "SESSION_UNAUTHORIZED";
    pub const GENERIC_ERROR: &str = "GENERIC_ERROR";

    pub const MSG_UNSAVED_CHANGES: &str = "no write since last change (add ! to override)";
    pub const MSG_NO_FILE_NAME: &str = "no file name";
}

pub mod address {
    /// Default addressing-engine loop guard: a single `x`/`y`/`g`/`v` match set
    /// larger than this aborts with a user error rather than hanging.
    pub const MAX_LOOP_MATCHES: usize = 1_000;
}

pub mod packer {
    pub const MIN_EXTENT: f64 = 1.0;
}

pub mod fuzzy {
    /// Word-boundary bonus applied by the Sellers-distance scorer.
    pub const BOUNDARY_BONUS: f64 = 0.2;
    /// Extra bonus applied when a match both begins and ends a word.
    pub const BOTH_BOUNDARY_BONUS: f64 = 0.1;
    /// Final-score normalisation divisor.
    pub const NORMALIZATION: f64 = 1.3;
}

pub mod history {
    /// Maximum number of entries retained in the shell-command history ring.
    pub const RING_CAPACITY: usize = 500;
}

pub mod lru {
    pub const DEFAULT_CAPACITY: usize = 128;
}

pub mod api {
    pub const SESSION_HEADER: &str = "Anvil-Sess";
    /// Per-session notification queue bound; overflow drops the newest.
    pub const NOTIFICATION_QUEUE_CAPACITY: usize = 100;
    /// Max concurrently tracked API sessions.
    pub const SESSION_MAP_CAPACITY: usize = 100;
}
