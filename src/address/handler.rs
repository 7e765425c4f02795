//! The interpreter talks to the editor only through this trait, so the
//! same expression tree runs against a live window or a bare test buffer.

use crate::error::Result;

use super::AddrRange;

pub trait Handler {
    fn doc_len(&self) -> usize;

    fn current_primary(&self) -> AddrRange;

    /// 1-based line number to the rune range spanning that line
    /// (excluding its trailing newline).
    fn line_range(&self, line: usize) -> Result<AddrRange>;

    /// First match of `pattern` at or after `from`, honoring the current
    /// reverse-search flag set by [`Handler::set_reverse`].
    fn search_forward(&self, pattern: &str, from: usize) -> Result<Option<AddrRange>>;

    /// All non-overlapping matches of `pattern` within `range`, capped at
    /// `limit` (the caller treats hitting the cap as a match-limit error).
    fn find_all(&self, pattern: &str, range: AddrRange, limit: usize) -> Result<Vec<AddrRange>>;

    /// Toggle reverse-search mode for the scope of a `-` expression.
    fn set_reverse(&mut self, reverse: bool);

    fn delete(&mut self, range: AddrRange) -> Result<()>;
    fn copy(&mut self, range: AddrRange) -> Result<()>;
    fn insert(&mut self, pos: usize, text: &str) -> Result<()>;
    fn display(&mut self, range: AddrRange) -> Result<()>;
    fn display_contents(&mut self, range: AddrRange, prefix: &str, with_pos: bool) -> Result<()>;
    fn noop(&mut self, range: AddrRange) -> Result<()>;
    fn done(&mut self) -> Result<()>;
}
