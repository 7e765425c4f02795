//! [`address::Handler`] over a live [`EditableModel`], the thing that
//! actually lets `!x/RE/ c/T/`-style command lines reach a window's text.
//! Printing commands (`p`, `=`) go to the caller's [`ErrorSink`] the same
//! way any other component reports to a `+Errors` window.

use crate::address::{AddrRange, Handler};
use crate::buffer::TextChange;
use crate::editable::{EditableModel, SearchDirection, Selection};
use crate::error::{AnvilError, ErrorSink, Result};

pub struct EditableHandler<'a> {
    model: &'a mut EditableModel,
    sink: &'a mut dyn ErrorSink,
    dir: &'a str,
    reverse: bool,
}

impl<'a> EditableHandler<'a> {
    pub fn new(model: &'a mut EditableModel, sink: &'a mut dyn ErrorSink, dir: &'a str) -> Self {
        Self { model, sink, dir, reverse: false }
    }

    fn compile(pattern: &str) -> Result<regex::Regex> {
        regex::Regex::new(pattern)
            .map_err(|e| AnvilError::user(crate::constants::errors::BAD_REGEX, e.to_string()))
    }

    fn text_in(&self, range: AddrRange) -> String {
        self.model
            .buffer
            .chars_in_range(range.start..range.end)
            .into_iter()
            .map(|c| c.to_char_lossy())
            .collect()
    }
}

impl<'a> Handler for EditableHandler<'a> {
    fn doc_len(&self) -> usize {
        self.model.buffer.len_runes()
    }

    fn current_primary(&self) -> AddrRange {
        if let Some(sel) = self.model.selections().first() {
            AddrRange::new(sel.start, sel.end)
        } else {
            let pos = self.model.cursors().first().copied().unwrap_or(0);
            AddrRange::new(pos, pos)
        }
    }

    fn line_range(&self, line: usize) -> Result<AddrRange> {
        let line_count = self.model.buffer.line_count();
        if line == 0 || line > line_count {
            return Err(AnvilError::user(crate::constants::errors::BAD_ADDRESS, "no such line"));
        }
        let start = self.model.buffer.line_start_offset(line - 1);
        let end = if line < line_count {
            self.model.buffer.line_start_offset(line).saturating_sub(1)
        } else {
            self.model.buffer.len_runes()
        };
        Ok(AddrRange::new(start, end.max(start)))
    }

    fn search_forward(&self, pattern: &str, from: usize) -> Result<Option<AddrRange>> {
        let re = Self::compile(pattern)?;
        let dir = if self.reverse { SearchDirection::Backward } else { SearchDirection::Forward };
        Ok(self.model.search_regex(&re, from, dir).map(|m| AddrRange::new(m.start, m.end)))
    }

    fn find_all(&self, pattern: &str, range: AddrRange, limit: usize) -> Result<Vec<AddrRange>> {
        let re = Self::compile(pattern)?;
        let slice = self.text_in(range);
        let mut out = Vec::new();
        for m in re.find_iter(&slice) {
            if out.len() >= limit {
                break;
            }
            let start = range.start + slice[..m.start()].chars().count();
            let end = range.start + slice[..m.end()].chars().count();
            out.push(AddrRange::new(start, end));
        }
        Ok(out)
    }

    fn set_reverse(&mut self, reverse: bool) {
        self.reverse = reverse;
    }

    fn delete(&mut self, range: AddrRange) -> Result<()> {
        let len = range.len();
        self.model.buffer.delete(range.start, len, range.start);
        self.model.apply_shift(TextChange { offset_rune: range.start, delta_rune: -(len as i64) });
        Ok(())
    }

    fn copy(&mut self, range: AddrRange) -> Result<()> {
        self.model.add_selection(Selection::new(range.start, range.end));
        Ok(())
    }

    fn insert(&mut self, pos: usize, text: &str) -> Result<()> {
        let rune_len = text.chars().count();
        self.model.buffer.insert_str(pos, text, pos + rune_len);
        self.model.apply_shift(TextChange { offset_rune: pos, delta_rune: rune_len as i64 });
        Ok(())
    }

    fn display(&mut self, range: AddrRange) -> Result<()> {
        self.sink.report(self.dir, &AnvilError::user("ADDRESS_POSITION", format!("#{},{}", range.start, range.end)));
        Ok(())
    }

    fn display_contents(&mut self, range: AddrRange, prefix: &str, with_pos: bool) -> Result<()> {
        let text = self.text_in(range);
        let message = if with_pos {
            format!("{prefix}#{},{}: {text}", range.start, range.end)
        } else {
            format!("{prefix}{text}")
        };
        self.sink.report(self.dir, &AnvilError::user("ADDRESS_PRINT", message));
        Ok(())
    }

    fn noop(&mut self, _range: AddrRange) -> Result<()> {
        Ok(())
    }

    fn done(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{evaluate, parse};
    use crate::buffer::PieceTable;
    use crate::error::CollectingErrorSink;

    #[test]
    fn change_command_edits_the_live_buffer() {
        let mut model = EditableModel::new(PieceTable::from_str("abc\nabc\nabc"));
        let mut sink = CollectingErrorSink::default();
        let mut handler = EditableHandler::new(&mut model, &mut sink, "/tmp");
        evaluate(&parse("x/abc/ c/XY/").unwrap(), &[], &mut handler).unwrap();
        assert_eq!(String::from_utf8(model.text()).unwrap(), "XY\nXY\nXY");
    }

    #[test]
    fn print_position_command_reports_to_the_error_sink() {
        let mut model = EditableModel::new(PieceTable::from_str("one two three"));
        let mut sink = CollectingErrorSink::default();
        let dot = AddrRange::new(0, 0);
        {
            let mut handler = EditableHandler::new(&mut model, &mut sink, "/tmp");
            evaluate(&parse("/two/ =").unwrap(), &[dot], &mut handler).unwrap();
        }
        assert_eq!(sink.lines.len(), 1);
        assert_eq!(sink.lines[0].0, "/tmp");
    }

    #[test]
    fn delete_command_shifts_cursors_after_the_removed_range() {
        let mut model = EditableModel::new(PieceTable::from_str("keep DROP keep"));
        model.set_cursors(vec![14]);
        let mut sink = CollectingErrorSink::default();
        let dot = AddrRange::new(0, 0);
        {
            let mut handler = EditableHandler::new(&mut model, &mut sink, "/tmp");
            evaluate(&parse("/DROP/ d").unwrap(), &[dot], &mut handler).unwrap();
        }
        assert_eq!(String::from_utf8(model.text()).unwrap(), "keep  keep");
        assert_eq!(model.cursors(), &[10]);
    }
}
