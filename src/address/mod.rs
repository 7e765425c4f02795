//! Addressing interpreter: parses Acme-style structural-regexp
//! address expressions and evaluates them against a [`Handler`] without
//! knowing anything about the concrete editor types on the other side.

pub mod handler;
pub mod parser;
pub mod regex_reverse;

pub use handler::Handler;
pub use parser::{parse, Command, Expr, Loop};
pub use regex_reverse::ReverseRegex;

use crate::error::{AnvilError, Result};

/// A half-open rune range, the unit every evaluation stage operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddrRange {
    pub start: usize,
    pub end: usize,
}

impl AddrRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

const MATCH_LIMIT: usize = crate::constants::address::MAX_LOOP_MATCHES;

/// Evaluate `expr` starting from `input` (the current selections, or the
/// whole document if `input` is empty) against `handler`.
pub fn evaluate<H: Handler>(expr: &Expr, input: &[AddrRange], handler: &mut H) -> Result<Vec<AddrRange>> {
    let base = if input.is_empty() {
        vec![AddrRange::new(0, handler.doc_len())]
    } else {
        input.to_vec()
    };
    eval_on_ranges(expr, &base, handler)
}

fn eval_on_ranges<H: Handler>(expr: &Expr, ranges: &[AddrRange], handler: &mut H) -> Result<Vec<AddrRange>> {
    let mut out = Vec::new();
    for r in ranges {
        out.extend(eval_single(expr, *r, handler)?);
    }
    Ok(out)
}

fn eval_single<H: Handler>(expr: &Expr, range: AddrRange, handler: &mut H) -> Result<Vec<AddrRange>> {
    match expr {
        Expr::Line(n) => Ok(vec![handler.line_range(*n)?]),
        Expr::RuneAddr(n) => Ok(vec![AddrRange::new(*n, *n)]),
        Expr::Regex(re) => {
            let m = handler.search_forward(re, range.end)?;
            Ok(m.into_iter().collect())
        }
        Expr::Zero => Ok(vec![AddrRange::new(0, 0)]),
        Expr::Dollar => {
            let end = handler.doc_len();
            Ok(vec![AddrRange::new(end, end)])
        }
        Expr::Dot => Ok(vec![handler.current_primary()]),

        Expr::Comma(a, b) => {
            let ra = eval_single(a, range, handler)?;
            let start = ra.first().map(|r| r.start).unwrap_or(range.start);
            let rb = eval_single(b, range, handler)?;
            let end = rb.last().map(|r| r.end).unwrap_or(range.end);
            Ok(vec![AddrRange::new(start.min(end), start.max(end))])
        }
        Expr::Plus(a, b) => {
            let ra = eval_single(a, range, handler)?;
            let at = ra.last().map(|r| r.end).unwrap_or(range.end);
            eval_single(b, AddrRange::new(at, at), handler)
        }
        Expr::Minus(a, b) => {
            let ra = eval_single(a, range, handler)?;
            let at = ra.first().map(|r| r.start).unwrap_or(range.start);
            handler.set_reverse(true);
            let result = eval_single(b, AddrRange::new(at, at), handler);
            handler.set_reverse(false);
            result
        }
        Expr::Semi(a, b) => {
            let ra = eval_single(a, range, handler)?;
            let start = ra.first().map(|r| r.start).unwrap_or(range.start);
            let at = ra.last().map(|r| r.end).unwrap_or(range.end);
            let rb = eval_single(b, AddrRange::new(at, at), handler)?;
            let end = rb.last().map(|r| r.end).unwrap_or(at);
            Ok(vec![AddrRange::new(start, end)])
        }
        Expr::Group(exprs) => {
            let mut out = Vec::new();
            for e in exprs {
                out.extend(eval_single(e, range, handler)?);
            }
            Ok(out)
        }
        Expr::LoopExpr(kind, re) => eval_loop(*kind, re, range, handler),
        Expr::Command(inner, cmd) => {
            let ranges = eval_single(inner, range, handler)?;
            apply_command(cmd, &ranges, handler)
        }
    }
}

/// Run `cmd` against each of `ranges`, left to right, tracking the net
/// length change of every prior application so later ranges (still
/// expressed in pre-edit offsets) land on the right text. Mirrors the
/// shift-accumulator pattern `EditableModel::insert_into_selections` uses
/// for the same reason.
fn apply_command<H: Handler>(cmd: &Command, ranges: &[AddrRange], handler: &mut H) -> Result<Vec<AddrRange>> {
    let mut sorted: Vec<AddrRange> = ranges.to_vec();
    sorted.sort_by_key(|r| r.start);
    let mut shift: i64 = 0;
    let mut out = Vec::with_capacity(sorted.len());
    for r in sorted {
        let start = (r.start as i64 + shift).max(0) as usize;
        let end = (r.end as i64 + shift).max(0) as usize;
        let shifted = AddrRange::new(start, end);
        let (result, delta) = apply_command_to_range(cmd, shifted, handler)?;
        shift += delta;
        out.push(result);
    }
    handler.done()?;
    Ok(out)
}

/// Apply `cmd` to a single (already-shifted) range, returning the
/// resulting range and the net rune-count delta it left behind.
fn apply_command_to_range<H: Handler>(cmd: &Command, range: AddrRange, handler: &mut H) -> Result<(AddrRange, i64)> {
    match cmd {
        Command::Delete => {
            handler.delete(range)?;
            Ok((AddrRange::new(range.start, range.start), -(range.len() as i64)))
        }
        Command::Print => {
            handler.display_contents(range, "", false)?;
            Ok((range, 0))
        }
        Command::PrintPosition => {
            handler.display(range)?;
            Ok((range, 0))
        }
        Command::Copy => {
            handler.copy(range)?;
            Ok((range, 0))
        }
        Command::Change(text) => {
            handler.delete(range)?;
            handler.insert(range.start, text)?;
            let new_len = text.chars().count();
            Ok((AddrRange::new(range.start, range.start + new_len), new_len as i64 - range.len() as i64))
        }
        Command::Insert(text) => {
            handler.insert(range.start, text)?;
            let new_len = text.chars().count();
            Ok((AddrRange::new(range.start, range.start + new_len), new_len as i64))
        }
        Command::Append(text) => {
            handler.insert(range.end, text)?;
            let new_len = text.chars().count();
            Ok((AddrRange::new(range.end, range.end + new_len), new_len as i64))
        }
        Command::Substitute(re, repl) => {
            let found = handler.find_all(re, range, 1)?;
            match found.into_iter().next() {
                Some(m) => {
                    handler.delete(m)?;
                    handler.insert(m.start, repl)?;
                    let new_len = repl.chars().count();
                    Ok((AddrRange::new(m.start, m.start + new_len), new_len as i64 - m.len() as i64))
                }
                None => {
                    handler.noop(range)?;
                    Ok((range, 0))
                }
            }
        }
    }
}

fn eval_loop<H: Handler>(kind: Loop, re: &str, range: AddrRange, handler: &mut H) -> Result<Vec<AddrRange>> {
    let matches = handler.find_all(re, range, MATCH_LIMIT)?;
    if matches.len() >= MATCH_LIMIT {
        return Err(AnvilError::user(
            crate::constants::errors::BAD_REGEX,
            "address loop exceeded match limit",
        ));
    }
    match kind {
        Loop::X => Ok(matches),
        Loop::Y => {
            let mut out = Vec::new();
            let mut cursor = range.start;
            for m in &matches {
                if m.start > cursor {
                    out.push(AddrRange::new(cursor, m.start));
                }
                cursor = m.end;
            }
            if cursor < range.end {
                out.push(AddrRange::new(cursor, range.end));
            }
            Ok(out)
        }
        Loop::Z => {
            let mut out = Vec::new();
            for w in matches.windows(2) {
                out.push(AddrRange::new(w[0].start, w[1].start));
            }
            if let Some(last) = matches.last() {
                out.push(AddrRange::new(last.start, range.end));
            }
            Ok(out)
        }
        // g/RE/ and v/RE/ are filters on the *whole input range*: keep
        // (or drop) the range itself depending on whether it contains a
        // match, rather than generating new ranges from it.
        Loop::G => Ok(if matches.is_empty() { Vec::new() } else { vec![range] }),
        Loop::V => Ok(if matches.is_empty() { vec![range] } else { Vec::new() }),
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
