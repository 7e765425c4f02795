//! Plumbing: `match RE` / `do CMD` rule file, tried in order on
//! `acquire` until one regex matches, then `$0`/`$1..$9` expansion.

use regex::Regex;

use crate::constants::errors::CONFIG_PARSE_ERROR;
use crate::error::{AnvilError, Result};

pub struct Rule {
    pub pattern: Regex,
    pub action: String,
}

#[derive(Default)]
pub struct Ruleset {
    rules: Vec<Rule>,
}

/// Parses a plumbing file: alternating `match RE` / `do CMD` line pairs;
/// blank and `#`-commented lines are ignored; anything else is a parse
/// error naming the offending line.
pub fn parse(src: &str) -> Result<Ruleset> {
    let mut rules = Vec::new();
    let mut pending_pattern: Option<String> = None;

    for (lineno, raw) in src.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(re_src) = line.strip_prefix("match ") {
            if pending_pattern.is_some() {
                return Err(parse_err(lineno, "expected 'do' after 'match'"));
            }
            pending_pattern = Some(re_src.trim().to_string());
        } else if let Some(action) = line.strip_prefix("do ") {
            let Some(re_src) = pending_pattern.take() else {
                return Err(parse_err(lineno, "'do' without a preceding 'match'"));
            };
            let pattern = Regex::new(&re_src)
                .map_err(|e| parse_err(lineno, &format!("bad regex {re_src:?}: {e}")))?;
            rules.push(Rule { pattern, action: action.trim().to_string() });
        } else {
            return Err(parse_err(lineno, &format!("unrecognized line: {line:?}")));
        }
    }
    if pending_pattern.is_some() {
        return Err(parse_err(src.lines().count(), "trailing 'match' with no 'do'"));
    }
    Ok(Ruleset { rules })
}

fn parse_err(lineno: usize, msg: &str) -> AnvilError {
    AnvilError::warning(crate::error::ErrorCategory::ConfigParse, CONFIG_PARSE_ERROR, format!("plumbing line {}: {msg}", lineno + 1))
}

impl Ruleset {
    /// Try each rule in order; the first regex match invokes its action
    /// (after `$0`/`$1..$9` expansion) via `executor`. Returns `true` if
    /// a rule matched (mirroring the `plumbed?` return so callers can
    /// fall through when nothing plumbed).
    pub fn acquire<F: FnMut(&str) -> Result<()>>(&self, candidate: &str, mut executor: F) -> Result<bool> {
        for rule in &self.rules {
            if let Some(caps) = rule.pattern.captures(candidate) {
                let expanded = expand_captures(&rule.action, &caps);
                executor(&expanded)?;
                return Ok(true);
            }
        }
        Ok(false)
    }
}

fn expand_captures(template: &str, caps: &regex::Captures) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some(d) if d.is_ascii_digit() => {
                let digit = d.to_digit(10).unwrap() as usize;
                chars.next();
                if let Some(m) = caps.get(digit) {
                    out.push_str(m.as_str());
                }
            }
            _ => out.push('$'),
        }
    }
    out
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
