//! Command dispatcher: resolves a typed command line against the
//! prefix operators, the alias table, the builtin registry, API-session
//! user commands, and finally external processes, then runs external
//! commands as [`job_manager::Job`]s.

pub mod exec;

use std::collections::HashMap;

use crate::address::{self, AddrRange};
use crate::editable::{EditableHandler, EditableModel};
use crate::error::{ErrorSink, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    New,
    Del,
    Put,
    Get,
    Look,
    Zerox,
    Rot,
    Dump,
    Load,
    Putall,
    On,
    Tab,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "New" => Self::New,
            "Del" => Self::Del,
            "Put" => Self::Put,
            "Get" => Self::Get,
            "Look" => Self::Look,
            "Zerox" => Self::Zerox,
            "Rot" => Self::Rot,
            "Dump" => Self::Dump,
            "Load" => Self::Load,
            "Putall" => Self::Putall,
            "On" => Self::On,
            "Tab" => Self::Tab,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeKind {
    Pipe,   // |cmd
    Emit,   // >cmd
    Inject, // <cmd
}

#[derive(Debug, Clone)]
pub enum Resolved {
    Piped { kind: PipeKind, cmd: String, local_only: bool },
    Expression(String),
    Alias(String, Vec<String>),
    Builtin(Builtin, Vec<String>),
    ApiUserCommand { session: String, name: String, args: Vec<String> },
    External(exec::ExecCtx),
}

/// User-defined alias table: `name -> semicolon-separated command
/// sequence`, with `$1..$9`/`$*` substituted from the invocation's args.
#[derive(Debug, Default, Clone)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, body: impl Into<String>) {
        self.aliases.insert(name.into(), body.into());
    }

    pub fn expand(&self, name: &str, args: &[String]) -> Option<Vec<String>> {
        let body = self.aliases.get(name)?;
        let substituted = substitute_args(body, args);
        Some(substituted.split(';').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
    }
}

fn substitute_args(template: &str, args: &[String]) -> String {
    let joined_all = args.join(" ");
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('*') => {
                chars.next();
                out.push_str(&joined_all);
            }
            Some(d) if d.is_ascii_digit() && *d != '0' => {
                let idx = d.to_digit(10).unwrap() as usize - 1;
                chars.next();
                if let Some(arg) = args.get(idx) {
                    out.push_str(arg);
                }
            }
            _ => out.push('$'),
        }
    }
    out
}

/// Who matches an API-session user-defined command name, for step (4) of
/// the resolution order. Kept as a trait object so `resolve` doesn't need
/// to know about session bookkeeping.
pub trait ApiCommandMatcher {
    fn find(&self, name: &str) -> Option<String>;
}

impl ApiCommandMatcher for () {
    fn find(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Resolve a command line per the order in the design: prefix operators,
/// then aliases, then builtins, then API-session user commands, then an
/// external process.
pub fn resolve(
    line: &str,
    dir: &str,
    aliases: &AliasTable,
    api: &dyn ApiCommandMatcher,
) -> Result<Resolved> {
    let trimmed = line.trim_start();
    let (local_only, rest) = if let Some(r) = trimmed.strip_prefix('+') {
        (true, r)
    } else {
        (false, trimmed)
    };

    if let Some(cmd) = rest.strip_prefix('|') {
        return Ok(Resolved::Piped { kind: PipeKind::Pipe, cmd: cmd.trim().to_string(), local_only });
    }
    if let Some(cmd) = rest.strip_prefix('>') {
        return Ok(Resolved::Piped { kind: PipeKind::Emit, cmd: cmd.trim().to_string(), local_only });
    }
    if let Some(cmd) = rest.strip_prefix('<') {
        return Ok(Resolved::Piped { kind: PipeKind::Inject, cmd: cmd.trim().to_string(), local_only });
    }
    if let Some(expr) = rest.strip_prefix('!') {
        return Ok(Resolved::Expression(expr.trim().to_string()));
    }

    let mut tokens = rest.split_whitespace();
    let Some(name) = tokens.next() else {
        return Err(crate::error::AnvilError::user(
            crate::constants::errors::BAD_COMMAND,
            "empty command line",
        ));
    };
    let args: Vec<String> = tokens.map(str::to_string).collect();

    if let Some(expanded) = aliases.expand(name, &args) {
        return Ok(Resolved::Alias(name.to_string(), expanded));
    }
    if let Some(builtin) = Builtin::from_name(name) {
        return Ok(Resolved::Builtin(builtin, args));
    }
    if let Some(session) = api.find(name) {
        return Ok(Resolved::ApiUserCommand { session, name: name.to_string(), args });
    }

    Ok(Resolved::External(exec::ExecCtx::new(dir, name, args)))
}

/// Run a `!`-prefixed expression line (the body of [`Resolved::Expression`])
/// against a window's model. Starts from its current selections, or the
/// whole document if it has none, same as any other address evaluation.
pub fn run_expression(
    expr_src: &str,
    model: &mut EditableModel,
    sink: &mut dyn ErrorSink,
    dir: &str,
) -> Result<Vec<AddrRange>> {
    let expr = address::parse(expr_src)?;
    let input: Vec<AddrRange> = model.selections().iter().map(|s| AddrRange::new(s.start, s.end)).collect();
    let mut handler = EditableHandler::new(model, sink, dir);
    address::evaluate(&expr, &input, &mut handler)
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
