//! Recursive-descent parser for the address grammar: `N`, `#N`, `/RE/`,
//! `0`, `$`, `.`, the binary forms `,`/`+`/`-`/`;`, `{ ... }` fan-out
//! groups, and the `x`/`y`/`z`/`g`/`v` loop primitives.

use crate::error::{AnvilError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loop {
    X,
    Y,
    Z,
    G,
    V,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Line(usize),
    RuneAddr(usize),
    Regex(String),
    Zero,
    Dollar,
    Dot,
    Comma(Box<Expr>, Box<Expr>),
    Plus(Box<Expr>, Box<Expr>),
    Minus(Box<Expr>, Box<Expr>),
    Semi(Box<Expr>, Box<Expr>),
    Group(Vec<Expr>),
    LoopExpr(Loop, String),
    Command(Box<Expr>, Command),
}

/// A command trailing an address expression, separated by whitespace
/// (`x/RE/ c/T/`). Dispatched through [`super::Handler`]'s mutating
/// methods, one call per range the address expression yields.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Delete,
    Print,
    Change(String),
    Insert(String),
    Append(String),
    Substitute(String, String),
    PrintPosition,
    Copy,
}

struct Parser<'a> {
    chars: Vec<char>,
    pos: usize,
    src: &'a str,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { chars: src.chars().collect(), pos: 0, src }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn err(&self, msg: &str) -> AnvilError {
        AnvilError::user(
            crate::constants::errors::BAD_ADDRESS,
            format!("{msg} in address {:?} at offset {}", self.src, self.pos),
        )
    }

    fn parse_regex_literal(&mut self, delim: char) -> Result<String> {
        self.bump(); // opening delimiter
        self.read_literal_until(delim)
    }

    /// Read text up to (and consuming) the next unescaped `delim`, with no
    /// opening delimiter of its own — used for `s/RE/REPL/`'s replacement,
    /// which shares its opening delimiter with the regex's closing one.
    fn read_literal_until(&mut self, delim: char) -> Result<String> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.err("unterminated literal")),
                Some('\\') => {
                    if let Some(next) = self.bump() {
                        out.push('\\');
                        out.push(next);
                    }
                }
                Some(c) if c == delim => break,
                Some(c) => out.push(c),
            }
        }
        Ok(out)
    }

    fn parse_number(&mut self) -> usize {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                s.push(c);
                self.bump();
            } else {
                break;
            }
        }
        s.parse().unwrap_or(0)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.peek() {
            Some('#') => {
                self.bump();
                Ok(Expr::RuneAddr(self.parse_number()))
            }
            Some('/') => {
                let re = self.parse_regex_literal('/')?;
                Ok(Expr::Regex(re))
            }
            Some('0') if !matches!(self.chars.get(self.pos + 1), Some(c) if c.is_ascii_digit()) => {
                self.bump();
                Ok(Expr::Zero)
            }
            Some('$') => {
                self.bump();
                Ok(Expr::Dollar)
            }
            Some('.') => {
                self.bump();
                Ok(Expr::Dot)
            }
            Some('{') => self.parse_group(),
            Some(c @ ('x' | 'y' | 'z' | 'g' | 'v')) if matches!(self.chars.get(self.pos + 1), Some('/')) => {
                self.bump();
                let _ = c;
                let kind = match c {
                    'x' => Loop::X,
                    'y' => Loop::Y,
                    'z' => Loop::Z,
                    'g' => Loop::G,
                    _ => Loop::V,
                };
                let re = self.parse_regex_literal('/')?;
                Ok(Expr::LoopExpr(kind, re))
            }
            Some(c) if c.is_ascii_digit() => Ok(Expr::Line(self.parse_number())),
            _ => Err(self.err("expected an address primitive")),
        }
    }

    fn parse_group(&mut self) -> Result<Expr> {
        self.bump(); // '{'
        let mut exprs = Vec::new();
        loop {
            self.skip_spaces();
            if self.peek() == Some('}') {
                self.bump();
                break;
            }
            if self.peek().is_none() {
                return Err(self.err("unterminated group"));
            }
            exprs.push(self.parse_sum()?);
        }
        Ok(Expr::Group(exprs))
    }

    fn skip_spaces(&mut self) {
        while matches!(self.peek(), Some(' ') | Some('\t')) {
            self.bump();
        }
    }

    fn parse_sum(&mut self) -> Result<Expr> {
        let mut left = self.parse_primary()?;
        loop {
            match self.peek() {
                Some('+') => {
                    self.bump();
                    let right = self.parse_primary()?;
                    left = Expr::Plus(Box::new(left), Box::new(right));
                }
                Some('-') => {
                    self.bump();
                    let right = self.parse_primary()?;
                    left = Expr::Minus(Box::new(left), Box::new(right));
                }
                _ => break,
            }
        }
        Ok(left)
    }

    fn parse_semi(&mut self) -> Result<Expr> {
        let left = self.parse_sum()?;
        if self.peek() == Some(';') {
            self.bump();
            let right = self.parse_sum()?;
            Ok(Expr::Semi(Box::new(left), Box::new(right)))
        } else {
            Ok(left)
        }
    }

    fn parse_comma(&mut self) -> Result<Expr> {
        let left = self.parse_semi()?;
        if self.peek() == Some(',') {
            self.bump();
            let right = self.parse_semi()?;
            Ok(Expr::Comma(Box::new(left), Box::new(right)))
        } else {
            Ok(left)
        }
    }

    /// Commands bind loosest of all: one optional trailing token, after
    /// the whole address, separated by whitespace.
    fn parse_command(&mut self) -> Result<Option<Command>> {
        match self.peek() {
            Some('d') => {
                self.bump();
                Ok(Some(Command::Delete))
            }
            Some('p') => {
                self.bump();
                Ok(Some(Command::Print))
            }
            Some('=') => {
                self.bump();
                Ok(Some(Command::PrintPosition))
            }
            Some('C') => {
                self.bump();
                Ok(Some(Command::Copy))
            }
            Some('c') if matches!(self.chars.get(self.pos + 1), Some('/')) => {
                self.bump();
                Ok(Some(Command::Change(self.parse_regex_literal('/')?)))
            }
            Some('i') if matches!(self.chars.get(self.pos + 1), Some('/')) => {
                self.bump();
                Ok(Some(Command::Insert(self.parse_regex_literal('/')?)))
            }
            Some('a') if matches!(self.chars.get(self.pos + 1), Some('/')) => {
                self.bump();
                Ok(Some(Command::Append(self.parse_regex_literal('/')?)))
            }
            Some('s') if matches!(self.chars.get(self.pos + 1), Some('/')) => {
                self.bump();
                let re = self.parse_regex_literal('/')?;
                let repl = self.read_literal_until('/')?;
                Ok(Some(Command::Substitute(re, repl)))
            }
            _ => Ok(None),
        }
    }
}

pub fn parse(src: &str) -> Result<Expr> {
    let mut p = Parser::new(src);
    let expr = p.parse_comma()?;
    p.skip_spaces();
    let expr = match p.parse_command()? {
        Some(cmd) => Expr::Command(Box::new(expr), cmd),
        None => expr,
    };
    if p.pos != p.chars.len() {
        return Err(p.err("trailing characters after address expression"));
    }
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_line_and_rune_addresses() {
        assert_eq!(parse("5").unwrap(), Expr::Line(5));
        assert_eq!(parse("#12").unwrap(), Expr::RuneAddr(12));
    }

    #[test]
    fn parses_dollar_dot_and_zero() {
        assert_eq!(parse("$").unwrap(), Expr::Dollar);
        assert_eq!(parse(".").unwrap(), Expr::Dot);
        assert_eq!(parse("0").unwrap(), Expr::Zero);
    }

    #[test]
    fn parses_comma_range() {
        match parse("1,5").unwrap() {
            Expr::Comma(a, b) => {
                assert_eq!(*a, Expr::Line(1));
                assert_eq!(*b, Expr::Line(5));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn parses_regex_and_loop_primitives() {
        assert_eq!(parse("/foo/").unwrap(), Expr::Regex("foo".into()));
        assert_eq!(parse("x/foo/").unwrap(), Expr::LoopExpr(Loop::X, "foo".into()));
    }

    #[test]
    fn parses_group_fan_out() {
        match parse("{1 2}").unwrap() {
            Expr::Group(items) => assert_eq!(items, vec![Expr::Line(1), Expr::Line(2)]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn parses_plus_and_minus_chains() {
        match parse("1+/foo/-/bar/").unwrap() {
            Expr::Minus(a, b) => {
                assert_eq!(*b, Expr::Regex("bar".into()));
                match *a {
                    Expr::Plus(x, y) => {
                        assert_eq!(*x, Expr::Line(1));
                        assert_eq!(*y, Expr::Regex("foo".into()));
                    }
                    other => panic!("unexpected {other:?}"),
                }
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
