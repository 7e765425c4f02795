//! Syntactic regex reversal: rewrites a pattern's AST so that matching it
//! against the reversed byte stream gives the same matches a backward
//! scan of the original pattern would find, without actually reversing
//! the document. Alternatives reverse order, concatenations reverse
//! atom order (each atom keeps its own quantifier), character classes
//! and groups are left structurally alone (only their *contents*, if a
//! group, recurse).

pub struct ReverseRegex;

impl ReverseRegex {
    /// Produce the reversed pattern string; the caller compiles it with
    /// [`regex::Regex`] and matches against a reversed copy of the text.
    pub fn reverse(pattern: &str) -> String {
        reverse_alternation(pattern)
    }
}

fn reverse_alternation(pattern: &str) -> String {
    let alts = split_top_level(pattern, '|');
    let mut reversed: Vec<String> = alts.iter().map(|a| reverse_concat(a)).collect();
    reversed.reverse();
    reversed.join("|")
}

/// Split on `sep` but not inside `(...)` or `[...]`, and not on an
/// escaped separator.
fn split_top_level(s: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth_paren = 0i32;
    let mut depth_class = 0i32;
    let mut current = String::new();
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                current.push(c);
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            '(' if depth_class == 0 => {
                depth_paren += 1;
                current.push(c);
            }
            ')' if depth_class == 0 => {
                depth_paren -= 1;
                current.push(c);
            }
            '[' if depth_paren == 0 && depth_class == 0 => {
                depth_class += 1;
                current.push(c);
            }
            ']' if depth_class > 0 => {
                depth_class -= 1;
                current.push(c);
            }
            c if c == sep && depth_paren == 0 && depth_class == 0 => {
                parts.push(std::mem::take(&mut current));
            }
            c => current.push(c),
        }
    }
    parts.push(current);
    parts
}

/// A single atom: a literal char, an escape, a character class, or a
/// parenthesised group — plus whatever quantifier immediately follows it.
struct Atom {
    body: String,
    quantifier: String,
}

fn reverse_concat(pattern: &str) -> String {
    let atoms = tokenize_atoms(pattern);
    atoms
        .into_iter()
        .rev()
        .map(|a| format!("{}{}", a.body, a.quantifier))
        .collect()
}

fn tokenize_atoms(pattern: &str) -> Vec<Atom> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut atoms = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let (body, next) = read_atom_body(&chars, i);
        i = next;
        let (quantifier, next) = read_quantifier(&chars, i);
        i = next;
        atoms.push(Atom { body, quantifier });
    }
    atoms
}

fn read_atom_body(chars: &[char], start: usize) -> (String, usize) {
    match chars[start] {
        '\\' => {
            let end = (start + 2).min(chars.len());
            (chars[start..end].iter().collect(), end)
        }
        '[' => {
            let mut i = start + 1;
            while i < chars.len() && chars[i] != ']' {
                if chars[i] == '\\' {
                    i += 1;
                }
                i += 1;
            }
            let end = (i + 1).min(chars.len());
            (chars[start..end].iter().collect(), end)
        }
        '(' => {
            let mut depth = 1;
            let mut i = start + 1;
            while i < chars.len() && depth > 0 {
                match chars[i] {
                    '\\' => i += 1,
                    '(' => depth += 1,
                    ')' => depth -= 1,
                    _ => {}
                }
                i += 1;
            }
            let inner: String = chars[start + 1..i.saturating_sub(1)].iter().collect();
            let prefix = if inner.starts_with("?:") { "?:" } else { "" };
            let body = inner.strip_prefix(prefix).unwrap_or(&inner);
            let reversed_inner = reverse_alternation(body);
            (format!("({prefix}{reversed_inner})"), i)
        }
        c => (c.to_string(), start + 1),
    }
}

fn read_quantifier(chars: &[char], start: usize) -> (String, usize) {
    if start >= chars.len() {
        return (String::new(), start);
    }
    match chars[start] {
        '*' | '+' | '?' => {
            let mut end = start + 1;
            if chars.get(end) == Some(&'?') {
                end += 1; // lazy quantifier
            }
            (chars[start..end].iter().collect(), end)
        }
        '{' => {
            let mut i = start + 1;
            while i < chars.len() && chars[i] != '}' {
                i += 1;
            }
            let end = (i + 1).min(chars.len());
            (chars[start..end].iter().collect(), end)
        }
        _ => (String::new(), start),
    }
}
