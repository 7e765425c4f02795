//! Literal and regex search over a [`PieceTable`], in either direction
//! from a starting rune offset. Used directly by keyboard search and by
//! the addressing interpreter's `/re/` and `?re?` address forms.

use crate::buffer::PieceTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    pub start: usize,
    pub end: usize,
}

pub fn search_literal(
    buf: &PieceTable,
    needle: &str,
    from: usize,
    dir: SearchDirection,
) -> Option<SearchMatch> {
    if needle.is_empty() {
        return None;
    }
    let haystack: Vec<char> = buf.bytes_view().map(|c| c.to_char_lossy()).collect();
    let needle_chars: Vec<char> = needle.chars().collect();
    let n = needle_chars.len();
    if haystack.len() < n {
        return None;
    }
    match dir {
        SearchDirection::Forward => {
            for start in from..=haystack.len().saturating_sub(n) {
                if haystack[start..start + n] == needle_chars[..] {
                    return Some(SearchMatch { start, end: start + n });
                }
            }
            None
        }
        SearchDirection::Backward => {
            let upper = from.min(haystack.len().saturating_sub(n));
            for start in (0..=upper).rev() {
                if start + n <= haystack.len() && haystack[start..start + n] == needle_chars[..] {
                    return Some(SearchMatch { start, end: start + n });
                }
            }
            None
        }
    }
}

pub fn search_regex(
    buf: &PieceTable,
    re: &regex::Regex,
    from: usize,
    dir: SearchDirection,
) -> Option<SearchMatch> {
    let text = String::from_utf8_lossy(&buf.to_bytes()).into_owned();
    let byte_from = buf.char_to_byte(from.min(buf.len_runes()));
    match dir {
        SearchDirection::Forward => {
            let m = re.find_at(&text, byte_from)?;
            Some(SearchMatch {
                start: buf.byte_to_char(m.start()),
                end: buf.byte_to_char(m.end()),
            })
        }
        SearchDirection::Backward => {
            // No native reverse search in `regex`; scan all matches up to
            // `from` and keep the last one.
            re.find_iter(&text)
                .take_while(|m| m.start() <= byte_from)
                .last()
                .map(|m| SearchMatch {
                    start: buf.byte_to_char(m.start()),
                    end: buf.byte_to_char(m.end()),
                })
        }
    }
}
