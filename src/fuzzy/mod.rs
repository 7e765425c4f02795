//! Fuzzy scorer: Sellers' edit-distance per term against a
//! candidate string, with word-boundary bonuses and a containment
//! penalty, averaged across terms.

use crate::constants::fuzzy::{BOTH_BOUNDARY_BONUS, BOUNDARY_BONUS, NORMALIZATION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone)]
pub struct ScoredMatch {
    pub score: f64,
    pub spans: Vec<Span>,
}

/// Score `candidate` against `terms`. Case-folds both sides when
/// `case_fold` is set. A term whose runes aren't all present (as a set)
/// in the candidate scores 0 and is "penalised"; if every term is
/// penalised, the whole score is 0.
pub fn score(terms: &[&str], candidate: &str, case_fold: bool) -> ScoredMatch {
    let folded_candidate = if case_fold { candidate.to_lowercase() } else { candidate.to_string() };
    let cand_chars: Vec<char> = folded_candidate.chars().collect();

    let mut term_scores = Vec::with_capacity(terms.len());
    let mut spans = Vec::with_capacity(terms.len());
    let mut all_penalised = true;

    for term in terms {
        let folded_term = if case_fold { term.to_lowercase() } else { term.to_string() };
        let term_chars: Vec<char> = folded_term.chars().collect();

        if !set_contained(&term_chars, &cand_chars) {
            term_scores.push(0.0);
            continue;
        }
        all_penalised = false;

        let (edits, span) = sellers_best_match(&term_chars, &cand_chars);
        let mut s = 1.0 - (edits as f64 / term_chars.len().max(1) as f64);

        if let Some(sp) = span {
            let starts_word = sp.start == 0 || is_word_boundary(cand_chars.get(sp.start.wrapping_sub(1)).copied());
            let ends_word = sp.end == cand_chars.len() || is_word_boundary(cand_chars.get(sp.end).copied());
            if starts_word && ends_word {
                s += BOUNDARY_BONUS + BOTH_BOUNDARY_BONUS;
            } else if starts_word || ends_word {
                s += BOUNDARY_BONUS;
            }
            spans.push(sp);
        }
        term_scores.push((s / NORMALIZATION).max(0.0));
    }

    if all_penalised {
        return ScoredMatch { score: 0.0, spans: Vec::new() };
    }

    let score = term_scores.iter().sum::<f64>() / term_scores.len().max(1) as f64;
    ScoredMatch { score, spans }
}

fn is_word_boundary(c: Option<char>) -> bool {
    match c {
        None => true,
        Some(c) => c.is_whitespace(),
    }
}

fn set_contained(term: &[char], candidate: &[char]) -> bool {
    term.iter().all(|c| candidate.contains(c))
}

/// Sellers' algorithm: local alignment of `term` against `candidate`,
/// rows are prefixes of the term, columns prefixes of the candidate.
/// Row 0 is all zeros (free start anywhere in the candidate). Returns
/// the minimal edit distance and the span of the best-ending alignment.
fn sellers_best_match(term: &[char], candidate: &[char]) -> (usize, Option<Span>) {
    let n = term.len();
    let m = candidate.len();
    if n == 0 {
        return (0, None);
    }
    let mut prev = vec![0usize; m + 1];
    let mut starts: Vec<usize> = (0..=m).collect();
    let mut row = vec![0usize; m + 1];
    let mut row_starts = starts.clone();

    for i in 1..=n {
        row[0] = i;
        row_starts[0] = starts[0];
        for j in 1..=m {
            let cost = if term[i - 1] == candidate[j - 1] { 0 } else { 1 };
            let up = prev[j] + 1;
            let left = row[j - 1] + 1;
            let diag = prev[j - 1] + cost;
            let best = up.min(left).min(diag);
            row[j] = best;
            row_starts[j] = if best == diag {
                starts[j - 1]
            } else if best == up {
                starts[j]
            } else {
                row_starts[j - 1]
            };
        }
        std::mem::swap(&mut prev, &mut row);
        std::mem::swap(&mut starts, &mut row_starts);
    }

    let mut best_end = 0;
    let mut best_val = prev[0];
    for j in 1..=m {
        if prev[j] < best_val {
            best_val = prev[j];
            best_end = j;
        }
    }
    let start = starts[best_end];
    (best_val, Some(Span { start, end: best_end }))
}
