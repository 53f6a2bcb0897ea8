//! Small text helpers shared by the detectors

/// Curly brace kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brace {
    Open,
    Close,
}

/// Start columns of every non-overlapping occurrence of `needle`
pub fn indices_of<'a>(text: &'a str, needle: &'a str) -> impl Iterator<Item = usize> + 'a {
    text.match_indices(needle).map(|(col, _)| col)
}

/// Curly braces of a line in column order
pub fn braces(text: &str) -> impl Iterator<Item = (usize, Brace)> + '_ {
    text.char_indices().filter_map(|(col, ch)| match ch {
        '{' => Some((col, Brace::Open)),
        '}' => Some((col, Brace::Close)),
        _ => None,
    })
}

/// Count of `{` and `}` on a line
pub fn brace_counts(text: &str) -> (usize, usize) {
    braces(text).fold((0, 0), |(open, close), (_, brace)| match brace {
        Brace::Open => (open + 1, close),
        Brace::Close => (open, close + 1),
    })
}

/// `(` count minus `)` count
pub fn paren_balance(text: &str) -> isize {
    text.chars().fold(0, |depth, ch| match ch {
        '(' => depth + 1,
        ')' => depth - 1,
        _ => depth,
    })
}

/// Whitespace-separated tokens with their start columns
pub fn tokens(text: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start = None;
    for (col, ch) in text.char_indices() {
        match (ch.is_whitespace(), start) {
            (false, None) => start = Some(col),
            (true, Some(s)) => {
                out.push((s, &text[s..col]));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push((s, &text[s..]));
    }
    out
}

/// No lowercase letters (an empty string counts as uppercase)
pub fn is_upper(text: &str) -> bool {
    !text.chars().any(char::is_lowercase)
}

pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
