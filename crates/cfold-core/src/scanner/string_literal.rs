//! Quoted string literals on a single line

use crate::repository::{Category, RangeRepository};
use crate::types::{EntityType, Range};

/// Columns of `"` not directly preceded by a backslash
fn quote_columns(text: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|&(col, &b)| b == b'"' && (col == 0 || bytes[col - 1] != b'\\'))
        .map(|(col, _)| col)
        .collect()
}

/// Pair quotes 1st-2nd, 3rd-4th, ...; a trailing unmatched quote is dropped
pub fn scan_line(line: usize, text: &str, repo: &mut RangeRepository, trace: bool) {
    for pair in quote_columns(text).chunks_exact(2) {
        let range = Range::new(EntityType::String, (line, pair[0]), (line, pair[1]));
        if repo.push(Category::StringLike, range) {
            scan_log!(trace, "string add: [L{}:{}->{}]", line, pair[0], pair[1]);
        }
    }
}
