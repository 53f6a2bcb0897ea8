//! Fold-annotated source dump
//!
//! Marks every folding range in the text itself so a whole result can be
//! reviewed as a diff: the i-th range (ordered by start line) appends
//! ` @_i_` to its start line and to its end line.

use crate::folding::FoldRange;
use crate::scanner::Document;

/// Lines of `doc` joined with `\n`, each range's marker appended to its
/// boundary lines. Ranges outside the document are skipped.
pub fn annotate<D: Document + ?Sized>(doc: &D, ranges: &[FoldRange]) -> String {
    let mut lines: Vec<String> = (0..doc.line_count())
        .map(|i| doc.line_at(i).to_string())
        .collect();

    let mut ordered = ranges.to_vec();
    ordered.sort_by_key(|range| range.start_line);

    for (counter, range) in ordered.iter().enumerate() {
        if range.end_line >= lines.len() {
            continue;
        }
        let marker = format!(" @_{counter}_");
        lines[range.start_line].push_str(&marker);
        lines[range.end_line].push_str(&marker);
    }

    lines.join("\n")
}
