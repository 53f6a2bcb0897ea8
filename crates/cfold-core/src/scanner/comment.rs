//! Block (`/* */`, `/** */`) and line (`//`, `///`) comments

use crate::repository::{Category, RangeRepository};
use crate::stack::FrameStack;
use crate::types::{EntityType, Frame, Range};

use super::text::indices_of;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Open,
    Close,
}

/// Tracks open block comments across lines; frame flag marks `/**`
#[derive(Debug, Default)]
pub struct CommentDetector {
    stack: FrameStack<bool>,
}

impl CommentDetector {
    /// A block comment opened on an earlier line is still unterminated
    pub fn is_open(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Push every `/*` and pop one frame per `*/`, in column order
    pub fn scan_blocks(&mut self, line: usize, text: &str, repo: &mut RangeRepository, trace: bool) {
        let mut markers: Vec<(usize, Marker)> = indices_of(text, "/*")
            .map(|col| (col, Marker::Open))
            .chain(indices_of(text, "*/").map(|col| (col, Marker::Close)))
            .collect();
        markers.sort_by_key(|(col, _)| *col);

        for (col, marker) in markers {
            match marker {
                Marker::Open => {
                    let is_doc = text.as_bytes().get(col + 2) == Some(&b'*');
                    self.stack.push(Frame::flagged(line, col, is_doc));
                }
                Marker::Close => {
                    let Some(frame) = self.stack.pop() else {
                        continue;
                    };
                    let kind = if frame.flag {
                        EntityType::DocumentationBlock
                    } else {
                        EntityType::CommentBlock
                    };
                    let range = Range::closing(kind, frame, line, col);
                    if repo.push(Category::StringLike, range) {
                        scan_log!(
                            trace,
                            "doc/comment block add: [L{}:{}->L{}:{}] [TYPE:{}]",
                            frame.line,
                            frame.column,
                            line,
                            col,
                            kind
                        );
                    }
                }
            }
        }
    }

    /// Record the first `//` that is not inside an earlier string-like range
    pub fn scan_line_comment(&self, line: usize, text: &str, repo: &mut RangeRepository, trace: bool) {
        let Some(col) = indices_of(text, "//").find(|&col| !repo.in_string_like(line, col, col + 2))
        else {
            return;
        };

        let kind = if text[col + 2..].starts_with('/') {
            EntityType::Documentation
        } else {
            EntityType::Comment
        };
        let range = Range::new(kind, (line, col), (line, text.len()));
        if repo.push(Category::StringLike, range) {
            scan_log!(trace, "doc/comment single add: [L{}:{}->{}] [TYPE:{}]", line, col, text.len(), kind);
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn run(lines: &[&str]) -> Vec<Range> {
        let mut detector = CommentDetector::default();
        let mut repo = RangeRepository::default();
        for (i, text) in lines.iter().enumerate() {
            detector.scan_blocks(i, text, &mut repo, false);
            detector.scan_line_comment(i, text, &mut repo, false);
        }
        repo.string_like
    }

    #[test]
    fn test_multi_line_block() {
        let ranges = run(&["/*", " * text", " */"]);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].kind, EntityType::CommentBlock);
        assert_eq!((ranges[0].start_line, ranges[0].start_col), (0, 0));
        assert_eq!((ranges[0].end_line, ranges[0].end_col), (2, 1));
    }

    #[test]
    fn test_documentation_block() {
        let ranges = run(&["/**", " * @brief x", " */"]);
        assert_eq!(ranges[0].kind, EntityType::DocumentationBlock);
    }

    #[test]
    fn test_two_blocks_on_one_line_pair_in_order() {
        let ranges = run(&["/* a */ int x; /* b */"]);
        let cols: Vec<(usize, usize)> = ranges.iter().map(|r| (r.start_col, r.end_col)).collect();
        assert_eq!(cols, vec![(0, 5), (15, 20)]);
    }

    #[test]
    fn test_unmatched_closer_ignored() {
        assert!(run(&["*/", "int x;"]).is_empty());
    }

    #[test]
    fn test_unterminated_block_stays_open() {
        let mut detector = CommentDetector::default();
        let mut repo = RangeRepository::default();
        detector.scan_blocks(0, "/* open", &mut repo, false);
        assert!(detector.is_open());
        assert!(repo.string_like.is_empty());
    }

    #[test]
    fn test_line_comment_and_documentation() {
        let ranges = run(&["int x; // note", "/// docs"]);
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].kind, EntityType::Comment);
        assert_eq!((ranges[0].start_col, ranges[0].end_col), (7, 14));
        assert_eq!(ranges[1].kind, EntityType::Documentation);
    }

    #[test]
    fn test_line_comment_inside_block_is_skipped() {
        let ranges = run(&["/* a // b */ x"]);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].kind, EntityType::CommentBlock);
    }
}
