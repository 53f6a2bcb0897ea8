//! `#if` / `#elif` / `#else` / `#endif` branches

use regex::Regex;
use std::sync::OnceLock;

use crate::repository::{Category, RangeRepository};
use crate::stack::FrameStack;
use crate::types::{EntityType, Frame, Range};

/// Include guard condition: the line ends in `_H`, `_HH` or `_HPP`
fn is_header_guard(text: &str) -> bool {
    static GUARD_RE: OnceLock<Regex> = OnceLock::new();
    let guard_re = GUARD_RE.get_or_init(|| Regex::new(r"_(H|HH|HPP)$").unwrap());
    guard_re.is_match(text)
}

/// Tracks open conditional branches; frame flag marks an ignored guard
#[derive(Debug, Default)]
pub struct PreprocessorDetector {
    stack: FrameStack<bool>,
    ignore_guard: bool,
}

impl PreprocessorDetector {
    pub fn new(ignore_guard: bool) -> Self {
        Self {
            stack: FrameStack::new(),
            ignore_guard,
        }
    }

    pub fn scan_line(&mut self, line: usize, text: &str, repo: &mut RangeRepository, trace: bool) {
        if text.starts_with("#if") {
            let guard = self.ignore_guard && is_header_guard(text);
            scan_log!(trace, "preproc push: [L{}] guard={} {}", line, guard, text);
            self.stack.push(Frame::flagged(line, 0, guard));
            return;
        }

        let branch = text.starts_with("#elif") || text.starts_with("#else");
        let endif = text.starts_with("#endif");
        if !branch && !endif {
            return;
        }

        if let Some(frame) = self.stack.pop() {
            if !frame.flag {
                // A new branch ends the previous one on the line before it
                let end_line = if branch { line - 1 } else { line };
                let range = Range::new(EntityType::Preprocessor, (frame.line, 0), (end_line, 0))
                    .with_scope(self.stack.depth());
                if repo.push(Category::Preprocessor, range) {
                    scan_log!(
                        trace,
                        "preproc block add: [L{}->L{}] scope={}",
                        frame.line,
                        end_line,
                        range.scope
                    );
                }
            }
        }

        if branch {
            scan_log!(trace, "preproc else(if) push: [L{}] {}", line, text);
            self.stack.push(Frame::at(line, 0));
        }
    }
}
