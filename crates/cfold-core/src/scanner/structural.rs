//! Namespace, class, struct and enum blocks
//!
//! Every brace outside a function body goes through one shared stack so
//! ordinary code blocks stay balanced. A keyword seen on a line tags the
//! braces that follow it; untagged pairs are still emitted as `Unknown`
//! and filtered out later.

use crate::repository::{Category, RangeRepository};
use crate::stack::FrameStack;
use crate::types::{EntityType, Frame, Range};

use super::text::{braces, indices_of, Brace};

/// Searched in this order; the first hit on a line wins
const KEYWORDS: [(&str, EntityType); 4] = [
    ("namespace", EntityType::Namespace),
    ("class", EntityType::Class),
    ("struct", EntityType::Struct),
    ("enum", EntityType::Enum),
];

#[derive(Debug, Default)]
pub struct StructuralDetector {
    stack: FrameStack<EntityType>,
    pending: EntityType,
}

impl StructuralDetector {
    pub fn scan_line(&mut self, line: usize, text: &str, repo: &mut RangeRepository, trace: bool) {
        let keyword = KEYWORDS.iter().find(|(word, _)| {
            indices_of(text, word).any(|col| !repo.in_string_like(line, col, col + word.len()))
        });
        if let Some(&(_, kind)) = keyword {
            self.pending = kind;
        }
        // Forward declaration, no body follows
        if text.contains(';') {
            self.pending = EntityType::Unknown;
        }

        for (col, brace) in braces(text) {
            if repo.in_string_like(line, col, col + 1) {
                continue;
            }
            match brace {
                Brace::Open => {
                    scan_log!(trace, "range push {{: [L{}:{}] [TYPE:{}]", line, col, self.pending);
                    self.stack.push(Frame::flagged(line, col, self.pending));
                }
                Brace::Close => {
                    let Some(frame) = self.stack.pop() else {
                        continue;
                    };
                    let range = Range::closing(frame.flag, frame, line, col);
                    if repo.push(Category::Structural, range) {
                        scan_log!(
                            trace,
                            "range add: [L{}:{}->L{}:{}] [TYPE:{}]",
                            frame.line,
                            frame.column,
                            line,
                            col,
                            frame.flag
                        );
                    }
                }
            }
        }
    }
}
