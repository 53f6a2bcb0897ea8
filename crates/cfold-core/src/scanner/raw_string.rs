//! Raw string literals (`R"( ... )"`), possibly spanning lines

use crate::repository::{Category, RangeRepository};
use crate::types::{EntityType, Range};

const OPENER: &str = "R\"(";
const CLOSER: &str = ")\"";

/// Remembers where an unterminated raw string started
#[derive(Debug, Default)]
pub struct RawStringDetector {
    open: Option<(usize, usize)>,
}

impl RawStringDetector {
    /// The current line is inside a raw string opened earlier
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Returns `true` when the line belongs to the raw string and no other
    /// detector may look at it
    pub fn scan_line(&mut self, line: usize, text: &str, repo: &mut RangeRepository, trace: bool) -> bool {
        let mut from = 0;

        if let Some((start_line, start_col)) = self.open {
            let Some(end_col) = text.find(CLOSER) else {
                return true;
            };
            self.open = None;
            let range = Range::new(EntityType::String, (start_line, start_col), (line, end_col));
            if repo.push(Category::StringLike, range) {
                scan_log!(trace, "stringblock release: [L{}->L{}]", start_line, line);
            }
            from = end_col + CLOSER.len();
        }

        let Some(offset) = text[from..].find(OPENER) else {
            return false;
        };
        let start_col = from + offset;
        let body = start_col + OPENER.len();

        match text[body..].find(CLOSER) {
            Some(offset) => {
                let range = Range::new(EntityType::String, (line, start_col), (line, body + offset));
                if repo.push(Category::StringLike, range) {
                    scan_log!(trace, "stringblock single add: [L{}:{}->{}]", line, start_col, body + offset);
                }
                false
            }
            None => {
                scan_log!(trace, "stringblock push: [L{}] {}", line, text);
                self.open = Some((line, start_col));
                true
            }
        }
    }
}
