//! Function bodies and the blocks nested inside them
//!
//! A single candidate slot follows at most one function at a time:
//!
//! - **Start**: a line with a call-like token `name(` and no `;`. The
//!   parameter list is balanced across lines; prototypes (`;` after the
//!   list) and one-line bodies are dropped.
//! - **Body**: while a candidate is active every line belongs to it. The
//!   body closes on a `}` in the same column as the first token of the
//!   signature.
//! - **Nested blocks**: other matched braces inside the body become
//!   within-function ranges when enabled.

use crate::repository::{Category, RangeRepository};
use crate::stack::FrameStack;
use crate::types::{EntityType, Frame, Range};

use super::text::{brace_counts, braces, is_blank, is_upper, paren_balance, tokens, Brace};
use super::Document;

/// Outcome of offering a line to the function detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Not a function line; later detectors may look at it
    Pass,
    /// The detector owns the line
    Consumed,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    line: usize,
    /// Column of the signature's first token; the closing `}` must line up
    column: usize,
    /// Saw `" :"` (an initializer list) before the body opened
    constructor: bool,
    /// A `{` has been pushed for this candidate
    brace_seen: bool,
}

#[derive(Debug, Default)]
pub struct FunctionDetector {
    candidate: Option<Candidate>,
    stack: FrameStack<bool>,
    /// Minimum span of a within-function range; `None` disables them
    within_min_lines: Option<usize>,
}

impl FunctionDetector {
    pub fn new(within_min_lines: Option<usize>) -> Self {
        Self {
            within_min_lines,
            ..Self::default()
        }
    }

    /// Offer the line at `index` to the detector.
    ///
    /// Starting a candidate may read ahead to balance the parameter list;
    /// `index` is then moved to the last line the detector consumed.
    pub fn scan<D: Document + ?Sized>(
        &mut self,
        doc: &D,
        index: &mut usize,
        comment_open: bool,
        repo: &mut RangeRepository,
        trace: bool,
    ) -> Step {
        if self.candidate.is_some() {
            self.track_body(*index, doc.line_at(*index), repo, trace);
            return Step::Consumed;
        }
        if comment_open {
            return Step::Pass;
        }
        self.start_candidate(doc, index, repo, trace)
    }

    fn reset(&mut self) {
        self.candidate = None;
        self.stack.clear();
    }

    // ----- BODY TRACKING -----

    fn track_body(&mut self, line: usize, text: &str, repo: &mut RangeRepository, trace: bool) {
        let Some(mut candidate) = self.candidate else {
            return;
        };

        if !candidate.brace_seen {
            if text.contains(';') {
                scan_log!(trace, "func not valid: [L{}] {}", line, text);
                self.reset();
                return;
            }
            if text.contains(" :") {
                candidate.constructor = true;
            }
        }

        let (opens, closes) = line_braces(line, text, repo);

        for col in opens {
            scan_log!(trace, "func push {{: [L{}:{}]", line, col);
            candidate.brace_seen = true;
            self.stack.push(Frame::at(line, col));
        }

        for col in closes {
            let first = self.stack.bottom();
            let Some(frame) = self.stack.pop() else {
                continue;
            };
            scan_log!(trace, "func pop }}: [L{}:{}]", line, col);

            let closes_body = col == candidate.column
                || (candidate.constructor && self.stack.is_empty() && is_blank(text));
            if closes_body {
                let start = first.unwrap_or(frame);
                let range = Range::closing(EntityType::Function, start, line, col);
                if repo.push(Category::Function, range) {
                    scan_log!(trace, "func add: [L{}->L{}]", start.line, line);
                }
                self.reset();
                return;
            }

            self.emit_within(&candidate, frame, line, col, repo, trace);
        }

        self.candidate = Some(candidate);
    }

    fn emit_within(
        &self,
        candidate: &Candidate,
        frame: Frame,
        line: usize,
        col: usize,
        repo: &mut RangeRepository,
        trace: bool,
    ) {
        let Some(min_lines) = self.within_min_lines else {
            return;
        };
        if col < candidate.column || frame.column < candidate.column {
            return;
        }
        if frame.line == line || line - frame.line < min_lines {
            return;
        }
        let range = Range::closing(EntityType::WithinFunction, frame, line, col);
        if repo.push(Category::WithinFunction, range) {
            scan_log!(trace, "within func add: [L{}->L{}]", frame.line, line);
        }
    }

    // ----- CANDIDATE START -----

    fn start_candidate<D: Document + ?Sized>(
        &mut self,
        doc: &D,
        index: &mut usize,
        repo: &RangeRepository,
        trace: bool,
    ) -> Step {
        let line = *index;
        let text = doc.line_at(line);
        if !text.contains('(') || text.contains(';') {
            return Step::Pass;
        }

        let words = tokens(text);
        let Some(&(token_col, token)) = words.iter().find(|(_, word)| word.contains('(')) else {
            return Step::Pass;
        };
        if repo.in_string_like(line, token_col, token_col + token.len()) {
            scan_log!(trace, "func in string: [L{}:{}] {}", line, token_col, text);
            return Step::Pass;
        }

        let name = token.split('(').next().unwrap_or_default();
        if is_upper(name) {
            scan_log!(trace, "func is macro: [L{}] {}", line, text);
            return Step::Consumed;
        }

        // The first token is always found: `token` is one of them
        let anchor = words.first().map_or(token_col, |&(col, _)| col);

        let mut depth = 0;
        let mut close_line = None;
        for i in line..doc.line_count() {
            depth += paren_balance(doc.line_at(i));
            if depth <= 0 {
                close_line = Some(i);
                break;
            }
        }
        let Some(close_line) = close_line else {
            scan_log!(trace, "func parameters never close: [L{}]", line);
            *index = doc.line_count() - 1;
            return Step::Consumed;
        };

        *index = close_line;
        let closing = doc.line_at(close_line);
        if closing.contains(';') {
            scan_log!(trace, "func is declaration: [L{}->L{}]", line, close_line);
            return Step::Consumed;
        }
        let (opened, closed) = brace_counts(closing);
        if opened > 0 && opened == closed {
            scan_log!(trace, "func is one-liner: [L{}]", close_line);
            return Step::Consumed;
        }

        let mut candidate = Candidate {
            line,
            column: anchor,
            constructor: closing.contains(" :"),
            brace_seen: false,
        };
        scan_log!(trace, "func candidate: [L{}:{}] {}", candidate.line, candidate.column, text);

        let (opens, closes) = line_braces(close_line, closing, repo);
        for col in opens {
            candidate.brace_seen = true;
            self.stack.push(Frame::at(close_line, col));
        }
        for _ in closes {
            self.stack.pop();
        }

        self.candidate = Some(candidate);
        Step::Consumed
    }
}

/// Columns of the `{` and of the `}` on a line, outside string-like ranges.
///
/// The detector pushes every opener of a line before popping any closer,
/// so on `} else {` the closer pairs with the new `{` and the block that
/// was already open runs on to the next line.
fn line_braces(line: usize, text: &str, repo: &RangeRepository) -> (Vec<usize>, Vec<usize>) {
    braces(text)
        .filter(|&(col, _)| !repo.in_string_like(line, col, col + 1))
        .fold((Vec::new(), Vec::new()), |(mut opens, mut closes), (col, brace)| {
            match brace {
                Brace::Open => opens.push(col),
                Brace::Close => closes.push(col),
            }
            (opens, closes)
        })
}
