//! Single-pass heuristic scanner
//!
//! One forward walk over the lines of a document. Each line is offered to
//! the detectors in a fixed order:
//!
//! 1. preprocessor conditionals (skipped inside a raw string)
//! 2. block comments and documentation blocks
//! 3. raw strings; an open raw string owns the line
//! 4. line comments
//! 5. quoted string literals
//! 6. function bodies; an active candidate owns the line
//! 7. namespace / class / struct / enum braces
//!
//! All detector state lives in [`ScanState`] and is created per call, so a
//! [`Scanner`] can be shared between threads and reused freely.

/// Per-scan event logging, enabled by the scanner's trace flag
macro_rules! scan_log {
    ($trace:expr, $($arg:tt)+) => {
        if $trace {
            tracing::info!(target: "cfold::scan", $($arg)+);
        }
    };
}

mod comment;
mod function;
mod preprocessor;
mod raw_string;
mod string_literal;
mod structural;
mod text;


use std::time::Instant;

use tracing::debug;

use crate::config::ScanConfig;
use crate::repository::RangeRepository;

use comment::CommentDetector;
use function::{FunctionDetector, Step};
use preprocessor::PreprocessorDetector;
use raw_string::RawStringDetector;
use structural::StructuralDetector;

/// Read access to the lines of a document
pub trait Document {
    fn line_count(&self) -> usize;

    /// Text of line `index`, without its line terminator
    fn line_at(&self, index: usize) -> &str;
}

impl<S: AsRef<str>> Document for [S] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_at(&self, index: usize) -> &str {
        self[index].as_ref()
    }
}

impl<S: AsRef<str>> Document for Vec<S> {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_at(&self, index: usize) -> &str {
        self[index].as_ref()
    }
}

/// Split text into lines the way editors number them.
///
/// Accepts `\n` and `\r\n` endings; a trailing newline yields a final
/// empty line.
pub fn lines_of(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Detector state for one scan
struct ScanState {
    preprocessor: PreprocessorDetector,
    comment: CommentDetector,
    raw_string: RawStringDetector,
    function: FunctionDetector,
    structural: StructuralDetector,
}

impl ScanState {
    fn new(config: &ScanConfig) -> Self {
        let within = config
            .within_function
            .then_some(config.within_function_min_lines);
        Self {
            preprocessor: PreprocessorDetector::new(config.preprocessor_ignore_guard),
            comment: CommentDetector::default(),
            raw_string: RawStringDetector::default(),
            function: FunctionDetector::new(within),
            structural: StructuralDetector::default(),
        }
    }
}

/// Drives the detectors over a document
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    config: ScanConfig,
    trace: bool,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            trace: false,
        }
    }

    /// Log every push, pop and emitted range at INFO under `cfold::scan`
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan `doc` into a fresh repository
    pub fn scan<D: Document + ?Sized>(&self, doc: &D) -> RangeRepository {
        let mut repo = RangeRepository::with_capacity(self.config.max_ranges);
        self.scan_into(doc, &mut repo);
        repo
    }

    /// Scan `text` after splitting it with [`lines_of`]
    pub fn scan_text(&self, text: &str) -> RangeRepository {
        let lines = lines_of(text);
        self.scan(lines.as_slice())
    }

    /// Scan `doc`, reusing the allocations of `repo`.
    ///
    /// Whatever `repo` held before is discarded.
    pub fn scan_into<D: Document + ?Sized>(&self, doc: &D, repo: &mut RangeRepository) {
        let started = Instant::now();
        let line_count = doc.line_count();
        repo.reset(self.config.max_ranges, line_count);

        let mut state = ScanState::new(&self.config);
        let mut index = 0;
        while index < line_count {
            self.scan_line(doc, &mut index, &mut state, repo);
            index += 1;
        }

        debug!(
            lines = line_count,
            ranges = repo.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Scanned document"
        );
    }

    /// Run the detectors on one line; may advance `index` past lines the
    /// function detector read ahead
    fn scan_line<D: Document + ?Sized>(
        &self,
        doc: &D,
        index: &mut usize,
        state: &mut ScanState,
        repo: &mut RangeRepository,
    ) {
        let trace = self.trace;
        let line = *index;
        let text = doc.line_at(line);

        if self.config.preprocessor && !state.raw_string.is_open() {
            state.preprocessor.scan_line(line, text, repo, trace);
        }

        state.comment.scan_blocks(line, text, repo, trace);

        if state.raw_string.scan_line(line, text, repo, trace) {
            return;
        }

        state.comment.scan_line_comment(line, text, repo, trace);
        string_literal::scan_line(line, text, repo, trace);

        if self.config.function {
            let comment_open = state.comment.is_open();
            if state.function.scan(doc, index, comment_open, repo, trace) == Step::Consumed {
                return;
            }
        }

        state.structural.scan_line(line, text, repo, trace);
    }
}
