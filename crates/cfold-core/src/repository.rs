//! Per-scan storage of detected ranges
//!
//! Five independent, append-only collections. Each one holds at most
//! `capacity` ranges; anything past that is dropped silently while
//! detection carries on.

use crate::types::Range;

/// Collection a detector appends to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// `#if` family branches
    Preprocessor,
    /// Comments, documentation and string literals
    StringLike,
    Function,
    WithinFunction,
    /// Namespace, class, struct, enum (and untagged brace blocks)
    Structural,
}

/// Ranges produced by one scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRepository {
    pub preprocessor: Vec<Range>,
    pub string_like: Vec<Range>,
    pub functions: Vec<Range>,
    pub within_functions: Vec<Range>,
    pub structural: Vec<Range>,
    capacity: usize,
    line_count: usize,
}

impl RangeRepository {
    /// Empty repository holding at most `capacity` ranges per category
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            preprocessor: Vec::new(),
            string_like: Vec::new(),
            functions: Vec::new(),
            within_functions: Vec::new(),
            structural: Vec::new(),
            capacity,
            line_count: 0,
        }
    }

    /// Clear every collection, keeping the allocations
    pub fn reset(&mut self, capacity: usize, line_count: usize) {
        self.preprocessor.clear();
        self.string_like.clear();
        self.functions.clear();
        self.within_functions.clear();
        self.structural.clear();
        self.capacity = capacity;
        self.line_count = line_count;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of lines in the scanned document
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn category(&self, category: Category) -> &[Range] {
        match category {
            Category::Preprocessor => &self.preprocessor,
            Category::StringLike => &self.string_like,
            Category::Function => &self.functions,
            Category::WithinFunction => &self.within_functions,
            Category::Structural => &self.structural,
        }
    }

    fn category_mut(&mut self, category: Category) -> &mut Vec<Range> {
        match category {
            Category::Preprocessor => &mut self.preprocessor,
            Category::StringLike => &mut self.string_like,
            Category::Function => &mut self.functions,
            Category::WithinFunction => &mut self.within_functions,
            Category::Structural => &mut self.structural,
        }
    }

    /// Whether another range of `category` would still be kept
    pub fn has_room(&self, category: Category) -> bool {
        self.category(category).len() < self.capacity
    }

    /// Append a range; returns `false` when the category is full and the
    /// range was dropped
    pub fn push(&mut self, category: Category, range: Range) -> bool {
        if !self.has_room(category) {
            return false;
        }
        self.category_mut(category).push(range);
        true
    }

    /// Whether `[start_col, end_col)` on `line` falls inside a recorded
    /// comment, documentation or string range
    pub fn in_string_like(&self, line: usize, start_col: usize, end_col: usize) -> bool {
        self.string_like
            .iter()
            .any(|range| range.covers(line, start_col, end_col))
    }

    /// Total number of stored ranges
    pub fn len(&self) -> usize {
        self.preprocessor.len()
            + self.string_like.len()
            + self.functions.len()
            + self.within_functions.len()
            + self.structural.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RangeRepository {
    fn default() -> Self {
        Self::with_capacity(crate::config::DEFAULT_MAX_RANGES)
    }
}
