//! Core value types shared by every detector
//!
//! - [`EntityType`] tags what a range represents
//! - [`Range`] is a completed, positioned region
//! - [`Frame`] remembers an opening token until its closer shows up

use serde::{Deserialize, Serialize};

/// Classification of a detected region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityType {
    /// Brace block with no recognised keyword in front of it
    #[default]
    Unknown,
    /// `#if` / `#elif` / `#else` branch
    Preprocessor,
    Namespace,
    Class,
    Struct,
    Enum,
    /// Function body
    Function,
    /// Nested brace block inside a function body
    WithinFunction,
    /// `// ...`
    Comment,
    /// `/* ... */`
    CommentBlock,
    /// `/// ...`
    Documentation,
    /// `/** ... */`
    DocumentationBlock,
    /// Quoted literal or single-line raw string
    String,
    /// Multi-line raw string
    StringBlock,
    Other,
}

impl EntityType {
    /// Block comments and documentation blocks
    pub fn is_comment_block(self) -> bool {
        matches!(self, EntityType::CommentBlock | EntityType::DocumentationBlock)
    }

    /// Namespace, class, struct and enum
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            EntityType::Namespace | EntityType::Class | EntityType::Struct | EntityType::Enum
        )
    }

    /// Short lowercase label used in logs and CLI output
    pub fn label(self) -> &'static str {
        match self {
            EntityType::Unknown => "unknown",
            EntityType::Preprocessor => "preprocessor",
            EntityType::Namespace => "namespace",
            EntityType::Class => "class",
            EntityType::Struct => "struct",
            EntityType::Enum => "enum",
            EntityType::Function => "function",
            EntityType::WithinFunction => "withinFunction",
            EntityType::Comment => "comment",
            EntityType::CommentBlock => "commentBlock",
            EntityType::Documentation => "documentation",
            EntityType::DocumentationBlock => "documentationBlock",
            EntityType::String => "string",
            EntityType::StringBlock => "stringBlock",
            EntityType::Other => "other",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A completed region of the document
///
/// Lines and columns are zero-based; columns are byte offsets into the line.
/// `end_col` points at the first character of the closing token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
    /// Depth of the owning stack when the range closed
    pub scope: usize,
    /// `end_line - start_line`
    pub dist: usize,
    #[serde(rename = "type")]
    pub kind: EntityType,
}

impl Range {
    /// Build a range from two positions, deriving `dist`.
    ///
    /// Callers guarantee `(start_line, start_col) <= (end_line, end_col)`.
    pub fn new(
        kind: EntityType,
        (start_line, start_col): (usize, usize),
        (end_line, end_col): (usize, usize),
    ) -> Self {
        debug_assert!((start_line, start_col) <= (end_line, end_col));
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
            scope: 0,
            dist: end_line - start_line,
            kind,
        }
    }

    /// Builder-style scope assignment
    pub fn with_scope(mut self, scope: usize) -> Self {
        self.scope = scope;
        self
    }

    /// Range opened by `frame` and closed at `(line, col)`
    pub fn closing<F>(kind: EntityType, frame: Frame<F>, line: usize, col: usize) -> Self {
        Self::new(kind, (frame.line, frame.column), (line, col))
    }

    /// Whether `line` lies within the range, ignoring columns
    pub fn contains_line(&self, line: usize) -> bool {
        self.start_line <= line && line <= self.end_line
    }

    /// Whether the span `[start_col, end_col)` on `line` lies inside the range
    pub fn covers(&self, line: usize, start_col: usize, end_col: usize) -> bool {
        (line, start_col) >= (self.start_line, self.start_col)
            && (line, end_col) <= (self.end_line, self.end_col)
    }
}

/// Saved position of an opening token
///
/// The flag carries detector-specific meaning: the documentation marker
/// for comment openers, the header-guard marker for `#if` frames, the
/// pending entity tag for structural braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame<F = bool> {
    pub line: usize,
    pub column: usize,
    pub flag: F,
}

impl<F: Default> Frame<F> {
    /// Frame without annotation
    pub fn at(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            flag: F::default(),
        }
    }
}

impl<F> Frame<F> {
    /// Frame carrying `flag`
    pub fn flagged(line: usize, column: usize, flag: F) -> Self {
        Self { line, column, flag }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_range_dist_is_line_span() {
        let range = Range::new(EntityType::Function, (2, 9), (4, 0));
        assert_eq!(range.dist, 2);
        assert_eq!(range.scope, 0);
    }

    #[test]
    fn test_covers_respects_columns_on_boundary_lines() {
        let range = Range::new(EntityType::String, (3, 4), (3, 16));
        assert!(range.covers(3, 14, 15));
        assert!(!range.covers(3, 2, 3));
        assert!(!range.covers(3, 16, 17));
        assert!(!range.covers(2, 5, 6));
    }

    #[test]
    fn test_covers_multi_line_block() {
        let range = Range::new(EntityType::CommentBlock, (0, 0), (5, 2));
        assert!(range.covers(2, 40, 45));
        assert!(range.covers(5, 0, 1));
        assert!(!range.covers(5, 3, 4));
    }

    #[test]
    fn test_frame_defaults() {
        let frame: Frame = Frame::at(1, 2);
        assert!(!frame.flag);
        let tagged = Frame::flagged(1, 2, EntityType::Class);
        assert_eq!(tagged.flag, EntityType::Class);
    }

    #[test]
    fn test_closing_accepts_any_frame_flag() {
        let tagged = Frame::flagged(2, 4, EntityType::Struct);
        let range = Range::closing(EntityType::Struct, tagged, 7, 0);
        assert_eq!((range.start_line, range.start_col), (2, 4));
        assert_eq!((range.end_line, range.dist), (7, 5));

        let plain: Frame = Frame::at(1, 0);
        assert_eq!(Range::closing(EntityType::Function, plain, 3, 0).dist, 2);
    }

    #[test]
    fn test_entity_helpers() {
        assert!(EntityType::DocumentationBlock.is_comment_block());
        assert!(!EntityType::Comment.is_comment_block());
        assert!(EntityType::Enum.is_structural());
        assert!(!EntityType::Unknown.is_structural());
        assert_eq!(EntityType::WithinFunction.to_string(), "withinFunction");
    }
}
