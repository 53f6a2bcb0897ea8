//! Folding range assembly
//!
//! Turns the ranges of a scan into the folding result, keeping only the
//! kinds switched on in the [`ScanConfig`]:
//! - Preprocessor branches within the recursive depth and minimum span
//! - Namespace, class, struct and enum blocks
//! - Block comments and documentation blocks
//! - Function bodies and within-function blocks

use serde::Serialize;

use crate::config::ScanConfig;
use crate::repository::RangeRepository;
use crate::types::{EntityType, Range};

/// A line span the editor can collapse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoldRange {
    pub start_line: usize,
    pub end_line: usize,
    pub kind: EntityType,
}

impl FoldRange {
    pub fn contains_line(&self, line: usize) -> bool {
        self.start_line <= line && line <= self.end_line
    }

    /// Number of lines hidden when folded
    pub fn span(&self) -> usize {
        self.end_line - self.start_line
    }
}

impl From<&Range> for FoldRange {
    fn from(range: &Range) -> Self {
        Self {
            start_line: range.start_line,
            end_line: range.end_line,
            kind: range.kind,
        }
    }
}

/// Analyzer for generating folding ranges
pub struct FoldingAnalyzer;

impl FoldingAnalyzer {
    /// Enabled ranges in output order: preprocessor, structural,
    /// comment blocks, functions, within-function blocks
    pub fn generate_ranges(repo: &RangeRepository, config: &ScanConfig) -> Vec<FoldRange> {
        let mut ranges = Vec::new();

        // ----- PREPROCESSOR LOGIC -----
        if config.preprocessor {
            ranges.extend(
                repo.preprocessor
                    .iter()
                    .filter(|r| {
                        r.scope <= config.preprocessor_recursive_depth
                            && r.dist >= config.preprocessor_min_lines
                    })
                    .map(FoldRange::from),
            );
        }

        // ----- STRUCTURAL LOGIC -----
        ranges.extend(
            repo.structural
                .iter()
                .filter(|r| r.kind.is_structural() && config.is_enabled(r.kind))
                .map(FoldRange::from),
        );

        // ----- COMMENT BLOCK LOGIC -----
        ranges.extend(
            repo.string_like
                .iter()
                .filter(|r| r.kind.is_comment_block() && config.is_enabled(r.kind))
                .map(FoldRange::from),
        );

        // ----- FUNCTION LOGIC -----
        if config.function {
            ranges.extend(repo.functions.iter().map(FoldRange::from));
        }
        if config.within_function {
            ranges.extend(repo.within_functions.iter().map(FoldRange::from));
        }

        ranges
    }
}
