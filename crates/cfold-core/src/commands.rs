//! Fold commands
//!
//! Each command picks anchor lines out of a scan and asks the editor to
//! fold one level up from them. Commands only act on a collapsed cursor
//! and need at least two distinct anchors; anything else is a no-op.

use serde::{Deserialize, Serialize};

use crate::config::ScanConfig;
use crate::folding::{FoldRange, FoldingAnalyzer};
use crate::repository::RangeRepository;

/// Commands exposed to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoldCommand {
    FoldAll,
    FoldDocComments,
    FoldAroundCursor,
    FoldFunctions,
    FoldFunctionsAndStructural,
    /// Switch per-scan event logging on or off
    ToggleLog,
}

impl FoldCommand {
    pub const ALL: [FoldCommand; 6] = [
        FoldCommand::FoldAll,
        FoldCommand::FoldDocComments,
        FoldCommand::FoldAroundCursor,
        FoldCommand::FoldFunctions,
        FoldCommand::FoldFunctionsAndStructural,
        FoldCommand::ToggleLog,
    ];

    /// Stable command identifier
    pub fn id(self) -> &'static str {
        match self {
            FoldCommand::FoldAll => "cfold.foldAll",
            FoldCommand::FoldDocComments => "cfold.foldDocComments",
            FoldCommand::FoldAroundCursor => "cfold.foldAroundCursor",
            FoldCommand::FoldFunctions => "cfold.foldFunction",
            FoldCommand::FoldFunctionsAndStructural => "cfold.foldFunctionClassStruct",
            FoldCommand::ToggleLog => "cfold.toggleLog",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.id() == id)
    }

    /// Whether the command produces a [`FoldRequest`]
    pub fn is_fold(self) -> bool {
        self != FoldCommand::ToggleLog
    }

    /// Work out what to ask the editor to fold, or `None` for a no-op
    pub fn plan(
        self,
        repo: &RangeRepository,
        config: &ScanConfig,
        ctx: &CommandContext,
    ) -> Option<FoldRequest> {
        if !self.is_fold() || !ctx.selection_empty {
            return None;
        }

        let anchors: Vec<usize> = match self {
            FoldCommand::FoldAll => return Some(FoldRequest::All),
            FoldCommand::FoldDocComments => repo
                .string_like
                .iter()
                .filter(|r| r.kind.is_comment_block())
                .map(|r| r.start_line)
                .collect(),
            FoldCommand::FoldAroundCursor => {
                around_cursor(&FoldingAnalyzer::generate_ranges(repo, config), ctx.cursor_line)
            }
            FoldCommand::FoldFunctions => function_anchors(repo).collect(),
            FoldCommand::FoldFunctionsAndStructural => function_anchors(repo)
                .chain(
                    repo.structural
                        .iter()
                        .filter(|r| r.kind.is_structural() && config.is_enabled(r.kind))
                        .map(|r| r.start_line),
                )
                .collect(),
            FoldCommand::ToggleLog => return None,
        };

        FoldRequest::lines(anchors)
    }
}

impl std::fmt::Display for FoldCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

fn function_anchors(repo: &RangeRepository) -> impl Iterator<Item = usize> + '_ {
    repo.functions
        .iter()
        .chain(&repo.within_functions)
        .map(|r| r.start_line)
}

/// Start lines of every range except the innermost one around `cursor`
fn around_cursor(ranges: &[FoldRange], cursor: usize) -> Vec<usize> {
    let innermost = ranges
        .iter()
        .filter(|r| r.contains_line(cursor))
        .min_by_key(|r| r.span())
        .map(|r| (r.start_line, r.end_line));

    ranges
        .iter()
        .filter(|r| Some((r.start_line, r.end_line)) != innermost)
        .map(|r| r.start_line)
        .collect()
}

/// Editor state a command runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandContext {
    /// Zero-based line of the cursor
    pub cursor_line: usize,
    /// No text is selected
    pub selection_empty: bool,
}

impl CommandContext {
    /// Collapsed cursor on `line`
    pub fn at_line(line: usize) -> Self {
        Self {
            cursor_line: line,
            selection_empty: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoldDirection {
    Up,
    Down,
}

/// Fold operation handed to the editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FoldRequest {
    /// Fold everything
    All,
    /// Fold `levels` levels from each of the selection lines
    #[serde(rename_all = "camelCase")]
    Lines {
        levels: u32,
        direction: FoldDirection,
        selection_lines: Vec<usize>,
    },
}

impl FoldRequest {
    /// One level up from each distinct anchor; `None` below two anchors
    pub fn lines(mut anchors: Vec<usize>) -> Option<Self> {
        anchors.sort_unstable();
        anchors.dedup();
        if anchors.len() < 2 {
            return None;
        }
        Some(FoldRequest::Lines {
            levels: 1,
            direction: FoldDirection::Up,
            selection_lines: anchors,
        })
    }

    pub fn selection_lines(&self) -> &[usize] {
        match self {
            FoldRequest::All => &[],
            FoldRequest::Lines {
                selection_lines, ..
            } => selection_lines,
        }
    }
}
