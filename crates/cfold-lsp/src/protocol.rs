//! Wire types shared with the editor extension
//!
//! - `cfold/fold` notification carrying a [`FoldRequest`]
//! - Arguments of the `workspace/executeCommand` fold commands
//! - Conversion of fold ranges into LSP folding ranges

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::notification::Notification;
use tower_lsp::lsp_types::{FoldingRange, FoldingRangeKind, Position, TextDocumentIdentifier};

use cfold_core::{CommandContext, FoldRange, FoldRequest};

/// Server → client: apply a fold operation to a document
#[derive(Debug)]
pub enum FoldNotification {}

impl Notification for FoldNotification {
    type Params = FoldParams;
    const METHOD: &'static str = "cfold/fold";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoldParams {
    pub text_document: TextDocumentIdentifier,
    pub request: FoldRequest,
}

/// Editor selection; collapsed when `anchor == active`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: Position,
    pub active: Position,
}

/// Single argument object of the fold commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandArgs {
    pub text_document: TextDocumentIdentifier,
    /// Missing selection means a collapsed cursor on the first line
    #[serde(default)]
    pub selection: Option<Selection>,
}

impl CommandArgs {
    pub fn context(&self) -> CommandContext {
        match self.selection {
            Some(selection) => CommandContext {
                cursor_line: selection.active.line as usize,
                selection_empty: selection.anchor == selection.active,
            },
            None => CommandContext::at_line(0),
        }
    }
}

/// Comment blocks fold as comments, everything else as regions
pub fn to_lsp_range(range: &FoldRange) -> FoldingRange {
    let kind = if range.kind.is_comment_block() {
        FoldingRangeKind::Comment
    } else {
        FoldingRangeKind::Region
    };
    FoldingRange {
        start_line: range.start_line as u32,
        start_character: None,
        end_line: range.end_line as u32,
        end_character: None,
        kind: Some(kind),
        collapsed_text: None,
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use cfold_core::EntityType;
    use serde_json::json;

    #[test]
    fn test_args_from_editor_json() {
        let args: CommandArgs = serde_json::from_value(json!({
            "textDocument": { "uri": "file:///a.cpp" },
            "selection": {
                "anchor": { "line": 4, "character": 2 },
                "active": { "line": 4, "character": 2 }
            }
        }))
        .unwrap();

        assert_eq!(args.context(), CommandContext::at_line(4));
    }

    #[test]
    fn test_non_empty_selection() {
        let args = CommandArgs {
            text_document: TextDocumentIdentifier::new("file:///a.cpp".parse().unwrap()),
            selection: Some(Selection {
                anchor: Position::new(1, 0),
                active: Position::new(3, 5),
            }),
        };

        let ctx = args.context();
        assert_eq!(ctx.cursor_line, 3);
        assert!(!ctx.selection_empty);
    }

    #[test]
    fn test_missing_selection_is_collapsed() {
        let args: CommandArgs =
            serde_json::from_value(json!({ "textDocument": { "uri": "file:///a.cpp" } })).unwrap();
        assert!(args.context().selection_empty);
    }

    #[test]
    fn test_range_kinds() {
        let comment = FoldRange {
            start_line: 0,
            end_line: 3,
            kind: EntityType::DocumentationBlock,
        };
        let function = FoldRange {
            kind: EntityType::Function,
            ..comment
        };

        assert_eq!(to_lsp_range(&comment).kind, Some(FoldingRangeKind::Comment));
        assert_eq!(to_lsp_range(&function).kind, Some(FoldingRangeKind::Region));
        assert_eq!(to_lsp_range(&function).end_line, 3);
    }

    #[test]
    fn test_notification_method() {
        assert_eq!(FoldNotification::METHOD, "cfold/fold");
    }
}
