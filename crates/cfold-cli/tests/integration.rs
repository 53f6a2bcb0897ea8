//! Integration tests for the cfold CLI
//!
//! These tests run the command functions against files in a temporary
//! directory and check the rendered output.

use std::fs;
use std::path::PathBuf;

use serde_json::{json, Value};
use tempfile::TempDir;

use cfold_cli::{
    dump_command, load_scan_config, render_anchors, render_dump, render_ranges, CommandArg,
    OutputFormat, ScanOptions,
};
use cfold_core::{CommandContext, ScanConfig};

const SOURCE: &str = "\
namespace app {

/**
 * Service entry
 */
class Service
{
public:
    int run(int argc)
    {
        if (argc > 1)
        {
            return 1;
        }
        return 0;
    }
};

}
";

fn write_source(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("service.cpp");
    fs::write(&path, SOURCE).unwrap();
    path
}

fn all() -> ScanOptions {
    ScanOptions {
        config: None,
        all: true,
    }
}

// ==================== RANGES TESTS ====================

mod ranges_tests {
    use super::*;

    /// Test 1: Default profile leaves namespace and class blocks out
    #[test]
    fn test_default_profile_text() {
        let dir = TempDir::new().unwrap();
        let input = write_source(&dir);

        let output =
            render_ranges(&input, OutputFormat::Text, &ScanOptions::default(), false).unwrap();

        assert_eq!(output, "2-4\tdocumentationBlock\n9-15\tfunction\n");
    }

    /// Test 2: `--all` adds structural and within-function ranges
    #[test]
    fn test_all_enabled_json() {
        let dir = TempDir::new().unwrap();
        let input = write_source(&dir);

        let output = render_ranges(&input, OutputFormat::Json, &all(), false).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(
            value,
            json!([
                { "startLine": 6, "endLine": 16, "kind": "class" },
                { "startLine": 0, "endLine": 18, "kind": "namespace" },
                { "startLine": 2, "endLine": 4, "kind": "documentationBlock" },
                { "startLine": 9, "endLine": 15, "kind": "function" },
                { "startLine": 11, "endLine": 13, "kind": "withinFunction" }
            ])
        );
    }

    /// Test 3: Trace logging does not change the result
    #[test]
    fn test_trace_is_transparent() {
        let dir = TempDir::new().unwrap();
        let input = write_source(&dir);

        let plain = render_ranges(&input, OutputFormat::Text, &all(), false).unwrap();
        let traced = render_ranges(&input, OutputFormat::Text, &all(), true).unwrap();

        assert_eq!(plain, traced);
    }

    /// Test 4: Missing input is an error naming the file
    #[test]
    fn test_missing_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("nope.cpp");

        let err = render_ranges(&input, OutputFormat::Text, &all(), false).unwrap_err();

        assert!(err.to_string().contains("nope.cpp"));
    }
}

// ==================== CONFIG TESTS ====================

mod config_tests {
    use super::*;

    #[test]
    fn test_settings_file_enables_detectors() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("cfold.toml");
        fs::write(&config, "[class]\nenable = true\n").unwrap();

        let scan = load_scan_config(&ScanOptions {
            config: Some(config),
            all: false,
        })
        .unwrap();

        assert!(scan.class);
        assert!(!scan.namespace);
    }

    #[test]
    fn test_all_overrides_settings_file() {
        let scan = load_scan_config(&ScanOptions {
            config: Some(PathBuf::from("/does/not/exist.toml")),
            all: true,
        })
        .unwrap();

        assert_eq!(scan, ScanConfig::all_enabled());
    }

    #[test]
    fn test_missing_settings_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = load_scan_config(&ScanOptions {
            config: Some(dir.path().join("missing.toml")),
            all: false,
        })
        .unwrap_err();

        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_broken_settings_file_is_error() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("cfold.toml");
        fs::write(&config, "maxRanges = [").unwrap();

        let err = load_scan_config(&ScanOptions {
            config: Some(config),
            all: false,
        })
        .unwrap_err();

        assert!(err.to_string().contains("Failed to load settings"));
    }
}

// ==================== DUMP TESTS ====================

mod dump_tests {
    use super::*;

    #[test]
    fn test_dump_marks_ranges() {
        let dir = TempDir::new().unwrap();
        let input = write_source(&dir);

        let annotated = render_dump(&input, &all()).unwrap();
        let lines: Vec<&str> = annotated.lines().collect();

        assert_eq!(lines[0], "namespace app { @_0_");
        assert_eq!(lines[2], "/** @_1_");
        assert_eq!(lines[4], " */ @_1_");
        assert_eq!(lines[6], "{ @_2_");
        assert_eq!(lines[18], "} @_0_");
    }

    #[test]
    fn test_dump_to_file() {
        let dir = TempDir::new().unwrap();
        let input = write_source(&dir);
        let output = dir.path().join("service.folded.cpp");

        dump_command(&input, Some(output.as_path()), &ScanOptions::default()).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("    { @_1_"));
        assert!(!written.contains("@_2_"));
    }
}

// ==================== ANCHORS TESTS ====================

mod anchors_tests {
    use super::*;

    #[test]
    fn test_fold_functions_json() {
        let dir = TempDir::new().unwrap();
        let input = write_source(&dir);

        let output = render_anchors(
            CommandArg::FunctionsAndStructural,
            &input,
            &CommandContext::at_line(0),
            OutputFormat::Json,
            &all(),
        )
        .unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(
            value,
            json!({
                "kind": "lines",
                "levels": 1,
                "direction": "up",
                "selectionLines": [0, 6, 9, 11]
            })
        );
    }

    #[test]
    fn test_around_cursor_text() {
        let dir = TempDir::new().unwrap();
        let input = write_source(&dir);

        let output = render_anchors(
            CommandArg::AroundCursor,
            &input,
            &CommandContext::at_line(12),
            OutputFormat::Text,
            &all(),
        )
        .unwrap();

        assert_eq!(
            output,
            "cfold.foldAroundCursor: fold 1 level up from lines 0, 2, 6, 9"
        );
    }

    #[test]
    fn test_selection_is_noop() {
        let dir = TempDir::new().unwrap();
        let input = write_source(&dir);
        let ctx = CommandContext {
            cursor_line: 3,
            selection_empty: false,
        };

        let text =
            render_anchors(CommandArg::All, &input, &ctx, OutputFormat::Text, &all()).unwrap();
        let json =
            render_anchors(CommandArg::All, &input, &ctx, OutputFormat::Json, &all()).unwrap();

        assert_eq!(text, "cfold.foldAll: nothing to fold");
        assert_eq!(json, "null");
    }

    #[test]
    fn test_single_anchor_is_noop() {
        let dir = TempDir::new().unwrap();
        let input = write_source(&dir);

        let output = render_anchors(
            CommandArg::DocComments,
            &input,
            &CommandContext::at_line(0),
            OutputFormat::Text,
            &all(),
        )
        .unwrap();

        assert_eq!(output, "cfold.foldDocComments: nothing to fold");
    }
}
