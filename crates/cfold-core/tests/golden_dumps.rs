//! Scans checked against annotated dumps
//!
//! Each file under `fixtures/golden/` is a source file with its fold
//! ranges marked in place: the i-th range appends ` @_i_` to its start and
//! end lines. Stripping the markers gives the input, and the markers give
//! the expected pairs under the all-enabled profile.

use std::collections::BTreeMap;

use regex::Regex;

use cfold_core::{lines_of, FoldRange, FoldingAnalyzer, ScanConfig, Scanner};

const CHUNK_ENCODE_HPP: &str = include_str!("fixtures/golden/chunk_encode.hpp");
const PIPELINE_CPP: &str = include_str!("fixtures/golden/pipeline.cpp");

/// Source text and sorted fold pairs recovered from a dump
struct Golden {
    source: String,
    pairs: Vec<(usize, usize)>,
}

fn parse_dump(dump: &str) -> Golden {
    let marker = Regex::new(r" @_(\d+)_").unwrap();
    let mut marked: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    let mut lines = Vec::new();

    for (line, text) in dump.split('\n').enumerate() {
        for cap in marker.captures_iter(text) {
            let id: usize = cap[1].parse().unwrap();
            marked.entry(id).or_default().push(line);
        }
        lines.push(marker.replace_all(text, "").into_owned());
    }

    let mut pairs: Vec<(usize, usize)> = marked
        .into_iter()
        .map(|(id, at)| {
            assert_eq!(at.len(), 2, "marker {} must appear twice", id);
            (at[0], at[1])
        })
        .collect();
    pairs.sort_unstable();

    Golden {
        source: lines.join("\n"),
        pairs,
    }
}

fn fold_all(source: &str) -> Vec<FoldRange> {
    let config = ScanConfig::all_enabled();
    let repo = Scanner::new(config).scan_text(source);
    FoldingAnalyzer::generate_ranges(&repo, &config)
}

fn sorted_pairs(ranges: &[FoldRange]) -> Vec<(usize, usize)> {
    let mut pairs: Vec<(usize, usize)> = ranges.iter().map(|r| (r.start_line, r.end_line)).collect();
    pairs.sort_unstable();
    pairs
}

// ==================== DUMP PARSING TESTS ====================

mod dump_tests {
    use super::*;

    #[test]
    fn test_parse_dump_strips_markers() {
        let golden = parse_dump("void f() @_0_\n{ @_1_\n} @_0_ @_1_\n");

        assert_eq!(golden.source, "void f()\n{\n}\n");
        assert_eq!(golden.pairs, vec![(0, 2), (1, 2)]);
    }

    #[test]
    fn test_parse_dump_same_line_marker() {
        let golden = parse_dump("x @_0_ @_0_");
        assert_eq!(golden.pairs, vec![(0, 0)]);
    }
}

// ==================== GOLDEN TESTS ====================

mod golden_tests {
    use super::*;

    /// Test 1: Header with nested namespaces, doc blocks and a guard
    #[test]
    fn test_chunk_encode_matches_dump() {
        let golden = parse_dump(CHUNK_ENCODE_HPP);
        assert!(!golden.source.contains(" @_"));

        let ranges = fold_all(&golden.source);

        assert_eq!(sorted_pairs(&ranges), golden.pairs);
    }

    /// Test 2: Source with `} else {` and `} catch (..) {` chains in bodies
    #[test]
    fn test_pipeline_matches_dump() {
        let golden = parse_dump(PIPELINE_CPP);

        let ranges = fold_all(&golden.source);

        assert_eq!(sorted_pairs(&ranges), golden.pairs);
    }

    /// Test 3: An if/else chain is one block, not one block per branch
    #[test]
    fn test_pipeline_else_chain_not_split() {
        let golden = parse_dump(PIPELINE_CPP);
        let lines = lines_of(&golden.source);
        assert_eq!(lines[233].trim(), "} else {");

        let pairs = sorted_pairs(&fold_all(&golden.source));

        assert!(pairs.contains(&(231, 243)));
        assert!(!pairs.contains(&(231, 233)));
        assert!(!pairs.contains(&(233, 243)));
    }

    #[test]
    fn test_dump_line_counts_preserved() {
        for dump in [CHUNK_ENCODE_HPP, PIPELINE_CPP] {
            let golden = parse_dump(dump);
            assert_eq!(lines_of(&golden.source).len(), dump.split('\n').count());
        }
    }
}
