//! cfold-core - Heuristic folding ranges for C, C++ and C#
//!
//! Finds foldable regions in C-family source without parsing it: function
//! bodies, namespace/class/struct/enum blocks, comment and documentation
//! blocks, preprocessor branches and raw strings. One forward pass over
//! the lines, driven by brace and keyword matching, tolerant of broken
//! input.
//!
//! # Example
//!
//! ```
//! use cfold_core::{FoldingAnalyzer, ScanConfig, Scanner};
//!
//! let source = "namespace N {\nclass C {\nvoid f() {\n}\n};\n}";
//! let config = ScanConfig::all_enabled();
//! let repo = Scanner::new(config).scan_text(source);
//!
//! let ranges = FoldingAnalyzer::generate_ranges(&repo, &config);
//! let spans: Vec<(usize, usize)> = ranges.iter().map(|r| (r.start_line, r.end_line)).collect();
//! assert_eq!(spans, vec![(1, 4), (0, 5), (2, 3)]);
//! ```

pub mod annotate;
pub mod commands;
pub mod config;
pub mod error;
pub mod folding;
pub mod repository;
pub mod scanner;
pub mod stack;
pub mod types;

// Re-export main types and functions
pub use annotate::annotate;
pub use commands::{CommandContext, FoldCommand, FoldDirection, FoldRequest};
pub use config::{ScanConfig, Settings};
pub use error::ConfigError;
pub use folding::{FoldRange, FoldingAnalyzer};
pub use repository::{Category, RangeRepository};
pub use scanner::{lines_of, Document, Scanner};
pub use types::{EntityType, Frame, Range};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.4.0");
    }
}
