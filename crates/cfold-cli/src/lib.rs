//! cfold CLI - Command-line interface library
//!
//! Runs the folding scanner over files on disk:
//! - Ranges: list the folding ranges of a file
//! - Dump: write the source with every range marked in place
//! - Anchors: show what a fold command would ask the editor to do
//!
//! # Library Usage
//!
//! ```ignore
//! use cfold_cli::{render_ranges, OutputFormat, ScanOptions};
//!
//! let options = ScanOptions { config: None, all: true };
//! let text = render_ranges(&input, OutputFormat::Json, &options)?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Folding ranges as JSON
//! cfold ranges src/server.cpp --format json
//!
//! # Annotated source for review
//! cfold dump src/server.cpp --all -o server.folded.cpp
//!
//! # Anchors of "fold around cursor" with the cursor on line 42
//! cfold anchors around-cursor src/server.cpp --cursor 42
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{anchors_command, dump_command, ranges_command};
pub use app::{load_scan_config, render_anchors, render_dump, render_ranges};
pub use app::{run_cli, CommandArg, OutputFormat, ScanOptions};
