//! cfold Language Server Protocol implementation
//!
//! Serves heuristic folding ranges for C, C++ and C# documents:
//! - Folding ranges for functions, type blocks, comments and `#if` branches
//! - `workspace/executeCommand` fold commands, answered with a `cfold/fold`
//!   notification the editor extension applies
//! - Settings from `cfold.toml`, initialization options and
//!   `workspace/didChangeConfiguration`
//!
//! # Library Usage
//!
//! ```ignore
//! use cfold_lsp::run_server;
//!
//! // Run the LSP server
//! run_server().await;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Start the language server (typically called by an editor)
//! cfold-lsp
//!
//! # With debug logging, including per-scan timings
//! RUST_LOG=debug cfold-lsp
//! ```

pub mod protocol;
pub mod server;

// Re-export main entry point
pub use server::{run_server, Backend};

// Re-export commonly used types
pub use protocol::{CommandArgs, FoldNotification, FoldParams, Selection};
