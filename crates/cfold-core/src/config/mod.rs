//! Configuration
//!
//! Settings come from `cfold.toml` in the workspace root or from the
//! editor's settings object. Keys follow the editor option names:
//!
//! ```toml
//! maxRanges = 500
//!
//! [namespace]
//! enable = true
//!
//! [withinFunction]
//! enable = true
//! minLines = 3
//!
//! [preprocessor]
//! enable = true
//! ignoreGuard = true
//! minLines = 0
//! recursiveDepth = 1
//!
//! [language]
//! csharp = false
//! ```

mod settings;


pub use settings::{
    LanguageSettings, PreprocessorSettings, ScanConfig, Settings, Toggle, WithinFunctionSettings,
    DEFAULT_MAX_RANGES,
};
