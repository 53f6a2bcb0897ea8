//! Configuration settings
//!
//! [`Settings`] is the raw, user-facing shape (TOML file or editor JSON).
//! Every value is optional so partial documents merge cleanly with the
//! defaults; [`ScanConfig`] is the resolved snapshot a scan runs with.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::types::EntityType;

/// Per-category capacity used when `maxRanges` is not configured
pub const DEFAULT_MAX_RANGES: usize = 500;

/// Section holding a single `enable` switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Toggle {
    pub enable: Option<bool>,
}

impl Toggle {
    fn resolve(self, default: bool) -> bool {
        self.enable.unwrap_or(default)
    }
}

/// `withinFunction.*`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct WithinFunctionSettings {
    pub enable: Option<bool>,
    /// Minimum line span of an emitted nested block
    pub min_lines: Option<i64>,
}

/// `preprocessor.*`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct PreprocessorSettings {
    pub enable: Option<bool>,
    /// Suppress `#if` blocks that look like include guards
    pub ignore_guard: Option<bool>,
    pub min_lines: Option<i64>,
    /// Deepest nesting scope still reported
    pub recursive_depth: Option<i64>,
}

/// `language.*`: which editor language ids are served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LanguageSettings {
    pub c: Option<bool>,
    pub cpp: Option<bool>,
    pub csharp: Option<bool>,
}

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub namespace: Toggle,
    pub class: Toggle,
    #[serde(rename = "struct")]
    pub structure: Toggle,
    #[serde(rename = "enum")]
    pub enumeration: Toggle,
    pub function: Toggle,
    pub within_function: WithinFunctionSettings,
    /// Block comments (`/* */`)
    pub comment_quote: Toggle,
    /// Documentation blocks (`/** */`)
    pub documentation_quote: Toggle,
    pub preprocessor: PreprocessorSettings,
    pub language: LanguageSettings,
    /// Per-category capacity of the range repository
    pub max_ranges: Option<i64>,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Decode the JSON settings object an editor pushes.
    ///
    /// Accepts either the bare object or one nested under a `cfold` key.
    pub fn from_json(value: &Value) -> Result<Self> {
        let section = value.get("cfold").unwrap_or(value);
        if section.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(section.clone())?)
    }

    /// Load settings from a TOML file; `Ok(None)` when the file does not exist
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let settings = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Some(settings))
    }

    /// Whether folding is served for an editor language id
    pub fn language_enabled(&self, language_id: &str) -> bool {
        match language_id {
            "c" => self.language.c.unwrap_or(true),
            "cpp" => self.language.cpp.unwrap_or(true),
            "csharp" => self.language.csharp.unwrap_or(true),
            _ => false,
        }
    }

    /// Resolve defaults and clamp numeric options
    pub fn scan_config(&self) -> ScanConfig {
        let defaults = ScanConfig::default();
        ScanConfig {
            namespace: self.namespace.resolve(defaults.namespace),
            class: self.class.resolve(defaults.class),
            structure: self.structure.resolve(defaults.structure),
            enumeration: self.enumeration.resolve(defaults.enumeration),
            function: self.function.resolve(defaults.function),
            within_function: self
                .within_function
                .enable
                .unwrap_or(defaults.within_function),
            within_function_min_lines: clamp(
                self.within_function.min_lines,
                defaults.within_function_min_lines,
            ),
            comment_block: self.comment_quote.resolve(defaults.comment_block),
            documentation_block: self.documentation_quote.resolve(defaults.documentation_block),
            preprocessor: self.preprocessor.enable.unwrap_or(defaults.preprocessor),
            preprocessor_ignore_guard: self
                .preprocessor
                .ignore_guard
                .unwrap_or(defaults.preprocessor_ignore_guard),
            preprocessor_min_lines: clamp(
                self.preprocessor.min_lines,
                defaults.preprocessor_min_lines,
            ),
            preprocessor_recursive_depth: clamp(
                self.preprocessor.recursive_depth,
                defaults.preprocessor_recursive_depth,
            ),
            max_ranges: clamp(self.max_ranges, defaults.max_ranges),
        }
    }
}

/// Negative values become 0, missing values take the default
fn clamp(value: Option<i64>, default: usize) -> usize {
    match value {
        Some(v) => usize::try_from(v.max(0)).unwrap_or(usize::MAX),
        None => default,
    }
}

/// Resolved, immutable configuration for one scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    pub namespace: bool,
    pub class: bool,
    pub structure: bool,
    pub enumeration: bool,
    pub function: bool,
    pub within_function: bool,
    pub within_function_min_lines: usize,
    pub comment_block: bool,
    pub documentation_block: bool,
    pub preprocessor: bool,
    pub preprocessor_ignore_guard: bool,
    pub preprocessor_min_lines: usize,
    pub preprocessor_recursive_depth: usize,
    pub max_ranges: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            namespace: false,
            class: false,
            structure: false,
            enumeration: false,
            function: true,
            within_function: false,
            within_function_min_lines: 0,
            comment_block: true,
            documentation_block: true,
            preprocessor: false,
            preprocessor_ignore_guard: true,
            preprocessor_min_lines: 0,
            preprocessor_recursive_depth: 1,
            max_ranges: DEFAULT_MAX_RANGES,
        }
    }
}

impl ScanConfig {
    /// Debug profile: every detector and category switched on
    pub fn all_enabled() -> Self {
        Self {
            namespace: true,
            class: true,
            structure: true,
            enumeration: true,
            function: true,
            within_function: true,
            comment_block: true,
            documentation_block: true,
            preprocessor: true,
            ..Self::default()
        }
    }

    /// Whether ranges of `kind` belong in the folding result
    pub fn is_enabled(&self, kind: EntityType) -> bool {
        match kind {
            EntityType::Namespace => self.namespace,
            EntityType::Class => self.class,
            EntityType::Struct => self.structure,
            EntityType::Enum => self.enumeration,
            EntityType::Function => self.function,
            EntityType::WithinFunction => self.within_function,
            EntityType::CommentBlock => self.comment_block,
            EntityType::DocumentationBlock => self.documentation_block,
            EntityType::Preprocessor => self.preprocessor,
            _ => false,
        }
    }
}

impl From<&Settings> for ScanConfig {
    fn from(settings: &Settings) -> Self {
        settings.scan_config()
    }
}
