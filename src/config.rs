//! Sort configuration loading, validation and compilation.
//!
//! This module loads the sort configuration from a TOML file, validates it,
//! and compiles it into the runtime form consumed by the sorting engine
//! (extension lookup sets, resolved paths, behavior flags).
//!
//! # Configuration File Format
//!
//! Configuration is stored in TOML format with the following structure:
//!
//! ```toml
//! [source]
//! path = "/media/incoming"
//! skip_patterns = ["screenshot", "~"]
//! photo_extensions = [".jpg", ".jpeg", ".png", ".heic"]
//! video_extensions = [".mp4", ".mov", ".avi"]
//!
//! [target]
//! photo_path = "/media/photos"
//! video_path = "/media/videos"
//!
//! [options]
//! use_year = true
//! use_month = true
//! use_month_name = true
//! proceed_on_error = true
//! execute = false
//! move_or_copy = "copy"
//! ```
//!
//! Skip patterns are matched as case-sensitive substrings of the full file
//! name, extension included. Extensions are normalized to lowercase with a
//! leading dot, so `"jpg"`, `".jpg"` and `".JPG"` all configure the same set
//! entry.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur during configuration loading and compilation.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// The configured source path does not exist on disk.
    SourceMissing(PathBuf),
    /// An extension list entry is empty after normalization.
    EmptyExtension {
        /// The list the entry came from ("photo_extensions" or "video_extensions").
        list: &'static str,
    },
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::SourceMissing(path) => {
                write!(f, "Source path does not exist: {}", path.display())
            }
            ConfigError::EmptyExtension { list } => {
                write!(f, "Empty entry in {}", list)
            }
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Whether relocation moves files out of the source tree or copies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveOrCopy {
    Move,
    Copy,
}

/// Top-level sort configuration, deserialized from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortConfig {
    pub source: SourceSection,
    pub target: TargetSection,
    pub options: OptionsSection,
}

/// Source tree settings: where to scan and what to recognize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSection {
    /// Root directory to scan.
    pub path: PathBuf,

    /// Case-sensitive substrings; a file whose name contains one is skipped.
    #[serde(default)]
    pub skip_patterns: Vec<String>,

    /// Extensions classified as photos (with or without leading dot).
    pub photo_extensions: Vec<String>,

    /// Extensions classified as videos (with or without leading dot).
    pub video_extensions: Vec<String>,
}

/// Destination roots per category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSection {
    pub photo_path: PathBuf,
    pub video_path: PathBuf,
}

/// Date-granularity and behavior flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsSection {
    /// Accepted for compatibility; the year folder is always created.
    #[serde(default = "default_true")]
    pub use_year: bool,

    /// Create a month subfolder inside the year folder.
    #[serde(default)]
    pub use_month: bool,

    /// Reserved; day-level placement is not implemented.
    #[serde(default)]
    pub use_day: bool,

    /// Name month folders "January".."December" instead of "1".."12".
    #[serde(default)]
    pub use_month_name: bool,

    /// Keep walking after a relocation failure instead of aborting the run.
    #[serde(default)]
    pub proceed_on_error: bool,

    /// When false, perform a dry run: no folder creation, no relocation.
    #[serde(default)]
    pub execute: bool,

    pub move_or_copy: MoveOrCopy,
}

/// Helper function for default value of `use_year`.
fn default_true() -> bool {
    true
}

impl SortConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if the file does not exist.
    /// Returns `ConfigError::ConfigInvalid` if TOML parsing fails.
    /// Returns `ConfigError::IoError` if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Compile the configuration into the runtime form consumed by the engine.
    ///
    /// Extension lists are normalized into lowercase dotted lookup sets, and
    /// the source path is checked for existence. The `use_year` and `use_day`
    /// flags are consumed here: the year folder is unconditional and day
    /// placement is reserved, so neither reaches the compiled form.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SourceMissing` if the source path does not exist,
    /// or `ConfigError::EmptyExtension` for blank extension entries.
    pub fn compile(self) -> Result<CompiledConfig, ConfigError> {
        if !self.source.path.exists() {
            return Err(ConfigError::SourceMissing(self.source.path.clone()));
        }

        let photo_extensions =
            normalize_extensions(&self.source.photo_extensions, "photo_extensions")?;
        let video_extensions =
            normalize_extensions(&self.source.video_extensions, "video_extensions")?;

        Ok(CompiledConfig {
            source_path: self.source.path,
            skip_patterns: self.source.skip_patterns,
            photo_extensions,
            video_extensions,
            target_photo_path: self.target.photo_path,
            target_video_path: self.target.video_path,
            use_month: self.options.use_month,
            use_month_name: self.options.use_month_name,
            proceed_on_error: self.options.proceed_on_error,
            execute: self.options.execute,
            move_or_copy: self.options.move_or_copy,
        })
    }
}

/// Normalize an extension list into a lowercase, dot-prefixed lookup set.
fn normalize_extensions(
    raw: &[String],
    list: &'static str,
) -> Result<HashSet<String>, ConfigError> {
    let mut set = HashSet::with_capacity(raw.len());
    for entry in raw {
        let trimmed = entry.trim();
        let stripped = trimmed.strip_prefix('.').unwrap_or(trimmed);
        if stripped.is_empty() {
            return Err(ConfigError::EmptyExtension { list });
        }
        set.insert(format!(".{}", stripped.to_lowercase()));
    }
    Ok(set)
}

/// Compiled, validated configuration consumed by the sorting engine.
///
/// Extension sets are pre-lowercased with leading dots so per-file
/// classification is a plain set lookup.
#[derive(Debug, Clone)]
pub struct CompiledConfig {
    pub source_path: PathBuf,
    pub skip_patterns: Vec<String>,
    pub photo_extensions: HashSet<String>,
    pub video_extensions: HashSet<String>,
    pub target_photo_path: PathBuf,
    pub target_video_path: PathBuf,
    pub use_month: bool,
    pub use_month_name: bool,
    pub proceed_on_error: bool,
    pub execute: bool,
    pub move_or_copy: MoveOrCopy,
}
