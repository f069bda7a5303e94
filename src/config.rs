//! Naming-rule configuration: loading, saving, and ignore-pattern handling.
//!
//! Rules live in a TOML document. The document is an ordered list of rules
//! (order is precedence: when several rules match the same asset, the last
//! one wins) plus an optional set of ignore patterns for subtrees that must
//! never be scanned or renamed, such as bundled third-party packages.
//!
//! # Configuration File Format
//!
//! ```toml
//! [[rules]]
//! object_type = "Material"
//! naming_style = "snake_case"
//!
//! [[rules]]
//! object_type = "Script"
//! naming_style = "PascalCase"
//! use_custom_prefix = true
//! custom_prefix = "TL_"
//!
//! [ignore]
//! patterns = ["Plugins/**", "**/ThirdParty/**"]
//! ```
//!
//! Object types and naming styles are closed sets; a document naming an
//! unknown label fails to load instead of silently matching nothing.

use crate::naming_style::NamingStyle;
use crate::object_type::ObjectType;
use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while loading, saving or compiling configuration.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax, or an unknown object-type/naming-style label.
    ConfigInvalid(String),
    /// Invalid glob in the ignore patterns.
    InvalidIgnorePattern(String),
    /// IO error while reading configuration.
    IoError(String),
    /// Failed to write the configuration document back to disk.
    WriteFailed { path: PathBuf, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidIgnorePattern(pattern) => {
                write!(
                    f,
                    "Invalid ignore pattern '{}': expected a glob such as Plugins/**",
                    pattern
                )
            }
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
            ConfigError::WriteFailed { path, reason } => {
                write!(f, "Failed to write configuration {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A single naming rule: one object type bound to one naming style, with an
/// optional custom prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub object_type: ObjectType,
    pub naming_style: NamingStyle,
    /// Whether `custom_prefix` participates in expected names.
    #[serde(default)]
    pub use_custom_prefix: bool,
    /// Prepended verbatim to the transformed base name. Ignored unless
    /// `use_custom_prefix` is set.
    #[serde(default)]
    pub custom_prefix: String,
}

impl Rule {
    /// Creates a rule without a prefix.
    pub fn new(object_type: ObjectType, naming_style: NamingStyle) -> Self {
        Self {
            object_type,
            naming_style,
            use_custom_prefix: false,
            custom_prefix: String::new(),
        }
    }

    /// Creates a rule with a custom prefix enabled.
    pub fn with_prefix(object_type: ObjectType, naming_style: NamingStyle, prefix: &str) -> Self {
        Self {
            object_type,
            naming_style,
            use_custom_prefix: true,
            custom_prefix: prefix.to_string(),
        }
    }

    /// Returns the prefix in effect, if any. This is the one place the
    /// `use_custom_prefix` toggle is interpreted.
    pub fn active_prefix(&self) -> Option<&str> {
        if self.use_custom_prefix {
            Some(self.custom_prefix.as_str())
        } else {
            None
        }
    }

    /// One-line description for rule listings.
    pub fn summary(&self) -> String {
        match self.active_prefix() {
            Some(prefix) => format!(
                "{} -> {} (prefix \"{}\")",
                self.object_type.label(),
                self.naming_style.label(),
                prefix
            ),
            None => format!(
                "{} -> {}",
                self.object_type.label(),
                self.naming_style.label()
            ),
        }
    }
}

/// The persisted configuration: ordered rules plus ignore patterns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub rules: Vec<Rule>,

    #[serde(default)]
    pub ignore: IgnoreRules,
}

/// Glob patterns for assets that are skipped entirely, matched against the
/// path relative to the asset root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IgnoreRules {
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl RulesConfig {
    /// Project-local configuration file name.
    pub const FILE_NAME: &'static str = ".nametidy.toml";

    /// Finds the configuration document that [`RulesConfig::load`] would
    /// read, if any.
    ///
    /// Search order:
    /// 1. An explicitly provided path (returned even when missing, so a bad
    ///    `--config` surfaces as an error rather than silent defaults)
    /// 2. `.nametidy.toml` in the project directory
    /// 3. `~/.config/nametidy/rules.toml` in the home directory
    pub fn locate(config_path: Option<&Path>, project_dir: &Path) -> Option<PathBuf> {
        if let Some(path) = config_path {
            return Some(path.to_path_buf());
        }

        let local_config = project_dir.join(Self::FILE_NAME);
        if local_config.exists() {
            return Some(local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("nametidy")
                .join("rules.toml");
            if home_config.exists() {
                return Some(home_config);
            }
        }

        None
    }

    /// Load configuration, with fallback to the empty default when no
    /// document exists anywhere in the search path.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but
    /// cannot be read, or if a located document fails to parse.
    pub fn load(config_path: Option<&Path>, project_dir: &Path) -> Result<Self, ConfigError> {
        match Self::locate(config_path, project_dir) {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if file does not exist.
    /// Returns `ConfigError::ConfigInvalid` if TOML parsing fails.
    /// Returns `ConfigError::IoError` if file cannot be read.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Writes the configuration document to `path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::WriteFailed` if serialization or the write
    /// itself fails.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let document = toml::to_string_pretty(self).map_err(|e| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        fs::write(path, document).map_err(|e| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Where rule edits are saved when no document exists yet.
    pub fn default_save_path(project_dir: &Path) -> PathBuf {
        project_dir.join(Self::FILE_NAME)
    }

    /// Pre-parse the ignore globs for matching during a scan.
    ///
    /// # Errors
    ///
    /// Returns an error if any glob pattern is invalid.
    pub fn compile_ignore(&self) -> Result<CompiledIgnore, ConfigError> {
        CompiledIgnore::new(&self.ignore)
    }
}

/// Pre-parsed ignore patterns, ready for per-asset matching.
#[derive(Debug, Clone, Default)]
pub struct CompiledIgnore {
    patterns: Vec<Pattern>,
}

impl CompiledIgnore {
    fn new(rules: &IgnoreRules) -> Result<Self, ConfigError> {
        let patterns = rules
            .patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern)
                    .map_err(|_| ConfigError::InvalidIgnorePattern(pattern.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Check if an asset should be scanned. `relative_path` is the asset's
    /// path relative to the asset root.
    pub fn should_scan(&self, relative_path: &Path) -> bool {
        !self
            .patterns
            .iter()
            .any(|pattern| pattern.matches_path(relative_path))
    }
}
