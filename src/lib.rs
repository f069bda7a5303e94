//! nametidy - A naming-convention scanner and renamer for project assets
//!
//! This library provides utilities for classifying assets by object type,
//! computing the name an asset should carry under a configured naming style,
//! scanning an asset tree for violations, renaming the offenders in bulk,
//! and managing the naming rules via TOML configuration files.

pub mod assets;
pub mod cli;
pub mod config;
pub mod naming_style;
pub mod object_type;
pub mod output;
pub mod scanner;

pub use assets::{AssetError, AssetResult};
pub use config::{CompiledIgnore, ConfigError, Rule, RulesConfig};
pub use naming_style::{NameTransformer, NamingStyle};
pub use object_type::{ObjectType, TypeClassifier};
pub use scanner::{HarmonizeReport, Mismatch, ProjectScanner, RenameOutcome, ScanReport};

pub use cli::{Cli, Command, run};
