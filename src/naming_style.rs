//! Naming styles and expected-name derivation.
//!
//! This module converts a file name into its expected form under one of the
//! six supported naming styles, optionally prepending a custom prefix. The
//! transformation is pure string work with no I/O, and it leaves names that
//! already conform untouched.
//!
//! # Examples
//!
//! ```
//! use nametidy::naming_style::{NameTransformer, NamingStyle};
//!
//! let transformer = NameTransformer::default();
//! assert_eq!(
//!     transformer.expected_name("MyCoolMaterial.mat", NamingStyle::SnakeCase, None),
//!     "my_cool_material.mat"
//! );
//! assert_eq!(
//!     transformer.expected_name("player_controller.cs", NamingStyle::PascalCase, Some("TL_")),
//!     "TL_PlayerController.cs"
//! );
//! ```

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// One of the six supported casing conventions.
///
/// Closed set, like [`ObjectType`](crate::object_type::ObjectType): a rule
/// document naming any other style fails to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamingStyle {
    PascalCase,
    #[serde(rename = "camelCase")]
    CamelCase,
    #[serde(rename = "snake_case")]
    SnakeCase,
    #[serde(rename = "kebab-case")]
    KebabCase,
    #[serde(rename = "UPPER_CASE")]
    UpperCase,
    #[serde(rename = "lowercase")]
    Lowercase,
}

impl NamingStyle {
    /// Every supported style, in declaration order.
    pub const ALL: [NamingStyle; 6] = [
        NamingStyle::PascalCase,
        NamingStyle::CamelCase,
        NamingStyle::SnakeCase,
        NamingStyle::KebabCase,
        NamingStyle::UpperCase,
        NamingStyle::Lowercase,
    ];

    /// Returns the label used in rule documents, reports and the CLI.
    pub fn label(&self) -> &'static str {
        match self {
            NamingStyle::PascalCase => "PascalCase",
            NamingStyle::CamelCase => "camelCase",
            NamingStyle::SnakeCase => "snake_case",
            NamingStyle::KebabCase => "kebab-case",
            NamingStyle::UpperCase => "UPPER_CASE",
            NamingStyle::Lowercase => "lowercase",
        }
    }

    /// Looks up a style by its exact label.
    pub fn from_label(label: &str) -> Option<NamingStyle> {
        NamingStyle::ALL.iter().copied().find(|s| s.label() == label)
    }
}

/// Derives expected file names under a naming style.
///
/// The case-boundary patterns are fixed and compiled once. The boundary rule
/// is deliberately minimal: exactly one lowercase ASCII letter followed by
/// one uppercase ASCII letter. Consecutive capitals (acronyms) collapse, and
/// digits or non-ASCII characters never create a boundary. Keeping that rule
/// keeps the derived names identical to what existing projects were checked
/// against.
#[derive(Debug, Clone)]
pub struct NameTransformer {
    pascal_boundary: Regex,
    camel_boundary: Regex,
    case_boundary: Regex,
}

impl NameTransformer {
    /// Creates a transformer with the boundary patterns compiled.
    pub fn new() -> Self {
        Self {
            pascal_boundary: Regex::new(r"(?:^|_)([a-z])").expect("Invalid pascal boundary pattern"),
            camel_boundary: Regex::new(r"[_-]([a-z])").expect("Invalid camel boundary pattern"),
            case_boundary: Regex::new(r"([a-z])([A-Z])").expect("Invalid case boundary pattern"),
        }
    }

    /// Derives the expected file name for `file_name` under `style`.
    ///
    /// The name is split at the last dot; only the base is transformed and
    /// the extension (dot included) is reattached untouched. `prefix`, when
    /// present, is concatenated directly in front of the transformed base
    /// with no separator inserted.
    pub fn expected_name(&self, file_name: &str, style: NamingStyle, prefix: Option<&str>) -> String {
        let (base, ext) = split_file_name(file_name);
        let transformed = self.apply(style, base);
        match prefix {
            Some(prefix) => format!("{}{}{}", prefix, transformed, ext),
            None => format!("{}{}", transformed, ext),
        }
    }

    /// Transforms a base name (no extension) into `style`.
    pub fn apply(&self, style: NamingStyle, base: &str) -> String {
        match style {
            NamingStyle::PascalCase => self
                .pascal_boundary
                .replace_all(base, |caps: &Captures| caps[1].to_uppercase())
                .into_owned(),
            NamingStyle::CamelCase => {
                let mut chars = base.chars();
                match chars.next() {
                    // Empty base names pass through untouched.
                    None => String::new(),
                    Some(first) => {
                        let tail = self
                            .camel_boundary
                            .replace_all(chars.as_str(), |caps: &Captures| caps[1].to_uppercase());
                        format!("{}{}", first.to_lowercase(), tail)
                    }
                }
            }
            // regex replacement syntax: `$1_` would parse as a group named
            // "1_", so the group references need explicit braces.
            NamingStyle::SnakeCase => self
                .case_boundary
                .replace_all(base, "${1}_${2}")
                .to_lowercase(),
            NamingStyle::KebabCase => self
                .case_boundary
                .replace_all(base, "${1}-${2}")
                .to_lowercase(),
            NamingStyle::UpperCase => self
                .case_boundary
                .replace_all(base, "${1}_${2}")
                .to_uppercase(),
            NamingStyle::Lowercase => base.to_lowercase(),
        }
    }
}

impl Default for NameTransformer {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits a file name at the last dot. The extension keeps its leading dot;
/// names without a dot get an empty extension, and a leading-dot name like
/// `.gitignore` is all extension with an empty base.
fn split_file_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) => name.split_at(idx),
        None => (name, ""),
    }
}
