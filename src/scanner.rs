//! Scanning an asset tree for naming violations and harmonizing them.
//!
//! A scan walks every visible asset under the root, finds the rules whose
//! object type matches, and compares the asset's name against the expected
//! form. Rules are checked in configuration order and the last matching
//! rule wins: a later rule overwrites the violation recorded by an earlier
//! one, but a later rule that happens to be satisfied does not clear it.
//!
//! Harmonization renames every flagged asset to its expected name, deepest
//! paths first so a folder rename cannot invalidate the recorded paths of
//! the assets inside it, then re-scans to report what remains.

use crate::assets::{self, AssetResult};
use crate::config::{CompiledIgnore, ConfigError, Rule, RulesConfig};
use crate::naming_style::NameTransformer;
use crate::object_type::{ObjectType, TypeClassifier};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A naming violation found during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// The file name the asset should have, extension included.
    pub expected_name: String,
    /// The object type of the rule that produced the expectation.
    pub object_type: ObjectType,
}

/// Outcome of scanning an asset tree.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Number of assets checked against the rules.
    pub scanned: usize,
    /// Violations keyed by asset path, in path order.
    pub mismatches: BTreeMap<PathBuf, Mismatch>,
}

impl ScanReport {
    /// True when no violations were found.
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// One rename attempt during harmonization.
#[derive(Debug, Clone)]
pub enum RenameOutcome {
    /// The asset now carries its expected name.
    Renamed { from: PathBuf, to: PathBuf },
    /// The rename could not be performed; the asset keeps its old name.
    Failed { path: PathBuf, reason: String },
}

/// Outcome of a harmonize run. Failures do not abort the run, so the
/// report can carry a mix of renamed and failed assets.
#[derive(Debug)]
pub struct HarmonizeReport {
    /// Every rename attempt, in the order it was made.
    pub outcomes: Vec<RenameOutcome>,
    /// Fresh scan taken after the renames.
    pub rescan: ScanReport,
}

impl HarmonizeReport {
    /// Number of assets renamed.
    pub fn renamed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RenameOutcome::Renamed { .. }))
            .count()
    }

    /// Number of renames that failed.
    pub fn failure_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RenameOutcome::Failed { .. }))
            .count()
    }

    /// True when nothing failed and the re-scan found no violations left.
    pub fn is_clean(&self) -> bool {
        self.failure_count() == 0 && self.rescan.is_clean()
    }
}

/// Checks an asset tree against a set of naming rules and can rename the
/// violations it finds.
pub struct ProjectScanner {
    classifier: TypeClassifier,
    transformer: NameTransformer,
    rules: Vec<Rule>,
    ignore: CompiledIgnore,
}

impl ProjectScanner {
    /// Creates a scanner for an ordered rule list.
    pub fn new(rules: Vec<Rule>, ignore: CompiledIgnore) -> Self {
        Self {
            classifier: TypeClassifier::new(),
            transformer: NameTransformer::new(),
            rules,
            ignore,
        }
    }

    /// Creates a scanner straight from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration's ignore globs are invalid.
    pub fn from_config(config: &RulesConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.rules.clone(), config.compile_ignore()?))
    }

    /// Scans the tree under `asset_root` and reports every violation.
    ///
    /// # Errors
    ///
    /// Returns an error if the asset root cannot be enumerated.
    pub fn scan(&self, asset_root: &Path) -> AssetResult<ScanReport> {
        let assets = assets::list_assets(asset_root)?;

        let mut report = ScanReport::default();
        for path in &assets {
            let relative = path.strip_prefix(asset_root).unwrap_or(path);
            if !self.ignore.should_scan(relative) {
                continue;
            }
            report.scanned += 1;
            self.check_asset(path, &mut report.mismatches);
        }

        Ok(report)
    }

    /// Runs every matching rule against one asset, recording the violation
    /// of the last rule that is not satisfied.
    fn check_asset(&self, path: &Path, mismatches: &mut BTreeMap<PathBuf, Mismatch>) {
        let Some(file_name) = path.file_name() else {
            return;
        };
        let file_name = file_name.to_string_lossy();

        for rule in &self.rules {
            if !self.classifier.matches(path, rule.object_type) {
                continue;
            }

            let expected =
                self.transformer
                    .expected_name(&file_name, rule.naming_style, rule.active_prefix());
            if expected != file_name {
                // A later satisfied rule does not clear this entry.
                mismatches.insert(
                    path.to_path_buf(),
                    Mismatch {
                        expected_name: expected,
                        object_type: rule.object_type,
                    },
                );
            }
        }
    }

    /// Renames every violating asset to its expected name and re-scans.
    ///
    /// # Errors
    ///
    /// Returns an error only if the tree cannot be enumerated; individual
    /// rename failures are collected in the report instead.
    pub fn harmonize(&self, asset_root: &Path) -> AssetResult<HarmonizeReport> {
        self.harmonize_with(asset_root, |_| {})
    }

    /// Like [`ProjectScanner::harmonize`], invoking `progress` after each
    /// rename attempt so a caller can report as the run proceeds.
    pub fn harmonize_with<F>(&self, asset_root: &Path, mut progress: F) -> AssetResult<HarmonizeReport>
    where
        F: FnMut(&RenameOutcome),
    {
        let scan = self.scan(asset_root)?;

        // Deepest paths first: path order puts a folder before its
        // contents, so the reverse renames contents before the folder.
        let mut outcomes = Vec::with_capacity(scan.mismatches.len());
        for (path, mismatch) in scan.mismatches.iter().rev() {
            let outcome = match assets::rename_asset(path, &mismatch.expected_name) {
                Ok(to) => RenameOutcome::Renamed {
                    from: path.clone(),
                    to,
                },
                Err(e) => RenameOutcome::Failed {
                    path: path.clone(),
                    reason: e.to_string(),
                },
            };
            progress(&outcome);
            outcomes.push(outcome);
        }

        let rescan = self.scan(asset_root)?;
        Ok(HarmonizeReport { outcomes, rescan })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming_style::NamingStyle;
    use std::fs;
    use tempfile::TempDir;

    fn scanner_for(rules: Vec<Rule>) -> ProjectScanner {
        ProjectScanner::new(rules, CompiledIgnore::default())
    }

    #[test]
    fn test_scan_flags_violation_with_expected_name() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::write(root.join("BigRock.mat"), "").expect("Failed to write file");

        let scanner = scanner_for(vec![Rule::new(ObjectType::Material, NamingStyle::SnakeCase)]);
        let report = scanner.scan(root).expect("Failed to scan");

        assert_eq!(report.scanned, 1);
        let mismatch = report
            .mismatches
            .get(&root.join("BigRock.mat"))
            .expect("Expected a violation");
        assert_eq!(mismatch.expected_name, "big_rock.mat");
        assert_eq!(mismatch.object_type, ObjectType::Material);
    }

    #[test]
    fn test_scan_accepts_conforming_assets() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::write(root.join("big_rock.mat"), "").expect("Failed to write file");
        fs::write(root.join("notes.txt"), "").expect("Failed to write file");

        let scanner = scanner_for(vec![Rule::new(ObjectType::Material, NamingStyle::SnakeCase)]);
        let report = scanner.scan(root).expect("Failed to scan");

        assert_eq!(report.scanned, 2);
        assert!(report.is_clean());
    }

    #[test]
    fn test_scan_without_rules_is_clean() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("AnythingGoes.mat"), "").expect("Failed to write file");

        let scanner = scanner_for(Vec::new());
        let report = scanner.scan(temp_dir.path()).expect("Failed to scan");

        assert!(report.is_clean());
    }

    #[test]
    fn test_last_matching_rule_wins() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::write(root.join("big_rock.mat"), "").expect("Failed to write file");

        let scanner = scanner_for(vec![
            Rule::new(ObjectType::Material, NamingStyle::SnakeCase),
            Rule::new(ObjectType::Material, NamingStyle::PascalCase),
        ]);
        let report = scanner.scan(root).expect("Failed to scan");

        // The first rule is satisfied, the second is not: the second wins.
        let mismatch = report
            .mismatches
            .get(&root.join("big_rock.mat"))
            .expect("Expected a violation");
        assert_eq!(mismatch.expected_name, "BigRock.mat");
    }

    #[test]
    fn test_later_satisfied_rule_does_not_clear_violation() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::write(root.join("BigRock.mat"), "").expect("Failed to write file");

        let scanner = scanner_for(vec![
            Rule::new(ObjectType::Material, NamingStyle::SnakeCase),
            Rule::new(ObjectType::Material, NamingStyle::PascalCase),
        ]);
        let report = scanner.scan(root).expect("Failed to scan");

        // The second rule is satisfied, but the first rule's violation stays.
        let mismatch = report
            .mismatches
            .get(&root.join("BigRock.mat"))
            .expect("Expected a violation");
        assert_eq!(mismatch.expected_name, "big_rock.mat");
    }

    #[test]
    fn test_scan_checks_folders() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::create_dir(root.join("my_textures")).expect("Failed to create dir");

        let scanner = scanner_for(vec![Rule::new(ObjectType::Folder, NamingStyle::PascalCase)]);
        let report = scanner.scan(root).expect("Failed to scan");

        let mismatch = report
            .mismatches
            .get(&root.join("my_textures"))
            .expect("Expected a violation");
        assert_eq!(mismatch.expected_name, "MyTextures");
        assert_eq!(mismatch.object_type, ObjectType::Folder);
    }

    #[test]
    fn test_scan_applies_custom_prefix() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::write(root.join("BigRock.mat"), "").expect("Failed to write file");

        let scanner = scanner_for(vec![Rule::with_prefix(
            ObjectType::Material,
            NamingStyle::SnakeCase,
            "ENV",
        )]);
        let report = scanner.scan(root).expect("Failed to scan");

        let mismatch = report
            .mismatches
            .get(&root.join("BigRock.mat"))
            .expect("Expected a violation");
        assert_eq!(mismatch.expected_name, "ENVbig_rock.mat");
    }

    #[test]
    fn test_scan_respects_ignore_patterns() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::create_dir(root.join("Plugins")).expect("Failed to create dir");
        fs::write(root.join("Plugins/VendorThing.mat"), "").expect("Failed to write file");
        fs::write(root.join("OurThing.mat"), "").expect("Failed to write file");

        let mut config = RulesConfig::default();
        config
            .rules
            .push(Rule::new(ObjectType::Material, NamingStyle::SnakeCase));
        config.ignore.patterns.push("Plugins/**".to_string());
        let scanner = ProjectScanner::from_config(&config).expect("Failed to build scanner");

        let report = scanner.scan(root).expect("Failed to scan");
        assert_eq!(report.mismatches.len(), 1);
        assert!(report.mismatches.contains_key(&root.join("OurThing.mat")));
    }

    #[test]
    fn test_harmonize_renames_and_rescans_clean() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::write(root.join("BigRock.mat"), "granite").expect("Failed to write file");
        fs::write(root.join("BigRock.mat.meta"), "guid: 1").expect("Failed to write file");

        let scanner = scanner_for(vec![Rule::new(ObjectType::Material, NamingStyle::SnakeCase)]);
        let report = scanner.harmonize(root).expect("Failed to harmonize");

        assert_eq!(report.renamed_count(), 1);
        assert_eq!(report.failure_count(), 0);
        assert!(report.is_clean());
        assert!(root.join("big_rock.mat").exists());
        assert!(root.join("big_rock.mat.meta").exists());
        assert!(!root.join("BigRock.mat").exists());
    }

    #[test]
    fn test_harmonize_renames_folder_and_contents() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::create_dir(root.join("my_textures")).expect("Failed to create dir");
        fs::write(root.join("my_textures/BigRock.mat"), "").expect("Failed to write file");

        let scanner = scanner_for(vec![
            Rule::new(ObjectType::Folder, NamingStyle::PascalCase),
            Rule::new(ObjectType::Material, NamingStyle::SnakeCase),
        ]);
        let report = scanner.harmonize(root).expect("Failed to harmonize");

        assert_eq!(report.renamed_count(), 2);
        assert!(report.is_clean());
        assert!(root.join("MyTextures/big_rock.mat").exists());
    }

    #[test]
    fn test_harmonize_collects_failures_and_keeps_going() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        // The rename target for BigRock.mat is already taken.
        fs::write(root.join("BigRock.mat"), "new").expect("Failed to write file");
        fs::write(root.join("big_rock.mat"), "old").expect("Failed to write file");
        fs::write(root.join("OtherThing.mat"), "").expect("Failed to write file");

        let scanner = scanner_for(vec![Rule::new(ObjectType::Material, NamingStyle::SnakeCase)]);
        let report = scanner.harmonize(root).expect("Failed to harmonize");

        assert_eq!(report.renamed_count(), 1);
        assert_eq!(report.failure_count(), 1);
        assert!(!report.is_clean());
        // The blocked asset is still there and still flagged.
        assert!(root.join("BigRock.mat").exists());
        assert!(report.rescan.mismatches.contains_key(&root.join("BigRock.mat")));
        assert!(root.join("other_thing.mat").exists());
    }

    #[test]
    fn test_harmonize_on_clean_tree_is_a_no_op() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::write(root.join("big_rock.mat"), "").expect("Failed to write file");

        let scanner = scanner_for(vec![Rule::new(ObjectType::Material, NamingStyle::SnakeCase)]);
        let report = scanner.harmonize(root).expect("Failed to harmonize");

        assert!(report.outcomes.is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn test_harmonize_reports_progress_per_attempt() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::write(root.join("RockOne.mat"), "").expect("Failed to write file");
        fs::write(root.join("RockTwo.mat"), "").expect("Failed to write file");

        let scanner = scanner_for(vec![Rule::new(ObjectType::Material, NamingStyle::SnakeCase)]);
        let mut seen = 0;
        scanner
            .harmonize_with(root, |_| seen += 1)
            .expect("Failed to harmonize");

        assert_eq!(seen, 2);
    }
}
