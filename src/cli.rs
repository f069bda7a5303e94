//! Command-line interface module for nametidy.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing and validation
//! - Scan orchestration and report rendering
//! - Harmonize orchestration with per-rename progress
//! - Rule listing and editing

use crate::assets;
use crate::config::{Rule, RulesConfig};
use crate::naming_style::NamingStyle;
use crate::object_type::ObjectType;
use crate::output::OutputFormatter;
use crate::scanner::ProjectScanner;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// Keep project assets named the way the rules say.
#[derive(Debug, Parser)]
#[command(name = "nametidy", version, about)]
pub struct Cli {
    /// Rules file to use instead of the default search.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan a project for naming violations.
    Scan {
        /// Project directory; its Assets/ folder is scanned when present.
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Report format.
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
    /// Rename every violating asset to its expected name.
    Harmonize {
        /// Project directory; its Assets/ folder is scanned when present.
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Show the planned renames without touching anything.
        #[arg(long)]
        dry_run: bool,
    },
    /// Inspect or edit the naming rules.
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum RulesAction {
    /// List the configured rules in precedence order.
    List {
        /// Project directory whose rules file is read.
        #[arg(long, default_value = ".", value_name = "DIR")]
        dir: PathBuf,
    },
    /// Append a rule. On overlap, later rules win.
    Add {
        /// Object type label, e.g. "Material" or "Audio Clip".
        object_type: String,

        /// Naming style label, e.g. "snake_case".
        naming_style: String,

        /// Prefix prepended verbatim to expected names.
        #[arg(long, value_name = "PREFIX")]
        prefix: Option<String>,

        /// Project directory whose rules file is edited.
        #[arg(long, default_value = ".", value_name = "DIR")]
        dir: PathBuf,
    },
    /// Remove every rule for an object type.
    Remove {
        /// Object type label, e.g. "Material" or "Audio Clip".
        object_type: String,

        /// Project directory whose rules file is edited.
        #[arg(long, default_value = ".", value_name = "DIR")]
        dir: PathBuf,
    },
}

/// Output format for scan reports.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable colored output.
    Text,
    /// Machine-readable JSON on stdout.
    Json,
}

/// Runs the parsed command.
///
/// Returns `Ok(true)` when the project ends up clean, `Ok(false)` when
/// violations were found or renames failed, and `Err` for operational
/// problems such as an unreadable configuration.
pub fn run(cli: Cli) -> Result<bool, String> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Scan { dir, format } => run_scan(&dir, config_path, format),
        Command::Harmonize { dir, dry_run } => run_harmonize(&dir, config_path, dry_run),
        Command::Rules { action } => run_rules(action, config_path).map(|()| true),
    }
}

/// Scans the project and renders the report.
fn run_scan(
    project_dir: &Path,
    config_path: Option<&Path>,
    format: ReportFormat,
) -> Result<bool, String> {
    let (scanner, config) = load_scanner(project_dir, config_path)?;
    let asset_root = assets::resolve_asset_root(project_dir).map_err(|e| e.to_string())?;

    if let ReportFormat::Text = format {
        OutputFormatter::info(&format!("Scanning: {}", asset_root.display()));
        if config.rules.is_empty() {
            OutputFormatter::warning("No naming rules configured; nothing to check.");
            OutputFormatter::plain("Add one with 'nametidy rules add <type> <style>'.");
        }
    }

    let report = scanner
        .scan(&asset_root)
        .map_err(|e| format!("Error scanning {}: {}", asset_root.display(), e))?;

    match format {
        ReportFormat::Json => {
            println!("{}", OutputFormatter::scan_report_json(&report, &asset_root));
        }
        ReportFormat::Text => {
            OutputFormatter::scan_results(&report, &asset_root);
            OutputFormatter::scan_summary(&report);
        }
    }

    Ok(report.is_clean())
}

/// Renames every violating asset, or previews the renames under `--dry-run`.
fn run_harmonize(
    project_dir: &Path,
    config_path: Option<&Path>,
    dry_run: bool,
) -> Result<bool, String> {
    let (scanner, config) = load_scanner(project_dir, config_path)?;
    let asset_root = assets::resolve_asset_root(project_dir).map_err(|e| e.to_string())?;

    OutputFormatter::info(&format!("Harmonizing: {}", asset_root.display()));
    if config.rules.is_empty() {
        OutputFormatter::warning("No naming rules configured; nothing to do.");
        return Ok(true);
    }

    let preview = scanner
        .scan(&asset_root)
        .map_err(|e| format!("Error scanning {}: {}", asset_root.display(), e))?;

    if preview.is_clean() {
        OutputFormatter::success(&format!(
            "All {} scanned assets follow the naming rules",
            preview.scanned
        ));
        return Ok(true);
    }

    if dry_run {
        for (path, mismatch) in &preview.mismatches {
            let shown = path.strip_prefix(&asset_root).unwrap_or(path);
            OutputFormatter::dry_run_notice(&format!(
                "Would rename {} -> {}",
                shown.display(),
                mismatch.expected_name
            ));
        }
        OutputFormatter::plain(&format!(
            "\n{} assets would be renamed. No files were modified.",
            preview.mismatches.len()
        ));
        return Ok(false);
    }

    let bar = OutputFormatter::create_progress_bar(preview.mismatches.len() as u64);
    let report = scanner
        .harmonize_with(&asset_root, |outcome| {
            bar.suspend(|| OutputFormatter::rename_outcome(outcome, &asset_root));
            bar.inc(1);
        })
        .map_err(|e| format!("Error harmonizing {}: {}", asset_root.display(), e))?;
    bar.finish_and_clear();

    OutputFormatter::plain(&format!(
        "Renamed {} of {} flagged assets",
        report.renamed_count(),
        report.outcomes.len()
    ));

    if report.rescan.is_clean() {
        OutputFormatter::success("Project follows the naming rules.");
    } else {
        OutputFormatter::warning(&format!(
            "{} violations remain after harmonizing",
            report.rescan.mismatches.len()
        ));
        OutputFormatter::scan_results(&report.rescan, &asset_root);
    }

    Ok(report.is_clean())
}

/// Lists or edits the persisted rules.
fn run_rules(action: RulesAction, config_path: Option<&Path>) -> Result<(), String> {
    match action {
        RulesAction::List { dir } => {
            let config = load_config(config_path, &dir)?;

            if config.rules.is_empty() {
                OutputFormatter::plain("No naming rules configured.");
            } else {
                OutputFormatter::header("NAMING RULES");
                for (index, rule) in config.rules.iter().enumerate() {
                    OutputFormatter::plain(&format!("{:>3}. {}", index + 1, rule.summary()));
                }
            }

            if !config.ignore.patterns.is_empty() {
                OutputFormatter::header("IGNORED PATTERNS");
                for pattern in &config.ignore.patterns {
                    OutputFormatter::plain(&format!("  {}", pattern));
                }
            }

            Ok(())
        }
        RulesAction::Add {
            object_type,
            naming_style,
            prefix,
            dir,
        } => {
            let object_type = parse_object_type(&object_type)?;
            let naming_style = parse_naming_style(&naming_style)?;

            let path = RulesConfig::locate(config_path, &dir)
                .unwrap_or_else(|| RulesConfig::default_save_path(&dir));
            // A not-yet-existing rules file is bootstrapped rather than
            // treated as a load error.
            let mut config = if path.exists() {
                load_config(config_path, &dir)?
            } else {
                RulesConfig::default()
            };

            let rule = match prefix {
                Some(prefix) => Rule::with_prefix(object_type, naming_style, &prefix),
                None => Rule::new(object_type, naming_style),
            };
            let summary = rule.summary();
            config.rules.push(rule);
            config
                .save_to_file(&path)
                .map_err(|e| format!("Error: {}", e))?;

            OutputFormatter::success(&format!("Added rule: {}", summary));
            OutputFormatter::plain(&format!("Saved to {}", path.display()));
            Ok(())
        }
        RulesAction::Remove { object_type, dir } => {
            let object_type = parse_object_type(&object_type)?;

            let path = RulesConfig::locate(config_path, &dir)
                .ok_or_else(|| "No rules file found to edit".to_string())?;
            let mut config = load_config(config_path, &dir)?;

            let before = config.rules.len();
            config.rules.retain(|rule| rule.object_type != object_type);
            let removed = before - config.rules.len();

            if removed == 0 {
                OutputFormatter::warning(&format!(
                    "No rules configured for {}",
                    object_type.label()
                ));
                return Ok(());
            }

            config
                .save_to_file(&path)
                .map_err(|e| format!("Error: {}", e))?;

            OutputFormatter::success(&format!(
                "Removed {} rule{} for {}",
                removed,
                if removed == 1 { "" } else { "s" },
                object_type.label()
            ));
            Ok(())
        }
    }
}

/// Loads configuration and builds a scanner from it.
fn load_scanner(
    project_dir: &Path,
    config_path: Option<&Path>,
) -> Result<(ProjectScanner, RulesConfig), String> {
    let config = load_config(config_path, project_dir)?;
    let scanner = ProjectScanner::from_config(&config)
        .map_err(|e| format!("Error compiling ignore patterns: {}", e))?;
    Ok((scanner, config))
}

fn load_config(config_path: Option<&Path>, project_dir: &Path) -> Result<RulesConfig, String> {
    RulesConfig::load(config_path, project_dir)
        .map_err(|e| format!("Error loading configuration: {}", e))
}

fn parse_object_type(label: &str) -> Result<ObjectType, String> {
    ObjectType::from_label(label).ok_or_else(|| {
        let known = ObjectType::ALL
            .iter()
            .map(|t| t.label())
            .collect::<Vec<_>>()
            .join(", ");
        format!("Unknown object type '{}'. Known types: {}", label, known)
    })
}

fn parse_naming_style(label: &str) -> Result<NamingStyle, String> {
    NamingStyle::from_label(label).ok_or_else(|| {
        let known = NamingStyle::ALL
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ");
        format!("Unknown naming style '{}'. Known styles: {}", label, known)
    })
}
