//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output: colored status
//! lines, progress tracking, violation summaries, and the JSON report
//! format for machine consumers.

use crate::scanner::{RenameOutcome, ScanReport};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nametidy::output::OutputFormatter;
    /// OutputFormatter::success("Renamed 4 assets");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Creates and returns a progress bar for rename operations.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nametidy::output::OutputFormatter;
    /// let pb = OutputFormatter::create_progress_bar(100);
    /// pb.inc(1);
    /// pb.finish_and_clear();
    /// ```
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Prints one line per naming violation, paths shown relative to the
    /// asset root.
    pub fn scan_results(report: &ScanReport, asset_root: &Path) {
        for (path, mismatch) in &report.mismatches {
            let shown = path.strip_prefix(asset_root).unwrap_or(path);
            Self::warning(&format!(
                "{} should be named {} ({})",
                shown.display(),
                mismatch.expected_name.bold(),
                mismatch.object_type.label()
            ));
        }
    }

    /// Prints the scan summary: a clean confirmation, or a violations-by-type
    /// table.
    pub fn scan_summary(report: &ScanReport) {
        if report.is_clean() {
            Self::success(&format!(
                "All {} scanned assets follow the naming rules",
                report.scanned
            ));
            return;
        }

        let mut type_counts: HashMap<String, usize> = HashMap::new();
        for mismatch in report.mismatches.values() {
            *type_counts
                .entry(mismatch.object_type.label().to_string())
                .or_insert(0) += 1;
        }

        Self::violation_table(&type_counts, report.mismatches.len(), report.scanned);
    }

    /// Prints a table of violation counts by object type.
    fn violation_table(type_counts: &HashMap<String, usize>, total: usize, scanned: usize) {
        Self::header("SUMMARY");

        // Sort types for consistent output
        let mut types: Vec<_> = type_counts.iter().collect();
        types.sort_by_key(|&(name, _)| name);

        let max_type_len = types
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max(11); // At least "Object Type" width

        println!(
            "{:<width$} | {}",
            "Object Type".bold(),
            "Violations".bold(),
            width = max_type_len
        );
        println!("{}", "-".repeat(max_type_len + 13));

        for (object_type, count) in &types {
            println!(
                "{:<width$} | {}",
                object_type,
                count.to_string().yellow(),
                width = max_type_len
            );
        }

        println!("{}", "-".repeat(max_type_len + 13));
        println!(
            "{:<width$} | {} of {} scanned",
            "Total".bold(),
            total.to_string().yellow().bold(),
            scanned,
            width = max_type_len
        );
    }

    /// Prints the result of one rename attempt.
    pub fn rename_outcome(outcome: &RenameOutcome, asset_root: &Path) {
        match outcome {
            RenameOutcome::Renamed { from, to } => {
                let shown = from.strip_prefix(asset_root).unwrap_or(from);
                let new_name = to
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Self::success(&format!("{} -> {}", shown.display(), new_name.bold()));
            }
            RenameOutcome::Failed { path, reason } => {
                let shown = path.strip_prefix(asset_root).unwrap_or(path);
                Self::error(&format!("{}: {}", shown.display(), reason));
            }
        }
    }

    /// Renders a scan report as pretty-printed JSON.
    ///
    /// The shape is stable for scripting: `generated_at`, `asset_root`,
    /// `scanned`, and a `mismatches` array of path/expected_name/object_type
    /// records with paths relative to the asset root.
    pub fn scan_report_json(report: &ScanReport, asset_root: &Path) -> String {
        let json = json!({
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "asset_root": asset_root.to_string_lossy().to_string(),
            "scanned": report.scanned,
            "mismatches": report.mismatches.iter().map(|(path, mismatch)| {
                let shown = path.strip_prefix(asset_root).unwrap_or(path);
                json!({
                    "path": shown.to_string_lossy().to_string(),
                    "expected_name": mismatch.expected_name,
                    "object_type": mismatch.object_type.label(),
                })
            }).collect::<Vec<_>>(),
        });

        serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string())
    }
}
