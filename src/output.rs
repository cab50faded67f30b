//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output, including colored
//! messages, the spinner shown while a sort is running, and the final
//! summary table. This module abstracts away output details, making it easy
//! to change formatting globally.

use crate::sorter::SortOutcome;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
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

    /// Creates a spinner for the sort run.
    ///
    /// The walk does not know its total up front, so a spinner with a steady
    /// tick stands in for a progress bar.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mediasort::output::OutputFormatter;
    /// let spinner = OutputFormatter::create_spinner("Sorting media...");
    /// // ... long-running work ...
    /// spinner.finish_and_clear();
    /// ```
    pub fn create_spinner(message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("Invalid spinner template"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Prints the summary table for a completed (or aborted) sort run.
    pub fn summary(outcome: &SortOutcome, executed: bool) {
        Self::header("SUMMARY");

        let rows = [
            ("Photos", outcome.photo_count),
            ("Videos", outcome.video_count),
            ("Folders", outcome.folder_count),
        ];

        let width = rows
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0)
            .max("Category".len());

        println!(
            "{:<width$} | {}",
            "Category".bold(),
            "Count".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));

        for (label, count) in rows {
            println!(
                "{:<width$} | {}",
                label,
                count.to_string().green(),
                width = width
            );
        }

        if !executed {
            Self::dry_run_notice("Counts reflect what an execute run would do; nothing was modified.");
        }

        match (&outcome.error_detail, outcome.success) {
            (Some(detail), _) => Self::error(&format!("Sort did not complete: {}", detail)),
            (None, true) => Self::success("Sort complete!"),
            (None, false) => Self::error("Sort did not complete"),
        }
    }
}
