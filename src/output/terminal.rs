// Colored terminal output for summaries, ANOVA results, and samples.

use colored::Colorize;

use super::{fmt_opt, truncate_chars};
use crate::data::IdeaTable;
use crate::stats::{Anova, LabeledSummary};

/// Display per-condition summary statistics as a table.
pub fn display_summary(title: &str, summaries: &[LabeledSummary]) {
    println!("\n{}", format!("=== {title} ===").bold());

    if summaries.is_empty() {
        println!("  (no values)");
        return;
    }

    let label_width = summaries
        .iter()
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0)
        .max("condition".len());

    println!(
        "  {:<label_width$}  {:>9}  {:>9}  {:>7}",
        "condition".dimmed(),
        "mean".dimmed(),
        "std".dimmed(),
        "count".dimmed(),
    );
    println!("  {}", "-".repeat(label_width + 33).dimmed());

    for s in summaries {
        println!(
            "  {:<label_width$}  {:>9}  {:>9}  {:>7}",
            s.label.bold(),
            fmt_opt(s.summary.mean, 4),
            fmt_opt(s.summary.std, 4),
            s.summary.count,
        );
    }
}

/// Display a one-way ANOVA result, or why it could not be run.
pub fn display_anova(anova: Option<&Anova>) {
    println!("\n{}", "=== One-way ANOVA across conditions ===".bold());

    let Some(anova) = anova else {
        println!(
            "  {}",
            "Not enough conditions or observations to run ANOVA.".dimmed()
        );
        return;
    };

    let p = format!("{:.4}", anova.p_value);
    let p_colored = if anova.p_value < 0.05 {
        p.green().bold()
    } else {
        p.normal()
    };

    println!(
        "  F({}, {}) = {:.4}   p = {}",
        anova.df_between, anova.df_within, anova.f_statistic, p_colored
    );
}

/// Display sampled ideas grouped by condition and object.
pub fn display_sample(table: &IdeaTable) {
    println!(
        "\n{}",
        format!("=== Sampled ideas ({} rows) ===", table.len()).bold()
    );

    let mut current: Option<(&str, &str)> = None;
    for row in 0..table.len() {
        let key = (table.condition(row), table.object(row));
        if current != Some(key) {
            println!("\n  {} / {}", key.0.bold(), key.1.bold());
            current = Some(key);
        }
        println!("    - {}", truncate_chars(table.idea(row).trim(), 100).dimmed());
    }
    println!();
}
