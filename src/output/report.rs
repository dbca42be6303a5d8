// CSV and JSON reports for analysis results.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analysis::pairwise::PairSimilarity;
use crate::stats::{Anova, LabeledSummary};

/// Machine-readable summary of one analysis run, printed with `--json`.
#[derive(Debug, Serialize)]
pub struct AnalysisReport<'a> {
    pub analysis: &'a str,
    pub input: String,
    pub output: String,
    pub rows: usize,
    pub summary: &'a [LabeledSummary],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anova: Option<&'a Anova>,
}

impl AnalysisReport<'_> {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }
}

fn create(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    File::create(path).with_context(|| format!("Failed to create {}", path.display()))
}

/// Write per-condition summaries to a CSV file.
pub fn write_summary_csv(path: &Path, summaries: &[LabeledSummary]) -> Result<()> {
    write_summary(create(path)?, summaries)
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Write per-condition summaries as `condition,mean,std,count` rows.
pub fn write_summary<W: Write>(writer: W, summaries: &[LabeledSummary]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["condition", "mean", "std", "count"])?;
    for s in summaries {
        wtr.write_record([
            s.label.clone(),
            opt_cell(s.summary.mean),
            opt_cell(s.summary.std),
            s.summary.count.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write pairwise similarities to a CSV file.
pub fn write_pairs_csv(
    path: &Path,
    pairs: &[PairSimilarity],
    participant_column: Option<&str>,
) -> Result<()> {
    write_pairs(create(path)?, pairs, participant_column)
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Write pairwise similarities as `condition,object[,participant],similarity`.
///
/// The participant column is included when `participant_column` names it.
pub fn write_pairs<W: Write>(
    writer: W,
    pairs: &[PairSimilarity],
    participant_column: Option<&str>,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["condition", "object"];
    header.extend(participant_column);
    header.push("similarity");
    wtr.write_record(&header)?;

    for p in pairs {
        let mut record = vec![p.condition.clone(), p.object.clone()];
        if participant_column.is_some() {
            record.push(p.participant.clone().unwrap_or_default());
        }
        record.push(p.similarity.to_string());
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

fn opt_cell(value: Option<f64>) -> String {
    value
        .filter(|v| !v.is_nan())
        .map(|v| v.to_string())
        .unwrap_or_default()
}
