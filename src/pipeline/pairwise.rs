// Pairwise homogeneity pipeline.
//
// Computes within-group pair similarities, summarizes them per condition,
// and tests for a condition effect with a one-way ANOVA.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::analysis::pairwise::{pairwise_similarities, Grouping, PairSimilarity};
use crate::data::IdeaTable;
use crate::output::report::{write_pairs_csv, write_summary_csv};
use crate::stats::{group_values, one_way_anova, summarize_by, Anova, LabeledSummary};

/// Everything the pairwise analysis produces.
#[derive(Debug, Clone)]
pub struct PairwiseResult {
    pub pairs: Vec<PairSimilarity>,
    pub summary: Vec<LabeledSummary>,
    pub anova: Option<Anova>,
}

/// Run the pairwise analysis, writing pair rows to `output` and the
/// per-condition summary to `summary_output`.
pub fn run(
    table: &IdeaTable,
    embeddings: &[Vec<f64>],
    grouping: Grouping,
    output: &Path,
    summary_output: &Path,
) -> Result<PairwiseResult> {
    let pairs = pairwise_similarities(table, embeddings, grouping)?;

    let labels = || pairs.iter().map(|p| p.condition.as_str());
    let values = || pairs.iter().map(|p| Some(p.similarity));

    let summary = summarize_by(labels(), values());
    let by_condition: Vec<Vec<f64>> = group_values(labels(), values()).into_values().collect();
    let anova = one_way_anova(&by_condition)?;

    let participant_column = match grouping {
        Grouping::Person => Some(table.participant_column()),
        Grouping::ConditionObject => None,
    };
    write_pairs_csv(output, &pairs, participant_column)?;
    write_summary_csv(summary_output, &summary)?;

    info!(
        pairs = pairs.len(),
        conditions = summary.len(),
        output = %output.display(),
        summary = %summary_output.display(),
        "Wrote pairwise similarities"
    );

    Ok(PairwiseResult {
        pairs,
        summary,
        anova,
    })
}
