// Per-row pipelines: embedding export, centroid distance, and leave-one-out
// similarity. Each writes the input rows back out with result columns
// appended, so the output always has one row per input row.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::analysis::centroid::centroid_distances;
use crate::analysis::BlankIdeas;
use crate::analysis::leave_one_out::leave_one_out_similarities;
use crate::data::columns::embedding_column_name;
use crate::data::{IdeaTable, OutputColumn};
use crate::stats::{summarize_by, LabeledSummary};

/// Output column for distance to the condition x object centroid.
pub const SEMANTIC_DISTANCE_COLUMN: &str = "semantic_distance";

/// Output column for leave-one-out similarity within condition x object.
pub const LEAVE_ONE_OUT_COLUMN: &str = "similarity_to_cond_obj";

/// A per-row result column and its per-condition summary.
#[derive(Debug, Clone)]
pub struct PerRowResult {
    pub column: OutputColumn,
    pub summary: Vec<LabeledSummary>,
}

/// Write the table with `embedding_0..embedding_{d-1}` appended.
///
/// Returns the embedding dimension.
pub fn run_embed(table: &IdeaTable, embeddings: &[Vec<f64>], output: &Path) -> Result<usize> {
    crate::analysis::check_alignment(table, embeddings)?;
    let dim = embeddings.first().map(Vec::len).unwrap_or(0);

    let columns: Vec<OutputColumn> = (0..dim)
        .map(|d| {
            OutputColumn::new(
                embedding_column_name(d),
                embeddings.iter().map(|e| e.get(d).copied()).collect(),
            )
        })
        .collect();

    table.write_with_columns(output, &columns)?;
    info!(rows = table.len(), dim, output = %output.display(), "Wrote embeddings");
    Ok(dim)
}

/// Distance of each idea to its condition x object centroid.
pub fn run_centroid(
    table: &IdeaTable,
    embeddings: &[Vec<f64>],
    blanks: BlankIdeas,
    output: &Path,
) -> Result<PerRowResult> {
    let values = centroid_distances(table, embeddings, blanks)?;
    finish(table, SEMANTIC_DISTANCE_COLUMN, values, output)
}

/// Similarity of each idea to the rest of its condition x object group.
pub fn run_leave_one_out(
    table: &IdeaTable,
    embeddings: &[Vec<f64>],
    blanks: BlankIdeas,
    output: &Path,
) -> Result<PerRowResult> {
    let values = leave_one_out_similarities(table, embeddings, blanks)?;
    finish(table, LEAVE_ONE_OUT_COLUMN, values, output)
}

fn finish(
    table: &IdeaTable,
    name: &str,
    values: Vec<Option<f64>>,
    output: &Path,
) -> Result<PerRowResult> {
    let summary = summarize_by((0..table.len()).map(|i| table.condition(i)), values.iter().copied());
    let column = OutputColumn::new(name, values);

    table.write_with_columns(output, std::slice::from_ref(&column))?;

    let missing = column.values.iter().filter(|v| v.is_none()).count();
    info!(
        rows = table.len(),
        missing,
        column = name,
        output = %output.display(),
        "Wrote per-row results"
    );

    Ok(PerRowResult { column, summary })
}
