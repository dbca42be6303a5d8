// Stratified sampling pipeline: pick ideas per condition x object for
// rating and write them out with all original columns.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::data::IdeaTable;
use crate::sampling::stratified_sample;

/// Sample rows and write them to `output`. Returns the sampled table.
pub fn run(table: &IdeaTable, per_group: usize, seed: u64, output: &Path) -> Result<IdeaTable> {
    if per_group == 0 {
        anyhow::bail!("--per-group must be at least 1");
    }

    let rows = stratified_sample(table, per_group, seed);
    let sampled = table.subset(&rows);
    sampled.write_with_columns(output, &[])?;

    info!(
        sampled = sampled.len(),
        total = table.len(),
        per_group,
        seed,
        output = %output.display(),
        "Wrote stratified sample"
    );

    Ok(sampled)
}
