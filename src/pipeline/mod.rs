// Analysis pipelines: one per subcommand.
//
// Each pipeline takes a loaded table plus its embeddings, runs one analysis,
// writes the output CSV, and hands back what the CLI needs to display.
// Embedding is kept out of the pipelines so they run the same on model
// output and on embeddings read back from an earlier export.

pub mod pairwise;
pub mod per_row;
pub mod sample;

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use crate::data::IdeaTable;
use crate::embeddings::download::embedding_model_dir;
use crate::embeddings::onnx::SentenceEmbedder;
use crate::embeddings::{embed_all, Embedder};

/// Where row embeddings come from.
#[derive(Debug, Clone)]
pub enum EmbeddingSource {
    /// Run the local sentence model over the idea column.
    Model { model_dir: PathBuf, batch_size: usize },
    /// Read `embedding_*` columns already present in the input.
    Columns,
}

/// Produce one embedding per table row.
pub async fn resolve_embeddings(
    table: &IdeaTable,
    source: &EmbeddingSource,
) -> Result<Vec<Vec<f64>>> {
    match source {
        EmbeddingSource::Columns => {
            let embeddings = table.embedding_columns()?;
            info!(
                rows = embeddings.len(),
                dim = embeddings.first().map(Vec::len).unwrap_or(0),
                "Read embeddings from input columns"
            );
            Ok(embeddings)
        }
        EmbeddingSource::Model {
            model_dir,
            batch_size,
        } => {
            let embedder = SentenceEmbedder::load(&embedding_model_dir(model_dir))?;
            embed_table(&embedder, table, *batch_size).await
        }
    }
}

/// Embed every idea in the table (blank ideas embed as the empty string).
pub async fn embed_table(
    embedder: &dyn Embedder,
    table: &IdeaTable,
    batch_size: usize,
) -> Result<Vec<Vec<f64>>> {
    info!(ideas = table.len(), batch_size, "Embedding ideas");
    embed_all(embedder, &table.ideas(), batch_size).await
}

/// Default output path next to the input: `<stem>_<suffix>.csv`.
pub fn derive_output(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ideas".to_string());
    input.with_file_name(format!("{stem}_{suffix}.csv"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_output_keeps_directory() {
        let out = derive_output(Path::new("data/evaluated_ideas.csv"), "centroid_distance");
        assert_eq!(out, PathBuf::from("data/evaluated_ideas_centroid_distance.csv"));
    }

    #[test]
    fn test_derive_output_bare_name() {
        let out = derive_output(Path::new("ideas.csv"), "pairwise");
        assert_eq!(out, PathBuf::from("ideas_pairwise.csv"));
    }
}
