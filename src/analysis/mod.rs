// Semantic distance analyses over embedded ideas.

pub mod centroid;
pub mod groups;
pub mod leave_one_out;
pub mod pairwise;

use anyhow::Result;

use crate::data::IdeaTable;

/// Whether blank ideas count toward a group's norm (its centroid, or the
/// peer mean in leave-one-out). A blank row never gets a value of its own
/// either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlankIdeas {
    /// Blank rows contribute their embedding of the empty string.
    #[default]
    InNorm,
    /// Blank rows are left out of every norm.
    Excluded,
}

impl BlankIdeas {
    /// Whether `row` is a member of its group's norm.
    pub(crate) fn in_norm(self, table: &IdeaTable, row: usize) -> bool {
        self == Self::InNorm || !table.is_blank(row)
    }
}

/// Embeddings must line up one-to-one with table rows.
pub(crate) fn check_alignment(table: &IdeaTable, embeddings: &[Vec<f64>]) -> Result<()> {
    if embeddings.len() != table.len() {
        anyhow::bail!(
            "Got {} embeddings for {} rows",
            embeddings.len(),
            table.len()
        );
    }
    Ok(())
}
