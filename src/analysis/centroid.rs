// Distance from each idea to its group norm.
//
// The norm of a condition x object cell is the centroid of the ideas in that
// cell, the row itself included. Blank ideas count toward it unless
// `BlankIdeas::Excluded` is asked for. A high distance means the idea
// sits far from what that group typically proposed for that object.

use std::collections::HashMap;

use anyhow::Result;

use super::groups::{group_rows, GroupKey};
use super::{check_alignment, BlankIdeas};
use crate::data::IdeaTable;
use crate::embeddings::vector::{cosine_distance, mean_embedding};

/// Centroid of the norm members in each condition x object group.
///
/// With blank ideas excluded, a group made only of blanks has no centroid.
pub fn group_centroids(
    table: &IdeaTable,
    embeddings: &[Vec<f64>],
    blanks: BlankIdeas,
) -> HashMap<GroupKey, Vec<f64>> {
    group_rows(table)
        .into_iter()
        .filter_map(|(key, rows)| {
            let members: Vec<&[f64]> = rows
                .iter()
                .filter(|&&r| blanks.in_norm(table, r))
                .map(|&r| embeddings[r].as_slice())
                .collect();
            mean_embedding(&members).map(|centroid| (key, centroid))
        })
        .collect()
}

/// Cosine distance from every row to its group centroid.
///
/// One value per row; blank ideas and rows outside every group get `None`.
pub fn centroid_distances(
    table: &IdeaTable,
    embeddings: &[Vec<f64>],
    blanks: BlankIdeas,
) -> Result<Vec<Option<f64>>> {
    check_alignment(table, embeddings)?;
    let centroids = group_centroids(table, embeddings, blanks);

    Ok((0..table.len())
        .map(|row| {
            if table.is_blank(row) {
                return None;
            }
            centroids
                .get(&GroupKey::of_row(table, row)?)
                .map(|centroid| cosine_distance(&embeddings[row], centroid))
        })
        .collect())
}
