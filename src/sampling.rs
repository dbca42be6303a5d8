// Stratified sampling of ideas for rating.
//
// Draws a fixed number of ideas from every condition x object cell so raters
// see a balanced set. Seeded, so the same seed on the same file always picks
// the same rows.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use tracing::warn;

use crate::analysis::groups::group_rows;
use crate::data::IdeaTable;

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// Pick up to `per_group` row indices from each condition x object group.
///
/// Groups appear in first-appearance order (not sorted by key) and rows keep
/// their file order within a group. Groups smaller than `per_group` are
/// taken whole. Rows with a missing condition or object are never picked.
pub fn stratified_sample(table: &IdeaTable, per_group: usize, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut picked = Vec::new();

    for (key, rows) in group_rows(table) {
        if rows.len() <= per_group {
            if rows.len() < per_group {
                warn!(
                    condition = %key.condition,
                    object = %key.object,
                    available = rows.len(),
                    requested = per_group,
                    "Group smaller than sample size, taking all rows"
                );
            }
            picked.extend(rows);
            continue;
        }

        let mut chosen: Vec<usize> = index::sample(&mut rng, rows.len(), per_group)
            .into_iter()
            .map(|i| rows[i])
            .collect();
        chosen.sort_unstable();
        picked.extend(chosen);
    }

    picked
}
