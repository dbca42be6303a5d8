// Leave-one-out similarity to the rest of the group.
//
// For each idea, the comparison point is the mean of every *other* idea in
// its condition x object cell, so an idea never counts toward its own norm.
// Blank peers count unless `BlankIdeas::Excluded` is asked for. Group sums
// are computed once and each row subtracts itself.

use std::collections::HashMap;

use anyhow::Result;

use super::{check_alignment, BlankIdeas};
use super::groups::{group_rows, GroupKey};
use crate::data::IdeaTable;
use crate::embeddings::vector::{add_assign, cosine_similarity};

/// Running total of a group's norm members.
struct GroupSum {
    sum: Vec<f64>,
    count: usize,
}

/// Cosine similarity between each row and the mean of its group's other rows.
///
/// One value per row. `None` for blank ideas, for rows outside every group,
/// and for ideas with no peers in their group's norm.
pub fn leave_one_out_similarities(
    table: &IdeaTable,
    embeddings: &[Vec<f64>],
    blanks: BlankIdeas,
) -> Result<Vec<Option<f64>>> {
    check_alignment(table, embeddings)?;

    let mut sums: HashMap<GroupKey, GroupSum> = HashMap::new();
    for (key, rows) in group_rows(table) {
        let mut total = GroupSum {
            sum: Vec::new(),
            count: 0,
        };
        for &r in rows.iter().filter(|&&r| blanks.in_norm(table, r)) {
            if total.sum.is_empty() {
                total.sum = vec![0.0; embeddings[r].len()];
            }
            add_assign(&mut total.sum, &embeddings[r]);
            total.count += 1;
        }
        sums.insert(key, total);
    }

    Ok((0..table.len())
        .map(|row| {
            if table.is_blank(row) {
                return None;
            }
            let group = sums.get(&GroupKey::of_row(table, row)?)?;
            if group.count < 2 {
                return None;
            }
            let others = (group.count - 1) as f64;
            let mean_of_others: Vec<f64> = group
                .sum
                .iter()
                .zip(&embeddings[row])
                .map(|(total, own)| (total - own) / others)
                .collect();
            Some(cosine_similarity(&embeddings[row], &mean_of_others))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ColumnMap;

    fn table(csv: &str) -> IdeaTable {
        IdeaTable::from_reader(csv.as_bytes(), &ColumnMap::default()).unwrap()
    }

    #[test]
    fn test_excludes_own_embedding() {
        // Row 0 is orthogonal to the other two; including itself would make
        // the similarity positive.
        let t = table("condition,object,use\nc,o,a\nc,o,b\nc,o,c\n");
        let emb = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.0, 1.0]];
        let sims = leave_one_out_similarities(&t, &emb, BlankIdeas::default()).unwrap();
        assert!(sims[0].unwrap().abs() < 1e-12);
        assert!((sims[1].unwrap() - 1.0 / 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_pair_compares_against_the_other() {
        let t = table("condition,object,use\nc,o,a\nc,o,b\n");
        let emb = vec![vec![1.0, 0.0], vec![1.0, 1.0]];
        let sims = leave_one_out_similarities(&t, &emb, BlankIdeas::default()).unwrap();
        let expected = cosine_similarity(&emb[0], &emb[1]);
        assert!((sims[0].unwrap() - expected).abs() < 1e-12);
        assert!((sims[1].unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_blank_peer_counts_by_default() {
        // Row 0's only peer is the blank row, whose embedding still counts.
        let t = table("condition,object,use\nc,o,a\nc,o,\nd,o,b\n");
        let emb = vec![vec![1.0, 0.0], vec![1.0, 1.0], vec![0.0, 1.0]];
        let sims = leave_one_out_similarities(&t, &emb, BlankIdeas::default()).unwrap();
        assert!((sims[0].unwrap() - 1.0 / 2.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(sims[1], None);
        assert_eq!(sims[2], None);
    }

    #[test]
    fn test_lone_and_blank_rows_are_none_when_blanks_excluded() {
        let t = table("condition,object,use\nc,o,a\nc,o,\nd,o,b\n");
        let emb = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.0, 1.0]];
        let sims = leave_one_out_similarities(&t, &emb, BlankIdeas::Excluded).unwrap();
        assert_eq!(sims, vec![None, None, None]);
    }

    #[test]
    fn test_missing_condition_gets_no_similarity() {
        let t = table("condition,object,use\n,brick,a\n,brick,b\nc,brick,x\nc,brick,y\n");
        let emb = vec![vec![1.0, 0.0], vec![1.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0]];
        let sims = leave_one_out_similarities(&t, &emb, BlankIdeas::default()).unwrap();
        assert_eq!(sims[0], None);
        assert_eq!(sims[1], None);
        assert!(sims[2].is_some() && sims[3].is_some());
    }
}
