// Pairwise semantic similarity within groups.
//
// Every unordered pair of ideas in a group contributes one similarity (the
// upper triangle of the group's similarity matrix, diagonal excluded). At
// the condition x object level this measures how homogeneous a group's ideas
// are; at the person level it measures how much a participant repeats
// themselves.

use anyhow::Result;
use serde::Serialize;

use super::check_alignment;
use super::groups::{group_rows, group_rows_by_person};
use crate::data::IdeaTable;
use crate::embeddings::vector::cosine_similarity;

/// How rows are grouped before pairs are formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// Condition x object.
    ConditionObject,
    /// Condition x object x participant.
    Person,
}

/// Similarity of one pair of ideas in the same group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairSimilarity {
    pub condition: String,
    pub object: String,
    /// Set only for person-level grouping.
    pub participant: Option<String>,
    pub first_row: usize,
    pub second_row: usize,
    pub similarity: f64,
}

/// Similarities of all within-group pairs of non-blank ideas.
///
/// Groups with fewer than two non-blank ideas contribute nothing; a group
/// of n ideas contributes n(n-1)/2 pairs.
pub fn pairwise_similarities(
    table: &IdeaTable,
    embeddings: &[Vec<f64>],
    grouping: Grouping,
) -> Result<Vec<PairSimilarity>> {
    check_alignment(table, embeddings)?;

    let groups: Vec<(String, String, Option<String>, Vec<usize>)> = match grouping {
        Grouping::ConditionObject => group_rows(table)
            .into_iter()
            .map(|(k, rows)| (k.condition, k.object, None, rows))
            .collect(),
        Grouping::Person => group_rows_by_person(table)?
            .into_iter()
            .map(|(k, rows)| (k.condition, k.object, Some(k.participant), rows))
            .collect(),
    };

    let mut pairs = Vec::new();
    for (condition, object, participant, rows) in groups {
        let members: Vec<usize> = rows.into_iter().filter(|&r| !table.is_blank(r)).collect();
        for (i, &a) in members.iter().enumerate() {
            for &b in &members[i + 1..] {
                pairs.push(PairSimilarity {
                    condition: condition.clone(),
                    object: object.clone(),
                    participant: participant.clone(),
                    first_row: a,
                    second_row: b,
                    similarity: cosine_similarity(&embeddings[a], &embeddings[b]),
                });
            }
        }
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ColumnMap;

    fn table(csv: &str) -> IdeaTable {
        IdeaTable::from_reader(csv.as_bytes(), &ColumnMap::default()).unwrap()
    }

    #[test]
    fn test_upper_triangle_pairs() {
        let t = table("condition,object,use\nc,o,a\nc,o,b\nc,o,c\nc,o,d\n");
        let emb = vec![vec![1.0, 0.0]; 4];
        let pairs = pairwise_similarities(&t, &emb, Grouping::ConditionObject).unwrap();
        assert_eq!(pairs.len(), 6);
        assert!(pairs.iter().all(|p| p.first_row < p.second_row));
        assert!(pairs.iter().all(|p| (p.similarity - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_pairs_stay_within_groups() {
        let t = table("condition,object,use\nc,o,a\nd,o,b\nc,o,c\nd,p,e\n");
        let emb = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.0, 1.0], vec![1.0, 1.0]];
        let pairs = pairwise_similarities(&t, &emb, Grouping::ConditionObject).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!((pairs[0].first_row, pairs[0].second_row), (0, 2));
        assert!(pairs[0].similarity.abs() < 1e-12);
    }

    #[test]
    fn test_blank_ideas_skipped() {
        let t = table("condition,object,use\nc,o,a\nc,o,\nc,o,b\n");
        let emb = vec![vec![1.0, 0.0]; 3];
        let pairs = pairwise_similarities(&t, &emb, Grouping::ConditionObject).unwrap();
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn test_person_grouping() {
        let t = table(
            "ResponseId,condition,object,use\nR1,c,o,a\nR2,c,o,b\nR1,c,o,c\nR2,c,o,d\nR2,c,o,e\n",
        );
        let emb = vec![vec![1.0, 0.0]; 5];
        let pairs = pairwise_similarities(&t, &emb, Grouping::Person).unwrap();
        // R1: 1 pair, R2: 3 pairs
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[0].participant.as_deref(), Some("R1"));
        assert_eq!(
            pairs
                .iter()
                .filter(|p| p.participant.as_deref() == Some("R2"))
                .count(),
            3
        );
    }

    #[test]
    fn test_rows_with_missing_keys_form_no_pairs() {
        let t = table(
            "ResponseId,condition,object,use\nR1,,brick,a\nR1,,brick,b\nR1,c,brick,x\nR1,c,brick,y\n,c,brick,z\n",
        );
        let emb = vec![vec![1.0, 0.0]; 5];
        let pairs = pairwise_similarities(&t, &emb, Grouping::ConditionObject).unwrap();
        assert_eq!(pairs.len(), 3);
        assert!(pairs.iter().all(|p| p.condition == "c"));

        let pairs = pairwise_similarities(&t, &emb, Grouping::Person).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!((pairs[0].first_row, pairs[0].second_row), (2, 3));
    }

    #[test]
    fn test_person_grouping_requires_participant() {
        let t = table("condition,object,use\nc,o,a\n");
        let emb = vec![vec![1.0]];
        assert!(pairwise_similarities(&t, &emb, Grouping::Person).is_err());
    }
}
