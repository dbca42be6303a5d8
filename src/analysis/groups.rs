// Grouping rows by experimental cell.
//
// Groups are returned in order of first appearance so outputs follow the
// input file, not hash order. A row whose condition, object, or participant
// cell is missing belongs to no group, the way pandas drops NaN group keys.

use std::collections::HashMap;
use std::hash::Hash;

use anyhow::Result;
use serde::Serialize;

use crate::data::{is_missing, IdeaTable};

/// A condition x object cell of the design.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GroupKey {
    pub condition: String,
    pub object: String,
}

/// One participant's ideas within a condition x object cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PersonKey {
    pub condition: String,
    pub object: String,
    pub participant: String,
}

impl GroupKey {
    /// The row's cell, or `None` when its condition or object is missing.
    pub fn of_row(table: &IdeaTable, row: usize) -> Option<Self> {
        let (condition, object) = (table.condition(row), table.object(row));
        if is_missing(condition) || is_missing(object) {
            return None;
        }
        Some(Self {
            condition: condition.to_string(),
            object: object.to_string(),
        })
    }
}

impl PersonKey {
    /// The row's cell and participant, or `None` when any of them is missing.
    pub fn of_row(table: &IdeaTable, row: usize) -> Option<Self> {
        let group = GroupKey::of_row(table, row)?;
        let participant = table.participant(row).filter(|p| !is_missing(p))?;
        Some(Self {
            condition: group.condition,
            object: group.object,
            participant: participant.to_string(),
        })
    }
}

/// Rows of each condition x object group.
pub fn group_rows(table: &IdeaTable) -> Vec<(GroupKey, Vec<usize>)> {
    group_by((0..table.len()).map(|i| GroupKey::of_row(table, i)))
}

/// Rows of each condition x object x participant group.
pub fn group_rows_by_person(table: &IdeaTable) -> Result<Vec<(PersonKey, Vec<usize>)>> {
    table.require_participant()?;
    Ok(group_by((0..table.len()).map(|i| PersonKey::of_row(table, i))))
}

/// Bucket row indices by key, keeping first-appearance order of keys and
/// row order within each bucket. Rows keyed `None` are left out.
pub fn group_by<K, I>(keys: I) -> Vec<(K, Vec<usize>)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = Option<K>>,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<usize>)> = Vec::new();

    for (row, key) in keys.into_iter().enumerate() {
        let Some(key) = key else { continue };
        match slots.get(&key) {
            Some(&slot) => groups[slot].1.push(row),
            None => {
                slots.insert(key.clone(), groups.len());
                groups.push((key, vec![row]));
            }
        }
    }

    groups
}
