// Column roles in the idea submission CSV.
//
// Different exports of the study data use slightly different headers, so the
// roles are mapped by name rather than by position.

/// Default header for the free-text idea.
pub const DEFAULT_IDEA_COLUMN: &str = "use";
/// Default header for the experimental condition.
pub const DEFAULT_CONDITION_COLUMN: &str = "condition";
/// Default header for the object the idea is a use for.
pub const DEFAULT_OBJECT_COLUMN: &str = "object";
/// Default header for the participant identifier (Qualtrics ResponseId).
pub const DEFAULT_PARTICIPANT_COLUMN: &str = "ResponseId";

/// Prefix of the embedding columns written by `ideaspace embed`.
pub const EMBEDDING_COLUMN_PREFIX: &str = "embedding_";

/// Which header holds each role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub idea: String,
    pub condition: String,
    pub object: String,
    pub participant: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            idea: DEFAULT_IDEA_COLUMN.to_string(),
            condition: DEFAULT_CONDITION_COLUMN.to_string(),
            object: DEFAULT_OBJECT_COLUMN.to_string(),
            participant: DEFAULT_PARTICIPANT_COLUMN.to_string(),
        }
    }
}

/// Name of the `i`-th embedding column.
pub fn embedding_column_name(i: usize) -> String {
    format!("{EMBEDDING_COLUMN_PREFIX}{i}")
}
