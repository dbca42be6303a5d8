// Summary statistics and significance tests for analysis outputs.

pub mod anova;
pub mod summary;

pub use anova::{one_way_anova, Anova};
pub use summary::{describe, group_values, summarize_by, LabeledSummary, Summary};
