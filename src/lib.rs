// ideaspace: semantic distance analysis for creative idea generation studies
//
// This is the library root. Each module corresponds to one stage of the
// analysis: load ideas, embed them, compare them, summarize the results.

pub mod analysis;
pub mod config;
pub mod data;
pub mod embeddings;
pub mod output;
pub mod pipeline;
pub mod sampling;
pub mod stats;
