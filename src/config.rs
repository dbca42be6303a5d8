use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::data::ColumnMap;

/// Batch size used when IDEASPACE_BATCH_SIZE is unset.
pub const DEFAULT_BATCH_SIZE: usize = 64;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy; command-line flags
/// override anything set here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding downloaded models (IDEASPACE_MODEL_DIR)
    pub model_dir: PathBuf,
    /// Texts per inference call (IDEASPACE_BATCH_SIZE)
    pub batch_size: usize,
    /// Column headers for each role (IDEASPACE_*_COLUMN)
    pub columns: ColumnMap,
}

impl Config {
    /// Load configuration from environment variables. Everything has a
    /// default, so this only fails on malformed values.
    pub fn load() -> Result<Self> {
        let model_dir = env::var("IDEASPACE_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| crate::embeddings::download::default_model_dir());

        let batch_size = match env::var("IDEASPACE_BATCH_SIZE") {
            Ok(raw) => parse_batch_size(&raw)?,
            Err(_) => DEFAULT_BATCH_SIZE,
        };

        let defaults = ColumnMap::default();
        let columns = ColumnMap {
            idea: env::var("IDEASPACE_IDEA_COLUMN").unwrap_or(defaults.idea),
            condition: env::var("IDEASPACE_CONDITION_COLUMN").unwrap_or(defaults.condition),
            object: env::var("IDEASPACE_OBJECT_COLUMN").unwrap_or(defaults.object),
            participant: env::var("IDEASPACE_PARTICIPANT_COLUMN")
                .unwrap_or(defaults.participant),
        };

        Ok(Self {
            model_dir,
            batch_size,
            columns,
        })
    }

    /// Check that the embedding model has been downloaded.
    pub fn require_model(&self) -> Result<()> {
        if !crate::embeddings::download::embedding_files_present(&self.model_dir) {
            anyhow::bail!(
                "Embedding model not found in {}\n\
                 Run `ideaspace download-model` to download it,\n\
                 or pass --from-columns to reuse exported embeddings.",
                self.model_dir.display()
            );
        }
        Ok(())
    }
}

fn parse_batch_size(raw: &str) -> Result<usize> {
    let size: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("IDEASPACE_BATCH_SIZE must be a positive integer, got '{raw}'"))?;
    if size == 0 {
        anyhow::bail!("IDEASPACE_BATCH_SIZE must be at least 1");
    }
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_batch_size() {
        assert_eq!(parse_batch_size(" 32 ").unwrap(), 32);
        assert!(parse_batch_size("0").is_err());
        assert!(parse_batch_size("lots").is_err());
    }

    #[test]
    fn test_require_model_fails_for_empty_dir() {
        let config = Config {
            model_dir: std::env::temp_dir().join("ideaspace-config-no-model"),
            batch_size: DEFAULT_BATCH_SIZE,
            columns: ColumnMap::default(),
        };
        let err = config.require_model().unwrap_err().to_string();
        assert!(err.contains("download-model"), "got: {err}");
    }
}
