// Embedder trait: the swap-ready abstraction over sentence encoders.
//
// The analyses only need "text in, fixed-length vector out". The default
// implementation runs all-MiniLM-L6-v2 locally through ONNX; tests plug in
// deterministic fakes.

use anyhow::Result;
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

/// Trait for turning texts into embedding vectors.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Length of every vector this embedder returns.
    fn dimension(&self) -> usize;

    /// Embed a batch of texts, returning vectors in the same order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>>;
}

/// Embed every text in fixed-size batches, showing a progress bar.
///
/// Returns exactly one vector per input text, in input order.
pub async fn embed_all(
    embedder: &dyn Embedder,
    texts: &[String],
    batch_size: usize,
) -> Result<Vec<Vec<f64>>> {
    let batch_size = batch_size.max(1);
    let mut embeddings = Vec::with_capacity(texts.len());

    let pb = ProgressBar::new(texts.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Embedding [{bar:30}] {pos}/{len} ({eta})")
            .expect("valid template"),
    );

    for chunk in texts.chunks(batch_size) {
        let batch = embedder.embed_batch(chunk).await?;
        if batch.len() != chunk.len() {
            anyhow::bail!(
                "Embedder returned {} vectors for {} texts",
                batch.len(),
                chunk.len()
            );
        }
        embeddings.extend(batch);
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    info!(
        texts = texts.len(),
        dim = embedder.dimension(),
        "Embedded ideas"
    );

    Ok(embeddings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Maps each text to [len, calls-so-far] so ordering is observable.
    struct CountingEmbedder {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Embedder for CountingEmbedder {
        fn dimension(&self) -> usize {
            2
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) as f64;
            Ok(texts.iter().map(|t| vec![t.len() as f64, call]).collect())
        }
    }

    #[tokio::test]
    async fn test_embed_all_batches_in_order() {
        let embedder = CountingEmbedder {
            calls: AtomicUsize::new(0),
        };
        let texts: Vec<String> = ["a", "bb", "ccc", "dddd", "eeeee"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let out = embed_all(&embedder, &texts, 2).await.unwrap();
        assert_eq!(out.len(), 5);
        assert_eq!(out[0], vec![1.0, 0.0]);
        assert_eq!(out[2], vec![3.0, 1.0]);
        assert_eq!(out[4], vec![5.0, 2.0]);
    }

    #[tokio::test]
    async fn test_embed_all_empty() {
        let embedder = CountingEmbedder {
            calls: AtomicUsize::new(0),
        };
        let out = embed_all(&embedder, &[], 8).await.unwrap();
        assert!(out.is_empty());
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
    }

    struct ShortEmbedder;

    #[async_trait]
    impl Embedder for ShortEmbedder {
        fn dimension(&self) -> usize {
            1
        }

        async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f64>>> {
            Ok(vec![vec![0.0]])
        }
    }

    #[tokio::test]
    async fn test_embed_all_rejects_short_batch() {
        let texts = vec!["a".to_string(), "b".to_string()];
        assert!(embed_all(&ShortEmbedder, &texts, 4).await.is_err());
    }
}
