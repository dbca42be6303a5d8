// Local sentence encoder: all-MiniLM-L6-v2 via ONNX Runtime.
//
// Reproduces the sentence-transformers pipeline for this model:
// BERT token states -> mean pooling over the attention mask -> L2 normalize.
// Sequences are truncated to 256 word pieces, the model's max_seq_length.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::debug;

use super::traits::Embedder;
use super::vector::l2_normalize;

/// Embedding dimension for all-MiniLM-L6-v2.
pub const EMBEDDING_DIM: usize = 384;

/// Longest token sequence fed to the model.
pub const MAX_SEQ_LEN: usize = 256;

/// Sentence embedder backed by a local ONNX model.
///
/// `Session::run` takes `&mut self`, hence the Mutex; the Arcs let inference
/// move into `spawn_blocking`.
pub struct SentenceEmbedder {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
}

impl SentenceEmbedder {
    /// Load the model and tokenizer from a directory containing
    /// `model.onnx` and `tokenizer.json`.
    pub fn load(model_dir: &Path) -> Result<Self> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        if !model_path.exists() {
            anyhow::bail!(
                "Embedding model not found: {}\nRun `ideaspace download-model` to download it.",
                model_path.display()
            );
        }
        if !tokenizer_path.exists() {
            anyhow::bail!(
                "Embedding tokenizer not found: {}\nRun `ideaspace download-model` to download it.",
                tokenizer_path.display()
            );
        }

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&model_path)
            .with_context(|| {
                format!(
                    "Failed to load embedding model from {}",
                    model_path.display()
                )
            })?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load embedding tokenizer: {}", e))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQ_LEN,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("Failed to configure truncation: {}", e))?;
        // Padding is done by hand below so the attention mask stays explicit.
        tokenizer.with_padding(None);

        debug!(
            "Loaded sentence embedding model from {}",
            model_dir.display()
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
        })
    }
}

#[async_trait]
impl Embedder for SentenceEmbedder {
    fn dimension(&self) -> usize {
        EMBEDDING_DIM
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let session = Arc::clone(&self.session);
        let tokenizer = Arc::clone(&self.tokenizer);
        let texts = texts.to_vec();

        tokio::task::spawn_blocking(move || embed_sync(&session, &tokenizer, &texts))
            .await
            .context("spawn_blocking panicked")?
    }
}

/// Tokenize, run inference, mean-pool, and normalize one batch.
fn embed_sync(
    session: &Arc<Mutex<Session>>,
    tokenizer: &Arc<Tokenizer>,
    texts: &[String],
) -> Result<Vec<Vec<f64>>> {
    let encodings: Vec<_> = texts
        .iter()
        .map(|t| {
            tokenizer
                .encode(t.as_str(), true)
                .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))
        })
        .collect::<Result<Vec<_>>>()?;

    let batch_size = encodings.len();
    let max_len = encodings
        .iter()
        .map(|e| e.get_ids().len())
        .max()
        .unwrap_or(0);

    if max_len == 0 {
        return Ok(vec![vec![0.0; EMBEDDING_DIM]; batch_size]);
    }

    // BERT inputs, right-padded with id 0 and mask 0.
    let mut input_ids_flat: Vec<i64> = Vec::with_capacity(batch_size * max_len);
    let mut attention_mask_flat: Vec<i64> = Vec::with_capacity(batch_size * max_len);
    let mut token_type_ids_flat: Vec<i64> = Vec::with_capacity(batch_size * max_len);

    for enc in &encodings {
        let ids = enc.get_ids();
        let mask = enc.get_attention_mask();
        let pad_len = max_len - ids.len();

        input_ids_flat.extend(ids.iter().map(|&id| id as i64));
        input_ids_flat.extend(std::iter::repeat_n(0i64, pad_len));
        attention_mask_flat.extend(mask.iter().map(|&m| m as i64));
        attention_mask_flat.extend(std::iter::repeat_n(0i64, pad_len));
        token_type_ids_flat.extend(std::iter::repeat_n(0i64, max_len));
    }

    let shape = [batch_size as i64, max_len as i64];

    let input_ids_tensor =
        Tensor::from_array((shape, input_ids_flat)).context("Failed to create input_ids tensor")?;
    let attention_mask_tensor = Tensor::from_array((shape, attention_mask_flat.clone()))
        .context("Failed to create attention_mask tensor")?;
    let token_type_ids_tensor = Tensor::from_array((shape, token_type_ids_flat))
        .context("Failed to create token_type_ids tensor")?;

    // last_hidden_state: [batch, seq_len, 384]
    let hidden_states = {
        let mut session = session
            .lock()
            .map_err(|e| anyhow::anyhow!("Session lock poisoned: {}", e))?;

        let outputs = session
            .run(ort::inputs! {
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor,
                "token_type_ids" => token_type_ids_tensor
            })
            .context("Embedding ONNX inference failed")?;

        let (_shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .context("Failed to extract embedding output tensor")?;

        data.to_vec()
    };

    let expected = batch_size * max_len * EMBEDDING_DIM;
    if hidden_states.len() != expected {
        anyhow::bail!(
            "Unexpected embedding output size {} (expected {} for batch {} x {} tokens)",
            hidden_states.len(),
            expected,
            batch_size,
            max_len
        );
    }

    let embeddings: Vec<Vec<f64>> = (0..batch_size)
        .map(|i| {
            let mut pooled = mean_pool(
                &hidden_states[i * max_len * EMBEDDING_DIM..(i + 1) * max_len * EMBEDDING_DIM],
                &attention_mask_flat[i * max_len..(i + 1) * max_len],
                EMBEDDING_DIM,
            );
            l2_normalize(&mut pooled);
            pooled
        })
        .collect();

    debug!(
        batch_size = batch_size,
        dim = EMBEDDING_DIM,
        "Computed sentence embeddings"
    );

    Ok(embeddings)
}

/// Average token states of one sequence, weighted by its attention mask.
///
/// `states` is `[seq_len * dim]`, `mask` is `[seq_len]`.
fn mean_pool(states: &[f32], mask: &[i64], dim: usize) -> Vec<f64> {
    let mut sum = vec![0.0_f64; dim];
    let mut mask_sum = 0.0_f64;

    for (j, &m) in mask.iter().enumerate() {
        if m > 0 {
            let weight = m as f64;
            mask_sum += weight;
            for (acc, &val) in sum.iter_mut().zip(&states[j * dim..(j + 1) * dim]) {
                *acc += val as f64 * weight;
            }
        }
    }

    if mask_sum > 0.0 {
        for val in &mut sum {
            *val /= mask_sum;
        }
    }

    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_pool_ignores_padding() {
        // Two real tokens then one pad token with large values.
        let states = [1.0_f32, 2.0, 3.0, 4.0, 100.0, 100.0];
        let mask = [1_i64, 1, 0];
        let pooled = mean_pool(&states, &mask, 2);
        assert_eq!(pooled, vec![2.0, 3.0]);
    }

    #[test]
    fn test_mean_pool_all_masked() {
        let states = [5.0_f32, 5.0];
        let pooled = mean_pool(&states, &[0], 2);
        assert_eq!(pooled, vec![0.0, 0.0]);
    }

    #[test]
    fn test_load_missing_model_mentions_download() {
        let dir = std::env::temp_dir().join("ideaspace-test-no-model");
        let err = SentenceEmbedder::load(&dir).err().unwrap().to_string();
        assert!(err.contains("download-model"), "got: {err}");
    }
}
