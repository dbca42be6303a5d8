// Vector math over sentence embeddings.
//
// Unlike a retrieval score, the analyses here need the full signed cosine:
// two ideas pointing in opposite directions are maximally distinct, and the
// distance scale (0.0 to 2.0) must match scipy's `cosine`.

/// Cosine similarity between two vectors, in [-1.0, 1.0].
///
/// Returns 0.0 for empty, mismatched, or zero-magnitude inputs.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    let denom = mag_a * mag_b;
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0)
    }
}

/// Cosine distance, `1 - cosine_similarity`, in [0.0, 2.0].
pub fn cosine_distance(a: &[f64], b: &[f64]) -> f64 {
    1.0 - cosine_similarity(a, b)
}

/// Mean of a set of vectors (the group centroid).
///
/// Returns `None` for an empty set. Vectors are assumed to share the first
/// vector's dimension; extra trailing elements are ignored.
pub fn mean_embedding(vectors: &[&[f64]]) -> Option<Vec<f64>> {
    let first = vectors.first()?;
    let mut mean = vec![0.0_f64; first.len()];

    for v in vectors {
        for (acc, &val) in mean.iter_mut().zip(v.iter()) {
            *acc += val;
        }
    }

    let n = vectors.len() as f64;
    for val in &mut mean {
        *val /= n;
    }

    Some(mean)
}

/// Scale a vector to unit length in place. Zero vectors are left unchanged.
pub fn l2_normalize(v: &mut [f64]) {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > f64::EPSILON {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Element-wise `acc += v`.
pub(crate) fn add_assign(acc: &mut [f64], v: &[f64]) {
    for (a, &x) in acc.iter_mut().zip(v.iter()) {
        *a += x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical() {
        let a = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_opposite_is_negative() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-12);
        assert!((cosine_distance(&a, &b) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_cosine_mismatched_dimensions() {
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_mean_embedding() {
        let a = [1.0, 0.0, 2.0];
        let b = [0.0, 1.0, 4.0];
        let mean = mean_embedding(&[&a, &b]).unwrap();
        assert_eq!(mean, vec![0.5, 0.5, 3.0]);
    }

    #[test]
    fn test_mean_embedding_empty() {
        assert!(mean_embedding(&[]).is_none());
    }

    #[test]
    fn test_l2_normalize() {
        let mut v = vec![3.0, 4.0];
        l2_normalize(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-12);
        assert!((v[1] - 0.8).abs() < 1e-12);

        let mut zero = vec![0.0, 0.0];
        l2_normalize(&mut zero);
        assert_eq!(zero, vec![0.0, 0.0]);
    }
}
