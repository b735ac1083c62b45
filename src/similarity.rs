//! Pairwise cosine-similarity matrix for a batch of embedding vectors.
//!
//! Cosine similarity measures directional closeness of two vectors and lies
//! in `[-1, 1]`. Mentions of the same entity tend to get embeddings pointing
//! the same way, so a high cosine similarity is the raw signal every
//! matrix-driven strategy in [`crate::cluster`] works from.
//!
//! The matrix is built once per resolution call and is immutable afterwards.
//! The N² pair computations are independent, so rows are filled in parallel;
//! each worker owns a disjoint output row and no locking is needed.
//!
//! Memory is the dominant cost: O(N²) cells regardless of vector dimension.
//! Batches in the low thousands are fine; callers with much larger inputs
//! should split them before invoking the engine.

use rayon::prelude::*;

use crate::error::{Error, Result};

/// Symmetric N×N cosine-similarity matrix with a unit diagonal.
///
/// Stored row-major in a flat buffer. Entries are clamped to `[-1, 1]` so
/// accumulated floating-point error can never leak out of the documented
/// range.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f32>,
}

impl SimilarityMatrix {
    /// Build the matrix for an ordered batch of vectors.
    ///
    /// All vectors must share one dimension D ≥ 1; a mismatch fails before
    /// any similarity is computed. An empty batch yields an empty matrix.
    ///
    /// A zero-magnitude vector has no direction, so its similarity to any
    /// other vector is defined as 0 (and 1 to itself) instead of dividing
    /// by zero.
    pub fn build(vectors: &[Vec<f32>]) -> Result<Self> {
        let n = vectors.len();
        if n == 0 {
            return Ok(Self {
                n: 0,
                data: Vec::new(),
            });
        }

        let dim = vectors[0].len();
        if dim == 0 {
            return Err(Error::InvalidParameter {
                name: "dimension",
                message: "must be at least 1",
            });
        }
        for vector in vectors.iter().skip(1) {
            if vector.len() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    found: vector.len(),
                });
            }
        }

        let norms: Vec<f64> = vectors
            .par_iter()
            .map(|v| {
                v.iter()
                    .map(|&x| f64::from(x) * f64::from(x))
                    .sum::<f64>()
                    .sqrt()
            })
            .collect();

        let mut data = vec![0.0f32; n * n];
        data.par_chunks_mut(n).enumerate().for_each(|(i, row)| {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = if i == j {
                    1.0
                } else if norms[i] == 0.0 || norms[j] == 0.0 {
                    0.0
                } else {
                    let dot: f64 = vectors[i]
                        .iter()
                        .zip(vectors[j].iter())
                        .map(|(&a, &b)| f64::from(a) * f64::from(b))
                        .sum();
                    (dot / (norms[i] * norms[j])).clamp(-1.0, 1.0) as f32
                };
            }
        });

        Ok(Self { n, data })
    }

    /// Number of vectors the matrix was built from.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether the matrix was built from an empty batch.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Similarity between vectors `i` and `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.data[i * self.n + j]
    }

    /// Cosine distance `1 - similarity` between vectors `i` and `j`.
    ///
    /// Similarity 1 maps to distance 0; similarity -1 maps to distance 2.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f32 {
        1.0 - self.get(i, j)
    }
}
