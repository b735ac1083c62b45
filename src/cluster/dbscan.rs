//! Density clustering (DBSCAN) over raw embedding vectors.
//!
//! Unlike the matrix-driven strategies, density clustering works in
//! **Euclidean** space on the vectors themselves. Cosine similarity and
//! Euclidean distance are different geometries; an epsilon tuned for one is
//! meaningless for the other, so this clusterer deliberately takes the raw
//! batch instead of a [`crate::similarity::SimilarityMatrix`].
//!
//! An entity is a *core point* when its ε-neighborhood, itself included,
//! holds at least `min_points` entities. Clusters grow by reachability:
//! from an unvisited core point, everything within ε joins its cluster, and
//! any absorbed point that is itself core contributes its own neighborhood.
//! Points reachable from no core point are labeled [`NOISE`] rather than
//! dropped, so the output still covers every input index.
//!
//! Visitation follows index order 0..N-1, making results deterministic for
//! a fixed input order. Time is O(N²) with the naive neighborhood scan.

use std::collections::VecDeque;

use super::util::squared_euclidean;
use crate::error::{Error, Result};

/// Reserved label for points density-reachable from no core point.
///
/// Noise is a distinguished class, never a numbered cluster.
pub const NOISE: usize = usize::MAX;

// Internal label states. UNCLASSIFIED points were never reached;
// NOISE_LABEL points were reached but not absorbed (yet).
const UNCLASSIFIED: i64 = -2;
const NOISE_LABEL: i64 = -1;

/// DBSCAN density clusterer.
#[derive(Debug, Clone)]
pub struct Dbscan {
    epsilon: f32,
    min_points: usize,
}

impl Dbscan {
    /// Create a clusterer with neighborhood radius `epsilon` and core-point
    /// threshold `min_points`.
    ///
    /// `epsilon` must be positive; `min_points` must be at least 1 and
    /// counts the point itself.
    pub fn new(epsilon: f32, min_points: usize) -> Self {
        Self {
            epsilon,
            min_points,
        }
    }

    /// Set the neighborhood radius.
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the core-point threshold.
    pub fn with_min_points(mut self, min_points: usize) -> Self {
        self.min_points = min_points;
        self
    }

    /// Check the parameters without running.
    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "epsilon",
                message: "must be positive and finite",
            });
        }
        if self.min_points == 0 {
            return Err(Error::InvalidParameter {
                name: "min_points",
                message: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Indices within epsilon of `idx`, the point itself included.
    ///
    /// Comparing squared distances avoids a square root per pair.
    fn neighborhood(&self, data: &[Vec<f32>], idx: usize) -> Vec<usize> {
        let eps_sq = self.epsilon * self.epsilon;
        let point = &data[idx];
        (0..data.len())
            .filter(|&j| squared_euclidean(point, &data[j]) <= eps_sq)
            .collect()
    }

    /// Partition the batch, labeling unreachable points [`NOISE`].
    ///
    /// Cluster labels are contiguous from 0 in discovery order. An empty
    /// batch yields an empty labeling, not an error.
    pub fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>> {
        self.validate()?;

        let n = data.len();
        if n == 0 {
            return Ok(Vec::new());
        }

        let dim = data[0].len();
        if dim == 0 {
            return Err(Error::InvalidParameter {
                name: "dimension",
                message: "must be at least 1",
            });
        }
        for point in data.iter().skip(1) {
            if point.len() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    found: point.len(),
                });
            }
        }

        let mut labels = vec![UNCLASSIFIED; n];
        let mut visited = vec![false; n];
        let mut cluster: i64 = 0;

        for idx in 0..n {
            if visited[idx] {
                continue;
            }
            visited[idx] = true;

            let hood = self.neighborhood(data, idx);
            if hood.len() < self.min_points {
                labels[idx] = NOISE_LABEL;
                continue;
            }

            // New cluster seeded from a core point; expand iteratively.
            labels[idx] = cluster;
            let mut queue: VecDeque<usize> = hood.into_iter().filter(|&j| j != idx).collect();

            while let Some(j) = queue.pop_front() {
                // A point first marked noise can still join as a border
                // point, so assign the label before the visited check.
                if labels[j] == UNCLASSIFIED || labels[j] == NOISE_LABEL {
                    labels[j] = cluster;
                }
                if visited[j] {
                    continue;
                }
                visited[j] = true;

                let hood_j = self.neighborhood(data, j);
                if hood_j.len() >= self.min_points {
                    for k in hood_j {
                        if !visited[k] {
                            queue.push_back(k);
                        }
                    }
                }
            }

            cluster += 1;
        }

        Ok(labels
            .into_iter()
            .map(|l| if l >= 0 { l as usize } else { NOISE })
            .collect())
    }
}

impl Default for Dbscan {
    fn default() -> Self {
        Self::new(0.5, 5)
    }
}
