//! Average-linkage agglomerative clustering with a distance cutoff.
//!
//! # Algorithm
//!
//! Works on cosine *distance*, `1 - similarity`, so similarity 1 means
//! distance 0 and similarity -1 means distance 2. Feeding raw similarities
//! into a merge loop that expects distances inverts its behavior, which is
//! why the conversion lives in [`SimilarityMatrix::distance`] and is applied
//! up front.
//!
//! 1. Start with every entity in its own singleton cluster.
//! 2. Find the pair of clusters with the smallest average pairwise distance
//!    (mean over all cross-pairs of members).
//! 3. If that distance exceeds the cutoff, stop. Otherwise merge the pair
//!    and update distances to the merged cluster with the Lance-Williams
//!    average-linkage formula:
//!    `d(a∪b, k) = (|a|·d(a,k) + |b|·d(b,k)) / (|a| + |b|)`.
//! 4. Repeat until the cutoff stops a merge or one cluster remains.
//!
//! Ties on the minimum distance go to the lowest cluster-index pair, so the
//! merge sequence, and with it the output labeling, is fully deterministic.
//! The merge sequence does not depend on the cutoff, only on where it is cut
//! short; partitions at growing cutoffs are therefore nested, and raising
//! the cutoff can only merge clusters, never split them.
//!
//! # Complexity
//!
//! O(N²) memory for the working matrix and O(N³) time worst case for the
//! repeated minimum scans. Fine for batch sizes in the low thousands; this
//! is not a millions-of-points algorithm.

use std::collections::HashMap;

use super::util::UnionFind;
use crate::error::{Error, Result};
use crate::similarity::SimilarityMatrix;

/// Average-linkage agglomerative clusterer.
#[derive(Debug, Clone)]
pub struct Agglomerative {
    distance_cutoff: f32,
}

impl Agglomerative {
    /// Create a clusterer that stops merging above `distance_cutoff`.
    ///
    /// The cutoff is a cosine distance and must be non-negative. A cutoff of
    /// 0 merges only clusters at distance exactly 0 (identical directions);
    /// a cutoff of 2 merges everything.
    pub fn new(distance_cutoff: f32) -> Self {
        Self { distance_cutoff }
    }

    /// Set the distance cutoff.
    pub fn with_distance_cutoff(mut self, distance_cutoff: f32) -> Self {
        self.distance_cutoff = distance_cutoff;
        self
    }

    /// Check the cutoff without running.
    pub fn validate(&self) -> Result<()> {
        if !self.distance_cutoff.is_finite() || self.distance_cutoff < 0.0 {
            return Err(Error::InvalidParameter {
                name: "distance_cutoff",
                message: "must be non-negative and finite",
            });
        }
        Ok(())
    }

    /// Partition the entities behind a similarity matrix.
    ///
    /// Returns one label per entity. Labels are contiguous from 0 and
    /// assigned in order of each cluster's first member index, so repeated
    /// runs over the same matrix produce identical output.
    pub fn fit_predict(&self, matrix: &SimilarityMatrix) -> Result<Vec<usize>> {
        self.validate()?;

        let n = matrix.len();
        if n == 0 {
            return Ok(Vec::new());
        }
        if n == 1 {
            return Ok(vec![0]);
        }

        // Working distance matrix over 2n-1 cluster slots: slots 0..n are
        // the original singletons, slots n.. are merge products.
        let total = 2 * n - 1;
        let mut dist = vec![f32::INFINITY; total * total];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = matrix.distance(i, j);
                dist[i * total + j] = d;
                dist[j * total + i] = d;
            }
        }

        let mut active = vec![false; total];
        for slot in active.iter_mut().take(n) {
            *slot = true;
        }
        let mut size = vec![1usize; total];
        // One representative point per slot, for membership tracking.
        let mut rep = vec![usize::MAX; total];
        for (i, r) in rep.iter_mut().enumerate().take(n) {
            *r = i;
        }

        let mut uf = UnionFind::new(n);
        let mut next = n;

        for _ in 0..(n - 1) {
            // Global minimum over active pairs. The ascending scan with a
            // strict comparison keeps ties on the lowest (i, j) pair.
            let mut min_dist = f32::INFINITY;
            let mut min_i = usize::MAX;
            let mut min_j = usize::MAX;
            for i in 0..next {
                if !active[i] {
                    continue;
                }
                for j in (i + 1)..next {
                    if !active[j] {
                        continue;
                    }
                    let d = dist[i * total + j];
                    if d < min_dist {
                        min_dist = d;
                        min_i = i;
                        min_j = j;
                    }
                }
            }

            if min_dist > self.distance_cutoff {
                break;
            }

            let (a, b) = (min_i, min_j);
            let (n_a, n_b) = (size[a] as f32, size[b] as f32);

            for k in 0..next {
                if !active[k] || k == a || k == b {
                    continue;
                }
                let d_ak = dist[a * total + k];
                let d_bk = dist[b * total + k];
                let d = (n_a * d_ak + n_b * d_bk) / (n_a + n_b);
                dist[next * total + k] = d;
                dist[k * total + next] = d;
            }

            active[a] = false;
            active[b] = false;
            active[next] = true;
            size[next] = size[a] + size[b];
            rep[next] = uf.union(rep[a], rep[b]);
            next += 1;
        }

        // Labels in first-appearance order of each surviving cluster.
        let mut labels = vec![0usize; n];
        let mut label_of_root: HashMap<usize, usize> = HashMap::new();
        for (i, label) in labels.iter_mut().enumerate() {
            let root = uf.find(i);
            let fresh = label_of_root.len();
            *label = *label_of_root.entry(root).or_insert(fresh);
        }

        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(vectors: &[Vec<f32>]) -> SimilarityMatrix {
        SimilarityMatrix::build(vectors).unwrap()
    }

    #[test]
    fn two_pairs_split_at_moderate_cutoff() {
        // A~B and C~D are near-parallel pairs; the pairs are orthogonal.
        let vectors = vec![
            vec![1.0, 0.0],
            vec![0.995, 0.0999],
            vec![0.0, 1.0],
            vec![0.0, 0.995],
        ];
        let labels = Agglomerative::new(0.3)
            .fit_predict(&matrix(&vectors))
            .unwrap();
        assert_eq!(labels, vec![0, 0, 1, 1]);
    }

    #[test]
    fn identical_vectors_merge_at_cutoff_zero() {
        let vectors = vec![vec![1.0, 0.0, 0.0], vec![1.0, 0.0, 0.0]];
        let labels = Agglomerative::new(0.0)
            .fit_predict(&matrix(&vectors))
            .unwrap();
        assert_eq!(labels, vec![0, 0]);
    }

    #[test]
    fn large_cutoff_collapses_everything() {
        let vectors = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![-1.0, 0.0]];
        let labels = Agglomerative::new(2.0)
            .fit_predict(&matrix(&vectors))
            .unwrap();
        assert_eq!(labels, vec![0, 0, 0]);
    }

    #[test]
    fn tiny_cutoff_keeps_singletons() {
        let vectors = vec![vec![1.0, 0.0], vec![0.9, 0.4], vec![0.0, 1.0]];
        let labels = Agglomerative::new(1e-6)
            .fit_predict(&matrix(&vectors))
            .unwrap();
        assert_eq!(labels, vec![0, 1, 2]);
    }

    #[test]
    fn raising_the_cutoff_never_splits_clusters() {
        let vectors = vec![
            vec![1.0, 0.0],
            vec![0.98, 0.2],
            vec![0.0, 1.0],
            vec![0.2, 0.98],
            vec![-1.0, 0.1],
        ];
        let m = matrix(&vectors);

        let cutoffs = [0.0, 0.05, 0.3, 0.8, 2.0];
        let mut previous: Option<Vec<usize>> = None;
        for &cutoff in &cutoffs {
            let labels = Agglomerative::new(cutoff).fit_predict(&m).unwrap();
            if let Some(prev) = &previous {
                // Nested partitions: same label before implies same label now.
                for i in 0..labels.len() {
                    for j in (i + 1)..labels.len() {
                        if prev[i] == prev[j] {
                            assert_eq!(
                                labels[i], labels[j],
                                "cutoff {cutoff} split a cluster from a smaller cutoff"
                            );
                        }
                    }
                }
            }
            previous = Some(labels);
        }
    }

    #[test]
    fn tied_merges_are_deterministic() {
        // Four identical vectors: every merge distance ties at zero.
        let vectors = vec![vec![1.0, 1.0]; 4];
        let m = matrix(&vectors);
        let first = Agglomerative::new(0.5).fit_predict(&m).unwrap();
        let second = Agglomerative::new(0.5).fit_predict(&m).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, vec![0, 0, 0, 0]);
    }

    #[test]
    fn empty_batch_yields_empty_labels() {
        let labels = Agglomerative::new(0.3)
            .fit_predict(&matrix(&Vec::new()))
            .unwrap();
        assert!(labels.is_empty());
    }

    #[test]
    fn single_entity_is_its_own_cluster() {
        let labels = Agglomerative::new(0.3)
            .fit_predict(&matrix(&[vec![3.0, 4.0]]))
            .unwrap();
        assert_eq!(labels, vec![0]);
    }

    #[test]
    fn invalid_cutoffs_are_rejected() {
        let m = matrix(&[vec![1.0, 0.0]]);
        assert!(Agglomerative::new(-0.1).fit_predict(&m).is_err());
        assert!(Agglomerative::new(f32::NAN).fit_predict(&m).is_err());
        assert!(Agglomerative::new(f32::INFINITY).fit_predict(&m).is_err());
    }

    #[test]
    fn labels_are_contiguous_from_zero() {
        let vectors = vec![
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![0.99, 0.05],
            vec![-1.0, 0.0],
        ];
        let labels = Agglomerative::new(0.1)
            .fit_predict(&matrix(&vectors))
            .unwrap();
        // 0 and 2 merge; 1 and 3 stay alone. First-appearance labeling.
        assert_eq!(labels, vec![0, 1, 0, 2]);
    }
}
