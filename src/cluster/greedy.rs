//! Threshold-based neighbor grouping over a similarity matrix.
//!
//! The fastest and loosest of the three strategies: each entity anchors one
//! group holding itself plus every entity whose similarity to it exceeds a
//! cutoff. Identical groups are collapsed, but overlapping groups are kept
//! as-is, so the output is generally **not** a partition. Two entities can
//! share one group and be apart in another whenever their neighbor sets
//! differ.
//!
//! That overlap tolerance is intentional and useful for review workflows
//! (show a human every plausible neighborhood). Callers that need each
//! mention in exactly one cluster should use [`super::Agglomerative`] or
//! [`super::Dbscan`] instead.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::similarity::SimilarityMatrix;

/// Greedy similarity-threshold grouper.
#[derive(Debug, Clone)]
pub struct GreedyThreshold {
    threshold: f32,
}

impl GreedyThreshold {
    /// Create a grouper with the given similarity threshold.
    ///
    /// The threshold must lie in `(-1, 1]`. Entities join an anchor's group
    /// when their similarity to the anchor is strictly greater than the
    /// threshold.
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Set the similarity threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Check the threshold without running.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold <= -1.0 || self.threshold > 1.0 {
            return Err(Error::InvalidParameter {
                name: "threshold",
                message: "must lie in (-1, 1]",
            });
        }
        Ok(())
    }

    /// Collect one neighbor group per anchor entity, deduplicated.
    ///
    /// Anchors are processed in index order 0..N-1 and each group lists its
    /// member indices ascending, so output is deterministic for a fixed
    /// input order. Only *identical* groups are dropped; overlapping but
    /// distinct groups all survive.
    pub fn group(&self, matrix: &SimilarityMatrix) -> Result<Vec<Vec<usize>>> {
        self.validate()?;

        let n = matrix.len();
        let mut seen: HashSet<Vec<usize>> = HashSet::new();
        let mut groups = Vec::new();

        for anchor in 0..n {
            // Ascending scan keeps members sorted; the anchor slots itself in.
            let members: Vec<usize> = (0..n)
                .filter(|&j| j == anchor || matrix.get(anchor, j) > self.threshold)
                .collect();

            if seen.insert(members.clone()) {
                groups.push(members);
            }
        }

        Ok(groups)
    }
}

impl Default for GreedyThreshold {
    fn default() -> Self {
        Self::new(0.83)
    }
}
