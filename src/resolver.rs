//! Strategy selection and the single-call resolution engine.
//!
//! [`Resolver`] is the front door: configure it with a [`Strategy`], hand
//! it an ordered batch of `(entity id, vector)` pairs, get back a
//! [`Resolution`] with the ids grouped. One invocation is a pure,
//! synchronous batch computation; there is no state between calls and no
//! partial result on error. All parameter and batch validation happens
//! before any clustering work begins.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cluster::{
    map_groups, map_partition, Agglomerative, Dbscan, GreedyThreshold, Partition,
};
use crate::error::Result;
use crate::similarity::SimilarityMatrix;

/// Which grouping strategy the engine runs, with its parameters.
///
/// Serializable so strategy selection can live in configuration instead of
/// code. The tagged form reads like
/// `{"strategy": "greedy_threshold", "threshold": 0.83}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Strategy {
    /// Overlap-tolerant neighbor groups above a similarity threshold in
    /// `(-1, 1]`.
    GreedyThreshold {
        /// Similarity cutoff; neighbors must be strictly above it.
        threshold: f32,
    },
    /// Average-linkage agglomerative partition with a cosine-distance
    /// cutoff ≥ 0.
    Agglomerative {
        /// Merging stops once the smallest merge distance exceeds this.
        distance_cutoff: f32,
    },
    /// Euclidean density partition with a noise class.
    Density {
        /// Neighborhood radius, > 0.
        epsilon: f32,
        /// Neighborhood size (point included) for a core point, ≥ 1.
        min_points: usize,
    },
}

/// Output of one resolution call.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<I> {
    /// Possibly-overlapping neighbor groups (greedy strategy).
    Groups(Vec<Vec<I>>),
    /// True partition, with a noise class for the density strategy.
    Partition(Partition<I>),
}

impl<I> Resolution<I> {
    /// The groups, when the greedy strategy ran.
    pub fn groups(&self) -> Option<&[Vec<I>]> {
        match self {
            Resolution::Groups(groups) => Some(groups),
            Resolution::Partition(_) => None,
        }
    }

    /// The partition, when a partitioning strategy ran.
    pub fn partition(&self) -> Option<&Partition<I>> {
        match self {
            Resolution::Groups(_) => None,
            Resolution::Partition(partition) => Some(partition),
        }
    }
}

/// The resolution engine.
#[derive(Debug, Clone)]
pub struct Resolver {
    strategy: Strategy,
}

impl Resolver {
    /// Create an engine running the given strategy.
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    /// The configured strategy.
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Resolve one ordered batch of `(entity id, vector)` pairs.
    ///
    /// Entity ids are opaque: never interpreted, only carried through to
    /// the result. An empty batch yields an empty result without error;
    /// invalid parameters and dimension mismatches fail before any
    /// clustering work.
    pub fn resolve<I: Clone>(&self, mentions: Vec<(I, Vec<f32>)>) -> Result<Resolution<I>> {
        let (ids, vectors): (Vec<I>, Vec<Vec<f32>>) = mentions.into_iter().unzip();

        match self.strategy {
            Strategy::GreedyThreshold { threshold } => {
                let grouper = GreedyThreshold::new(threshold);
                grouper.validate()?;
                let matrix = SimilarityMatrix::build(&vectors)?;
                debug!(mentions = ids.len(), "similarity matrix built");
                let groups = grouper.group(&matrix)?;
                debug!(groups = groups.len(), "greedy threshold groups formed");
                Ok(Resolution::Groups(map_groups(&ids, &groups)))
            }
            Strategy::Agglomerative { distance_cutoff } => {
                let clusterer = Agglomerative::new(distance_cutoff);
                clusterer.validate()?;
                let matrix = SimilarityMatrix::build(&vectors)?;
                debug!(mentions = ids.len(), "similarity matrix built");
                let labels = clusterer.fit_predict(&matrix)?;
                let partition = map_partition(&ids, &labels);
                debug!(
                    clusters = partition.num_clusters(),
                    "agglomerative partition formed"
                );
                Ok(Resolution::Partition(partition))
            }
            Strategy::Density { epsilon, min_points } => {
                let clusterer = Dbscan::new(epsilon, min_points);
                clusterer.validate()?;
                let labels = clusterer.fit_predict(&vectors)?;
                let partition = map_partition(&ids, &labels);
                debug!(
                    clusters = partition.num_clusters(),
                    noise = partition.noise().len(),
                    "density partition formed"
                );
                Ok(Resolution::Partition(partition))
            }
        }
    }
}
