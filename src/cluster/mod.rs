//! Grouping strategies for entity-mention resolution.
//!
//! Three strategies turn similarity relationships into entity groups, each
//! with a different contract:
//!
//! ## Greedy threshold grouping
//!
//! One neighbor group per anchor entity, straight off the similarity
//! matrix. Fast and deliberately loose: groups may overlap, so the output
//! is **not** a partition. Good for surfacing candidate duplicates for
//! human review.
//!
//! ## Agglomerative clustering
//!
//! Average-linkage hierarchical merging over cosine distance, cut off at a
//! distance threshold. Produces a true partition: every mention lands in
//! exactly one cluster. The usual choice when downstream code needs a
//! canonical entity per mention.
//!
//! ## Density clustering (DBSCAN)
//!
//! Density reachability in Euclidean space over the raw vectors. Also a
//! partition, plus a reserved noise class for mentions that sit in no dense
//! region. Useful when stray or garbage mentions should be quarantined
//! instead of forced into a cluster.
//!
//! ## Usage
//!
//! ```rust
//! use conflate::cluster::{Dbscan, GreedyThreshold, NOISE};
//! use conflate::similarity::SimilarityMatrix;
//!
//! let vectors = vec![
//!     vec![1.0, 0.0],
//!     vec![0.99, 0.1],
//!     vec![0.0, 1.0],
//! ];
//!
//! let matrix = SimilarityMatrix::build(&vectors).unwrap();
//! let groups = GreedyThreshold::new(0.8).group(&matrix).unwrap();
//! assert_eq!(groups, vec![vec![0, 1], vec![2]]);
//!
//! let labels = Dbscan::new(0.5, 2).fit_predict(&vectors).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_eq!(labels[2], NOISE);
//! ```

mod agglomerative;
mod dbscan;
mod greedy;
mod labels;
mod util;

pub use agglomerative::Agglomerative;
pub use dbscan::{Dbscan, NOISE};
pub use greedy::GreedyThreshold;
pub use labels::{map_groups, map_partition, Partition};
