//! Entity-mention resolution by embedding clustering.
//!
//! `conflate` decides which duplicate entity mentions (author-name strings
//! from tabular records, say) refer to the same real-world entity. Given
//! one embedding vector per mention, it computes the pairwise
//! cosine-similarity matrix and groups mentions with one of three
//! strategies, selected by configuration:
//!
//! - greedy threshold grouping (fast, overlap-tolerant neighbor groups)
//! - average-linkage agglomerative clustering (true partition)
//! - DBSCAN density clustering (partition plus a noise class)
//!
//! The crate is the clustering core only. Computing the embeddings,
//! parsing tabular files, and formatting reports belong to the caller; the
//! [`source`] module pins down the contracts those collaborators must meet.
//!
//! ```rust
//! use conflate::{Resolver, Strategy};
//!
//! let mentions = vec![
//!     ("J. R. R. Tolkien".to_string(), vec![1.0, 0.0]),
//!     ("Tolkien, J.R.R.".to_string(), vec![0.995, 0.0999]),
//!     ("Ursula K. Le Guin".to_string(), vec![0.0, 1.0]),
//!     ("Le Guin, Ursula".to_string(), vec![0.0, 0.995]),
//! ];
//!
//! let resolver = Resolver::new(Strategy::Agglomerative { distance_cutoff: 0.3 });
//! let resolution = resolver.resolve(mentions).unwrap();
//!
//! let partition = resolution.partition().unwrap();
//! assert_eq!(partition.num_clusters(), 2);
//! ```

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod resolver;
pub mod similarity;
pub mod source;

pub use cluster::{
    map_groups, map_partition, Agglomerative, Dbscan, GreedyThreshold, Partition, NOISE,
};
pub use error::{Error, Result};
pub use resolver::{Resolution, Resolver, Strategy};
pub use similarity::SimilarityMatrix;
pub use source::{encode_batch, filter_blank, EmbeddingSource};
