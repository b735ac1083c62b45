//! Contracts for the external collaborators that feed the engine.
//!
//! Embedding computation and tabular parsing live outside this crate. The
//! engine's precondition is a complete, dimension-uniform vector batch;
//! these helpers pin down what a conforming supplier looks like and catch
//! contract violations at the boundary instead of deep inside a strategy.

use crate::error::{Error, Result};

/// The external embedding service.
///
/// One model, one fixed output dimension. Implementations wrap whatever
/// actually produces vectors (a local model, a network service); batching,
/// retries, and latency are their concern, not the engine's. The trait is
/// synchronous because the engine is a batch computation: callers resolve
/// all vectors first, then invoke the engine once.
pub trait EmbeddingSource {
    /// Embed one mention string.
    fn encode(&self, text: &str) -> Result<Vec<f32>>;

    /// Output dimension, fixed per model.
    fn dimension(&self) -> usize;
}

/// Encode a mention batch, enforcing the source's dimension contract.
///
/// Every returned vector must match [`EmbeddingSource::dimension`]; the
/// first violation aborts the batch with a [`Error::DimensionMismatch`].
/// Output order follows input order.
pub fn encode_batch<S>(source: &S, mentions: &[String]) -> Result<Vec<Vec<f32>>>
where
    S: EmbeddingSource + ?Sized,
{
    let dim = source.dimension();
    let mut vectors = Vec::with_capacity(mentions.len());
    for mention in mentions {
        let vector = source.encode(mention)?;
        if vector.len() != dim {
            return Err(Error::DimensionMismatch {
                expected: dim,
                found: vector.len(),
            });
        }
        vectors.push(vector);
    }
    Ok(vectors)
}

/// Drop blank mention strings before they reach the engine.
///
/// Tabular sources routinely carry missing fields; the engine never
/// receives empty or whitespace-only mentions.
pub fn filter_blank<T>(mentions: T) -> Vec<String>
where
    T: IntoIterator<Item = String>,
{
    mentions
        .into_iter()
        .filter(|m| !m.trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic toy source: a fixed-dimension vector per byte sum.
    struct StubSource {
        dimension: usize,
    }

    impl EmbeddingSource for StubSource {
        fn encode(&self, text: &str) -> Result<Vec<f32>> {
            if text == "boom" {
                return Err(Error::Source("model unavailable".to_string()));
            }
            let seed = text.bytes().map(f32::from).sum::<f32>();
            Ok((0..self.dimension)
                .map(|i| seed + i as f32)
                .collect())
        }

        fn dimension(&self) -> usize {
            self.dimension
        }
    }

    /// Misbehaving source whose vectors disagree with its declared dimension.
    struct ShortSource;

    impl EmbeddingSource for ShortSource {
        fn encode(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0])
        }

        fn dimension(&self) -> usize {
            4
        }
    }

    #[test]
    fn encode_batch_preserves_order_and_dimension() {
        let source = StubSource { dimension: 3 };
        let mentions = vec!["alpha".to_string(), "beta".to_string()];
        let vectors = encode_batch(&source, &mentions).unwrap();

        assert_eq!(vectors.len(), 2);
        assert!(vectors.iter().all(|v| v.len() == 3));
        assert_ne!(vectors[0], vectors[1]);
    }

    #[test]
    fn encode_batch_rejects_dimension_violations() {
        let mentions = vec!["anything".to_string()];
        let err = encode_batch(&ShortSource, &mentions).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 4,
                found: 1
            }
        ));
    }

    #[test]
    fn encode_batch_propagates_source_failures() {
        let source = StubSource { dimension: 3 };
        let mentions = vec!["ok".to_string(), "boom".to_string()];
        let err = encode_batch(&source, &mentions).unwrap_err();
        assert!(matches!(err, Error::Source(_)));
    }

    #[test]
    fn filter_blank_drops_empty_and_whitespace() {
        let mentions = vec![
            "J. R. R. Tolkien".to_string(),
            "".to_string(),
            "   ".to_string(),
            "Le Guin".to_string(),
        ];
        assert_eq!(filter_blank(mentions), vec!["J. R. R. Tolkien", "Le Guin"]);
    }
}
