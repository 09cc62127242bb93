use std::hash::Hash;

use crate::classify::vote;
use crate::classify::KnnClassifier;
use crate::error::{Error, Result};
use crate::metric::DistanceMetric;
use crate::point::LabeledPoint;
use crate::search::SearchStrategy;

/// A k-nearest-neighbor classifier with distance-weighted aggregation.
///
/// Shares the search path of [`KnnClassifier`] — the same external contract,
/// the same two strategies — but each neighbor votes with weight
/// `1 / distance` instead of counting once, so closer neighbors carry more
/// of the decision and an exact match dominates outright.
///
/// # Examples
///
/// ```
/// use knn::{Euclidean, LabeledPoint, SearchStrategy, WeightedKnnClassifier};
///
/// let training = vec![
///     LabeledPoint::new(vec![0.0, 0.0], "A"),
///     LabeledPoint::new(vec![4.0, 4.0], "B"),
///     LabeledPoint::new(vec![5.0, 5.0], "B"),
/// ];
/// let classifier = WeightedKnnClassifier::new(training, 3, Euclidean).unwrap();
///
/// // "A" is a single but much closer neighbor, so its weight wins.
/// let label = classifier.predict(&[0.1, 0.1], SearchStrategy::BallTree).unwrap();
/// assert_eq!(label, "A");
/// ```
#[derive(Debug, Clone)]
pub struct WeightedKnnClassifier<L, M> {
    inner: KnnClassifier<L, M>,
}

impl<L, M> WeightedKnnClassifier<L, M>
where
    L: Eq + Hash + Clone,
    M: DistanceMetric,
{
    /// Construct a classifier over `training` with neighbor count `k`.
    /// Validation matches [`KnnClassifier::new`].
    pub fn new(training: Vec<LabeledPoint<L>>, k: usize, metric: M) -> Result<Self> {
        Ok(Self {
            inner: KnnClassifier::new(training, k, metric)?,
        })
    }

    /// Replace the training data and neighbor count, rebuilding the ball
    /// tree before returning.
    pub fn retrain(&mut self, training: Vec<LabeledPoint<L>>, k: usize) -> Result<()> {
        self.inner.retrain(training, k)
    }

    /// The k nearest training points to `query` under the selected
    /// strategy, as ascending `(point, distance)` pairs.
    pub fn k_nearest(
        &self,
        query: &[f64],
        strategy: SearchStrategy,
    ) -> Result<Vec<(LabeledPoint<L>, f64)>> {
        self.inner.k_nearest(query, strategy)
    }

    /// Predict the label of `query` by summed inverse-distance weight over
    /// its k nearest neighbors.
    pub fn predict(&self, query: &[f64], strategy: SearchStrategy) -> Result<L> {
        let neighbors = self.k_nearest(query, strategy)?;
        let pairs: Vec<(L, f64)> = neighbors.into_iter().map(|(p, d)| (p.label, d)).collect();
        vote::distance_weighted(&pairs).ok_or(Error::EmptyTrainingSet)
    }

    /// Predict labels for multiple query points at once.
    pub fn predict_batch(&self, queries: &[Vec<f64>], strategy: SearchStrategy) -> Result<Vec<L>> {
        queries.iter().map(|q| self.predict(q, strategy)).collect()
    }

    /// Number of neighbors consulted per prediction.
    pub fn k(&self) -> usize {
        self.inner.k()
    }

    /// The current training set, in its original order.
    pub fn training(&self) -> &[LabeledPoint<L>] {
        self.inner.training()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::Euclidean;

    fn training() -> Vec<LabeledPoint<&'static str>> {
        vec![
            LabeledPoint::new(vec![0.0, 0.0], "A"),
            LabeledPoint::new(vec![4.0, 4.0], "B"),
            LabeledPoint::new(vec![5.0, 5.0], "B"),
            LabeledPoint::new(vec![6.0, 6.0], "B"),
        ]
    }

    #[test]
    fn test_close_minority_outweighs_far_majority() {
        // Plain majority over k=4 would say "B"; the weighted vote sides
        // with the single much-closer "A".
        let weighted = WeightedKnnClassifier::new(training(), 4, Euclidean).unwrap();
        assert_eq!(
            weighted.predict(&[0.1, 0.1], SearchStrategy::Exhaustive).unwrap(),
            "A"
        );
        let plain = KnnClassifier::new(training(), 4, Euclidean).unwrap();
        assert_eq!(
            plain.predict(&[0.1, 0.1], SearchStrategy::Exhaustive).unwrap(),
            "B"
        );
    }

    #[test]
    fn test_exact_match_dominates() {
        let weighted = WeightedKnnClassifier::new(training(), 4, Euclidean).unwrap();
        assert_eq!(
            weighted.predict(&[0.0, 0.0], SearchStrategy::BallTree).unwrap(),
            "A"
        );
    }

    #[test]
    fn test_strategies_agree() {
        let weighted = WeightedKnnClassifier::new(training(), 3, Euclidean).unwrap();
        for query in [[0.1, 0.1], [4.5, 4.5], [10.0, 10.0]] {
            assert_eq!(
                weighted.predict(&query, SearchStrategy::Exhaustive).unwrap(),
                weighted.predict(&query, SearchStrategy::BallTree).unwrap(),
            );
        }
    }

    #[test]
    fn test_empty_training_fails_at_predict() {
        let weighted = WeightedKnnClassifier::<&str, _>::new(Vec::new(), 2, Euclidean).unwrap();
        assert_eq!(
            weighted
                .predict(&[1.0, 1.0], SearchStrategy::Exhaustive)
                .unwrap_err(),
            Error::EmptyTrainingSet
        );
    }

    #[test]
    fn test_retrain() {
        let mut weighted = WeightedKnnClassifier::new(training(), 4, Euclidean).unwrap();
        weighted
            .retrain(
                vec![
                    LabeledPoint::new(vec![0.0, 0.0], "C"),
                    LabeledPoint::new(vec![1.0, 1.0], "C"),
                ],
                1,
            )
            .unwrap();
        assert_eq!(
            weighted.predict(&[0.2, 0.2], SearchStrategy::BallTree).unwrap(),
            "C"
        );
    }

    #[test]
    fn test_invalid_k_rejected() {
        assert_eq!(
            WeightedKnnClassifier::new(training(), 0, Euclidean).unwrap_err(),
            Error::InvalidK { k: 0, len: 4 }
        );
    }
}
