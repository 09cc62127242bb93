use std::hash::Hash;

use log::debug;

use crate::classify::vote;
use crate::error::{Error, Result};
use crate::metric::DistanceMetric;
use crate::point::{uniform_dimension, LabeledPoint};
use crate::search::{exhaustive, BallTree, SearchStrategy};

/// A k-nearest-neighbor classifier with majority-vote aggregation.
///
/// The classifier holds the training set, the neighbor count `k`, and the
/// distance metric injected at construction; a ball tree over the training
/// set is built eagerly so queries take `&self` and may run concurrently.
/// Replacing the training data goes through [`retrain`](Self::retrain),
/// which discards and rebuilds the tree.
///
/// # Type Parameters
///
/// - `L`: the label type. Only equality and hashing are required, so string
///   labels or integer codes from an external encoder both work.
/// - `M`: the distance metric, resolved once at construction rather than
///   re-dispatched per comparison.
///
/// # Examples
///
/// ```
/// use knn::{Euclidean, KnnClassifier, LabeledPoint, SearchStrategy};
///
/// let training = vec![
///     LabeledPoint::new(vec![1.0, 2.0], "A"),
///     LabeledPoint::new(vec![2.0, 3.0], "A"),
///     LabeledPoint::new(vec![3.0, 3.0], "B"),
///     LabeledPoint::new(vec![6.0, 7.0], "B"),
/// ];
/// let classifier = KnnClassifier::new(training, 3, Euclidean).unwrap();
///
/// let label = classifier.predict(&[2.1, 2.9], SearchStrategy::BallTree).unwrap();
/// assert_eq!(label, "A");
/// ```
#[derive(Debug, Clone)]
pub struct KnnClassifier<L, M> {
    k: usize,
    training: Vec<LabeledPoint<L>>,
    metric: M,
    tree: Option<BallTree<L>>,
}

impl<L, M> KnnClassifier<L, M>
where
    L: Eq + Hash + Clone,
    M: DistanceMetric,
{
    /// Construct a classifier over `training` with neighbor count `k`.
    ///
    /// An empty training set is accepted — the classifier exists but every
    /// `predict` fails with [`Error::EmptyTrainingSet`] until it is
    /// retrained with data.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidK`] if `k` is 0, or exceeds the size of a
    ///   non-empty training set.
    /// - [`Error::DimensionMismatch`] if the training points disagree in
    ///   dimensionality.
    pub fn new(training: Vec<LabeledPoint<L>>, k: usize, metric: M) -> Result<Self> {
        let mut classifier = Self {
            k: 0,
            training: Vec::new(),
            metric,
            tree: None,
        };
        classifier.retrain(training, k)?;
        Ok(classifier)
    }

    /// Replace the training data and neighbor count, rebuilding the ball
    /// tree before returning. Validation matches [`new`](Self::new); on
    /// error the previous state is left unchanged.
    pub fn retrain(&mut self, training: Vec<LabeledPoint<L>>, k: usize) -> Result<()> {
        if k == 0 || (!training.is_empty() && k > training.len()) {
            return Err(Error::InvalidK {
                k,
                len: training.len(),
            });
        }
        uniform_dimension(&training)?;
        let tree = if training.is_empty() {
            None
        } else {
            Some(BallTree::build(training.clone(), &self.metric)?)
        };
        debug!("retrained on {} points with k = {}", training.len(), k);
        self.training = training;
        self.k = k;
        self.tree = tree;
        Ok(())
    }

    /// The k nearest training points to `query` under the selected
    /// strategy, as ascending `(point, distance)` pairs. Both strategies
    /// return the same multiset of neighbors.
    pub fn k_nearest(
        &self,
        query: &[f64],
        strategy: SearchStrategy,
    ) -> Result<Vec<(LabeledPoint<L>, f64)>> {
        match strategy {
            SearchStrategy::Exhaustive => {
                if self.training.is_empty() {
                    return Err(Error::EmptyTrainingSet);
                }
                exhaustive::k_nearest(&self.training, query, self.k, &self.metric)
            }
            SearchStrategy::BallTree => {
                let tree = self.tree.as_ref().ok_or(Error::EmptyTrainingSet)?;
                tree.k_nearest(query, self.k, &self.metric)
            }
        }
    }

    /// Predict the label of `query` by majority vote among its k nearest
    /// neighbors.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyTrainingSet`] if no training points exist.
    /// - [`Error::DimensionMismatch`] if `query` has the wrong
    ///   dimensionality.
    pub fn predict(&self, query: &[f64], strategy: SearchStrategy) -> Result<L> {
        let neighbors = self.k_nearest(query, strategy)?;
        let labels: Vec<L> = neighbors.into_iter().map(|(p, _)| p.label).collect();
        vote::majority(&labels).ok_or(Error::EmptyTrainingSet)
    }

    /// Predict labels for multiple query points at once.
    pub fn predict_batch(&self, queries: &[Vec<f64>], strategy: SearchStrategy) -> Result<Vec<L>> {
        queries.iter().map(|q| self.predict(q, strategy)).collect()
    }

    /// Number of neighbors consulted per prediction.
    pub fn k(&self) -> usize {
        self.k
    }

    /// The current training set, in its original order.
    pub fn training(&self) -> &[LabeledPoint<L>] {
        &self.training
    }
}
