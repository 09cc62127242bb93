use crate::error::Result;
use crate::metric::DistanceMetric;
use crate::point::LabeledPoint;
use crate::search::neighbor_queue::NeighborQueue;

/// Brute-force k-nearest search: computes the distance from `query` to every
/// training point and returns the `min(k, n)` closest as `(point, distance)`
/// pairs in ascending distance order.
///
/// Ties are broken by original training-set order (stable). A `k` larger
/// than the training set clamps to the full set; `k = 0` yields an empty
/// result. This strategy is always correct and serves as the baseline the
/// ball-tree search is tested against.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`](crate::Error::DimensionMismatch) if
/// `query` and any training point disagree in dimensionality.
///
/// # Examples
///
/// ```
/// use knn::point::LabeledPoint;
/// use knn::metric::Euclidean;
/// use knn::search::exhaustive;
///
/// let training = vec![
///     LabeledPoint::new(vec![0.0, 0.0], "A"),
///     LabeledPoint::new(vec![5.0, 5.0], "B"),
/// ];
/// let nearest = exhaustive::k_nearest(&training, &[1.0, 0.0], 1, &Euclidean).unwrap();
/// assert_eq!(nearest[0].0.label, "A");
/// ```
pub fn k_nearest<L, M>(
    training: &[LabeledPoint<L>],
    query: &[f64],
    k: usize,
    metric: &M,
) -> Result<Vec<(LabeledPoint<L>, f64)>>
where
    L: Clone,
    M: DistanceMetric,
{
    let mut queue = NeighborQueue::new(k.min(training.len()));
    for point in training {
        let distance = metric.distance(query, &point.features)?;
        queue.insert(distance, point.clone());
    }
    Ok(queue.into_sorted())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::metric::{Euclidean, Manhattan};

    fn training() -> Vec<LabeledPoint<&'static str>> {
        vec![
            LabeledPoint::new(vec![1.0, 1.0], "a"),
            LabeledPoint::new(vec![2.0, 2.0], "b"),
            LabeledPoint::new(vec![1.0, 2.0], "c"),
            LabeledPoint::new(vec![10.0, 10.0], "d"),
        ]
    }

    #[test]
    fn test_single_nearest() {
        let nearest = k_nearest(&training(), &[9.5, 9.5], 1, &Euclidean).unwrap();
        assert_eq!(nearest.len(), 1);
        assert_eq!(nearest[0].0.label, "d");
    }

    #[test]
    fn test_ascending_distance_order() {
        let nearest = k_nearest(&training(), &[1.1, 1.1], 3, &Euclidean).unwrap();
        let labels: Vec<_> = nearest.iter().map(|(p, _)| p.label).collect();
        assert_eq!(labels, vec!["a", "c", "b"]);
        assert!(nearest[0].1 <= nearest[1].1 && nearest[1].1 <= nearest[2].1);
    }

    #[test]
    fn test_k_larger_than_training_clamps() {
        let nearest = k_nearest(&training(), &[0.0, 0.0], 10, &Euclidean).unwrap();
        assert_eq!(nearest.len(), 4);
    }

    #[test]
    fn test_zero_k_is_empty() {
        let nearest = k_nearest(&training(), &[0.0, 0.0], 0, &Euclidean).unwrap();
        assert!(nearest.is_empty());
    }

    #[test]
    fn test_ties_break_by_training_order() {
        // Both training points sit at Manhattan distance 2 from the query.
        let training = vec![
            LabeledPoint::new(vec![1.0, 0.0], "first"),
            LabeledPoint::new(vec![0.0, 1.0], "second"),
        ];
        let nearest = k_nearest(&training, &[0.0, -1.0], 1, &Manhattan).unwrap();
        assert_eq!(nearest[0].0.label, "first");
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = k_nearest(&training(), &[1.0], 1, &Euclidean).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 1,
                actual: 2
            }
        );
    }
}
