use log::debug;

use crate::error::{Error, Result};
use crate::metric::DistanceMetric;
use crate::point::{uniform_dimension, LabeledPoint};
use crate::search::neighbor_queue::NeighborQueue;

/// Default maximum number of points stored in a single leaf.
pub const DEFAULT_LEAF_SIZE: usize = 8;

/// A binary spatial index where each node bounds all of its points within a
/// hypersphere (centroid + radius), enabling distance-based subtree pruning
/// during k-nearest search.
///
/// The tree is built once from a fixed point set and is immutable afterward:
/// neither construction nor search mutates it, so independent queries may
/// run concurrently against a shared tree. Each node exclusively owns its
/// two children; there are no shared or back references.
#[derive(Debug, Clone)]
pub struct BallTree<L> {
    root: Node<L>,
    dimension: usize,
    len: usize,
}

#[derive(Debug, Clone)]
struct Node<L> {
    /// Mean of all points in this subtree.
    centroid: Vec<f64>,
    /// Exact maximum distance from `centroid` to any point in the subtree.
    /// The pruning rule is sound only because this is not an upper-bound
    /// approximation.
    radius: f64,
    contents: Contents<L>,
}

#[derive(Debug, Clone)]
enum Contents<L> {
    Leaf(Vec<LabeledPoint<L>>),
    Split { left: Box<Node<L>>, right: Box<Node<L>> },
}

impl<L: Clone> BallTree<L> {
    /// Build a tree over `points` with the default leaf size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTrainingSet`] for an empty point set and
    /// [`Error::DimensionMismatch`] if the points disagree in
    /// dimensionality.
    pub fn build<M: DistanceMetric>(points: Vec<LabeledPoint<L>>, metric: &M) -> Result<Self> {
        Self::build_with_leaf_size(points, metric, DEFAULT_LEAF_SIZE)
    }

    /// Build a tree that stops splitting once a partition holds at most
    /// `leaf_size` points. A `leaf_size` of 0 is treated as 1.
    pub fn build_with_leaf_size<M: DistanceMetric>(
        points: Vec<LabeledPoint<L>>,
        metric: &M,
        leaf_size: usize,
    ) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::EmptyTrainingSet);
        }
        let dimension = uniform_dimension(&points)?;
        let len = points.len();
        let root = build_node(points, metric, leaf_size.max(1), dimension)?;
        debug!(
            "built ball tree over {} points in {} dimensions (leaf size {})",
            len,
            dimension,
            leaf_size.max(1)
        );
        Ok(Self {
            root,
            dimension,
            len,
        })
    }

    /// Return the `min(k, len)` points nearest to `query` as ascending
    /// `(point, distance)` pairs — the exact same multiset the exhaustive
    /// strategy returns, found with subtree pruning.
    ///
    /// Zero-distance ties (a query coinciding with a training point) break
    /// deterministically by traversal order. `k` at or above the tree size
    /// degenerates to a full scan, since the queue never fills early enough
    /// for the prune test to fire.
    pub fn k_nearest<M: DistanceMetric>(
        &self,
        query: &[f64],
        k: usize,
        metric: &M,
    ) -> Result<Vec<(LabeledPoint<L>, f64)>> {
        if query.len() != self.dimension {
            return Err(Error::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }
        let mut queue = NeighborQueue::new(k.min(self.len));
        search_node(&self.root, query, metric, &mut queue)?;
        Ok(queue.into_sorted())
    }

    /// Number of points indexed by the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Dimensionality of the indexed points.
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Recursively partition `points` into a node. Splits pivot on two
/// well-separated points (the point farthest from the centroid, then the
/// point farthest from that pivot); every point joins the partition of the
/// nearer pivot. A split that leaves either side empty (all points
/// coincident, for instance) folds back into a leaf.
fn build_node<L, M>(
    points: Vec<LabeledPoint<L>>,
    metric: &M,
    leaf_size: usize,
    dimension: usize,
) -> Result<Node<L>>
where
    L: Clone,
    M: DistanceMetric,
{
    let centroid = centroid_of(&points, dimension);
    let mut radius = 0.0_f64;
    for point in &points {
        let d = metric.distance(&centroid, &point.features)?;
        if d > radius {
            radius = d;
        }
    }

    if points.len() <= leaf_size {
        return Ok(Node {
            centroid,
            radius,
            contents: Contents::Leaf(points),
        });
    }

    let first = farthest_from(&centroid, &points, metric)?;
    let pivot_a = points[first].features.clone();
    let second = farthest_from(&pivot_a, &points, metric)?;
    let pivot_b = points[second].features.clone();

    let mut left = Vec::with_capacity(points.len() / 2);
    let mut right = Vec::with_capacity(points.len() / 2);
    for point in points {
        let da = metric.distance(&pivot_a, &point.features)?;
        let db = metric.distance(&pivot_b, &point.features)?;
        if da <= db {
            left.push(point);
        } else {
            right.push(point);
        }
    }

    if left.is_empty() || right.is_empty() {
        let mut points = left;
        points.extend(right);
        return Ok(Node {
            centroid,
            radius,
            contents: Contents::Leaf(points),
        });
    }

    Ok(Node {
        centroid,
        radius,
        contents: Contents::Split {
            left: Box::new(build_node(left, metric, leaf_size, dimension)?),
            right: Box::new(build_node(right, metric, leaf_size, dimension)?),
        },
    })
}

fn centroid_of<L>(points: &[LabeledPoint<L>], dimension: usize) -> Vec<f64> {
    let mut centroid = vec![0.0; dimension];
    for point in points {
        for (c, &x) in centroid.iter_mut().zip(&point.features) {
            *c += x;
        }
    }
    let n = points.len() as f64;
    for c in &mut centroid {
        *c /= n;
    }
    centroid
}

fn farthest_from<L, M: DistanceMetric>(
    origin: &[f64],
    points: &[LabeledPoint<L>],
    metric: &M,
) -> Result<usize> {
    let mut best = 0;
    let mut best_distance = f64::NEG_INFINITY;
    for (i, point) in points.iter().enumerate() {
        let d = metric.distance(origin, &point.features)?;
        if d > best_distance {
            best_distance = d;
            best = i;
        }
    }
    Ok(best)
}

/// One recursion step of the k-nearest search. The prune test only applies
/// once the queue holds k candidates; before that every subtree must be
/// visited. Internal nodes recurse into the nearer child first so the queue
/// tightens before the farther child is tested.
fn search_node<L, M>(
    node: &Node<L>,
    query: &[f64],
    metric: &M,
    queue: &mut NeighborQueue<LabeledPoint<L>>,
) -> Result<()>
where
    L: Clone,
    M: DistanceMetric,
{
    if let Some(worst) = queue.worst_distance() {
        if metric.distance(query, &node.centroid)? - node.radius >= worst {
            return Ok(());
        }
    }

    match &node.contents {
        Contents::Leaf(points) => {
            for point in points {
                let d = metric.distance(query, &point.features)?;
                queue.insert(d, point.clone());
            }
        }
        Contents::Split { left, right } => {
            let to_left = metric.distance(query, &left.centroid)?;
            let to_right = metric.distance(query, &right.centroid)?;
            let (near, far) = if to_left <= to_right {
                (left, right)
            } else {
                (right, left)
            };
            search_node(near, query, metric, queue)?;
            search_node(far, query, metric, queue)?;
        }
    }
    Ok(())
}
