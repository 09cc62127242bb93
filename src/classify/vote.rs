use std::collections::HashMap;
use std::hash::Hash;

/// Distance floor for inverse-distance weighting. An exact match (distance
/// 0) gets weight `1 / 1e-11`, large enough to dominate any realistic
/// non-zero-distance neighbor without dividing by zero.
pub const ZERO_DISTANCE_FLOOR: f64 = 1e-11;

/// Returns the most frequent label, or `None` for an empty slice.
///
/// Ties break to the label that appears first in `labels` — with neighbor
/// labels in ascending-distance order, that is the tied label with the
/// closest neighbor.
///
/// # Examples
///
/// ```
/// use knn::classify::vote;
///
/// assert_eq!(vote::majority(&["A", "B", "A", "B"]), Some("A"));
/// ```
pub fn majority<L: Eq + Hash + Clone>(labels: &[L]) -> Option<L> {
    let mut counts: HashMap<&L, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    let mut best: Option<(&L, usize)> = None;
    for label in labels {
        let count = counts[label];
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((label, count)),
        }
    }
    best.map(|(label, _)| label.clone())
}

/// Returns the label with the greatest summed inverse-distance weight, or
/// `None` for an empty slice.
///
/// Each `(label, distance)` pair contributes `1 / max(distance, floor)` to
/// its label's total, so closer neighbors count for more and an exact match
/// all but decides the vote. Ties break to the first-seen label among those
/// tied.
pub fn distance_weighted<L: Eq + Hash + Clone>(neighbors: &[(L, f64)]) -> Option<L> {
    let mut weights: HashMap<&L, f64> = HashMap::new();
    for (label, distance) in neighbors {
        *weights.entry(label).or_insert(0.0) += 1.0 / distance.max(ZERO_DISTANCE_FLOOR);
    }
    let mut best: Option<(&L, f64)> = None;
    for (label, _) in neighbors {
        let weight = weights[label];
        match best {
            Some((_, best_weight)) if weight <= best_weight => {}
            _ => best = Some((label, weight)),
        }
    }
    best.map(|(label, _)| label.clone())
}
