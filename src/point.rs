use crate::error::{Error, Result};

/// A training sample: a fixed-dimension feature vector plus its class label.
///
/// The label type `L` is opaque to the crate; classifiers only require
/// equality and hashing, so string labels, integer codes from an external
/// label encoder, or anything else comparable all work.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledPoint<L> {
    pub features: Vec<f64>,
    pub label: L,
}

impl<L> LabeledPoint<L> {
    pub fn new(features: Vec<f64>, label: L) -> Self {
        Self { features, label }
    }

    /// Number of feature dimensions.
    pub fn dimension(&self) -> usize {
        self.features.len()
    }
}

/// Returns the shared dimensionality of `points`, or `DimensionMismatch` if
/// any point disagrees with the first. An empty slice has dimension 0.
pub fn uniform_dimension<L>(points: &[LabeledPoint<L>]) -> Result<usize> {
    let expected = match points.first() {
        Some(p) => p.dimension(),
        None => return Ok(0),
    };
    for p in points {
        if p.dimension() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                actual: p.dimension(),
            });
        }
    }
    Ok(expected)
}
