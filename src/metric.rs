use crate::error::{Error, Result};

/// A trait for point-to-point distance functions used by the search
/// strategies.
///
/// Implementations must be symmetric and return `0.0` for identical points.
/// Brute-force search is correct for any such function; ball-tree pruning
/// additionally assumes the triangle inequality holds, so a non-metric
/// "distance" makes tree search unsound.
///
/// The metric is injected once at classifier construction, so an unsupported
/// metric is a compile-time impossibility rather than a per-query lookup
/// failure.
pub trait DistanceMetric {
    /// Compute the distance between two points of equal dimension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the slices differ in length.
    fn distance(&self, a: &[f64], b: &[f64]) -> Result<f64>;
}

/// Euclidean (L2) distance: the square root of the summed squared
/// coordinate differences.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl DistanceMetric for Euclidean {
    fn distance(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        check_dimensions(a, b)?;
        let sum_sq = a
            .iter()
            .zip(b.iter())
            .fold(0.0, |acc, (&x, &y)| acc + (x - y) * (x - y));
        Ok(sum_sq.sqrt())
    }
}

/// Manhattan (L1) distance: the sum of absolute coordinate differences.
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl DistanceMetric for Manhattan {
    fn distance(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        check_dimensions(a, b)?;
        Ok(a.iter()
            .zip(b.iter())
            .fold(0.0, |acc, (&x, &y)| acc + (x - y).abs()))
    }
}

fn check_dimensions(a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_euclidean_known_value() {
        let d = Euclidean.distance(&[0.0, 0.0], &[3.0, 4.0]).unwrap();
        assert_relative_eq!(d, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_manhattan_known_value() {
        let d = Manhattan.distance(&[1.0, 2.0], &[4.0, -2.0]).unwrap();
        assert_relative_eq!(d, 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = [1.5, -2.5, 0.25];
        assert_eq!(Euclidean.distance(&p, &p).unwrap(), 0.0);
        assert_eq!(Manhattan.distance(&p, &p).unwrap(), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let a = [1.0, 2.0, 3.0];
        let b = [-4.0, 0.5, 9.0];
        assert_eq!(
            Euclidean.distance(&a, &b).unwrap(),
            Euclidean.distance(&b, &a).unwrap()
        );
        assert_eq!(
            Manhattan.distance(&a, &b).unwrap(),
            Manhattan.distance(&b, &a).unwrap()
        );
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = Euclidean.distance(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        );
    }
}
