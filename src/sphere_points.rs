//! Quasi-uniform test points on the unit sphere for Shrake-Rupley sampling.
//!
//! Golden-angle (Fibonacci) lattice with z as the linear axis: point k sits
//! at `z = 1 - 2k/(n-1)` and azimuth `k * pi * (3 - sqrt(5))`. For the even
//! point counts accepted here the lattice is symmetric under `z -> -z` and
//! never places a point on the equator, which keeps the duplicate-atom
//! hemisphere split exact.

use nalgebra::Vector3;

use crate::error::SasaError;
use crate::types::SR_ACCEPTED_POINTS;

#[derive(Debug, Clone)]
pub struct SpherePoints {
    points: Vec<Vector3<f64>>,
}

impl SpherePoints {
    /// Generate a lattice of `n` points.
    ///
    /// # Errors
    /// [`SasaError::InvalidParam`] if `n` is not one of the accepted counts.
    pub fn new(n: u32) -> Result<Self, SasaError> {
        if !SR_ACCEPTED_POINTS.contains(&n) {
            return Err(SasaError::invalid_param(format!(
                "test point count must be one of {SR_ACCEPTED_POINTS:?}, got {n}"
            )));
        }

        let golden_angle = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
        let n = n as usize;
        let points = (0..n)
            .map(|k| {
                let z = 1.0 - (2.0 * k as f64) / (n - 1) as f64;
                let rho = (1.0 - z * z).sqrt();
                let theta = golden_angle * k as f64;
                Vector3::new(theta.cos() * rho, theta.sin() * rho, z)
            })
            .collect();

        Ok(Self { points })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vector3<f64>> {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_counts_generate_exactly_n_points() {
        for &n in SR_ACCEPTED_POINTS {
            let points = SpherePoints::new(n).unwrap();
            assert_eq!(points.len(), n as usize);
        }
    }

    #[test]
    fn rejects_unlisted_count() {
        assert!(matches!(
            SpherePoints::new(101),
            Err(SasaError::InvalidParam(_))
        ));
    }

    #[test]
    fn points_lie_on_unit_sphere() {
        let points = SpherePoints::new(500).unwrap();
        for p in points.iter() {
            assert!((p.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn hemispheres_are_balanced_and_equator_free() {
        for &n in SR_ACCEPTED_POINTS {
            let points = SpherePoints::new(n).unwrap();
            let upper = points.iter().filter(|p| p.z > 0.0).count();
            let lower = points.iter().filter(|p| p.z < 0.0).count();
            assert_eq!(upper + lower, n as usize, "point on equator for n={n}");
            assert_eq!(upper, lower, "unbalanced hemispheres for n={n}");
        }
    }
}
