use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::SasaError;

/// Input atom (center + van der Waals radius), user-facing type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub r: f64,
}

impl Atom {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, r: f64) -> Self {
        Self { x, y, z, r }
    }
}

/// Polarity class assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AtomClass {
    Polar,
    Apolar,
    Unknown,
}

/// SASA integration algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    /// Quadrature point sampling on probe-inflated spheres.
    ShrakeRupley,
    /// Analytic arc integration over parallel slices.
    LeeRichards,
}

/// Test-point counts the Shrake-Rupley integrator accepts.
pub const SR_ACCEPTED_POINTS: &[u32] = &[20, 50, 100, 200, 500, 1000, 2000, 5000];

/// Computation parameters. Defaults are the conventional ones: a 1.4 Å
/// water probe, 100 test points, 0.25 Å slices, one thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SasaParams {
    /// Rolling probe radius in Ångström.
    pub probe_radius: f64,
    /// Number of test points per sphere for Shrake-Rupley.
    pub sr_points: u32,
    /// Slice thickness in Ångström for Lee-Richards.
    pub lr_delta: f64,
    /// Worker threads for the integrators.
    pub n_threads: u32,
}

impl Default for SasaParams {
    fn default() -> Self {
        Self {
            probe_radius: 1.4,
            sr_points: 100,
            lr_delta: 0.25,
            n_threads: 1,
        }
    }
}

impl SasaParams {
    /// Validate all parameters up front.
    ///
    /// # Errors
    /// Returns [`SasaError::InvalidParam`] naming the offending parameter.
    pub fn validate(&self) -> Result<(), SasaError> {
        if !self.probe_radius.is_finite() || self.probe_radius < 0.0 {
            return Err(SasaError::invalid_param(format!(
                "probe radius must be finite and non-negative, got {}",
                self.probe_radius
            )));
        }
        if !SR_ACCEPTED_POINTS.contains(&self.sr_points) {
            return Err(SasaError::invalid_param(format!(
                "sr_points must be one of {SR_ACCEPTED_POINTS:?}, got {}",
                self.sr_points
            )));
        }
        if !self.lr_delta.is_finite() || self.lr_delta <= 0.0 {
            return Err(SasaError::invalid_param(format!(
                "lr_delta must be finite and positive, got {}",
                self.lr_delta
            )));
        }
        if self.n_threads < 1 {
            return Err(SasaError::invalid_param("n_threads must be at least 1"));
        }
        Ok(())
    }
}

/// Cooperative cancellation token, polled at chunk boundaries.
///
/// Cloning yields a handle to the same flag, so one clone can be handed to
/// another thread and triggered while a computation runs.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; observed at the next chunk boundary.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        assert!(SasaParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_negative_probe() {
        let params = SasaParams {
            probe_radius: -0.1,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(SasaError::InvalidParam(_))));
    }

    #[test]
    fn rejects_unlisted_point_count() {
        let params = SasaParams {
            sr_points: 123,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(SasaError::InvalidParam(_))));
    }

    #[test]
    fn rejects_non_positive_delta() {
        for lr_delta in [0.0, -0.25, f64::NAN] {
            let params = SasaParams {
                lr_delta,
                ..Default::default()
            };
            assert!(matches!(params.validate(), Err(SasaError::InvalidParam(_))));
        }
    }

    #[test]
    fn rejects_zero_threads() {
        let params = SasaParams {
            n_threads: 0,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(SasaError::InvalidParam(_))));
    }

    #[test]
    fn cancel_token_is_shared_between_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
