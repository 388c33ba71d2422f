//! Solvent accessible surface area (SASA) of atomic structures.
//!
//! This library computes per-atom SASA for a set of spheres (atom centers
//! with van der Waals radii) rolled over by a solvent probe, using either of
//! two classic algorithms:
//!
//! - **Shrake-Rupley**: test-point sampling on probe-inflated spheres.
//! - **Lee-Richards**: analytic integration of exposed arcs over parallel
//!   slices.
//!
//! Both consume the same grid-accelerated neighbor list, so the cost is
//! close to linear in the number of atoms.
//!
//! # Example
//!
//! ```
//! use molsasa::{Algorithm, Atom, SasaParams, compute};
//!
//! let atoms = vec![
//!     Atom::new(0.0, 0.0, 0.0, 1.7),
//!     Atom::new(3.0, 0.0, 0.0, 1.55),
//! ];
//!
//! let result = compute(&atoms, Algorithm::LeeRichards, &SasaParams::default()).unwrap();
//!
//! // Per-atom areas (indexed by atom) and the molecular total
//! let areas: &[f64] = result.areas();
//! let total: f64 = result.total();
//! assert!(total > 0.0 && areas.len() == 2);
//! ```

mod cell_grid;
pub mod classify;
mod compute;
mod coords;
mod error;
pub mod input;
mod lee_richards;
mod neighbors;
mod results;
mod shrake_rupley;
mod sphere_points;
mod types;

pub use compute::{compute, compute_with_cancel};
pub use error::SasaError;
pub use results::{ClassTotals, SasaResult};
pub use types::{Algorithm, Atom, AtomClass, CancelToken, SasaParams, SR_ACCEPTED_POINTS};
