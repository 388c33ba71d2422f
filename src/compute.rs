//! Public computation entry points and the parallel driver.
//!
//! The pipeline is: coordinate arena -> cell grid -> neighbor list ->
//! integrator. The grid lives only inside the neighbor-list build; the
//! arena and neighbor list are read-only during integration. Atoms are a
//! trivially parallel workload: the index range is split into one
//! contiguous chunk per worker and each worker writes only its own slots of
//! the area vector, so results are deterministic regardless of thread
//! count.

use rayon::prelude::*;

use crate::coords::CoordArena;
use crate::error::SasaError;
use crate::neighbors::NeighborList;
use crate::results::SasaResult;
use crate::sphere_points::SpherePoints;
use crate::types::{Algorithm, Atom, CancelToken, SasaParams};
use crate::{lee_richards, shrake_rupley};

/// Sequential-mode cancellation poll interval, in atoms.
const POLL_CHUNK: usize = 64;

/// Compute per-atom SASA with the given algorithm and parameters.
///
/// # Errors
/// - [`SasaError::InvalidParam`] for out-of-range parameters.
/// - [`SasaError::InvalidInput`] for an empty atom set or bad radii.
/// - [`SasaError::OutOfMemory`] if spatial structures cannot be allocated.
pub fn compute(
    atoms: &[Atom],
    algorithm: Algorithm,
    params: &SasaParams,
) -> Result<SasaResult, SasaError> {
    compute_with_cancel(atoms, algorithm, params, &CancelToken::new())
}

/// Like [`compute`], with a cooperative cancellation token polled at chunk
/// boundaries. On cancellation the partial area vector is discarded and
/// [`SasaError::Cancelled`] is returned.
pub fn compute_with_cancel(
    atoms: &[Atom],
    algorithm: Algorithm,
    params: &SasaParams,
    cancel: &CancelToken,
) -> Result<SasaResult, SasaError> {
    params.validate()?;
    let arena = CoordArena::from_atoms(atoms)?;
    let nb = NeighborList::build(&arena, params.probe_radius)?;

    let areas = match algorithm {
        Algorithm::ShrakeRupley => {
            let points = SpherePoints::new(params.sr_points)?;
            run_atomwise(arena.len(), params.n_threads, cancel, |i| {
                shrake_rupley::atom_area(&arena, &nb, params.probe_radius, &points, i)
            })?
        }
        Algorithm::LeeRichards => run_atomwise(arena.len(), params.n_threads, cancel, |i| {
            lee_richards::atom_area(&arena, &nb, params.probe_radius, params.lr_delta, i)
        })?,
    };

    Ok(SasaResult::new(areas))
}

/// Evaluate `per_atom` for every index, sequentially or on a dedicated
/// thread pool with one contiguous chunk per worker.
fn run_atomwise<F>(
    n: usize,
    n_threads: u32,
    cancel: &CancelToken,
    per_atom: F,
) -> Result<Vec<f64>, SasaError>
where
    F: Fn(usize) -> f64 + Sync,
{
    let mut areas = vec![0.0; n];

    if n_threads == 1 {
        for (i, slot) in areas.iter_mut().enumerate() {
            if i % POLL_CHUNK == 0 && cancel.is_cancelled() {
                return Err(SasaError::Cancelled);
            }
            *slot = per_atom(i);
        }
        return Ok(areas);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads as usize)
        .build()
        .map_err(|e| SasaError::invalid_param(format!("cannot build thread pool: {e}")))?;

    let chunk = n.div_ceil(n_threads as usize).max(1);
    pool.install(|| {
        areas
            .par_chunks_mut(chunk)
            .enumerate()
            .for_each(|(ci, slice)| {
                if cancel.is_cancelled() {
                    return;
                }
                let base = ci * chunk;
                for (k, slot) in slice.iter_mut().enumerate() {
                    *slot = per_atom(base + k);
                }
            });
    });

    if cancel.is_cancelled() {
        return Err(SasaError::Cancelled);
    }
    Ok(areas)
}
