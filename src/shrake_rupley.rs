//! Shrake-Rupley integration: test-point sampling on probe-inflated spheres.
//!
//! For atom i with inflated radius `R = r + p`, each lattice point is placed
//! on the inflated sphere and tested against the neighbors' inflated
//! spheres; the exposed fraction scales the full sphere area `4*pi*R^2`.
//! The neighbor loop exits as soon as a point is found buried.

use std::f64::consts::PI;

use crate::coords::CoordArena;
use crate::neighbors::{NeighborEntry, NeighborList};
use crate::sphere_points::SpherePoints;

/// SASA of atom `i`.
pub(crate) fn atom_area(
    arena: &CoordArena,
    nb: &NeighborList,
    probe: f64,
    points: &SpherePoints,
    i: usize,
) -> f64 {
    let ri = arena.radius(i) + probe;
    let ci = arena.point(i);
    let neighbors = nb.neighbors(i);

    let mut exposed = 0usize;
    'points: for t in points.iter() {
        let candidate = ci + t * ri;
        for e in neighbors {
            let j = e.index;
            if is_exact_duplicate(arena, i, e) {
                if duplicate_covers(i, j, t.z) {
                    continue 'points;
                }
                continue;
            }
            let rj = arena.radius(j) + probe;
            if (candidate - arena.point(j)).norm_squared() < rj * rj {
                continue 'points;
            }
        }
        exposed += 1;
    }

    4.0 * PI * ri * ri * (exposed as f64 / points.len() as f64)
}

/// Neighbor with identical center and radius.
#[inline]
pub(crate) fn is_exact_duplicate(arena: &CoordArena, i: usize, e: &NeighborEntry) -> bool {
    e.dxy == 0.0
        && arena.z(e.index) == arena.z(i)
        && arena.radius(e.index) == arena.radius(i)
}

/// Deterministic split of a duplicated sphere: the lower-indexed atom of a
/// pair keeps the upper hemisphere, the higher-indexed one the lower, so two
/// duplicates each report exactly half the sphere.
#[inline]
fn duplicate_covers(i: usize, j: usize, tz: f64) -> bool {
    if j < i { tz > 0.0 } else { tz < 0.0 }
}
