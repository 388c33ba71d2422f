//! Lee-Richards integration: exposed arcs over parallel slices along z.
//!
//! Atom i's z-extent `[z - R, z + R]` (with `R = r + p`) is divided into
//! `ceil(2R / delta)` slices of equal thickness `h <= delta`, sampled at
//! their midpoints. On each slice the atom's cross-section is a circle of
//! radius `rho = sqrt(R^2 - dz^2)`; every neighbor whose sphere reaches the
//! slice removes an angular interval from that circle. The remaining sweep
//! contributes `angle * R * h`, the exact area of the corresponding
//! spherical zone, so an isolated sphere integrates to `4*pi*R^2` exactly.

use std::f64::consts::TAU;

use crate::coords::CoordArena;
use crate::neighbors::NeighborList;
use crate::shrake_rupley::is_exact_duplicate;

/// Excluded angular intervals on one slice circle, reused across slices.
#[derive(Debug, Default)]
struct ArcBuffer {
    intervals: Vec<(f64, f64)>,
}

impl ArcBuffer {
    fn clear(&mut self) {
        self.intervals.clear();
    }

    /// Record `[start, start + width)` as excluded, wrapping at `2*pi`.
    fn exclude(&mut self, start: f64, width: f64) {
        if width >= TAU {
            self.intervals.push((0.0, TAU));
            return;
        }
        let s = start.rem_euclid(TAU);
        let e = s + width;
        if e <= TAU {
            self.intervals.push((s, e));
        } else {
            self.intervals.push((s, TAU));
            self.intervals.push((0.0, e - TAU));
        }
    }

    /// Angular measure left exposed: `2*pi` minus the union of exclusions.
    /// Sorting before the merge also collapses duplicate intervals.
    fn exposed(&mut self) -> f64 {
        if self.intervals.is_empty() {
            return TAU;
        }
        self.intervals
            .sort_unstable_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

        let mut covered = 0.0;
        let (mut start, mut end) = self.intervals[0];
        for &(s, e) in &self.intervals[1..] {
            if s > end {
                covered += end - start;
                start = s;
                end = e;
            } else {
                end = end.max(e);
            }
        }
        covered += end - start;
        (TAU - covered).max(0.0)
    }
}

/// SASA of atom `i`.
pub(crate) fn atom_area(
    arena: &CoordArena,
    nb: &NeighborList,
    probe: f64,
    delta: f64,
    i: usize,
) -> f64 {
    let ri = arena.radius(i) + probe;
    let zi = arena.z(i);
    let neighbors = nb.neighbors(i);

    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    let n_slices = ((2.0 * ri / delta).ceil() as usize).max(1);
    let h = 2.0 * ri / n_slices as f64;

    let mut arcs = ArcBuffer::default();
    let mut area = 0.0;

    'slices: for s in 0..n_slices {
        let zs = (zi - ri) + (s as f64 + 0.5) * h;
        let dz = zs - zi;
        let rho_i = (ri * ri - dz * dz).sqrt();
        arcs.clear();

        for e in neighbors {
            let j = e.index;
            let rj = arena.radius(j) + probe;
            let dzj = zs - arena.z(j);
            if dzj.abs() >= rj {
                continue;
            }
            let rho_j = (rj * rj - dzj * dzj).sqrt();
            let c = e.dxy;

            if c >= rho_i + rho_j {
                continue;
            }
            if c == 0.0 {
                // Concentric cross-sections: a duplicated atom splits the
                // circle (lower index keeps [0, pi)), a strictly larger
                // circle buries the slice, a smaller or equal one excludes
                // nothing.
                if is_exact_duplicate(arena, i, e) {
                    let start = if j < i { std::f64::consts::PI } else { 0.0 };
                    arcs.exclude(start, std::f64::consts::PI);
                } else if rho_j > rho_i {
                    continue 'slices;
                }
                continue;
            }
            if rho_j >= c + rho_i {
                // circle i entirely inside circle j
                continue 'slices;
            }
            if rho_i >= c + rho_j {
                // neighbor circle inside ours, boundary untouched
                continue;
            }

            let cos_half = ((c * c + rho_i * rho_i - rho_j * rho_j) / (2.0 * c * rho_i))
                .clamp(-1.0, 1.0);
            let half_width = cos_half.acos();
            let alpha = e.dy.atan2(e.dx);
            arcs.exclude(alpha - half_width, 2.0 * half_width);
        }

        area += arcs.exposed() * ri * h;
    }

    area
}
